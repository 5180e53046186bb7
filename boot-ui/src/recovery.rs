//! The recovery-mode flow: either an unattended "OS broken" screen when
//! recovery was triggered by failure, or the interactive manual-recovery
//! loop that scans for removable media and lets the operator transition
//! into developer mode.

use crate::beep::OPERATOR_ERROR_BEEP;
use crate::collaborators::{
    Audio, Display, Fwmp, FwmpFlags, Input, KernelLoader, LoadFlags, LoadOutcome, RollbackTpm,
};
use crate::confirm::{shutdown_poll, POLL_INTERVAL_MS};
use crate::keycodes::{
    KEY_ARROW_DOWN, KEY_ARROW_UP, KEY_ENTER, KEY_POWER, KEY_VOL_DOWN, KEY_VOL_UP, REC_BUTTON_MASK,
};
use crate::menu::{render, CommitOutcome, Item, Menu, MenuState};
use crate::screens::{SCREEN_OS_BROKEN, SCREEN_RECOVERY};
use boot_context::{BootContext, ExitCode, NvKey, NvStore};
use log::debug;

const DISK_SCAN_INTERVAL_MS: u32 = 1000;
const DISK_SCAN_TICKS: u32 = DISK_SCAN_INTERVAL_MS / POLL_INTERVAL_MS;

/// Runs the recovery-mode flow to completion, returning the exit code the
/// caller should act on.
pub fn recovery_flow<N, D, I, A, K, R, F>(
    ctx: &mut BootContext<N>,
    display: &mut D,
    input: &mut I,
    audio: &mut A,
    kernel: &mut K,
    rollback: &mut R,
    fwmp: &F,
) -> ExitCode
where
    N: NvStore,
    D: Display,
    I: Input,
    A: Audio,
    K: KernelLoader,
    R: RollbackTpm,
    F: Fwmp,
{
    if !ctx.shared_flags.boot_dev_switch_on && !ctx.shared_flags.boot_rec_switch_on {
        return broken_mode(ctx, display, input, audio);
    }
    manual_recovery(ctx, display, input, audio, kernel, rollback, fwmp)
}

/// Neither switch is on: recovery was triggered by failure rather than an
/// operator request. There is nothing to do but report it and wait.
fn broken_mode<N, D, I, A>(ctx: &mut BootContext<N>, display: &mut D, input: &mut I, audio: &mut A) -> ExitCode
where
    N: NvStore,
    D: Display,
    I: Input,
    A: Audio,
{
    debug!("recovery flow: broken mode, recovery_reason={}", ctx.recovery_reason);
    let _ = ctx
        .nv_store
        .set(NvKey::RecoverySubcode, ctx.recovery_reason);
    let _ = ctx.nv_store.commit();
    let _ = display.show_screen(SCREEN_OS_BROKEN, ctx.recovery_reason);

    loop {
        if shutdown_poll(input, ctx.gbb_flags.disable_lid_shutdown) {
            return ExitCode::ShutdownRequested;
        }
        let _ = input.read_key();
        audio.sleep(POLL_INTERVAL_MS);
    }
}

fn manual_recovery<N, D, I, A, K, R, F>(
    ctx: &mut BootContext<N>,
    display: &mut D,
    input: &mut I,
    audio: &mut A,
    kernel: &mut K,
    rollback: &mut R,
    fwmp: &F,
) -> ExitCode
where
    N: NvStore,
    D: Display,
    I: Input,
    A: Audio,
    K: KernelLoader,
    R: RollbackTpm,
    F: Fwmp,
{
    debug!("recovery flow: manual recovery mode");
    let mut state = MenuState::new(Menu::Recovery, crate::menu::DefaultBoot::Disk);
    let mut viewing_debug_info = false;

    loop {
        if let LoadOutcome::Success = kernel.try_load_kernel(LoadFlags::REMOVABLE) {
            return ExitCode::Success;
        }
        let _ = ctx.nv_store.set(NvKey::RecoveryRequest, 0);
        let _ = ctx.nv_store.commit();

        if !(viewing_debug_info && state.current_menu == Menu::Recovery) {
            let _ = display.show_screen(SCREEN_RECOVERY, 0);
            render(display, &state);
        }

        for _ in 0..DISK_SCAN_TICKS {
            if shutdown_poll(input, ctx.gbb_flags.disable_lid_shutdown) {
                return ExitCode::ShutdownRequested;
            }

            match input.read_key() {
                KEY_ARROW_UP | KEY_VOL_UP => {
                    state.nav_up();
                    viewing_debug_info = false;
                }
                KEY_ARROW_DOWN | KEY_VOL_DOWN => {
                    state.nav_down();
                    viewing_debug_info = false;
                }
                KEY_ENTER | KEY_POWER => match crate::menu::commit(&mut state) {
                    CommitOutcome::Shutdown => return ExitCode::ShutdownRequested,
                    CommitOutcome::MenuChanged => viewing_debug_info = false,
                    CommitOutcome::Unhandled(Item::DebugInfo) => {
                        let _ = display.show_debug_info("recovery mode");
                        viewing_debug_info = true;
                    }
                    CommitOutcome::Unhandled(Item::Confirm) if state.current_menu == Menu::ToDev => {
                        if let Some(exit) = try_enable_dev_mode(ctx, input, audio, rollback, fwmp) {
                            return exit;
                        }
                    }
                    CommitOutcome::Unhandled(_) => {}
                },
                _ => {}
            }

            audio.sleep(POLL_INTERVAL_MS);
        }
    }
}

/// Evaluates the gate for honoring a TO_DEV/Confirm commit and, if granted,
/// flips virtual dev mode and reports the exit code the caller should act
/// on. Returns `None` when the gate isn't satisfied and the flow should
/// keep looping.
fn try_enable_dev_mode<N, I, A, R, F>(
    ctx: &mut BootContext<N>,
    input: &mut I,
    audio: &mut A,
    rollback: &mut R,
    fwmp: &F,
) -> Option<ExitCode>
where
    N: NvStore,
    I: Input,
    A: Audio,
    R: RollbackTpm,
    F: Fwmp,
{
    let gate = ctx.shared_flags.honor_virt_dev_switch
        && !ctx.shared_flags.boot_dev_switch_on
        && ctx.shared_flags.boot_rec_switch_on
        && ctx.shared_flags.ec_trusted;
    if !gate {
        return None;
    }

    if !ctx.shared_flags.boot_rec_switch_virtual && input.switches_pressed(REC_BUTTON_MASK) {
        audio.beep(OPERATOR_ERROR_BEEP.0, OPERATOR_ERROR_BEEP.1);
        return None;
    }

    match rollback.set_virtual_dev_mode(true) {
        Ok(()) => {
            let allow_usb =
                ctx.gbb_flags.force_dev_boot_usb || fwmp.flags().contains(FwmpFlags::DEV_ENABLE_USB);
            if allow_usb {
                let _ = ctx.nv_store.set(NvKey::DevBootUsb, 1);
                let _ = ctx.nv_store.commit();
            }
            Some(ExitCode::RebootRequired)
        }
        Err(_) => Some(ExitCode::TpmSetBootModeState),
    }
}

