//! The developer-mode menu flow: warn the operator, let them pick a kernel
//! source or transition back to normal mode, and fall back to a priority
//! order of kernel sources once the warning audio stops looping.

use crate::beep::{
    DISALLOWED_BEEP, DISALLOWED_BEEP_GAP_MS, USB_LOAD_FAILED_BEEP, USB_LOAD_FAILED_SLEEP_MS,
};
use crate::collaborators::{
    Audio, AudioContext, Display, Fwmp, FwmpFlags, Input, KernelLoader, LoadFlags, LoadOutcome,
    RollbackTpm,
};
use crate::confirm::{confirm, shutdown_poll, ConfirmFlags, ConfirmResult};
use crate::keycodes::{
    KEY_ARROW_DOWN, KEY_ARROW_UP, KEY_CTRL_D, KEY_CTRL_L, KEY_CTRL_U, KEY_ENTER, KEY_POWER,
    KEY_VOL_DOWN, KEY_VOL_UP,
};
use crate::menu::{render, CommitOutcome, DefaultBoot, Item, Menu, MenuState};
use crate::screens::{SCREEN_DEVELOPER_WARNING, SCREEN_TO_NORM, SCREEN_TO_NORM_CONFIRMED};
use boot_context::{BootContext, ExitCode, NvKey, NvStore};
use log::debug;

/// Policy derived once on entry to the developer flow, from NV, GBB, and
/// FWMP; never recomputed mid-flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DeveloperPolicy {
    allow_usb: bool,
    allow_legacy: bool,
    default_boot: DefaultBoot,
    disable_dev_boot: bool,
}

fn compute_policy<N: NvStore>(ctx: &mut BootContext<N>, fwmp: &impl Fwmp) -> DeveloperPolicy {
    let nv_usb = ctx.nv_store.get(NvKey::DevBootUsb).unwrap_or(0) != 0;
    let nv_legacy = ctx.nv_store.get(NvKey::DevBootLegacy).unwrap_or(0) != 0;
    let fwmp_flags = fwmp.flags();

    let allow_usb =
        nv_usb || ctx.gbb_flags.force_dev_boot_usb || fwmp_flags.contains(FwmpFlags::DEV_ENABLE_USB);
    let allow_legacy = nv_legacy
        || ctx.gbb_flags.force_dev_boot_legacy
        || fwmp_flags.contains(FwmpFlags::DEV_ENABLE_LEGACY);

    let mut default_boot = match ctx.nv_store.get(NvKey::DevDefaultBoot).unwrap_or(0) {
        1 => DefaultBoot::Usb,
        2 => DefaultBoot::Legacy,
        _ => DefaultBoot::Disk,
    };
    if ctx.gbb_flags.default_dev_boot_legacy {
        default_boot = DefaultBoot::Legacy;
    }

    let disable_dev_boot =
        fwmp_flags.contains(FwmpFlags::DISABLE_BOOT) && !ctx.gbb_flags.force_dev_switch_on;

    DeveloperPolicy {
        allow_usb,
        allow_legacy,
        default_boot,
        disable_dev_boot,
    }
}

fn beep_disallowed(audio: &mut impl Audio) {
    audio.beep(DISALLOWED_BEEP.0, DISALLOWED_BEEP.1);
    audio.sleep(DISALLOWED_BEEP_GAP_MS);
    audio.beep(DISALLOWED_BEEP.0, DISALLOWED_BEEP.1);
}

fn try_legacy<N: NvStore>(
    ctx: &mut BootContext<N>,
    policy: &DeveloperPolicy,
    audio: &mut impl Audio,
    kernel: &mut impl KernelLoader,
    rollback: &mut impl RollbackTpm,
) {
    if !policy.allow_legacy {
        beep_disallowed(audio);
        return;
    }
    let _ = rollback.rollback_kernel_lock(ctx.in_recovery_mode());
    let _ = kernel.try_load_kernel(LoadFlags::LEGACY);
    // A legacy payload that actually takes over never returns here; any
    // return at all is treated as a failed handoff.
    beep_disallowed(audio);
}

fn try_usb<N: NvStore>(
    ctx: &mut BootContext<N>,
    audio: &mut impl Audio,
    kernel: &mut impl KernelLoader,
) -> LoadOutcome {
    let outcome = kernel.try_load_kernel(LoadFlags::REMOVABLE);
    if outcome != LoadOutcome::Success {
        audio.beep(USB_LOAD_FAILED_BEEP.0, USB_LOAD_FAILED_BEEP.1);
        audio.sleep(USB_LOAD_FAILED_SLEEP_MS);
        let _ = ctx.nv_store.set(NvKey::RecoveryRequest, 0);
        let _ = ctx.nv_store.commit();
    }
    outcome
}

fn fallout<N: NvStore>(
    ctx: &mut BootContext<N>,
    policy: &DeveloperPolicy,
    audio: &mut impl Audio,
    kernel: &mut impl KernelLoader,
    rollback: &mut impl RollbackTpm,
    ctrl_d_pressed: bool,
) -> ExitCode {
    if policy.default_boot == DefaultBoot::Legacy && !ctrl_d_pressed {
        try_legacy(ctx, policy, audio, kernel, rollback);
        return ExitCode::NoDiskFound;
    }
    if policy.default_boot == DefaultBoot::Usb && !ctrl_d_pressed && policy.allow_usb {
        if try_usb(ctx, audio, kernel) == LoadOutcome::Success {
            return ExitCode::Success;
        }
        return ExitCode::NoDiskFound;
    }
    match kernel.try_load_kernel(LoadFlags::FIXED_DISK) {
        LoadOutcome::Success => ExitCode::Success,
        LoadOutcome::NoDiskFound | LoadOutcome::Error => ExitCode::NoDiskFound,
    }
}

/// Runs the full developer-mode flow to completion, returning the exit code
/// the caller (platform init) should act on.
#[allow(clippy::too_many_arguments)]
pub fn developer_flow<N, D, I, A, AC, K, R, F>(
    ctx: &mut BootContext<N>,
    display: &mut D,
    input: &mut I,
    audio: &mut A,
    audio_ctx: &mut AC,
    kernel: &mut K,
    rollback: &mut R,
    fwmp: &F,
) -> ExitCode
where
    N: NvStore,
    D: Display,
    I: Input,
    A: Audio,
    AC: AudioContext,
    K: KernelLoader,
    R: RollbackTpm,
    F: Fwmp,
{
    debug!("developer flow: entry");
    let policy = compute_policy(ctx, fwmp);

    if policy.disable_dev_boot {
        debug!("developer flow: dev boot disabled by policy, confirming transition to normal");
        loop {
            let _ = display.show_screen(SCREEN_TO_NORM, 0);
            match confirm(
                input,
                audio,
                ConfirmFlags::empty(),
                ctx.gbb_flags.disable_lid_shutdown,
                ctx.shared_flags.boot_rec_switch_virtual,
            ) {
                ConfirmResult::Yes => {
                    let _ = ctx.nv_store.set(NvKey::DisableDevRequest, 1);
                    let _ = ctx.nv_store.commit();
                    let _ = display.show_screen(SCREEN_TO_NORM_CONFIRMED, 0);
                    audio.sleep(5000);
                    return ExitCode::RebootRequired;
                }
                ConfirmResult::Shutdown => return ExitCode::ShutdownRequested,
                ConfirmResult::No => continue,
            }
        }
    }

    let mut state = MenuState::new(Menu::DevWarning, policy.default_boot);
    let mut ctrl_d_pressed = false;
    audio_ctx.open();

    loop {
        if shutdown_poll(input, ctx.gbb_flags.disable_lid_shutdown) {
            audio_ctx.close();
            return ExitCode::ShutdownRequested;
        }

        let _ = display.show_screen(SCREEN_DEVELOPER_WARNING, 0);
        render(display, &state);

        match input.read_key() {
            KEY_CTRL_D => {
                ctrl_d_pressed = true;
                break;
            }
            KEY_CTRL_L => try_legacy(ctx, &policy, audio, kernel, rollback),
            KEY_CTRL_U => {
                if policy.allow_usb {
                    if try_usb(ctx, audio, kernel) == LoadOutcome::Success {
                        audio_ctx.close();
                        return ExitCode::Success;
                    }
                } else {
                    beep_disallowed(audio);
                }
            }
            KEY_ARROW_UP | KEY_VOL_UP => state.nav_up(),
            KEY_ARROW_DOWN | KEY_VOL_DOWN => state.nav_down(),
            KEY_ENTER | KEY_POWER => match crate::menu::commit(&mut state) {
                CommitOutcome::Shutdown => {
                    audio_ctx.close();
                    return ExitCode::ShutdownRequested;
                }
                CommitOutcome::MenuChanged => {}
                CommitOutcome::Unhandled(item) => match item {
                    Item::DebugInfo => {
                        let _ = display.show_debug_info("developer mode");
                    }
                    Item::Legacy => try_legacy(ctx, &policy, audio, kernel, rollback),
                    Item::Usb => {
                        if policy.allow_usb {
                            if try_usb(ctx, audio, kernel) == LoadOutcome::Success {
                                audio_ctx.close();
                                return ExitCode::Success;
                            }
                        } else {
                            beep_disallowed(audio);
                        }
                    }
                    Item::Disk => break,
                    Item::Confirm if state.current_menu == Menu::ToNorm => {
                        let _ = ctx.nv_store.set(NvKey::DisableDevRequest, 1);
                        let _ = ctx.nv_store.commit();
                        let _ = display.show_screen(SCREEN_TO_NORM_CONFIRMED, 0);
                        audio.sleep(5000);
                        audio_ctx.close();
                        return ExitCode::RebootRequired;
                    }
                    // Network has no collaborator backing it in this corpus;
                    // selecting it is a no-op, same as on the original menu.
                    _ => {}
                },
            },
            _ => {}
        }

        if !audio_ctx.is_looping() {
            break;
        }
    }

    audio_ctx.close();
    fallout(ctx, &policy, audio, kernel, rollback, ctrl_d_pressed)
}
