use crate::beep::OPERATOR_ERROR_BEEP;
use crate::collaborators::{Audio, Input};
use crate::keycodes::{KeyFlags, ShutdownBits, KEY_ENTER, KEY_ESC, KEY_SPACE, REC_BUTTON_MASK};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ConfirmFlags: u32 {
        const MUST_TRUST_KEYBOARD = 1 << 0;
        const SPACE_MEANS_NO = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Yes,
    No,
    Shutdown,
}

/// Polling interval used by `Confirm`, `ShutdownPoll`, and the manual
/// recovery loop's keyboard scans.
pub const POLL_INTERVAL_MS: u32 = 20;

/// `true` iff any shutdown-request bit remains asserted after masking out
/// the power button (repurposed as "select") and, if policy says so, lid
/// closure.
pub fn shutdown_poll(input: &impl Input, disable_lid_shutdown: bool) -> bool {
    let mut bits = input.shutdown_requested();
    bits.remove(ShutdownBits::POWER_BUTTON);
    if disable_lid_shutdown {
        bits.remove(ShutdownBits::LID_CLOSED);
    }
    !bits.is_empty()
}

/// A blocking loop that polls the keyboard and the recovery button at
/// [`POLL_INTERVAL_MS`] cadence until the operator confirms, declines, or a
/// shutdown is requested.
///
/// The recovery-button press/release edge is tracked locally to this call,
/// never globally: a fresh `Confirm` invocation always starts with no prior
/// press observed.
pub fn confirm(
    input: &mut impl Input,
    audio: &mut impl Audio,
    flags: ConfirmFlags,
    disable_lid_shutdown: bool,
    rec_switch_virtual: bool,
) -> ConfirmResult {
    let mut button_was_pressed = false;

    loop {
        if shutdown_poll(input, disable_lid_shutdown) {
            return ConfirmResult::Shutdown;
        }

        let (code, key_flags) = input.read_key_with_flags();
        match code {
            KEY_ENTER => {
                let trusted = key_flags.contains(KeyFlags::TRUSTED_KEYBOARD);
                if flags.contains(ConfirmFlags::MUST_TRUST_KEYBOARD) && !trusted {
                    audio.beep(OPERATOR_ERROR_BEEP.0, OPERATOR_ERROR_BEEP.1);
                } else {
                    return ConfirmResult::Yes;
                }
            }
            KEY_SPACE if flags.contains(ConfirmFlags::SPACE_MEANS_NO) => {
                return ConfirmResult::No;
            }
            KEY_ESC => return ConfirmResult::No,
            _ => {}
        }

        if !rec_switch_virtual {
            let pressed = input.switches_pressed(REC_BUTTON_MASK);
            if pressed {
                button_was_pressed = true;
            } else if button_was_pressed {
                return ConfirmResult::Yes;
            }
        }

        audio.sleep(POLL_INTERVAL_MS);
    }
}
