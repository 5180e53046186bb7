//! Named beep cadences, collected in one place since several call sites in
//! the developer and recovery flows share them.

/// (hz, ms) tone played twice, with a 120ms gap, when an action is
/// disallowed by policy (USB/legacy boot not permitted, legacy payload
/// returned control).
pub const DISALLOWED_BEEP: (u32, u32) = (400, 120);
pub const DISALLOWED_BEEP_GAP_MS: u32 = 120;

/// Tone played once after a failed USB kernel load attempt.
pub const USB_LOAD_FAILED_BEEP: (u32, u32) = (250, 200);
pub const USB_LOAD_FAILED_SLEEP_MS: u32 = 120;

/// Tone played on an untrusted-keyboard ENTER or a "button stuck" condition.
pub const OPERATOR_ERROR_BEEP: (u32, u32) = (400, 120);
