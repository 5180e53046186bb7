use bitflags::bitflags;

pub type KeyCode = u32;

pub const KEY_NONE: KeyCode = 0x00;
pub const KEY_ENTER: KeyCode = 0x0D;
pub const KEY_SPACE: KeyCode = 0x20;
pub const KEY_ESC: KeyCode = 0x1B;
pub const KEY_CTRL_D: KeyCode = 0x04;
pub const KEY_CTRL_L: KeyCode = 0x0C;
pub const KEY_CTRL_U: KeyCode = 0x15;

pub const KEY_VOL_UP: KeyCode = 0x100;
pub const KEY_VOL_DOWN: KeyCode = 0x101;
pub const KEY_ARROW_UP: KeyCode = 0x102;
pub const KEY_ARROW_DOWN: KeyCode = 0x103;
pub const KEY_POWER: KeyCode = 0x104;

bitflags! {
    /// Flags carried alongside a keyboard event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyFlags: u32 {
        const TRUSTED_KEYBOARD = 1 << 0;
    }
}

bitflags! {
    /// Bits returned by the "shutdown requested" collaborator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ShutdownBits: u32 {
        const LID_CLOSED = 1 << 0;
        const POWER_BUTTON = 1 << 1;
    }
}

/// Mask identifying the physical recovery button in `switches_pressed`.
pub const REC_BUTTON_MASK: u32 = 1 << 0;
