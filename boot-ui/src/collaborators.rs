use crate::keycodes::{KeyCode, KeyFlags, ShutdownBits};
use bitflags::bitflags;
use boot_context::CollaboratorError;

/// Identifies a full-screen prompt to draw; opaque beyond that to this
/// crate, since rendering is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenId(pub u32);

pub trait Display {
    fn show_screen(&mut self, id: ScreenId, reason: u32) -> Result<(), CollaboratorError>;
    fn show_text(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        highlighted: bool,
    ) -> Result<(), CollaboratorError>;
    fn show_debug_info(&mut self, text: &str) -> Result<(), CollaboratorError>;
    fn get_dimensions(&self) -> (u32, u32);
    fn debug_log(&mut self, text: &str);
}

pub trait Input {
    fn read_key(&mut self) -> KeyCode;
    fn read_key_with_flags(&mut self) -> (KeyCode, KeyFlags);
    fn switches_pressed(&self, mask: u32) -> bool;
    fn shutdown_requested(&self) -> ShutdownBits;
}

pub trait Audio {
    fn beep(&mut self, hz: u32, ms: u32);
    fn sleep(&mut self, ms: u32);
}

/// The platform-provided warning pattern played during the developer
/// screen's main loop; bounds the loop's overall timeout.
pub trait AudioContext {
    fn open(&mut self);
    fn is_looping(&mut self) -> bool;
    fn close(&mut self);
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LoadFlags: u32 {
        const FIXED_DISK = 1 << 0;
        const REMOVABLE = 1 << 1;
        const LEGACY = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Success,
    NoDiskFound,
    Error,
}

pub trait KernelLoader {
    fn try_load_kernel(&mut self, flags: LoadFlags) -> LoadOutcome;
}

pub trait RollbackTpm {
    fn rollback_kernel_lock(&mut self, recovery: bool) -> Result<(), CollaboratorError>;
    fn set_virtual_dev_mode(&mut self, on: bool) -> Result<(), CollaboratorError>;
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FwmpFlags: u32 {
        const DEV_ENABLE_USB = 1 << 0;
        const DEV_ENABLE_LEGACY = 1 << 1;
        const DISABLE_BOOT = 1 << 2;
    }
}

pub trait Fwmp {
    fn flags(&self) -> FwmpFlags;
}
