//! Scriptable mocks for the Boot-mode UI's collaborator traits: display,
//! input, audio, kernel loader, rollback/TPM, and FWMP.
//!
//! Lives inside `boot-ui` (rather than the shared `fw-testing` crate) so
//! that these trait impls don't create a dev-dependency cycle: `boot-ui`'s
//! own collaborator traits are defined here, and implementing them for
//! foreign mock types from a separate crate that `boot-ui` depends on would
//! force `fw-testing` to depend back on `boot-ui`.

use crate::collaborators::{
    Audio, AudioContext, Display, Fwmp, FwmpFlags, KernelLoader, LoadFlags, LoadOutcome,
    RollbackTpm, ScreenId,
};
use crate::keycodes::{KeyFlags, ShutdownBits};
use boot_context::CollaboratorError;
use std::collections::VecDeque;

/// Records every draw call; never fails.
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub calls: Vec<String>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for MockDisplay {
    fn show_screen(&mut self, id: ScreenId, reason: u32) -> Result<(), CollaboratorError> {
        self.calls.push(format!("show_screen({},{reason})", id.0));
        Ok(())
    }

    fn show_text(&mut self, x: u32, y: u32, text: &str, highlighted: bool) -> Result<(), CollaboratorError> {
        self.calls
            .push(format!("show_text({x},{y},{text:?},{highlighted})"));
        Ok(())
    }

    fn show_debug_info(&mut self, text: &str) -> Result<(), CollaboratorError> {
        self.calls.push(format!("show_debug_info({text:?})"));
        Ok(())
    }

    fn get_dimensions(&self) -> (u32, u32) {
        (80, 25)
    }

    fn debug_log(&mut self, text: &str) {
        self.calls.push(format!("debug_log({text:?})"));
    }
}

/// A scripted sequence of keyboard events and switch/shutdown state. Tests
/// push the exact key sequence they need; once exhausted, `read_key` returns
/// `KEY_NONE` forever so a test-driven loop can poll past the script without
/// panicking.
#[derive(Debug, Default)]
pub struct MockInput {
    keys: VecDeque<(u32, KeyFlags)>,
    pub rec_button_pressed: VecDeque<bool>,
    pub shutdown_bits: ShutdownBits,
}

impl MockInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, code: u32) -> Self {
        self.keys.push_back((code, KeyFlags::empty()));
        self
    }

    pub fn with_trusted_key(mut self, code: u32) -> Self {
        self.keys.push_back((code, KeyFlags::TRUSTED_KEYBOARD));
        self
    }

    pub fn with_rec_button(mut self, pressed: bool) -> Self {
        self.rec_button_pressed.push_back(pressed);
        self
    }

    pub fn with_shutdown_bits(mut self, bits: ShutdownBits) -> Self {
        self.shutdown_bits = bits;
        self
    }
}

impl crate::collaborators::Input for MockInput {
    fn read_key(&mut self) -> u32 {
        self.keys.pop_front().map(|(code, _)| code).unwrap_or(0)
    }

    fn read_key_with_flags(&mut self) -> (u32, KeyFlags) {
        self.keys.pop_front().unwrap_or((0, KeyFlags::empty()))
    }

    fn switches_pressed(&self, _mask: u32) -> bool {
        self.rec_button_pressed.front().copied().unwrap_or(false)
    }

    fn shutdown_requested(&self) -> ShutdownBits {
        self.shutdown_bits
    }
}

/// Records beeps and sleeps in order so tests can assert on cadence.
#[derive(Debug, Default)]
pub struct MockAudio {
    pub calls: Vec<String>,
}

impl MockAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Audio for MockAudio {
    fn beep(&mut self, hz: u32, ms: u32) {
        self.calls.push(format!("beep({hz},{ms})"));
    }

    fn sleep(&mut self, ms: u32) {
        self.calls.push(format!("sleep({ms})"));
    }
}

/// Loops exactly `loops` times before reporting `is_looping() == false`.
#[derive(Debug, Default)]
pub struct MockAudioContext {
    pub loops_remaining: u32,
    pub opened: bool,
    pub closed: bool,
}

impl MockAudioContext {
    pub fn new(loops: u32) -> Self {
        Self {
            loops_remaining: loops,
            ..Self::default()
        }
    }
}

impl AudioContext for MockAudioContext {
    fn open(&mut self) {
        self.opened = true;
    }

    fn is_looping(&mut self) -> bool {
        if self.loops_remaining == 0 {
            false
        } else {
            self.loops_remaining -= 1;
            true
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

/// Scriptable kernel loader: returns the next queued outcome regardless of
/// `flags`, defaulting to `NoDiskFound` once exhausted.
#[derive(Debug, Default)]
pub struct MockKernelLoader {
    pub results: VecDeque<LoadOutcome>,
    pub calls: Vec<LoadFlags>,
}

impl MockKernelLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_result(mut self, outcome: LoadOutcome) -> Self {
        self.results.push_back(outcome);
        self
    }
}

impl KernelLoader for MockKernelLoader {
    fn try_load_kernel(&mut self, flags: LoadFlags) -> LoadOutcome {
        self.calls.push(flags);
        self.results.pop_front().unwrap_or(LoadOutcome::NoDiskFound)
    }
}

#[derive(Debug, Default)]
pub struct MockRollbackTpm {
    pub rollback_calls: Vec<bool>,
    pub rollback_fails: bool,
    pub dev_mode_calls: Vec<bool>,
    pub dev_mode_fails: bool,
}

impl MockRollbackTpm {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RollbackTpm for MockRollbackTpm {
    fn rollback_kernel_lock(&mut self, recovery: bool) -> Result<(), CollaboratorError> {
        self.rollback_calls.push(recovery);
        if self.rollback_fails {
            Err(CollaboratorError::Io)
        } else {
            Ok(())
        }
    }

    fn set_virtual_dev_mode(&mut self, on: bool) -> Result<(), CollaboratorError> {
        self.dev_mode_calls.push(on);
        if self.dev_mode_fails {
            Err(CollaboratorError::Io)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockFwmp {
    pub flags: FwmpFlags,
}

impl MockFwmp {
    pub fn new(flags: FwmpFlags) -> Self {
        Self { flags }
    }
}

impl Fwmp for MockFwmp {
    fn flags(&self) -> FwmpFlags {
        self.flags
    }
}
