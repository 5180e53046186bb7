// Licensed under the Apache-2.0 license

//! Boot-mode user interface state machine: the developer-warning and
//! recovery menus, their shared confirmation primitive, and the collaborator
//! traits (display, input, audio, kernel loader, rollback/TPM, FWMP) they're
//! built against.

pub mod beep;
pub mod collaborators;
pub mod confirm;
pub mod developer;
pub mod keycodes;
pub mod menu;
pub mod recovery;
mod screens;

#[cfg(test)]
mod mocks;

pub use collaborators::{
    Audio, AudioContext, Display, Fwmp, FwmpFlags, KernelLoader, LoadFlags, LoadOutcome,
    RollbackTpm, ScreenId,
};
pub use confirm::{confirm, shutdown_poll, ConfirmFlags, ConfirmResult};
pub use developer::developer_flow;
pub use keycodes::{KeyFlags, ShutdownBits};
pub use menu::{CommitOutcome, DefaultBoot, Item, Menu, MenuState};
pub use recovery::recovery_flow;
