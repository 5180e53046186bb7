// Licensed under the Apache-2.0 license

//! Shared per-boot state for the verified-boot firmware helper: the EC
//! sync engine and boot-mode UI both build on the types in this crate.

pub mod context;
pub mod error;
pub mod flags;
pub mod nv;
pub mod recovery;

pub use context::BootContext;
pub use error::CollaboratorError;
pub use flags::{EcDevice, GbbFlags, ScratchFlags, SharedFlags, Slot};
pub use nv::{NvKey, NvStore};
pub use recovery::{ExitCode, RecoveryReason};
