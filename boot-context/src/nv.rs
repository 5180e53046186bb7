use crate::error::CollaboratorError;

/// Recognized non-volatile storage keys.
///
/// Values behind these keys are small unsigned integers; the store itself is
/// free to back them with whatever persistence mechanism the platform has
/// (battery-backed CMOS, a write-protect-gated flash region, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NvKey {
    RecoveryRequest,
    RecoverySubcode,
    TryRoSync,
    BatteryCutoffRequest,
    DevBootUsb,
    DevBootLegacy,
    DevDefaultBoot,
    DisableDevRequest,
}

/// Non-volatile storage collaborator.
///
/// `commit` defaults to a no-op `Ok`, matching the convention used elsewhere
/// in this corpus for collaborators that persist synchronously on every
/// `set`; a battery-backed implementation that batches writes overrides it.
pub trait NvStore {
    fn get(&self, key: NvKey) -> Result<u32, CollaboratorError>;
    fn set(&mut self, key: NvKey, value: u32) -> Result<(), CollaboratorError>;

    fn commit(&mut self) -> Result<(), CollaboratorError> {
        Ok(())
    }
}
