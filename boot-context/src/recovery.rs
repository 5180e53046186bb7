/// Reasons the EC sync engine can record into NV to force the next boot into
/// recovery mode. Values are internal to this crate; platforms that persist
/// them as raw NV integers should keep this enum's discriminants stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecoveryReason {
    EcProtect = 1,
    EcHashFailed = 2,
    EcExpectedHash = 3,
    EcHashSize = 4,
    EcExpectedImage = 5,
    EcUpdate = 6,
    EcJumpRw = 7,
    EcSoftwareSync = 8,
    EcUnknownImage = 9,
}

/// Exit codes returned to whatever drives the sync engine and the boot UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    RebootRequired,
    RebootToRoRequired,
    ShutdownRequested,
    TpmSetBootModeState,
    NoDiskFound,
}
