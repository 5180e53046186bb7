use crate::outcome::EcOpError;
use boot_context::{CollaboratorError, EcDevice, Slot};

/// EC/PD I/O collaborator. One implementation typically drives both device
/// indices, since the wire protocol to talk to either is the same.
pub trait EcIo {
    fn running_rw(&mut self, dev: EcDevice) -> Result<bool, CollaboratorError>;

    /// Digest of the image currently resident in `slot`. `Unsupported`
    /// means the device doesn't expose this slot at all (e.g. a PD
    /// controller with no RO image) and is treated as a match.
    fn hash_image(&mut self, dev: EcDevice, slot: Slot) -> Result<Vec<u8>, CollaboratorError>;

    /// Digest the AP firmware expects `slot` to contain.
    fn expected_hash(&mut self, dev: EcDevice, slot: Slot) -> Result<Vec<u8>, CollaboratorError>;

    /// The image bytes the AP firmware expects `slot` to contain.
    fn expected_image(&mut self, dev: EcDevice, slot: Slot) -> Result<Vec<u8>, CollaboratorError>;

    fn update_image(&mut self, dev: EcDevice, slot: Slot, image: &[u8]) -> Result<(), EcOpError>;
    fn jump_to_rw(&mut self, dev: EcDevice) -> Result<(), EcOpError>;
    fn disable_jump(&mut self, dev: EcDevice) -> Result<(), CollaboratorError>;
    fn protect(&mut self, dev: EcDevice, slot: Slot) -> Result<(), EcOpError>;

    fn vboot_done(&mut self, in_recovery: bool) -> Result<(), CollaboratorError>;
    fn battery_cutoff(&mut self) -> Result<(), CollaboratorError>;
}
