//! A scriptable `EcIo` mock.
//!
//! Lives inside `ec-sync` (rather than the shared `fw-testing` crate) so
//! that this trait impl doesn't create a dev-dependency cycle: `EcIo` is
//! defined here, and implementing it for a foreign mock type from a
//! separate crate that `ec-sync` depends on would force `fw-testing` to
//! depend back on `ec-sync`.

use crate::{EcIo, EcOpError};
use boot_context::{CollaboratorError, EcDevice, Slot};
use std::collections::{HashMap, VecDeque};

/// Hashes and images default to "matching, nothing to do"; tests override
/// individual slots to provoke the scenario they want. `calls` records every
/// invocation in order so tests can assert on call sequencing (protect
/// before disable-jump, and so on) without over-specifying unrelated detail.
#[derive(Default)]
pub struct MockEc {
    pub running_rw: HashMap<EcDevice, bool>,
    pub running_rw_err: bool,
    pub current_hash: HashMap<(EcDevice, Slot), Vec<u8>>,
    pub expected_hash: HashMap<(EcDevice, Slot), Vec<u8>>,
    pub expected_image: HashMap<(EcDevice, Slot), Vec<u8>>,
    pub update_results: HashMap<(EcDevice, Slot), VecDeque<Result<(), EcOpError>>>,
    pub jump_results: HashMap<EcDevice, Result<(), EcOpError>>,
    pub protect_results: HashMap<(EcDevice, Slot), Result<(), EcOpError>>,
    pub disable_jump_fails: bool,
    pub vboot_done_calls: Vec<bool>,
    pub battery_cutoff_calls: u32,
    pub calls: Vec<String>,
}

impl MockEc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_running_rw(mut self, dev: EcDevice, value: bool) -> Self {
        self.running_rw.insert(dev, value);
        self
    }

    /// Makes `hash_image`/`expected_hash` disagree for `(dev, slot)`.
    pub fn with_mismatch(mut self, dev: EcDevice, slot: Slot) -> Self {
        self.current_hash.insert((dev, slot), vec![0xAA; 32]);
        self.expected_hash.insert((dev, slot), vec![0xBB; 32]);
        self.expected_image.insert((dev, slot), vec![0x01, 0x02, 0x03]);
        self
    }

    pub fn with_update_result(
        mut self,
        dev: EcDevice,
        slot: Slot,
        result: Result<(), EcOpError>,
    ) -> Self {
        self.update_results
            .entry((dev, slot))
            .or_default()
            .push_back(result);
        self
    }

    fn slot_matches(&self, dev: EcDevice, slot: Slot) -> (Vec<u8>, Vec<u8>) {
        let current = self
            .current_hash
            .get(&(dev, slot))
            .cloned()
            .unwrap_or_else(|| vec![0; 32]);
        let expected = self
            .expected_hash
            .get(&(dev, slot))
            .cloned()
            .unwrap_or_else(|| vec![0; 32]);
        (current, expected)
    }
}

impl EcIo for MockEc {
    fn running_rw(&mut self, dev: EcDevice) -> Result<bool, CollaboratorError> {
        self.calls.push(format!("running_rw({dev:?})"));
        if self.running_rw_err {
            return Err(CollaboratorError::Io);
        }
        Ok(self.running_rw.get(&dev).copied().unwrap_or(false))
    }

    fn hash_image(&mut self, dev: EcDevice, slot: Slot) -> Result<Vec<u8>, CollaboratorError> {
        self.calls.push(format!("hash_image({dev:?},{slot:?})"));
        Ok(self.slot_matches(dev, slot).0)
    }

    fn expected_hash(&mut self, dev: EcDevice, slot: Slot) -> Result<Vec<u8>, CollaboratorError> {
        self.calls.push(format!("expected_hash({dev:?},{slot:?})"));
        Ok(self.slot_matches(dev, slot).1)
    }

    fn expected_image(&mut self, dev: EcDevice, slot: Slot) -> Result<Vec<u8>, CollaboratorError> {
        self.calls.push(format!("expected_image({dev:?},{slot:?})"));
        Ok(self
            .expected_image
            .get(&(dev, slot))
            .cloned()
            .unwrap_or_default())
    }

    fn update_image(&mut self, dev: EcDevice, slot: Slot, _image: &[u8]) -> Result<(), EcOpError> {
        self.calls.push(format!("update_image({dev:?},{slot:?})"));
        let result = self
            .update_results
            .get_mut(&(dev, slot))
            .and_then(|q| q.pop_front())
            .unwrap_or(Ok(()));
        if result.is_ok() {
            // Simulate the flash now containing what was written.
            let expected = self.expected_hash.get(&(dev, slot)).cloned();
            if let Some(expected) = expected {
                self.current_hash.insert((dev, slot), expected);
            }
        }
        result
    }

    fn jump_to_rw(&mut self, dev: EcDevice) -> Result<(), EcOpError> {
        self.calls.push(format!("jump_to_rw({dev:?})"));
        self.jump_results.get(&dev).copied().unwrap_or(Ok(()))
    }

    fn disable_jump(&mut self, dev: EcDevice) -> Result<(), CollaboratorError> {
        self.calls.push(format!("disable_jump({dev:?})"));
        if self.disable_jump_fails {
            Err(CollaboratorError::Io)
        } else {
            Ok(())
        }
    }

    fn protect(&mut self, dev: EcDevice, slot: Slot) -> Result<(), EcOpError> {
        self.calls.push(format!("protect({dev:?},{slot:?})"));
        self.protect_results
            .get(&(dev, slot))
            .copied()
            .unwrap_or(Ok(()))
    }

    fn vboot_done(&mut self, in_recovery: bool) -> Result<(), CollaboratorError> {
        self.calls.push(format!("vboot_done({in_recovery})"));
        self.vboot_done_calls.push(in_recovery);
        Ok(())
    }

    fn battery_cutoff(&mut self) -> Result<(), CollaboratorError> {
        self.calls.push("battery_cutoff()".to_string());
        self.battery_cutoff_calls += 1;
        Ok(())
    }
}
