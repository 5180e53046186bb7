// Licensed under the Apache-2.0 license

//! The EC software sync engine: reconciles EC/PD firmware against the
//! application processor's cryptographic expectations, in three phases.

pub mod collaborators;
pub mod devices;
pub mod engine;
pub mod outcome;

pub use collaborators::EcIo;
pub use devices::DeviceSet;
pub use engine::{ec_will_update_slowly, phase1, phase2, phase3};
pub use outcome::{EcOpError, SyncOutcome};

#[cfg(test)]
mod mocks;
