// Licensed under the Apache-2.0 license

//! Shared `NvStore` test double used across the workspace's test suites.

pub mod nv_store;

pub use nv_store::InMemoryNvStore;
