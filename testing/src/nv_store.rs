use boot_context::{CollaboratorError, NvKey, NvStore};
use std::collections::HashMap;

/// An in-memory `NvStore` for tests. `commit` is a no-op; values are visible
/// to `get` immediately after `set`, which is sufficient for exercising the
/// engine and UI logic without a battery-backed implementation.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNvStore {
    values: HashMap<NvKey, u32>,
    pub commit_count: u32,
}

impl InMemoryNvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: NvKey, value: u32) -> Self {
        self.values.insert(key, value);
        self
    }
}

impl NvStore for InMemoryNvStore {
    fn get(&self, key: NvKey) -> Result<u32, CollaboratorError> {
        Ok(self.values.get(&key).copied().unwrap_or(0))
    }

    fn set(&mut self, key: NvKey, value: u32) -> Result<(), CollaboratorError> {
        self.values.insert(key, value);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), CollaboratorError> {
        self.commit_count += 1;
        Ok(())
    }
}
