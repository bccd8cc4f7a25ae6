// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Key-value persistence seam.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Fallible;

/// Where the deck snapshot is kept.
pub const DECK_KEY: &str = "lt.deck";
/// Where the current index is kept.
pub const INDEX_KEY: &str = "lt.index";
/// Where the completion map is kept.
pub const COMPLETED_KEY: &str = "lt.correct";

/// A string-to-string store, like the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Fallible<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Fallible<()>;
}

/// An in-memory store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() -> Fallible<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get("a")?, None);
        store.set("a", "1")?;
        store.set("a", "2")?;
        assert_eq!(store.get("a")?, Some("2".to_string()));
        Ok(())
    }
}
