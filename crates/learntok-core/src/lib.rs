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

//! learntok-core: Core library for the learntok learning deck.
//!
//! This library provides WASM-compatible types and logic for:
//! - Card and deck models, with permissive JSON import
//! - Deck navigation and progress tracking
//! - Persisting a session through a key-value store
//! - Mapping keys and swipes to deck commands
//! - Building the view model front-ends render

pub mod check;
pub mod deck;
pub mod error;
pub mod input;
pub mod markdown;
pub mod navigation;
pub mod session;
pub mod storage;
pub mod types;
pub mod view;

// Re-exports for convenience
pub use check::{Issue, Severity, check_deck};
pub use deck::Deck;
pub use error::{EngineError, ErrorReport, Fallible, fail};
pub use input::{Command, Input};
pub use navigation::{CompletionMap, NavigationState};
pub use session::{Interaction, Session};
pub use storage::{KeyValueStore, MemoryStore};
pub use types::card::{Card, CardContent, CardType, Question};
pub use types::card_id::CardId;
pub use view::{CardBody, CardView, DeckView};
