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

//! A persisted learning session.
//!
//! [`Session`] wraps the navigation engine with a [`KeyValueStore`]. Each
//! piece of state lives under its own key, is read once when the session is
//! opened, and is rewritten whenever it changes. Persistence is best-effort:
//! read failures fall back to defaults and write failures are logged, never
//! returned. The `try_` variants are for callers whose only job is the
//! write, and report it.

use serde_json::Value;

use crate::deck::Deck;
use crate::error::EngineError;
use crate::error::ErrorReport;
use crate::input::Command;
use crate::navigation::CompletionMap;
use crate::navigation::NavigationState;
use crate::storage::COMPLETED_KEY;
use crate::storage::DECK_KEY;
use crate::storage::INDEX_KEY;
use crate::storage::KeyValueStore;
use crate::view::DeckView;

/// Transient state of the card on screen. Forgotten as soon as the visible
/// card changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interaction {
    /// The choice picked on a question card, if any.
    pub picked: Option<usize>,
    /// Whether a flashcard shows its back.
    pub flipped: bool,
}

pub struct Session<S: KeyValueStore> {
    state: NavigationState,
    interaction: Interaction,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore a session from the store. Each entry falls back to its own
    /// default independently.
    pub fn open(store: S) -> Self {
        let deck = load(&store, DECK_KEY, |text| {
            Deck::from_json(text).map_err(|e| e.to_string())
        })
        .unwrap_or_else(Deck::builtin);
        let index = load(&store, INDEX_KEY, |text| {
            serde_json::from_str::<usize>(text).map_err(|e| e.to_string())
        })
        .unwrap_or(0);
        let completed = load(&store, COMPLETED_KEY, |text| {
            serde_json::from_str::<CompletionMap>(text).map_err(|e| e.to_string())
        })
        .unwrap_or_default();
        let state = NavigationState::from_parts(deck, index, completed);
        log::debug!(
            "Opened session with {} cards at index {}",
            state.len(),
            state.current_index()
        );
        Self {
            state,
            interaction: Interaction::default(),
            store,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> DeckView {
        DeckView::new(&self.state, self.interaction)
    }

    pub fn next(&mut self) -> bool {
        self.track(NavigationState::next)
    }

    pub fn previous(&mut self) -> bool {
        self.track(NavigationState::previous)
    }

    pub fn mark_correct(&mut self) -> bool {
        self.track(NavigationState::mark_correct)
    }

    pub fn answer_choice(&mut self, choice: usize) -> Option<bool> {
        self.track(|state| state.answer_choice(choice))
    }

    pub fn complete_flashcard(&mut self) -> bool {
        self.track(NavigationState::complete_flashcard)
    }

    /// Select a choice on the current question card. Picks can be changed
    /// until the answer is confirmed.
    pub fn pick(&mut self, choice: usize) -> bool {
        let valid = self
            .state
            .current_card()
            .and_then(|card| card.question())
            .is_some_and(|q| q.has_choice(choice));
        if !valid || self.interaction.picked == Some(choice) {
            return false;
        }
        self.interaction.picked = Some(choice);
        true
    }

    /// Turn the current flashcard over.
    pub fn flip(&mut self) -> bool {
        if !self.state.current_card().is_some_and(|card| card.is_flashcard()) {
            return false;
        }
        self.interaction.flipped = !self.interaction.flipped;
        true
    }

    /// Finish the current card and advance: a picked question is answered,
    /// a flipped flashcard is credited. Anything else is a no-op.
    pub fn confirm(&mut self) -> Option<bool> {
        let card = self.state.current_card()?;
        if let Some(choice) = self.interaction.picked {
            if card.question().is_some() {
                return self.answer_choice(choice);
            }
        }
        if self.interaction.flipped && card.is_flashcard() {
            return Some(self.complete_flashcard());
        }
        None
    }

    pub fn import_deck(&mut self, raw: Value) -> Result<(), EngineError> {
        let deck = Deck::from_value(raw)?;
        self.replace_deck(deck);
        Ok(())
    }

    pub fn import_json(&mut self, text: &str) -> Result<(), EngineError> {
        let deck = Deck::from_json(text)?;
        self.replace_deck(deck);
        Ok(())
    }

    pub fn replace_deck(&mut self, deck: Deck) {
        self.state.replace_deck(deck);
        self.interaction = Interaction::default();
        self.save_all();
    }

    pub fn reset(&mut self) {
        self.replace_deck(Deck::builtin());
    }

    /// Like [`Session::replace_deck`], but fails if the new state could not
    /// be written. The in-memory state is replaced either way.
    pub fn try_replace_deck(&mut self, deck: Deck) -> Result<(), EngineError> {
        self.state.replace_deck(deck);
        self.interaction = Interaction::default();
        self.write(DECK_KEY, self.state.deck().to_json())?;
        self.write(INDEX_KEY, serde_json::to_string(&self.state.current_index()))?;
        self.write(COMPLETED_KEY, serde_json::to_string(self.state.completed()))
    }

    pub fn try_reset(&mut self) -> Result<(), EngineError> {
        self.try_replace_deck(Deck::builtin())
    }

    /// Apply an input command. Returns whether anything visible changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::Pick(choice) => self.pick(choice),
            Command::Flip => self.flip(),
            Command::Confirm => self.confirm().is_some(),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Run an engine operation and persist whatever it changed.
    fn track<T>(&mut self, op: impl FnOnce(&mut NavigationState) -> T) -> T {
        let index = self.state.current_index();
        let completed = self.state.completed().clone();
        let result = op(&mut self.state);
        if self.state.current_index() != index {
            self.interaction = Interaction::default();
            self.save_index();
        }
        if self.state.completed() != &completed {
            self.save_completed();
        }
        result
    }

    fn save_all(&self) {
        self.save(DECK_KEY, self.state.deck().to_json());
        self.save_index();
        self.save_completed();
    }

    fn save_index(&self) {
        self.save(INDEX_KEY, serde_json::to_string(&self.state.current_index()));
    }

    fn save_completed(&self) {
        self.save(COMPLETED_KEY, serde_json::to_string(self.state.completed()));
    }

    fn save(&self, key: &str, encoded: Result<String, serde_json::Error>) {
        if let Err(err) = self.write(key, encoded) {
            log::warn!("{err}; keeping state in memory only");
        }
    }

    fn write(
        &self,
        key: &str,
        encoded: Result<String, serde_json::Error>,
    ) -> Result<(), EngineError> {
        encoded
            .map_err(ErrorReport::from)
            .and_then(|text| self.store.set(key, &text))
            .map_err(|e| EngineError::PersistenceWrite {
                key: key.to_string(),
                message: e.message().to_string(),
            })
    }
}

fn load<T>(
    store: &impl KeyValueStore,
    key: &str,
    decode: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    let result = match store.get(key) {
        Ok(None) => return None,
        Ok(Some(text)) => decode(&text),
        Err(e) => Err(e.message().to_string()),
    };
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            let err = EngineError::PersistenceRead {
                key: key.to_string(),
                message,
            };
            log::warn!("{err}; using the default");
            None
        }
    }
}
