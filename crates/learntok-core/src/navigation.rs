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

//! The deck navigation and progress engine.
//!
//! [`NavigationState`] owns the deck, the current position and the
//! completion map. Every mutator returns whether it changed anything, so
//! callers can decide what needs persisting.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::deck::Deck;
use crate::error::EngineError;
use crate::types::card::Card;
use crate::types::card_id::CardId;

/// Per-card record of "answered correctly at least once".
pub type CompletionMap = BTreeMap<CardId, bool>;

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationState {
    deck: Deck,
    current_index: usize,
    completed: CompletionMap,
}

impl NavigationState {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            current_index: 0,
            completed: CompletionMap::new(),
        }
    }

    /// Rebuild a state from a persisted snapshot. The index is clamped into
    /// range; the completion map is taken as-is, stale entries included.
    pub fn from_parts(deck: Deck, current_index: usize, completed: CompletionMap) -> Self {
        let current_index = current_index.min(last_index(&deck));
        Self {
            deck,
            current_index,
            completed,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn completed(&self) -> &CompletionMap {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.deck.get(self.current_index)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.get(id).copied().unwrap_or(false)
    }

    pub fn correct_count(&self) -> usize {
        self.completed.values().filter(|done| **done).count()
    }

    /// `round(100 * correct / max(len, 1))`.
    pub fn progress_percent(&self) -> u32 {
        let total = self.deck.len().max(1) as f64;
        (100.0 * self.correct_count() as f64 / total).round() as u32
    }

    pub fn next(&mut self) -> bool {
        let target = (self.current_index + 1).min(last_index(&self.deck));
        self.move_to(target)
    }

    pub fn previous(&mut self) -> bool {
        let target = self.current_index.saturating_sub(1);
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> bool {
        if target == self.current_index {
            return false;
        }
        log::debug!("Moving from card {} to {}", self.current_index, target);
        self.current_index = target;
        true
    }

    /// Record that the current card was answered correctly. Does nothing
    /// when there is no current card or it has no id.
    pub fn mark_correct(&mut self) -> bool {
        let Some(id) = self.current_card().and_then(Card::id).cloned() else {
            return false;
        };
        let previous = self.completed.insert(id, true);
        previous != Some(true)
    }

    /// Answer the current question card and move on. Returns the
    /// evaluation, or `None` (and does nothing) if the current card is not
    /// a question.
    ///
    /// A wrong answer never clears an earlier correct one.
    pub fn answer_choice(&mut self, choice: usize) -> Option<bool> {
        let correct = self.current_card()?.evaluate(choice)?;
        if correct {
            self.mark_correct();
        }
        self.next();
        Some(correct)
    }

    /// Flashcards have no wrong answer: finishing one always counts.
    pub fn complete_flashcard(&mut self) -> bool {
        if !self.current_card().is_some_and(Card::is_flashcard) {
            return false;
        }
        self.mark_correct();
        self.next();
        true
    }

    /// Replace the deck with an imported payload. On failure nothing changes.
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
        log::debug!("Replacing deck with {} cards", deck.len());
        self.deck = deck;
        self.current_index = 0;
        self.completed.clear();
    }

    pub fn reset(&mut self) {
        self.replace_deck(Deck::builtin());
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(Deck::builtin())
    }
}

fn last_index(deck: &Deck) -> usize {
    deck.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Fallible;
    use crate::error::JsonKind;

    fn flashcards(n: usize) -> Deck {
        let cards: Vec<Value> = (0..n)
            .map(|i| json!({"id": format!("c{i}"), "type": "flashcard", "front": "f", "back": "b"}))
            .collect();
        Deck::from_value(Value::Array(cards)).unwrap()
    }

    #[test]
    fn test_index_stays_in_bounds() {
        for len in 0..5 {
            let mut state = NavigationState::new(flashcards(len));
            let moves = [true, true, false, true, true, true, true, false, false, false, false];
            for forward in moves {
                if forward {
                    state.next();
                } else {
                    state.previous();
                }
                assert!(state.current_index() <= len.saturating_sub(1));
            }
        }
    }

    #[test]
    fn test_boundaries_are_idempotent() {
        let mut state = NavigationState::default();
        assert!(!state.previous());
        assert!(!state.previous());
        assert_eq!(state.current_index(), 0);
        for _ in 0..3 {
            assert!(state.next());
        }
        assert!(!state.next());
        assert!(!state.next());
        assert_eq!(state.current_index(), 3);
    }

    #[test]
    fn test_mark_correct_is_idempotent() {
        let mut state = NavigationState::default();
        assert!(state.mark_correct());
        let completed = state.completed().clone();
        let progress = state.progress_percent();
        assert!(!state.mark_correct());
        assert_eq!(state.completed(), &completed);
        assert_eq!(state.progress_percent(), progress);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_progress_on_four_cards() {
        let mut state = NavigationState::default();
        assert_eq!(state.progress_percent(), 0);
        state.mark_correct();
        state.next();
        state.mark_correct();
        assert_eq!(state.progress_percent(), 50);
        state.next();
        state.mark_correct();
        state.next();
        state.mark_correct();
        assert_eq!(state.progress_percent(), 100);
    }

    #[test]
    fn test_progress_rounds() {
        let mut state = NavigationState::new(flashcards(3));
        state.mark_correct();
        assert_eq!(state.progress_percent(), 33);
        state.next();
        state.mark_correct();
        assert_eq!(state.progress_percent(), 67);
    }

    #[test]
    fn test_import_resets_progress() -> Fallible<()> {
        let mut state = NavigationState::default();
        state.mark_correct();
        state.next();
        state.next();
        state.import_deck(json!([
            {"id": "a", "type": "flashcard", "front": "1", "back": "2"},
            {"id": "b", "type": "flashcard", "front": "3", "back": "4"},
        ]))?;
        assert_eq!(state.len(), 2);
        assert_eq!(state.current_index(), 0);
        assert!(state.completed().is_empty());
        assert_eq!(state.progress_percent(), 0);
        Ok(())
    }

    #[test]
    fn test_failed_import_changes_nothing() {
        let mut state = NavigationState::default();
        state.mark_correct();
        state.next();
        let before = state.clone();
        assert_eq!(
            state.import_deck(json!("not an array")),
            Err(EngineError::InvalidDeckFormat {
                found: JsonKind::String
            })
        );
        assert_eq!(
            state.import_deck(json!({})),
            Err(EngineError::InvalidDeckFormat {
                found: JsonKind::Object
            })
        );
        assert!(state.import_json("{oops").is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset() -> Fallible<()> {
        let mut state = NavigationState::default();
        state.import_json(r#"[{"id": "x", "type": "flashcard"}]"#)?;
        state.mark_correct();
        state.reset();
        assert_eq!(state.deck(), &Deck::builtin());
        assert_eq!(state.current_index(), 0);
        assert!(state.completed().is_empty());
        Ok(())
    }

    #[test]
    fn test_default_deck_scenario() {
        let mut state = NavigationState::default();
        assert_eq!(state.current_card().and_then(Card::id).unwrap().as_str(), "m1");
        state.mark_correct();
        state.next();
        state.next();
        state.next();
        assert_eq!(state.current_index(), 3);
        assert_eq!(state.current_card().and_then(Card::id).unwrap().as_str(), "m2");
        assert_eq!(state.progress_percent(), 25);
        state.reset();
        assert_eq!(state.progress_percent(), 0);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_empty_deck() -> Fallible<()> {
        let mut state = NavigationState::default();
        state.import_json("[]")?;
        assert!(state.current_card().is_none());
        assert!(!state.next());
        assert!(!state.previous());
        assert!(!state.mark_correct());
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.progress_percent(), 0);
        Ok(())
    }

    #[test]
    fn test_answer_choice() {
        let mut state = NavigationState::default();
        // m1: correct answer is index 1.
        assert_eq!(state.answer_choice(0), Some(false));
        assert_eq!(state.current_index(), 1);
        assert!(!state.is_completed("m1"));
        state.previous();
        assert_eq!(state.answer_choice(1), Some(true));
        assert!(state.is_completed("m1"));
        // Answering wrong afterwards keeps the earlier success.
        state.previous();
        assert_eq!(state.answer_choice(3), Some(false));
        assert!(state.is_completed("m1"));
        // f1 is a flashcard, not a question.
        assert_eq!(state.answer_choice(0), None);
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_flashcards_always_count() {
        let mut state = NavigationState::default();
        assert!(!state.complete_flashcard());
        state.next();
        assert!(state.complete_flashcard());
        assert!(state.is_completed("f1"));
        assert_eq!(state.completed().get("f1"), Some(&true));
        assert_eq!(state.current_index(), 2);
        assert!(!state.completed().values().any(|done| !done));
    }

    #[test]
    fn test_cards_without_ids_are_never_completed() -> Fallible<()> {
        let mut state = NavigationState::default();
        state.import_json(r#"[{"type": "flashcard", "front": "a", "back": "b"}]"#)?;
        assert!(!state.mark_correct());
        assert!(state.complete_flashcard());
        assert!(state.completed().is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_cards_are_navigable() -> Fallible<()> {
        let mut state = NavigationState::default();
        state.import_json(r#"[{"id": "u", "type": "poll"}, {"id": "w"}]"#)?;
        assert_eq!(state.answer_choice(0), None);
        assert!(!state.complete_flashcard());
        assert!(state.next());
        assert!(state.previous());
        assert_eq!(state.progress_percent(), 0);
        Ok(())
    }

    #[test]
    fn test_from_parts_clamps() {
        let state = NavigationState::from_parts(Deck::builtin(), 99, CompletionMap::new());
        assert_eq!(state.current_index(), 3);
        let state = NavigationState::from_parts(Deck::default(), 5, CompletionMap::new());
        assert_eq!(state.current_index(), 0);
    }
}
