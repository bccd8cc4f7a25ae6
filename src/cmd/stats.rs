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

use learntok_core::error::Fallible;
use learntok_core::navigation::NavigationState;
use learntok_core::session::Session;
use learntok_core::types::card::Card;

use crate::db::Database;

pub fn print_stats(db_path: &str) -> Fallible<()> {
    let session = Session::open(Database::new(db_path)?);
    println!("{}", format_stats(session.state()));
    Ok(())
}

fn format_stats(state: &NavigationState) -> String {
    let mut lines = Vec::new();
    if state.is_empty() {
        lines.push("The deck is empty.".to_string());
    } else {
        lines.push(format!(
            "Card {} of {}",
            state.current_index() + 1,
            state.len()
        ));
    }
    lines.push(format!(
        "Progress: {}% ({} of {} answered correctly)",
        state.progress_percent(),
        state.correct_count(),
        state.len()
    ));
    if let Some(card) = state.current_card() {
        let id = card.id().map(|id| id.as_str()).unwrap_or("-");
        lines.push(format!(
            "Current: {} [{}] {}",
            id,
            card.card_type(),
            card.topic()
        ));
    }
    let untouched = state
        .deck()
        .iter()
        .filter_map(Card::id)
        .filter(|id| !state.is_completed(id.as_str()))
        .count();
    lines.push(format!("Not yet correct: {untouched}"));
    lines.join("\n")
}
