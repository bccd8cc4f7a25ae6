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

use std::fs::read_to_string;

use learntok_core::check::Issue;
use learntok_core::check::Severity;
use learntok_core::check::check_deck;
use learntok_core::deck::Deck;
use learntok_core::error::Fallible;
use learntok_core::error::fail;

pub fn check_deck_file(path: &str) -> Fallible<()> {
    let issues = load_and_check(path)?;
    for issue in &issues {
        println!("{issue}");
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    if errors > 0 {
        fail(format!("{path}: {errors} error(s) found."))
    } else {
        println!("{path}: ok.");
        Ok(())
    }
}

fn load_and_check(path: &str) -> Fallible<Vec<Issue>> {
    let text = read_to_string(path)?;
    let deck = Deck::from_json(&text)?;
    log::debug!("Checking {} cards from {path}", deck.len());
    Ok(check_deck(&deck))
}
