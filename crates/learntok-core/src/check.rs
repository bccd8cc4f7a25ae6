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

//! Advisory checks for deck files. Import never depends on these.

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::deck::Deck;
use crate::types::card::CardContent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// Two cards share an id, so their completion is indistinguishable.
    DuplicateId(String),
    /// The card has no usable id and can never be marked completed.
    MissingId,
    /// The card will render as a placeholder.
    Unrenderable { type_name: Option<String> },
    NoChoices,
    CorrectIndexOutOfRange { correct_index: usize, choices: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    /// Position of the card in the deck.
    pub index: usize,
    pub kind: IssueKind,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self.kind {
            IssueKind::DuplicateId(_) => Severity::Error,
            IssueKind::NoChoices | IssueKind::CorrectIndexOutOfRange { .. } => Severity::Error,
            IssueKind::MissingId | IssueKind::Unrenderable { .. } => Severity::Warning,
        }
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{severity}: card {}: ", self.index + 1)?;
        match &self.kind {
            IssueKind::DuplicateId(id) => write!(f, "duplicate id '{id}'"),
            IssueKind::MissingId => write!(f, "missing id; progress cannot be tracked"),
            IssueKind::Unrenderable {
                type_name: Some(name),
            } => write!(f, "cannot render card of type '{name}'"),
            IssueKind::Unrenderable { type_name: None } => write!(f, "card has no type"),
            IssueKind::NoChoices => write!(f, "question has no choices"),
            IssueKind::CorrectIndexOutOfRange {
                correct_index,
                choices,
            } => write!(
                f,
                "correctIndex {correct_index} is out of range for {choices} choices"
            ),
        }
    }
}

pub fn check_deck(deck: &Deck) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, card) in deck.iter().enumerate() {
        let mut push = |kind| issues.push(Issue { index, kind });
        match card.id() {
            Some(id) => {
                if !seen.insert(id.as_str()) {
                    push(IssueKind::DuplicateId(id.to_string()));
                }
            }
            None => push(IssueKind::MissingId),
        }
        if let CardContent::Unknown { type_name } = card.content() {
            push(IssueKind::Unrenderable {
                type_name: type_name.clone(),
            });
        }
        if let Some(question) = card.question() {
            if question.choices.is_empty() {
                push(IssueKind::NoChoices);
            } else if !question.has_choice(question.correct_index) {
                push(IssueKind::CorrectIndexOutOfRange {
                    correct_index: question.correct_index,
                    choices: question.choices.len(),
                });
            }
        }
    }
    issues
}
