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

//! What a front-end needs to draw the deck. Built fresh from the engine
//! state on every read.

use serde::Serialize;

use crate::markdown::text_to_html;
use crate::markdown::text_to_html_inline;
use crate::navigation::NavigationState;
use crate::session::Interaction;
use crate::types::card::Card;
use crate::types::card::CardContent;
use crate::types::card::Question;

pub const UNKNOWN_CARD_MESSAGE: &str = "Unknown card type";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeckView {
    pub index: usize,
    pub total: usize,
    pub progress: u32,
    pub correct: usize,
    pub card: Option<CardView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardView {
    pub id: Option<String>,
    pub kind: &'static str,
    pub topic: String,
    pub tags: Vec<String>,
    /// Whether this card has been answered correctly before.
    pub completed: bool,
    pub body: CardBody,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardBody {
    Question {
        prompt_html: String,
        video_url: Option<String>,
        choices: Vec<ChoiceView>,
        picked: Option<usize>,
        /// Set once a choice has been picked.
        correct: Option<bool>,
        explain_html: Option<String>,
    },
    Flashcard {
        face_html: String,
        flipped: bool,
    },
    Unknown {
        message: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceMark {
    None,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChoiceView {
    pub label: String,
    /// Only the picked choice is marked, as right or wrong.
    pub mark: ChoiceMark,
}

impl DeckView {
    pub fn new(state: &NavigationState, interaction: Interaction) -> Self {
        Self {
            index: state.current_index(),
            total: state.len(),
            progress: state.progress_percent(),
            correct: state.correct_count(),
            card: state
                .current_card()
                .map(|card| CardView::new(state, card, interaction)),
        }
    }
}

impl CardView {
    fn new(state: &NavigationState, card: &Card, interaction: Interaction) -> Self {
        let body = match card.content() {
            CardContent::Mcq(question) => question_body(question, None, interaction),
            CardContent::VideoQuiz {
                video_url,
                question,
            } => question_body(question, Some(video_url), interaction),
            CardContent::Flashcard { front, back } => {
                let face = if interaction.flipped { back } else { front };
                CardBody::Flashcard {
                    face_html: text_to_html(face),
                    flipped: interaction.flipped,
                }
            }
            CardContent::Unknown { .. } => CardBody::Unknown {
                message: UNKNOWN_CARD_MESSAGE,
            },
        };
        Self {
            id: card.id().map(|id| id.to_string()),
            kind: card.card_type().as_str(),
            topic: card.topic().to_string(),
            tags: card.tags().to_vec(),
            completed: card.id().is_some_and(|id| state.is_completed(id.as_str())),
            body,
        }
    }
}

fn question_body(
    question: &Question,
    video_url: Option<&String>,
    interaction: Interaction,
) -> CardBody {
    let picked = interaction.picked.filter(|i| question.has_choice(*i));
    let choices = question
        .choices
        .iter()
        .enumerate()
        .map(|(i, label)| ChoiceView {
            label: label.clone(),
            mark: match picked {
                Some(p) if p == i && question.is_correct(i) => ChoiceMark::Correct,
                Some(p) if p == i => ChoiceMark::Incorrect,
                _ => ChoiceMark::None,
            },
        })
        .collect();
    CardBody::Question {
        prompt_html: text_to_html_inline(&question.prompt),
        video_url: video_url.cloned(),
        choices,
        picked,
        correct: picked.map(|i| question.is_correct(i)),
        explain_html: picked.map(|_| text_to_html(&question.explain)),
    }
}
