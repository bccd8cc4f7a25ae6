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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;

use crate::types::card_id::CardId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardType {
    Mcq,
    Flashcard,
    VideoQuiz,
    Unknown,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Mcq => "mcq",
            CardType::Flashcard => "flashcard",
            CardType::VideoQuiz => "video",
            CardType::Unknown => "unknown",
        }
    }

    /// Whether cards of this type are answered by picking a choice.
    pub fn is_question(&self) -> bool {
        matches!(self, CardType::Mcq | CardType::VideoQuiz)
    }
}

impl Display for CardType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The answer contract shared by multiple-choice and video quiz cards.
#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    /// Shown once the question has been answered.
    pub explain: String,
}

impl Question {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    pub fn has_choice(&self, choice: usize) -> bool {
        choice < self.choices.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CardContent {
    Mcq(Question),
    Flashcard {
        front: String,
        back: String,
    },
    VideoQuiz {
        video_url: String,
        question: Question,
    },
    /// Anything we could not make sense of. Rendered as a placeholder.
    Unknown {
        type_name: Option<String>,
    },
}

impl CardContent {
    pub fn card_type(&self) -> CardType {
        match self {
            CardContent::Mcq(_) => CardType::Mcq,
            CardContent::Flashcard { .. } => CardType::Flashcard,
            CardContent::VideoQuiz { .. } => CardType::VideoQuiz,
            CardContent::Unknown { .. } => CardType::Unknown,
        }
    }
}

/// A card as it appears in an imported deck file.
///
/// Imports are optimistic: every JSON value becomes a card. Values that do
/// not fit one of the known shapes become [`CardContent::Unknown`]. The raw
/// JSON is retained and is what gets serialized back, so a persisted deck
/// is exactly the deck that was imported.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    id: Option<CardId>,
    topic: String,
    tags: Vec<String>,
    content: CardContent,
    raw: Value,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum Shape {
    #[serde(rename = "mcq")]
    Mcq(QuestionShape),
    #[serde(rename = "flashcard")]
    Flashcard(FlashcardShape),
    #[serde(rename = "video", alias = "video-quiz")]
    Video(VideoShape),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionShape {
    #[serde(default)]
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    explain: String,
}

#[derive(Deserialize)]
struct FlashcardShape {
    #[serde(default)]
    front: String,
    #[serde(default)]
    back: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoShape {
    #[serde(alias = "videoSource")]
    video_url: String,
    #[serde(default)]
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    explain: String,
}

impl From<QuestionShape> for Question {
    fn from(shape: QuestionShape) -> Self {
        Question {
            prompt: shape.prompt,
            choices: shape.choices,
            correct_index: shape.correct_index,
            explain: shape.explain,
        }
    }
}

impl From<Shape> for CardContent {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Mcq(q) => CardContent::Mcq(q.into()),
            Shape::Flashcard(FlashcardShape { front, back }) => {
                CardContent::Flashcard { front, back }
            }
            Shape::Video(v) => CardContent::VideoQuiz {
                video_url: v.video_url,
                question: Question {
                    prompt: v.prompt,
                    choices: v.choices,
                    correct_index: v.correct_index,
                    explain: v.explain,
                },
            },
        }
    }
}

impl Card {
    /// Build a card from an arbitrary JSON value. Never fails.
    pub fn from_value(raw: Value) -> Self {
        let id = raw
            .get("id")
            .and_then(Value::as_str)
            .and_then(CardId::parse);
        let topic = raw
            .get("topic")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let tags = match raw.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        let content = match Shape::deserialize(&raw) {
            Ok(shape) => shape.into(),
            Err(e) => {
                let type_name = raw.get("type").and_then(Value::as_str).map(str::to_string);
                log::debug!("Card {id:?} of type {type_name:?} is not renderable: {e}");
                CardContent::Unknown { type_name }
            }
        };
        Self {
            id,
            topic,
            tags,
            content,
            raw,
        }
    }

    pub fn id(&self) -> Option<&CardId> {
        self.id.as_ref()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn content(&self) -> &CardContent {
        &self.content
    }

    pub fn card_type(&self) -> CardType {
        self.content.card_type()
    }

    pub fn question(&self) -> Option<&Question> {
        match &self.content {
            CardContent::Mcq(q) => Some(q),
            CardContent::VideoQuiz { question, .. } => Some(question),
            CardContent::Flashcard { .. } | CardContent::Unknown { .. } => None,
        }
    }

    pub fn is_flashcard(&self) -> bool {
        matches!(self.content, CardContent::Flashcard { .. })
    }

    /// Evaluate a picked choice. `None` for cards with no notion of
    /// correctness (flashcards and unknown cards).
    pub fn evaluate(&self, choice: usize) -> Option<bool> {
        self.question().map(|q| q.is_correct(choice))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Card::from_value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Fallible;

    fn mcq() -> Value {
        json!({
            "id": "q1",
            "type": "mcq",
            "topic": "Math",
            "prompt": "1 + 1 = ?",
            "choices": ["1", "2", "3"],
            "correctIndex": 1,
            "explain": "Arithmetic.",
            "tags": ["math", 7, "easy"],
        })
    }

    #[test]
    fn test_mcq() {
        let card = Card::from_value(mcq());
        assert_eq!(card.id(), Some(&CardId::new("q1")));
        assert_eq!(card.topic(), "Math");
        assert_eq!(card.tags(), &["math".to_string(), "easy".to_string()]);
        assert_eq!(card.card_type(), CardType::Mcq);
        let q = card.question().unwrap();
        assert_eq!(q.prompt, "1 + 1 = ?");
        assert_eq!(q.choices.len(), 3);
        assert_eq!(card.evaluate(1), Some(true));
        assert_eq!(card.evaluate(0), Some(false));
        assert_eq!(card.evaluate(9), Some(false));
    }

    #[test]
    fn test_video_accepts_both_spellings() {
        let a = Card::from_value(json!({
            "id": "v1",
            "type": "video",
            "videoUrl": "a.mp4",
            "choices": ["x"],
            "correctIndex": 0,
        }));
        let b = Card::from_value(json!({
            "id": "v2",
            "type": "video-quiz",
            "videoSource": "b.mp4",
            "choices": ["x"],
            "correctIndex": 0,
        }));
        match (a.content(), b.content()) {
            (
                CardContent::VideoQuiz { video_url: a, .. },
                CardContent::VideoQuiz { video_url: b, .. },
            ) => {
                assert_eq!(a, "a.mp4");
                assert_eq!(b, "b.mp4");
            }
            other => panic!("expected two video cards, got {other:?}"),
        }
    }

    #[test]
    fn test_flashcard_has_no_correctness() {
        let card = Card::from_value(json!({
            "id": "f1",
            "type": "flashcard",
            "front": "front",
            "back": "back",
        }));
        assert!(card.is_flashcard());
        assert_eq!(card.evaluate(0), None);
    }

    #[test]
    fn test_unknown_type() {
        let card = Card::from_value(json!({"id": "x", "type": "poll"}));
        assert_eq!(
            card.content(),
            &CardContent::Unknown {
                type_name: Some("poll".to_string())
            }
        );
        assert_eq!(card.evaluate(0), None);
    }

    #[test]
    fn test_malformed_known_type_degrades() {
        let card = Card::from_value(json!({"id": "m", "type": "mcq", "prompt": "?"}));
        assert_eq!(card.card_type(), CardType::Unknown);
        assert_eq!(card.id(), Some(&CardId::new("m")));
    }

    #[test]
    fn test_non_object_element() {
        let card = Card::from_value(json!(42));
        assert_eq!(card.id(), None);
        assert_eq!(card.card_type(), CardType::Unknown);
        assert_eq!(card.topic(), "");
    }

    #[test]
    fn test_missing_and_empty_ids() {
        assert_eq!(Card::from_value(json!({"type": "flashcard"})).id(), None);
        assert_eq!(Card::from_value(json!({"id": "", "type": "flashcard"})).id(), None);
        assert_eq!(Card::from_value(json!({"id": 3, "type": "flashcard"})).id(), None);
    }

    #[test]
    fn test_serializes_raw_json() -> Fallible<()> {
        let raw = json!({"id": "z", "type": "mystery", "extra": {"nested": [1, 2]}});
        let card = Card::from_value(raw.clone());
        assert_eq!(serde_json::to_value(&card)?, raw);
        let back: Card = serde_json::from_value(raw)?;
        assert_eq!(back, card);
        Ok(())
    }
}
