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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::error::EngineError;
use crate::error::JsonKind;
use crate::types::card::Card;

/// An ordered sequence of cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Accept any JSON array as a deck. Elements are not validated here: see
    /// [`Card::from_value`].
    pub fn from_value(value: Value) -> Result<Self, EngineError> {
        match value {
            Value::Array(items) => Ok(Self {
                cards: items.into_iter().map(Card::from_value).collect(),
            }),
            other => Err(EngineError::InvalidDeckFormat {
                found: JsonKind::of(&other),
            }),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        let value: Value = serde_json::from_str(text).map_err(|e| EngineError::MalformedJson {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The deck that ships with the product.
    pub fn builtin() -> Self {
        let value = json!([
            {
                "id": "m1",
                "type": "mcq",
                "topic": "Physics: Kinematics",
                "prompt": "A car accelerates from 0 to 20 m/s in 4 s. What is the average acceleration?",
                "choices": ["2.5 m/s²", "5 m/s²", "10 m/s²", "80 m/s²"],
                "correctIndex": 1,
                "explain": "a = Δv/Δt = 20/4 = 5 m/s².",
                "tags": ["physics", "kinematics"],
            },
            {
                "id": "f1",
                "type": "flashcard",
                "topic": "Hebrew slang",
                "front": "אשכרה (ashkara)",
                "back": "Meaning: 'actually/for real' (emphatic).\nUsage: 'אשכרה עשית את זה?' = 'You actually did it?'",
                "tags": ["hebrew", "slang"],
            },
            {
                "id": "v1",
                "type": "video",
                "topic": "Python: Functions",
                "videoUrl": "https://interactive-examples.mdn.mozilla.net/media/cc0-videos/flower.mp4",
                "prompt": "Watch, then answer: What does `return` do in a Python function?",
                "choices": [
                    "Prints a value to the console",
                    "Stops the function and provides a value to the caller",
                    "Defines a variable",
                    "Imports a module",
                ],
                "correctIndex": 1,
                "explain": "`return` ends the function's execution and hands a value back to the caller.",
                "tags": ["python", "functions"],
            },
            {
                "id": "m2",
                "type": "mcq",
                "topic": "Math: Derivatives",
                "prompt": "d/dx (x^2) = ?",
                "choices": ["x", "2x", "x^2", "2"],
                "correctIndex": 1,
                "explain": "Power rule: d/dx x^n = n x^{n-1}.",
                "tags": ["math", "calculus"],
            },
        ]);
        match value {
            Value::Array(items) => Self::new(items.into_iter().map(Card::from_value).collect()),
            _ => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
