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

//! Maps raw user input to deck commands. The front-ends only deliver
//! events; deciding what they mean happens here.

/// Vertical swipe distance, in CSS pixels, needed to change cards.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Number keys that pick a choice, in order.
const CHOICE_KEYS: [&str; 4] = ["1", "2", "3", "4"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Input<'a> {
    /// A key press, named as in `KeyboardEvent.key`.
    Key(&'a str),
    /// A finished vertical swipe. `dy` is end minus start, so swiping up is
    /// negative.
    Swipe { dy: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Pick(usize),
    Flip,
    Confirm,
    Reset,
}

impl Input<'_> {
    pub fn command(&self) -> Option<Command> {
        match *self {
            Input::Key("ArrowDown") => Some(Command::Next),
            Input::Key("ArrowUp") => Some(Command::Previous),
            Input::Key(key) => choice_key(key).map(Command::Pick),
            Input::Swipe { dy } if dy < -SWIPE_THRESHOLD => Some(Command::Next),
            Input::Swipe { dy } if dy > SWIPE_THRESHOLD => Some(Command::Previous),
            Input::Swipe { .. } => None,
        }
    }
}

fn choice_key(key: &str) -> Option<usize> {
    CHOICE_KEYS.iter().position(|k| *k == key)
}
