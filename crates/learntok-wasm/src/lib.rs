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

//! WASM bindings for learntok - runs the learning deck in the browser.
//!
//! The page owns the DOM and forwards user input here; after every call it
//! re-reads [`LearnTokApp::view_json`] and redraws.

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use learntok_core::input::Input;
use learntok_core::session::Session;

mod storage;

use storage::Storage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("learntok WASM initialized");
}

/// The application state managed from JavaScript.
#[wasm_bindgen]
pub struct LearnTokApp {
    session: Session<Storage>,
}

#[wasm_bindgen]
impl LearnTokApp {
    /// Restore the session saved in localStorage, or start on the built-in
    /// deck.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Session::open(Storage::new()),
        }
    }

    /// The current view model as JSON.
    #[wasm_bindgen]
    pub fn view_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.view())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize view: {}", e)))
    }

    #[wasm_bindgen]
    pub fn current_index(&self) -> usize {
        self.session.state().current_index()
    }

    #[wasm_bindgen]
    pub fn total_cards(&self) -> usize {
        self.session.state().len()
    }

    #[wasm_bindgen]
    pub fn progress_percent(&self) -> u32 {
        self.session.state().progress_percent()
    }

    #[wasm_bindgen]
    pub fn next(&mut self) -> bool {
        self.session.next()
    }

    #[wasm_bindgen]
    pub fn previous(&mut self) -> bool {
        self.session.previous()
    }

    /// Pick a choice on the current question card.
    #[wasm_bindgen]
    pub fn pick(&mut self, choice: usize) -> bool {
        self.session.pick(choice)
    }

    /// Flip the current flashcard.
    #[wasm_bindgen]
    pub fn flip(&mut self) -> bool {
        self.session.flip()
    }

    /// The "Next" button under an answered card: records the result and
    /// advances. Returns whether the answer counted as correct.
    #[wasm_bindgen]
    pub fn confirm(&mut self) -> Option<bool> {
        self.session.confirm()
    }

    /// Handle a `keydown` event. Returns true if the key was used, in which
    /// case the page should call `preventDefault`.
    #[wasm_bindgen]
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Input::Key(key).command() {
            Some(command) => self.session.apply(command),
            None => false,
        }
    }

    /// Handle the end of a vertical swipe.
    #[wasm_bindgen]
    pub fn handle_swipe(&mut self, dy: f64) -> bool {
        match (Input::Swipe { dy }).command() {
            Some(command) => self.session.apply(command),
            None => false,
        }
    }

    /// Replace the deck with the contents of a JSON file.
    /// Returns the number of imported cards.
    #[wasm_bindgen]
    pub fn import_json(&mut self, text: &str) -> Result<usize, JsValue> {
        self.session
            .import_json(text)
            .map_err(|e| JsValue::from_str(&format!("Import failed: {}", e)))?;
        Ok(self.session.state().len())
    }

    /// Go back to the built-in deck and clear all progress.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Export the current deck as JSON.
    #[wasm_bindgen]
    pub fn export_deck(&self) -> Result<String, JsValue> {
        self.session
            .state()
            .deck()
            .to_json_pretty()
            .map_err(|e| JsValue::from_str(&format!("Failed to export deck: {}", e)))
    }
}

impl Default for LearnTokApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a file picked by the user, for passing to `import_json`.
#[wasm_bindgen]
pub async fn read_file(file: web_sys::File) -> Result<String, JsValue> {
    let text = JsFuture::from(file.text()).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("Import failed: file is not text"))
}
