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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Redirect;
use learntok_core::input::Input;
use serde::Deserialize;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;

#[derive(Deserialize)]
pub struct FormData {
    action: String,
    choice: Option<usize>,
    key: Option<String>,
    dy: Option<f64>,
    deck: Option<String>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Result<Redirect, (StatusCode, String)> {
    let mut mutable = state.lock();
    let MutableState { session, message } = &mut *mutable;
    match form.action.as_str() {
        "Previous" => {
            session.previous();
        }
        "Next" => {
            session.next();
        }
        "Pick" => {
            let choice = form.choice.ok_or_else(|| bad_request("missing choice"))?;
            session.pick(choice);
        }
        "Flip" => {
            session.flip();
        }
        "Confirm" => {
            session.confirm();
        }
        "Key" => {
            let key = form.key.ok_or_else(|| bad_request("missing key"))?;
            if let Some(command) = Input::Key(&key).command() {
                session.apply(command);
            }
        }
        "Swipe" => {
            let dy = form.dy.ok_or_else(|| bad_request("missing dy"))?;
            if let Some(command) = (Input::Swipe { dy }).command() {
                session.apply(command);
            }
        }
        "Import" => {
            let text = form.deck.unwrap_or_default();
            if let Err(e) = session.import_json(&text) {
                log::info!("Rejected import: {e}");
                *message = Some(format!("Import failed: {e}"));
            }
        }
        "Reset" => {
            session.reset();
        }
        other => return Err(bad_request(&format!("unknown action: {other}"))),
    }
    Ok(Redirect::to("/"))
}

fn bad_request(message: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, message.to_string())
}
