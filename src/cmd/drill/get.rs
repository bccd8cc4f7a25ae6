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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use learntok_core::view::CardBody;
use learntok_core::view::CardView;
use learntok_core::view::ChoiceMark;
use learntok_core::view::DeckView;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let body = {
        let mut mutable = state.lock();
        let message = mutable.message.take();
        render_deck(&mutable.session.view(), message.as_deref())
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

fn render_deck(view: &DeckView, message: Option<&str>) -> Markup {
    html! {
        div.phone {
            (render_header(view))
            @if let Some(message) = message {
                div.message role="alert" { (message) }
            }
            main.stage {
                @match &view.card {
                    Some(card) => {
                        (render_card(card))
                    }
                    None => {
                        div.card.empty {
                            "This deck has no cards. Import another deck or reset to the built-in one."
                        }
                    }
                }
            }
            nav.footer {
                (action_button("Previous", "Prev"))
                div.position { (position_label(view)) }
                (action_button("Next", "Next"))
            }
        }
    }
}

fn render_header(view: &DeckView) -> Markup {
    html! {
        header.header {
            div.brand {
                div.logo { "LT" }
                div {
                    div.title { "LearningTok" }
                    div.subtitle { "Swipe to learn" }
                }
            }
            div.tools {
                details.import {
                    summary { "Import" }
                    form method="post" action="/" {
                        input type="hidden" name="action" value="Import";
                        input id="importfile" type="file" accept="application/json";
                        textarea id="importtext" name="deck" rows="4" placeholder="A JSON array of cards" {}
                        button type="submit" { "Import" }
                    }
                }
                (action_button("Reset", "Reset"))
                div.progress title="Answered correctly" { (view.progress) "%" }
            }
        }
    }
}

fn render_card(card: &CardView) -> Markup {
    html! {
        div.card data-kind=(card.kind) {
            div.topic {
                (card.topic)
                @if card.completed {
                    span.done { " ✓" }
                }
            }
            @match &card.body {
                CardBody::Question {
                    prompt_html,
                    video_url,
                    choices,
                    picked,
                    correct,
                    explain_html,
                } => {
                    @if let Some(url) = video_url {
                        video.video src=(url) controls {}
                    }
                    h2.prompt { (PreEscaped(prompt_html)) }
                    div.choices {
                        @for (i, choice) in choices.iter().enumerate() {
                            form method="post" action="/" {
                                input type="hidden" name="action" value="Pick";
                                input type="hidden" name="choice" value=(i);
                                button.choice.correct[choice.mark == ChoiceMark::Correct].incorrect[choice.mark == ChoiceMark::Incorrect] type="submit" {
                                    (choice.label)
                                }
                            }
                        }
                    }
                    @if let Some(explain) = explain_html {
                        div.explain.correct[*correct == Some(true)].incorrect[*correct == Some(false)] {
                            (PreEscaped(explain))
                            (action_button("Confirm", "Next"))
                        }
                    }
                    @if picked.is_none() {
                        div.tip { "Tip: press 1–4 to answer." }
                    }
                }
                CardBody::Flashcard { face_html, flipped } => {
                    h2.prompt { "Flashcard" }
                    form method="post" action="/" {
                        input type="hidden" name="action" value="Flip";
                        button.flashcard.flipped[*flipped] type="submit" {
                            (PreEscaped(face_html))
                        }
                    }
                    @if *flipped {
                        (action_button("Confirm", "Next"))
                    }
                    div.tip { "Tap the card to flip." }
                }
                CardBody::Unknown { message } => {
                    div.unknown { (message) }
                }
            }
        }
    }
}

fn action_button(action: &str, label: &str) -> Markup {
    html! {
        form method="post" action="/" {
            input type="hidden" name="action" value=(action);
            button type="submit" { (label) }
        }
    }
}

fn position_label(view: &DeckView) -> String {
    if view.total == 0 {
        "0 / 0".to_string()
    } else {
        format!("{} / {}", view.index + 1, view.total)
    }
}
