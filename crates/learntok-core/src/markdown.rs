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

use pulldown_cmark::Event;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::html::push_html;

/// Convert card text to HTML.
///
/// Card text is Markdown, so backticks and emphasis in a deck render as
/// markup. It is also written to be shown with its line breaks intact, so
/// single newlines become `<br />`. Raw HTML in imported decks is shown as
/// text.
pub fn text_to_html(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(text, options);
    let events = parser.map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        _ => event,
    });
    let mut html_output: String = String::new();
    push_html(&mut html_output, events);
    html_output
}

/// Like [`text_to_html`], without the wrapping paragraph for one-liners.
pub fn text_to_html_inline(text: &str) -> String {
    let html = text_to_html(text);
    match html
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>\n"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let html = text_to_html("This is **bold** text.");
        assert_eq!(html, "<p>This is <strong>bold</strong> text.</p>\n");
    }

    #[test]
    fn test_newlines_are_kept() {
        let html = text_to_html("Meaning: yes.\nUsage: no.");
        assert_eq!(html, "<p>Meaning: yes.<br />\nUsage: no.</p>\n");
    }

    #[test]
    fn test_inline() {
        let html = text_to_html_inline("What does `return` do?");
        assert_eq!(html, "What does <code>return</code> do?");
    }

    #[test]
    fn test_inline_keeps_blocks() {
        let html = text_to_html_inline("# Foo");
        assert_eq!(html, "<h1>Foo</h1>\n");
        let html = text_to_html_inline("one\n\ntwo");
        assert_eq!(html, "<p>one</p>\n<p>two</p>\n");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = text_to_html_inline("<b>hi</b>");
        assert_eq!(html, "&lt;b&gt;hi&lt;/b&gt;");
    }
}
