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

use learntok_core::check::check_deck;
use learntok_core::deck::Deck;
use learntok_core::error::Fallible;
use learntok_core::session::Session;

use crate::db::Database;

/// Replace the saved deck with the one in `path`. A file that is not a
/// deck leaves the saved session alone, and so does a failed write.
pub fn import_deck_file(path: &str, db_path: &str) -> Fallible<()> {
    let text = read_to_string(path)?;
    let deck = Deck::from_json(&text)?;
    for issue in check_deck(&deck) {
        log::warn!("{path}: {issue}");
    }
    let count = deck.len();
    let mut session = Session::open(Database::new(db_path)?);
    session.try_replace_deck(deck)?;
    println!("Imported {count} cards.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::helper::block_writes;
    use crate::helper::create_tmp_db_path;
    use crate::helper::write_deck_file;

    #[test]
    fn test_import_replaces_deck_and_progress() -> Fallible<()> {
        let (dir, db_path) = create_tmp_db_path()?;
        {
            let mut session = Session::open(Database::new(&db_path)?);
            session.mark_correct();
            session.next();
        }
        let deck_path = write_deck_file(
            &dir,
            "deck.json",
            r#"[{"id": "a", "type": "flashcard", "front": "x", "back": "y"}]"#,
        )?;
        import_deck_file(&deck_path, &db_path)?;
        let session = Session::open(Database::new(&db_path)?);
        assert_eq!(session.state().len(), 1);
        assert_eq!(session.state().current_index(), 0);
        assert!(session.state().completed().is_empty());
        Ok(())
    }

    #[test]
    fn test_failed_import_keeps_session() -> Fallible<()> {
        let (_db_dir, db_path) = create_tmp_db_path()?;
        {
            let mut session = Session::open(Database::new(&db_path)?);
            session.next();
        }
        let dir = tempdir()?;
        let deck_path = write_deck_file(&dir, "deck.json", r#""not an array""#)?;
        assert!(import_deck_file(&deck_path, &db_path).is_err());
        let session = Session::open(Database::new(&db_path)?);
        assert_eq!(session.state().len(), 4);
        assert_eq!(session.state().current_index(), 1);
        Ok(())
    }

    #[test]
    fn test_import_fails_when_nothing_is_saved() -> Fallible<()> {
        let (dir, db_path) = create_tmp_db_path()?;
        Database::new(&db_path)?;
        block_writes(&db_path)?;
        let deck_path = write_deck_file(
            &dir,
            "deck.json",
            r#"[{"id": "a", "type": "flashcard", "front": "x", "back": "y"}]"#,
        )?;
        let err = import_deck_file(&deck_path, &db_path).err();
        assert!(err.is_some_and(|e| e.message().starts_with("failed to write 'lt.deck'")));
        let session = Session::open(Database::new(&db_path)?);
        assert_eq!(session.state().len(), 4);
        Ok(())
    }
}
