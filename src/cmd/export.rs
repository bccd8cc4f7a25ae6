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

use std::fs::write;

use learntok_core::error::Fallible;
use learntok_core::session::Session;

use crate::db::Database;

pub fn export_deck(db_path: &str, output: Option<String>) -> Fallible<()> {
    let json = deck_json(db_path)?;
    match output {
        Some(path) => write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn deck_json(db_path: &str) -> Fallible<String> {
    let session = Session::open(Database::new(db_path)?);
    Ok(session.state().deck().to_json_pretty()?)
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use learntok_core::deck::Deck;

    use super::*;
    use crate::helper::create_tmp_db_path;

    #[test]
    fn test_export_roundtrips_through_import() -> Fallible<()> {
        let (dir, db_path) = create_tmp_db_path()?;
        let raw = r#"[{"id":"z","type":"mystery","payload":[1,2,3]}]"#;
        {
            let mut session = Session::open(Database::new(&db_path)?);
            session.import_json(raw)?;
        }
        let out = dir.path().join("out.json").display().to_string();
        export_deck(&db_path, Some(out.clone()))?;
        let exported = Deck::from_json(&read_to_string(&out)?)?;
        assert_eq!(exported, Deck::from_json(raw)?);
        Ok(())
    }

    #[test]
    fn test_fresh_database_exports_builtin() -> Fallible<()> {
        let (_dir, db_path) = create_tmp_db_path()?;
        let exported = Deck::from_json(&deck_json(&db_path)?)?;
        assert_eq!(exported, Deck::builtin());
        Ok(())
    }
}
