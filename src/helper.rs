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

use learntok_core::error::ErrorReport;
use learntok_core::error::Fallible;
use rusqlite::Connection;
use tempfile::TempDir;
use tempfile::tempdir;

/// A fresh directory and a database path inside it. The directory is
/// deleted when the `TempDir` is dropped.
pub fn create_tmp_db_path() -> Fallible<(TempDir, String)> {
    let dir = tempdir()?;
    let path = dir.path().join("learntok.db").display().to_string();
    Ok((dir, path))
}

/// Write a deck file into `dir` and return its path.
pub fn write_deck_file(dir: &TempDir, name: &str, contents: &str) -> Fallible<String> {
    let path = dir.path().join(name);
    write(&path, contents)?;
    Ok(path.display().to_string())
}

/// Make every write to the entries table of the database at `path` abort.
pub fn block_writes(path: &str) -> Fallible<()> {
    let conn = Connection::open(path).map_err(|e| ErrorReport::new(e.to_string()))?;
    conn.execute_batch(
        "create trigger no_insert before insert on entries
         begin select raise(abort, 'read only'); end;
         create trigger no_update before update on entries
         begin select raise(abort, 'read only'); end;",
    )
    .map_err(|e| ErrorReport::new(e.to_string()))?;
    Ok(())
}
