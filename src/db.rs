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

//! SQLite-backed key-value store for sessions driven from the command line.

use learntok_core::error::ErrorReport;
use learntok_core::error::Fallible;
use learntok_core::storage::KeyValueStore;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

const SCHEMA: &str = "
create table if not exists entries (
    key text primary key,
    value text not null
) strict;
";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database at the given path.
    pub fn new(path: &str) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_error)?;
        conn.execute_batch(SCHEMA).map_err(db_error)?;
        log::debug!("Opened database at {path}");
        Ok(Self { conn })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.conn
            .query_row(
                "select value from entries where key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_error)
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.conn
            .execute(
                "insert into entries (key, value) values (?1, ?2)
                 on conflict (key) do update set value = excluded.value",
                params![key, value],
            )
            .map_err(db_error)?;
        Ok(())
    }
}

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}
