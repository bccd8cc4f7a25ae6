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

use learntok_core::error::Fallible;
use learntok_core::session::Session;

use crate::db::Database;

pub fn reset_session(db_path: &str) -> Fallible<()> {
    let mut session = Session::open(Database::new(db_path)?);
    session.try_reset()?;
    println!("Restored the built-in deck. Progress cleared.");
    Ok(())
}
