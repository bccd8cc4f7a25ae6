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

use std::process::exit;

use clap::Parser;
use learntok_core::error::Fallible;
use tokio::spawn;

use crate::cmd::check::check_deck_file;
use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::export::export_deck;
use crate::cmd::import::import_deck_file;
use crate::cmd::reset::reset_session;
use crate::cmd::stats::print_stats;
use crate::utils::wait_for_server;

/// The database used when `--db` is not given.
const DEFAULT_DB: &str = "learntok.db";

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Go through the deck in a web interface.
    Drill {
        /// Path to the session database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
        /// Import this deck file before starting, replacing the saved deck and progress.
        #[arg(long)]
        deck: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Check a deck file for problems.
    Check {
        /// Path to the deck file (a JSON array of cards).
        file: String,
    },
    /// Replace the saved deck with a deck file. Clears all progress.
    Import {
        /// Path to the deck file (a JSON array of cards).
        file: String,
        /// Path to the session database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
    /// Export the saved deck as JSON.
    Export {
        /// Path to the session database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Go back to the built-in deck and clear all progress.
    Reset {
        /// Path to the session database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
    /// Print the position and progress of the saved session.
    Stats {
        /// Path to the session database.
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            db,
            deck,
            host,
            port,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                db_path: db,
                deck_path: deck,
                host,
                port,
            };
            start_server(config).await
        }
        Command::Check { file } => check_deck_file(&file),
        Command::Import { file, db } => import_deck_file(&file, &db),
        Command::Export { db, output } => export_deck(&db, output),
        Command::Reset { db } => reset_session(&db),
        Command::Stats { db } => print_stats(&db),
    }
}
