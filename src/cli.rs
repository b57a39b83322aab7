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

use clap::Parser;
use wordloop_core::error::Fallible;

use crate::cmd::check::check_words;
use crate::cmd::config::ConfigUpdate;
use crate::cmd::config::update_config;
use crate::cmd::run::RunConfig;
use crate::cmd::run::start_session;
use crate::utils::clock_seed;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Cycle through a word list in the terminal.
    Run {
        /// Directory holding config.json and words.csv. By default, the current working directory is used.
        directory: Option<String>,
        /// Word list to start with instead of the directory's words.csv.
        #[arg(long)]
        words: Option<String>,
        /// Start paused. Default is false.
        #[arg(long)]
        paused: bool,
    },
    /// Check that a word list can be loaded.
    Check {
        /// Path to the CSV file.
        path: String,
    },
    /// Show or change the saved settings.
    Config {
        /// Directory holding config.json. By default, the current working directory is used.
        directory: Option<String>,
        /// Seconds before the reading and meaning are revealed.
        #[arg(long, allow_hyphen_values = true)]
        show_meaning_timer: Option<String>,
        /// Seconds before moving on to the next word.
        #[arg(long, allow_hyphen_values = true)]
        next_word_timer: Option<String>,
        /// Whether the window should stay above other windows.
        #[arg(long)]
        always_on_top: Option<bool>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Run {
            directory,
            words,
            paused,
        } => {
            let config = RunConfig {
                directory,
                words,
                paused,
                seed: clock_seed(),
            };
            start_session(config).await
        }
        Command::Check { path } => check_words(path),
        Command::Config {
            directory,
            show_meaning_timer,
            next_word_timer,
            always_on_top,
        } => update_config(
            directory,
            ConfigUpdate {
                show_meaning_timer,
                next_word_timer,
                always_on_top,
            },
        ),
    }
}
