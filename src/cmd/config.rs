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

use std::path::Path;

use wordloop_core::config::Config;
use wordloop_core::config::NEXT_WORD_TIMER;
use wordloop_core::config::SHOW_MEANING_TIMER;
use wordloop_core::config::parse_timer;
use wordloop_core::error::Fallible;

use crate::store::load_config;
use crate::store::save_config;
use crate::utils::CONFIG_FILE;
use crate::utils::resolve_directory;

/// Settings given on the command line. Timer values are raw user text.
#[derive(Default)]
pub struct ConfigUpdate {
    pub show_meaning_timer: Option<String>,
    pub next_word_timer: Option<String>,
    pub always_on_top: Option<bool>,
}

impl ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.show_meaning_timer.is_none()
            && self.next_word_timer.is_none()
            && self.always_on_top.is_none()
    }

    /// Apply every change to a copy of `config`, or none of them.
    pub fn apply(&self, config: Config) -> Fallible<Config> {
        let mut config = config;
        if let Some(text) = &self.show_meaning_timer {
            config.show_meaning_timer = parse_timer(SHOW_MEANING_TIMER, text)?;
        }
        if let Some(text) = &self.next_word_timer {
            config.next_word_timer = parse_timer(NEXT_WORD_TIMER, text)?;
        }
        if let Some(enabled) = self.always_on_top {
            config.always_on_top = enabled;
        }
        Ok(config)
    }
}

pub fn update_config(directory: Option<String>, update: ConfigUpdate) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let config = update_config_file(&directory.join(CONFIG_FILE), &update)?;
    println!("{}", config.to_json()?);
    Ok(())
}

fn update_config_file(path: &Path, update: &ConfigUpdate) -> Fallible<Config> {
    let current = load_config(path)?;
    let config = update.apply(current)?;
    if !update.is_empty() || !path.exists() {
        save_config(path, &config)?;
    }
    Ok(config)
}
