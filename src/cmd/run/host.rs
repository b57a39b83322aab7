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

use std::path::PathBuf;

use wordloop_core::config::Config;
use wordloop_core::config::NEXT_WORD_TIMER;
use wordloop_core::config::SHOW_MEANING_TIMER;
use wordloop_core::config::parse_timer;
use wordloop_core::engine::CycleEngine;
use wordloop_core::error::Fallible;
use wordloop_core::sink::PresentationSink;
use wordloop_core::timer::TimerHandle;
use wordloop_core::timer::TimerPort;

use crate::cmd::run::input::HELP;
use crate::cmd::run::input::HostCommand;
use crate::store::load_words;
use crate::store::save_config;

#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the engine and turns user commands into engine calls, persisting
/// settings on the way.
pub struct Host<T: TimerPort, S: PresentationSink> {
    engine: CycleEngine<T, S>,
    config_path: PathBuf,
}

impl<T: TimerPort, S: PresentationSink> Host<T, S> {
    pub fn new(engine: CycleEngine<T, S>, config_path: PathBuf) -> Self {
        Self {
            engine,
            config_path,
        }
    }

    #[cfg(test)]
    pub fn engine(&self) -> &CycleEngine<T, S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CycleEngine<T, S> {
        &mut self.engine
    }

    pub fn on_timer(&mut self, handle: TimerHandle) {
        self.engine.on_timer(handle);
    }

    /// Carry out a command. On error nothing has changed.
    pub fn handle(&mut self, command: HostCommand) -> Fallible<Flow> {
        match command {
            HostCommand::Nothing => {}
            HostCommand::TogglePause => self.engine.toggle_pause(),
            HostCommand::Load(path) => {
                let entries = load_words(&path)?;
                self.engine.on_deck_replaced(entries)?;
                log::info!("Loaded word list from {}", path.display());
            }
            HostCommand::ShowMeaningTimer(text) => {
                let config = Config {
                    show_meaning_timer: parse_timer(SHOW_MEANING_TIMER, &text)?,
                    ..*self.engine.config()
                };
                self.apply_config(config)?;
            }
            HostCommand::NextWordTimer(text) => {
                let config = Config {
                    next_word_timer: parse_timer(NEXT_WORD_TIMER, &text)?,
                    ..*self.engine.config()
                };
                self.apply_config(config)?;
            }
            HostCommand::AlwaysOnTop(enabled) => {
                let config = Config {
                    always_on_top: enabled,
                    ..*self.engine.config()
                };
                self.apply_config(config)?;
            }
            HostCommand::Help => println!("{HELP}"),
            HostCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn apply_config(&mut self, config: Config) -> Fallible<()> {
        save_config(&self.config_path, &config)?;
        self.engine.on_config_changed(config);
        Ok(())
    }
}
