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

//! The cycle engine: shows each entry's word, then its reading and meaning,
//! then moves on, forever.
//!
//! Every transition cancels the pending timer before doing anything else, so
//! at most one scheduled callback exists at any time. A handle that arrives
//! after it was cancelled no longer matches the pending one and is dropped.

use crate::config::Config;
use crate::deck::Advance;
use crate::deck::Deck;
use crate::error::EmptyDeckError;
use crate::sink::PresentationSink;
use crate::timer::ManualTimer;
use crate::timer::TimerHandle;
use crate::timer::TimerPort;
use crate::types::entry::WordEntry;
use crate::types::stage::Stage;

/// Upper bound on callbacks delivered by one [`CycleEngine::advance_clock`]
/// call. With both timers at zero the cycle never lets time pass.
const MAX_FIRES_PER_STEP: usize = 10_000;

/// What the pending timer will do when it fires.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Transition {
    RevealMeaning,
    Advance,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Pending {
    handle: TimerHandle,
    transition: Transition,
}

/// A snapshot of the engine's display state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CycleState {
    pub stage: Stage,
    pub paused: bool,
    /// Only ever set while running with a transition scheduled.
    pub pending_timer: Option<TimerHandle>,
}

pub struct CycleEngine<T: TimerPort, S: PresentationSink> {
    deck: Deck,
    config: Config,
    timer: T,
    sink: S,
    stage: Stage,
    paused: bool,
    pending: Option<Pending>,
}

impl<T: TimerPort, S: PresentationSink> CycleEngine<T, S> {
    /// Assemble an engine. Nothing is shown or scheduled until
    /// [`CycleEngine::start`].
    pub fn new(deck: Deck, config: Config, timer: T, sink: S) -> Self {
        Self {
            deck,
            config,
            timer,
            sink,
            stage: Stage::Word,
            paused: false,
            pending: None,
        }
    }

    /// Apply presentation hints and show the current word.
    pub fn start(&mut self) {
        self.sink.on_always_on_top(self.config.always_on_top);
        self.show_word();
    }

    /// Show only the current word, and, unless paused, schedule the reveal.
    pub fn show_word(&mut self) {
        self.cancel_pending();
        let entry = match self.deck.current() {
            Ok(entry) => entry,
            Err(EmptyDeckError) => {
                log::debug!("Deck is empty, nothing to show");
                self.sink.on_empty_deck();
                return;
            }
        };
        self.stage = Stage::Word;
        self.sink.on_stage_changed(entry.word(), "", "");
        if !self.paused {
            self.schedule(self.config.show_meaning_delay_ms(), Transition::RevealMeaning);
        }
    }

    /// Deliver a timer the host was asked to schedule. Handles that are not
    /// the pending one (cancelled, or already delivered) are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        let pending = match self.pending {
            Some(pending) if pending.handle == handle => pending,
            _ => {
                log::debug!("Ignoring stale {handle}");
                return;
            }
        };
        // The handle has fired, so there is nothing left to cancel.
        self.pending = None;
        match pending.transition {
            Transition::RevealMeaning => self.reveal_meaning(),
            Transition::Advance => self.advance(),
        }
    }

    /// Pause, or resume. Resuming always restarts the current entry at the
    /// word stage.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Resumed");
            self.show_word();
        } else {
            self.paused = true;
            self.cancel_pending();
            log::info!("Paused during the {} stage", self.stage);
        }
    }

    /// Swap in a new word list. An empty list is rejected and nothing about
    /// the engine changes.
    pub fn on_deck_replaced(&mut self, entries: Vec<WordEntry>) -> Result<(), EmptyDeckError> {
        self.deck.load(entries)?;
        log::info!("Loaded {} entries", self.deck.len());
        if self.paused {
            self.cancel_pending();
            self.stage = Stage::Word;
            self.sink.on_deck_loaded(self.deck.len());
        } else {
            self.show_word();
        }
        Ok(())
    }

    /// Replace the config. A running cycle restarts at the word stage with
    /// the new timers.
    pub fn on_config_changed(&mut self, config: Config) {
        log::info!(
            "Config changed: reveal after {}s, next word after {}s",
            config.show_meaning_timer,
            config.next_word_timer
        );
        self.config = config;
        self.sink.on_always_on_top(config.always_on_top);
        if !self.paused {
            self.show_word();
        }
    }

    /// Cancel whatever is scheduled. The display is left as it is.
    pub fn stop(&mut self) {
        self.cancel_pending();
    }

    pub fn state(&self) -> CycleState {
        CycleState {
            stage: self.stage,
            paused: self.paused,
            pending_timer: self.pending.map(|p| p.handle),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    fn reveal_meaning(&mut self) {
        self.cancel_pending();
        let Ok(entry) = self.deck.current() else {
            return;
        };
        self.stage = Stage::Meaning;
        self.sink
            .on_stage_changed(entry.word(), entry.reading(), entry.meaning());
        if !self.paused {
            self.schedule(self.config.next_word_delay_ms(), Transition::Advance);
        }
    }

    fn advance(&mut self) {
        self.cancel_pending();
        match self.deck.advance() {
            Ok(Advance::Next) => {}
            Ok(Advance::Wrapped) => {
                log::debug!("Deck wrapped, reshuffled {} entries", self.deck.len());
            }
            Err(EmptyDeckError) => return,
        }
        self.show_word();
    }

    fn schedule(&mut self, delay_ms: u64, transition: Transition) {
        let handle = self.timer.schedule(delay_ms);
        log::debug!("Scheduled {transition:?} in {delay_ms}ms as {handle}");
        self.pending = Some(Pending { handle, transition });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!("Cancelling {}", pending.handle);
            self.timer.cancel(pending.handle);
        }
    }
}

impl<S: PresentationSink> CycleEngine<ManualTimer, S> {
    /// Move the virtual clock forward by `ms`, delivering every callback that
    /// falls due on the way, including ones scheduled along the way. Returns
    /// the number delivered.
    pub fn advance_clock(&mut self, ms: u64) -> usize {
        let deadline = self.timer.now_ms().saturating_add(ms);
        let mut fired = 0;
        while let Some(handle) = self.timer.pop_due(deadline) {
            self.on_timer(handle);
            fired += 1;
            if fired >= MAX_FIRES_PER_STEP {
                log::warn!("Stopped after {fired} callbacks without the clock moving");
                break;
            }
        }
        self.timer.set_now(deadline);
        fired
    }
}
