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

/// Whatever shows the current entry to the user.
pub trait PresentationSink {
    /// Display these three fields. Hidden fields arrive as empty strings.
    fn on_stage_changed(&mut self, word: &str, reading: &str, meaning: &str);

    /// There is nothing to show until a word list is loaded.
    fn on_empty_deck(&mut self);

    /// A word list of `count` entries was loaded while paused.
    fn on_deck_loaded(&mut self, count: usize);

    /// Presentation hint from the config.
    fn on_always_on_top(&mut self, _enabled: bool) {}
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SinkEvent {
    Stage {
        word: String,
        reading: String,
        meaning: String,
    },
    EmptyDeck,
    DeckLoaded(usize),
    AlwaysOnTop(bool),
}

impl SinkEvent {
    pub fn stage(word: &str, reading: &str, meaning: &str) -> Self {
        SinkEvent::Stage {
            word: word.to_string(),
            reading: reading.to_string(),
            meaning: meaning.to_string(),
        }
    }
}

/// A sink that remembers every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&SinkEvent> {
        self.events.last()
    }

    /// Return the events received so far and forget them.
    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }
}

impl PresentationSink for RecordingSink {
    fn on_stage_changed(&mut self, word: &str, reading: &str, meaning: &str) {
        self.events.push(SinkEvent::stage(word, reading, meaning));
    }

    fn on_empty_deck(&mut self) {
        self.events.push(SinkEvent::EmptyDeck);
    }

    fn on_deck_loaded(&mut self, count: usize) {
        self.events.push(SinkEvent::DeckLoaded(count));
    }

    fn on_always_on_top(&mut self, enabled: bool) {
        self.events.push(SinkEvent::AlwaysOnTop(enabled));
    }
}
