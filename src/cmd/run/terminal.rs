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

use std::io::Write;

use wordloop_core::sink::PresentationSink;

/// Prints each stage as a line of text.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn print(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            log::warn!("Failed to write to the terminal: {e}");
        }
    }
}

/// Join the visible fields, skipping the empty ones.
fn render(word: &str, reading: &str, meaning: &str) -> String {
    [word, reading, meaning]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("  |  ")
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn on_stage_changed(&mut self, word: &str, reading: &str, meaning: &str) {
        let line = render(word, reading, meaning);
        self.print(&line);
    }

    fn on_empty_deck(&mut self) {
        self.print("No words loaded. Use 'load PATH' to import a word list.");
    }

    fn on_deck_loaded(&mut self, count: usize) {
        self.print(&format!("Loaded {count} words. Type 'p' to resume."));
    }

    fn on_always_on_top(&mut self, enabled: bool) {
        // A terminal cannot float above other windows.
        log::debug!("Always-on-top hint: {enabled}");
    }
}
