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

use std::fmt::Display;
use std::fmt::Formatter;

/// A single vocabulary entry. All fields are trimmed, and the word is never
/// empty.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct WordEntry {
    word: String,
    reading: String,
    meaning: String,
}

impl WordEntry {
    /// Build an entry from raw cell values. Returns `None` when the word is
    /// blank once trimmed.
    pub fn new(word: &str, reading: &str, meaning: &str) -> Option<Self> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        Some(Self {
            word: word.to_string(),
            reading: reading.trim().to_string(),
            meaning: meaning.trim().to_string(),
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }
}

impl Display for WordEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.word, self.reading, self.meaning)
    }
}
