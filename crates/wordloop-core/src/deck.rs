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

use crate::error::EmptyDeckError;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::types::entry::WordEntry;

/// An ordered collection of entries with a cursor.
///
/// The cursor always points at a valid entry while the deck is non-empty.
/// Every time it wraps back to the start the entries are reshuffled, so each
/// pass visits every entry exactly once, in a fresh order.
#[derive(Debug, Clone)]
pub struct Deck {
    entries: Vec<WordEntry>,
    index: usize,
    rng: TinyRng,
}

/// What happened on a call to [`Deck::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next entry within the current pass.
    Next,
    /// Returned to the first entry; the order was reshuffled.
    Wrapped,
}

impl Deck {
    /// An empty deck. Usable only after a successful [`Deck::load`].
    pub fn new(rng: TinyRng) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            rng,
        }
    }

    /// Replace the entries, shuffle them, and move the cursor to the start.
    ///
    /// An empty list is rejected and the deck is left as it was.
    pub fn load(&mut self, entries: Vec<WordEntry>) -> Result<(), EmptyDeckError> {
        if entries.is_empty() {
            return Err(EmptyDeckError);
        }
        self.entries = entries;
        shuffle(&mut self.entries, &mut self.rng);
        self.index = 0;
        Ok(())
    }

    pub fn current(&self) -> Result<&WordEntry, EmptyDeckError> {
        self.entries.get(self.index).ok_or(EmptyDeckError)
    }

    pub fn advance(&mut self) -> Result<Advance, EmptyDeckError> {
        if self.entries.is_empty() {
            return Err(EmptyDeckError);
        }
        self.index = (self.index + 1) % self.entries.len();
        if self.index == 0 {
            shuffle(&mut self.entries, &mut self.rng);
            Ok(Advance::Wrapped)
        } else {
            Ok(Advance::Next)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .map(|w| WordEntry::new(w, "", "").unwrap())
            .collect()
    }

    fn loaded(words: &[&str]) -> Deck {
        let mut deck = Deck::new(TinyRng::from_seed(17));
        deck.load(entries(words)).unwrap();
        deck
    }

    fn members(deck: &Deck) -> HashSet<String> {
        deck.entries()
            .iter()
            .map(|e| e.word().to_string())
            .collect()
    }

    #[test]
    fn test_new_deck_is_empty() {
        let deck = Deck::new(TinyRng::from_seed(0));
        assert!(deck.is_empty());
        assert_eq!(deck.len(), 0);
        assert_eq!(deck.current(), Err(EmptyDeckError));
    }

    #[test]
    fn test_advance_on_empty_deck() {
        let mut deck = Deck::new(TinyRng::from_seed(0));
        assert_eq!(deck.advance(), Err(EmptyDeckError));
        assert_eq!(deck.index(), 0);
    }

    #[test]
    fn test_load_empty_leaves_deck_unchanged() {
        let mut deck = loaded(&["a", "b", "c"]);
        deck.advance().unwrap();
        let before: Vec<WordEntry> = deck.entries().to_vec();
        assert_eq!(deck.load(Vec::new()), Err(EmptyDeckError));
        assert_eq!(deck.entries(), before.as_slice());
        assert_eq!(deck.index(), 1);
    }

    #[test]
    fn test_load_resets_index() {
        let mut deck = loaded(&["a", "b", "c"]);
        deck.advance().unwrap();
        deck.load(entries(&["x", "y"])).unwrap();
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.len(), 2);
        let expected: HashSet<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
        assert_eq!(members(&deck), expected);
    }

    /// Every entry is visited exactly once before the cursor returns to zero.
    #[test]
    fn test_round_robin_completeness() {
        for size in 1..8 {
            let words: Vec<String> = (0..size).map(|i| format!("w{i}")).collect();
            let refs: Vec<&str> = words.iter().map(|s| s.as_str()).collect();
            let mut deck = loaded(&refs);
            let mut seen = HashSet::new();
            seen.insert(deck.current().unwrap().word().to_string());
            for _ in 1..size {
                assert_eq!(deck.advance(), Ok(Advance::Next));
                assert!(seen.insert(deck.current().unwrap().word().to_string()));
            }
            assert_eq!(seen.len(), size);
            assert_eq!(deck.advance(), Ok(Advance::Wrapped));
            assert_eq!(deck.index(), 0);
        }
    }

    #[test]
    fn test_wrap_reshuffles_with_same_membership() {
        let mut deck = loaded(&["a", "b", "c"]);
        let before = members(&deck);
        assert_eq!(deck.advance(), Ok(Advance::Next));
        assert_eq!(deck.advance(), Ok(Advance::Next));
        assert_eq!(deck.advance(), Ok(Advance::Wrapped));
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.len(), 3);
        assert_eq!(members(&deck), before);
    }

    #[test]
    fn test_single_entry_always_wraps() {
        let mut deck = loaded(&["猫"]);
        assert_eq!(deck.advance(), Ok(Advance::Wrapped));
        assert_eq!(deck.current().unwrap().word(), "猫");
    }
}
