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


//! wordloop-core: Core library for the wordloop vocabulary cycler.
//!
//! This library is free of I/O and async runtimes. It provides:
//! - Word entries and CSV word list parsing
//! - The shuffling deck
//! - Config validation
//! - The cycle engine, with its timer and presentation seams

pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod rng;
pub mod sink;
pub mod source;
pub mod timer;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use deck::Deck;
pub use engine::{CycleEngine, CycleState};
pub use error::{
    EmptyDeckError, ErrorReport, Fallible, InvalidConfigError, MalformedSourceError, fail,
};
pub use rng::TinyRng;
pub use sink::{PresentationSink, RecordingSink, SinkEvent};
pub use source::parse_words;
pub use timer::{ManualTimer, TimerHandle, TimerPort};
pub use types::entry::WordEntry;
pub use types::stage::Stage;
