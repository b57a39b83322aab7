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

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Fallible;
use crate::error::InvalidConfigError;
use crate::error::InvalidConfigReason;
use crate::error::fail;

pub const SHOW_MEANING_TIMER: &str = "showMeaningTimer";
pub const NEXT_WORD_TIMER: &str = "nextWordTimer";
pub const ALWAYS_ON_TOP: &str = "alwaysOnTop";

/// User-tunable settings. Timer values are in seconds.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Seconds the word stays alone before its reading and meaning appear.
    pub show_meaning_timer: u64,
    /// Seconds the full entry stays up before moving to the next word.
    pub next_word_timer: u64,
    /// Presentation hint. The engine forwards it to the sink untouched.
    pub always_on_top: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_meaning_timer: 3,
            next_word_timer: 5,
            always_on_top: true,
        }
    }
}

impl Config {
    /// Build a config from a partially-specified JSON object. Missing fields
    /// take their default values and unknown keys are ignored.
    pub fn validate(raw: &Map<String, Value>) -> Result<Self, InvalidConfigError> {
        let defaults = Config::default();
        let show_meaning_timer = match raw.get(SHOW_MEANING_TIMER) {
            Some(value) => timer_from_json(SHOW_MEANING_TIMER, value)?,
            None => defaults.show_meaning_timer,
        };
        let next_word_timer = match raw.get(NEXT_WORD_TIMER) {
            Some(value) => timer_from_json(NEXT_WORD_TIMER, value)?,
            None => defaults.next_word_timer,
        };
        let always_on_top = match raw.get(ALWAYS_ON_TOP) {
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                log::warn!("Ignoring non-boolean {ALWAYS_ON_TOP} value: {other}");
                defaults.always_on_top
            }
            None => defaults.always_on_top,
        };
        Ok(Self {
            show_meaning_timer,
            next_word_timer,
            always_on_top,
        })
    }

    /// Parse and validate the contents of a config file.
    pub fn from_json(text: &str) -> Fallible<Self> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(map) => Ok(Config::validate(&map)?),
            _ => fail("config file must contain a JSON object."),
        }
    }

    pub fn to_json(&self) -> Fallible<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn show_meaning_delay_ms(&self) -> u64 {
        self.show_meaning_timer.saturating_mul(1000)
    }

    pub fn next_word_delay_ms(&self) -> u64 {
        self.next_word_timer.saturating_mul(1000)
    }
}

fn timer_from_json(field: &str, value: &Value) -> Result<u64, InvalidConfigError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let reason = match value.as_i64() {
        Some(_) => InvalidConfigReason::Negative,
        None => InvalidConfigReason::NotAnInteger,
    };
    Err(InvalidConfigError::new(field, reason))
}

/// Validate a timer value typed by the user.
pub fn parse_timer(field: &str, text: &str) -> Result<u64, InvalidConfigError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InvalidConfigError::new(field, InvalidConfigReason::Missing));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Ok(n);
    }
    let reason = match text.parse::<i64>() {
        Ok(_) => InvalidConfigReason::Negative,
        Err(_) => InvalidConfigReason::NotAnInteger,
    };
    Err(InvalidConfigError::new(field, reason))
}
