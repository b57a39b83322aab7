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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// Raised when a deck operation needs at least one entry and there is none:
/// loading an empty word list, or reading from a deck that was never loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDeckError;

impl Display for EmptyDeckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "the word list has no entries.")
    }
}

impl Error for EmptyDeckError {}

/// Raised when a timer field is present but is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidConfigError {
    pub field: String,
    pub reason: InvalidConfigReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfigReason {
    /// The user gave no value at all.
    Missing,
    /// The value is not an integer.
    NotAnInteger,
    /// The value is an integer below zero.
    Negative,
}

impl InvalidConfigError {
    pub fn new(field: impl Into<String>, reason: InvalidConfigReason) -> Self {
        InvalidConfigError {
            field: field.into(),
            reason,
        }
    }
}

impl Display for InvalidConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            InvalidConfigReason::Missing => write!(f, "enter a value for {}.", self.field),
            InvalidConfigReason::NotAnInteger => {
                write!(f, "{} must be an integer.", self.field)
            }
            InvalidConfigReason::Negative => write!(f, "{} must be 0 or greater.", self.field),
        }
    }
}

impl Error for InvalidConfigError {}

/// Raised when a word list cannot be read as a table of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedSourceError {
    /// The header row lacks one or more of the required columns.
    MissingColumns(Vec<String>),
    /// The CSV reader could not decode a record.
    Unreadable { line: u64, message: String },
}

impl Display for MalformedSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedSourceError::MissingColumns(columns) => write!(
                f,
                "the CSV header must contain word, reading, meaning (missing: {}).",
                columns.join(", ")
            ),
            MalformedSourceError::Unreadable { line, message } => {
                write!(f, "unreadable CSV record at line {line}: {message}")
            }
        }
    }
}

impl Error for MalformedSourceError {}

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<csv::Error> for ErrorReport {
    fn from(value: csv::Error) -> Self {
        ErrorReport {
            message: format!("CSV error: {value}"),
        }
    }
}

impl From<EmptyDeckError> for ErrorReport {
    fn from(value: EmptyDeckError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl From<InvalidConfigError> for ErrorReport {
    fn from(value: InvalidConfigError) -> Self {
        ErrorReport {
            message: format!("Invalid setting: {value}"),
        }
    }
}

impl From<MalformedSourceError> for ErrorReport {
    fn from(value: MalformedSourceError) -> Self {
        ErrorReport {
            message: format!("Malformed word list: {value}"),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}
