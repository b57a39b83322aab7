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

//! Reading word lists from CSV text.

use csv::ReaderBuilder;
use csv::StringRecord;

use crate::error::MalformedSourceError;
use crate::types::entry::WordEntry;

/// Header names every word list must have. Matching is case-sensitive.
pub const REQUIRED_COLUMNS: [&str; 3] = ["word", "reading", "meaning"];

const BYTE_ORDER_MARK: &[u8] = b"\xef\xbb\xbf";

/// Parse the contents of a word list.
///
/// The first row is the header. Extra columns are ignored, short rows read
/// missing cells as empty, and rows whose word is blank are skipped. When a
/// header name repeats, the last column with that name is used. Input that
/// is not UTF-8 is reported as [`MalformedSourceError::Unreadable`]. The
/// result may be empty; it is up to the caller to decide whether that is an
/// error.
pub fn parse_words(input: impl AsRef<[u8]>) -> Result<Vec<WordEntry>, MalformedSourceError> {
    let input = input.as_ref();
    let input = input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: StringRecord = reader.headers().map_err(unreadable)?.clone();
    let column = |name: &str| headers.iter().collect::<Vec<_>>().iter().rposition(|h| *h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|&name| column(name).is_none())
        .map(|name| name.to_string())
        .collect();
    let (word_col, reading_col, meaning_col) =
        match (column("word"), column("reading"), column("meaning")) {
            (Some(w), Some(r), Some(m)) => (w, r, m),
            _ => return Err(MalformedSourceError::MissingColumns(missing)),
        };
    for name in REQUIRED_COLUMNS {
        if headers.iter().filter(|h| *h == name).count() > 1 {
            log::warn!("Header {name} appears more than once, using the last one");
        }
    }

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(unreadable)?;
        let cell = |i: usize| record.get(i).unwrap_or("");
        match WordEntry::new(cell(word_col), cell(reading_col), cell(meaning_col)) {
            Some(entry) => entries.push(entry),
            None => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                log::debug!("Skipping row without a word at line {line}");
            }
        }
    }
    Ok(entries)
}

fn unreadable(err: csv::Error) -> MalformedSourceError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    MalformedSourceError::Unreadable {
        line,
        message: err.to_string(),
    }
}
