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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use wordloop_core::error::Fallible;
use wordloop_core::error::fail;

pub const CONFIG_FILE: &str = "config.json";
pub const WORDS_FILE: &str = "words.csv";

/// Resolve the directory argument, falling back to the working directory.
pub fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory: PathBuf = match directory {
        Some(directory) => PathBuf::from(directory),
        None => current_dir()?,
    };
    if !directory.is_dir() {
        return fail("directory does not exist.");
    }
    Ok(directory.canonicalize()?)
}

/// A seed for the deck shuffle.
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
