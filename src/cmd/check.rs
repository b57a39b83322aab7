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

use std::path::Path;

use wordloop_core::error::EmptyDeckError;
use wordloop_core::error::Fallible;

use crate::store::load_words;

pub fn check_words(path: String) -> Fallible<()> {
    let count = count_entries(Path::new(&path))?;
    println!("{path}: {count} entries.");
    Ok(())
}

fn count_entries(path: &Path) -> Fallible<usize> {
    let entries = load_words(path)?;
    if entries.is_empty() {
        return Err(EmptyDeckError.into());
    }
    Ok(entries.len())
}
