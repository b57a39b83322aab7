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

use std::fs::write;
use std::path::Path;
use std::path::PathBuf;

use tempfile::tempdir;
use wordloop_core::error::Fallible;

/// Create a scratch directory that outlives the test's `TempDir` guard.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// Write a word list into `dir` and return its path.
pub fn write_words(dir: &Path, name: &str, content: &str) -> Fallible<PathBuf> {
    let path = dir.join(name);
    write(&path, content)?;
    Ok(path)
}
