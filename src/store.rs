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

//! Loading and saving the config file and word lists.

use std::fs::read;
use std::fs::read_to_string;
use std::fs::write;
use std::path::Path;

use wordloop_core::config::Config;
use wordloop_core::error::Fallible;
use wordloop_core::error::fail;
use wordloop_core::source::parse_words;
use wordloop_core::types::entry::WordEntry;

/// Read the config file. A missing, unreadable, unparsable or invalid file
/// yields the defaults.
pub fn load_config(path: &Path) -> Fallible<Config> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let text = match read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Could not read {}: {e}", path.display());
            return Ok(Config::default());
        }
    };
    match Config::from_json(&text) {
        Ok(config) => Ok(config),
        Err(e) => {
            log::warn!("Ignoring {}: {e}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_config(path: &Path, config: &Config) -> Fallible<()> {
    write(path, config.to_json()?)?;
    log::debug!("Saved config to {}", path.display());
    Ok(())
}

/// Read the config file, writing the defaults out when there is none yet.
pub fn load_or_create_config(path: &Path) -> Fallible<Config> {
    let config = load_config(path)?;
    if !path.exists() {
        save_config(path, &config)?;
    }
    Ok(config)
}

/// Read a word list. The result may be empty.
pub fn load_words(path: &Path) -> Fallible<Vec<WordEntry>> {
    if !path.exists() {
        return fail(format!("{} does not exist.", path.display()));
    }
    let bytes = read(path)?;
    let entries = parse_words(&bytes)?;
    log::debug!("Read {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;
    use crate::helper::write_words;

    #[test]
    fn test_missing_config_gives_defaults() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("config.json");
        assert_eq!(load_config(&path)?, Config::default());
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn test_config_roundtrip() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("config.json");
        let config = Config {
            show_meaning_timer: 7,
            next_word_timer: 0,
            always_on_top: false,
        };
        save_config(&path, &config)?;
        assert_eq!(load_config(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_partial_config_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("config.json");
        write(&path, "{\"nextWordTimer\": 12}")?;
        let config = load_config(&path)?;
        assert_eq!(config.next_word_timer, 12);
        assert_eq!(config.show_meaning_timer, 3);
        assert!(config.always_on_top);
        Ok(())
    }

    #[test]
    fn test_broken_config_file_gives_defaults() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("config.json");
        write(&path, "{ not json")?;
        assert_eq!(load_config(&path)?, Config::default());
        write(&path, "{\"showMeaningTimer\": -4}")?;
        assert_eq!(load_config(&path)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_non_utf8_config_file_gives_defaults() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("config.json");
        write(&path, b"\xff\xfe")?;
        assert_eq!(load_config(&path)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_load_or_create_writes_defaults() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("config.json");
        assert_eq!(load_or_create_config(&path)?, Config::default());
        assert!(path.exists());
        assert_eq!(
            Config::from_json(&read_to_string(&path)?)?,
            Config::default()
        );
        Ok(())
    }

    #[test]
    fn test_load_or_create_keeps_existing_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("config.json");
        write(&path, "{\"nextWordTimer\": 12}")?;
        assert_eq!(load_or_create_config(&path)?.next_word_timer, 12);
        assert_eq!(read_to_string(&path)?, "{\"nextWordTimer\": 12}");
        Ok(())
    }

    #[test]
    fn test_load_words() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = write_words(
            &dir,
            "words.csv",
            "\u{feff}word,reading,meaning\n猫,ねこ,cat\n,,\n犬,いぬ,dog\n",
        )?;
        let entries = load_words(&path)?;
        assert_eq!(entries.len(), 2);
        Ok(())
    }

    #[test]
    fn test_load_words_not_utf8() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("sjis.csv");
        write(&path, b"word,reading,meaning\n\x94\x4c,x,cat\n")?;
        let err = load_words(&path).err().map(|e| e.to_string());
        assert!(err.is_some_and(|e| {
            e.starts_with("error: Malformed word list: unreadable CSV record")
        }));
        Ok(())
    }

    #[test]
    fn test_load_words_missing_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let result = load_words(&dir.join("nope.csv"));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_load_words_malformed() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = write_words(&dir, "bad.csv", "term,definition\nfoo,bar\n")?;
        let err = load_words(&path).err().map(|e| e.to_string());
        assert_eq!(
            err,
            Some(
                "error: Malformed word list: the CSV header must contain word, reading, meaning (missing: word, reading, meaning)."
                    .to_string()
            )
        );
        Ok(())
    }
}
