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

use std::io::BufRead;
use std::io::ErrorKind;
use std::io::stdin;
use std::path::PathBuf;
use std::thread;

use tokio::sync::mpsc::UnboundedSender;
use wordloop_core::error::Fallible;
use wordloop_core::error::fail;

pub const HELP: &str = "\
Commands:
  p, pause      pause or resume
  load PATH     replace the word list with a CSV file
  show N        seconds before the reading and meaning appear
  next N        seconds before the next word
  top on|off    keep the window above others
  help          show this message
  q, quit       exit";

/// A line typed while the cycle is running.
#[derive(Debug, PartialEq)]
pub enum HostCommand {
    /// A blank line.
    Nothing,
    TogglePause,
    Load(PathBuf),
    /// Raw text for the reveal delay; validated when applied.
    ShowMeaningTimer(String),
    /// Raw text for the advance delay; validated when applied.
    NextWordTimer(String),
    AlwaysOnTop(bool),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Fallible<HostCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "" => Ok(HostCommand::Nothing),
        "p" | "pause" | "resume" => Ok(HostCommand::TogglePause),
        "l" | "load" => {
            if rest.is_empty() {
                fail("usage: load PATH")
            } else {
                Ok(HostCommand::Load(PathBuf::from(rest)))
            }
        }
        "show" => Ok(HostCommand::ShowMeaningTimer(rest.to_string())),
        "next" => Ok(HostCommand::NextWordTimer(rest.to_string())),
        "top" => match rest {
            "on" | "true" | "yes" => Ok(HostCommand::AlwaysOnTop(true)),
            "off" | "false" | "no" => Ok(HostCommand::AlwaysOnTop(false)),
            _ => fail("usage: top on|off"),
        },
        "h" | "help" | "?" => Ok(HostCommand::Help),
        "q" | "quit" | "exit" => Ok(HostCommand::Quit),
        other => fail(format!(
            "unknown command '{other}'. Type 'help' for a list of commands."
        )),
    }
}

/// Send each line of `reader` over `tx` until the reader closes or the
/// receiving side goes away. Bytes that are not UTF-8 are replaced, so a
/// garbled line becomes an unknown command instead of ending the session.
pub fn forward_lines<R: BufRead>(mut reader: R, tx: UnboundedSender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                log::warn!("Stopped reading input: {e}");
                break;
            }
        }
    }
    log::debug!("Input closed");
}

/// Read stdin on its own thread. A blocked read there never holds up
/// shutdown.
pub fn spawn_stdin_reader(tx: UnboundedSender<String>) -> Fallible<()> {
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || forward_lines(stdin().lock(), tx))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tokio::sync::mpsc::unbounded_channel;

    use super::*;

    #[test]
    fn test_simple_commands() -> Fallible<()> {
        assert_eq!(parse_command("")?, HostCommand::Nothing);
        assert_eq!(parse_command("   ")?, HostCommand::Nothing);
        assert_eq!(parse_command("p")?, HostCommand::TogglePause);
        assert_eq!(parse_command(" pause ")?, HostCommand::TogglePause);
        assert_eq!(parse_command("help")?, HostCommand::Help);
        assert_eq!(parse_command("q")?, HostCommand::Quit);
        Ok(())
    }

    #[test]
    fn test_load_keeps_spaces_in_path() -> Fallible<()> {
        assert_eq!(
            parse_command("load  my words/n5 list.csv ")?,
            HostCommand::Load(PathBuf::from("my words/n5 list.csv"))
        );
        assert!(parse_command("load").is_err());
        Ok(())
    }

    #[test]
    fn test_timer_text_is_passed_through() -> Fallible<()> {
        assert_eq!(
            parse_command("show 4")?,
            HostCommand::ShowMeaningTimer("4".to_string())
        );
        assert_eq!(
            parse_command("next -1")?,
            HostCommand::NextWordTimer("-1".to_string())
        );
        assert_eq!(
            parse_command("show")?,
            HostCommand::ShowMeaningTimer(String::new())
        );
        Ok(())
    }

    #[test]
    fn test_top() -> Fallible<()> {
        assert_eq!(parse_command("top on")?, HostCommand::AlwaysOnTop(true));
        assert_eq!(parse_command("top off")?, HostCommand::AlwaysOnTop(false));
        assert!(parse_command("top maybe").is_err());
        Ok(())
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_command("frobnicate now").err().map(|e| e.to_string());
        assert_eq!(
            err,
            Some(
                "error: unknown command 'frobnicate'. Type 'help' for a list of commands."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_forward_lines_replaces_invalid_utf8() {
        let (tx, mut rx) = unbounded_channel();
        let input: &[u8] = b"\xff\xfe\np\r\nq";
        forward_lines(Cursor::new(input), tx);
        assert_eq!(rx.try_recv().ok(), Some("\u{fffd}\u{fffd}".to_string()));
        assert_eq!(rx.try_recv().ok(), Some("p".to_string()));
        assert_eq!(rx.try_recv().ok(), Some("q".to_string()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forward_lines_stops_when_receiver_is_gone() {
        let (tx, rx) = unbounded_channel();
        drop(rx);
        forward_lines(Cursor::new("p\np\n"), tx);
    }
}
