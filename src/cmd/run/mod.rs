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

mod host;
mod input;
mod terminal;
mod timer;

use std::io::stdout;
use std::path::Path;
use std::path::PathBuf;
use std::pin::pin;

use tokio::select;
use tokio::signal;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use wordloop_core::deck::Deck;
use wordloop_core::engine::CycleEngine;
use wordloop_core::error::Fallible;
use wordloop_core::rng::TinyRng;
use wordloop_core::sink::PresentationSink;
use wordloop_core::timer::TimerHandle;
use wordloop_core::timer::TimerPort;

use crate::cmd::run::host::Flow;
use crate::cmd::run::host::Host;
use crate::cmd::run::input::parse_command;
use crate::cmd::run::input::spawn_stdin_reader;
use crate::cmd::run::terminal::TerminalSink;
use crate::cmd::run::timer::TokioTimer;
use crate::store::load_or_create_config;
use crate::store::load_words;
use crate::utils::CONFIG_FILE;
use crate::utils::WORDS_FILE;
use crate::utils::resolve_directory;

pub struct RunConfig {
    pub directory: Option<String>,
    pub words: Option<String>,
    pub paused: bool,
    pub seed: u64,
}

pub async fn start_session(config: RunConfig) -> Fallible<()> {
    let directory = resolve_directory(config.directory)?;

    let config_path = directory.join(CONFIG_FILE);
    let settings = load_or_create_config(&config_path)?;

    let words_path: PathBuf = match config.words {
        Some(path) => PathBuf::from(path),
        None => directory.join(WORDS_FILE),
    };
    let deck = initial_deck(&words_path, config.seed);

    let (fire_tx, mut fire_rx) = unbounded_channel();
    let engine = CycleEngine::new(
        deck,
        settings,
        TokioTimer::new(fire_tx),
        TerminalSink::new(stdout()),
    );
    let mut host = Host::new(engine, config_path);
    if config.paused {
        host.engine_mut().toggle_pause();
    }

    let (line_tx, mut line_rx) = unbounded_channel();
    spawn_stdin_reader(line_tx)?;
    eprintln!("Type 'help' for a list of commands.");
    host.engine_mut().start();

    run_loop(&mut host, &mut fire_rx, &mut line_rx, shutdown_signal()).await;
    host.engine_mut().stop();
    Ok(())
}

/// Dispatch timer fires and input lines until the user quits or `shutdown`
/// resolves. Input closing does not end the loop.
async fn run_loop<T: TimerPort, S: PresentationSink>(
    host: &mut Host<T, S>,
    fire_rx: &mut UnboundedReceiver<TimerHandle>,
    line_rx: &mut UnboundedReceiver<String>,
    shutdown: impl Future<Output = ()>,
) {
    let mut shutdown = pin!(shutdown);
    let mut input_open = true;
    loop {
        select! {
            Some(handle) = fire_rx.recv() => host.on_timer(handle),
            line = line_rx.recv(), if input_open => match line {
                Some(line) => {
                    let flow = parse_command(&line).and_then(|command| host.handle(command));
                    match flow {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Quit) => break,
                        Err(e) => eprintln!("{e}"),
                    }
                }
                None => {
                    log::debug!("Input closed, cycling continues");
                    input_open = false;
                }
            },
            _ = &mut shutdown => {
                log::debug!("Received Ctrl+C, shutting down");
                break;
            },
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Load the starting word list. Failure is reported and leaves the deck
/// empty, so the session starts in the empty-deck state.
fn initial_deck(path: &Path, seed: u64) -> Deck {
    let mut deck = Deck::new(TinyRng::from_seed(seed));
    let loaded = load_words(path).and_then(|entries| Ok(deck.load(entries)?));
    if let Err(e) = loaded {
        log::warn!("Could not load {}: {e}", path.display());
        eprintln!("Could not load the word list {}: {e}", path.display());
    }
    deck
}

#[cfg(test)]
mod tests {
    use std::future::pending;
    use std::time::Duration;

    use tokio::sync::mpsc::UnboundedSender;
    use tokio::time::sleep;
    use tokio::time::timeout;
    use wordloop_core::config::Config;
    use wordloop_core::error::ErrorReport;
    use wordloop_core::sink::RecordingSink;
    use wordloop_core::timer::ManualTimer;
    use wordloop_core::types::stage::Stage;

    use super::*;
    use crate::helper::create_tmp_directory;
    use crate::helper::write_words;

    type TestHost = Host<ManualTimer, RecordingSink>;

    struct Loop {
        host: TestHost,
        fire_tx: UnboundedSender<TimerHandle>,
        fire_rx: UnboundedReceiver<TimerHandle>,
        line_tx: UnboundedSender<String>,
        line_rx: UnboundedReceiver<String>,
    }

    fn make_loop(dir: &Path) -> Fallible<Loop> {
        let path = write_words(dir, WORDS_FILE, "word,reading,meaning\n猫,ねこ,cat\n")?;
        let engine = CycleEngine::new(
            initial_deck(&path, 1),
            Config::default(),
            ManualTimer::new(),
            RecordingSink::new(),
        );
        let mut host = Host::new(engine, dir.join(CONFIG_FILE));
        host.engine_mut().start();
        let (fire_tx, fire_rx) = unbounded_channel();
        let (line_tx, line_rx) = unbounded_channel();
        Ok(Loop {
            host,
            fire_tx,
            fire_rx,
            line_tx,
            line_rx,
        })
    }

    #[test]
    fn test_initial_deck() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = write_words(
            &dir,
            WORDS_FILE,
            "word,reading,meaning\n猫,ねこ,cat\n犬,いぬ,dog\n",
        )?;
        let deck = initial_deck(&path, 1);
        assert_eq!(deck.len(), 2);
        Ok(())
    }

    #[test]
    fn test_initial_deck_missing_file_is_empty() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let deck = initial_deck(&dir.join(WORDS_FILE), 1);
        assert!(deck.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_start_session_on_non_existent_directory() {
        let config = RunConfig {
            directory: Some("./derpherp".to_string()),
            words: None,
            paused: false,
            seed: 0,
        };
        let result = start_session(config).await;
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[tokio::test]
    async fn test_shutdown_ends_loop_while_input_stays_open() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut l = make_loop(&dir)?;
        let finished = timeout(
            Duration::from_secs(5),
            run_loop(
                &mut l.host,
                &mut l.fire_rx,
                &mut l.line_rx,
                sleep(Duration::from_millis(20)),
            ),
        )
        .await;
        assert!(finished.is_ok());
        // Neither input nor timer channel was closed.
        assert!(!l.line_tx.is_closed());
        assert!(!l.fire_tx.is_closed());
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_line_does_not_end_loop() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut l = make_loop(&dir)?;
        l.line_tx.send("\u{fffd}\u{fffd}".to_string()).unwrap();
        l.line_tx.send("p".to_string()).unwrap();
        l.line_tx.send("q".to_string()).unwrap();
        let finished = timeout(
            Duration::from_secs(5),
            run_loop(&mut l.host, &mut l.fire_rx, &mut l.line_rx, pending()),
        )
        .await;
        assert!(finished.is_ok());
        assert!(l.host.engine().is_paused());
        Ok(())
    }

    #[tokio::test]
    async fn test_closed_input_keeps_cycling() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut l = make_loop(&dir)?;
        drop(l.line_tx);
        let handle = l
            .host
            .engine()
            .state()
            .pending_timer
            .ok_or_else(|| ErrorReport::new("nothing scheduled"))?;
        l.fire_tx.send(handle).unwrap();
        let finished = timeout(
            Duration::from_secs(5),
            run_loop(
                &mut l.host,
                &mut l.fire_rx,
                &mut l.line_rx,
                sleep(Duration::from_millis(50)),
            ),
        )
        .await;
        assert!(finished.is_ok());
        assert_eq!(l.host.engine().stage(), Stage::Meaning);
        Ok(())
    }
}
