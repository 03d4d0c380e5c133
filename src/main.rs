//! Terminal runtime and entry point.
//!
//! This module is the thin layer between the eventscout library and the
//! terminal. It parses arguments, loads configuration and the catalog, and
//! then drives the browser from lines of input.
//!
//! # Lifecycle
//!
//! 1. **Configure**: Read the TOML config, overlay `key=value` arguments
//! 2. **Observe**: Install the tracing subscriber, then report any rejected
//!    overrides
//! 3. **Load**: Build the catalog from the configured source
//! 4. **Loop**: Parse a line → `handle_command` → execute actions → render;
//!    an expiring notification also triggers a redraw
//!
//! # Usage
//!
//! ```text
//! eventscout [--config PATH] [--remote] [-c "cmd; cmd; ..."] [key=value ...]
//! ```
//!
//! With `-c`, the commands run once and the final screen is printed; otherwise
//! commands are read from stdin until `quit` or end of input.

#![allow(clippy::multiple_crate_versions)]

use eventscout::api::{ApiClient, AuthService, Credentials, FileSessionStore};
use eventscout::app::{command, Notifier};
use eventscout::domain::SystemClock;
use eventscout::infrastructure::paths;
use eventscout::storage::{load_catalog, CatalogSource};
use eventscout::{handle_command, Action, Config, DiscoveryState, EventScoutError, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::watch;

/// Terminal width used when `COLUMNS` is unset or invalid.
const DEFAULT_COLUMNS: usize = 100;

const USAGE: &str = "usage: eventscout [--config PATH] [--remote] [-c \"cmd; cmd\"] [key=value ...]";

const HELP: &str = "\
Filters
  search TEXT          match title, organization, description and tags
  location CITY|all    city filter (fuzzy: `location izmir`)
  org NAME|all         organization filter
  category NAME        add or remove a category
  tag NAME             add or remove a tag (events must carry every tag)
  date any|week|month|quarter
  min N                at least N volunteers needed
  mode all|onsite|online|hybrid
  sort date|volunteers|recent
  reset                clear every filter
Pages
  next, prev, page N
Events
  show ID, back
Account
  login USER|EMAIL PASSWORD, logout, whoami
Other
  reload, help, quit";

/// Parsed command-line arguments.
#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    remote: bool,
    script: Option<String>,
    overrides: BTreeMap<String, String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| EventScoutError::Config("--config needs a path".to_string()))?;
                parsed.config_path = Some(paths::expand_tilde(&path));
            }
            "--remote" => parsed.remote = true,
            "-c" | "--command" => {
                parsed.script = Some(
                    args.next()
                        .ok_or_else(|| EventScoutError::Config("-c needs commands".to_string()))?,
                );
            }
            "-h" | "--help" => return Err(EventScoutError::Config(USAGE.to_string())),
            other => {
                let (key, value) = other
                    .split_once('=')
                    .ok_or_else(|| EventScoutError::Config(format!("unexpected argument: {other}\n{USAGE}")))?;
                parsed.overrides.insert(key.to_string(), value.to_string());
            }
        }
    }

    Ok(parsed)
}

/// Browser state plus everything needed to execute actions.
struct Runtime {
    state: DiscoveryState,
    source: Box<dyn CatalogSource>,
    auth: AuthService,
    notifier: Notifier,
    cols: usize,
}

impl Runtime {
    /// Parses and applies one line. Returns `true` when the user asked to quit.
    async fn handle_line(&mut self, line: &str) -> bool {
        let command = match command::parse(line, self.state.catalog()) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(error = %e, "rejected input");
                self.notifier.notify(message_for(&e));
                self.draw();
                return false;
            }
        };

        let (needs_render, actions) = handle_command(&mut self.state, &command);
        let (quit, notified) = self.execute(actions).await;
        if !quit && (needs_render || notified) {
            self.draw();
        }
        quit
    }

    /// Runs actions in order. Returns `(quit, posted_a_notification)`.
    async fn execute(&mut self, actions: Vec<Action>) -> (bool, bool) {
        let mut notified = false;

        for action in actions {
            tracing::debug!(action = action.kind(), "executing action");
            match action {
                Action::Notify(message) => {
                    self.notifier.notify(message);
                    notified = true;
                }
                Action::ShowHelp => println!("{HELP}"),
                Action::ReloadCatalog => {
                    let message = match load_catalog(self.source.as_ref()).await {
                        Ok(catalog) => {
                            let count = catalog.len();
                            self.state.replace_catalog(catalog);
                            format!("Reloaded {count} events from {}", self.source.describe())
                        }
                        Err(e) => format!("Reload failed: {}", message_for(&e)),
                    };
                    self.notifier.notify(message);
                    notified = true;
                }
                Action::Login {
                    identifier,
                    password,
                } => {
                    let credentials = Credentials::new(&identifier, &password);
                    let message = match self.auth.login(&credentials).await {
                        Ok(user) => format!("Signed in as {} ({})", user.display_name(), user.role),
                        Err(e) => format!("Login failed: {}", message_for(&e)),
                    };
                    self.notifier.notify(message);
                    notified = true;
                }
                Action::Logout => {
                    let message = match self.auth.logout() {
                        Ok(()) => "Signed out".to_string(),
                        Err(e) => format!("Logout failed: {}", message_for(&e)),
                    };
                    self.notifier.notify(message);
                    notified = true;
                }
                Action::WhoAmI => {
                    let message = match self.auth.stored_user() {
                        Ok(Some(user)) => format!("Signed in as {} <{}> ({})", user.display_name(), user.email, user.role),
                        Ok(None) => "Not signed in".to_string(),
                        Err(e) => message_for(&e),
                    };
                    self.notifier.notify(message);
                    notified = true;
                }
                Action::Quit => return (true, notified),
            }
        }

        (false, notified)
    }

    fn draw(&self) {
        let notification = self.notifier.current();
        print!("{}", eventscout::ui::render(&self.state, notification.as_deref(), self.cols));
    }
}

/// What woke the input loop.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Line(String),
    NotificationExpired,
    Eof,
}

/// Waits for the next typed line or for the shown notification to expire.
///
/// New notifications are ignored here; the command that posted one already
/// redraws.
async fn next_input<R>(
    lines: &mut Lines<R>,
    notifications: &mut watch::Receiver<Option<String>>,
) -> Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        tokio::select! {
            line = lines.next_line() => {
                return Ok(line?.map_or(Input::Eof, Input::Line));
            }
            Ok(()) = notifications.changed() => {
                if notifications.borrow_and_update().is_none() {
                    return Ok(Input::NotificationExpired);
                }
            }
        }
    }
}

/// One-line, user-facing description of an error.
fn message_for(error: &EventScoutError) -> String {
    match error {
        EventScoutError::Api { status: 401, .. } => {
            "invalid credentials or expired session".to_string()
        }
        EventScoutError::Command(message) => message.clone(),
        other => other.to_string(),
    }
}

fn terminal_columns() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|&cols| cols >= 40)
        .unwrap_or(DEFAULT_COLUMNS)
}

async fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let rejected = config.apply_overrides(&args.overrides);
    if args.remote {
        config.remote_catalog = true;
    }

    let _tracing = eventscout::observability::init_tracing(&config, None);
    for override_ in &rejected {
        tracing::warn!(key = %override_.key, value = %override_.value, reason = override_.reason, "config override ignored");
        if !config.log_stderr {
            eprintln!("eventscout: {override_}");
        }
    }
    tracing::debug!(config = ?config, "configuration resolved");

    let session_file = config
        .session_file
        .as_deref()
        .map_or_else(paths::default_session_file, paths::expand_tilde);
    let client = Arc::new(ApiClient::new(
        config.api.clone(),
        Arc::new(FileSessionStore::new(session_file)),
    )?);

    let source = config.catalog_source(&client);
    let catalog = load_catalog(source.as_ref()).await?;

    let mut runtime = Runtime {
        state: eventscout::initialize(&config, catalog, Arc::new(SystemClock)),
        source,
        auth: AuthService::new(Arc::clone(&client)),
        notifier: Notifier::new(config.notification_ttl()),
        cols: terminal_columns(),
    };

    if let Some(script) = &args.script {
        for line in script.split(';') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let command = command::parse(line, runtime.state.catalog())?;
            let (_, actions) = handle_command(&mut runtime.state, &command);
            if runtime.execute(actions).await.0 {
                break;
            }
        }
        runtime.draw();
        return Ok(());
    }

    runtime.draw();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notifications = runtime.notifier.subscribe();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        match next_input(&mut lines, &mut notifications).await? {
            Input::Line(line) => {
                if runtime.handle_line(&line).await {
                    break;
                }
            }
            Input::NotificationExpired => {
                println!();
                runtime.draw();
            }
            Input::Eof => break,
        }
    }

    tracing::debug!("session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("eventscout: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(ToString::to_string))
    }

    #[test]
    fn collects_flags_and_overrides() {
        let parsed = args(&["--remote", "page_size=6", "-c", "tag STEM; next", "theme=paper"]).unwrap();

        assert!(parsed.remote);
        assert_eq!(parsed.script.as_deref(), Some("tag STEM; next"));
        assert_eq!(parsed.overrides.get("page_size").map(String::as_str), Some("6"));
        assert_eq!(parsed.overrides.get("theme").map(String::as_str), Some("paper"));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_notification_wakes_the_loop() {
        let (_keyboard, stdin) = tokio::io::duplex(64);
        let mut lines = BufReader::new(stdin).lines();
        let notifier = Notifier::new(std::time::Duration::from_millis(200));
        let mut notifications = notifier.subscribe();

        notifier.notify("Signed out");
        let input = next_input(&mut lines, &mut notifications).await.unwrap();

        assert_eq!(input, Input::NotificationExpired);
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test]
    async fn typed_lines_arrive_before_end_of_input() {
        let mut lines = BufReader::new(&b"next\n"[..]).lines();
        let notifier = Notifier::new(std::time::Duration::from_secs(5));
        let mut notifications = notifier.subscribe();

        assert_eq!(
            next_input(&mut lines, &mut notifications).await.unwrap(),
            Input::Line("next".to_string())
        );
        assert_eq!(next_input(&mut lines, &mut notifications).await.unwrap(), Input::Eof);
    }

    #[test]
    fn rejects_bare_words_and_missing_values() {
        assert!(args(&["stray"]).is_err());
        assert!(args(&["--config"]).is_err());
        assert!(args(&["-c"]).is_err());
    }
}
