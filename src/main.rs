//! slirc - Straylight IRC Client
//!
//! Line-mode front end: routed lines go to stdout, chat input is read
//! from stdin until `/quit` or end of input.

use parking_lot::Mutex;
use slirc_client::config::{self, Config};
use slirc_client::input::{self, ChatCommand, Outcome};
use slirc_client::{Commands, Hooks, IrcClient, Line, LineKind, LineSink, Target, View, telemetry};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

/// How long to wait for the server to close after QUIT.
const QUIT_GRACE: Duration = Duration::from_secs(5);

/// Follows the view the user is typing into.
struct ViewTracker {
    current: Arc<Mutex<Target>>,
}

impl Hooks for ViewTracker {
    fn on_join_channel(&mut self, _commands: &Commands, channel: &str) {
        *self.current.lock() = Target::Channel(channel.to_owned());
    }

    fn on_privmsg(&mut self, _commands: &Commands, from: &str) {
        let mut current = self.current.lock();
        if *current == Target::Console {
            *current = Target::Private(from.to_owned());
        }
    }
}

/// Prints every routed line to stdout.
struct StdoutSink;

impl StdoutSink {
    fn render(target: &Target, line: &Line) {
        let marker = match LineKind::classify(line, View::from(target)) {
            LineKind::Message => "<>",
            LineKind::Notice => "-!-",
            LineKind::Event => "**",
            LineKind::Server => "--",
            LineKind::Action => " *",
        };
        let from = line.source_nick().unwrap_or("");
        println!("[{target}] {marker} {from} {}", line.raw);
    }
}

impl LineSink for StdoutSink {
    fn draw(&mut self, target: Target, line: &Line) {
        Self::render(&target, line);
    }

    fn push(&mut self, target: Target, line: Line) {
        Self::render(&target, &line);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "slirc.toml".to_string());
    let config = Config::load(&config_path)?;

    telemetry::init(&config.log).map_err(|e| anyhow::anyhow!(e))?;

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(path = %config_path, error = %e, "Invalid config");
        }
        anyhow::bail!("{} config error(s) in {config_path}", errors.len());
    }

    info!(
        server = %config.server.host,
        nick = %config.identity.nick,
        "Starting slirc"
    );

    let current = Arc::new(Mutex::new(Target::Console));
    let hooks = ViewTracker {
        current: Arc::clone(&current),
    };
    let client = IrcClient::connect(&config, Box::new(hooks), Box::new(StdoutSink)).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let text = tokio::select! {
            _ = client.closed() => break,
            read = lines.next_line() => match read? {
                Some(text) => text,
                None => {
                    client.quit(None)?;
                    break;
                }
            },
        };

        let command = match ChatCommand::parse(&text) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        let view = current.lock().clone();
        let outcome = input::execute(&mut client.engine().lock(), &view, command);
        match outcome {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Quit) => break,
            Err(e) if e.is_disconnect() => {
                warn!(error = %e, "Connection lost");
                break;
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    if tokio::time::timeout(QUIT_GRACE, client.join()).await.is_err() {
        warn!("Server did not close the connection");
    }
    info!("Bye");
    Ok(())
}
