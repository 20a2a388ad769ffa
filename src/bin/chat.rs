//! banter-chat - terminal front-end for the relay
//!
//! A line-oriented conversation session against a running relay server. A
//! plain terminal has no microphone, so the listening affordance is disabled
//! for the whole session by the capability check.

use banter::client::HttpRelayClient;
use banter::session::{Event, Phase, SessionRuntime, SessionSignal};
use banter::speech::UnsupportedCapture;
use banter::transcript::Role;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3001";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "banter=warn".into()),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let relay_url = std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
    let relay = Arc::new(HttpRelayClient::new(&relay_url));

    let (runtime, handle) = SessionRuntime::new(relay, Arc::new(UnsupportedCapture));
    let mut signals = handle.subscribe();
    tokio::spawn(runtime.run());

    println!("connected to {relay_url} (type 'demo' for the offline path, ctrl-d to quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut seen_turns = 0usize;

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        handle.send(Event::DraftChanged { text: line }).await?;
        handle.send(Event::Submit).await?;
        let submitted = seen_turns + 1;

        // One turn at a time: wait for the reply or the failure notice
        // before prompting again.
        'turn: loop {
            match signals.recv().await? {
                SessionSignal::State(state) => {
                    if state.phase == Phase::AwaitingReply {
                        println!("assistant is typing...");
                        continue;
                    }

                    if let Some(turn) = state.transcript.last() {
                        if turn.role == Role::Assistant && state.transcript.len() > submitted {
                            println!("assistant> {}", turn.content);
                        }
                    }

                    if state.phase == Phase::Idle {
                        seen_turns = state.transcript.len();
                        if state.transcript.len() > submitted {
                            break 'turn;
                        }
                        // Reply failed: the alert signal arrives next.
                    }
                }
                SessionSignal::Alert { message } => {
                    eprintln!("error> {message}");
                    break 'turn;
                }
            }
        }
    }

    println!();
    Ok(())
}
