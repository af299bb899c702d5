//! Terminal client for SyncArt rooms.
//!
//! Joins a room over the websocket, mirrors it through the sync engine, and
//! prints roster, canvas, and chat activity as it arrives. Plain stdin lines
//! are sent as chat; slash commands drive the canvas:
//!
//! ```text
//! /pencil x y x y ...    freehand stroke through the points
//! /eraser x y x y ...    erase stroke through the points
//! /line x1 y1 x2 y2      straight line
//! /rect x1 y1 x2 y2      rectangle
//! /undo /redo /clear     history controls
//! /users                 print the roster
//! /quit                  leave
//! ```

use clap::Parser;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use client::SyncEngine;
use protocol::{ElementKind, Frame, Point};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket send failed: {0}")]
    WsSend(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed by server")]
    WsClosed,
    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "syncart", about = "SyncArt room client")]
struct Cli {
    /// Server base URL, e.g. ws://127.0.0.1:5000
    #[arg(long, env = "SYNCART_SERVER", default_value = "ws://127.0.0.1:5000")]
    server: String,

    /// Room id to join — the opaque code from whoever created the room.
    #[arg(long)]
    room: String,

    /// Display name shown to other members.
    #[arg(long)]
    name: String,

    /// Join as the room's host (and presenter).
    #[arg(long)]
    host: bool,

    /// Stroke color for drawing commands.
    #[arg(long, default_value = "#000000")]
    color: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let url = format!("{}/ws", cli.server.trim_end_matches('/'));
    let (stream, _) = connect_async(url.as_str())
        .await
        .map_err(|e| CliError::WsConnect(Box::new(e)))?;
    let (mut sink, mut source) = stream.split();

    let mut engine = SyncEngine::new(cli.room.clone(), cli.name.clone(), cli.host);
    send(&mut sink, &engine.join_frame()).await?;
    println!("* joining room {} as {}", cli.room, cli.name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            msg = source.next() => {
                if !handle_inbound(&mut engine, msg)? {
                    return Ok(());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Stdin closed; leave the room by disconnecting.
                    return Ok(());
                };
                if !handle_line(&mut engine, &mut sink, &cli.color, line.trim()).await? {
                    return Ok(());
                }
            }
        }
    }
}

// =============================================================================
// INBOUND
// =============================================================================

/// Apply one websocket message to the engine and narrate the effect.
/// Returns `false` when the connection is over.
fn handle_inbound(
    engine: &mut SyncEngine,
    msg: Option<Result<Message, tokio_tungstenite::tungstenite::Error>>,
) -> Result<bool, CliError> {
    let Some(Ok(msg)) = msg else {
        return Err(CliError::WsClosed);
    };
    match msg {
        Message::Text(text) => {
            let Ok(frame) = protocol::decode_frame(text.as_str()) else {
                return Ok(true);
            };
            let event = frame.event.clone();
            if engine.apply(&frame).is_err() {
                return Ok(true);
            }
            report(engine, &event);
            Ok(true)
        }
        Message::Close(_) => Ok(false),
        _ => Ok(true),
    }
}

/// Print what just changed, reading the engine's post-apply state.
fn report(engine: &SyncEngine, event: &str) {
    match event {
        protocol::USER_IS_JOINED => {
            if engine.is_joined() {
                println!("* join acknowledged");
            }
        }
        protocol::UPDATE_USERS => {
            let names: Vec<&str> = engine.roster.users.iter().map(|u| u.name.as_str()).collect();
            println!("* {} online: {}", names.len(), names.join(", "));
        }
        protocol::UPDATE_DRAWING => {
            println!("* canvas now has {} element(s)", engine.canvas.elements.len());
        }
        protocol::CHAT_MESSAGE => {
            if let Some(last) = engine.chat.messages.last() {
                println!("<{}> {}", last.user, last.message);
            }
        }
        // Live stroke relays are too chatty to narrate one by one.
        _ => {}
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Handle one stdin line. Returns `false` on `/quit`.
async fn handle_line(
    engine: &mut SyncEngine,
    sink: &mut WsSink,
    color: &str,
    line: &str,
) -> Result<bool, CliError> {
    match line {
        "" => {}
        "/quit" => return Ok(false),
        "/undo" => match engine.undo() {
            Some(frame) => send(sink, &frame).await?,
            None => println!("* nothing to undo"),
        },
        "/redo" => match engine.redo() {
            Some(frame) => send(sink, &frame).await?,
            None => println!("* nothing to redo"),
        },
        "/clear" => {
            let frame = engine.clear();
            send(sink, &frame).await?;
        }
        "/users" => {
            for user in &engine.roster.users {
                println!("* {} ({})", user.name, user.user_id);
            }
        }
        _ => {
            if let Some(args) = line.strip_prefix("/pencil ") {
                draw_stroke(engine, sink, ElementKind::Pencil, args, color, None).await?;
            } else if let Some(args) = line.strip_prefix("/eraser ") {
                draw_stroke(engine, sink, ElementKind::Eraser, args, color, None).await?;
            } else if let Some(args) = line.strip_prefix("/line ") {
                draw_stroke(engine, sink, ElementKind::Line, args, color, Some(2)).await?;
            } else if let Some(args) = line.strip_prefix("/rect ") {
                draw_stroke(engine, sink, ElementKind::Rectangle, args, color, Some(2)).await?;
            } else if line.starts_with('/') {
                println!("* unknown command: {line}");
            } else {
                let frame = engine.chat_frame(line);
                send(sink, &frame).await?;
            }
        }
    }
    Ok(true)
}

/// Run a whole stroke lifecycle from a list of coordinates: begin at the
/// first point, extend through the rest, commit.
async fn draw_stroke(
    engine: &mut SyncEngine,
    sink: &mut WsSink,
    kind: ElementKind,
    args: &str,
    color: &str,
    expected_points: Option<usize>,
) -> Result<(), CliError> {
    let Some(points) = parse_points(args) else {
        println!("* expected an even list of coordinates");
        return Ok(());
    };
    if expected_points.is_some_and(|n| points.len() != n) {
        println!("* expected exactly two points");
        return Ok(());
    }

    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        println!("* expected at least one point");
        return Ok(());
    };

    let begin = engine.begin_stroke(kind, first, color);
    send(sink, &begin).await?;
    for point in points {
        if let Some(frame) = engine.extend_stroke(point) {
            send(sink, &frame).await?;
        }
    }
    if let Some(frame) = engine.commit_stroke() {
        send(sink, &frame).await?;
    }
    Ok(())
}

/// Parse `"x y x y ..."` into points. `None` on a dangling coordinate or a
/// non-numeric token.
fn parse_points(args: &str) -> Option<Vec<Point>> {
    let coords: Vec<f64> = args
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    if coords.len() % 2 != 0 {
        return None;
    }
    Some(coords.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send(sink: &mut WsSink, frame: &Frame) -> Result<(), CliError> {
    sink.send(Message::Text(protocol::encode_frame(frame).into()))
        .await
        .map_err(|e| CliError::WsSend(Box::new(e)))
}
