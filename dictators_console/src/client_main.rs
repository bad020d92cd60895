use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::style::{self, Stylize};
use crossterm::{cursor, event as term_event, execute, terminal};
use dictators_client::client::{ClientState, NotableEvent};
use dictators_client::connection::{ConnectionCommand, ConnectionId};
use dictators_client::coord::{Coord, Direction};
use dictators_client::event::ClientEvent;
use dictators_client::options::ClientOptions;
use instant::Instant;
use scopeguard::defer;

use crate::keymap::{self, UserAction};
use crate::network;
use crate::summary;


const TICK_INTERVAL: Duration = Duration::from_millis(100);

pub struct ClientConfig {
    pub server_url: String,
    pub player_name: String,
    pub options: ClientOptions,
}

enum IncomingEvent {
    Opened(ConnectionId, mpsc::Sender<OutgoingFrame>),
    Frame(ConnectionId, String),
    Closed(ConnectionId, String),
    Terminal(term_event::Event),
    Tick,
}

enum OutgoingFrame {
    Event(ClientEvent),
    Close,
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, client_state: &ClientState, board_cursor: Option<Coord>,
    notice: &Option<String>,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    let snapshot = client_state.store().snapshot();
    writeln_raw(stdout, format!("Playing as {}", client_state.my_name()))?;
    writeln_raw(stdout, summary::render(&snapshot, client_state.connection_state(), board_cursor))?;
    writeln_raw(stdout, "")?;
    writeln_raw(
        stdout,
        "WASD: premove    Q: cancel premoves    arrows + Enter: select    Esc: quit"
            .with(style::Color::DarkGrey),
    )?;
    if let Some(notice) = notice {
        writeln_raw(stdout, notice.clone().with(style::Color::Magenta))?;
    }
    Ok(())
}

// Each connection attempt gets its own reader thread; the writer thread is created once the
// handshake succeeds. Every outcome is reported back tagged with `id`.
fn spawn_connection(id: ConnectionId, server_url: String, tx: mpsc::Sender<IncomingEvent>) {
    thread::spawn(move || {
        let (mut socket_in, mut socket_out) = match network::connect(&server_url) {
            Ok(sockets) => sockets,
            Err(err) => {
                let _ = tx.send(IncomingEvent::Closed(id, err.reason()));
                return;
            }
        };
        let (out_tx, out_rx) = mpsc::channel();
        thread::spawn(move || {
            for frame in out_rx {
                let result = match frame {
                    OutgoingFrame::Event(event) => network::write_obj(&mut socket_out, &event),
                    OutgoingFrame::Close => network::close(&mut socket_out),
                };
                if let Err(err) = result {
                    log::debug!("Write to {:?} failed: {}", id, err.reason());
                    break;
                }
            }
        });
        if tx.send(IncomingEvent::Opened(id, out_tx)).is_err() {
            return;
        }
        loop {
            match network::read_text(&mut socket_in) {
                Ok(text) => {
                    if tx.send(IncomingEvent::Frame(id, text)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let _ = tx.send(IncomingEvent::Closed(id, err.reason()));
                    return;
                }
            }
        }
    });
}

// Cursor starts at the selection and never leaves the board.
fn move_cursor(
    board_cursor: Option<Coord>, client_state: &ClientState, direction: Direction,
) -> Option<Coord> {
    let shape = client_state.store().board().shape();
    if shape.is_empty() {
        return None;
    }
    let current = board_cursor.or(client_state.store().selection()).unwrap_or(Coord::new(0, 0));
    let next = current.step(direction);
    Some(if shape.contains_coord(next) { next } else { current })
}

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let my_name = config.player_name.trim().to_owned();
    let server_url = config.server_url.clone();
    let mut client_state = ClientState::new(my_name, &config.options);
    std::mem::drop(config);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    };

    let (tx, rx) = mpsc::channel();
    let tx_local = tx.clone();
    let tx_tick = tx.clone();
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                break;
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(TICK_INTERVAL);
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut writers: HashMap<ConnectionId, mpsc::Sender<OutgoingFrame>> = HashMap::new();
    let mut board_cursor = None;
    let mut notice = None;
    client_state.connect();
    let mut last_connection_state = client_state.connection_state();
    render(&mut stdout, &client_state, board_cursor, &notice)?;
    for event in rx {
        let now = Instant::now();
        let is_tick = matches!(event, IncomingEvent::Tick);
        match event {
            IncomingEvent::Opened(id, writer) => {
                writers.insert(id, writer);
                client_state.on_open(id);
            }
            IncomingEvent::Frame(id, text) => {
                if let Err(err) = client_state.process_frame(id, &text) {
                    log::warn!("Dropped frame: {}", err);
                }
            }
            IncomingEvent::Closed(id, reason) => {
                writers.remove(&id);
                client_state.on_close(id, &reason, now);
            }
            IncomingEvent::Terminal(term_event::Event::Key(key)) => {
                match keymap::action_for_key(key) {
                    Some(UserAction::Premove(direction)) => {
                        client_state.push_premove(direction);
                        board_cursor = None;
                    }
                    Some(UserAction::CancelPremoves) => client_state.cancel_premoves(),
                    Some(UserAction::MoveCursor(direction)) => {
                        board_cursor = move_cursor(board_cursor, &client_state, direction);
                    }
                    Some(UserAction::SelectCursor) => {
                        if let Some(coord) = board_cursor.take() {
                            client_state.select(coord);
                        }
                    }
                    Some(UserAction::Quit) => {
                        client_state.disconnect();
                        if let Some(ConnectionCommand::Close(id)) = client_state.next_command() {
                            if let Some(writer) = writers.get(&id) {
                                let _ = writer.send(OutgoingFrame::Close);
                            }
                        }
                        return Ok(());
                    }
                    None => {}
                }
            }
            IncomingEvent::Terminal(_) => {}
            IncomingEvent::Tick => {
                client_state.tick(now);
            }
        }

        while let Some(command) = client_state.next_command() {
            match command {
                ConnectionCommand::Open(id) => spawn_connection(id, server_url.clone(), tx.clone()),
                ConnectionCommand::Send(id, event) => {
                    if let Some(writer) = writers.get(&id) {
                        let _ = writer.send(OutgoingFrame::Event(event));
                    }
                }
                ConnectionCommand::Close(id) => {
                    if let Some(writer) = writers.get(&id) {
                        let _ = writer.send(OutgoingFrame::Close);
                    }
                }
            }
        }
        while let Some(event) = client_state.next_notable_event() {
            match event {
                NotableEvent::NavigateToGame => {
                    log::info!("Game started");
                }
                NotableEvent::Notice(text) => {
                    log::info!("Notice: {}", text);
                    notice = Some(text);
                }
            }
        }
        // Ticks are frequent; only redraw if they changed something.
        let connection_state = client_state.connection_state();
        let changed = client_state.store().take_changes().any()
            || connection_state != last_connection_state;
        last_connection_state = connection_state;
        if changed || !is_tick {
            render(&mut stdout, &client_state, board_cursor, &notice)?;
        }
    }
    unreachable!("Event stream ends only when all senders are gone, and `tx` is alive")
}
