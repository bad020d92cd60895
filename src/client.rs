use std::collections::VecDeque;

use instant::Instant;

use crate::connection::{ConnectionCommand, ConnectionId, ConnectionManager, ConnectionState};
use crate::coord::{Coord, Direction};
use crate::error::EventError;
use crate::event::{ClientEvent, ServerEvent};
use crate::options::ClientOptions;
use crate::store::{Store, View};


// Things the embedding app should react to, besides redrawing.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    NavigateToGame,
    // Should be shown to the user prominently (the web client used a blocking alert).
    Notice(String),
}

// Sans-IO client: the caller feeds socket notifications, timer ticks and user input, and
// executes the `ConnectionCommand`s it gets back. Nothing here blocks or spawns.
pub struct ClientState {
    my_name: String,
    connection: ConnectionManager,
    store: Store,
    notable_events: VecDeque<NotableEvent>,
}

impl ClientState {
    pub fn new(my_name: String, options: &ClientOptions) -> Self {
        ClientState {
            my_name,
            connection: ConnectionManager::new(options.reconnect_delay),
            store: Store::new(),
            notable_events: VecDeque::new(),
        }
    }

    pub fn my_name(&self) -> &str { &self.my_name }
    pub fn store(&self) -> &Store { &self.store }
    pub fn connection_state(&self) -> ConnectionState { self.connection.state() }

    pub fn next_command(&mut self) -> Option<ConnectionCommand> { self.connection.next_command() }
    pub fn next_notable_event(&mut self) -> Option<NotableEvent> {
        self.notable_events.pop_front()
    }

    pub fn connect(&mut self) -> Option<ConnectionId> { self.connection.connect() }
    pub fn disconnect(&mut self) { self.connection.close(); }

    pub fn on_open(&mut self, id: ConnectionId) {
        if self.connection.on_open(id) {
            self.connection.send(ClientEvent::JoinRoom(self.my_name.clone()));
        }
    }

    pub fn on_close(&mut self, id: ConnectionId, reason: &str, now: Instant) {
        if self.connection.on_close(id, now) && !reason.is_empty() {
            log::info!("Socket {:?} closed: {}", id, reason);
        }
    }

    pub fn tick(&mut self, now: Instant) { self.connection.poll_timer(now); }

    // Malformed frames and unknown events are dropped: the error is returned for logging, but
    // the state is left untouched and the connection stays up.
    pub fn process_frame(&mut self, id: ConnectionId, frame: &str) -> Result<(), EventError> {
        if !self.connection.is_current(id) {
            log::debug!("Dropping frame from stale connection {:?}", id);
            return Ok(());
        }
        let event = ServerEvent::from_frame(frame)?;
        self.process_server_event(event)
    }

    pub fn process_server_event(&mut self, event: ServerEvent) -> Result<(), EventError> {
        log::debug!("Got {:?}", event.kind());
        match event {
            ServerEvent::Start => {
                self.store.set_view(View::Game);
                self.notable_events.push_back(NotableEvent::NavigateToGame);
            }
            ServerEvent::End { message } => {
                self.notable_events.push_back(NotableEvent::Notice(message));
            }
            ServerEvent::GameBoard(board) | ServerEvent::Tick(board) | ServerEvent::LoadMap(board) => {
                self.store.replace_board(board);
            }
            ServerEvent::JoinUser { players } => {
                self.store.replace_roster(players);
            }
            ServerEvent::UserReady(player) | ServerEvent::UserNotReady(player) => {
                if let Err(err) = self.store.update_player(player) {
                    self.notable_events.push_back(NotableEvent::Notice(err.to_string()));
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }

    pub fn push_premove(&mut self, direction: Direction) -> bool {
        self.store.push_premove(direction)
    }
    pub fn cancel_premoves(&mut self) { self.store.cancel_premoves(); }
    pub fn select(&mut self, coord: Coord) -> bool { self.store.select(coord) }
}
