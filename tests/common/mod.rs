// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::time::Duration;

use dictators_client::client::{ClientState, NotableEvent};
use dictators_client::connection::{ConnectionCommand, ConnectionId};
use dictators_client::options::ClientOptions;
use instant::Instant;
use serde_json::{Value, json};


pub const MY_NAME: &str = "alice";

#[allow(dead_code)]
pub fn frame(event: &str, message: Value) -> String {
    json!({ "payload": { "event": event, "message": message } }).to_string()
}

#[allow(dead_code)]
pub fn player_json(name: &str, color: &str) -> Value { json!({ "name": name, "color": color }) }

#[allow(dead_code)]
pub fn roster_json(players: &[(&str, &str)]) -> Value {
    let players: Vec<_> = players.iter().map(|(name, color)| player_json(name, color)).collect();
    json!({ "players": players })
}

// Board where every tile has `army` soldiers of nobody.
#[allow(dead_code)]
pub fn board_json(num_rows: usize, num_cols: usize, army: i64) -> Value {
    let tile = json!({ "army": army, "owner": "", "terrain": "plain" });
    Value::Array(vec![Value::Array(vec![tile; num_cols]); num_rows])
}


// Client with a mock clock and a pretend socket layer.
pub struct TestClient {
    creation_instant: Instant,
    time_elapsed: Duration,
    pub state: ClientState,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new() -> Self {
        TestClient {
            creation_instant: Instant::now(),
            time_elapsed: Duration::ZERO,
            state: ClientState::new(MY_NAME.to_owned(), &ClientOptions::default()),
        }
    }

    pub fn now(&self) -> Instant { self.creation_instant + self.time_elapsed }

    pub fn advance(&mut self, d: Duration) {
        self.time_elapsed += d;
        let now = self.now();
        self.state.tick(now);
    }

    pub fn commands(&mut self) -> Vec<ConnectionCommand> {
        std::iter::from_fn(|| self.state.next_command()).collect()
    }

    pub fn notable_events(&mut self) -> Vec<NotableEvent> {
        std::iter::from_fn(|| self.state.next_notable_event()).collect()
    }

    // Connects and completes the handshake. Leaves no pending commands behind.
    pub fn connect_and_open(&mut self) -> ConnectionId {
        let id = self.state.connect().unwrap();
        self.state.on_open(id);
        self.commands();
        id
    }

    pub fn close(&mut self, id: ConnectionId) {
        let now = self.now();
        self.state.on_close(id, "connection reset", now);
    }
}
