use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use instant::Instant;

use crate::event::ClientEvent;


// Identifies one socket instance. A new id is allocated for every connection attempt, so
// notifications from a socket that has since been replaced can be recognized and dropped.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl fmt::Debug for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "conn#{}", self.0) }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConnectionState {
    Disconnected,
    Connecting(ConnectionId),
    Open(ConnectionId),
    Closing(ConnectionId),
}

// Requests to the I/O layer. The I/O layer reports back via `on_open` / `on_close` and by
// passing inbound frames tagged with the same id.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ConnectionCommand {
    Open(ConnectionId),
    Send(ConnectionId, ClientEvent),
    Close(ConnectionId),
}

pub struct ConnectionManager {
    state: ConnectionState,
    next_id: u64,
    reconnect_delay: Duration,
    reconnect_at: Option<Instant>,
    commands: VecDeque<ConnectionCommand>,
}

impl ConnectionManager {
    pub fn new(reconnect_delay: Duration) -> Self {
        ConnectionManager {
            state: ConnectionState::Disconnected,
            next_id: 1,
            reconnect_delay,
            reconnect_at: None,
            commands: VecDeque::new(),
        }
    }

    pub fn state(&self) -> ConnectionState { self.state }
    pub fn reconnect_at(&self) -> Option<Instant> { self.reconnect_at }

    pub fn current_id(&self) -> Option<ConnectionId> {
        match self.state {
            ConnectionState::Disconnected => None,
            ConnectionState::Connecting(id)
            | ConnectionState::Open(id)
            | ConnectionState::Closing(id) => Some(id),
        }
    }

    // Whether inbound frames from `id` should be processed.
    pub fn is_current(&self, id: ConnectionId) -> bool { self.state == ConnectionState::Open(id) }

    pub fn next_command(&mut self) -> Option<ConnectionCommand> { self.commands.pop_front() }

    // Single-flight: does nothing unless disconnected. Returns the id of the new attempt.
    pub fn connect(&mut self) -> Option<ConnectionId> {
        if self.state != ConnectionState::Disconnected {
            log::debug!("Connect requested in {:?}, ignoring", self.state);
            return None;
        }
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        self.reconnect_at = None;
        self.state = ConnectionState::Connecting(id);
        self.commands.push_back(ConnectionCommand::Open(id));
        log::info!("Connecting ({:?})...", id);
        Some(id)
    }

    pub fn on_open(&mut self, id: ConnectionId) -> bool {
        if self.state != ConnectionState::Connecting(id) {
            log::debug!("Ignoring open of {:?} in {:?}", id, self.state);
            return false;
        }
        self.state = ConnectionState::Open(id);
        log::info!("Connection {:?} open", id);
        true
    }

    // Any close schedules a reconnect, be it an error, a server-side close or our own `close`.
    pub fn on_close(&mut self, id: ConnectionId, now: Instant) -> bool {
        if self.current_id() != Some(id) {
            log::debug!("Ignoring close of {:?} in {:?}", id, self.state);
            return false;
        }
        self.state = ConnectionState::Disconnected;
        self.reconnect_at = Some(now + self.reconnect_delay);
        log::info!("Connection {:?} closed, reconnecting in {:?}", id, self.reconnect_delay);
        true
    }

    pub fn close(&mut self) {
        if let ConnectionState::Open(id) = self.state {
            self.state = ConnectionState::Closing(id);
            self.commands.push_back(ConnectionCommand::Close(id));
        }
    }

    pub fn send(&mut self, event: ClientEvent) -> bool {
        let ConnectionState::Open(id) = self.state else {
            log::warn!("Cannot send {:?}: no open connection ({:?})", event, self.state);
            return false;
        };
        self.commands.push_back(ConnectionCommand::Send(id, event));
        true
    }

    // Fires the pending reconnect, if it's due. Returns the id of the new attempt.
    pub fn poll_timer(&mut self, now: Instant) -> Option<ConnectionId> {
        match self.reconnect_at {
            Some(t) if now >= t => {
                self.reconnect_at = None;
                self.connect()
            }
            _ => None,
        }
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DELAY: Duration = Duration::from_secs(1);

    fn drain(manager: &mut ConnectionManager) -> Vec<ConnectionCommand> {
        std::iter::from_fn(|| manager.next_command()).collect()
    }

    #[test]
    fn connect_is_single_flight() {
        let mut m = ConnectionManager::new(DELAY);
        let id = m.connect().unwrap();
        assert_eq!(m.connect(), None);
        assert!(m.on_open(id));
        assert_eq!(m.connect(), None);
        assert_eq!(drain(&mut m), vec![ConnectionCommand::Open(id)]);
        assert_eq!(m.state(), ConnectionState::Open(id));
    }

    #[test]
    fn close_schedules_one_reconnect() {
        let t0 = Instant::now();
        let mut m = ConnectionManager::new(DELAY);
        let id1 = m.connect().unwrap();
        m.on_open(id1);
        drain(&mut m);

        assert!(m.on_close(id1, t0));
        assert!(!m.on_close(id1, t0));
        assert_eq!(m.reconnect_at(), Some(t0 + DELAY));
        assert_eq!(m.poll_timer(t0 + DELAY / 2), None);
        assert!(drain(&mut m).is_empty());

        let id2 = m.poll_timer(t0 + DELAY).unwrap();
        assert_ne!(id1, id2);
        assert_eq!(m.poll_timer(t0 + DELAY * 5), None);
        assert_eq!(drain(&mut m), vec![ConnectionCommand::Open(id2)]);
    }

    #[test]
    fn failed_attempt_is_retried() {
        let t0 = Instant::now();
        let mut m = ConnectionManager::new(DELAY);
        let id1 = m.connect().unwrap();
        assert!(m.on_close(id1, t0));
        let id2 = m.poll_timer(t0 + DELAY).unwrap();
        assert!(m.on_close(id2, t0 + DELAY));
        let id3 = m.poll_timer(t0 + DELAY * 2).unwrap();
        assert_eq!(m.state(), ConnectionState::Connecting(id3));
    }

    #[test]
    fn stale_notifications_are_ignored() {
        let t0 = Instant::now();
        let mut m = ConnectionManager::new(DELAY);
        let old = m.connect().unwrap();
        m.on_open(old);
        m.on_close(old, t0);
        let new = m.poll_timer(t0 + DELAY).unwrap();
        assert!(!m.on_open(old));
        assert!(!m.on_close(old, t0 + DELAY));
        assert_eq!(m.state(), ConnectionState::Connecting(new));
        assert!(m.on_open(new));
        assert!(m.is_current(new));
        assert!(!m.is_current(old));
    }

    #[test]
    fn user_close_also_reconnects() {
        let t0 = Instant::now();
        let mut m = ConnectionManager::new(DELAY);
        let id = m.connect().unwrap();
        m.on_open(id);
        m.close();
        assert_eq!(m.state(), ConnectionState::Closing(id));
        assert!(!m.is_current(id));
        assert!(!m.send(ClientEvent::JoinRoom("a".to_owned())));
        assert!(m.on_close(id, t0));
        assert!(m.poll_timer(t0 + DELAY).is_some());
        assert_eq!(drain(&mut m), vec![
            ConnectionCommand::Open(id),
            ConnectionCommand::Close(id),
            ConnectionCommand::Open(m.current_id().unwrap()),
        ]);
    }
}
