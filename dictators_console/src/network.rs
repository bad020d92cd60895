// Improvement potential: Support wss:// (tungstenite `native-tls` feature).

use std::io;
use std::net::TcpStream;

use serde::Serialize;
use tungstenite::protocol::Role;
use tungstenite::{HandshakeError, Message, WebSocket};
use url::Url;


#[derive(Debug)]
pub enum CommunicationError {
    Socket(tungstenite::Error),
    Serde(serde_json::Error),
    Protocol(String),
    // Orderly close by the other side, with the reason if there was one.
    Closed(Option<String>),
}

impl From<tungstenite::Error> for CommunicationError {
    fn from(err: tungstenite::Error) -> Self { CommunicationError::Socket(err) }
}

impl From<io::Error> for CommunicationError {
    fn from(err: io::Error) -> Self { CommunicationError::Socket(tungstenite::Error::Io(err)) }
}

impl CommunicationError {
    // Human-readable close reason.
    pub fn reason(&self) -> String {
        match self {
            CommunicationError::Socket(err) => err.to_string(),
            CommunicationError::Serde(err) => err.to_string(),
            CommunicationError::Protocol(message) => message.clone(),
            CommunicationError::Closed(Some(reason)) => reason.clone(),
            CommunicationError::Closed(None) => String::new(),
        }
    }
}

// Returns two handles to the same socket: one for reading and one for writing, so that they
// can live in different threads.
pub fn connect(
    server_url: &str,
) -> Result<(WebSocket<TcpStream>, WebSocket<TcpStream>), CommunicationError> {
    let url = Url::parse(server_url)
        .map_err(|err| CommunicationError::Protocol(format!("Invalid URL {server_url}: {err}")))?;
    if url.scheme() != "ws" {
        return Err(CommunicationError::Protocol(format!("Unsupported scheme: {}", url.scheme())));
    }
    let host = url
        .host_str()
        .ok_or_else(|| CommunicationError::Protocol(format!("No host in {server_url}")))?;
    let port = url.port_or_known_default().unwrap_or(80);
    let stream = TcpStream::connect((host, port))?;
    let (socket_in, _) = tungstenite::client(server_url, stream).map_err(|err| match err {
        HandshakeError::Failure(err) => CommunicationError::Socket(err),
        HandshakeError::Interrupted(_) => {
            CommunicationError::Protocol("Websocket handshake interrupted".to_owned())
        }
    })?;
    let socket_out = clone_websocket(&socket_in, Role::Client)?;
    Ok((socket_in, socket_out))
}

pub fn write_obj<T: Serialize>(
    socket: &mut WebSocket<TcpStream>, obj: &T,
) -> Result<(), CommunicationError> {
    let serialized = serde_json::to_string(obj).map_err(CommunicationError::Serde)?;
    socket.send(Message::text(serialized))?;
    Ok(())
}

// Reads the next text frame. Control frames are handled by tungstenite; binary frames are
// not part of the protocol and are skipped.
pub fn read_text(socket: &mut WebSocket<TcpStream>) -> Result<String, CommunicationError> {
    loop {
        match socket.read()? {
            Message::Text(text) => return Ok(text.as_str().to_owned()),
            Message::Close(frame) => {
                return Err(CommunicationError::Closed(frame.map(|f| f.reason.as_str().to_owned())));
            }
            Message::Binary(data) => {
                log::warn!("Skipping binary frame ({} bytes)", data.len());
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
}

pub fn close(socket: &mut WebSocket<TcpStream>) -> Result<(), CommunicationError> {
    socket.close(None)?;
    socket.flush()?;
    Ok(())
}

// Improvement potential: Call `TcpStream::set_nonblocking` and do reads and writes in the same
// thread instead of cloning the socket.
fn clone_websocket(
    socket: &WebSocket<TcpStream>, role: Role,
) -> Result<WebSocket<TcpStream>, CommunicationError> {
    let stream = socket.get_ref().try_clone()?;
    Ok(WebSocket::from_raw_socket(stream, role, None))
}
