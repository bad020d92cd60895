use std::time::Duration;

use serde::{Deserialize, Serialize};


pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(1);

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    // Pause between losing a connection and opening a new one. There is no backoff and no
    // retry limit.
    #[serde(with = "humantime_serde")]
    pub reconnect_delay: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self { ClientOptions { reconnect_delay: DEFAULT_RECONNECT_DELAY } }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_humantime() {
        let options: ClientOptions =
            serde_json::from_str(r#"{"reconnect_delay": "250ms"}"#).unwrap();
        assert_eq!(options.reconnect_delay, Duration::from_millis(250));
        let options: ClientOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ClientOptions::default());
    }
}
