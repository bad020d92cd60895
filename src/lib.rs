// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod client;
pub mod connection;
pub mod coord;
pub mod dirty;
pub mod error;
pub mod event;
pub mod options;
pub mod player;
pub mod premove;
pub mod roster;
pub mod store;
