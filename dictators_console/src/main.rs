// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod client_main;
mod keymap;
mod network;
mod summary;

use anyhow::Context;
use clap::{Command, arg};
use dictators_client::options::ClientOptions;


fn main() -> anyhow::Result<()> {
    // The terminal is in raw mode while the client runs, so logs go to stderr only.
    // Run as `dictators_console client ... 2>client.log` to keep them.
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Dictators")
        .version(clap::crate_version!())
        .about("Dictators console client")
        .subcommand_required(true)
        .subcommand(
            Command::new("client")
                .about("Join a game room")
                .arg(arg!(<server_url> "Room websocket URL, e.g. ws://localhost:8000/ws/game/1/"))
                .arg(arg!(<player_name> "Player name"))
                .arg(arg!(--"config" <config_file> "Path to yaml-serialized ClientOptions")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("client", sub_matches)) => {
            let options = match sub_matches.get_one::<String>("config") {
                Some(filename) => read_config_file(filename)?,
                None => ClientOptions::default(),
            };
            client_main::run(client_main::ClientConfig {
                server_url: sub_matches.get_one::<String>("server_url").unwrap().clone(),
                player_name: sub_matches.get_one::<String>("player_name").unwrap().clone(),
                options,
            })
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn read_config_file(filename: &str) -> anyhow::Result<ClientOptions> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read config file '{filename}'"))?;
    serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse config file '{filename}'"))
}
