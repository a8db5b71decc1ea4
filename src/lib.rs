// Library root
// -----------
// This crate exposes a small library surface for the Mastermind CLI. The
// binary (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `config`: server base URL, timeout and response size cap.
// - `error`: error types for the codec and the HTTP client.
// - `protocol`: JSON wire types and the encode/decode functions.
// - `guess`: guess validation and B/W feedback rendering.
// - `api`: HTTP calls to the game server behind the `GameApi` trait.
// - `ui`: console I/O (interactive terminal or plain lines).
// - `game`: the session loop that ties everything together.
// - `logging`: tracing setup for diagnostics on stderr.
//
// The session only sees the `GameApi` and `Console` traits, so the whole
// game loop can be driven in tests without a network or a terminal.
pub mod api;
pub mod config;
pub mod error;
pub mod game;
pub mod guess;
pub mod logging;
pub mod protocol;
pub mod ui;
