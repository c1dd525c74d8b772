//! Core of the VLC remote: wire types, the command gateway, the event bus and
//! the widget models the terminal UI is built from.

pub mod browser;
pub mod bus;
pub mod config;
pub mod error;
pub mod gateway;
pub mod media;
pub mod panels;
pub mod platform;
pub mod player;
pub mod playlist;
pub mod protocol;

pub use error::{Error, Result};
