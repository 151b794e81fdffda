//! Scryfall-backed [`CardSource`](booster_core::CardSource).

mod client;
mod config;

pub use client::ScryfallClient;
pub use config::{SourceConfig, DEFAULT_BASE_URL};
