//! Deploys the mock ERC-721 contract to a development node and checks that it
//! behaves: reads its name, symbol and the caller's balance, mints ten tokens
//! to the caller and reads the balance again.
pub mod config;
pub mod erc721;
pub mod prompt;
mod runner;

pub use config::Config;
pub use runner::{run, SmokeReport};
