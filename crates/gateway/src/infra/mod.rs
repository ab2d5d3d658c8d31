pub mod cli;
pub mod config;
pub mod dex;
pub mod executor;
pub mod tokens;
