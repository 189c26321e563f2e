pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod source;
