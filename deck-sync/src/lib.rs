pub mod cli;
pub mod load_config;
pub mod workspace;

pub use cli::{run, Cli, Commands};
