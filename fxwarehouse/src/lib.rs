#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod app;

mod cli;
pub use cli::{Cli, Commands};

mod config;
pub use config::AppConfig;

mod import;
pub use import::import;

mod io;
pub use io::IOArgs;
