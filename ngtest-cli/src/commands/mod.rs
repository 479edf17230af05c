//! Command handlers -- one module per subcommand

pub mod config;
pub mod render;
pub mod run;
pub mod version;
