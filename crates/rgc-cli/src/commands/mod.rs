pub mod config;

pub use config::{handle_config_command, ConfigCommand};
