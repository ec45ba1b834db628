pub mod config;
pub mod files;

pub use config::handle_config_command;
pub use files::handle_file_command;
