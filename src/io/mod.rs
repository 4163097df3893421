// Purpose - control-side text parsing, never called from the audio path

pub mod command;
pub mod tokens;

pub use command::parse_command;
pub use tokens::Tokens;
