mod tokens;

pub use tokens::{bench_commands, bench_tokens};
