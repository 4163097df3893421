mod level;

pub use level::{bench_level, bench_rates};
