//! leveltrack - offline level trace
//!
//! Run with: cargo run -- "a 1000; r 50000; t 25" 0 400000 -9000000 0 0
//!
//! Samples come from the remaining arguments, or from stdin when there are
//! none. Prints one `index sample level over_threshold` line per sample.

use std::io::Read;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use leveltrack::{io::command::parse_commands, io::Tokens, LevelState, MICRO_SEC_PER_SAMPLE};

const USAGE: &str = "usage: leveltrack [-v...] \"<commands>\" [samples...]";

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let mut verbosity = 0;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if is_verbosity_flag(&arg) {
            verbosity += arg.len() - 1;
        } else {
            positional.push(arg);
        }
    }

    SimpleLogger::new()
        .with_level(match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .init()?;

    let mut args = positional.into_iter();
    let commands = args.next().ok_or_else(|| eyre!(USAGE))?;

    let mut state = LevelState::default();
    for command in parse_commands(&commands) {
        let command = command.wrap_err_with(|| format!("invalid command list \"{commands}\""))?;
        command.apply(&mut state);
    }
    info!(
        "attack {}us, release {}us, threshold {}% at {}us per sample",
        state.attack_micro_sec(),
        state.release_micro_sec(),
        state.threshold_percent(),
        MICRO_SEC_PER_SAMPLE
    );

    let samples = if args.len() > 0 {
        args.map(|arg| {
            arg.parse::<i32>()
                .wrap_err_with(|| format!("sample \"{arg}\" is not an integer"))
        })
        .collect::<EyreResult<Vec<_>>>()?
    } else {
        read_stdin_samples()?
    };
    info!("tracking {} samples", samples.len());

    println!("# index sample level over_threshold");
    for (index, &xn) in samples.iter().enumerate() {
        let level = state.update(xn);
        println!("{index} {xn} {level} {}", u8::from(state.over_threshold()));
    }

    Ok(())
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v')
}

fn read_stdin_samples() -> EyreResult<Vec<i32>> {
    let mut text = Vec::new();
    std::io::stdin()
        .read_to_end(&mut text)
        .wrap_err("failed to read samples from stdin")?;

    let mut tokens = Tokens::new(&text);
    let mut samples = Vec::new();
    while !tokens.is_exhausted() {
        samples.push(tokens.next_integer());
    }
    Ok(samples)
}
