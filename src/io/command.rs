//! Control-channel command decoding.
//!
//! One command per line, selected by its first character:
//!
//! ```text
//! a <micro_sec>   attack time constant
//! r <micro_sec>   release time constant
//! t <percent>     threshold, 0..=100 percent of MAX_LEVEL
//! l <level>       threshold in the Q29 level domain
//! z               reset the tracked level
//! ```
//!
//! The value may follow the letter directly (`a1000`) and must start with a
//! sign or digit; anything after it is rejected. Letters are
//! case-insensitive.

use log::debug;

use super::tokens::{is_space, Tokens};
use crate::{control::LevelCommand, Error, MAX_LEVEL};

/// Decode a single command line. Anything left after the command is an error.
pub fn parse_command(line: &str) -> Result<LevelCommand, Error> {
    let mut tokens = Tokens::from(line);
    let command = parse_tokens(&mut tokens)?;
    if !tokens.is_exhausted() {
        return Err(Error::TrailingInput(command_char(line)));
    }
    debug!("'{}' -> {command:?}", line.trim());
    Ok(command)
}

/// Decode every `;`- or newline-separated command in `text`, skipping blank
/// entries.
pub fn parse_commands(text: &str) -> impl Iterator<Item = Result<LevelCommand, Error>> + '_ {
    text.split([';', '\n'])
        .filter(|line| !line.trim().is_empty())
        .map(parse_command)
}

/// Decode the next command from an open token stream, leaving the cursor
/// after its value.
pub fn parse_tokens(tokens: &mut Tokens) -> Result<LevelCommand, Error> {
    let command = match tokens.next_char() {
        0 => return Err(Error::EmptyCommand),
        c => char::from(c),
    };

    match command.to_ascii_lowercase() {
        'a' => Ok(LevelCommand::SetAttack(time_value(tokens, command)?)),
        'r' => Ok(LevelCommand::SetRelease(time_value(tokens, command)?)),
        't' => {
            let value = value(tokens, command)?;
            u8::try_from(value)
                .ok()
                .filter(|percent| *percent <= 100)
                .map(LevelCommand::SetThresholdPercent)
                .ok_or(Error::ValueOutOfRange { command, value })
        }
        'l' => {
            let value = value(tokens, command)?;
            if (0..=MAX_LEVEL).contains(&value) {
                Ok(LevelCommand::SetThreshold(value))
            } else {
                Err(Error::ValueOutOfRange { command, value })
            }
        }
        'z' => Ok(LevelCommand::Reset),
        _ => Err(Error::UnknownCommand(command)),
    }
}

/// The tokenizer returns 0 both for exhausted input and for tokens that are
/// not numbers, so check the token before reading it.
fn value(tokens: &mut Tokens, command: char) -> Result<i32, Error> {
    let remaining = tokens.remaining();
    let token = &remaining[remaining.iter().take_while(|&&b| is_space(b)).count()..];
    if token.is_empty() {
        return Err(Error::MissingValue(command));
    }
    if !starts_with_number(token) {
        return Err(Error::InvalidValue(command));
    }
    Ok(tokens.next_integer())
}

fn time_value(tokens: &mut Tokens, command: char) -> Result<u32, Error> {
    let value = value(tokens, command)?;
    u32::try_from(value).map_err(|_| Error::ValueOutOfRange { command, value })
}

/// An optional sign followed by at least one digit.
fn starts_with_number(token: &[u8]) -> bool {
    let digits = match token.first() {
        Some(b'+' | b'-') => &token[1..],
        _ => token,
    };
    digits.first().is_some_and(u8::is_ascii_digit)
}

fn command_char(line: &str) -> char {
    line.bytes()
        .find(|&b| !is_space(b))
        .map(char::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_command() {
        assert_eq!(parse_command("a 1000"), Ok(LevelCommand::SetAttack(1_000)));
        assert_eq!(parse_command("  R\t250000\n"), Ok(LevelCommand::SetRelease(250_000)));
        assert_eq!(parse_command("t 75"), Ok(LevelCommand::SetThresholdPercent(75)));
        assert_eq!(parse_command("l 4096"), Ok(LevelCommand::SetThreshold(4_096)));
        assert_eq!(parse_command("z"), Ok(LevelCommand::Reset));
    }

    #[test]
    fn value_may_follow_letter() {
        assert_eq!(parse_command("a1000"), Ok(LevelCommand::SetAttack(1_000)));
        assert_eq!(parse_command("t0"), Ok(LevelCommand::SetThresholdPercent(0)));
    }

    #[test]
    fn zero_is_a_value_not_a_missing_one() {
        assert_eq!(parse_command("a 0"), Ok(LevelCommand::SetAttack(0)));
        assert_eq!(parse_command("a   "), Err(Error::MissingValue('a')));
        assert_eq!(parse_command("t"), Err(Error::MissingValue('t')));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command(""), Err(Error::EmptyCommand));
        assert_eq!(parse_command("   "), Err(Error::EmptyCommand));
        assert_eq!(parse_command("q 1"), Err(Error::UnknownCommand('q')));
        assert_eq!(
            parse_command("a -5"),
            Err(Error::ValueOutOfRange { command: 'a', value: -5 })
        );
        assert_eq!(
            parse_command("T 101"),
            Err(Error::ValueOutOfRange { command: 'T', value: 101 })
        );
        assert_eq!(
            parse_command("l -1"),
            Err(Error::ValueOutOfRange { command: 'l', value: -1 })
        );
    }

    #[test]
    fn rejects_values_that_are_not_numbers() {
        assert_eq!(parse_command("a foo"), Err(Error::InvalidValue('a')));
        assert_eq!(parse_command("attack 1000"), Err(Error::InvalidValue('a')));
        assert_eq!(parse_command("r -"), Err(Error::InvalidValue('r')));
        assert_eq!(parse_command("t +x"), Err(Error::InvalidValue('t')));
        assert_eq!(parse_command("a +250"), Ok(LevelCommand::SetAttack(250)));
        assert_eq!(parse_command("a 12ms"), Ok(LevelCommand::SetAttack(12)));
    }

    #[test]
    fn rejects_leftover_tokens() {
        assert_eq!(parse_command("a 1000 2000"), Err(Error::TrailingInput('a')));
        assert_eq!(parse_command("  z now"), Err(Error::TrailingInput('z')));
        assert_eq!(parse_command("l 5 \t\n"), Ok(LevelCommand::SetThreshold(5)));
    }

    #[test]
    fn token_stream_keeps_going() {
        let mut tokens = Tokens::from("a 10 r 20");
        assert_eq!(parse_tokens(&mut tokens), Ok(LevelCommand::SetAttack(10)));
        assert_eq!(parse_tokens(&mut tokens), Ok(LevelCommand::SetRelease(20)));
        assert_eq!(parse_tokens(&mut tokens), Err(Error::EmptyCommand));
    }

    #[test]
    fn splits_command_lists() {
        let messages: Vec<_> = parse_commands("a 10; r 20\n\n t 30;").collect();
        assert_eq!(
            messages,
            vec![
                Ok(LevelCommand::SetAttack(10)),
                Ok(LevelCommand::SetRelease(20)),
                Ok(LevelCommand::SetThresholdPercent(30)),
            ]
        );
    }
}
