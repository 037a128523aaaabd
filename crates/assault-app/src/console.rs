//! Line commands read from stdin.
//!
//! ```text
//! press w | release w       keyboard driving keys (w a s d)
//! touch w | untouch w       on-screen driving buttons
//! fire                      shoot along the chassis heading
//! story <slug> | start      pick a storyline / start the race
//! pause | resume | restart | menu
//! scale <x>                 time scale
//! save | load | clear       session slot
//! status | dump | quit      log a summary / print the snapshot as JSON
//! ```

use std::fmt;

use assault_core::commands::PlayerCommand;
use assault_core::enums::{DriveKey, InputSource, Storyline};

use crate::state::GameLoopCommand;

#[derive(Debug)]
pub enum ConsoleCommand {
    Loop(GameLoopCommand),
    /// Log the latest snapshot summary.
    Status,
    /// Print the latest snapshot as JSON on stdout.
    Dump,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    BadKey(String),
    BadNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::UnknownCommand(c) => write!(f, "unknown command `{c}`"),
            ParseError::MissingArgument(what) => write!(f, "missing {what}"),
            ParseError::BadKey(k) => write!(f, "`{k}` is not one of w, a, s, d"),
            ParseError::BadNumber(n) => write!(f, "`{n}` is not a number"),
        }
    }
}

impl std::error::Error for ParseError {}

fn player(command: PlayerCommand) -> ConsoleCommand {
    ConsoleCommand::Loop(GameLoopCommand::PlayerCommand(command))
}

fn parse_key(arg: Option<&str>) -> Result<DriveKey, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument("key"))?;
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => DriveKey::from_char(c).ok_or_else(|| ParseError::BadKey(arg.into())),
        _ => Err(ParseError::BadKey(arg.into())),
    }
}

/// Parse one console line.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, ParseError> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
    let arg = words.next();

    let command = match verb.as_str() {
        "press" | "release" | "touch" | "untouch" => {
            let key = parse_key(arg)?;
            let source = if verb.ends_with("touch") {
                InputSource::Touch
            } else {
                InputSource::Keyboard
            };
            if verb == "press" || verb == "touch" {
                player(PlayerCommand::KeyDown { source, key })
            } else {
                player(PlayerCommand::KeyUp { source, key })
            }
        }
        "fire" => player(PlayerCommand::Fire),
        "story" => {
            let slug = arg.ok_or(ParseError::MissingArgument("storyline"))?;
            player(PlayerCommand::SelectStoryline {
                storyline: Storyline::from_slug(slug),
            })
        }
        "start" => player(PlayerCommand::StartRace),
        "restart" => player(PlayerCommand::RestartRace),
        "menu" => player(PlayerCommand::ReturnToMenu),
        "pause" => player(PlayerCommand::Pause),
        "resume" => player(PlayerCommand::Resume),
        "scale" => {
            let raw = arg.ok_or(ParseError::MissingArgument("time scale"))?;
            let scale = raw
                .parse::<f64>()
                .map_err(|_| ParseError::BadNumber(raw.into()))?;
            player(PlayerCommand::SetTimeScale { scale })
        }
        "save" => ConsoleCommand::Loop(GameLoopCommand::SaveSession),
        "load" => ConsoleCommand::Loop(GameLoopCommand::LoadSession),
        "clear" => ConsoleCommand::Loop(GameLoopCommand::ClearSession),
        "status" => ConsoleCommand::Status,
        "dump" => ConsoleCommand::Dump,
        "quit" | "exit" => ConsoleCommand::Quit,
        _ => return Err(ParseError::UnknownCommand(verb)),
    };
    Ok(command)
}
