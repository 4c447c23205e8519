//! Commands typed into the live client

use std::str::FromStr;

use thiserror::Error;

use crate::model::UserId;

pub const HELP: &str = "\
Commands:
  boop <id>   boop a user
  fav <id>    star or unstar a user
  users       reload the user list
  stats       refresh your stats and the global counter
  seen        mark new boops as seen
  help        show this help
  quit        leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Boop(UserId),
    Favorite(UserId),
    Users,
    Stats,
    Seen,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{0}' needs a user id")]
    MissingId(&'static str),

    #[error("Invalid user id '{0}'")]
    InvalidId(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or("").to_ascii_lowercase();

        match name.as_str() {
            "boop" | "b" => Ok(Command::Boop(user_id(words.next(), "boop")?)),
            "fav" | "f" => Ok(Command::Favorite(user_id(words.next(), "fav")?)),
            "users" | "u" => Ok(Command::Users),
            "stats" | "s" => Ok(Command::Stats),
            "seen" => Ok(Command::Seen),
            "help" | "?" | "" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(name)),
        }
    }
}

fn user_id(word: Option<&str>, command: &'static str) -> Result<UserId, CommandError> {
    let word = word.ok_or(CommandError::MissingId(command))?;
    word.trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::InvalidId(word.to_string()))
}
