//! Terminal command parsing.
//!
//! One command per line. The command word is case-insensitive; arguments
//! are whitespace-separated except for `rename`, which takes the rest of
//! the line as the new name.

use hatchling_types::{InteractionKind, PetAction, SkillKind};

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  feed | play | clean | rest | train | heal
  skill <intelligence|agility|strength|charm>
  interact <pet|double-click|drag|pat>
  rename <name>
  hatch [name] [species]
  status | help | quit";

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Dispatch an action to the pet.
    Action(PetAction),
    /// Hatch a new pet.
    Hatch {
        /// Name for the new pet.
        name: Option<String>,
        /// Species for the new pet.
        species: Option<String>,
    },
    /// Print the current pet.
    Status,
    /// Print the command list.
    Help,
    /// Save and exit.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The line was blank.
    #[error("empty command")]
    Empty,

    /// The command word is not recognized.
    #[error("unknown command `{0}` (type `help` for a list)")]
    UnknownCommand(String),

    /// A required argument was left out.
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        /// The command that was typed.
        command: &'static str,
        /// What the argument should be.
        expected: &'static str,
    },

    /// The skill name is not recognized.
    #[error("unknown skill `{0}`")]
    UnknownSkill(String),

    /// The interaction name is not recognized.
    #[error("unknown interaction `{0}`")]
    UnknownInteraction(String),
}

/// Parse one line of input.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));
    if word.is_empty() {
        return Err(InputError::Empty);
    }

    let input = match word.to_ascii_lowercase().as_str() {
        "feed" => Input::Action(PetAction::Feed),
        "play" => Input::Action(PetAction::Play),
        "clean" | "bath" => Input::Action(PetAction::Clean),
        "rest" | "sleep" => Input::Action(PetAction::Rest),
        "train" => Input::Action(PetAction::Train),
        "heal" => Input::Action(PetAction::Heal),
        "skill" => {
            let name = first_argument(rest, "skill", "a skill name")?;
            let skill =
                SkillKind::from_name(name).ok_or_else(|| InputError::UnknownSkill(name.to_owned()))?;
            Input::Action(PetAction::TrainSkill(skill))
        }
        "interact" => {
            let name = first_argument(rest, "interact", "an interaction name")?;
            let kind = InteractionKind::from_name(name)
                .ok_or_else(|| InputError::UnknownInteraction(name.to_owned()))?;
            Input::Action(PetAction::Interact(kind))
        }
        "rename" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument {
                    command: "rename",
                    expected: "a name",
                });
            }
            Input::Action(PetAction::Rename(rest.to_owned()))
        }
        "hatch" => {
            let (name, species) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(n, s)| (n, s.trim()));
            Input::Hatch {
                name: non_empty(name),
                species: non_empty(species),
            }
        }
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => return Err(InputError::UnknownCommand(word.to_owned())),
    };
    Ok(input)
}

fn first_argument<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, InputError> {
    rest.split_whitespace()
        .next()
        .ok_or(InputError::MissingArgument { command, expected })
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}
