//! Console commands for the headless driver.
//!
//! One command per line. Lines starting with `{` are read as JSON
//! [`ClientEvent`]s; everything else uses the short form:
//!
//! ```text
//! ready                  page-ready sequence
//! toggle                 theme toggle
//! search <query>         keystroke in the search box (empty query clears)
//! nav <href>             activate a navigation link
//! field <name> <value>   set a form field
//! submit                 submit the appointment form
//! ajax <region>          simulated ajax button
//! menu open|close        mobile menu
//! click [inside|opener]  document click
//! navbar                 navbar toggler
//! scroll <y>             scroll to offset
//! show <region>          print a region's markup
//! metrics                print collected metrics
//! quit
//! ```

use super::events::ClientEvent;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(ClientEvent),
    Show(String),
    Metrics,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for {0}")]
    MissingArgument(&'static str),

    #[error("Invalid argument for {command}: {value}")]
    InvalidArgument { command: &'static str, value: String },

    #[error("Invalid event JSON: {0}")]
    Json(String),
}

/// Parse one line. Blank lines yield `None`.
///
/// `search` takes everything after the separator verbatim, so a query may
/// start or end with spaces. Other arguments are trimmed.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let raw = line.trim_end_matches(['\r', '\n']).trim_start();
    let line = raw.trim_end();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(|event| Some(Command::Event(event)))
            .map_err(|e| CommandError::Json(e.to_string()));
    }

    let (word, raw_rest) = match raw.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (raw, ""),
    };
    let rest = raw_rest.trim();

    let command = match word {
        "ready" => Command::Event(ClientEvent::Ready),
        "toggle" => Command::Event(ClientEvent::ThemeToggled),
        "search" => Command::Event(ClientEvent::SearchInput {
            query: raw_rest.to_string(),
        }),
        "nav" => Command::Event(ClientEvent::LinkActivated {
            href: required(rest, "nav")?.to_string(),
        }),
        "field" => {
            let args = required(rest, "field")?;
            let (name, value) = match args.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value.trim()),
                None => (args, ""),
            };
            Command::Event(ClientEvent::FieldChanged {
                name: name.to_string(),
                value: value.to_string(),
            })
        }
        "submit" => Command::Event(ClientEvent::FormSubmitted),
        "ajax" => Command::Event(ClientEvent::AjaxButtonClicked {
            target: required(rest, "ajax")?.to_string(),
        }),
        "menu" => match required(rest, "menu")? {
            "open" => Command::Event(ClientEvent::MobileMenuOpened),
            "close" => Command::Event(ClientEvent::MobileMenuClosed),
            other => {
                return Err(CommandError::InvalidArgument {
                    command: "menu",
                    value: other.to_string(),
                })
            }
        },
        "click" => Command::Event(ClientEvent::DocumentClicked {
            inside_menu: rest == "inside",
            on_opener: rest == "opener",
        }),
        "navbar" => Command::Event(ClientEvent::NavbarToggled),
        "scroll" => {
            let arg = required(rest, "scroll")?;
            let offset = arg.parse().map_err(|_| CommandError::InvalidArgument {
                command: "scroll",
                value: arg.to_string(),
            })?;
            Command::Event(ClientEvent::Scrolled { offset })
        }
        "show" => Command::Show(required(rest, "show")?.to_string()),
        "metrics" => Command::Metrics,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}
