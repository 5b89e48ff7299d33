// Console commands - Text stand-ins for the page controls
use crate::application::dashboard_controller::UiEvent;
use crate::application::page::Surface;
use crate::domain::range::parse_date;
use thiserror::Error;

pub const HELP: &str = "commands: range [<YYYY-MM-DD> [<YYYY-MM-DD>]] | clear | top <n> | export <total|templates|range|weekdays> | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("a range takes at most two dates")]
    TooManyDates,
    #[error("unknown chart `{0}`")]
    UnknownChart(String),
}

fn parse_surface(name: &str) -> Result<Surface, CommandError> {
    match name {
        "total" => Ok(Surface::Total),
        "templates" => Ok(Surface::Templates),
        "range" => Ok(Surface::TemplatesRange),
        "weekdays" => Ok(Surface::Weekdays),
        other => Err(CommandError::UnknownChart(other.to_string())),
    }
}

/// Blank lines parse to `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name {
        "range" => {
            if args.len() > 2 {
                return Err(CommandError::TooManyDates);
            }
            let dates = args
                .iter()
                .map(|a| parse_date(a).map_err(|_| CommandError::InvalidDate(a.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            Command::Event(UiEvent::RangeChanged(dates))
        }
        "clear" => Command::Event(UiEvent::ClearRange),
        "top" => Command::Event(UiEvent::ItemCountChanged(args.first().copied().unwrap_or_default().to_string())),
        "export" => {
            let chart = args.first().copied().unwrap_or_default();
            Command::Event(UiEvent::Export(parse_surface(chart)?))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}
