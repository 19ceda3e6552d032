use crate::domain::filter::FilterField;
use crate::domain::ticket::{Category, Priority, Status, TicketId};
use crate::error::{AppError, AppResult};

pub const HELP: &str = "\
Tickets:
  search <text>                      search titles and descriptions (empty clears)
  filter <status|priority|category> <value|any>
  clear                              drop every filter
  list                               show the current list
  set <id> <open|in_progress|resolved|closed>
  ask <id>                           ask the AI for a solution
  dismiss                            hide the AI suggestion
Draft:
  title <text>  desc <text>  draft   edit and show the draft
  analyze                            classify the draft and review it
  category <general|technical|billing|account>
  priority <low|medium|high|critical>
  back  review  confirm              leave review, return to it, submit
Other:
  stats  help  quit";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Filter(FilterField, String),
    ClearFilters,
    List,
    SetStatus(TicketId, Status),
    Ask(TicketId),
    Dismiss,
    Title(String),
    Description(String),
    ShowDraft,
    Analyze,
    Category(Category),
    Priority(Priority),
    Back,
    Review,
    Confirm,
    Stats,
    Help,
    Quit,
}

impl Command {
    /// Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> AppResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "search" | "/" => Command::Search(rest.to_string()),
            "filter" => parse_filter(rest)?,
            "clear" => Command::ClearFilters,
            "list" | "ls" => Command::List,
            "set" => {
                let (id, status) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("set <id> <status>"))?;
                let status = Status::from_str(status)
                    .ok_or_else(|| unknown("status", status))?;
                Command::SetStatus(parse_id(id)?, status)
            }
            "ask" => Command::Ask(parse_id(rest)?),
            "dismiss" => Command::Dismiss,
            "title" => Command::Title(rest.to_string()),
            "desc" | "description" => Command::Description(rest.to_string()),
            "draft" => Command::ShowDraft,
            "analyze" => Command::Analyze,
            "category" => Command::Category(
                Category::from_str(rest).ok_or_else(|| unknown("category", rest))?,
            ),
            "priority" => Command::Priority(
                Priority::from_str(rest).ok_or_else(|| unknown("priority", rest))?,
            ),
            "back" => Command::Back,
            "review" => Command::Review,
            "confirm" | "submit" => Command::Confirm,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(AppError::Validation(format!(
                    "unknown command '{other}', try 'help'"
                )));
            }
        };
        Ok(Some(command))
    }
}

fn parse_filter(rest: &str) -> AppResult<Command> {
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    let field = FilterField::from_str(field)
        .filter(|field| *field != FilterField::Search)
        .ok_or_else(|| usage("filter <status|priority|category> <value|any>"))?;

    if value.is_empty() || value.eq_ignore_ascii_case("any") {
        return Ok(Command::Filter(field, String::new()));
    }
    let normalized = match field {
        FilterField::Status => Status::from_str(value).map(|s| s.as_str()),
        FilterField::Priority => Priority::from_str(value).map(|p| p.as_str()),
        FilterField::Category => Category::from_str(value).map(|c| c.as_str()),
        FilterField::Search => None,
    }
    .ok_or_else(|| unknown(field.as_str(), value))?;
    Ok(Command::Filter(field, normalized.to_string()))
}

fn parse_id(value: &str) -> AppResult<TicketId> {
    value
        .trim()
        .trim_start_matches('#')
        .parse()
        .map(TicketId)
        .map_err(|_| AppError::Validation(format!("'{value}' is not a ticket id")))
}

fn usage(form: &str) -> AppError {
    AppError::Validation(format!("usage: {form}"))
}

fn unknown(kind: &str, value: &str) -> AppError {
    AppError::Validation(format!("unknown {kind} '{value}'"))
}
