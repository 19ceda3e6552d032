use std::io::{self, BufRead, Write};

use crate::error::{AppError, AppResult};

pub enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

/// Asks for one value on stdin. Enter keeps the current value and `-` clears
/// it.
pub fn prompt(field: &str, current: Option<&str>) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match current {
        Some(value) => write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    Ok(parse_answer(&read_answer(field)?))
}

/// Asks for free text, showing `current` as the default.
pub fn ask_text(field: &str, current: &str) -> AppResult<String> {
    let mut stdout = io::stdout();
    if current.is_empty() {
        write!(stdout, "{field}: ")?;
    } else {
        write!(stdout, "{field} [{current}]: ")?;
    }
    stdout.flush()?;

    let answer = read_answer(field)?;
    let trimmed = answer.trim();
    Ok(if trimmed.is_empty() {
        current.to_string()
    } else {
        trimmed.to_string()
    })
}

fn read_answer(field: &str) -> AppResult<String> {
    read_answer_from(&mut io::stdin().lock(), field)
}

/// Reads one line. A closed input is an error so callers never mistake it
/// for an empty answer.
fn read_answer_from(reader: &mut impl BufRead, field: &str) -> AppResult<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(AppError::InputClosed(field.to_lowercase()));
    }
    Ok(input)
}

fn parse_answer(input: &str) -> PromptAction {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PromptAction::Keep
    } else if trimmed == "-" {
        PromptAction::Clear
    } else {
        PromptAction::Set(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interprets_answers() {
        assert!(matches!(parse_answer("\n"), PromptAction::Keep));
        assert!(matches!(parse_answer(" - \n"), PromptAction::Clear));
        assert!(matches!(parse_answer(" high\n"), PromptAction::Set(v) if v == "high"));
    }

    #[test]
    fn closed_input_is_not_an_empty_answer() {
        let mut closed = io::Cursor::new(Vec::<u8>::new());
        let err = read_answer_from(&mut closed, "Subject").unwrap_err();
        assert!(matches!(err, AppError::InputClosed(field) if field == "subject"));

        let mut blank = io::Cursor::new(b"\n".to_vec());
        assert_eq!(read_answer_from(&mut blank, "Subject").unwrap(), "\n");
    }
}
