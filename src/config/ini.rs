//! INI configuration parser.
//!
//! The accepted dialect:
//!
//! ```text
//! ; comment
//! [General]
//! type = "IntroBlocks"        # strings are double-quoted
//!
//! [BlockProperties]
//! nrXBlocks = 8               # integers
//! colorWhite = (1.0, 1.0, 1)  # tuples of numbers, stored as doubles
//! invertColors = false        # booleans, case-insensitive
//! ```

use crate::error::{PatgenError, Result};

use super::location::offset_to_location;
use super::{Configuration, Value};

/// Parse INI source text into a configuration tree.
pub fn parse_ini(source: &str) -> Result<Configuration> {
    let mut config = Configuration::new();
    let mut current: Option<String> = None;
    let mut line_start = 0;

    for raw_line in source.split_inclusive('\n') {
        let line = raw_line.trim_end_matches(&['\n', '\r'][..]);
        let indent = line.len() - line.trim_start().len();
        let trimmed = line.trim();
        let at = |col: usize| line_start + col;

        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            line_start += raw_line.len();
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('[') {
            let close = rest.find(']').ok_or_else(|| {
                error(
                    source,
                    at(indent),
                    "Unclosed section header",
                    Some("Write section headers as [Name]"),
                )
            })?;

            let name = rest[..close].trim();
            if name.is_empty() {
                return Err(error(source, at(indent), "Empty section name", None));
            }

            let trailing = rest[close + 1..].trim_start();
            if !is_comment_or_empty(trailing) {
                return Err(error(
                    source,
                    at(indent + 1 + close + 1),
                    "Unexpected text after section header",
                    None,
                ));
            }

            if !config.add_section(name) {
                return Err(error(
                    source,
                    at(indent),
                    &format!("Duplicate section [{}]", name),
                    None,
                ));
            }
            current = Some(name.to_string());
        } else {
            let Some(section) = &current else {
                return Err(error(
                    source,
                    at(indent),
                    "Key outside of any section",
                    Some("Add a [Section] header before the first key"),
                ));
            };

            let eq = line.find('=').ok_or_else(|| {
                error(
                    source,
                    at(indent),
                    "Expected key = value",
                    None,
                )
            })?;

            let key = line[..eq].trim();
            if key.is_empty() || key.contains(char::is_whitespace) {
                return Err(error(
                    source,
                    at(indent),
                    &format!("Invalid key name '{}'", key),
                    None,
                ));
            }

            let mut cursor = Cursor {
                text: line,
                pos: eq + 1,
            };
            let value = cursor
                .value()
                .map_err(|(pos, message, help)| error(source, at(pos), &message, help))?;
            cursor.skip_whitespace();
            if !is_comment_or_empty(cursor.rest()) {
                return Err(error(
                    source,
                    at(cursor.pos),
                    "Unexpected text after value",
                    Some("Use ; or # to start a comment"),
                ));
            }

            if config.insert(section, key, value).is_some() {
                return Err(error(
                    source,
                    at(indent),
                    &format!("Duplicate key '{}' in [{}]", key, section),
                    None,
                ));
            }
        }

        line_start += raw_line.len();
    }

    Ok(config)
}

fn is_comment_or_empty(s: &str) -> bool {
    s.is_empty() || s.starts_with(';') || s.starts_with('#')
}

fn error(source: &str, offset: usize, message: &str, help: Option<&str>) -> PatgenError {
    PatgenError::Parse {
        location: offset_to_location(source, offset).to_string(),
        message: message.to_string(),
        help: help.map(str::to_string),
    }
}

/// Error raised while scanning a value: (byte position in line, message, help).
type ValueError = (usize, String, Option<&'static str>);

/// Scans a single value from the right-hand side of a `key = value` line.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn value(&mut self) -> std::result::Result<Value, ValueError> {
        self.skip_whitespace();
        match self.peek() {
            None | Some(';') | Some('#') => Err((self.pos, "Missing value".to_string(), None)),
            Some('"') => self.string().map(Value::String),
            Some('(') => self.tuple().map(Value::Tuple),
            Some(_) => self.scalar(),
        }
    }

    fn string(&mut self) -> std::result::Result<String, ValueError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err((start, "Unterminated string".to_string(), None)),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    other => {
                        return Err((
                            self.pos.saturating_sub(2),
                            format!("Unknown escape sequence '\\{}'", other.unwrap_or(' ')),
                            Some("Supported escapes are \\\", \\\\, \\n and \\t"),
                        ))
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn tuple(&mut self) -> std::result::Result<Vec<f64>, ValueError> {
        let start = self.pos;
        self.bump();
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(items);
        }

        loop {
            self.skip_whitespace();
            let token_start = self.pos;
            let token = self.token(&[',', ')']);
            let number = parse_number(token).ok_or_else(|| -> ValueError {
                (
                    token_start,
                    format!("Expected a number in tuple, found '{}'", token),
                    None,
                )
            })?;
            items.push(number);

            self.skip_whitespace();
            match self.bump() {
                Some(',') => continue,
                Some(')') => return Ok(items),
                _ => {
                    return Err((
                        start,
                        "Unterminated tuple".to_string(),
                        Some("Close tuples with ), e.g. (1.0, 0.5, 0.0)"),
                    ))
                }
            }
        }
    }

    fn scalar(&mut self) -> std::result::Result<Value, ValueError> {
        let start = self.pos;
        let token = self.token(&[';', '#']);

        if token.eq_ignore_ascii_case("true") {
            return Ok(Value::Bool(true));
        }
        if token.eq_ignore_ascii_case("false") {
            return Ok(Value::Bool(false));
        }
        if let Ok(n) = token.parse::<i64>() {
            return Ok(Value::Int(n));
        }
        if let Some(n) = parse_number(token) {
            return Ok(Value::Double(n));
        }

        Err((
            start,
            format!("Unrecognised value '{}'", token),
            Some("Wrap string values in double quotes"),
        ))
    }

    /// Consume characters up to whitespace or one of `stops`.
    fn token(&mut self, stops: &[char]) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !stops.contains(&c))
        {
            self.bump();
        }
        &self.text[start..self.pos]
    }
}

/// Parse a finite number; `inf` and `NaN` are rejected.
fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}
