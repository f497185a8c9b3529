//! Line-oriented prompting and field parsing for the menu.
//!
//! Every prompt accepts `x` (any case) to cancel the current operation.
//! Record ids use the four-digit format of the printed catalogue.

use std::io::{BufRead, Write};

/// One answer read from the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Trimmed line text.
    Text(String),
    /// User typed `x`.
    Cancel,
    /// Input stream ended.
    Closed,
}

impl Reply {
    /// Returns the text, or `None` for cancel/closed.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Cancel | Self::Closed => None,
        }
    }
}

/// Prompt/answer pair over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` and reads one trimmed line.
    pub fn ask(&mut self, message: &str) -> anyhow::Result<Reply> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Reply::Closed);
        }

        let text = line.trim();
        if text.eq_ignore_ascii_case("x") {
            writeln!(self.output, "Operation cancelled.")?;
            return Ok(Reply::Cancel);
        }
        Ok(Reply::Text(text.to_string()))
    }

    /// Asks until `parse` accepts the answer. `None` means cancelled.
    pub fn ask_parsed<T>(
        &mut self,
        message: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> anyhow::Result<Option<T>> {
        loop {
            let Some(text) = self.ask(message)?.into_text() else {
                return Ok(None);
            };
            match parse(&text) {
                Ok(value) => return Ok(Some(value)),
                Err(problem) => self.say(&format!("{problem}\n"))?,
            }
        }
    }

    /// Asks a yes/no question. `None` means cancelled.
    pub fn confirm(&mut self, message: &str) -> anyhow::Result<Option<bool>> {
        self.ask_parsed(message, |text| match text.to_ascii_lowercase().as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err("Please type 'yes' or 'no'.".to_string()),
        })
    }

    pub fn say(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}

/// Parses a record id typed as exactly four digits.
pub fn parse_record_id(label: &str, text: &str) -> Result<i64, String> {
    if text.is_empty() {
        return Err(format!("{label} ID is required."));
    }
    if text.len() != 4 || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(format!("{label} ID must be a 4-digit number."));
    }
    text.parse::<i64>()
        .map_err(|_| format!("{label} ID must be a 4-digit number."))
}

/// Parses a quantity. Range checks belong to the inventory service.
pub fn parse_quantity(text: &str) -> Result<i64, String> {
    if text.is_empty() {
        return Err("Quantity is required.".to_string());
    }
    text.parse::<i64>()
        .map_err(|_| "Invalid input. Please enter a numeric quantity.".to_string())
}

pub fn parse_required_text(label: &str, text: &str) -> Result<String, String> {
    if text.is_empty() {
        return Err(format!("{label} cannot be empty."));
    }
    Ok(text.to_string())
}
