use std::fmt;

use miette::Diagnostic;
use thiserror::Error;
use time::{macros::format_description, Date};

pub const DEGREE_SYMBOL: &str = "°C";

/// A temperature in degrees Celsius, already rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Celsius(pub f64);

impl Celsius {
    pub fn from_fahrenheit(temp_f: f64) -> Self {
        Self(convert_f_to_c(temp_f))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("Invalid ISO date `{input}`: {source}")]
    #[diagnostic(
        code(weather::convert::invalid_date),
        help("dates must be written as YYYY-MM-DD")
    )]
    InvalidDate {
        input: String,
        source: time::error::Parse,
    },
    #[error("Could not render date: {0}")]
    #[diagnostic(code(weather::convert::render))]
    Render(#[from] time::error::Format),
}

/// Converts Fahrenheit to Celsius, rounded half-to-even to one decimal.
pub fn convert_f_to_c(temp_f: f64) -> f64 {
    let celsius = (temp_f - 32.0) * 5.0 / 9.0;
    (celsius * 10.0).round_ties_even() / 10.0
}

/// Appends the degree Celsius symbol. No rounding is done here.
pub fn format_temperature(temp: impl fmt::Display) -> String {
    format!("{temp}{DEGREE_SYMBOL}")
}

pub fn parse_iso_date(iso_date: &str) -> Result<Date, FormatError> {
    Date::parse(iso_date, format_description!("[year]-[month]-[day]")).map_err(|source| {
        FormatError::InvalidDate {
            input: iso_date.to_string(),
            source,
        }
    })
}

/// Turns `2021-07-06` into `Tuesday 06 July 2021`.
pub fn convert_date(iso_date: &str) -> Result<String, FormatError> {
    let date = parse_iso_date(iso_date)?;
    let human = date.format(format_description!(
        "[weekday] [day] [month repr:long] [year]"
    ))?;
    Ok(human)
}
