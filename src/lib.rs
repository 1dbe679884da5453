use std::{borrow::Cow, ops::Range, str::FromStr};

use log::{debug, trace, warn};
use logos::Logos;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub mod convert;
pub mod stats;
pub mod summary;

pub use convert::{convert_date, convert_f_to_c, format_temperature, Celsius, FormatError};
pub use stats::{find_max, find_min, mean, StatsError};
pub use summary::{generate_daily_summary, generate_summary, DailyEntry, Overview, SummaryError};

#[derive(Logos, Debug, PartialEq)]
enum Token {
    #[token(",")]
    Comma,
    #[regex(r"\r\n|\n|\r")]
    Crlf,
    // `""` inside quotes is an escaped quote
    #[regex(r#""([^"]|"")*""#, priority = 5)]
    Quoted,
    #[regex(r#"[^,\r\n"]+"#)]
    Field,
}

/// One day of weather, temperatures in Fahrenheit.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    /// ISO-8601 date, kept as text until it is formatted.
    pub date: String,
    pub min_temp_f: f64,
    pub max_temp_f: f64,
}

impl DayRecord {
    pub fn new(date: impl Into<String>, min_temp_f: f64, max_temp_f: f64) -> Self {
        Self {
            date: date.into(),
            min_temp_f,
            max_temp_f,
        }
    }
}

/// Days in the order they were read. The position of a day is what the
/// summaries refer to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherDataset {
    pub days: Vec<DayRecord>,
}

impl WeatherDataset {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayRecord> {
        self.days.iter()
    }

    pub fn dates(&self) -> Vec<&str> {
        self.days.iter().map(|day| day.date.as_str()).collect()
    }

    pub fn min_temps(&self) -> Vec<f64> {
        self.days.iter().map(|day| day.min_temp_f).collect()
    }

    pub fn max_temps(&self) -> Vec<f64> {
        self.days.iter().map(|day| day.max_temp_f).collect()
    }
}

impl From<Vec<DayRecord>> for WeatherDataset {
    fn from(days: Vec<DayRecord>) -> Self {
        Self { days }
    }
}

impl FromIterator<DayRecord> for WeatherDataset {
    fn from_iter<I: IntoIterator<Item = DayRecord>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a WeatherDataset {
    type Item = &'a DayRecord;
    type IntoIter = std::slice::Iter<'a, DayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

impl FromStr for WeatherDataset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoadOptions::default().load(s)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ParseError {
    #[error("Line {line}: expected 3 columns, found {found}")]
    #[diagnostic(
        code(weather::load::column_count),
        help("rows must look like `date,min_temp_f,max_temp_f`")
    )]
    ColumnCount {
        line: usize,
        found: usize,
        #[source_code]
        src: String,
        #[label("this row")]
        span: SourceSpan,
    },
    #[error("Line {line}: `{value}` is not a valid {column}")]
    #[diagnostic(code(weather::load::temperature))]
    BadTemperature {
        line: usize,
        column: &'static str,
        value: String,
        #[source_code]
        src: String,
        #[label("expected a number")]
        span: SourceSpan,
    },
    #[error("Line {line}: `{value}` was read as a number where a date was expected")]
    #[diagnostic(
        code(weather::load::date),
        help("fields shorter than 4 characters are read as integers with field width typing")
    )]
    BadDate {
        line: usize,
        value: String,
        #[source_code]
        src: String,
        #[label("expected a date")]
        span: SourceSpan,
    },
    #[error("Line {line}: quoted field is never closed")]
    #[diagnostic(code(weather::load::unterminated_quote))]
    UnterminatedQuote {
        line: usize,
        #[source_code]
        src: String,
        #[label("quote opened here")]
        span: SourceSpan,
    },
}

/// How the fields of a row get their type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnTyping {
    /// Column 0 is the date, columns 1 and 2 are decimal temperatures.
    #[default]
    Schema,
    /// Fields shorter than 4 characters are integers, everything else is
    /// text. Text temperatures are still read as decimals, so `4.5` is
    /// rejected while `67.5` is accepted.
    FieldWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub column_typing: ColumnTyping,
    pub skip_header: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            column_typing: ColumnTyping::Schema,
            skip_header: true,
        }
    }
}

struct RawField<'a> {
    text: Cow<'a, str>,
    span: Range<usize>,
}

impl<'a> RawField<'a> {
    fn empty(at: usize) -> Self {
        Self {
            text: Cow::Borrowed(""),
            span: at..at,
        }
    }

    fn quoted(slice: &'a str, span: Range<usize>) -> Self {
        let inner = &slice[1..slice.len() - 1];
        let text = if inner.contains("\"\"") {
            Cow::Owned(inner.replace("\"\"", "\""))
        } else {
            Cow::Borrowed(inner)
        };
        Self { text, span }
    }

    /// Glues a value that directly follows this one, as in `"2021-07-0"2`.
    fn append(&mut self, text: &str, end: usize) {
        self.text.to_mut().push_str(text);
        self.span.end = end;
    }
}

struct RawRow<'a> {
    fields: Vec<RawField<'a>>,
    span: Range<usize>,
}

/// Splits `source` into rows of fields. A row without any character is
/// returned with no fields.
fn split_rows(source: &str) -> Result<Vec<RawRow<'_>>, ParseError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field: Option<RawField> = None;
    let mut row_start = 0;

    let mut lexer = Token::lexer(source);
    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(token @ (Token::Field | Token::Quoted)) => {
                let next = if token == Token::Quoted {
                    RawField::quoted(lexer.slice(), span)
                } else {
                    RawField {
                        text: Cow::Borrowed(lexer.slice()),
                        span,
                    }
                };
                match field.as_mut() {
                    Some(pending) => pending.append(&next.text, next.span.end),
                    None => field = Some(next),
                }
            }
            Ok(Token::Comma) => {
                fields.push(field.take().unwrap_or_else(|| RawField::empty(span.start)))
            }
            Ok(Token::Crlf) => {
                if field.is_some() || !fields.is_empty() {
                    fields.push(field.take().unwrap_or_else(|| RawField::empty(span.start)));
                }
                rows.push(RawRow {
                    fields: std::mem::take(&mut fields),
                    span: row_start..span.start,
                });
                row_start = span.end;
            }
            // only a `"` without its closing quote fails to lex
            Err(()) => {
                return Err(ParseError::UnterminatedQuote {
                    line: line_of(source, span.start),
                    src: source.to_string(),
                    span: span.into(),
                })
            }
        }
    }

    if field.is_some() || !fields.is_empty() {
        fields.push(field.take().unwrap_or_else(|| RawField::empty(source.len())));
        rows.push(RawRow {
            fields,
            span: row_start..source.len(),
        });
    }

    Ok(rows)
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

impl LoadOptions {
    pub fn column_typing(mut self, column_typing: ColumnTyping) -> Self {
        self.column_typing = column_typing;
        self
    }

    pub fn skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    /// Parses every data row of `source`. Nothing is returned unless all
    /// rows are valid.
    pub fn load(&self, source: &str) -> Result<WeatherDataset, ParseError> {
        let rows = split_rows(source)?;
        let skip = usize::from(self.skip_header);

        let mut days: Vec<DayRecord> = Vec::with_capacity(rows.len().saturating_sub(skip));
        for row in rows.iter().skip(skip) {
            if row.fields.is_empty() {
                trace!("skipping blank line {}", line_of(source, row.span.start));
                continue;
            }

            let day = self.parse_row(source, row)?;

            if let Some(previous) = days.last() {
                if previous.date >= day.date {
                    warn!(
                        "days are not ordered: {} comes after {}",
                        day.date, previous.date
                    );
                }
            }
            days.push(day);
        }

        debug!("loaded {} day records", days.len());
        Ok(WeatherDataset { days })
    }

    fn parse_row(&self, source: &str, row: &RawRow) -> Result<DayRecord, ParseError> {
        let line = line_of(source, row.span.start);
        let [date, min, max] = row.fields.as_slice() else {
            return Err(ParseError::ColumnCount {
                line,
                found: row.fields.len(),
                src: source.to_string(),
                span: row.span.clone().into(),
            });
        };

        Ok(DayRecord {
            date: self.parse_date(source, line, date)?,
            min_temp_f: self.parse_temperature(source, line, min, "minimum temperature")?,
            max_temp_f: self.parse_temperature(source, line, max, "maximum temperature")?,
        })
    }

    fn parse_date(&self, source: &str, line: usize, field: &RawField) -> Result<String, ParseError> {
        if self.column_typing == ColumnTyping::FieldWidth && is_short(&field.text) {
            return Err(ParseError::BadDate {
                line,
                value: field.text.to_string(),
                src: source.to_string(),
                span: field.span.clone().into(),
            });
        }
        Ok(field.text.to_string())
    }

    fn parse_temperature(
        &self,
        source: &str,
        line: usize,
        field: &RawField,
        column: &'static str,
    ) -> Result<f64, ParseError> {
        let text = field.text.trim();
        let value = match self.column_typing {
            ColumnTyping::Schema => text.parse::<f64>().ok().filter(|value| value.is_finite()),
            ColumnTyping::FieldWidth if is_short(&field.text) => {
                text.parse::<i64>().ok().map(|value| value as f64)
            }
            ColumnTyping::FieldWidth => {
                text.parse::<f64>().ok().filter(|value| value.is_finite())
            }
        };

        value.ok_or_else(|| ParseError::BadTemperature {
            line,
            column,
            value: field.text.to_string(),
            src: source.to_string(),
            span: field.span.clone().into(),
        })
    }
}

fn is_short(text: &str) -> bool {
    text.chars().count() < 4
}

/// Loads a dataset with the default [`LoadOptions`].
pub fn load_dataset(source: &str) -> Result<WeatherDataset, ParseError> {
    LoadOptions::default().load(source)
}
