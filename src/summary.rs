use std::fmt;

use log::debug;
use miette::Diagnostic;
use thiserror::Error;

use crate::{
    convert::{convert_date, format_temperature, Celsius, FormatError},
    stats::{find_max, find_min, mean, StatsError},
    DayRecord, WeatherDataset,
};

#[derive(Debug, Error, Diagnostic)]
pub enum SummaryError {
    #[error("Cannot summarise an empty dataset")]
    #[diagnostic(
        code(weather::summary::empty_dataset),
        help("the input needs at least one row after the header")
    )]
    EmptyDataset,
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),
}

impl From<StatsError> for SummaryError {
    fn from(error: StatsError) -> Self {
        match error {
            StatsError::EmptyInput => Self::EmptyDataset,
        }
    }
}

/// Extremes and averages over a whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub days: usize,
    pub lowest: Celsius,
    pub lowest_date: String,
    pub highest: Celsius,
    pub highest_date: String,
    pub average_low: Celsius,
    pub average_high: Celsius,
}

impl Overview {
    pub fn from_dataset(dataset: &WeatherDataset) -> Result<Self, SummaryError> {
        debug!("building overview of {} days", dataset.len());

        let dates = dataset.dates();
        let min_temps = dataset.min_temps();
        let max_temps = dataset.max_temps();

        let (lowest, lowest_index) = find_min(&min_temps).ok_or(SummaryError::EmptyDataset)?;
        let (highest, highest_index) = find_max(&max_temps).ok_or(SummaryError::EmptyDataset)?;

        Ok(Self {
            days: dataset.len(),
            lowest: Celsius::from_fahrenheit(lowest),
            lowest_date: convert_date(dates[lowest_index])?,
            highest: Celsius::from_fahrenheit(highest),
            highest_date: convert_date(dates[highest_index])?,
            average_low: Celsius::from_fahrenheit(mean(&min_temps)?),
            average_high: Celsius::from_fahrenheit(mean(&max_temps)?),
        })
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Day Overview", self.days)?;
        writeln!(
            f,
            "  The lowest temperature will be {}, and will occur on {}.",
            format_temperature(self.lowest),
            self.lowest_date
        )?;
        writeln!(
            f,
            "  The highest temperature will be {}, and will occur on {}.",
            format_temperature(self.highest),
            self.highest_date
        )?;
        writeln!(
            f,
            "  The average low this week is {}.",
            format_temperature(self.average_low)
        )?;
        writeln!(
            f,
            "  The average high this week is {}.",
            format_temperature(self.average_high)
        )
    }
}

/// One block of the daily summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEntry {
    pub date: String,
    pub min: Celsius,
    pub max: Celsius,
}

impl DailyEntry {
    pub fn from_record(record: &DayRecord) -> Result<Self, FormatError> {
        Ok(Self {
            date: convert_date(&record.date)?,
            min: Celsius::from_fahrenheit(record.min_temp_f),
            max: Celsius::from_fahrenheit(record.max_temp_f),
        })
    }
}

impl fmt::Display for DailyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---- {} ----", self.date)?;
        writeln!(f, "  Minimum Temperature: {}", format_temperature(self.min))?;
        writeln!(f, "  Maximum Temperature: {}", format_temperature(self.max))?;
        writeln!(f)
    }
}

pub fn generate_summary(dataset: &WeatherDataset) -> Result<String, SummaryError> {
    Overview::from_dataset(dataset).map(|overview| overview.to_string())
}

/// Every entry is converted before anything is rendered, an invalid date
/// anywhere yields no output at all.
pub fn generate_daily_summary(dataset: &WeatherDataset) -> Result<String, FormatError> {
    let entries = dataset
        .iter()
        .map(DailyEntry::from_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entries.iter().map(DailyEntry::to_string).collect())
}
