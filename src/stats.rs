use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum StatsError {
    #[error("Cannot compute a statistic over an empty sequence")]
    #[diagnostic(code(weather::stats::empty_input))]
    EmptyInput,
}

/// Arithmetic mean of `values`.
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Smallest value and its position. Ties resolve to the last occurrence.
///
/// Returns `None` for an empty slice rather than an error, callers have to
/// check it before using the position.
pub fn find_min(values: &[f64]) -> Option<(f64, usize)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (index, value)| match best {
            Some((current, _)) if value > current => best,
            _ => Some((value, index)),
        })
}

/// Largest value and its position. Ties resolve to the last occurrence.
pub fn find_max(values: &[f64]) -> Option<(f64, usize)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (index, value)| match best {
            Some((current, _)) if value < current => best,
            _ => Some((value, index)),
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Ok(2.0));
        assert_eq!(mean(&[49.0, 57.0]), Ok(53.0));
        assert_eq!(mean(&[-4.0]), Ok(-4.0));
    }

    #[test]
    fn mean_of_nothing() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyInput));
    }

    #[rstest]
    #[case(&[3.0, 1.0, 1.0, 5.0], (1.0, 2))]
    #[case(&[7.0], (7.0, 0))]
    #[case(&[2.0, 2.0, 2.0], (2.0, 2))]
    #[case(&[-1.0, 4.0, -3.5, 0.0], (-3.5, 2))]
    #[case(&[0.0, 1.0, 2.0], (0.0, 0))]
    fn minimum_keeps_last_tie(#[case] values: &[f64], #[case] expected: (f64, usize)) {
        assert_eq!(find_min(values), Some(expected));
    }

    #[rstest]
    #[case(&[3.0, 5.0, 5.0, 1.0], (5.0, 2))]
    #[case(&[7.0], (7.0, 0))]
    #[case(&[2.0, 2.0, 2.0], (2.0, 2))]
    #[case(&[9.0, 4.0, -3.5], (9.0, 0))]
    fn maximum_keeps_last_tie(#[case] values: &[f64], #[case] expected: (f64, usize)) {
        assert_eq!(find_max(values), Some(expected));
    }

    #[test]
    fn extremes_of_nothing() {
        assert_eq!(find_min(&[]), None);
        assert_eq!(find_max(&[]), None);
    }
}
