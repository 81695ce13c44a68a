use crate::error::RowError;

pub const NOT_SPECIFIED: &str = "Not specified";

/// 2^63. Truncated yearly amounts must fit in an `i64`.
const YEARLY_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Render a pay range as a human-readable string.
///
/// Zero amounts count as absent. `"hourly"` renders two decimals; every other
/// interval, including none, renders truncated whole dollars per year.
pub fn format_salary(
    interval: Option<&str>,
    min_amount: Option<f64>,
    max_amount: Option<f64>,
) -> Result<String, RowError> {
    let min = present("min_amount", min_amount)?;
    let max = present("max_amount", max_amount)?;

    let is_hourly = interval == Some("hourly");
    if !is_hourly {
        within_yearly_range("min_amount", min)?;
        within_yearly_range("max_amount", max)?;
    }
    let render = |amount: f64| if is_hourly { hourly(amount) } else { yearly(amount) };
    let unit = if is_hourly { "per hour" } else { "per year" };

    let range = match (min, max) {
        (Some(lo), Some(hi)) => format!("${} - ${}", render(lo), render(hi)),
        (Some(v), None) | (None, Some(v)) => format!("${}", render(v)),
        (None, None) => return Ok(NOT_SPECIFIED.to_string()),
    };
    Ok(format!("{range} {unit}"))
}

fn present(field: &'static str, amount: Option<f64>) -> Result<Option<f64>, RowError> {
    match amount {
        Some(value) if !value.is_finite() => Err(RowError::NonFiniteAmount { field, value }),
        Some(value) if value != 0.0 => Ok(Some(value)),
        _ => Ok(None),
    }
}

fn within_yearly_range(field: &'static str, amount: Option<f64>) -> Result<(), RowError> {
    match amount {
        Some(value) if !(-YEARLY_LIMIT..YEARLY_LIMIT).contains(&value.trunc()) => {
            Err(RowError::AmountOutOfRange { field, value })
        }
        _ => Ok(()),
    }
}

fn hourly(amount: f64) -> String {
    format!("{amount:.2}")
}

fn yearly(amount: f64) -> String {
    group_thousands(amount.trunc() as i64)
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
