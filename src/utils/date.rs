// Due date parsing and display

use chrono::{Duration, Local, NaiveDate};
use anyhow::{bail, Context, Result};

/// Parse a due date expression relative to the local calendar day.
///
/// Accepts `YYYY-MM-DD`, `today`, `tomorrow` and offsets such as `+3d` or `+2w`.
pub fn parse_due_date(expr: &str) -> Result<NaiveDate> {
    parse_due_date_from(expr, Local::now().date_naive())
}

/// Same as [`parse_due_date`] with an explicit reference day
pub fn parse_due_date_from(expr: &str, today: NaiveDate) -> Result<NaiveDate> {
    let expr = expr.trim();

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return Ok(date);
    }

    match expr {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    if let Some(offset) = expr.strip_prefix('+') {
        let unit = offset.chars().last().unwrap_or('d');
        let count: i64 = offset[..offset.len() - unit.len_utf8().min(offset.len())]
            .parse()
            .with_context(|| format!("Invalid date offset: '{}'", expr))?;
        if count < 0 {
            bail!("Invalid date offset: '{}'. The offset cannot be negative.", expr);
        }
        let days = match unit {
            'd' => Some(count),
            'w' => count.checked_mul(7),
            _ => bail!("Invalid date offset: '{}'. Use a 'd' or 'w' suffix.", expr),
        };
        let Some(due) = days
            .and_then(Duration::try_days)
            .and_then(|delta| today.checked_add_signed(delta))
        else {
            bail!("Date offset out of range: '{}'", expr);
        };
        return Ok(due);
    }

    bail!("Unsupported date expression: '{}'. Use YYYY-MM-DD, today, tomorrow or +Nd.", expr)
}

/// Render a due date as a short phrase relative to `today`
pub fn format_relative_due(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d > 1 => format!("due in {} days", d),
        d => format!("{} days overdue", -d),
    }
}
