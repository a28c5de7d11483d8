use anyhow::Context;
use chrono::{DateTime, Duration, Utc};

/// Resolve `--deadline` (RFC 3339) or `--due-in-days` into a timestamp.
pub fn parse_deadline(
    deadline: Option<&str>,
    due_in_days: Option<i64>,
    now: DateTime<Utc>,
) -> anyhow::Result<Option<DateTime<Utc>>> {
    if let Some(raw) = deadline {
        let parsed = DateTime::parse_from_rfc3339(raw.trim())
            .with_context(|| format!("invalid deadline '{raw}', expected RFC 3339"))?;
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    due_in_days
        .map(|days| {
            Duration::try_days(days)
                .map(|delta| now + delta)
                .with_context(|| format!("due-in-days out of range: {days}"))
        })
        .transpose()
}
