//! Value Objects

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{BlogError, BlogResult};

/// What the author asked for in the `published_at` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishRequest {
    /// Publish immediately
    Now,
    /// Pick the next free publishing slot
    AutoSchedule,
    /// Store without a publish date
    Draft,
    /// Publish at this instant (past or future)
    At(DateTime<Utc>),
}

impl PublishRequest {
    /// Parse the raw field; `None` covers both `null` and a missing field.
    /// An empty string stores the post as a draft.
    ///
    /// A bare `YYYY-MM-DD` means midnight UTC of that day.
    pub fn parse(raw: Option<&str>) -> BlogResult<Self> {
        let Some(raw) = raw.map(str::trim) else {
            return Ok(Self::AutoSchedule);
        };

        match raw.to_ascii_lowercase().as_str() {
            "schedule" => return Ok(Self::AutoSchedule),
            "now" => return Ok(Self::Now),
            "" | "draft" => return Ok(Self::Draft),
            _ => {}
        }

        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self::At(at.with_timezone(&Utc)));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| Self::At(midnight.and_utc()))
            .ok_or_else(|| BlogError::InvalidPublishDate(raw.to_string()))
    }
}

/// When auto-scheduled posts go out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRules {
    /// Hour of day (UTC) scheduled posts are published at
    pub publish_hour_utc: u32,
    pub max_posts_per_day: usize,
    /// Days after today searched for a free slot
    pub horizon_days: u32,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self {
            publish_hour_utc: 9,
            max_posts_per_day: 1,
            horizon_days: 365,
        }
    }
}
