//! The local clock that wall-clock timestamps and calendar dates refer to.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::EngineError;

/// Timezone used to interpret offset-less timestamps and to derive the
/// calendar date a swing is bucketed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocalClock {
    /// The runtime's local timezone.
    #[default]
    System,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl LocalClock {
    /// Clock with a fixed offset of `minutes` east of UTC.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidOffset`] if the offset is a day or more.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, EngineError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::Fixed)
            .ok_or(EngineError::InvalidOffset { minutes })
    }

    #[must_use]
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Resolve a wall-clock reading on this clock to an instant.
    ///
    /// Ambiguous readings (DST fall-back) take the earlier instant. Readings
    /// that do not exist (DST spring-forward gap) resolve to `None`.
    #[must_use]
    pub fn resolve(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::System => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc)),
            Self::Fixed(offset) => offset
                .from_local_datetime(naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc)),
        }
    }

    /// Calendar date of `instant` on this clock.
    #[must_use]
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::System => instant.with_timezone(&Local).date_naive(),
            Self::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }
}
