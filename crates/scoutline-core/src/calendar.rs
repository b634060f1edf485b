//! Season calendar for story scheduling.
//!
//! All scheduling decisions are made in absolute-week space: a
//! (season, week) pair is flattened to a single increasing integer, so that
//! delays crossing a season boundary need no special casing.
//!
//! # Design Principles
//!
//! - All week arithmetic uses checked operations (no silent overflow).
//! - The season length is a per-variant constant: storylines run on a
//!   38-week season, event chains on a 52-week one. The two calendars must
//!   never be mixed, so every engine owns its own [`Calendar`].

use scoutline_types::{AbsoluteWeek, GameDate};

/// Season length of the storyline calendar.
pub const STORYLINE_WEEKS_PER_SEASON: u32 = 38;

/// Season length of the event-chain calendar.
pub const EVENT_CHAIN_WEEKS_PER_SEASON: u32 = 52;

/// Errors that can occur during calendar conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A calendar was configured with zero weeks per season.
    #[error("invalid calendar: weeks_per_season must be at least 1")]
    ZeroLengthSeason,

    /// A date does not exist on this calendar.
    #[error("{date} is not a valid date on a {weeks_per_season}-week calendar")]
    InvalidDate {
        /// The offending date.
        date: GameDate,
        /// Season length of the calendar.
        weeks_per_season: u32,
    },

    /// Absolute week 0 precedes the first week of the game.
    #[error("absolute week 0 does not exist")]
    WeekZero,

    /// Week arithmetic would overflow.
    #[error("week arithmetic overflow: {context}")]
    Overflow {
        /// What was being computed.
        context: &'static str,
    },
}

/// Converts between (season, week) pairs and absolute weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    /// Number of weeks in one season.
    weeks_per_season: u32,
}

impl Calendar {
    /// Create a calendar with the given season length.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ZeroLengthSeason`] if `weeks_per_season` is 0.
    pub const fn new(weeks_per_season: u32) -> Result<Self, CalendarError> {
        if weeks_per_season == 0 {
            return Err(CalendarError::ZeroLengthSeason);
        }
        Ok(Self { weeks_per_season })
    }

    /// Return the configured season length.
    pub const fn weeks_per_season(&self) -> u32 {
        self.weeks_per_season
    }

    /// Flatten a date: `(season - 1) * weeks_per_season + week`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] for season 0, week 0, or a week
    /// beyond the season length, and [`CalendarError::Overflow`] if the
    /// result does not fit in a `u32`.
    pub fn to_absolute(&self, date: GameDate) -> Result<AbsoluteWeek, CalendarError> {
        if date.season == 0 || date.week == 0 || date.week > self.weeks_per_season {
            return Err(CalendarError::InvalidDate {
                date,
                weeks_per_season: self.weeks_per_season,
            });
        }
        let completed = date
            .season
            .checked_sub(1)
            .and_then(|s| s.checked_mul(self.weeks_per_season))
            .ok_or(CalendarError::Overflow {
                context: "completed seasons",
            })?;
        completed
            .checked_add(date.week)
            .map(AbsoluteWeek)
            .ok_or(CalendarError::Overflow {
                context: "absolute week",
            })
    }

    /// Recover the (season, week) pair of an absolute week.
    ///
    /// The returned week is always in `1..=weeks_per_season`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::WeekZero`] for absolute week 0.
    pub fn from_absolute(&self, week: AbsoluteWeek) -> Result<GameDate, CalendarError> {
        let zero_based = week.get().checked_sub(1).ok_or(CalendarError::WeekZero)?;
        // Division is safe: weeks_per_season >= 1 is guaranteed by the constructor.
        let season_index = zero_based
            .checked_div(self.weeks_per_season)
            .ok_or(CalendarError::ZeroLengthSeason)?;
        let week_index = zero_based
            .checked_rem(self.weeks_per_season)
            .ok_or(CalendarError::ZeroLengthSeason)?;
        let overflow = CalendarError::Overflow {
            context: "season number",
        };
        Ok(GameDate {
            season: season_index.checked_add(1).ok_or(overflow)?,
            week: week_index.checked_add(1).ok_or(CalendarError::Overflow {
                context: "week number",
            })?,
        })
    }

    /// Offset an absolute week by a stage delay.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Overflow`] if the result exceeds `u32::MAX`.
    pub fn add_weeks(&self, week: AbsoluteWeek, delay: u32) -> Result<AbsoluteWeek, CalendarError> {
        week.get()
            .checked_add(delay)
            .map(AbsoluteWeek)
            .ok_or(CalendarError::Overflow {
                context: "stage delay",
            })
    }
}
