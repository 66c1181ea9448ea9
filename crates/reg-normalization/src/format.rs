//! Display locale and time zone.

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown in place of absent or unparseable values.
pub const PLACEHOLDER: &str = "—";

/// Türkiye has been on a fixed UTC+03:00 since 2016.
const DEFAULT_OFFSET_SECONDS: i32 = 3 * 3600;

const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Language used for month names and export headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Turkish => "tr",
            Self::English => "en",
        }
    }

    /// Month name for a 1-based month number.
    pub fn month_name(&self, month: u32) -> &'static str {
        let names = match self {
            Self::Turkish => &TURKISH_MONTHS,
            Self::English => &ENGLISH_MONTHS,
        };
        let idx = month.clamp(1, 12) as usize - 1;
        names[idx]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: {0}")]
pub struct LocaleParseError(pub String);

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" | "tr-tr" | "turkish" => Ok(Self::Turkish),
            "en" | "en-gb" | "en-us" | "english" => Ok(Self::English),
            other => Err(LocaleParseError(other.to_string())),
        }
    }
}

/// How dates are rendered: month names from the locale, wall clock from the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormat {
    pub locale: Locale,
    pub offset: FixedOffset,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            offset: FixedOffset::east_opt(DEFAULT_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl DisplayFormat {
    pub fn new(locale: Locale, offset: FixedOffset) -> Self {
        Self { locale, offset }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the display offset in minutes east of UTC.
    ///
    /// Offsets outside ±24h are ignored and the current offset is kept.
    #[must_use]
    pub fn with_offset_minutes(mut self, minutes: i32) -> Self {
        match minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
            Some(offset) => self.offset = offset,
            None => tracing::warn!(minutes, "Ignoring out-of-range display offset"),
        }
        self
    }

    /// Long date text, e.g. `17 Ekim 2025`.
    pub fn long_date(&self, day: u32, month: u32, year: i32) -> String {
        format!("{day} {} {year}", self.locale.month_name(month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_turkish_plus_three() {
        let format = DisplayFormat::default();
        assert_eq!(format.locale, Locale::Turkish);
        assert_eq!(format.offset.local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn test_long_date() {
        let tr = DisplayFormat::default();
        assert_eq!(tr.long_date(17, 10, 2025), "17 Ekim 2025");
        let en = tr.with_locale(Locale::English);
        assert_eq!(en.long_date(1, 2, 2026), "1 February 2026");
    }

    #[test]
    fn test_offset_minutes() {
        let format = DisplayFormat::default().with_offset_minutes(-300);
        assert_eq!(format.offset.local_minus_utc(), -5 * 3600);
        let unchanged = format.with_offset_minutes(60 * 30);
        assert_eq!(unchanged.offset.local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("TR".parse::<Locale>(), Ok(Locale::Turkish));
        assert_eq!("en-GB".parse::<Locale>(), Ok(Locale::English));
        assert!("de".parse::<Locale>().is_err());
    }
}
