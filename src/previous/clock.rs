use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Where "today" is read from.
///
/// `Local` takes the process clock as-is; callers are expected to run the
/// process in the reference timezone. `Zone` is only used when a timezone is
/// configured explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceClock {
    #[default]
    Local,
    Zone(Tz),
}

impl ReferenceClock {
    pub fn from_timezone(name: Option<&str>) -> Result<Self> {
        let Some(name) = name.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::Local);
        };
        let tz = name
            .parse::<Tz>()
            .map_err(|err| anyhow!("invalid timezone `{name}`: {err}"))?;
        Ok(Self::Zone(tz))
    }

    pub fn today(self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Zone(tz) => Utc::now().with_timezone(&tz).date_naive(),
        }
    }
}

pub fn yesterday_of(today: NaiveDate) -> Option<NaiveDate> {
    today.pred_opt()
}

pub fn archive_file_name(date: NaiveDate, extension: &str) -> String {
    format!("{}.{extension}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn yesterday_crosses_month_and_year_boundaries() {
        assert_eq!(yesterday_of(date(2024, 6, 2)), Some(date(2024, 6, 1)));
        assert_eq!(yesterday_of(date(2024, 3, 1)), Some(date(2024, 2, 29)));
        assert_eq!(yesterday_of(date(2024, 1, 1)), Some(date(2023, 12, 31)));
        assert_eq!(yesterday_of(NaiveDate::MIN), None);
    }

    #[test]
    fn file_name_is_zero_padded() {
        assert_eq!(archive_file_name(date(2024, 6, 1), "csv"), "2024-06-01.csv");
    }

    #[test]
    fn unset_or_blank_timezone_uses_local_clock() {
        assert_eq!(ReferenceClock::from_timezone(None).expect("local"), ReferenceClock::Local);
        assert_eq!(
            ReferenceClock::from_timezone(Some("  ")).expect("local"),
            ReferenceClock::Local
        );
    }

    #[test]
    fn named_timezone_is_parsed() {
        let clock = ReferenceClock::from_timezone(Some("Asia/Tokyo")).expect("tokyo");
        assert_eq!(clock, ReferenceClock::Zone(chrono_tz::Asia::Tokyo));
        assert!(ReferenceClock::from_timezone(Some("Mars/Olympus")).is_err());
    }
}
