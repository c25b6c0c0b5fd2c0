//! Recurrence periods and date ranges

use chrono::NaiveDate;

use super::ValidationError;

/// Budget period / recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    /// Parse a period for `field` (e.g. "period", "recurring frequency").
    pub fn parse(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(ValidationError::InvalidVariant {
                field,
                value: other.to_owned(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// Inclusive date range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::OutOfRange {
                field: "end_date",
                reason: "must not be before start_date",
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_all_periods() {
        for period in [Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly] {
            assert_eq!(Period::parse("period", period.as_str()).unwrap(), period);
        }
    }

    #[test]
    fn rejects_unknown_period() {
        let err = Period::parse("period", "hourly").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidVariant {
                field: "period",
                value: "hourly".into()
            }
        );
    }

    #[test]
    fn date_range_order() {
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).is_ok());
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
        assert!(DateRange::new(date(2024, 2, 1), date(2024, 1, 31)).is_err());
    }
}
