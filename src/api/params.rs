//! Parameter normalization shared by the query services.

use chrono::{NaiveDate, TimeDelta};

use crate::models::OrderStatus;
use crate::{Error, Result};

/// Date format of history query bounds.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fill in a missing history window bound.
///
/// With neither bound the window ends `today`; with one bound the other
/// lies `days` away from it. Explicit bounds are kept as given. A negative
/// width, or a bound pushed outside the calendar, is a parameter error.
pub(crate) fn history_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    days: i64,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let span = TimeDelta::try_days(days)
        .filter(|_| days >= 0)
        .ok_or_else(|| Error::wrong_param("history_window_days"))?;

    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        (None, Some(end)) => end
            .checked_sub_signed(span)
            .map(|start| (start, end))
            .ok_or_else(|| Error::wrong_param("end")),
        (Some(start), None) => start
            .checked_add_signed(span)
            .map(|end| (start, end))
            .ok_or_else(|| Error::wrong_param("start")),
        (None, None) => today
            .checked_sub_signed(span)
            .map(|start| (start, today))
            .ok_or_else(|| Error::wrong_param("history_window_days")),
    }
}

/// Drop repeated statuses, keeping the first occurrence of each.
pub(crate) fn status_filter(statuses: &[OrderStatus]) -> Result<Vec<OrderStatus>> {
    let mut out = Vec::with_capacity(statuses.len());
    for status in statuses {
        if *status == OrderStatus::Unknown {
            return Err(Error::wrong_param("status_filter_list"));
        }
        if !out.contains(status) {
            out.push(*status);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_defaults_to_last_90_days() {
        let (start, end) = history_window(None, None, 90, date(2018, 6, 30)).unwrap();
        assert_eq!(start, date(2018, 4, 1));
        assert_eq!(end, date(2018, 6, 30));
    }

    #[test]
    fn test_window_from_end_only() {
        let (start, end) = history_window(None, Some(date(2018, 3, 31)), 90, date(2020, 1, 1)).unwrap();
        assert_eq!(start, date(2017, 12, 31));
        assert_eq!(end, date(2018, 3, 31));
    }

    #[test]
    fn test_window_from_start_only() {
        let (start, end) = history_window(Some(date(2018, 1, 1)), None, 90, date(2020, 1, 1)).unwrap();
        assert_eq!(start, date(2018, 1, 1));
        assert_eq!(end, date(2018, 4, 1));
    }

    #[test]
    fn test_window_keeps_explicit_bounds() {
        let (start, end) = history_window(
            Some(date(2018, 1, 1)),
            Some(date(2018, 1, 5)),
            90,
            date(2020, 1, 1),
        )
        .unwrap();
        assert_eq!((start, end), (date(2018, 1, 1), date(2018, 1, 5)));
    }

    #[test]
    fn test_window_start_past_calendar_end() {
        let err = history_window(Some(NaiveDate::MAX), None, 90, date(2020, 1, 1)).unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(err.to_string(), "ERROR. the type of start param is wrong ");
    }

    #[test]
    fn test_window_end_before_calendar_start() {
        let err = history_window(None, Some(NaiveDate::MIN), 90, date(2020, 1, 1)).unwrap_err();
        assert_eq!(err.to_string(), "ERROR. the type of end param is wrong ");
    }

    #[test]
    fn test_window_rejects_out_of_range_width() {
        for days in [i64::MAX, i64::MIN, -1] {
            let err = history_window(None, None, days, date(2020, 1, 1)).unwrap_err();
            assert_eq!(
                err.to_string(),
                "ERROR. the type of history_window_days param is wrong ",
                "days = {}",
                days
            );
        }
    }

    #[test]
    fn test_window_too_wide_for_today() {
        // Representable width, but today minus it leaves the calendar
        let err = history_window(None, None, 1_000_000_000, date(2020, 1, 1)).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_status_filter_dedupes_in_order() {
        let statuses = [
            OrderStatus::Submitted,
            OrderStatus::FilledAll,
            OrderStatus::Submitted,
        ];
        assert_eq!(
            status_filter(&statuses).unwrap(),
            vec![OrderStatus::Submitted, OrderStatus::FilledAll]
        );
    }

    #[test]
    fn test_status_filter_rejects_unknown() {
        let err = status_filter(&[OrderStatus::Unknown]).unwrap_err();
        assert!(err.is_validation_error());
        assert!(err.to_string().starts_with("ERROR. "));
    }
}
