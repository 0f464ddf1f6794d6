//! Unit tests for compact `YYYYMMDDHHMMSS` path timestamps.
//!
//! Run with: cargo test --test timestamp_unit_test

use chrono::{NaiveDate, NaiveDateTime};
use station_telemetry::error::AppError;
use station_telemetry::routes::assigned_measures::parse_compact_timestamp;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .unwrap()
}

#[test]
fn parses_each_field() {
    assert_eq!(
        parse_compact_timestamp("20180301123456").unwrap(),
        at(2018, 3, 1, 12, 34, 56)
    );
    assert_eq!(
        parse_compact_timestamp("20181231235959").unwrap(),
        at(2018, 12, 31, 23, 59, 59)
    );
}

#[test]
fn rejects_wrong_length_and_non_digits() {
    for input in ["", "2018030112345", "201803011234567", "2018-03-01T12:", "2018030112345x", "２０１８０３０１１２３４"] {
        assert!(
            matches!(parse_compact_timestamp(input), Err(AppError::BadRequest(_))),
            "accepted {input:?}"
        );
    }
}

#[test]
fn rejects_impossible_dates() {
    for input in ["20181301000000", "20180230000000", "20180301240000", "20180301126000", "20180001000000", "20180301125960"] {
        assert!(parse_compact_timestamp(input).is_err(), "accepted {input:?}");
    }
}

#[test]
fn leap_day_follows_the_calendar() {
    assert!(parse_compact_timestamp("20200229000000").is_ok());
    assert!(parse_compact_timestamp("20180229000000").is_err());
}
