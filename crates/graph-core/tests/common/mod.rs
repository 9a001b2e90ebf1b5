// File: crates/graph-core/tests/common/mod.rs
// Purpose: Shared download fixture: five 1.0.5x versions, four days of downloads, plus extra downloads.

#![allow(dead_code)]

use chrono::NaiveDate;
use graph_core::{AggregateExtraRecord, RawDownloadRecord, VersionRef};

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid fixture date")
}

pub fn versions() -> Vec<VersionRef> {
    vec![
        VersionRef::new(52, "1.0.52", day("2020-10-01")),
        VersionRef::new(53, "1.0.53", day("2020-10-05")),
        VersionRef::new(54, "1.0.54", day("2020-11-15")),
        VersionRef::new(55, "1.0.55", day("2020-12-27")),
        VersionRef::new(56, "1.0.56", day("2020-12-29")),
    ]
}

pub fn records() -> Vec<RawDownloadRecord> {
    let v = versions();
    let (five_2, five_3, five_4, five_5, five_6) = (&v[0], &v[1], &v[2], &v[3], &v[4]);
    vec![
        RawDownloadRecord::new(five_2, day("2020-12-30"), 201),
        RawDownloadRecord::new(five_3, day("2020-12-30"), 2228),
        RawDownloadRecord::new(five_4, day("2020-12-30"), 4298),
        RawDownloadRecord::new(five_5, day("2020-12-30"), 3702),
        RawDownloadRecord::new(five_6, day("2020-12-30"), 30520),
        RawDownloadRecord::new(five_2, day("2020-12-29"), 261),
        RawDownloadRecord::new(five_3, day("2020-12-29"), 1650),
        RawDownloadRecord::new(five_4, day("2020-12-29"), 4277),
        RawDownloadRecord::new(five_5, day("2020-12-29"), 4157),
        RawDownloadRecord::new(five_6, day("2020-12-29"), 31631),
        RawDownloadRecord::new(five_2, day("2020-12-28"), 181),
        RawDownloadRecord::new(five_3, day("2020-12-28"), 968),
        RawDownloadRecord::new(five_4, day("2020-12-28"), 2786),
        RawDownloadRecord::new(five_5, day("2020-12-28"), 2414),
        RawDownloadRecord::new(five_2, day("2020-12-27"), 186),
        RawDownloadRecord::new(five_3, day("2020-12-27"), 873),
        RawDownloadRecord::new(five_4, day("2020-12-27"), 2477),
        RawDownloadRecord::new(five_5, day("2020-12-27"), 15713),
    ]
}

pub fn extra() -> Vec<AggregateExtraRecord> {
    vec![
        AggregateExtraRecord { date: day("2020-12-30"), downloads: 36745 },
        AggregateExtraRecord { date: day("2020-12-29"), downloads: 33242 },
        AggregateExtraRecord { date: day("2020-12-28"), downloads: 19981 },
        AggregateExtraRecord { date: day("2020-12-27"), downloads: 19064 },
    ]
}
