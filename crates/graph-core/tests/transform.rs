// File: crates/graph-core/tests/transform.rs
// Purpose: Chart data transformer: windowing, zero-fill, ordering, colors and input validation.

mod common;

use std::collections::HashSet;

use common::{day, extra, records, versions};
use graph_core::{
    to_chart_data, ChartPoint, Palette, RawDownloadRecord, Rgb, StableFirstPrecedence,
    TransformError, Transformer, VersionRef, WindowMode,
};

fn registry_transformer() -> Transformer {
    Transformer::new()
        .with_mode(WindowMode::SinceCreation)
        .with_today(day("2020-12-30"))
        .with_max_days(90)
}

#[test]
fn since_creation_matches_registry_chart() {
    let data = registry_transformer().transform(&records(), &extra()).expect("valid input");

    assert_eq!(data.labels(), vec!["1.0.56", "1.0.55", "1.0.54", "1.0.53", "1.0.52", "Other"]);

    let newest = data.series("1.0.56").expect("1.0.56 series");
    assert_eq!(
        newest.data,
        vec![
            ChartPoint { x: day("2020-12-30"), y: 30520 },
            ChartPoint { x: day("2020-12-29"), y: 31631 },
            ChartPoint { x: day("2020-12-28"), y: 0 },
        ]
    );

    let ys: Vec<u64> = data.series("1.0.55").unwrap().data.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![3702, 4157, 2414, 15713, 0]);

    let lens: Vec<usize> = data.datasets.iter().map(|s| s.data.len()).collect();
    assert_eq!(lens, vec![3, 5, 47, 88, 90, 90]);

    // 1.0.53 stops the day before its release; 1.0.52 is cut by the 90-day cap.
    assert_eq!(data.series("1.0.53").unwrap().data.last().unwrap().x, day("2020-10-04"));
    assert_eq!(data.series("1.0.52").unwrap().data.last().unwrap().x, day("2020-10-02"));

    // "Other" has no release date, so it keeps the whole capped window.
    let other = data.series("Other").unwrap();
    assert_eq!(other.data.last().unwrap().x, day("2020-10-02"));
    assert_eq!(other.value_on(day("2020-12-27")), Some(19064));
    assert_eq!(other.value_on(day("2020-12-26")), Some(0));
}

#[test]
fn colors_follow_output_order() {
    let data = registry_transformer().transform(&records(), &extra()).unwrap();
    let borders: Vec<String> = data.datasets.iter().map(|s| s.border_color.to_string()).collect();
    let backgrounds: Vec<String> = data.datasets.iter().map(|s| s.background_color.to_string()).collect();
    assert_eq!(borders, vec!["#67001f", "#b2182b", "#d6604d", "#f4a582", "#92c5de", "#4393c3"]);
    assert_eq!(backgrounds, vec!["#d3b5bc", "#eabdc0", "#f3d0ca", "#fce4d9", "#deedf5", "#c9deed"]);

    for s in &data.datasets {
        assert_eq!(s.border_width, 2);
        assert_eq!(s.point_hover_radius, 5);
        assert_eq!(s.point_hover_border_width, 2);
    }
}

#[test]
fn uniform_window_pads_every_series() {
    let data = to_chart_data(&records(), &extra()).unwrap();
    // 2020-10-01 (earliest creation) ..= 2020-12-30 (latest record)
    for s in &data.datasets {
        assert_eq!(s.data.len(), 91, "series {}", s.label);
        assert_eq!(s.data.first().unwrap().x, day("2020-12-30"));
        assert_eq!(s.data.last().unwrap().x, day("2020-10-01"));
    }
    let first: Vec<_> = data.datasets[0].data.iter().map(|p| p.x).collect();
    for s in &data.datasets[1..] {
        let xs: Vec<_> = s.data.iter().map(|p| p.x).collect();
        assert_eq!(xs, first);
    }

    let newest = data.series("1.0.56").unwrap();
    assert_eq!(newest.value_on(day("2020-12-30")), Some(30520));
    assert_eq!(newest.value_on(day("2020-12-29")), Some(31631));
    assert_eq!(newest.value_on(day("2020-12-28")), Some(0));
    assert_eq!(data.series("Other").unwrap().total(), 36745 + 33242 + 19981 + 19064);
}

#[test]
fn missing_pairs_are_exactly_zero() {
    let input = records();
    let present: HashSet<(String, chrono::NaiveDate)> =
        input.iter().map(|r| (r.version.num.clone(), r.date)).collect();
    let data = to_chart_data(&input, &[]).unwrap();

    for s in &data.datasets {
        for p in &s.data {
            if !present.contains(&(s.label.clone(), p.x)) {
                assert_eq!(p.y, 0, "{} on {}", s.label, p.x);
            } else {
                assert!(p.y > 0);
            }
        }
    }
}

#[test]
fn other_is_last_even_with_wider_range() {
    let v = VersionRef::new(1, "0.1.0", day("2021-03-01"));
    let recs = vec![RawDownloadRecord::new(&v, day("2021-03-02"), 10)];
    let extras = vec![graph_core::AggregateExtraRecord { date: day("2021-03-05"), downloads: 7 }];

    let data = to_chart_data(&recs, &extras).unwrap();
    assert_eq!(data.labels(), vec!["0.1.0", "Other"]);
    assert!(data.datasets.last().unwrap().is_other());
    // Extra dates extend the top of the window.
    assert_eq!(data.datasets[0].data.first().unwrap(), &ChartPoint { x: day("2021-03-05"), y: 0 });
    assert_eq!(data.datasets[0].data.len(), 5);
}

#[test]
fn versions_sort_by_semver_not_text() {
    let created = day("2022-01-01");
    let vs = [
        VersionRef::new(1, "1.2.0", created),
        VersionRef::new(2, "1.10.0", created),
        VersionRef::new(3, "1.9.0", created),
        VersionRef::new(4, "1.10.0-rc.1", created),
    ];
    let recs: Vec<_> = vs.iter().map(|v| RawDownloadRecord::new(v, day("2022-01-02"), 1)).collect();

    let data = to_chart_data(&recs, &[]).unwrap();
    assert_eq!(data.labels(), vec!["1.10.0", "1.10.0-rc.1", "1.9.0", "1.2.0"]);
}

#[test]
fn stable_first_demotes_prereleases() {
    let created = day("2022-01-01");
    let vs = [
        VersionRef::new(1, "1.4.2", created),
        VersionRef::new(2, "2.0.0-beta.1", created),
        VersionRef::new(3, "1.5.0", created),
    ];
    let recs: Vec<_> = vs.iter().map(|v| RawDownloadRecord::new(v, day("2022-01-02"), 1)).collect();

    let data = Transformer::new()
        .with_precedence(Box::new(StableFirstPrecedence))
        .transform(&recs, &[])
        .unwrap();
    assert_eq!(data.labels(), vec!["1.5.0", "1.4.2", "2.0.0-beta.1"]);
}

#[test]
fn same_input_same_output() {
    let t = Transformer::new().with_today(day("2021-01-03"));
    let a = t.transform(&records(), &extra()).unwrap();
    let b = t.transform(&records(), &extra()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_input_has_no_datasets() {
    let data = to_chart_data(&[], &[]).unwrap();
    assert!(data.is_empty());

    let with_today = Transformer::new().with_today(day("2021-01-01")).transform(&[], &[]).unwrap();
    assert!(with_today.is_empty());
}

#[test]
fn extras_alone_make_only_other() {
    let extras = vec![
        graph_core::AggregateExtraRecord { date: day("2021-01-04"), downloads: 3 },
        graph_core::AggregateExtraRecord { date: day("2021-01-02"), downloads: 5 },
    ];
    let data = to_chart_data(&[], &extras).unwrap();
    assert_eq!(data.labels(), vec!["Other"]);
    let ys: Vec<u64> = data.datasets[0].data.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![3, 0, 5]);
    assert_eq!(data.datasets[0].border_color, Rgb::from_hex(0x67001f));
}

#[test]
fn missing_creation_date_is_rejected() {
    let mut v = VersionRef::new(9, "0.9.0", day("2021-01-01"));
    v.created_at = None;
    let recs = vec![RawDownloadRecord::new(&v, day("2021-01-02"), 1)];

    let err = to_chart_data(&recs, &[]).unwrap_err();
    assert_eq!(err, TransformError::MissingCreationDate { id: 9, version: "0.9.0".into() });
}

#[test]
fn conflicting_version_metadata_is_rejected() {
    let a = VersionRef::new(9, "0.9.0", day("2021-01-01"));
    let b = VersionRef::new(9, "0.9.1", day("2021-01-01"));
    let recs = vec![
        RawDownloadRecord::new(&a, day("2021-01-02"), 1),
        RawDownloadRecord::new(&b, day("2021-01-03"), 1),
    ];
    assert!(matches!(
        to_chart_data(&recs, &[]),
        Err(TransformError::ConflictingVersion { id: 9, .. })
    ));
}

#[test]
fn duplicate_days_are_summed() {
    let v = VersionRef::new(1, "1.0.0", day("2021-01-01"));
    let recs = vec![
        RawDownloadRecord::new(&v, day("2021-01-02"), 4),
        RawDownloadRecord::new(&v, day("2021-01-02"), 6),
    ];
    let data = to_chart_data(&recs, &[]).unwrap();
    assert_eq!(data.datasets[0].value_on(day("2021-01-02")), Some(10));
}

#[test]
fn palette_cycles_past_its_end() {
    let created = day("2021-01-01");
    let vs: Vec<VersionRef> = (0..10).map(|i| VersionRef::new(i, format!("1.{i}.0"), created)).collect();
    let recs: Vec<_> = vs.iter().map(|v| RawDownloadRecord::new(v, created, 1)).collect();

    let data = to_chart_data(&recs, &[]).unwrap();
    let palette = Palette::diverging_rdbu();
    assert_eq!(data.datasets.len(), 10);
    assert_eq!(data.datasets[8].colors(), palette.pair_for(0));
    assert_eq!(data.datasets[9].colors(), palette.pair_for(1));
    assert_eq!(data.datasets[8].colors(), data.datasets[0].colors());
}

#[test]
fn injected_today_bounds_the_window() {
    let data = Transformer::new().with_today(day("2021-01-02")).transform(&records(), &[]).unwrap();
    let newest = data.series("1.0.56").unwrap();
    assert_eq!(newest.data[0], ChartPoint { x: day("2021-01-02"), y: 0 });
    assert_eq!(newest.value_on(day("2020-12-30")), Some(30520));

    // Records after `today` fall outside.
    let cut = Transformer::new().with_today(day("2020-12-29")).transform(&records(), &[]).unwrap();
    assert_eq!(cut.series("1.0.56").unwrap().data[0], ChartPoint { x: day("2020-12-29"), y: 31631 });
    assert_eq!(cut.series("1.0.56").unwrap().value_on(day("2020-12-30")), None);
}

#[test]
fn serializes_for_chart_library() {
    let data = registry_transformer().transform(&records(), &extra()).unwrap();
    let json = serde_json::to_value(&data).unwrap();
    let first = &json["datasets"][0];
    assert_eq!(first["label"], "1.0.56");
    assert_eq!(first["borderColor"], "#67001f");
    assert_eq!(first["backgroundColor"], "#d3b5bc");
    assert_eq!(first["cubicInterpolationMode"], "monotone");
    assert_eq!(first["pointHoverRadius"], 5);
    assert_eq!(first["data"][0]["x"], "2020-12-30");
    assert_eq!(first["data"][0]["y"], 30520);
    assert!(first.get("kind").is_none());
    assert_eq!(versions().len() + 1, json["datasets"].as_array().unwrap().len());
}
