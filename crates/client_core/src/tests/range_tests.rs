use super::*;

#[test]
fn parses_two_segments_in_order() {
    let clips = parse_ranges(Some("00:01-00:10|00:15-00:20"));
    assert_eq!(clips.len(), 2);

    assert_eq!(clips[0].index, 0);
    assert_eq!(clips[0].start_seconds, 1);
    assert_eq!(clips[0].end_seconds, 10);
    assert_eq!(clips[0].label, "Step 1");
    assert_eq!(clips[0].id(), "clip-0");
    assert_eq!(clips[0].raw_range, "00:01-00:10");

    assert_eq!(clips[1].index, 1);
    assert_eq!(clips[1].start_seconds, 15);
    assert_eq!(clips[1].end_seconds, 20);
    assert_eq!(clips[1].label, "Step 2");
}

#[test]
fn drops_malformed_segment_and_keeps_siblings() {
    let clips = parse_ranges(Some("00:01-00:10|garbage|00:15-00:20"));
    let bounds: Vec<_> = clips
        .iter()
        .map(|c| (c.index, c.start_seconds, c.end_seconds))
        .collect();
    assert_eq!(bounds, vec![(0, 1, 10), (1, 15, 20)]);
}

#[test]
fn empty_and_missing_encodings_yield_nothing() {
    assert!(parse_ranges(None).is_empty());
    assert!(parse_ranges(Some("")).is_empty());
    assert!(parse_ranges(Some("   ")).is_empty());
}

#[test]
fn rejects_bad_field_counts_and_non_numeric_fields() {
    for encoding in [
        "00:01",
        "1-2",
        "00:00:00:01-00:00:00:05",
        "aa:01-00:05",
        "00:01-00:x5",
        "-00:05",
        "00:01-",
        "00:-1-00:05",
    ] {
        assert!(
            parse_ranges(Some(encoding)).is_empty(),
            "{encoding:?} should not produce clips"
        );
    }
}

#[test]
fn rejects_empty_or_inverted_intervals() {
    assert!(parse_ranges(Some("00:10-00:10")).is_empty());
    assert!(parse_ranges(Some("00:10-00:05")).is_empty());
}

#[test]
fn passes_overlapping_and_out_of_order_ranges_through() {
    let clips = parse_ranges(Some("01:00-01:30|00:10-00:40|00:20-00:50"));
    let starts: Vec<_> = clips.iter().map(|c| c.start_seconds).collect();
    assert_eq!(starts, vec![60, 10, 20]);
}

#[test]
fn mixes_hour_and_minute_literals_and_trims_whitespace() {
    let clips = parse_ranges(Some(" 59:30 - 01:00:15 | 01:02:03-01:02:04 "));
    assert_eq!(clips.len(), 2);
    assert_eq!(clips[0].start_seconds, 3570);
    assert_eq!(clips[0].end_seconds, 3615);
    assert_eq!(clips[0].raw_range, "59:30 - 01:00:15");
    assert_eq!(clips[1].start_seconds, 3723);
    assert_eq!(clips[1].duration_seconds(), 1);
}

#[test]
fn inverted_clip_has_zero_duration() {
    let clip = Clip {
        index: 0,
        label: "Step 1".into(),
        start_seconds: 10,
        end_seconds: 5,
        raw_range: "00:10-00:05".into(),
    };
    assert_eq!(clip.duration_seconds(), 0);
}

#[test]
fn reparsing_is_idempotent() {
    let encoding = Some("00:01-00:10|bad|00:15-00:20");
    assert_eq!(parse_ranges(encoding), parse_ranges(encoding));
}

#[test]
fn time_literals_convert_by_field_count() {
    assert_eq!(time_to_seconds("02:05"), Some(125));
    assert_eq!(time_to_seconds("1:02:05"), Some(3725));
    assert_eq!(time_to_seconds("5"), None);
    assert_eq!(time_to_seconds(""), None);
    assert_eq!(time_to_seconds("1:2:3:4"), None);
    assert_eq!(time_to_seconds("4294967295:00"), None);
}

#[test]
fn seconds_to_time_round_trips_canonical_literals() {
    for literal in ["00:00", "00:59", "07:05", "59:59", "01:00:00", "12:34:56"] {
        let seconds = time_to_seconds(literal).expect("valid literal");
        assert_eq!(seconds_to_time(seconds), literal);
    }
    assert_eq!(seconds_to_time(time_to_seconds("75:00").expect("valid")), "01:15:00");
}

#[test]
fn clip_display_uses_label_and_raw_range() {
    let clips = parse_ranges(Some("00:01-00:10"));
    assert_eq!(clips[0].to_string(), "Step 1 (00:01-00:10)");
}
