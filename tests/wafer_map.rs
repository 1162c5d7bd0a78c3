use wafer_dicing_toolbox::wafer_map::{parse_wafer_map, DieStatus, WaferMapRecord, WaferMapSummary};

#[test]
fn simple_map_has_one_good_and_one_bad() {
    let records = parse_wafer_map("x,y,status\n0,0,good\n0,1,bad");
    assert_eq!(
        records,
        vec![
            WaferMapRecord { x: 0, y: 0, status: DieStatus::Good },
            WaferMapRecord { x: 0, y: 1, status: DieStatus::Bad },
        ]
    );
    let s = WaferMapSummary::from_records(&records);
    assert_eq!((s.total, s.good, s.bad), (2, 1, 1));
    assert!((s.yield_percent - 50.0).abs() < 1e-12);
}

#[test]
fn header_only_is_empty() {
    assert!(parse_wafer_map("x,y,status").is_empty());
    assert!(parse_wafer_map("x,y,status\n").is_empty());
    assert!(parse_wafer_map("").is_empty());
    assert!(WaferMapSummary::from_records(&[]).yield_percent.is_nan());
}

#[test]
fn first_line_is_consumed_even_if_it_is_data() {
    let records = parse_wafer_map("1,1,bad\n2,2,bad\n");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].x, 2);
}

#[test]
fn crlf_whitespace_and_reordered_columns() {
    let text = "Status , DIE_Y, die_x\r\n BAD , 3 , -4 \r\n\r\ngood,5,6\r\n";
    let records = parse_wafer_map(text);
    assert_eq!(
        records,
        vec![
            WaferMapRecord { x: -4, y: 3, status: DieStatus::Bad },
            WaferMapRecord { x: 6, y: 5, status: DieStatus::Good },
        ]
    );
}

#[test]
fn missing_and_malformed_fields_fall_back() {
    let records = parse_wafer_map("x,y,status\n7\n,,\nabc,2.9,unknown\n");
    assert_eq!(
        records,
        vec![
            WaferMapRecord { x: 7, y: 0, status: DieStatus::Good },
            WaferMapRecord { x: 0, y: 0, status: DieStatus::Good },
            WaferMapRecord { x: 0, y: 2, status: DieStatus::Good },
        ]
    );
}

#[test]
fn duplicates_are_kept() {
    let records = parse_wafer_map("x,y,status\n1,1,bad\n1,1,bad\n");
    assert_eq!(records.len(), 2);
}
