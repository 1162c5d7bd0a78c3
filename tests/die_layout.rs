use wafer_dicing_toolbox::process::{die_count, DieLayout};

#[test]
fn larger_wafer_gives_at_least_as_many_dies() {
    let small = die_count(200.0, 5.0, 5.0, 60.0);
    let large = die_count(300.0, 5.0, 5.0, 60.0);
    assert!(large.usable_dies >= small.usable_dies);
}

#[test]
fn wider_street_gives_no_more_dies() {
    let narrow = die_count(300.0, 5.0, 5.0, 40.0);
    let wide = die_count(300.0, 5.0, 5.0, 120.0);
    assert!(wide.usable_dies <= narrow.usable_dies);
}

#[test]
fn monotonic_over_a_sweep() {
    let mut prev = 0;
    for d in (50..=450).step_by(25) {
        let n = die_count(f64::from(d), 3.0, 4.0, 50.0).usable_dies;
        assert!(n >= prev, "d={d}");
        prev = n;
    }
}

#[test]
fn grid_for_200mm_wafer() {
    let layout = die_count(200.0, 5.0, 5.0, 60.0);
    // pitch 5.06 mm -> floor(200 / 5.06) = 39
    assert_eq!(layout.columns, 39);
    assert_eq!(layout.rows, 39);
    assert!(u64::from(layout.usable_dies) <= layout.grid_dies());
    assert!(layout.usable_dies > 0);
}

#[test]
fn degenerate_geometry_is_empty() {
    assert_eq!(die_count(0.0, 5.0, 5.0, 60.0).usable_dies, 0);
    assert_eq!(die_count(300.0, 0.0, 0.0, 0.0), DieLayout::default());
    assert_eq!(die_count(300.0, f64::NAN, 5.0, 60.0).columns, 0);
}
