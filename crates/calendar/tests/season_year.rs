use agrorisk_calendar::{SeasonalWindow, season_year};

#[test]
fn wrapping_window_months_share_one_season() {
    let w = SeasonalWindow::parse("01.10", "31.05").unwrap();
    let start = w.start().month();
    // October 1999 .. May 2000 all map to season 2000.
    let seasons: Vec<i32> = w
        .months()
        .into_iter()
        .map(|m| {
            let calendar_year = if m >= start { 1999 } else { 2000 };
            season_year(calendar_year, m, start).unwrap()
        })
        .collect();
    assert!(seasons.iter().all(|&s| s == 2000), "{seasons:?}");
}

#[test]
fn negative_years() {
    assert_eq!(season_year(-100, 10, 10).unwrap(), -99);
    assert_eq!(season_year(-1, 1, 10).unwrap(), -1);
}
