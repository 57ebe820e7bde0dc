use super::*;
use chrono_tz::America::Chicago;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn minneapolis() -> GeoCoordinate {
    GeoCoordinate::new(44.9778, -93.2650).unwrap()
}

fn mid_continent() -> GeoCoordinate {
    GeoCoordinate::new(45.0, -93.0).unwrap()
}

#[test]
fn test_velocity_peaks_at_equinoxes() {
    for day in [date(2025, 3, 20), date(2025, 9, 22)] {
        let velocity = daylight_velocity(day, mid_continent(), &Chicago).unwrap();
        assert!(velocity.abs() > 120, "velocity on {day} was {velocity}");
    }
    assert!(daylight_velocity(date(2025, 3, 20), mid_continent(), &Chicago).unwrap() > 0);
    assert!(daylight_velocity(date(2025, 9, 22), mid_continent(), &Chicago).unwrap() < 0);
}

#[test]
fn test_velocity_vanishes_at_solstices() {
    for day in [date(2024, 12, 21), date(2025, 6, 21)] {
        let velocity = daylight_velocity(day, mid_continent(), &Chicago).unwrap();
        assert!(velocity.abs() < 60, "velocity on {day} was {velocity}");
    }
}

#[test]
fn test_cumulative_change_from_a_solstice_to_itself_is_zero() {
    for solstice in [date(2024, 12, 21), date(2025, 6, 20), date(2025, 12, 21)] {
        assert_eq!(
            cumulative_change_seconds(solstice, solstice, minneapolis(), &Chicago).unwrap(),
            0
        );
    }
}

#[test]
fn test_daily_change_matches_snapshot_difference() {
    let from = date(2025, 2, 10);
    let to = date(2025, 2, 11);
    let change = daily_change_seconds(from, to, minneapolis(), &Chicago).unwrap();

    let before = crate::solar::calculate_daylight(from, minneapolis(), &Chicago).unwrap();
    let after = crate::solar::calculate_daylight(to, minneapolis(), &Chicago).unwrap();
    assert_eq!(change, after.daylight_seconds - before.daylight_seconds);
    assert!(change > 0);
}

/// Velocity and daily change are different quantities.
#[test]
fn test_velocity_is_a_central_difference() {
    let day = date(2025, 4, 10);
    let velocity = daylight_velocity(day, minneapolis(), &Chicago).unwrap();
    let span = daily_change_seconds(date(2025, 4, 9), date(2025, 4, 11), minneapolis(), &Chicago)
        .unwrap();
    assert_eq!(velocity, (span as f64 / 2.0).round() as i64);
}

#[test]
fn test_compare_without_references_requests_solstice_persistence() {
    let comparison = compare(date(2025, 1, 21), minneapolis(), &Chicago, &References::default())
        .unwrap();

    let result = &comparison.result;
    assert_eq!(result.season, SeasonClassification::GainingDaylight);
    assert_eq!(result.reference_solstice.date, date(2024, 12, 21));
    assert!(result.cumulative_change_seconds.unwrap() > 1200);
    assert!(result.daily_change_seconds > 60);

    assert_eq!(comparison.persist.len(), 1);
    assert_eq!(comparison.persist[0].key, SnapshotKey::LastSolstice);
    assert_eq!(comparison.persist[0].snapshot.date, date(2024, 12, 21));
}

#[test]
fn test_compare_uses_matching_cached_references() {
    let today = date(2025, 1, 21);
    let snapshot_today = crate::solar::calculate_daylight(today, minneapolis(), &Chicago).unwrap();

    let mut yesterday =
        crate::solar::calculate_daylight(date(2025, 1, 20), minneapolis(), &Chicago).unwrap();
    yesterday.daylight_seconds = snapshot_today.daylight_seconds - 1000;
    let mut solstice =
        crate::solar::calculate_daylight(date(2024, 12, 21), minneapolis(), &Chicago).unwrap();
    solstice.daylight_seconds = snapshot_today.daylight_seconds - 5000;

    let references = References {
        yesterday: Some(yesterday),
        last_solstice: Some(solstice),
    };
    let comparison = compare(today, minneapolis(), &Chicago, &references).unwrap();

    assert_eq!(comparison.result.daily_change_seconds, 1000);
    assert_eq!(comparison.result.cumulative_change_seconds, Some(5000));
    assert!(comparison.persist.is_empty());
}

#[test]
fn test_compare_recomputes_stale_references() {
    let today = date(2025, 1, 21);
    let stale = crate::solar::calculate_daylight(date(2025, 1, 10), minneapolis(), &Chicago).unwrap();
    let references = References {
        yesterday: Some(stale.clone()),
        last_solstice: Some(stale),
    };

    let cached = compare(today, minneapolis(), &Chicago, &references).unwrap();
    let fresh = compare(today, minneapolis(), &Chicago, &References::default()).unwrap();

    assert_eq!(cached.result, fresh.result);
    assert_eq!(cached.persist, fresh.persist);
}

#[test]
fn test_compare_ignores_references_from_another_location() {
    let today = date(2025, 1, 22);
    let references = References {
        yesterday: crate::solar::calculate_daylight(date(2025, 1, 21), minneapolis(), &Chicago),
        last_solstice: crate::solar::calculate_daylight(date(2024, 12, 21), minneapolis(), &Chicago),
    };

    let miami = GeoCoordinate::new(25.7617, -80.1918).unwrap();
    let tz = chrono_tz::America::New_York;
    let moved = compare(today, miami, &tz, &references).unwrap();
    let fresh = compare(today, miami, &tz, &References::default()).unwrap();

    assert_eq!(moved.result, fresh.result);
    assert_eq!(
        moved.result.daily_change_seconds,
        daily_change_seconds(date(2025, 1, 21), today, miami, &tz).unwrap()
    );
    assert_eq!(moved.persist.len(), 1);
    assert_eq!(moved.persist[0].snapshot.location, miami);
}

#[test]
fn test_cached_reference_within_tolerance_is_reused() {
    let today = date(2025, 1, 21);
    let mut solstice =
        crate::solar::calculate_daylight(date(2024, 12, 21), minneapolis(), &Chicago).unwrap();
    solstice.daylight_seconds -= 7;
    let references = References {
        yesterday: None,
        last_solstice: Some(solstice),
    };

    let nearby = GeoCoordinate::new(44.9778 + 1e-9, -93.2650 - 1e-9).unwrap();
    let comparison = compare(today, nearby, &Chicago, &references).unwrap();
    let fresh = compare(today, nearby, &Chicago, &References::default()).unwrap();

    assert!(comparison.persist.is_empty());
    assert_eq!(
        comparison.result.cumulative_change_seconds,
        fresh.result.cumulative_change_seconds.map(|change| change + 7)
    );
}

/// The sun is back over Tromsø in February, but the December solstice was polar night.
#[test]
fn test_polar_night_solstice_only_drops_cumulative_change() {
    let tromso = GeoCoordinate::new(69.6492, 18.9553).unwrap();
    let tz = chrono_tz::Europe::Oslo;
    let today = date(2025, 2, 1);

    let comparison = compare(today, tromso, &tz, &References::default()).unwrap();

    assert_eq!(comparison.result.reference_solstice.date, date(2024, 12, 21));
    assert_eq!(comparison.result.cumulative_change_seconds, None);
    assert!(comparison.result.daily_change_seconds > 0);
    assert_eq!(comparison.result.season, SeasonClassification::GainingDaylight);
    assert!(comparison.persist.is_empty());
}

#[test]
fn test_compare_during_polar_night_is_unavailable() {
    let svalbard = GeoCoordinate::new(78.2232, 15.6267).unwrap();
    let outcome = compare(
        date(2025, 12, 21),
        svalbard,
        &chrono_tz::Europe::Oslo,
        &References::default(),
    );

    match outcome {
        Err(DaylightError::MissingReference { kind, date: d }) => {
            assert_eq!(kind, ReferenceKind::Today);
            assert_eq!(d, date(2025, 12, 21));
        }
        other => panic!("expected MissingReference, got {other:?}"),
    }
    assert!(daylight_velocity(date(2025, 12, 21), svalbard, &chrono_tz::Europe::Oslo).is_err());
}

/// South of the equator January days are shortening.
#[test]
fn test_compare_in_southern_hemisphere() {
    let sydney = GeoCoordinate::new(-33.8688, 151.2093).unwrap();
    let tz = chrono_tz::Australia::Sydney;
    let comparison = compare(date(2025, 1, 21), sydney, &tz, &References::default()).unwrap();

    assert_eq!(comparison.result.season, SeasonClassification::LosingDaylight);
    assert!(comparison.result.daily_change_seconds < 0);
    assert!(comparison.result.cumulative_change_seconds.unwrap() < 0);
    assert!(daylight_velocity(date(2025, 1, 21), sydney, &tz).unwrap() < 0);
}

#[test]
fn test_season_agrees_with_velocity_near_equinoxes() {
    for (day, season) in [
        (date(2025, 3, 25), SeasonClassification::GainingDaylight),
        (date(2025, 9, 25), SeasonClassification::LosingDaylight),
    ] {
        let comparison = compare(day, mid_continent(), &Chicago, &References::default()).unwrap();
        let velocity = daylight_velocity(day, mid_continent(), &Chicago).unwrap();
        assert_eq!(comparison.result.season, season);
        assert_eq!(velocity > 0, season.is_gaining());
    }
}
