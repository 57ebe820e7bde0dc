use super::*;
use chrono::{Duration, Timelike};
use chrono_tz::America::Chicago;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn minneapolis() -> GeoCoordinate {
    GeoCoordinate::new(44.9778, -93.2650).unwrap()
}

/// Coordinate validation happens once, at construction.
#[test]
fn test_coordinate_validation() {
    assert!(GeoCoordinate::new(40.7128, -74.0060).is_ok());
    assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
    assert!(GeoCoordinate::new(-90.0, -180.0).is_ok());

    assert!(GeoCoordinate::new(91.0, 0.0).is_err());
    assert!(GeoCoordinate::new(-91.0, 0.0).is_err());
    assert!(GeoCoordinate::new(0.0, 181.0).is_err());
    assert!(GeoCoordinate::new(0.0, -360.0).is_err());
    assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());

    match GeoCoordinate::new(0.0, 200.0) {
        Err(DaylightError::OutOfBoundsInput { field, .. }) => assert_eq!(field, "longitude"),
        other => panic!("expected OutOfBoundsInput, got {other:?}"),
    }
}

#[test]
fn test_coordinate_display() {
    assert_eq!(minneapolis().to_string(), "44.978°N, 93.265°W");
    let sydney = GeoCoordinate::new(-33.8688, 151.2093).unwrap();
    assert_eq!(sydney.to_string(), "33.869°S, 151.209°E");
}

/// Mid-continent reference durations at both solstices.
#[test]
fn test_mid_continent_solstice_durations() {
    let coord = GeoCoordinate::new(45.0, -93.0).unwrap();

    let winter = calculate_daylight(date(2024, 12, 21), coord, &Chicago).unwrap();
    assert!(
        (winter.daylight_minutes() - 526.0).abs() <= 10.0,
        "winter solstice daylight was {:.1} minutes",
        winter.daylight_minutes()
    );

    for day in [20, 21] {
        let summer = calculate_daylight(date(2025, 6, day), coord, &Chicago).unwrap();
        assert!(
            (summer.daylight_minutes() - 937.0).abs() <= 10.0,
            "June {day} daylight was {:.1} minutes",
            summer.daylight_minutes()
        );
    }
}

#[test]
fn test_equator_is_about_twelve_hours_all_year() {
    let coord = GeoCoordinate::new(0.0, 0.0).unwrap();
    let june = calculate_daylight(date(2025, 6, 21), coord, &Utc).unwrap();
    let december = calculate_daylight(date(2025, 12, 21), coord, &Utc).unwrap();

    assert!((june.daylight_minutes() - 720.0).abs() <= 15.0);
    assert!((december.daylight_minutes() - 720.0).abs() <= 15.0);
    assert!((june.daylight_minutes() - december.daylight_minutes()).abs() < 10.0);
}

/// The snapshot duration is exactly the distance between its two instants.
#[test]
fn test_snapshot_duration_invariant() {
    let snapshot = calculate_daylight(date(2025, 3, 20), minneapolis(), &Chicago).unwrap();
    assert_eq!(
        snapshot.daylight_seconds,
        (snapshot.sunset - snapshot.sunrise).num_seconds()
    );
    assert!(snapshot.is_for(date(2025, 3, 20)));
    assert!(!snapshot.is_for(date(2025, 3, 21)));
}

/// Instants land on the requested local date, in the location's offset.
#[test]
fn test_instants_are_local() {
    let snapshot = calculate_daylight(date(2025, 1, 21), minneapolis(), &Chicago).unwrap();

    assert_eq!(snapshot.sunrise.offset().local_minus_utc(), -6 * 3600);
    assert_eq!(snapshot.sunrise.date_naive(), date(2025, 1, 21));
    assert_eq!(snapshot.sunset.date_naive(), date(2025, 1, 21));
    assert!(snapshot.sunrise.hour() == 7, "sunrise at {}", snapshot.sunrise);
    assert!(snapshot.sunset.hour() == 17, "sunset at {}", snapshot.sunset);
}

#[test]
fn test_civil_twilight_brackets_sunrise_and_sunset() {
    let events = solar_events(date(2025, 4, 15), minneapolis(), &Chicago);

    let dawn = events.civil_dawn().unwrap();
    let sunrise = events.sunrise().unwrap();
    let sunset = events.sunset().unwrap();
    let dusk = events.civil_dusk().unwrap();

    assert!(dawn < sunrise);
    assert!(sunrise < events.solar_noon);
    assert!(events.solar_noon < sunset);
    assert!(sunset < dusk);

    let morning = sunrise - dawn;
    let evening = dusk - sunset;
    assert!(morning > Duration::minutes(20) && morning < Duration::minutes(45));
    assert!(evening > Duration::minutes(20) && evening < Duration::minutes(45));
}

#[test]
fn test_polar_day_and_night() {
    let svalbard = GeoCoordinate::new(78.2232, 15.6267).unwrap();
    let oslo = chrono_tz::Europe::Oslo;

    assert_eq!(
        crossing(date(2025, 6, 21), svalbard, &oslo, Zenith::Official),
        Crossing::AlwaysAbove
    );
    assert_eq!(
        crossing(date(2025, 12, 21), svalbard, &oslo, Zenith::Official),
        Crossing::AlwaysBelow
    );
    assert!(calculate_daylight(date(2025, 6, 21), svalbard, &oslo).is_none());
    assert!(calculate_daylight(date(2025, 12, 21), svalbard, &oslo).is_none());

    match require_daylight(date(2025, 12, 21), svalbard, &oslo) {
        Err(DaylightError::UndefinedCrossing { date: d, .. }) => assert_eq!(d, date(2025, 12, 21)),
        other => panic!("expected UndefinedCrossing, got {other:?}"),
    }
}

/// Civil twilight can stay undefined when sunrise itself exists (white nights).
#[test]
fn test_white_nights_have_sunrise_but_no_civil_twilight() {
    let trondheim = GeoCoordinate::new(63.5, 10.4).unwrap();
    let events = solar_events(date(2025, 6, 21), trondheim, &chrono_tz::Europe::Oslo);

    assert!(events.daylight.is_defined());
    assert_eq!(events.civil_twilight, Crossing::AlwaysAbove);
    assert!(events.civil_dawn().is_none());
}

#[test]
fn test_poles_do_not_panic() {
    for lat in [90.0, -90.0] {
        let pole = GeoCoordinate::new(lat, 0.0).unwrap();
        for month in 1..=12 {
            let outcome = crossing(date(2025, month, 15), pole, &Utc, Zenith::Official);
            assert!(!outcome.is_defined(), "pole {lat} month {month}: {outcome:?}");
        }
    }
}

#[test]
fn test_custom_zenith_matches_named_zenith() {
    let d = date(2025, 9, 1);
    assert_eq!(
        crossing(d, minneapolis(), &Chicago, Zenith::Custom(96.0)),
        crossing(d, minneapolis(), &Chicago, Zenith::Civil)
    );
}

#[test]
fn test_leap_day_is_computed() {
    let snapshot = calculate_daylight(date(2024, 2, 29), minneapolis(), &Chicago).unwrap();
    let before = calculate_daylight(date(2024, 2, 28), minneapolis(), &Chicago).unwrap();
    assert!(snapshot.daylight_seconds > before.daylight_seconds);
}

#[test]
fn test_snapshot_serde_roundtrip_keeps_offset() {
    let snapshot = calculate_daylight(date(2025, 1, 21), minneapolis(), &Chicago).unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: DaylightSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
    assert_eq!(restored.sunrise.offset().local_minus_utc(), -6 * 3600);
}

#[test]
fn test_snapshot_describes_its_date_and_location() {
    let snapshot = calculate_daylight(date(2025, 1, 21), minneapolis(), &Chicago).unwrap();
    assert_eq!(snapshot.location, minneapolis());
    assert!(snapshot.describes(date(2025, 1, 21), minneapolis()));

    let jitter = GeoCoordinate::new(44.9778 + 1e-9, -93.2650).unwrap();
    assert!(snapshot.describes(date(2025, 1, 21), jitter));

    let miami = GeoCoordinate::new(25.7617, -80.1918).unwrap();
    assert!(snapshot.is_for(date(2025, 1, 21)));
    assert!(!snapshot.describes(date(2025, 1, 21), miami));
    assert!(!snapshot.describes(date(2025, 1, 22), minneapolis()));
}

#[test]
fn test_snapshot_with_invalid_location_is_rejected() {
    let snapshot = calculate_daylight(date(2025, 1, 21), minneapolis(), &Chicago).unwrap();
    let mut json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["location"]["latitude"], 44.9778);

    json["location"]["latitude"] = serde_json::json!(91.0);
    assert!(serde_json::from_value::<DaylightSnapshot>(json).is_err());
}
