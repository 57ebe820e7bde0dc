//! Timezone handling for solar calculations.
//!
//! The solar engine works in UTC internally and only needs the location's UTC offset
//! on a given calendar day to present instants in local time. The offset is taken at
//! local noon so daylight saving transitions (which happen at night) resolve to the
//! offset in force during daylight hours.

use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use tzf_rs::DefaultFinder;

static FINDER: Lazy<DefaultFinder> = Lazy::new(DefaultFinder::new);

/// UTC offset of `tz` in effect at local noon on `date`.
pub fn offset_on<Z: TimeZone>(tz: &Z, date: NaiveDate) -> FixedOffset {
    let noon = date.and_time(NaiveTime::MIN) + TimeDelta::hours(12);
    tz.offset_from_local_datetime(&noon)
        .earliest()
        .map(|offset| offset.fix())
        .unwrap_or_else(|| tz.offset_from_utc_datetime(&noon).fix())
}

/// Look up the IANA timezone containing the given coordinates.
///
/// Falls back to UTC for open ocean or when the finder returns a name chrono-tz
/// does not know.
pub fn determine_timezone_from_coordinates(latitude: f64, longitude: f64) -> Tz {
    let name = FINDER.get_tz_name(longitude, latitude);
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            log_debug!("No timezone match for '{name}', using UTC");
            Tz::UTC
        }
    }
}

/// Parse an IANA timezone name, with a helpful error message.
pub fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Unknown timezone '{name}' (expected an IANA name like 'America/Chicago')"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_offset_tracks_daylight_saving() {
        let chicago = chrono_tz::America::Chicago;
        let winter = NaiveDate::from_ymd_opt(2025, 1, 21).unwrap();
        let summer = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        assert_eq!(offset_on(&chicago, winter).local_minus_utc(), -6 * 3600);
        assert_eq!(offset_on(&chicago, summer).local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_offset_for_fixed_zones() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(offset_on(&Utc, date).local_minus_utc(), 0);

        let fixed = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(offset_on(&fixed, date), fixed);
    }

    #[test]
    fn test_offset_on_spring_forward_day() {
        // US clocks change at 02:00 on 2024-03-10; noon is already daylight time
        let chicago = chrono_tz::America::Chicago;
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(offset_on(&chicago, date).local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_timezone_detection() {
        use chrono_tz::{America, Europe};

        assert_eq!(
            determine_timezone_from_coordinates(44.9778, -93.2650),
            America::Chicago
        );
        assert_eq!(
            determine_timezone_from_coordinates(51.5074, -0.1278),
            Europe::London
        );
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(
            parse_timezone("America/Chicago").unwrap(),
            chrono_tz::America::Chicago
        );
        assert!(parse_timezone("Mars/Olympus_Mons").is_err());
    }
}
