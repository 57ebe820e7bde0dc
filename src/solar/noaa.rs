//! NOAA general solar position approximation.
//!
//! Day-level Fourier series for the equation of time and solar declination, and the
//! hour angle at which the sun crosses a given zenith angle. Accuracy is on the order
//! of a minute at mid latitudes, which is enough for day-to-day daylight comparison.

#![allow(clippy::unreadable_literal)]

use std::f64::consts::PI;

/// Result of solving the hour-angle equation for one zenith angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum HourAngle {
    /// Sun crosses the zenith angle; half the arc between crossings, in degrees.
    Degrees(f64),
    /// Sun stays above the zenith angle all day.
    AlwaysAbove,
    /// Sun never reaches the zenith angle.
    AlwaysBelow,
}

/// Per-day solar parameters that do not depend on location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SolarDay {
    /// Equation of time in minutes (apparent minus mean solar time).
    pub equation_of_time: f64,
    /// Solar declination in radians.
    pub declination: f64,
}

impl SolarDay {
    /// Compute parameters for a 1-based day of the year.
    pub fn for_ordinal(day_of_year: u32) -> Self {
        let gamma = fractional_year(day_of_year);
        Self {
            equation_of_time: equation_of_time(gamma),
            declination: declination(gamma),
        }
    }

    /// Solve `cos(H) = cos(zenith)/(cos(lat)·cos(δ)) − tan(lat)·tan(δ)`.
    pub fn hour_angle(&self, latitude_deg: f64, zenith_deg: f64) -> HourAngle {
        let lat = latitude_deg.to_radians();
        let zenith = zenith_deg.to_radians();
        let cos_h = zenith.cos() / (lat.cos() * self.declination.cos())
            - lat.tan() * self.declination.tan();

        if cos_h < -1.0 {
            HourAngle::AlwaysAbove
        } else if cos_h > 1.0 || cos_h.is_nan() {
            HourAngle::AlwaysBelow
        } else {
            HourAngle::Degrees(cos_h.acos().to_degrees())
        }
    }

    /// Minutes after UTC midnight at which an event with the given signed hour angle occurs.
    ///
    /// A negative hour angle is the rising event, positive the setting event, zero is solar noon.
    pub fn utc_minutes(&self, longitude_deg: f64, hour_angle_deg: f64) -> f64 {
        720.0 - 4.0 * (longitude_deg - hour_angle_deg) - self.equation_of_time
    }
}

/// Fractional year angle γ in radians.
pub(crate) fn fractional_year(day_of_year: u32) -> f64 {
    2.0 * PI / 365.0 * (f64::from(day_of_year) - 1.0)
}

/// Equation of time in minutes.
pub(crate) fn equation_of_time(gamma: f64) -> f64 {
    229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin())
}

/// Solar declination in radians.
pub(crate) fn declination(gamma: f64) -> f64 {
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin()
}
