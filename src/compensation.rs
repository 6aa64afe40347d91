//! Fixed-point compensation of raw ADC counts.
//!
//! All functions here are pure. Device units are tenths of °C for temperature and mbar × 10
//! for pressure. Every right shift is applied to a signed value and is therefore arithmetic
//! (rounds towards negative infinity), which the sensor's coefficients assume.

use crate::calibration::CalibrationSet;

/// Lower edge of the band in which no second-order correction is needed (20.0 °C).
pub const LOW_TEMPERATURE_LIMIT: i32 = 200;

/// Upper edge of the band in which no second-order correction is needed (45.0 °C).
pub const HIGH_TEMPERATURE_LIMIT: i32 = 450;

/// Selects whether the piecewise second-order correction is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompensationMode {
    /// First-order compensation only.
    #[default]
    Disabled,
    /// Correct readings taken below 20 °C or above 45 °C.
    Enabled,
}

impl CompensationMode {
    pub fn is_enabled(self) -> bool {
        self == CompensationMode::Enabled
    }
}

/// Difference between the measured temperature count `d2` and the reference count at 20 °C.
pub fn temperature_difference(cal: &CalibrationSet, d2: i16) -> i32 {
    let ut1 = ((cal.c5 as i64) << 3) + 20224;

    (d2 as i64 - ut1) as i32
}

/// First-order temperature in tenths of °C.
pub fn first_order_temperature(cal: &CalibrationSet, dt: i32) -> i32 {
    let temp = 200 + ((dt as i64 * (cal.c6 as i64 + 50)) >> 10);

    temp as i32
}

/// Returns the second-order temperature term `T2` if `temp` lies outside of
/// [`LOW_TEMPERATURE_LIMIT`]..=[`HIGH_TEMPERATURE_LIMIT`], [`None`] otherwise.
///
/// Both limits belong to the uncorrected band.
pub fn temperature_correction(cal: &CalibrationSet, temp: i32) -> Option<i32> {
    let c6 = cal.c6 as i64 + 24;
    let t = temp as i64;

    let t2 = if temp < LOW_TEMPERATURE_LIMIT {
        let d = LOW_TEMPERATURE_LIMIT as i64 - t;
        (11 * c6 * d * d) >> 20
    } else if temp > HIGH_TEMPERATURE_LIMIT {
        let d = HIGH_TEMPERATURE_LIMIT as i64 - t;
        (3 * c6 * d * d) >> 20
    } else {
        return None;
    };

    Some(t2 as i32)
}

/// Compensated temperature in tenths of °C from the raw temperature count `d2`.
pub fn temperature(cal: &CalibrationSet, d2: i16, mode: CompensationMode) -> i32 {
    let dt = temperature_difference(cal, d2);
    let temp = first_order_temperature(cal, dt);
    debug!("dT = {}, TEMP = {}", dt, temp);

    if !mode.is_enabled() {
        return temp;
    }

    match temperature_correction(cal, temp) {
        Some(t2) => {
            debug!("T2 = {}", t2);
            temp - t2
        }
        None => temp,
    }
}

/// First-order pressure in mbar × 10 from the raw pressure count `d1` and the temperature
/// difference `dt` taken alongside it.
pub fn first_order_pressure(cal: &CalibrationSet, d1: i16, dt: i32) -> i32 {
    let dt = dt as i64;
    let off = (cal.c2 as i64 * 4) + (((cal.c4 as i64 - 512) * dt) >> 12);
    let sens = cal.c1 as i64 + ((cal.c3 as i64 * dt) >> 10) + 24576;
    let x = ((sens * (d1 as i64 - 7168)) >> 14) - off;
    let pcomp = ((x * 10) >> 5) + 2500;
    debug!("OFF = {}, SENS = {}, X = {}, PCOMP = {}", off, sens, x, pcomp);

    pcomp as i32
}

/// Returns the second-order pressure term `P2` for a first-order pressure `pcomp` taken at
/// first-order temperature `temp`, or [`None`] when `temp` is inside the uncorrected band.
pub fn pressure_correction(cal: &CalibrationSet, temp: i32, pcomp: i32) -> Option<i32> {
    let t2 = temperature_correction(cal, temp)? as i64;
    let pcomp = pcomp as i64;

    let p2 = if temp < LOW_TEMPERATURE_LIMIT {
        (3 * t2 * (pcomp - 3500)) >> 14
    } else {
        (t2 * (pcomp - 10000)) >> 13
    };

    Some(p2 as i32)
}

/// Compensated pressure in mbar × 10 from the raw pressure count `d1` and the raw temperature
/// count `d2`.
pub fn pressure(cal: &CalibrationSet, d1: i16, d2: i16, mode: CompensationMode) -> i32 {
    let dt = temperature_difference(cal, d2);
    let pcomp = first_order_pressure(cal, d1, dt);

    if !mode.is_enabled() {
        return pcomp;
    }

    let temp = first_order_temperature(cal, dt);
    match pressure_correction(cal, temp, pcomp) {
        Some(p2) => {
            debug!("TEMP = {}, P2 = {}", temp, p2);
            pcomp - p2
        }
        None => pcomp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAL: CalibrationSet = CalibrationSet { c1: 23470, c2: 1324, c3: 737, c4: 393, c5: 1008, c6: 33 };

    fn cal_with(c5: i32, c6: i32) -> CalibrationSet {
        CalibrationSet { c5, c6, ..CAL }
    }

    #[test]
    fn temperature_above_band() {
        let cal = cal_with(100, 20);

        let dt = temperature_difference(&cal, 25000);
        assert_eq!(3976, dt);

        let temp = first_order_temperature(&cal, dt);
        assert_eq!(471, temp);

        let t2 = temperature_correction(&cal, temp).unwrap();
        assert_eq!((3 * 44 * 21 * 21) >> 20, t2);
        assert_eq!(temp - t2, temperature(&cal, 25000, CompensationMode::Enabled));
    }

    #[test]
    fn temperature_first_order() {
        assert_eq!(164, temperature(&CAL, 27856, CompensationMode::Disabled));
        assert_eq!(500, temperature(&CAL, 32000, CompensationMode::Disabled));
        assert_eq!(-472, temperature(&CAL, 20000, CompensationMode::Disabled));
    }

    #[test]
    fn temperature_second_order() {
        assert_eq!(561, temperature(&CAL, 32767, CompensationMode::Enabled));
        assert_eq!(-742, temperature(&CAL, 20000, CompensationMode::Enabled));
        assert_eq!(797, temperature(&cal_with(100, 20), 30000, CompensationMode::Enabled));
    }

    #[test]
    fn correction_band_limits_are_exempt() {
        assert_eq!(None, temperature_correction(&CAL, 200));
        assert_eq!(None, temperature_correction(&CAL, 450));
        assert_eq!(None, temperature_correction(&CAL, 300));

        assert_eq!(Some(0), temperature_correction(&CAL, 199));
        assert_eq!(Some(0), temperature_correction(&CAL, 451));

        assert_eq!(None, pressure_correction(&CAL, 200, 9000));
        assert_eq!(None, pressure_correction(&CAL, 450, 9000));
    }

    #[test]
    fn temperature_on_band_limits_is_unchanged() {
        // 28288 and 31373 are the first raw counts giving exactly 20.0 °C and 45.0 °C.
        assert_eq!(200, temperature(&CAL, 28288, CompensationMode::Enabled));
        assert_eq!(450, temperature(&CAL, 31373, CompensationMode::Enabled));
    }

    #[test]
    fn pressure_first_order() {
        let dt = temperature_difference(&CAL, 27856);
        assert_eq!(-432, dt);
        assert_eq!(9301, first_order_pressure(&CAL, 16460, dt));

        assert_eq!(8227, pressure(&CAL, 16460, 20000, CompensationMode::Disabled));
        assert_eq!(9972, pressure(&CAL, 16460, 32767, CompensationMode::Disabled));
    }

    #[test]
    fn pressure_is_deterministic() {
        let first = pressure(&CAL, 16460, 27856, CompensationMode::Enabled);
        for _ in 0..10 {
            assert_eq!(first, pressure(&CAL, 16460, 27856, CompensationMode::Enabled));
        }
    }

    #[test]
    fn pressure_second_order_below_band() {
        assert_eq!(Some(233), pressure_correction(&CAL, -472, 8227));
        assert_eq!(7994, pressure(&CAL, 16460, 20000, CompensationMode::Enabled));
    }

    #[test]
    fn pressure_second_order_above_band_keeps_sign() {
        // (2 * (9972 - 10000)) >> 13 must round towards negative infinity
        assert_eq!(Some(-1), pressure_correction(&CAL, 563, 9972));
        assert_eq!(9973, pressure(&CAL, 16460, 32767, CompensationMode::Enabled));
        assert_eq!(10585, pressure(&cal_with(100, 20), 16460, 30000, CompensationMode::Enabled));
    }

    #[test]
    fn pressure_inside_band_ignores_mode() {
        assert_eq!(
            pressure(&CAL, 16460, 30000, CompensationMode::Disabled),
            pressure(&CAL, 16460, 30000, CompensationMode::Enabled)
        );
    }

    #[test]
    fn default_mode_is_disabled() {
        assert_eq!(CompensationMode::Disabled, CompensationMode::default());
        assert!(CompensationMode::Enabled.is_enabled());
    }
}
