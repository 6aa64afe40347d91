use crate::compensation::CompensationMode;
use crate::units::PressureUnit;

/// Defaults used by the `*_default` read methods of the driver.
///
/// Bus settings are not part of this; see [`crate::bus::Spi`] for what the SPI peripheral
/// has to be configured to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub(crate) temperature_compensation: CompensationMode,
    pub(crate) pressure_compensation: CompensationMode,
    pub(crate) pressure_unit: PressureUnit,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            temperature_compensation: CompensationMode::Enabled,
            pressure_compensation: CompensationMode::Disabled,
            pressure_unit: PressureUnit::Millibar,
        }
    }
}

impl Configuration {
    /// Second-order compensation applied to temperature readings.
    pub fn temperature_compensation(mut self, mode: CompensationMode) -> Self {
        self.temperature_compensation = mode;

        self
    }

    /// Second-order compensation applied to pressure readings.
    ///
    /// Enabling this does not cost an extra bus transaction, the temperature needed for the
    /// correction is taken from the same reading that compensates the pressure.
    pub fn pressure_compensation(mut self, mode: CompensationMode) -> Self {
        self.pressure_compensation = mode;

        self
    }

    pub fn pressure_unit(mut self, unit: PressureUnit) -> Self {
        self.pressure_unit = unit;

        self
    }

    /// Enables second-order compensation for both temperature and pressure.
    pub fn full_compensation(self) -> Self {
        self.temperature_compensation(CompensationMode::Enabled)
            .pressure_compensation(CompensationMode::Enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();

        assert_eq!(CompensationMode::Enabled, config.temperature_compensation);
        assert_eq!(CompensationMode::Disabled, config.pressure_compensation);
        assert_eq!(PressureUnit::Millibar, config.pressure_unit);
    }

    #[test]
    fn builder() {
        let config = Configuration::default()
            .temperature_compensation(CompensationMode::Disabled)
            .pressure_unit(PressureUnit::MillimetersMercury);

        assert_eq!(CompensationMode::Disabled, config.temperature_compensation);
        assert_eq!(PressureUnit::MillimetersMercury, config.pressure_unit);

        let config = config.full_compensation();
        assert_eq!(CompensationMode::Enabled, config.temperature_compensation);
        assert_eq!(CompensationMode::Enabled, config.pressure_compensation);
    }
}
