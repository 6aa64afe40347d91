//! Conversions from device units into display units.
//!
//! The sensor reports temperature in tenths of °C and pressure in mbar × 10. The free functions
//! below are total over their inputs. [`Temperature`] and [`Pressure`] wrap the device values so
//! the unit cannot be lost along the way.

/// Millibar in one standard atmosphere.
pub const MILLIBAR_PER_ATMOSPHERE: f32 = 1013.25;

/// Pascal in one millibar.
pub const PASCAL_PER_MILLIBAR: f32 = 100.0;

/// Unit a pressure reading is presented in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureUnit {
    #[default]
    Millibar,
    MillimetersMercury,
    Atmosphere,
    Pascal,
}

impl PressureUnit {
    /// Conventional symbol of the unit.
    pub fn symbol(self) -> &'static str {
        match self {
            PressureUnit::Millibar => "mbar",
            PressureUnit::MillimetersMercury => "mmHg",
            PressureUnit::Atmosphere => "atm",
            PressureUnit::Pascal => "Pa",
        }
    }
}

/// Tenths of °C to °C.
pub fn degrees_celsius(temperature_units: i32) -> f32 {
    temperature_units as f32 / 10.0
}

/// mbar × 10 to mbar.
pub fn millibar(pressure_units: i32) -> f32 {
    pressure_units as f32 / 10.0
}

/// mbar × 10 to mmHg (1 mbar = 0.75006 mmHg).
pub fn millimeters_mercury(pressure_units: i32) -> f32 {
    (pressure_units as f64 * 750.06 / 10000.0) as f32
}

/// mbar to standard atmospheres.
pub fn atmospheres(mbar: f32) -> f32 {
    mbar / MILLIBAR_PER_ATMOSPHERE
}

/// mbar to Pa.
pub fn pascals(mbar: f32) -> f32 {
    mbar * PASCAL_PER_MILLIBAR
}

/// Pa to mbar. Inverse of [`pascals`].
pub fn pascals_to_millibar(pa: f32) -> f32 {
    pa / PASCAL_PER_MILLIBAR
}

/// A compensated temperature in device units (tenths of °C).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(pub i32);

impl Temperature {
    pub fn deci_celsius(self) -> i32 {
        self.0
    }

    pub fn celsius(self) -> f32 {
        degrees_celsius(self.0)
    }

    #[cfg(feature = "uom")]
    pub fn to_uom(self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::thermodynamic_temperature::ThermodynamicTemperature::new::<
            uom::si::thermodynamic_temperature::degree_celsius,
        >(self.celsius())
    }
}

/// A compensated pressure in device units (mbar × 10).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pressure(pub i32);

impl Pressure {
    pub fn raw(self) -> i32 {
        self.0
    }

    pub fn millibar(self) -> f32 {
        millibar(self.0)
    }

    pub fn millimeters_mercury(self) -> f32 {
        millimeters_mercury(self.0)
    }

    pub fn atmospheres(self) -> f32 {
        atmospheres(self.millibar())
    }

    pub fn pascals(self) -> f32 {
        pascals(self.millibar())
    }

    /// Converts into the given display unit.
    pub fn in_unit(self, unit: PressureUnit) -> f32 {
        match unit {
            PressureUnit::Millibar => self.millibar(),
            PressureUnit::MillimetersMercury => self.millimeters_mercury(),
            PressureUnit::Atmosphere => self.atmospheres(),
            PressureUnit::Pascal => self.pascals(),
        }
    }

    #[cfg(feature = "uom")]
    pub fn to_uom(self) -> uom::si::f32::Pressure {
        uom::si::pressure::Pressure::new::<uom::si::pressure::millibar>(self.millibar())
    }
}
