//! Platform agnostic driver for the MS5540C barometric pressure and temperature sensor.
//!
//! The MS5540C does no compensation on its own. It hands out four factory-programmed
//! calibration words and raw 16-bit ADC counts, and the host turns those into physical values
//! with fixed-point arithmetic. This crate implements the serial protocol, the calibration
//! decoding and the first- and second-order compensation.
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use ms5540c::bus::Bus;
//! # use ms5540c::Ms5540cResult;
//! use ms5540c::{Ms5540c, PressureUnit};
//! use ms5540c::compensation::CompensationMode;
//! use ms5540c::config::Configuration;
//! # fn demo<B: Bus, D: DelayNs>(bus: B, delay: D) -> Ms5540cResult<(), B::Error> {
//!
//! let mut sensor = Ms5540c::new(bus, delay, Configuration::default())?;
//!
//! let temperature = sensor.read_temperature(CompensationMode::Enabled)?;
//! let mmhg = sensor.read_pressure_in(PressureUnit::MillimetersMercury, CompensationMode::Enabled)?;
//! println!("{} °C, {} mmHg", temperature.celsius(), mmhg);
//! # Ok(())
//! # }
//! ```
//!
//! See [`bus`] for how the SPI peripheral has to be set up, and for the MCLK signal that must be
//! running before the driver is constructed.
//!
//! ## Features
//! - `async`: [`asynch::Ms5540c`], the same driver on `embedded-hal-async`
//! - `defmt` / `log`: log bus traffic and intermediate compensation results
//! - `uom`: convert readings into `uom` quantities
#![cfg_attr(not(test), no_std)]

// This must go first so the macros are visible to the other modules
mod fmt;

pub mod bus;
pub mod calibration;
pub mod command;
pub mod compensation;
pub mod config;
pub mod error;
pub mod units;

mod ms5540c;

#[cfg(feature = "async")]
pub mod asynch;

#[cfg(test)]
mod testing;

pub use calibration::CalibrationSet;
pub use command::{CalibrationWord, MeasurementKind};
pub use compensation::CompensationMode;
pub use error::{Ms5540cError, Ms5540cResult};
pub use ms5540c::{Measurement, Ms5540c};
pub use units::{Pressure, PressureUnit, Temperature};
