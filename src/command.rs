//! ### Command sequences
//!
//! The MS5540C has no register map. Every transaction starts with a fixed bit pattern clocked
//! in while the bus is in [`COMMAND_MODE`], after which the answer (if any) is clocked out in
//! [`DATA_MODE`]:
//!
//! | Transaction         | Bytes sent          | Bytes read |
//! |---------------------|---------------------|------------|
//! | Reset               | `0x15 0x55 0x40`    | -          |
//! | Calibration word 1  | `0x1D 0x50`         | 2          |
//! | Calibration word 2  | `0x1D 0x60`         | 2          |
//! | Calibration word 3  | `0x1D 0x90`         | 2          |
//! | Calibration word 4  | `0x1D 0xA0`         | 2          |
//! | Temperature (D2)    | `0x0F 0x20`         | 2          |
//! | Pressure (D1)       | `0x0F 0x40`         | 2          |
//!
//! Measurement commands need [`CONVERSION_TIME_MS`] to pass before the result can be read.
#![doc(alias = "MS5540C commands")]
use embedded_hal::spi::{Mode, MODE_0, MODE_1};

/// SPI mode used while clocking commands into the sensor.
pub const COMMAND_MODE: Mode = MODE_0;

/// SPI mode used while clocking results out of the sensor.
pub const DATA_MODE: Mode = MODE_1;

/// Fixed wait between a measurement command and the ADC result becoming readable.
///
/// The datasheet gives 33 ms for a conversion at the nominal 32.768 kHz MCLK.
pub const CONVERSION_TIME_MS: u32 = 35;

/// Reset sequence. Puts the serial interface of the sensor back into a known state.
pub const RESET_SEQUENCE: [u8; 3] = [0x15, 0x55, 0x40];

const CALIBRATION_WORD_COMMANDS: [[u8; 2]; 4] = [
    [0x1D, 0x50],
    [0x1D, 0x60],
    [0x1D, 0x90],
    [0x1D, 0xA0],
];

const TEMPERATURE_COMMAND: [u8; 2] = [0x0F, 0x20];
const PRESSURE_COMMAND: [u8; 2] = [0x0F, 0x40];

/// Selects which ADC conversion to start.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementKind {
    /// Digital temperature value (`D2` in the datasheet).
    Temperature,
    /// Digital pressure value (`D1` in the datasheet).
    Pressure,
}

impl MeasurementKind {
    /// The command that starts a conversion of this kind.
    pub const fn command(self) -> [u8; 2] {
        match self {
            MeasurementKind::Temperature => TEMPERATURE_COMMAND,
            MeasurementKind::Pressure => PRESSURE_COMMAND,
        }
    }
}

/// One of the four factory-programmed 16-bit calibration words.
///
/// The words have to be read in index order; see [`CalibrationWord::ALL`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationWord {
    Word1 = 0,
    Word2 = 1,
    Word3 = 2,
    Word4 = 3,
}

impl CalibrationWord {
    /// All calibration words in acquisition order.
    pub const ALL: [CalibrationWord; 4] = [
        CalibrationWord::Word1,
        CalibrationWord::Word2,
        CalibrationWord::Word3,
        CalibrationWord::Word4,
    ];

    /// Zero-based position of this word.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The command that makes the sensor shift out this word.
    pub const fn command(self) -> [u8; 2] {
        CALIBRATION_WORD_COMMANDS[self.index()]
    }
}

impl TryFrom<usize> for CalibrationWord {
    type Error = usize;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(CalibrationWord::Word1),
            1 => Ok(CalibrationWord::Word2),
            2 => Ok(CalibrationWord::Word3),
            3 => Ok(CalibrationWord::Word4),
            _ => Err(index),
        }
    }
}
