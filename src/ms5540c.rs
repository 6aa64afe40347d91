use crate::bus::{Bus, Spi};
use crate::calibration::CalibrationSet;
use crate::command::{
    CalibrationWord, MeasurementKind, COMMAND_MODE, CONVERSION_TIME_MS, DATA_MODE, RESET_SEQUENCE,
};
use crate::compensation::{self, CompensationMode};
use crate::config::Configuration;
use crate::error::{Ms5540cError, Ms5540cResult};
use crate::units::{Pressure, PressureUnit, Temperature};
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::Mode;

/// Main MS5540C driver struct
///
/// Owns the bus for its whole lifetime, so transactions can never interleave. Share it between
/// tasks behind a mutex if more than one reader needs it.
pub struct Ms5540c<B, D> {
    bus: B,
    delay: D,
    calibration: CalibrationSet,
    config: Configuration,
}

impl<SpiType, F, D> Ms5540c<Spi<SpiType, F>, D>
where
    SpiType: embedded_hal::spi::SpiBus,
    F: FnMut(&mut SpiType, Mode) -> Result<(), SpiType::Error>,
    D: DelayNs,
{
    /// Constructs a new driver instance on an SPI bus.
    ///
    /// `switch_mode` is called whenever the driver needs the bus in a different SPI mode. See
    /// [`crate::bus`] for the bus settings and the MCLK signal the sensor expects.
    pub fn new_spi(
        spi: SpiType,
        switch_mode: F,
        delay: D,
        config: Configuration,
    ) -> Ms5540cResult<Self, <Spi<SpiType, F> as Bus>::Error> {
        Self::new(Spi::new(spi, switch_mode), delay, config)
    }
}

impl<B, D> Ms5540c<B, D>
where
    B: Bus,
    D: DelayNs,
{
    /// Constructs a new driver instance and reads the calibration coefficients.
    ///
    /// Each of the four calibration words is read in its own transaction, preceded by a reset.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use ms5540c::bus::Bus;
    /// # use ms5540c::Ms5540cResult;
    ///  use ms5540c::Ms5540c;
    ///  use ms5540c::config::Configuration;
    /// # fn demo<B: Bus, D: DelayNs>(bus: B, delay: D) -> Ms5540cResult<(), B::Error> {
    ///
    ///  let mut sensor = Ms5540c::new(bus, delay, Configuration::default())?;
    ///  let temperature = sensor.read_temperature_default()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(mut bus: B, delay: D, config: Configuration) -> Ms5540cResult<Self, B::Error> {
        let calibration = read_calibration(&mut bus)?;

        Ok(Ms5540c {
            bus,
            delay,
            calibration,
            config,
        })
    }

    /// Reads all four calibration words again and replaces the stored coefficients.
    ///
    /// If any transaction fails the previous coefficients are kept.
    pub fn initialize(&mut self) -> Ms5540cResult<(), B::Error> {
        self.calibration = read_calibration(&mut self.bus)?;

        Ok(())
    }

    /// Sends the reset sequence, putting the serial interface of the sensor into a known state.
    ///
    /// Every transaction issued by this driver starts with a reset, so calling this is only
    /// needed to recover the sensor after foreign traffic on the bus.
    pub fn reset(&mut self) -> Ms5540cResult<(), B::Error> {
        reset(&mut self.bus)
    }

    /// Reads a single raw calibration word.
    pub fn read_calibration_word(&mut self, word: CalibrationWord) -> Ms5540cResult<u16, B::Error> {
        read_calibration_word(&mut self.bus, word)
    }

    /// Starts a conversion, waits [`CONVERSION_TIME_MS`] and reads back the raw ADC count.
    ///
    /// This blocks the calling thread for the whole conversion time.
    pub fn read_raw(&mut self, kind: MeasurementKind) -> Ms5540cResult<i16, B::Error> {
        reset(&mut self.bus)?;

        let command = kind.command();
        trace!("measurement {:?}: {:?}", kind, command);
        self.bus.write(&command).map_err(Ms5540cError::Bus)?;

        self.delay.delay_ms(CONVERSION_TIME_MS);

        let mut buf = [0u8; 2];
        self.bus.set_mode(DATA_MODE).map_err(Ms5540cError::Bus)?;
        self.bus.read(&mut buf).map_err(Ms5540cError::Bus)?;

        let value = i16::from_be_bytes(buf);
        trace!("measurement {:?} -> {}", kind, value);

        Ok(value)
    }

    /// Reads the compensated temperature.
    ///
    /// Costs one conversion.
    pub fn read_temperature(&mut self, mode: CompensationMode) -> Ms5540cResult<Temperature, B::Error> {
        let d2 = self.read_raw(MeasurementKind::Temperature)?;

        Ok(Temperature(compensation::temperature(&self.calibration, d2, mode)))
    }

    /// Reads the compensated pressure.
    ///
    /// Pressure can only be compensated with a temperature reading taken alongside it, so this
    /// costs two conversions.
    pub fn read_pressure(&mut self, mode: CompensationMode) -> Ms5540cResult<Pressure, B::Error> {
        let d1 = self.read_raw(MeasurementKind::Pressure)?;
        let d2 = self.read_raw(MeasurementKind::Temperature)?;

        Ok(Pressure(compensation::pressure(&self.calibration, d1, d2, mode)))
    }

    /// Reads the compensated pressure and converts it to `unit`.
    pub fn read_pressure_in(
        &mut self,
        unit: PressureUnit,
        mode: CompensationMode,
    ) -> Ms5540cResult<f32, B::Error> {
        Ok(self.read_pressure(mode)?.in_unit(unit))
    }

    /// Reads pressure and temperature, compensated from the same pair of conversions.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use ms5540c::bus::Bus;
    /// # use ms5540c::{Ms5540c, Ms5540cResult};
    /// # fn demo<B: Bus, D: DelayNs>(mut sensor: Ms5540c<B, D>) -> Ms5540cResult<(), B::Error> {
    /// use ms5540c::compensation::CompensationMode;
    ///
    /// let data = sensor.read_sensor_data(CompensationMode::Enabled)?;
    /// println!("{} °C, {} mbar", data.temperature.celsius(), data.pressure.millibar());
    /// # Ok(()) }
    /// ```
    pub fn read_sensor_data(&mut self, mode: CompensationMode) -> Ms5540cResult<Measurement, B::Error> {
        self.read_measurement(mode, mode)
    }

    /// [`read_temperature`](Self::read_temperature) with the mode from the [`Configuration`].
    pub fn read_temperature_default(&mut self) -> Ms5540cResult<Temperature, B::Error> {
        self.read_temperature(self.config.temperature_compensation)
    }

    /// [`read_pressure`](Self::read_pressure) with the mode from the [`Configuration`].
    pub fn read_pressure_default(&mut self) -> Ms5540cResult<Pressure, B::Error> {
        self.read_pressure(self.config.pressure_compensation)
    }

    /// [`read_pressure_in`](Self::read_pressure_in) with unit and mode from the [`Configuration`].
    pub fn read_pressure_in_default(&mut self) -> Ms5540cResult<f32, B::Error> {
        self.read_pressure_in(self.config.pressure_unit, self.config.pressure_compensation)
    }

    /// [`read_sensor_data`](Self::read_sensor_data) with the temperature and pressure modes from
    /// the [`Configuration`].
    pub fn read_sensor_data_default(&mut self) -> Ms5540cResult<Measurement, B::Error> {
        self.read_measurement(
            self.config.temperature_compensation,
            self.config.pressure_compensation,
        )
    }

    fn read_measurement(
        &mut self,
        temperature_mode: CompensationMode,
        pressure_mode: CompensationMode,
    ) -> Ms5540cResult<Measurement, B::Error> {
        let d1 = self.read_raw(MeasurementKind::Pressure)?;
        let d2 = self.read_raw(MeasurementKind::Temperature)?;

        Ok(Measurement {
            temperature: Temperature(compensation::temperature(&self.calibration, d2, temperature_mode)),
            pressure: Pressure(compensation::pressure(&self.calibration, d1, d2, pressure_mode)),
        })
    }

    /// The calibration coefficients read during construction or the last [`initialize`](Self::initialize).
    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Destroys the driver and returns the bus and delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

fn reset<B: Bus>(bus: &mut B) -> Ms5540cResult<(), B::Error> {
    trace!("reset: {:?}", RESET_SEQUENCE);
    bus.set_mode(COMMAND_MODE).map_err(Ms5540cError::Bus)?;
    bus.write(&RESET_SEQUENCE).map_err(Ms5540cError::Bus)?;

    Ok(())
}

fn read_calibration_word<B: Bus>(bus: &mut B, word: CalibrationWord) -> Ms5540cResult<u16, B::Error> {
    reset(bus)?;

    let command = word.command();
    trace!("calibration word {}: {:?}", word.index(), command);
    bus.write(&command).map_err(Ms5540cError::Bus)?;

    let mut buf = [0u8; 2];
    bus.set_mode(DATA_MODE).map_err(Ms5540cError::Bus)?;
    bus.read(&mut buf).map_err(Ms5540cError::Bus)?;

    let value = u16::from_be_bytes(buf);
    trace!("calibration word {} -> {}", word.index(), value);

    Ok(value)
}

fn read_calibration<B: Bus>(bus: &mut B) -> Ms5540cResult<CalibrationSet, B::Error> {
    let mut words = [0u16; 4];
    for word in CalibrationWord::ALL {
        words[word.index()] = read_calibration_word(bus, word)?;
    }

    let calibration = CalibrationSet::decode(words);
    debug!("calibration: {:?}", calibration);

    Ok(calibration)
}

/// Holds compensated pressure and temperature samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    pub temperature: Temperature,
    pub pressure: Pressure,
}
