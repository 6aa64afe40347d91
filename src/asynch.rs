//! Async variant of the driver, built on `embedded-hal-async`.
//!
//! The protocol is identical to [`crate::Ms5540c`]. The only difference is that the conversion
//! wait is awaited instead of blocking, which lets an executor run other tasks meanwhile.
//! Transactions on one instance are still strictly sequential since every method takes
//! `&mut self`.

use crate::bus::{AsyncBus, Spi};
use crate::calibration::CalibrationSet;
use crate::command::{
    CalibrationWord, MeasurementKind, COMMAND_MODE, CONVERSION_TIME_MS, DATA_MODE, RESET_SEQUENCE,
};
use crate::compensation::{self, CompensationMode};
use crate::config::Configuration;
use crate::error::{Ms5540cError, Ms5540cResult};
use crate::ms5540c::Measurement;
use crate::units::{Pressure, PressureUnit, Temperature};
use embedded_hal::spi::Mode;
use embedded_hal_async::delay::DelayNs;

pub struct Ms5540c<B, D> {
    bus: B,
    delay: D,
    calibration: CalibrationSet,
    config: Configuration,
}

impl<SpiType, F, D> Ms5540c<Spi<SpiType, F>, D>
where
    SpiType: embedded_hal_async::spi::SpiBus,
    F: FnMut(&mut SpiType, Mode) -> Result<(), SpiType::Error>,
    D: DelayNs,
{
    /// Constructs a new driver instance on an async SPI bus.
    pub async fn new_spi(
        spi: SpiType,
        switch_mode: F,
        delay: D,
        config: Configuration,
    ) -> Ms5540cResult<Self, <Spi<SpiType, F> as AsyncBus>::Error> {
        Self::new(Spi::new(spi, switch_mode), delay, config).await
    }
}

impl<B, D> Ms5540c<B, D>
where
    B: AsyncBus,
    D: DelayNs,
{
    /// Constructs a new driver instance and reads the calibration coefficients.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal_async::delay::DelayNs;
    /// # use ms5540c::bus::AsyncBus;
    /// # use ms5540c::Ms5540cResult;
    ///  use ms5540c::asynch::Ms5540c;
    ///  use ms5540c::compensation::CompensationMode;
    ///  use ms5540c::config::Configuration;
    /// # async fn demo<B: AsyncBus, D: DelayNs>(bus: B, delay: D) -> Ms5540cResult<(), B::Error> {
    ///
    ///  let mut sensor = Ms5540c::new(bus, delay, Configuration::default()).await?;
    ///  let pressure = sensor.read_pressure(CompensationMode::Enabled).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(mut bus: B, delay: D, config: Configuration) -> Ms5540cResult<Self, B::Error> {
        let calibration = read_calibration(&mut bus).await?;

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
    pub async fn initialize(&mut self) -> Ms5540cResult<(), B::Error> {
        self.calibration = read_calibration(&mut self.bus).await?;

        Ok(())
    }

    pub async fn reset(&mut self) -> Ms5540cResult<(), B::Error> {
        reset(&mut self.bus).await
    }

    pub async fn read_calibration_word(&mut self, word: CalibrationWord) -> Ms5540cResult<u16, B::Error> {
        read_calibration_word(&mut self.bus, word).await
    }

    /// Starts a conversion, waits [`CONVERSION_TIME_MS`] and reads back the raw ADC count.
    pub async fn read_raw(&mut self, kind: MeasurementKind) -> Ms5540cResult<i16, B::Error> {
        reset(&mut self.bus).await?;

        let command = kind.command();
        trace!("measurement {:?}: {:?}", kind, command);
        self.bus.write(&command).await.map_err(Ms5540cError::Bus)?;

        self.delay.delay_ms(CONVERSION_TIME_MS).await;

        let mut buf = [0u8; 2];
        self.bus.set_mode(DATA_MODE).await.map_err(Ms5540cError::Bus)?;
        self.bus.read(&mut buf).await.map_err(Ms5540cError::Bus)?;

        let value = i16::from_be_bytes(buf);
        trace!("measurement {:?} -> {}", kind, value);

        Ok(value)
    }

    pub async fn read_temperature(&mut self, mode: CompensationMode) -> Ms5540cResult<Temperature, B::Error> {
        let d2 = self.read_raw(MeasurementKind::Temperature).await?;

        Ok(Temperature(compensation::temperature(&self.calibration, d2, mode)))
    }

    /// Reads the compensated pressure. Costs a pressure and a temperature conversion.
    pub async fn read_pressure(&mut self, mode: CompensationMode) -> Ms5540cResult<Pressure, B::Error> {
        let d1 = self.read_raw(MeasurementKind::Pressure).await?;
        let d2 = self.read_raw(MeasurementKind::Temperature).await?;

        Ok(Pressure(compensation::pressure(&self.calibration, d1, d2, mode)))
    }

    pub async fn read_pressure_in(
        &mut self,
        unit: PressureUnit,
        mode: CompensationMode,
    ) -> Ms5540cResult<f32, B::Error> {
        Ok(self.read_pressure(mode).await?.in_unit(unit))
    }

    pub async fn read_sensor_data(&mut self, mode: CompensationMode) -> Ms5540cResult<Measurement, B::Error> {
        self.read_measurement(mode, mode).await
    }

    pub async fn read_temperature_default(&mut self) -> Ms5540cResult<Temperature, B::Error> {
        self.read_temperature(self.config.temperature_compensation).await
    }

    pub async fn read_pressure_default(&mut self) -> Ms5540cResult<Pressure, B::Error> {
        self.read_pressure(self.config.pressure_compensation).await
    }

    pub async fn read_pressure_in_default(&mut self) -> Ms5540cResult<f32, B::Error> {
        self.read_pressure_in(self.config.pressure_unit, self.config.pressure_compensation)
            .await
    }

    pub async fn read_sensor_data_default(&mut self) -> Ms5540cResult<Measurement, B::Error> {
        self.read_measurement(
            self.config.temperature_compensation,
            self.config.pressure_compensation,
        )
        .await
    }

    async fn read_measurement(
        &mut self,
        temperature_mode: CompensationMode,
        pressure_mode: CompensationMode,
    ) -> Ms5540cResult<Measurement, B::Error> {
        let d1 = self.read_raw(MeasurementKind::Pressure).await?;
        let d2 = self.read_raw(MeasurementKind::Temperature).await?;

        Ok(Measurement {
            temperature: Temperature(compensation::temperature(&self.calibration, d2, temperature_mode)),
            pressure: Pressure(compensation::pressure(&self.calibration, d1, d2, pressure_mode)),
        })
    }

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

async fn reset<B: AsyncBus>(bus: &mut B) -> Ms5540cResult<(), B::Error> {
    trace!("reset: {:?}", RESET_SEQUENCE);
    bus.set_mode(COMMAND_MODE).await.map_err(Ms5540cError::Bus)?;
    bus.write(&RESET_SEQUENCE).await.map_err(Ms5540cError::Bus)?;

    Ok(())
}

async fn read_calibration_word<B: AsyncBus>(
    bus: &mut B,
    word: CalibrationWord,
) -> Ms5540cResult<u16, B::Error> {
    reset(bus).await?;

    let command = word.command();
    trace!("calibration word {}: {:?}", word.index(), command);
    bus.write(&command).await.map_err(Ms5540cError::Bus)?;

    let mut buf = [0u8; 2];
    bus.set_mode(DATA_MODE).await.map_err(Ms5540cError::Bus)?;
    bus.read(&mut buf).await.map_err(Ms5540cError::Bus)?;

    let value = u16::from_be_bytes(buf);
    trace!("calibration word {} -> {}", word.index(), value);

    Ok(value)
}

async fn read_calibration<B: AsyncBus>(bus: &mut B) -> Ms5540cResult<CalibrationSet, B::Error> {
    let mut words = [0u16; 4];
    for word in CalibrationWord::ALL {
        words[word.index()] = read_calibration_word(bus, word).await?;
    }

    let calibration = CalibrationSet::decode(words);
    debug!("calibration: {:?}", calibration);

    Ok(calibration)
}
