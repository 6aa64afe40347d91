//! Serial transport used by the driver.
//!
//! The MS5540C speaks a three-wire synchronous protocol that is not quite SPI: there is no chip
//! select, and commands and results are sampled on different clock edges. The driver therefore
//! needs to switch the bus between [`MODE_0`](embedded_hal::spi::MODE_0) for commands and
//! [`MODE_1`](embedded_hal::spi::MODE_1) for results within one transaction. `embedded-hal`
//! has no notion of changing modes, so [`Bus`] adds it and [`Spi`] lets the caller plug in
//! their HAL's way of doing so.
//!
//! Before handing the bus to the driver it must be configured for:
//! - MSB first bit order
//! - an SCLK of at most 500 kHz
//!
//! and a stable 32.768 kHz square wave must already be present on the sensor's MCLK pin.
//! Without MCLK the sensor accepts commands but never finishes a conversion.

use embedded_hal::spi::Mode;

pub trait Bus {
    type Error;

    /// Reconfigures clock polarity and phase for the following transfers.
    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;

    /// Clocks `bytes` out to the sensor, discarding what is clocked in.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buf` with bytes clocked in from the sensor while clocking out `0x00`.
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

#[cfg(feature = "async")]
pub trait AsyncBus {
    type Error;

    fn set_mode(&mut self, mode: Mode) -> impl Future<Output = Result<(), Self::Error>>;

    fn write(&mut self, bytes: &[u8]) -> impl Future<Output = Result<(), Self::Error>>;

    fn read(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Adapts an SPI bus plus a HAL specific mode switch into a [`Bus`].
///
/// # Examples
///
/// ```rust,ignore
/// let bus = ms5540c::bus::Spi::new(spi, |spi: &mut Spi<'_, Blocking>, mode| {
///     spi.apply_config(&Config::default().with_mode(mode.into()))
/// });
/// ```
pub struct Spi<SpiType, F> {
    spi: SpiType,
    switch_mode: F,
}

impl<SpiType, F> Spi<SpiType, F> {
    pub fn new(spi: SpiType, switch_mode: F) -> Self {
        Self { spi, switch_mode }
    }

    /// Returns the wrapped SPI bus.
    pub fn release(self) -> SpiType {
        self.spi
    }
}

impl<SpiType, F> Bus for Spi<SpiType, F>
where
    SpiType: embedded_hal::spi::SpiBus,
    F: FnMut(&mut SpiType, Mode) -> Result<(), SpiType::Error>,
{
    type Error = <SpiType as embedded_hal::spi::ErrorType>::Error;

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        // Reconfiguring while the last byte is still being shifted would corrupt it
        self.spi.flush()?;
        (self.switch_mode)(&mut self.spi, mode)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes)?;

        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        buf.fill(0x00);
        self.spi.transfer_in_place(buf)?;

        Ok(())
    }
}

#[cfg(feature = "async")]
impl<SpiType, F> AsyncBus for Spi<SpiType, F>
where
    SpiType: embedded_hal_async::spi::SpiBus,
    F: FnMut(&mut SpiType, Mode) -> Result<(), SpiType::Error>,
{
    type Error = <SpiType as embedded_hal_async::spi::ErrorType>::Error;

    async fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        self.spi.flush().await?;
        (self.switch_mode)(&mut self.spi, mode)
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(bytes).await?;

        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        buf.fill(0x00);
        self.spi.transfer_in_place(buf).await?;

        Ok(())
    }
}
