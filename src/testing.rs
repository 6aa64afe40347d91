use crate::bus::Bus;
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::Mode;
use heapless::{Deque, Vec};

/// Everything the driver did to the bus, in order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Mode(Mode),
    Write(u8),
    Read,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FakeBusError;

pub struct FakeBus {
    events: Vec<Event, 512>,
    responses: Deque<u8, 64>,
    fail_at: Option<usize>,
    operations: usize,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            events: Vec::new(),
            responses: Deque::new(),
            fail_at: None,
            operations: 0,
        }
    }

    /// Queues bytes to be clocked in by subsequent reads.
    pub fn with_response(&mut self, data: &[u8]) {
        for b in data {
            self.responses.push_back(*b).unwrap();
        }
    }

    /// Queues a big-endian 16-bit word.
    pub fn with_word(&mut self, word: u16) {
        self.with_response(&word.to_be_bytes());
    }

    /// Makes the bus operation with the given zero-based index fail, counted from now.
    pub fn fail_at(&mut self, operation: usize) {
        self.fail_at = Some(self.operations + operation);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// All bytes written, regardless of mode.
    pub fn written(&self) -> Vec<u8, 256> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Write(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn pending_responses(&self) -> usize {
        self.responses.len()
    }

    fn operation(&mut self) -> Result<(), FakeBusError> {
        let current = self.operations;
        self.operations += 1;

        if self.fail_at == Some(current) {
            return Err(FakeBusError);
        }

        Ok(())
    }

    fn record(&mut self, event: Event) {
        self.events.push(event).unwrap();
    }
}

impl Bus for FakeBus {
    type Error = FakeBusError;

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        self.operation()?;
        self.record(Event::Mode(mode));

        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.operation()?;
        for b in bytes {
            self.record(Event::Write(*b));
        }

        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.operation()?;
        for b in buf.iter_mut() {
            self.record(Event::Read);
            *b = match self.responses.pop_front() {
                Some(value) => value,
                None => panic!("No mocked response left for read"),
            };
        }

        Ok(())
    }
}

#[cfg(feature = "async")]
impl crate::bus::AsyncBus for FakeBus {
    type Error = FakeBusError;

    async fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        Bus::set_mode(self, mode)
    }

    async fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        Bus::write(self, bytes)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        Bus::read(self, buf)
    }
}

/// Records how long the driver asked to wait without actually waiting.
pub struct FakeDelay {
    pub calls: usize,
    pub total_ns: u64,
}

impl FakeDelay {
    pub fn new() -> Self {
        FakeDelay { calls: 0, total_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns as u64;
    }

    fn delay_us(&mut self, us: u32) {
        self.calls += 1;
        self.total_ns += us as u64 * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ns += ms as u64 * 1_000_000;
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        DelayNs::delay_ns(self, ns)
    }

    async fn delay_us(&mut self, us: u32) {
        DelayNs::delay_us(self, us)
    }

    async fn delay_ms(&mut self, ms: u32) {
        DelayNs::delay_ms(self, ms)
    }
}
