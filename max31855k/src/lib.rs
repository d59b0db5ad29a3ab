/*! `max31855k` is an [`embedded_hal`](https://github.com/rust-embedded/embedded-hal) crate for
reading [Maxim MAX31855K](https://www.analog.com/en/products/max31855.html) type-K thermocouple
converters over SPI.

The MAX31855K has no registers to configure. Every conversion is read out as one 32-bit frame:

* D31..D18: signed 14-bit thermocouple temperature (`I14F2`, 0.25 degree steps)
* D16: fault flag, set when any of D2..D0 are set
* D15..D4: signed 12-bit cold-junction (die) temperature (`I12F4`, 0.0625 degree steps)
* D2..D0: short-to-VCC, short-to-GND and open-circuit faults

D17 and D3 are reserved and ignored.

Decoding is split from bus access: [decode] turns a [RawFrame] into a [DecodedReading] without
touching hardware, and [Max31855k] wraps an [`embedded_hal::spi::SpiDevice`] to acquire frames.
A reading whose fault flag is set never yields a thermocouple temperature; it yields the
[FaultKind] instead, and the caller decides whether to retry.

```
# use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
# let spi = SpiMock::new(&[
#     SpiTransaction::transaction_start(),
#     SpiTransaction::delay(100),
#     SpiTransaction::read_vec(vec![0x01, 0x90, 0x19, 0x00]),
#     SpiTransaction::transaction_end(),
# ]);
use max31855k::{Max31855k, TemperatureUnit};

let mut tc = Max31855k::new(spi);
let temp = tc.read_temperature(TemperatureUnit::Fahrenheit).unwrap();
assert_eq!(temp.degrees(), 77.0);
# tc.release().done();
``` */
#![no_std]
#![doc(html_root_url = "https://docs.rs/max31855k/0.1.0")]

use core::fmt;
use embedded_hal::spi::{Operation, SpiDevice};

mod fault;
mod frame;
mod temp;

pub use fault::{classify, FaultKind, OC, SCG, SCV};
pub use frame::{decode, DecodedReading, MalformedFrame, RawFrame, FRAME_LEN};
pub use temp::{Temperature, TemperatureUnit};

/// Minimum time between chip-select falling and the first clock edge (tCSS).
pub const CS_SETTLE_NS: u32 = 100;

/** A MAX31855K behind an [`embedded_hal`] SPI device.

The [SpiDevice] owns chip-select: each read is a single transaction that asserts it, waits for
the settle time, clocks in [FRAME_LEN] bytes and releases it. Nothing is cached between reads. */
pub struct Max31855k<SPI> {
    spi: SPI,
    settle_ns: u32,
}

#[derive(Debug, PartialEq)]
/// Enum for describing possible error conditions when reading a MAX31855K.
pub enum Error<E> {
    /** The SPI transaction failed. Contains the error propagated from the [`embedded_hal`]
    implementation. */
    Spi(E),
    /// The chip flagged a fault on the thermocouple input, so no temperature was produced.
    Fault(FaultKind),
}

impl<E> From<FaultKind> for Error<E> {
    fn from(kind: FaultKind) -> Self {
        Error::Fault(kind)
    }
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "SPI transaction failed: {:?}", e),
            Error::Fault(kind) => write!(f, "thermocouple fault: {}", kind),
        }
    }
}

impl<SPI> Max31855k<SPI>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self::with_settle_time(spi, CS_SETTLE_NS)
    }

    /// Like [Max31855k::new], waiting `settle_ns` after chip-select instead of
    /// [CS_SETTLE_NS]. Zero skips the delay, for devices that already honor tCSS.
    pub fn with_settle_time(spi: SPI, settle_ns: u32) -> Self {
        Max31855k { spi, settle_ns }
    }

    pub fn read_frame(&mut self) -> Result<RawFrame, Error<SPI::Error>> {
        let mut buf = [0u8; FRAME_LEN];

        let res = if self.settle_ns == 0 {
            self.spi.read(&mut buf)
        } else {
            self.spi.transaction(&mut [
                Operation::DelayNs(self.settle_ns),
                Operation::Read(&mut buf),
            ])
        };
        res.map_err(Error::Spi)?;

        let frame = RawFrame::from(buf);
        log::trace!("raw frame: {:#010x}", frame.as_u32());
        Ok(frame)
    }

    /// Acquire and decode one frame. Thermocouple and cold-junction values in the
    /// result come from the same conversion.
    pub fn read_reading(&mut self) -> Result<DecodedReading, Error<SPI::Error>> {
        self.read_frame().map(decode)
    }

    pub fn read_temperature(&mut self, unit: TemperatureUnit) -> Result<Temperature, Error<SPI::Error>> {
        Ok(self.read_reading()?.temperature(unit)?)
    }

    /// The chip's own die temperature, in Celsius. Sensor faults do not affect
    /// this channel; only the SPI transaction can fail.
    pub fn read_cold_junction_temperature(&mut self) -> Result<Temperature, Error<SPI::Error>> {
        Ok(self.read_reading()?.cold_junction())
    }

    pub fn read_temp_c(&mut self) -> Result<Temperature, Error<SPI::Error>> {
        self.read_temperature(TemperatureUnit::Celsius)
    }

    pub fn read_temp_f(&mut self) -> Result<Temperature, Error<SPI::Error>> {
        self.read_temperature(TemperatureUnit::Fahrenheit)
    }

    pub fn read_temp_k(&mut self) -> Result<Temperature, Error<SPI::Error>> {
        self.read_temperature(TemperatureUnit::Kelvin)
    }

    pub fn read_temp_r(&mut self) -> Result<Temperature, Error<SPI::Error>> {
        self.read_temperature(TemperatureUnit::Rankine)
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}
