#![allow(dead_code)]

use embedded_hal::spi::{ErrorKind, ErrorType, Operation, SpiDevice};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use max31855k::{FaultKind, Max31855k, CS_SETTLE_NS};

pub struct UnimplementedSpi;

impl ErrorType for UnimplementedSpi {
    type Error = ErrorKind;
}

impl SpiDevice for UnimplementedSpi {
    fn transaction(&mut self, _operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

/// One bench frame: the bytes the chip clocks out, and what they mean.
pub struct Fixture {
    pub name: &'static str,
    pub bytes: [u8; 4],
    pub thermocouple: f32,
    pub cold_junction: f32,
    pub fault: Option<FaultKind>,
}

const fn fixture(
    name: &'static str,
    bytes: [u8; 4],
    thermocouple: f32,
    cold_junction: f32,
    fault: Option<FaultKind>,
) -> Fixture {
    Fixture { name, bytes, thermocouple, cold_junction, fault }
}

use FaultKind::{OpenCircuit as OC, ShortToGround as SCG, ShortToSupply as SCV};

/* Hot/zero/negative thermocouple (0x0FA0, 0x0000, 0x3C18) against
hot/zero/negative cold junction (0x7F0, 0x000, 0xC90), with no fault and each
single fault bit. Faulted frames set D16 plus the fault bit. */
pub const FIXTURES: &[Fixture] = &[
    fixture("HOT_HOT_NONE",   [0x3E, 0x80, 0x7F, 0x00], 1000.0, 127.0, None),
    fixture("HOT_HOT_SCV",    [0x3E, 0x81, 0x7F, 0x04], 1000.0, 127.0, Some(SCV)),
    fixture("HOT_HOT_SCG",    [0x3E, 0x81, 0x7F, 0x02], 1000.0, 127.0, Some(SCG)),
    fixture("HOT_HOT_OC",     [0x3E, 0x81, 0x7F, 0x01], 1000.0, 127.0, Some(OC)),
    fixture("HOT_ZERO_NONE",  [0x3E, 0x80, 0x00, 0x00], 1000.0, 0.0, None),
    fixture("HOT_ZERO_SCV",   [0x3E, 0x81, 0x00, 0x04], 1000.0, 0.0, Some(SCV)),
    fixture("HOT_ZERO_SCG",   [0x3E, 0x81, 0x00, 0x02], 1000.0, 0.0, Some(SCG)),
    fixture("HOT_ZERO_OC",    [0x3E, 0x81, 0x00, 0x01], 1000.0, 0.0, Some(OC)),
    fixture("HOT_NEG_NONE",   [0x3E, 0x80, 0xC9, 0x00], 1000.0, -55.0, None),
    fixture("HOT_NEG_SCV",    [0x3E, 0x81, 0xC9, 0x04], 1000.0, -55.0, Some(SCV)),
    fixture("HOT_NEG_SCG",    [0x3E, 0x81, 0xC9, 0x02], 1000.0, -55.0, Some(SCG)),
    fixture("HOT_NEG_OC",     [0x3E, 0x81, 0xC9, 0x01], 1000.0, -55.0, Some(OC)),
    fixture("ZERO_HOT_NONE",  [0x00, 0x00, 0x7F, 0x00], 0.0, 127.0, None),
    fixture("ZERO_HOT_SCV",   [0x00, 0x01, 0x7F, 0x04], 0.0, 127.0, Some(SCV)),
    fixture("ZERO_HOT_SCG",   [0x00, 0x01, 0x7F, 0x02], 0.0, 127.0, Some(SCG)),
    fixture("ZERO_HOT_OC",    [0x00, 0x01, 0x7F, 0x01], 0.0, 127.0, Some(OC)),
    fixture("ZERO_ZERO_NONE", [0x00, 0x00, 0x00, 0x00], 0.0, 0.0, None),
    fixture("ZERO_ZERO_SCV",  [0x00, 0x01, 0x00, 0x04], 0.0, 0.0, Some(SCV)),
    fixture("ZERO_ZERO_SCG",  [0x00, 0x01, 0x00, 0x02], 0.0, 0.0, Some(SCG)),
    fixture("ZERO_ZERO_OC",   [0x00, 0x01, 0x00, 0x01], 0.0, 0.0, Some(OC)),
    fixture("ZERO_NEG_NONE",  [0x00, 0x00, 0xC9, 0x00], 0.0, -55.0, None),
    fixture("ZERO_NEG_SCV",   [0x00, 0x01, 0xC9, 0x04], 0.0, -55.0, Some(SCV)),
    fixture("ZERO_NEG_SCG",   [0x00, 0x01, 0xC9, 0x02], 0.0, -55.0, Some(SCG)),
    fixture("ZERO_NEG_OC",    [0x00, 0x01, 0xC9, 0x01], 0.0, -55.0, Some(OC)),
    fixture("NEG_HOT_NONE",   [0xF0, 0x60, 0x7F, 0x00], -250.0, 127.0, None),
    fixture("NEG_HOT_SCV",    [0xF0, 0x61, 0x7F, 0x04], -250.0, 127.0, Some(SCV)),
    fixture("NEG_HOT_SCG",    [0xF0, 0x61, 0x7F, 0x02], -250.0, 127.0, Some(SCG)),
    fixture("NEG_HOT_OC",     [0xF0, 0x61, 0x7F, 0x01], -250.0, 127.0, Some(OC)),
    fixture("NEG_ZERO_NONE",  [0xF0, 0x60, 0x00, 0x00], -250.0, 0.0, None),
    fixture("NEG_ZERO_SCV",   [0xF0, 0x61, 0x00, 0x04], -250.0, 0.0, Some(SCV)),
    fixture("NEG_ZERO_SCG",   [0xF0, 0x61, 0x00, 0x02], -250.0, 0.0, Some(SCG)),
    fixture("NEG_ZERO_OC",    [0xF0, 0x61, 0x00, 0x01], -250.0, 0.0, Some(OC)),
    fixture("NEG_NEG_NONE",   [0xF0, 0x60, 0xC9, 0x00], -250.0, -55.0, None),
    fixture("NEG_NEG_SCV",    [0xF0, 0x61, 0xC9, 0x04], -250.0, -55.0, Some(SCV)),
    fixture("NEG_NEG_SCG",    [0xF0, 0x61, 0xC9, 0x02], -250.0, -55.0, Some(SCG)),
    fixture("NEG_NEG_OC",     [0xF0, 0x61, 0xC9, 0x01], -250.0, -55.0, Some(OC)),
];

/// SPI expectations for `count` back-to-back reads of `bytes`.
pub fn reads(bytes: [u8; 4], count: usize) -> Vec<SpiTransaction<u8>> {
    (0..count)
        .flat_map(|_| {
            vec![
                SpiTransaction::transaction_start(),
                SpiTransaction::delay(CS_SETTLE_NS),
                SpiTransaction::read_vec(bytes.to_vec()),
                SpiTransaction::transaction_end(),
            ]
        })
        .collect()
}

pub fn setup(bytes: [u8; 4], count: usize) -> Max31855k<SpiMock<u8>> {
    Max31855k::new(SpiMock::new(&reads(bytes, count)))
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "{} is not close to {}",
        actual,
        expected
    );
}
