use core::fmt;

use fixed::types::{I12F4, I14F2};
use modular_bitfield::prelude::*;

use crate::fault::{self, FaultKind};
use crate::temp::{Temperature, TemperatureUnit};

/// Number of bytes clocked out of the MAX31855K per conversion.
pub const FRAME_LEN: usize = 4;

const TC_WIDTH: u32 = 14;
const CJ_WIDTH: u32 = 12;

/* Bit layout of the 32-bit word, LSB first. Fed little-endian bytes of the
big-endian word, so field order here is D0 upwards. */
#[bitfield(bits = 32)]
struct FrameBits {
    faults: B3,
    #[skip]
    __: B1,
    cold_junction: B12,
    fault: bool,
    #[skip]
    __: B1,
    thermocouple: B14,
}

/** The four bytes of one MAX31855K conversion, in the order they are clocked out
(D31..D24 first).

A [RawFrame] carries no interpretation; every 32-bit pattern is a valid frame.
Use [decode] (or [RawFrame::decode]) to pull the fields out. */
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct RawFrame([u8; FRAME_LEN]);

impl RawFrame {
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        RawFrame(bytes)
    }

    pub const fn bytes(&self) -> [u8; FRAME_LEN] {
        self.0
    }

    /// The frame as a single word, D31 in the most significant bit.
    pub const fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn decode(self) -> DecodedReading {
        decode(self)
    }

    fn bits(self) -> FrameBits {
        FrameBits::from_bytes(self.as_u32().to_le_bytes())
    }
}

impl From<[u8; FRAME_LEN]> for RawFrame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        RawFrame(bytes)
    }
}

impl From<RawFrame> for [u8; FRAME_LEN] {
    fn from(frame: RawFrame) -> Self {
        frame.0
    }
}

/** Anything past the fourth byte is ignored; the chip only has 32 bits to give
per conversion. */
impl TryFrom<&[u8]> for RawFrame {
    type Error = MalformedFrame;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes.get(..FRAME_LEN) {
            Some(&[b0, b1, b2, b3]) => Ok(RawFrame([b0, b1, b2, b3])),
            _ => Err(MalformedFrame {
                received: bytes.len(),
            }),
        }
    }
}

/// The transport handed over fewer than [FRAME_LEN] bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct MalformedFrame {
    /// How many bytes actually arrived.
    pub received: usize,
}

impl fmt::Display for MalformedFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "malformed frame: expected {} bytes, received {}",
            FRAME_LEN, self.received
        )
    }
}

/** Fields of a [RawFrame].

`fault_bits` only means something when `fault_flag` is set; use
[DecodedReading::fault] rather than inspecting it directly. The reserved bits
D17 and D3 are dropped. */
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct DecodedReading {
    /// Signed 14-bit thermocouple temperature, in quarter degrees Celsius.
    pub thermocouple_code: i16,
    /// D16, set when any of the SCV, SCG or OC faults is active.
    pub fault_flag: bool,
    /// Signed 12-bit internal (cold-junction) temperature, in sixteenths of a
    /// degree Celsius.
    pub cold_junction_code: i16,
    /// D2..D0: SCV, SCG, OC.
    pub fault_bits: u8,
}

impl DecodedReading {
    /// Thermocouple temperature in degrees Celsius, exact.
    pub fn thermocouple_celsius(&self) -> I14F2 {
        I14F2::from_bits(self.thermocouple_code)
    }

    /// Cold-junction temperature in degrees Celsius, exact.
    pub fn cold_junction_celsius(&self) -> I12F4 {
        I12F4::from_bits(self.cold_junction_code)
    }

    pub fn fault(&self) -> Option<FaultKind> {
        if self.fault_flag {
            Some(fault::classify(self.fault_bits))
        } else {
            None
        }
    }

    /** Thermocouple temperature in `unit`. A frame with the fault flag set never
    produces a value, only the classified [FaultKind]. */
    pub fn temperature(&self, unit: TemperatureUnit) -> Result<Temperature, FaultKind> {
        match self.fault() {
            Some(kind) => Err(kind),
            None => Ok(Temperature::from_celsius(
                self.thermocouple_celsius().to_num(),
                unit,
            )),
        }
    }

    /// Cold-junction temperature, always in Celsius. The chip reports no faults
    /// on this channel.
    pub fn cold_junction(&self) -> Temperature {
        Temperature::from_celsius(
            self.cold_junction_celsius().to_num(),
            TemperatureUnit::Celsius,
        )
    }
}

/// Pull the thermocouple, cold-junction and fault fields out of a frame.
pub fn decode(frame: RawFrame) -> DecodedReading {
    let bits = frame.bits();

    DecodedReading {
        thermocouple_code: sign_extend(bits.thermocouple(), TC_WIDTH),
        fault_flag: bits.fault(),
        cold_junction_code: sign_extend(bits.cold_junction(), CJ_WIDTH),
        fault_bits: bits.faults(),
    }
}

/** Builds the frame the chip would clock out for these fields. Codes are
truncated to their field widths and the reserved bits read as zero. */
impl From<DecodedReading> for RawFrame {
    fn from(reading: DecodedReading) -> Self {
        let bits = FrameBits::new()
            .with_thermocouple(reading.thermocouple_code as u16 & field_mask(TC_WIDTH))
            .with_fault(reading.fault_flag)
            .with_cold_junction(reading.cold_junction_code as u16 & field_mask(CJ_WIDTH))
            .with_faults(reading.fault_bits & 0b111);

        RawFrame(u32::from_le_bytes(bits.into_bytes()).to_be_bytes())
    }
}

const fn field_mask(width: u32) -> u16 {
    (1 << width) - 1
}

// Two's complement over `width` bits.
fn sign_extend(raw: u16, width: u32) -> i16 {
    let mask = field_mask(width);

    if raw & (1 << (width - 1)) != 0 {
        -(((!raw & mask) + 1) as i16)
    } else {
        raw as i16
    }
}
