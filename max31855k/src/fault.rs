use core::fmt;

/// D0: thermocouple open-circuit.
pub const OC: u8 = 1 << 0;
/// D1: thermocouple shorted to GND.
pub const SCG: u8 = 1 << 1;
/// D2: thermocouple shorted to VCC.
pub const SCV: u8 = 1 << 2;

/** Fault condition reported by the MAX31855K alongside a conversion.

Sensor faults are transient from the driver's point of view: a thermocouple can be
reconnected or a short cleared, so a later read may succeed. */
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FaultKind {
    /// No thermocouple attached, or a broken thermocouple wire.
    OpenCircuit,
    /// A thermocouple lead is shorted to ground.
    ShortToGround,
    /// A thermocouple lead is shorted to the supply rail.
    ShortToSupply,
    /// D16 was set but none of D2..D0 were.
    Unknown,
}

/** Map the D2..D0 fault bits to a single [FaultKind].

The chip does not promise the bits are mutually exclusive. When several are
set, the lowest wins: OC, then SCG, then SCV. */
pub fn classify(fault_bits: u8) -> FaultKind {
    let kind = if fault_bits & OC != 0 {
        FaultKind::OpenCircuit
    } else if fault_bits & SCG != 0 {
        FaultKind::ShortToGround
    } else if fault_bits & SCV != 0 {
        FaultKind::ShortToSupply
    } else {
        FaultKind::Unknown
    };

    log::debug!("fault bits {:#05b} classified as {:?}", fault_bits, kind);
    kind
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            FaultKind::OpenCircuit => "open circuit: no thermocouple",
            FaultKind::ShortToGround => "thermocouple is shorted to GND",
            FaultKind::ShortToSupply => "thermocouple is shorted to VCC",
            FaultKind::Unknown => "unknown fault",
        };

        f.write_str(msg)
    }
}
