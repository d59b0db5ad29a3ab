use core::fmt;

const KELVIN_OFFSET: f32 = 273.15;

/** Unit a [Temperature] is expressed in.

The numeric codes follow the classic Arduino driver's `units` enum
(F, C, K, R). Conversion from an unrecognized code never fails; it yields
[TemperatureUnit::Celsius]. */
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
#[repr(u8)]
pub enum TemperatureUnit {
    Fahrenheit = 0,
    #[default]
    Celsius = 1,
    Kelvin = 2,
    Rankine = 3,
}

impl TemperatureUnit {
    /// Express a Celsius value in this unit.
    pub fn convert(self, celsius: f32) -> f32 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + KELVIN_OFFSET,
            TemperatureUnit::Rankine => (celsius + KELVIN_OFFSET) * 9.0 / 5.0,
        }
    }

    pub fn to_celsius(self, degrees: f32) -> f32 {
        match self {
            TemperatureUnit::Celsius => degrees,
            TemperatureUnit::Fahrenheit => (degrees - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => degrees - KELVIN_OFFSET,
            TemperatureUnit::Rankine => degrees * 5.0 / 9.0 - KELVIN_OFFSET,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Rankine => "°R",
        }
    }

    /// Accepts `c`/`f`/`k`/`r` or the full unit name, in any case. Anything
    /// else is Celsius.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        let is = |short: &str, long: &str| {
            name.eq_ignore_ascii_case(short) || name.eq_ignore_ascii_case(long)
        };

        if is("f", "fahrenheit") {
            TemperatureUnit::Fahrenheit
        } else if is("k", "kelvin") {
            TemperatureUnit::Kelvin
        } else if is("r", "rankine") {
            TemperatureUnit::Rankine
        } else {
            TemperatureUnit::Celsius
        }
    }
}

impl From<u8> for TemperatureUnit {
    fn from(code: u8) -> Self {
        match code {
            0 => TemperatureUnit::Fahrenheit,
            2 => TemperatureUnit::Kelvin,
            3 => TemperatureUnit::Rankine,
            _ => TemperatureUnit::Celsius,
        }
    }
}

impl From<TemperatureUnit> for u8 {
    fn from(unit: TemperatureUnit) -> u8 {
        unit as u8
    }
}

/* Invariant: `degrees` is always expressed in `unit`. */

#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub struct Temperature {
    degrees: f32,
    unit: TemperatureUnit,
}

impl Temperature {
    pub fn new(degrees: f32, unit: TemperatureUnit) -> Self {
        Temperature { degrees, unit }
    }

    pub fn from_celsius(celsius: f32, unit: TemperatureUnit) -> Self {
        Temperature {
            degrees: unit.convert(celsius),
            unit,
        }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn celsius(&self) -> f32 {
        self.unit.to_celsius(self.degrees)
    }

    pub fn to_unit(self, unit: TemperatureUnit) -> Self {
        if unit == self.unit {
            self
        } else {
            Temperature::from_celsius(self.celsius(), unit)
        }
    }
}

impl From<Temperature> for f32 {
    fn from(temp: Temperature) -> Self {
        temp.degrees
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2} {}", self.degrees, self.unit.symbol())
    }
}
