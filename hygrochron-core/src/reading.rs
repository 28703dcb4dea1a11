//! Environmental reading and unit conversion
//!
//! A reading is produced once per cycle by the sensor in degrees Celsius;
//! unit conversion is applied exactly once, right after acquisition.

/// Temperature unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// One temperature/humidity measurement
///
/// `humidity` is relative humidity in percent and is unit-independent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub temperature: f32,
    pub humidity: f32,
    pub unit: Unit,
}

impl Reading {
    /// Create a reading in the sensor base unit (Celsius)
    pub const fn celsius(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature,
            humidity,
            unit: Unit::Celsius,
        }
    }

    /// Convert the temperature to the requested unit
    ///
    /// A no-op when the reading already carries the requested unit.
    pub fn into_unit(self, unit: Unit) -> Self {
        let temperature = match (self.unit, unit) {
            (Unit::Celsius, Unit::Fahrenheit) => self.temperature * 9.0 / 5.0 + 32.0,
            (Unit::Fahrenheit, Unit::Celsius) => (self.temperature - 32.0) * 5.0 / 9.0,
            _ => self.temperature,
        };
        Self {
            temperature,
            humidity: self.humidity,
            unit,
        }
    }
}
