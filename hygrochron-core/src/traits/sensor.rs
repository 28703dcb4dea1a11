//! Environmental sensor trait

use crate::reading::Reading;

/// Errors that can occur during acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer the start signal
    NoResponse,
    /// Protocol timing violated (line stuck or noisy)
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// Decoded values outside the sensor's rated range
    OutOfRange,
}

/// Trait for combined temperature/humidity sensors
///
/// Implementations handle the specific sampling protocol (DHT22 single-wire,
/// SHT3x I2C, etc.) and always report in the base unit, degrees Celsius.
/// Unit conversion is the caller's concern.
pub trait EnvironmentSensor {
    /// Take one measurement
    async fn measure(&mut self) -> Result<Reading, SensorError>;
}
