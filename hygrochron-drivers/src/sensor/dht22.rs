//! DHT22 (AM2302) temperature/humidity sensor
//!
//! Single-wire protocol: the host holds the line low to request a
//! measurement, the sensor answers with a presence pulse and then 40 data
//! bits. Bit values are encoded in the length of the high pulse
//! (~26 us = 0, ~70 us = 1). The whole transfer takes under 6 ms and is
//! sampled blocking with a microsecond delay.

use embedded_hal::delay::DelayNs;

use hygrochron_core::reading::Reading;
use hygrochron_core::traits::{EnvironmentSensor, SensorError};

/// Host start signal: hold the line low at least 1 ms
const START_LOW_US: u32 = 1200;

/// High pulses longer than this sample as a 1 bit
const BIT_THRESHOLD_US: u32 = 45;

/// Longest level we wait for before declaring the line stuck
const LEVEL_TIMEOUT_US: u32 = 100;

/// Raw access to the single-wire data line
///
/// The line idles high through an external pull-up; the host only ever
/// drives it low or lets go.
pub trait DataLine {
    /// Drive the line low
    fn set_low(&mut self);

    /// Release the line and let the pull-up raise it
    fn release(&mut self);

    /// Sample the line level
    fn is_high(&mut self) -> bool;
}

/// DHT22 sensor on a single-wire line
pub struct Dht22<L, D> {
    line: L,
    delay: D,
}

impl<L: DataLine, D: DelayNs> Dht22<L, D> {
    pub fn new(line: L, delay: D) -> Self {
        Self { line, delay }
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        // Start signal, then hand the line back to the pull-up
        self.line.set_low();
        self.delay.delay_us(START_LOW_US);
        self.line.release();
        self.delay.delay_us(40);

        // Presence pulse: ~80 us low, ~80 us high
        self.wait_for(false).map_err(|_| SensorError::NoResponse)?;
        self.wait_for(true).map_err(|_| SensorError::NoResponse)?;
        self.wait_for(false).map_err(|_| SensorError::NoResponse)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            // 50 us low preamble, then the high pulse encodes the bit
            self.wait_for(true)?;
            let high_us = self.wait_for(false)?;
            if high_us > BIT_THRESHOLD_US {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Wait for the line to reach `high`, returning the elapsed time in us
    fn wait_for(&mut self, high: bool) -> Result<u32, SensorError> {
        for waited_us in 0..LEVEL_TIMEOUT_US {
            if self.line.is_high() == high {
                return Ok(waited_us);
            }
            self.delay.delay_us(1);
        }
        Err(SensorError::Timeout)
    }
}

/// Decode a 40-bit frame into a Celsius reading
///
/// Humidity and temperature are big-endian x10 fixed-point; the top bit
/// of the temperature word is the sign. The last byte is the truncated
/// sum of the first four.
pub fn decode_frame(frame: [u8; 5]) -> Result<Reading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_x10 = u16::from_be_bytes([frame[0], frame[1]]);
    let temp_raw = u16::from_be_bytes([frame[2], frame[3]]);
    let temp_x10 = if temp_raw & 0x8000 != 0 {
        -((temp_raw & 0x7FFF) as i32)
    } else {
        temp_raw as i32
    };

    // Rated range: -40..=80 C, 0..=100 %RH
    if !(0..=1000).contains(&humidity_x10) || !(-400..=800).contains(&temp_x10) {
        return Err(SensorError::OutOfRange);
    }

    Ok(Reading::celsius(
        temp_x10 as f32 / 10.0,
        humidity_x10 as f32 / 10.0,
    ))
}

impl<L: DataLine, D: DelayNs> EnvironmentSensor for Dht22<L, D> {
    async fn measure(&mut self) -> Result<Reading, SensorError> {
        let frame = self.read_frame()?;
        decode_frame(frame)
    }
}
