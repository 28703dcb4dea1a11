//! Sensor drivers

pub mod dht22;

pub use dht22::{DataLine, Dht22};
