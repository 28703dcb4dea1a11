//! Hardware abstraction traits
//!
//! These traits define the interface between the cycle orchestrator
//! and the hardware-specific implementations.

pub mod cloud;
pub mod display;
pub mod indicator;
pub mod power;
pub mod sensor;

pub use cloud::{CloudError, CloudLink, StatusCode};
pub use display::{DisplayError, ReadingDisplay, RenderStyle};
pub use indicator::Indicator;
pub use power::PowerControl;
pub use sensor::{EnvironmentSensor, SensorError};
