//! Reading display trait

use crate::reading::Reading;

/// Rendering style for one cycle
///
/// `Plain` uses the built-in bitmap font only; `Rich` adds the decorative
/// bitmaps and the large digit face. The executor picks `Plain` whenever a
/// cloud report is due in the same cycle, trading visual fidelity for the
/// memory headroom the network stack needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderStyle {
    Rich,
    Plain,
}

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Device did not answer on the bus
    NotDetected,
    /// Bus transfer failed mid-frame
    Bus,
}

/// Trait for the local reading display
///
/// Rendering clears and redraws the whole frame, so a render after a
/// failed render starts from a clean slate. The caller decides how long
/// the panel stays powered and when to power it off.
pub trait ReadingDisplay {
    /// Clear, draw and show one reading
    async fn render(&mut self, reading: &Reading, style: RenderStyle) -> Result<(), DisplayError>;

    /// Cut panel power until the next render
    async fn power_off(&mut self) -> Result<(), DisplayError>;
}
