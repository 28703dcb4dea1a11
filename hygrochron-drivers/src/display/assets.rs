//! Built-in PBM icon assets
//!
//! 16x16 symbols for the rich layout header, 8x8 unit marks below the
//! values. The bitmaps are compiled in and covered by tests, so a parse
//! failure cannot happen for shipped assets; callers just skip the icon.

use super::pbm::Pbm;

pub const TEMPERATURE: &[u8] = include_bytes!("../../assets/temperature.pbm");
pub const HUMIDITY: &[u8] = include_bytes!("../../assets/humidity.pbm");
pub const CELSIUS: &[u8] = include_bytes!("../../assets/celsius.pbm");
pub const FAHRENHEIT: &[u8] = include_bytes!("../../assets/fahrenheit.pbm");
pub const PERCENT: &[u8] = include_bytes!("../../assets/percent.pbm");

pub(crate) fn icon(bytes: &[u8]) -> Option<Pbm<'_>> {
    Pbm::parse(bytes).ok()
}
