//! Reading layouts
//!
//! Two layouts share the framebuffer primitives. `Rich` draws the framed
//! two-column view with icons and large digits; `Plain` is the four-line
//! centered text view using only the built-in font. Both redraw the whole
//! frame from scratch.

use core::fmt::Write;

use heapless::String;

use hygrochron_core::reading::{Reading, Unit};
use hygrochron_core::traits::RenderStyle;

use super::assets;
use super::font;
use super::framebuffer::{FrameBuffer, HEIGHT, WIDTH};

const HALF: usize = WIDTH / 2;

pub fn render(fb: &mut FrameBuffer, reading: &Reading, style: RenderStyle) {
    fb.clear();
    match style {
        RenderStyle::Rich => rich(fb, reading),
        RenderStyle::Plain => plain(fb, reading),
    }
}

/// Framed two-column view: temperature left, humidity right
fn rich(fb: &mut FrameBuffer, reading: &Reading) {
    fb.rect(0, 0, WIDTH, HEIGHT);
    fb.vline(HALF, 0, HEIGHT);

    if let Some(icon) = assets::icon(assets::TEMPERATURE) {
        fb.blit(&icon, 24, 4);
    }
    if let Some(icon) = assets::icon(assets::HUMIDITY) {
        fb.blit(&icon, HALF + 24, 4);
    }
    let unit_asset = match reading.unit {
        Unit::Celsius => assets::CELSIUS,
        Unit::Fahrenheit => assets::FAHRENHEIT,
    };
    if let Some(icon) = assets::icon(unit_asset) {
        fb.blit(&icon, 28, 52);
    }
    if let Some(icon) = assets::icon(assets::PERCENT) {
        fb.blit(&icon, HALF + 28, 52);
    }

    let temperature = value_text(reading.temperature);
    font::draw_text(fb, &temperature, centered(&temperature, 2, 0, HALF), 28, 2);
    let humidity = value_text(reading.humidity);
    font::draw_text(fb, &humidity, centered(&humidity, 2, HALF, HALF), 28, 2);
}

/// Four centered text lines, built-in font only
fn plain(fb: &mut FrameBuffer, reading: &Reading) {
    let unit_mark = match reading.unit {
        Unit::Celsius => 'C',
        Unit::Fahrenheit => 'F',
    };

    let mut temperature: String<12> = String::new();
    let _ = write!(temperature, "{:.1}{}", reading.temperature, unit_mark);
    let mut humidity: String<12> = String::new();
    let _ = write!(humidity, "{:.1}%", reading.humidity);

    for (text, y) in [
        ("Temperature:", 4),
        (temperature.as_str(), 20),
        ("Humidity:", 36),
        (humidity.as_str(), 52),
    ] {
        font::draw_text(fb, text, centered(text, 1, 0, WIDTH), y, 1);
    }
}

fn value_text(value: f32) -> String<8> {
    let mut text = String::new();
    let _ = write!(text, "{:.1}", value);
    text
}

/// Left edge that centers `text` in the `width` columns starting at `x0`
fn centered(text: &str, scale: usize, x0: usize, width: usize) -> usize {
    let text_width = font::text_width(text, scale).min(width);
    x0 + (width - text_width) / 2
}
