//! SH1106 OLED driver (I2C)
//!
//! 128x64 panel on a 132-column controller, hence the 2-column offset.
//! The panel is fully re-initialized on every render: after a deep sleep
//! the node restarts from scratch, so no controller state can be assumed
//! to survive between cycles.

use embedded_hal::i2c::I2c;

use hygrochron_core::reading::Reading;
use hygrochron_core::traits::{DisplayError, ReadingDisplay, RenderStyle};

use super::framebuffer::{FrameBuffer, WIDTH};
use super::layout;

pub const DEFAULT_ADDR: u8 = 0x3C;

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;
const CMD_SET_PAGE: u8 = 0xB0;
const CMD_COL_LOW: u8 = 0x00;
const CMD_COL_HIGH: u8 = 0x10;

/// 128 visible columns sit at offset 2 of the 132-column RAM
const COL_OFFSET: u8 = 2;

/// Control bytes: command stream vs. display data stream
const CONTROL_CMD: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const PAGES: u8 = 8;

const INIT_SEQUENCE: &[u8] = &[
    CMD_DISPLAY_OFF, // panel off during setup
    0xD5, 0x80, // clock divide ratio
    0xA8, 0x3F, // multiplex ratio 1/64
    0xD3, 0x00, // display offset
    0x40, // start line 0
    0xAD, 0x8B, // charge pump on
    0xA1, // segment remap
    0xC8, // COM scan remapped
    0xDA, 0x12, // COM pins alternative
    0x81, 0x80, // contrast
    0xD9, 0x22, // pre-charge periods
    0xDB, 0x35, // VCOM deselect level
    0xA4, // follow RAM content
    0xA6, // non-inverted
];

/// SH1106 display with the reading layouts
pub struct Sh1106<I2C> {
    i2c: I2C,
    addr: u8,
    /// Mount the module upside down
    rotate: bool,
    fb: FrameBuffer,
}

impl<I2C: I2c> Sh1106<I2C> {
    pub fn new(i2c: I2C, addr: u8, rotate: bool) -> Self {
        Self {
            i2c,
            addr,
            rotate,
            fb: FrameBuffer::new(),
        }
    }

    /// Address probe standing in for a bus scan
    fn detect(&mut self) -> Result<(), DisplayError> {
        self.i2c
            .write(self.addr, &[CONTROL_CMD])
            .map_err(|_| DisplayError::NotDetected)
    }

    fn command(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        for &byte in commands {
            self.i2c
                .write(self.addr, &[CONTROL_CMD, byte])
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    /// Push the framebuffer to the panel, page by page
    fn flush(&mut self) -> Result<(), DisplayError> {
        for page in 0..PAGES {
            self.command(&[
                CMD_SET_PAGE | page,
                CMD_COL_LOW | (COL_OFFSET & 0x0F),
                CMD_COL_HIGH | (COL_OFFSET >> 4),
            ])?;

            let mut buf = [0u8; WIDTH + 1];
            buf[0] = CONTROL_DATA;
            for col in 0..WIDTH {
                // 180 degree rotation = reversed pages, reversed columns,
                // reversed bits within each column byte
                buf[1 + col] = if self.rotate {
                    self.fb.page((PAGES - 1 - page) as usize)[WIDTH - 1 - col].reverse_bits()
                } else {
                    self.fb.page(page as usize)[col]
                };
            }
            self.i2c
                .write(self.addr, &buf)
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }
}

impl<I2C: I2c> ReadingDisplay for Sh1106<I2C> {
    async fn render(&mut self, reading: &Reading, style: RenderStyle) -> Result<(), DisplayError> {
        self.detect()?;
        self.command(INIT_SEQUENCE)?;
        layout::render(&mut self.fb, reading, style);
        self.flush()?;
        self.command(&[CMD_DISPLAY_ON])
    }

    async fn power_off(&mut self) -> Result<(), DisplayError> {
        self.command(&[CMD_DISPLAY_OFF])
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    use super::*;

    #[derive(Default)]
    struct FakeI2c {
        writes: Vec<Vec<u8>>,
        fail: bool,
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            assert_eq!(address, DEFAULT_ADDR);
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push(bytes.to_vec());
                }
            }
            Ok(())
        }
    }

    fn reading() -> Reading {
        Reading::celsius(21.5, 48.0)
    }

    #[test]
    fn test_render_sequence() {
        let mut display = Sh1106::new(FakeI2c::default(), DEFAULT_ADDR, false);
        block_on(display.render(&reading(), RenderStyle::Plain)).unwrap();

        let writes = &display.i2c.writes;
        // Probe first, display-on last
        assert_eq!(writes[0], [CONTROL_CMD]);
        assert_eq!(writes.last().unwrap(), &[CONTROL_CMD, CMD_DISPLAY_ON]);
        // One data transfer per page, each a full row of column bytes
        let pages: Vec<_> = writes.iter().filter(|w| w[0] == CONTROL_DATA).collect();
        assert_eq!(pages.len(), PAGES as usize);
        assert!(pages.iter().all(|w| w.len() == WIDTH + 1));
    }

    #[test]
    fn test_missing_device() {
        let i2c = FakeI2c {
            fail: true,
            ..Default::default()
        };
        let mut display = Sh1106::new(i2c, DEFAULT_ADDR, false);
        let result = block_on(display.render(&reading(), RenderStyle::Rich));
        assert_eq!(result, Err(DisplayError::NotDetected));
    }

    #[test]
    fn test_power_off_command() {
        let mut display = Sh1106::new(FakeI2c::default(), DEFAULT_ADDR, false);
        block_on(display.power_off()).unwrap();
        assert_eq!(display.i2c.writes, [[CONTROL_CMD, CMD_DISPLAY_OFF]]);
    }

    #[test]
    fn test_rotation_transforms_pages() {
        let mut upright = Sh1106::new(FakeI2c::default(), DEFAULT_ADDR, false);
        let mut rotated = Sh1106::new(FakeI2c::default(), DEFAULT_ADDR, true);
        block_on(upright.render(&reading(), RenderStyle::Rich)).unwrap();
        block_on(rotated.render(&reading(), RenderStyle::Rich)).unwrap();

        let pages = |d: &Sh1106<FakeI2c>| -> Vec<Vec<u8>> {
            d.i2c
                .writes
                .iter()
                .filter(|w| w[0] == CONTROL_DATA)
                .map(|w| w[1..].to_vec())
                .collect()
        };
        let up = pages(&upright);
        let rot = pages(&rotated);
        // First rotated page is the last upright page, mirrored
        let mirrored: Vec<u8> = up[7].iter().rev().map(|b| b.reverse_bits()).collect();
        assert_eq!(rot[0], mirrored);
    }
}
