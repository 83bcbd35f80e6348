//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306 panels over blocking I2C. The frame buffer is
//! kept in page layout (8 vertical pixels per byte) and is only sent on
//! flush. Text is rendered with `embedded-graphics` mono fonts.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

use respiro_core::traits::Display;

/// Default I2C address
pub const DEFAULT_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const ENTIRE_DISPLAY_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
}

/// Control byte: command stream
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: data stream
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    /// Failed bus transfers since creation
    errors: u32,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2c,
{
    /// Create a new driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDR)
    }

    /// Create a new driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
            errors: 0,
        }
    }

    /// Initialize the panel
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            (HEIGHT - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Internal charge pump on
            cmd::SET_MEMORY_MODE,
            0x00, // Horizontal addressing
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::ENTIRE_DISPLAY_RESUME,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }
        self.write_frame()
    }

    /// Number of failed transfers
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    /// Read back one pixel of the frame buffer
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
    }

    /// Send the whole frame buffer
    fn write_frame(&mut self) -> Result<(), I2C::Error> {
        for c in [
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(c)?;
        }

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for page in 0..PAGES {
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(self.address, &data)?;
        }
        Ok(())
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let bit = 1 << (y % 8);
        if on {
            self.buffer[y / 8][x] |= bit;
        } else {
            self.buffer[y / 8][x] &= !bit;
        }
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C>
where
    I2C: I2c,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as usize, point.y as usize, color.is_on());
            }
        }
        Ok(())
    }
}

impl<I2C> Display for Ssd1306<I2C>
where
    I2C: I2c,
{
    fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let position = Point::new(x as i32, y as i32);
        let _ = Text::with_baseline(text, position, style, Baseline::Top).draw(self);
    }

    fn flush(&mut self) {
        if self.write_frame().is_err() {
            self.errors = self.errors.wrapping_add(1);
        }
    }
}
