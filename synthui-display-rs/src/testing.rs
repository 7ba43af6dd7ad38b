//! Recording [`DrawingSurface`] used by the unit tests.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use heapless::{String, Vec};
use synthui::patch::copy_truncated;

use crate::surface::{DrawingSurface, Font};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// Glyph height of the selected font, `None` for the default font.
    SetFont(Option<u32>),
    SetTextColor(BinaryColor, BinaryColor),
    SetCursor(i32, i32),
    Print(String<32>),
    DrawRect(i32, i32, u32, u32),
    FillRect(i32, i32, u32, u32),
}

/// Logs every call instead of drawing. Calls beyond the capacity are
/// dropped.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call, 128>,
}

impl RecordingSurface {
    fn record(&mut self, call: Call) {
        let _ = self.calls.push(call);
    }

    pub fn printed(&self) -> impl Iterator<Item = &str> + '_ {
        self.calls.iter().filter_map(|c| match c {
            Call::Print(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (i32, i32, u32, u32)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            Call::FillRect(x, y, w, h) => Some((x, y, w, h)),
            _ => None,
        })
    }

    pub fn outlines(&self) -> impl Iterator<Item = (i32, i32, u32, u32)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            Call::DrawRect(x, y, w, h) => Some((x, y, w, h)),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn set_font(&mut self, font: Option<Font>) {
        self.record(Call::SetFont(font.map(|f| f.character_size.height)));
    }

    fn set_text_color(&mut self, foreground: BinaryColor, background: BinaryColor) {
        self.record(Call::SetTextColor(foreground, background));
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.record(Call::SetCursor(x, y));
    }

    fn print(&mut self, text: &str) -> Result<(), Infallible> {
        self.record(Call::Print(copy_truncated(text)));
        Ok(())
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, _: BinaryColor) -> Result<(), Infallible> {
        self.record(Call::DrawRect(x, y, w, h));
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, _: BinaryColor) -> Result<(), Infallible> {
        self.record(Call::FillRect(x, y, w, h));
        Ok(())
    }
}
