//! The drawing-surface contract the renderer draws through.
//!
//! [`DrawingSurface`] is a small Adafruit-GFX-style canvas: text goes
//! through a current font, color and cursor, rectangles are drawn directly.
//! [`GfxSurface`] implements it for any `embedded-graphics`
//! [`DrawTarget`], which covers the SSD1306 frame buffer as well as the
//! simulator and `MockDisplay`.

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};

/// Opaque font handle. Glyph tables are owned by `embedded-graphics`.
pub type Font = &'static MonoFont<'static>;

/// Font selected by `set_font(None)`.
pub const DEFAULT_FONT: Font = &FONT_6X10;

/// A 2D bitmap canvas with text and rectangle primitives.
///
/// Font, text colors and cursor are surface state: once set they apply to
/// every following [`print`](Self::print) until changed again.
pub trait DrawingSurface {
    type Color: Copy;
    type Error;

    /// Select the font for subsequent text; `None` selects [`DEFAULT_FONT`].
    fn set_font(&mut self, font: Option<Font>);

    fn set_text_color(&mut self, foreground: Self::Color, background: Self::Color);

    /// Anchor for the next text draw (left edge, baseline).
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Draw `text` at the cursor and advance the cursor past it.
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Rectangle outline, one pixel wide.
    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Self::Color)
        -> Result<(), Self::Error>;

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Self::Color)
        -> Result<(), Self::Error>;
}

/// [`DrawingSurface`] over an `embedded-graphics` draw target.
///
/// Borrows the target for the duration of one frame; the text state lives
/// in the adapter, not in the target.
///
/// # Example
///
/// ```
/// use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor, prelude::*};
/// use synthui_display::surface::{DrawingSurface, GfxSurface};
///
/// let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
/// let mut surface = GfxSurface::monochrome(&mut display);
/// surface.fill_rect(0, 0, 2, 2, BinaryColor::On).unwrap();
/// assert_eq!(display.get_pixel(Point::new(1, 1)), Some(BinaryColor::On));
/// ```
pub struct GfxSurface<'a, D>
where
    D: DrawTarget,
{
    target: &'a mut D,
    font: Font,
    foreground: D::Color,
    background: D::Color,
    cursor: Point,
}

impl<'a, D> GfxSurface<'a, D>
where
    D: DrawTarget,
{
    pub fn new(target: &'a mut D, foreground: D::Color, background: D::Color) -> Self {
        Self {
            target,
            font: DEFAULT_FONT,
            foreground,
            background,
            cursor: Point::zero(),
        }
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }
}

impl<'a, D> GfxSurface<'a, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    /// White-on-black text, the usual OLED setup.
    pub fn monochrome(target: &'a mut D) -> Self {
        Self::new(target, BinaryColor::On, BinaryColor::Off)
    }
}

impl<D> DrawingSurface for GfxSurface<'_, D>
where
    D: DrawTarget,
{
    type Color = D::Color;
    type Error = D::Error;

    fn set_font(&mut self, font: Option<Font>) {
        self.font = font.unwrap_or(DEFAULT_FONT);
    }

    fn set_text_color(&mut self, foreground: Self::Color, background: Self::Color) {
        self.foreground = foreground;
        self.background = background;
    }

    fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = Point::new(x, y);
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        let style = MonoTextStyleBuilder::new()
            .font(self.font)
            .text_color(self.foreground)
            .background_color(self.background)
            .build();
        self.cursor = Text::new(text, self.cursor, style).draw(&mut *self.target)?;
        Ok(())
    }

    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut *self.target)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut *self.target)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
