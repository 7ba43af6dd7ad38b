//! SSD1306 128×64 over async I2C, in buffered graphics mode.
//!
//! Drawing goes into a RAM frame buffer through [`OledDriver::surface()`];
//! only [`OledDriver::init()`] and [`OledDriver::flush()`] touch the bus.

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async};

use crate::error::OledError;
use crate::surface::GfxSurface;

/// The buffered `ssd1306` display the driver owns.
pub type Oled<I2C> =
    Ssd1306Async<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsModeAsync<DisplaySize128x64>>;

/// Owns the panel and tracks whether it has been initialised.
///
/// ```no_run
/// use embedded_graphics::pixelcolor::BinaryColor;
/// use synthui_display::{surface::DrawingSurface, OledDriver};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().await.unwrap();
/// oled.clear_buffer();
/// if let Some(mut surface) = oled.surface() {
///     surface.fill_rect(0, 0, 8, 8, BinaryColor::On).unwrap();
/// }
/// oled.flush().await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    display: Oled<I2C>,
    initialized: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Wrap the bus; no I2C traffic until [`init()`](Self::init).
    ///
    /// `address` is the 7-bit panel address, usually `0x3C` or `0x3D`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self {
            display,
            initialized: false,
        }
    }

    /// Send the panel init sequence.
    ///
    /// # Errors
    ///
    /// [`OledError::InitializationFailed`] if any write of the sequence
    /// fails, whatever the bus error. The driver stays uninitialised.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.display
            .init()
            .await
            .map_err(|_| OledError::InitializationFailed)?;
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Blank the frame buffer. The panel keeps showing the old frame until
    /// the next [`flush()`](Self::flush).
    pub fn clear_buffer(&mut self) {
        self.display.clear_buffer();
    }

    /// A drawing surface over the frame buffer, `None` before `init()`.
    pub fn surface(&mut self) -> Option<GfxSurface<'_, Oled<I2C>>> {
        if self.initialized {
            Some(GfxSurface::monochrome(&mut self.display))
        } else {
            None
        }
    }

    /// Send the frame buffer to the panel (about 20 ms at 400 kHz).
    ///
    /// # Errors
    ///
    /// [`OledError::NotInitialized`] before `init()`, [`OledError::Display`]
    /// on a bus failure.
    pub async fn flush(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.display.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal_async::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// Bus that fails every transaction with `error`.
    struct FailingBus {
        error: ErrorKind,
    }

    impl ErrorType for FailingBus {
        type Error = ErrorKind;
    }

    impl I2c for FailingBus {
        async fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            Err(self.error)
        }
    }

    #[test]
    fn any_init_bus_error_is_initialization_failed() {
        for error in [
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            ErrorKind::ArbitrationLoss,
            ErrorKind::Bus,
            ErrorKind::Other,
        ] {
            let mut oled = OledDriver::new(FailingBus { error }, 0x3C);
            let result = block_on(oled.init());
            assert!(matches!(result, Err(OledError::InitializationFailed)));
            assert!(!oled.is_initialized());
            assert!(oled.surface().is_none());
        }
    }

    #[test]
    fn flush_before_init_is_rejected() {
        let mut oled = OledDriver::new(FailingBus { error: ErrorKind::Bus }, 0x3C);
        let result = block_on(oled.flush());
        assert!(matches!(result, Err(OledError::NotInitialized)));
    }
}
