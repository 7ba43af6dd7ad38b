//! Errors raised by the OLED driver.

use display_interface::DisplayError;

/// Failure talking to the SSD1306.
///
/// `ssd1306` folds I2C bus errors into [`DisplayError`], so this type does
/// not depend on the bus.
#[derive(Debug)]
pub enum OledError {
    /// Bus-level failure while drawing or flushing.
    Display(DisplayError),
    /// Any failure while sending the init sequence, with the underlying
    /// error discarded.
    InitializationFailed,
    /// Flush or draw before [`OledDriver::init()`](crate::OledDriver::init).
    NotInitialized,
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Display(_) => defmt::write!(f, "display bus error"),
            OledError::InitializationFailed => defmt::write!(f, "panel init failed"),
            OledError::NotInitialized => defmt::write!(f, "panel not initialised"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_error_converts() {
        let e: OledError = DisplayError::BusWriteError.into();
        assert!(matches!(e, OledError::Display(DisplayError::BusWriteError)));
    }
}
