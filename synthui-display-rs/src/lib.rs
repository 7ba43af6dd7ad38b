//! Rendering for [`synthui`] patches on a 128×64 SSD1306 OLED.
//!
//! - [`surface`]: the [`DrawingSurface`](surface::DrawingSurface) canvas
//!   contract and its `embedded-graphics` adapter.
//! - [`renderer`]: stateless text, slider and gauge cluster helpers.
//! - [`layout`]: the [`Screen`] snapshot and [`render_screen`].
//! - [`driver`]: [`OledDriver`], the async `ssd1306` wrapper.
//! - `ui_task` *(feature `task`)*: the Embassy UI loop.
//!
//! # Quick Start
//!
//! ```ignore
//! use synthui_display::{ui_task, DisplayConfig, OledDriver};
//!
//! let oled = OledDriver::new(i2c0, 0x3C);
//! spawner.spawn(ui(oled, navigator, INPUTS.receiver())).unwrap();
//!
//! #[embassy_executor::task]
//! async fn ui(
//!     driver: OledDriver<MyI2c>,
//!     navigator: &'static Mutex<CriticalSectionRawMutex, Navigator>,
//!     inputs: Receiver<'static, CriticalSectionRawMutex, InputEvent, 8>,
//! ) {
//!     ui_task(driver, navigator, inputs, DisplayConfig::default()).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`], forwarded to `synthui`.
//! - **`task`**: [`ui_task`], pulling in `embassy-sync` and `embassy-time`.

#![no_std]

pub mod driver;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod surface;
#[cfg(test)]
mod testing;
#[cfg(feature = "task")]
pub mod ui_task;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::OledDriver;
pub use error::OledError;
pub use layout::{render_screen, DisplayConfig, Screen};
pub use renderer::{GaugeStyle, SliderStyle, TextStyle, ThumbPolicy};
#[cfg(feature = "task")]
pub use ui_task::ui_task;
