//! Event-driven UI loop: input events in, frames out.
//!
//! [`ui_task`] owns the OLED. Every event is applied to the shared
//! [`Navigator`] under its mutex, a [`Screen`] snapshot is taken, and the
//! mutex is released before any drawing or I2C traffic.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;
use synthui::input::InputEvent;
use synthui::nav::Navigator;

use crate::driver::OledDriver;
use crate::error::OledError;
use crate::layout::{render_screen, DisplayConfig, Screen};

/// Run the UI forever.
///
/// A plain `async fn` because Embassy tasks cannot be generic; wrap it in a
/// concrete task in the firmware:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn ui(
///     driver: OledDriver<I2c<'static, I2C0, Async>>,
///     nav: &'static Mutex<CriticalSectionRawMutex, Navigator>,
///     inputs: Receiver<'static, CriticalSectionRawMutex, InputEvent, 8>,
/// ) {
///     ui_task(driver, nav, inputs, DisplayConfig::default()).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the panel and draw the first frame.
/// 2. Wait for an event, then drain whatever else is queued.
/// 3. Lock, apply each event with [`Navigator::handle`], snapshot, unlock.
/// 4. If the snapshot differs from the last frame, render and flush.
/// 5. Sleep for [`DisplayConfig::frame_period_ms`] so bursts coalesce.
///
/// An init failure ends the task. Render and flush failures are logged and
/// the next event retries.
#[allow(clippy::needless_pass_by_value)]
pub async fn ui_task<I2C, const N: usize>(
    mut driver: OledDriver<I2C>,
    navigator: &'static Mutex<CriticalSectionRawMutex, Navigator>,
    inputs: Receiver<'static, CriticalSectionRawMutex, InputEvent, N>,
    config: DisplayConfig,
) where
    I2C: I2c,
{
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    let period = Duration::from_millis(config.frame_period_ms());
    let mut last = {
        let nav = navigator.lock().await;
        Screen::from_navigator(&nav, &config)
    };
    if let Err(_e) = render_frame(&mut driver, &last, &config).await {
        #[cfg(feature = "defmt")]
        defmt::error!("first frame failed: {}", _e);
    }

    loop {
        let first = inputs.receive().await;

        let screen = {
            let mut nav = navigator.lock().await;
            let mut redraw = nav.handle(first).needs_redraw();
            while let Ok(event) = inputs.try_receive() {
                redraw |= nav.handle(event).needs_redraw();
            }
            if !redraw {
                continue;
            }
            Screen::from_navigator(&nav, &config)
        };

        if screen == last {
            continue;
        }

        match render_frame(&mut driver, &screen, &config).await {
            Ok(()) => last = screen,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("frame failed: {}", _e);
            }
        }

        Timer::after(period).await;
    }
}

async fn render_frame<I2C>(
    driver: &mut OledDriver<I2C>,
    screen: &Screen,
    config: &DisplayConfig,
) -> Result<(), OledError>
where
    I2C: I2c,
{
    driver.clear_buffer();
    let mut surface = driver.surface().ok_or(OledError::NotInitialized)?;
    render_screen(&mut surface, screen, config)?;
    driver.flush().await
}
