//! synthui-fw
//!
//! Patch browser firmware for the Raspberry Pi Pico 2:
//!
//! 1. A button is pressed.
//! 2. `keys_task` sees the falling edge, waits out contact bounce and
//!    queues the matching [`InputEvent`].
//! 3. The UI task applies queued events to the shared [`Navigator`],
//!    snapshots the screen and flushes a new frame when it changed.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::select::select_array;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use synthui::input::InputEvent;
use synthui::nav::Navigator;
use synthui::patch::PRESETS;
use synthui_display::{ui_task, DisplayConfig, OledDriver};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

const INPUT_QUEUE_LEN: usize = 8;
const OLED_ADDRESS: u8 = 0x3C;
const DEBOUNCE: Duration = Duration::from_millis(20);

/// Key events, from `keys_task` to the UI task.
static INPUTS: Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_LEN> = Channel::new();

static NAVIGATOR: StaticCell<Mutex<CriticalSectionRawMutex, Navigator>> = StaticCell::new();

/// Event for each entry of the button array handed to `keys_task`.
const BUTTON_EVENTS: [InputEvent; 6] = [
    InputEvent::Up,
    InputEvent::Right,
    InputEvent::Down,
    InputEvent::Left,
    InputEvent::Cancel,
    InputEvent::Ok,
];

type OledI2c = I2c<'static, I2C0, i2c::Async>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Concrete wrapper around the generic `ui_task`.
#[embassy_executor::task]
async fn oled_task(
    driver: OledDriver<OledI2c>,
    navigator: &'static Mutex<CriticalSectionRawMutex, Navigator>,
    inputs: Receiver<'static, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_LEN>,
    config: DisplayConfig,
) {
    ui_task(driver, navigator, inputs, config).await;
}

/// Wait on all six active-low buttons at once and queue one event per
/// debounced press.
#[embassy_executor::task]
async fn keys_task(
    mut buttons: [Input<'static>; 6],
    events: Sender<'static, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_LEN>,
) {
    info!("Key task started");

    loop {
        let ((), index) = select_array(buttons.each_mut().map(|b| b.wait_for_falling_edge())).await;

        Timer::after(DEBOUNCE).await;
        if buttons[index].is_high() {
            continue;
        }

        let event = BUTTON_EVENTS[index];
        debug!("Key: {}", event);
        events.send(event).await;

        buttons[index].wait_for_high().await;
        Timer::after(DEBOUNCE).await;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("synthui-fw starting");

    // ── Pin assignments ───────────────────────────────────────────────────
    // KEY_UP     → GP2   KEY_RIGHT → GP3   KEY_DOWN → GP4
    // KEY_LEFT   → GP5   KEY_CANCEL→ GP6   KEY_OK   → GP7
    //   (all active-low, pull-up enabled)
    // I2C_SDA    → GP20
    // I2C_SCL    → GP21
    // ───────────────────────────────────────────────────────────────────────

    let buttons = [
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
    ];

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c_config);
    let oled_driver = OledDriver::new(i2c, OLED_ADDRESS);

    let navigator = match Navigator::new(&PRESETS) {
        Ok(nav) => NAVIGATOR.init(Mutex::new(nav)),
        Err(e) => {
            error!("Invalid patch bank: {}", e);
            return;
        }
    };
    info!("{} patches loaded", PRESETS.len());

    // ── Spawn tasks ───────────────────────────────────────────────────────

    let display_config = DisplayConfig::default();

    spawner
        .spawn(oled_task(oled_driver, navigator, INPUTS.receiver(), display_config))
        .unwrap();
    spawner.spawn(keys_task(buttons, INPUTS.sender())).unwrap();

    info!("All tasks spawned");
}
