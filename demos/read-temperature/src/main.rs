//! MCP9808 temperature logger
//!
//! Demonstrates the async driver on the Raspberry Pi Pico 2: verifies the
//! sensor, logs one reading per second, and every tenth cycle puts the
//! sensor into shutdown for a few seconds to show the wake settle delay.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                         |
//! |-----------|------------|-------------------------------|
//! | I2C0 SDA  | GP20       |                               |
//! | I2C0 SCL  | GP21       |                               |
//! | A0..A2    | GND        | Default address 0x18          |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use mcp9808_driver::{Config, Mcp9808Async, Resolution, DEFAULT_ADDRESS};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let mut sensor = match Mcp9808Async::init(Config::new(i2c).with_address(DEFAULT_ADDRESS)).await
    {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("MCP9808 init failed: {}", e);
            return;
        }
    };

    if let Err(e) = sensor.set_resolution(Resolution::Sixteenth).await {
        warn!("Could not set resolution: {}", e);
    }

    let mut cycle: u32 = 0;
    loop {
        match sensor.reading().await {
            Ok(reading) if reading.is_available() => info!(
                "t={}ms {}°C / {}°F",
                reading.timestamp_ms,
                reading.celsius,
                reading.fahrenheit()
            ),
            Ok(_) => warn!("No valid reading yet"),
            Err(e) => error!("Read failed: {}", e),
        }

        cycle = cycle.wrapping_add(1);
        if cycle % 10 == 0 {
            info!("Shutting down sensor");
            if let Err(e) = sensor.shutdown().await {
                error!("Shutdown failed: {}", e);
            }
            Timer::after(Duration::from_secs(3)).await;

            // Returns after the settle delay, so the next reading is valid.
            if let Err(e) = sensor.wake().await {
                error!("Wake failed: {}", e);
            }
        }

        Timer::after(Duration::from_secs(1)).await;
    }
}
