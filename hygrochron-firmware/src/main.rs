//! Hygrochron - Duty-Cycled Temperature/Humidity Node Firmware
//!
//! Firmware binary for the Raspberry Pi Pico W. Wires the board
//! peripherals to the board-agnostic orchestrator and runs it under the
//! configured power mode.
//!
//! Named after the Greek "hygros" (moist) and "chronos" (time) -
//! the node wakes on a fixed schedule, takes one reading, and sleeps.

#![no_std]
#![no_main]

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hygrochron_core::config::{NodeSettings, PowerMode, TogglePair};
use hygrochron_core::cycle::CycleExecutor;
use hygrochron_core::feedback::StatusFeedback;
use hygrochron_core::power::PowerScheduler;
use hygrochron_core::reading::Unit;
use hygrochron_drivers::display::{sh1106, Sh1106};
use hygrochron_drivers::indicator::GpioIndicator;
use hygrochron_drivers::sensor::Dht22;

use crate::board::{BoardPower, DhtLine, LedPin, PullUpToggle};
use crate::net::WebhookLink;

mod board;
mod net;

/// Node configuration generated at build time from environment variables
mod node_config {
    include!(concat!(env!("OUT_DIR"), "/node_config.rs"));
}

/// CYW43439 firmware blobs (see ../cyw43-firmware/README.md)
const WIFI_FW: &[u8] = include_bytes!("../../cyw43-firmware/43439A0.bin");
const WIFI_CLM: &[u8] = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hygrochron firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut rng = RoscRng;

    // Wifi chip on the fixed Pico W pins (SPI over PIO)
    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, WIFI_FW).await;
    unwrap!(spawner.spawn(wifi_task(runner)));

    control.init(WIFI_CLM).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;
    info!("Wifi chip initialized");

    // Network stack with DHCP
    let seed = rng.next_u64();
    static RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        embassy_net::Config::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    );
    unwrap!(spawner.spawn(net_task(runner)));

    // DHT22 data line on GPIO2
    let sensor = Dht22::new(DhtLine::new(Flex::new(p.PIN_2)), Delay);

    // SH1106 on I2C0 (GPIO0 SDA / GPIO1 SCL)
    let i2c_bus = I2c::new_blocking(p.I2C0, p.PIN_1, p.PIN_0, i2c::Config::default());
    let display = Sh1106::new(i2c_bus, sh1106::DEFAULT_ADDR, node_config::DISPLAY_ROTATE);

    // Status LED, wired active-low
    let indicator = GpioIndicator::new_active_low(LedPin(Output::new(p.PIN_16, Level::High)));

    // Configuration toggles: jumper to ground to enable
    let toggles = TogglePair::new(
        PullUpToggle(Input::new(p.PIN_14, Pull::Up)),
        PullUpToggle(Input::new(p.PIN_15, Pull::Up)),
    );

    let cloud = WebhookLink::new(
        control,
        stack,
        node_config::WIFI_SSID,
        node_config::WIFI_PASSWORD,
        node_config::WEBHOOK_URL,
    );

    let settings = NodeSettings {
        unit: if node_config::FAHRENHEIT {
            Unit::Fahrenheit
        } else {
            Unit::Celsius
        },
        ..NodeSettings::default()
    };
    let mode = if node_config::DEEP_SLEEP {
        PowerMode::DeepSleep {
            interval_s: node_config::LOG_INTERVAL_S,
        }
    } else {
        PowerMode::ContinuousLoop {
            interval_s: node_config::LOG_INTERVAL_S,
        }
    };

    let mut executor = CycleExecutor::new(
        sensor,
        display,
        cloud,
        StatusFeedback::new(indicator, Delay),
        Delay,
        settings,
    );
    let mut scheduler = PowerScheduler::new(mode, BoardPower, toggles);
    scheduler.run(&mut executor).await;

    // Only the debug hold ends the scheduler; park the node for inspection
    info!("Debug hold, node parked");
    loop {
        Timer::after_secs(60).await;
    }
}
