//! uvcguard exposed unit
//!
//! Switches the UV-C lamp on directives from the controller or the
//! console, sounds the buzzer and blinks the indicator while it is lit,
//! and latches the lamp off for good on the first overcurrent sample.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use uvcguard_core::safety::ExposedUnit;
use uvcguard_drivers::output::{GpioAlarm, GpioLamp};
use uvcguard_drivers::sensor::ThresholdSensor;
use uvcguard_hal_rp2040::AdcSampler;

use crate::controller::Controller;

mod channels;
mod config;
mod controller;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static CONSOLE_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static CONSOLE_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static LINK_TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static LINK_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("uvcguard exposed unit starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Lamp first, so it is driven low as early as possible
    let lamp = GpioLamp::new_active_high(Output::new(p.PIN_21, Level::Low));
    let alarm = GpioAlarm::new(
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_22, Level::Low),
    );
    let unit = ExposedUnit::new(lamp, alarm);

    // Current sense on ADC1 (GPIO27)
    let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
    let sense = Channel::new_pin(p.PIN_27, Pull::None);
    let current = ThresholdSensor::new(AdcSampler::new(adc, sense), config.overcurrent.threshold());
    info!("Overcurrent threshold {=u16} raw", config.overcurrent.threshold().raw());

    // Console on UART0 (GPIO0 TX, GPIO1 RX)
    let console = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default()).into_buffered(
        Irqs,
        CONSOLE_TX_BUF.init([0u8; 256]),
        CONSOLE_RX_BUF.init([0u8; 64]),
    );
    let (console_tx, console_rx) = console.split();

    // Link from the controller on UART1 (GPIO5 RX, GPIO4 TX unused)
    let link_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config.link.baudrate;
        cfg
    };
    let link = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, link_config).into_buffered(
        Irqs,
        LINK_TX_BUF.init([0u8; 16]),
        LINK_RX_BUF.init([0u8; 64]),
    );
    let (_link_tx, link_rx) = link.split();
    info!("UART link at {=u32} baud", config.link.baudrate);

    let controller = Controller::new(unit, current);

    spawner.spawn(tasks::console_rx_task(console_rx)).unwrap();
    spawner.spawn(tasks::console_tx_task(console_tx)).unwrap();
    spawner.spawn(tasks::link_rx_task(link_rx)).unwrap();
    spawner.spawn(tasks::unit_task(controller, config)).unwrap();

    info!("All tasks spawned, exposed unit running");
}
