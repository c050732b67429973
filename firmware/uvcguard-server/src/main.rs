//! uvcguard controller node
//!
//! Reads the hour from a DS1302 and a radar presence sensor once per
//! second and tells the exposed unit when to switch its UV-C lamp,
//! over a one-byte-per-directive UART link.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output, Pull};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use uvcguard_drivers::link::SerialLink;
use uvcguard_drivers::rtc::Ds1302;
use uvcguard_drivers::sensor::ThresholdSensor;
use uvcguard_hal_rp2040::{AdcSampler, FlexDataLine};

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
static LINK_RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("uvcguard controller starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // Console on UART0 (GPIO0 TX, GPIO1 RX)
    let console = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default()).into_buffered(
        Irqs,
        CONSOLE_TX_BUF.init([0u8; 256]),
        CONSOLE_RX_BUF.init([0u8; 64]),
    );
    let (console_tx, console_rx) = console.split();

    // Link to the exposed unit on UART1 (GPIO4 TX, GPIO5 RX unused)
    let link_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = config.link.baudrate;
        cfg
    };
    let link = Uart::new_blocking(p.UART1, p.PIN_4, p.PIN_5, link_config).into_buffered(
        Irqs,
        LINK_TX_BUF.init([0u8; 16]),
        LINK_RX_BUF.init([0u8; 16]),
    );
    let (link_tx, _link_rx) = link.split();
    info!("UART link at {=u32} baud", config.link.baudrate);

    // DS1302: CE=GPIO20, SCLK=GPIO19, I/O=GPIO18
    let rtc = Ds1302::new(
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        FlexDataLine::new(Flex::new(p.PIN_18)),
        Delay,
    );

    // Radar output on ADC1 (GPIO27)
    let adc = Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default());
    let radar = Channel::new_pin(p.PIN_27, Pull::None);
    let presence = ThresholdSensor::new(AdcSampler::new(adc, radar), config.presence.threshold());
    info!("Presence threshold {=u16} raw", config.presence.threshold().raw());

    // On-board LED (GPIO25) mirrors the lamp
    let status_led = Output::new(p.PIN_25, Level::Low);

    let controller = Controller::new(rtc, presence, SerialLink::new(link_tx), status_led, &config);

    spawner.spawn(tasks::console_rx_task(console_rx)).unwrap();
    spawner.spawn(tasks::console_tx_task(console_tx)).unwrap();
    spawner
        .spawn(tasks::control_task(controller, config.control.tick_ms))
        .unwrap();

    info!("All tasks spawned, controller running");
}
