//! Respiro - Break Reminder Firmware
//!
//! Main firmware binary for RP2040-based break reminder boards. The user
//! sets a work interval with the buttons; when it runs out the device
//! alerts, runs a short reflex game on the LED matrix and closes with a
//! guided stretch sequence.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use respiro_drivers::buzzer::PwmBuzzer;
use respiro_drivers::display::Ssd1306;
use respiro_drivers::led::RgbStatusLed;
use respiro_hal_rp2040::pins::{DISPLAY_I2C_HZ, PWM_DIVIDER, PWM_TOP};
use respiro_hal_rp2040::{ButtonPins, EmbassyClock, PioWs2812, StickAdc};

use crate::board::DeviceBoard;

mod board;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Respiro firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!("Configuration loaded");

    // Status display on I2C1 (SDA GPIO14, SCL GPIO15)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_I2C_HZ;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let mut display = Ssd1306::new(i2c);
    if let Err(e) = display.init() {
        warn!("Display init failed: {:?}", e);
    }

    // Slice 5: buzzer (A, GPIO10) and green (B, GPIO11)
    // Slice 6: blue (A, GPIO12) and red (B, GPIO13)
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    pwm_config.divider = PWM_DIVIDER.into();

    let slice5 = Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, pwm_config.clone());
    let slice6 = Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, pwm_config);
    let (buzzer_out, green_out) = slice5.split();
    let (blue_out, red_out) = slice6.split();

    let buzzer = PwmBuzzer::new(unwrap!(buzzer_out));
    let status_led = RgbStatusLed::new(unwrap!(red_out), unwrap!(green_out), unwrap!(blue_out));

    // WS2812 matrix on PIO0 (GPIO7)
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let strip = PioWs2812::new(&mut common, sm0, p.PIN_7);

    // Stick: Y on ADC0 (GPIO26), X on ADC1 (GPIO27)
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let adc0 = adc::Channel::new_pin(p.PIN_26, Pull::None);
    let adc1 = adc::Channel::new_pin(p.PIN_27, Pull::None);
    let stick = StickAdc::new(adc, adc0, adc1);

    // Buttons: A GPIO5, B GPIO6, stick push GPIO22
    let buttons = ButtonPins::new(p.PIN_5, p.PIN_6, p.PIN_22);

    let board = DeviceBoard {
        clock: EmbassyClock,
        stick,
        display,
        buzzer,
        strip,
        status_led,
    };

    spawner.must_spawn(tasks::button_task(buttons));
    spawner.must_spawn(tasks::session_task(board, config));

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
