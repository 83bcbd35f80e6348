//! PIO-driven WS2812 LED strip
//!
//! The PIO program generates the 800 kHz WS2812 waveform on its side-set
//! pin. Autopull is set to 8 bits so every FIFO word carries exactly one
//! channel byte, left-aligned. The matrix renderer sends bytes already in
//! wire order (green, red, blue per LED), so the driver does no
//! reordering of its own.
//!
//! The strip latches after the line idles low for 50 µs; the session tick
//! is far longer than that, so no explicit reset delay is needed.

use embassy_rp::pio::{
    Common, Config, Direction as PioDirection, FifoJoin, Instance, PioPin, ShiftConfig,
    ShiftDirection, StateMachine,
};
use embassy_rp::Peri;
use fixed::types::U24F8;

use respiro_core::traits::LedStrip;

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// WS2812 bit rate
pub const BIT_RATE_HZ: u32 = 800_000;

/// PIO cycles per bit (T1 + T2 + T3 = 2 + 5 + 3)
pub const CYCLES_PER_BIT: u32 = 10;

/// Clock divider in 24.8 fixed point: 125 MHz / (800 kHz * 10) = 15.625
const DIVIDER_BITS: u32 = SYS_CLK_HZ * 32 / (BIT_RATE_HZ * CYCLES_PER_BIT / 8);

/// WS2812 strip on one PIO state machine
pub struct PioWs2812<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioWs2812<'d, PIO, SM> {
    /// Load the WS2812 program and start the state machine on `pin`
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        pin: Peri<'d, impl PioPin>,
    ) -> Self {
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "bitloop:",
            "    out x, 1       side 0 [2]", // T3 - 1
            "    jmp !x do_zero side 1 [1]", // T1 - 1
            "do_one:",
            "    jmp bitloop    side 1 [4]", // T2 - 1
            "do_zero:",
            "    nop            side 0 [4]", // T2 - 1
            ".wrap"
        );

        let installed = common.load_program(&prg.program);
        let out_pin = common.make_pio_pin(pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&out_pin]);
        cfg.clock_divider = U24F8::from_bits(DIVIDER_BITS);
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.shift_out = ShiftConfig {
            auto_fill: true,
            threshold: 8,
            direction: ShiftDirection::Left,
        };

        sm.set_config(&cfg);
        sm.set_pin_dirs(PioDirection::Out, &[&out_pin]);
        sm.set_enable(true);

        Self { sm }
    }
}

impl<PIO: Instance, const SM: usize> LedStrip for PioWs2812<'_, PIO, SM> {
    fn send(&mut self, value: u8) {
        // Shifting left: the byte must sit in the top bits of the word
        let word = (value as u32) << 24;
        while !self.sm.tx().try_push(word) {}
    }
}
