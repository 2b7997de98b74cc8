//! Electrical sizing calculators
//!
//! Pure functions shared by every selector: three-phase current from motor
//! power, 16-channel PLC card counting, and the digital-output addressing
//! overhead for multiplexed valve-driver cards.

/// Default motor power factor used when the project does not override it
pub const DEFAULT_POWER_FACTOR: f64 = 0.85;

/// Default motor efficiency used when the project does not override it
pub const DEFAULT_EFFICIENCY: f64 = 0.93;

/// Channels per PLC I/O card
pub const CHANNELS_PER_CARD: u32 = 16;

/// Round to two decimals (currents, aggregated quantities)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Three-phase line current (A) for a motor load.
///
/// `I = P / (√3 · U · cosφ · η)`, rounded to two decimals. Callers must
/// guarantee a non-zero voltage; the project voltage is validated upstream.
pub fn three_phase_current(power_w: f64, voltage: f64, power_factor: f64, efficiency: f64) -> f64 {
    round2(power_w / (3.0_f64.sqrt() * voltage * power_factor * efficiency))
}

/// Three-phase line current (A) for a resistive load (heaters): unity
/// power factor, no efficiency derating.
pub fn resistive_current(power_w: f64, voltage: f64) -> f64 {
    three_phase_current(power_w, voltage, 1.0, 1.0)
}

/// Number of 16-channel I/O cards needed for a channel demand
pub fn io_card_count(channels: u32) -> u32 {
    channels.div_ceil(CHANNELS_PER_CARD)
}

/// Extra digital outputs needed to address multiple multiplexed cards:
/// `ceil(log2(cards))`, zero for zero or one card.
pub fn addressing_overhead_do(cards: u32) -> u32 {
    if cards == 0 {
        0
    } else {
        32 - (cards - 1).leading_zeros()
    }
}
