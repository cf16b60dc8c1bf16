use chrono::{DateTime, Utc};

use crate::consts::{
    DAYS_PER_JULIAN_CENTURY, J2000_JULIAN_SECONDS, SECONDS_PER_DAY, UNIX_EPOCH_JD,
};

// Simulated seconds per wall-clock second at rate 1.
const BASE_RATE: f64 = 1.0;

// Holding the faster/slower control multiplies the rate by this much per
// held second.
const RAMP_PER_SECOND: f64 = 4.0;

const MIN_RATE_MAGNITUDE: f64 = 1.0e-2;
const MAX_RATE_MAGNITUDE: f64 = 1.0e8;

/// Simulated Julian time, pinned to the wall clock. The offset only
/// accumulates the *excess* drift caused by a rate other than 1, so at
/// normal speed the simulation tracks real time with no error buildup.
///
/// One instance is passed to every tick call; there is no ambient global
/// time state anywhere in the crate.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    time_offset: f64,
    rate: f64,
    paused: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationClock {
    pub fn new() -> Self {
        SimulationClock {
            time_offset: 0.0,
            rate: 1.0,
            paused: false,
        }
    }

    /// Advances the clock by one wall-clock tick of `wall_dt` seconds.
    pub fn advance(&mut self, wall_dt: f64) {
        if !self.paused {
            self.time_offset += BASE_RATE * (self.rate - 1.0) * wall_dt;
        }
    }

    /// Current simulated instant, in Julian seconds, for the given
    /// wall-clock time. Split from [`SimulationClock::now`] so tests can
    /// pin the wall clock.
    pub fn julian_seconds_at(&self, wall: DateTime<Utc>) -> f64 {
        let unix_seconds =
            wall.timestamp() as f64 + f64::from(wall.timestamp_subsec_millis()) / 1000.0;
        let julian_date = UNIX_EPOCH_JD + unix_seconds / SECONDS_PER_DAY;
        julian_date * SECONDS_PER_DAY + self.time_offset
    }

    pub fn now(&self) -> f64 {
        self.julian_seconds_at(Utc::now())
    }

    /// Rate controls: held-button ramping with exponential easing, and a
    /// sign flip to run time backwards. Pausing freezes accumulation but
    /// keeps the offset.
    pub fn speed_up(&mut self, held_dt: f64) {
        self.ramp(RAMP_PER_SECOND.powf(held_dt));
    }

    pub fn slow_down(&mut self, held_dt: f64) {
        self.ramp(RAMP_PER_SECOND.powf(-held_dt));
    }

    fn ramp(&mut self, factor: f64) {
        let magnitude = (self.rate.abs() * factor)
            .clamp(MIN_RATE_MAGNITUDE, MAX_RATE_MAGNITUDE);
        self.rate = magnitude.copysign(self.rate);
    }

    pub fn reverse(&mut self) {
        self.rate = -self.rate;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }
}

/// Julian centuries past J2000.0, the argument secular-drift tables want.
pub fn julian_centuries_since_j2000(julian_seconds: f64) -> f64 {
    (julian_seconds - J2000_JULIAN_SECONDS) / (DAYS_PER_JULIAN_CENTURY * SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    use super::*;
    use crate::consts::J2000_JULIAN_SECONDS;

    #[test]
    fn test_no_drift_at_unit_rate() {
        let mut clock = SimulationClock::new();
        for _ in 0..100 {
            clock.advance(0.016);
        }
        assert_relative_eq!(clock.time_offset(), 0.0);
    }

    #[test]
    fn test_double_rate_accumulates_excess_only() {
        let mut clock = SimulationClock::new();
        clock.speed_up(0.5); // 4^0.5 = 2x
        assert_relative_eq!(clock.rate(), 2.0, epsilon = 1e-12);

        clock.advance(10.0);
        assert_relative_eq!(clock.time_offset(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pause_freezes_but_keeps_offset() {
        let mut clock = SimulationClock::new();
        clock.speed_up(1.0);
        clock.advance(1.0);
        let offset = clock.time_offset();
        assert!(offset > 0.0);

        clock.toggle_pause();
        clock.advance(100.0);
        assert_relative_eq!(clock.time_offset(), offset);
    }

    #[test]
    fn test_reverse_flips_direction() {
        let mut clock = SimulationClock::new();
        clock.reverse();
        assert_relative_eq!(clock.rate(), -1.0);

        // rate -1 accumulates offset at -2x wall time
        clock.advance(5.0);
        assert_relative_eq!(clock.time_offset(), -10.0);
    }

    #[test]
    fn test_ramping_is_symmetric() {
        let mut clock = SimulationClock::new();
        clock.speed_up(2.0);
        clock.slow_down(2.0);
        assert_relative_eq!(clock.rate(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_julian_date_of_j2000() {
        let clock = SimulationClock::new();
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(clock.julian_seconds_at(j2000), J2000_JULIAN_SECONDS);
        assert_relative_eq!(julian_centuries_since_j2000(J2000_JULIAN_SECONDS), 0.0);
    }

    #[test]
    fn test_offset_shifts_simulated_time() {
        let mut clock = SimulationClock::new();
        clock.speed_up(0.5);
        clock.advance(SECONDS_PER_DAY); // one wall day at 2x: one extra day
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_relative_eq!(
            clock.julian_seconds_at(j2000),
            J2000_JULIAN_SECONDS + SECONDS_PER_DAY,
        );
    }
}
