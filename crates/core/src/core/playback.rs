//! Playback scheduler: owns the single time/position parameter.
//!
//! The scheduler never spawns timers itself. A host (frame callback, tokio loop,
//! test) calls [`Scheduler::tick_at`] with the current monotonic instant, or
//! [`Scheduler::advance`] with a synthetic elapsed duration. The wall-clock
//! reference is dropped on pause/reset, so a tick that arrives after either
//! transition is a no-op.

use tracing::{debug, warn};

use crate::scenario::{ParamRange, SimulationConfig, SpeedLimits};
use crate::time::{seconds_between, Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not playing; nothing changed.
    Idle,
    /// The parameter moved by `delta`.
    Advanced { delta: f64 },
    /// The ceiling was reached; playback is now stopped.
    ReachedCeiling,
}

/// Static limits a scheduler is built with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackBounds {
    pub range: ParamRange,
    pub initial: f64,
    pub ceiling: f64,
    pub speed: SpeedLimits,
}

impl PlaybackBounds {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            range: config.range,
            initial: config.initial,
            ceiling: config.ceiling,
            speed: config.speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub value: f64,
    pub status: PlaybackStatus,
    pub speed: f64,
    /// Instant of the last resume or tick; `None` unless playing.
    last_tick: Option<Instant>,
}

/// Playback state machine over one parameter.
///
/// Bounds are expected to come from a validated config (see [`crate::session::Session`]).
/// Unvalidated bounds never panic, but clamping against an inverted range favours `max`.
#[derive(Debug, Clone)]
pub struct Scheduler {
    bounds: PlaybackBounds,
    state: PlaybackState,
}

impl Scheduler {
    pub fn new(bounds: PlaybackBounds) -> Self {
        Self {
            state: PlaybackState {
                value: bounds.initial,
                status: PlaybackStatus::Stopped,
                speed: bounds.speed.default,
                last_tick: None,
            },
            bounds,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn bounds(&self) -> &PlaybackBounds {
        &self.bounds
    }

    pub fn value(&self) -> f64 {
        self.state.value
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    pub fn is_playing(&self) -> bool {
        self.state.status == PlaybackStatus::Playing
    }

    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    pub fn play_at(&mut self, now: Instant) {
        if self.is_playing() {
            return;
        }
        // Playing from the end rewinds first instead of stopping again immediately.
        if self.state.value >= self.bounds.ceiling {
            self.state.value = self.bounds.initial;
        }
        self.state.status = PlaybackStatus::Playing;
        self.state.last_tick = Some(now);
        debug!(value = self.state.value, speed = self.state.speed, "playback started");
    }

    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.state.status = PlaybackStatus::Paused;
        self.state.last_tick = None;
        debug!(value = self.state.value, "playback paused");
    }

    pub fn reset(&mut self) {
        self.state.value = self.bounds.initial;
        self.state.status = PlaybackStatus::Stopped;
        self.state.last_tick = None;
        debug!(value = self.state.value, "playback reset");
    }

    /// Set the parameter directly. Out-of-range targets are clamped; NaN is ignored.
    pub fn seek(&mut self, value: f64) {
        if value.is_nan() {
            warn!("ignoring NaN seek target");
            return;
        }
        let clamped = self.bounds.range.clamp(value);
        if clamped != value {
            warn!(requested = value, clamped, "seek target clamped to range");
        }
        self.state.value = clamped;
    }

    /// Change the multiplier. The next tick uses it for its whole interval.
    pub fn set_speed(&mut self, multiplier: f64) {
        if multiplier.is_nan() {
            warn!("ignoring NaN speed multiplier");
            return;
        }
        let limits = self.bounds.speed;
        let clamped = multiplier.max(limits.min).min(limits.max);
        if clamped != multiplier {
            warn!(requested = multiplier, clamped, "speed multiplier clamped");
        }
        self.state.speed = clamped;
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.tick_at(Instant::now())
    }

    /// Advance by the real time elapsed since the previous tick (or resume).
    pub fn tick_at(&mut self, now: Instant) -> TickOutcome {
        let Some(last) = self.state.last_tick else {
            return TickOutcome::Idle;
        };
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        self.state.last_tick = Some(now);
        self.step(seconds_between(last, now))
    }

    /// Advance by a synthetic elapsed duration, independent of the wall clock.
    pub fn advance(&mut self, real_elapsed: Duration) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        // An unrepresentable instant still steps; the ceiling stops playback.
        if let Some(next) = self.state.last_tick.and_then(|l| l.checked_add(real_elapsed)) {
            self.state.last_tick = Some(next);
        }
        self.step(real_elapsed.as_secs_f64())
    }

    fn step(&mut self, elapsed_secs: f64) -> TickOutcome {
        let delta = elapsed_secs * self.state.speed;
        let next = self.state.value + delta;
        if next >= self.bounds.ceiling {
            self.state.value = self.bounds.ceiling;
            self.state.status = PlaybackStatus::Stopped;
            self.state.last_tick = None;
            debug!(ceiling = self.bounds.ceiling, "playback reached ceiling");
            return TickOutcome::ReachedCeiling;
        }
        self.state.value = next;
        TickOutcome::Advanced { delta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> Scheduler {
        Scheduler::new(PlaybackBounds::from_config(
            &SimulationConfig::robot_rendezvous(),
        ))
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn starts_stopped_at_initial_value() {
        let s = canonical();
        assert_eq!(s.status(), PlaybackStatus::Stopped);
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.speed(), 1.0);
        let mut s = s;
        assert_eq!(s.tick(), TickOutcome::Idle);
    }

    #[test]
    fn tick_scales_elapsed_time_by_speed() {
        let mut s = canonical();
        let t0 = Instant::now();
        s.play_at(t0);
        s.set_speed(2.0);
        let out = s.tick_at(t0 + ms(500));
        assert_eq!(out, TickOutcome::Advanced { delta: 1.0 });
        assert!((s.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pause_twice_keeps_value_and_blocks_ticks() {
        let mut s = canonical();
        let t0 = Instant::now();
        s.play_at(t0);
        s.tick_at(t0 + ms(300));
        s.pause();
        let v = s.value();
        s.pause();
        assert_eq!(s.value(), v);
        assert_eq!(s.status(), PlaybackStatus::Paused);

        // A late tick after pause must not move anything.
        assert_eq!(s.tick_at(t0 + ms(900)), TickOutcome::Idle);
        assert_eq!(s.advance(ms(900)), TickOutcome::Idle);
        assert_eq!(s.value(), v);
    }

    #[test]
    fn resume_does_not_count_paused_time() {
        let mut s = canonical();
        let t0 = Instant::now();
        s.play_at(t0);
        s.tick_at(t0 + ms(1000));
        s.pause();
        s.play_at(t0 + ms(5000));
        s.tick_at(t0 + ms(5250));
        assert!((s.value() - 1.25).abs() < 1e-9);
    }

    #[test]
    fn reset_returns_to_initial_from_any_state() {
        let mut s = canonical();
        s.seek(4.0);
        s.reset();
        assert_eq!(s.value(), 0.0);

        s.play();
        s.advance(ms(700));
        s.reset();
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.status(), PlaybackStatus::Stopped);
        assert_eq!(s.advance(ms(700)), TickOutcome::Idle);

        s.play();
        s.pause();
        s.reset();
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.status(), PlaybackStatus::Stopped);
    }

    #[test]
    fn speed_change_applies_to_the_next_interval_only() {
        let mut s = canonical();
        let t0 = Instant::now();
        s.play_at(t0);
        s.tick_at(t0 + ms(1000));
        let before = s.value();

        s.set_speed(3.0);
        let out = s.tick_at(t0 + ms(1100));
        let TickOutcome::Advanced { delta } = out else {
            panic!("expected an advance, got {out:?}");
        };
        // Bounded by elapsed-since-last-tick times the new speed.
        assert!((delta - 0.3).abs() < 1e-9);
        assert!((s.value() - before - 0.3).abs() < 1e-9);
    }

    #[test]
    fn ceiling_clamps_and_stops() {
        let mut s = canonical();
        s.play();
        s.set_speed(3.0);
        let mut outcome = TickOutcome::Idle;
        for _ in 0..20 {
            outcome = s.advance(ms(250));
            if outcome == TickOutcome::ReachedCeiling {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::ReachedCeiling);
        assert_eq!(s.value(), 10.0);
        assert_eq!(s.status(), PlaybackStatus::Stopped);
        assert_eq!(s.advance(ms(250)), TickOutcome::Idle);

        // Playing again from the ceiling rewinds.
        s.play();
        assert_eq!(s.value(), 0.0);
        assert!(s.is_playing());
    }

    #[test]
    fn motion_lab_ceiling_is_fifteen() {
        let mut s = Scheduler::new(PlaybackBounds::from_config(
            &SimulationConfig::red_sea_intercept(),
        ));
        s.play();
        assert_eq!(s.advance(Duration::from_secs(20)), TickOutcome::ReachedCeiling);
        assert_eq!(s.value(), 15.0);
    }

    #[test]
    fn seek_and_speed_are_clamped_not_rejected() {
        let mut s = canonical();
        s.seek(-3.0);
        assert_eq!(s.value(), 0.0);
        s.seek(99.0);
        assert_eq!(s.value(), 10.0);
        s.seek(f64::NAN);
        assert_eq!(s.value(), 10.0);
        s.seek(2.5);
        assert_eq!(s.value(), 2.5);
        assert_eq!(s.status(), PlaybackStatus::Stopped);

        s.set_speed(10.0);
        assert_eq!(s.speed(), 3.0);
        s.set_speed(0.0);
        assert_eq!(s.speed(), 0.5);
        s.set_speed(f64::NAN);
        assert_eq!(s.speed(), 0.5);
    }

    #[test]
    fn seek_while_playing_keeps_playing() {
        let mut s = canonical();
        s.play();
        s.seek(6.0);
        assert!(s.is_playing());
        s.advance(ms(500));
        assert!((s.value() - 6.5).abs() < 1e-12);
    }

    #[test]
    fn huge_synthetic_durations_stop_at_the_ceiling() {
        let mut s = canonical();
        s.play();
        assert_eq!(s.advance(Duration::MAX), TickOutcome::ReachedCeiling);
        assert_eq!(s.value(), 10.0);
        assert_eq!(s.status(), PlaybackStatus::Stopped);

        s.play();
        s.advance(ms(100));
        assert_eq!(s.advance(Duration::MAX), TickOutcome::ReachedCeiling);
    }

    #[test]
    fn inverted_bounds_clamp_without_panicking() {
        let mut bounds = PlaybackBounds::from_config(&SimulationConfig::robot_rendezvous());
        bounds.range = ParamRange::new(10.0, 0.0);
        bounds.speed.min = 3.0;
        bounds.speed.max = 0.5;
        let mut s = Scheduler::new(bounds);
        s.seek(5.0);
        assert_eq!(s.value(), 0.0);
        s.set_speed(2.0);
        assert_eq!(s.speed(), 0.5);
    }

    #[test]
    fn play_while_playing_is_a_no_op() {
        let mut s = canonical();
        let t0 = Instant::now();
        s.play_at(t0);
        s.play_at(t0 + ms(400));
        s.tick_at(t0 + ms(500));
        // Reference point was not moved by the second play.
        assert!((s.value() - 0.5).abs() < 1e-9);
    }
}
