//! Exposure state machine
//!
//! The scheduler owns all controller-side exposure state and is driven
//! by one call to [`ExposureScheduler::tick`] per second. Each tick runs
//! the same fixed sequence:
//!
//! 1. take in the presence, hour and overcurrent facts
//! 2. advance the illumination counter if the lamp is on
//! 3. end the cycle once the counter exceeds the duration cap
//! 4. extinguish on presence (every tick, lamp on or not)
//! 5. extinguish on a latched overcurrent (every tick)
//! 6. evaluate the window; leaving it re-arms the next cycle
//! 7. illuminate if nothing above inhibited it
//!
//! Directives are not de-duplicated; the receiver treats them as
//! idempotent.

use uvcguard_protocol::Directive;

use super::window::TimeWindow;
use crate::config::ScheduleConfig;
use crate::traits::DirectiveSink;

/// Externally observable phase, derived after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExposurePhase {
    /// Lamp off: outside the window, or waiting to start
    Idle,
    /// Lamp on
    Illuminating,
    /// Lamp forced off by presence; window and budget still valid
    PresenceHold,
    /// Duration budget spent; waits for the window to close
    CycleComplete,
    /// Overcurrent reported; lamp held off until restart
    Lockout,
}

/// Why a manual illuminate request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExposureRefusal {
    /// A person is present
    PersonPresent,
    /// Overcurrent latched
    Lockout,
}

/// Facts sampled at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExposureFacts {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Presence sensor above threshold
    pub person_present: bool,
    /// Current sensor above threshold
    pub overcurrent: bool,
}

/// Controller-side exposure state
///
/// `lamp_on` and `overcurrent_latched` are never both true. The
/// illumination counter only advances while the lamp is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExposureState {
    lamp_on: bool,
    person_present: bool,
    overcurrent_latched: bool,
    cycle_complete: bool,
    elapsed_s: u32,
}

impl ExposureState {
    /// Lamp is believed to be on
    pub fn lamp_on(&self) -> bool {
        self.lamp_on
    }

    /// Presence fact from the last tick
    pub fn person_present(&self) -> bool {
        self.person_present
    }

    /// Overcurrent has been reported since start-up
    pub fn overcurrent_latched(&self) -> bool {
        self.overcurrent_latched
    }

    /// Duration budget for the current window is spent
    pub fn cycle_complete(&self) -> bool {
        self.cycle_complete
    }

    /// Seconds of illumination counted in the current cycle
    pub fn elapsed_s(&self) -> u32 {
        self.elapsed_s
    }
}

/// Exposure scheduler
#[derive(Debug, Clone)]
pub struct ExposureScheduler {
    window: TimeWindow,
    cap_s: u32,
    state: ExposureState,
    phase: ExposurePhase,
    in_window: bool,
}

impl ExposureScheduler {
    /// Create a scheduler with the lamp off and no cycle in progress
    pub fn new(config: &ScheduleConfig) -> Self {
        Self {
            window: config.window(),
            cap_s: config.cap_seconds(),
            state: ExposureState::default(),
            phase: ExposurePhase::Idle,
            in_window: false,
        }
    }

    /// Run one control tick
    ///
    /// Emits zero or more directives into `sink` and returns the phase
    /// after the tick.
    pub fn tick<S: DirectiveSink>(&mut self, facts: ExposureFacts, sink: &mut S) -> ExposurePhase {
        let state = &mut self.state;
        state.person_present = facts.person_present;

        if state.lamp_on {
            state.elapsed_s = state.elapsed_s.saturating_add(1);
        }

        if state.elapsed_s > self.cap_s {
            Self::extinguish(state, sink);
            state.elapsed_s = 0;
            state.cycle_complete = true;
        }

        if state.person_present {
            Self::extinguish(state, sink);
        }

        if facts.overcurrent {
            state.overcurrent_latched = true;
        }
        if state.overcurrent_latched {
            Self::extinguish(state, sink);
        }

        let in_window = self.window.contains(facts.hour);
        if !in_window {
            if self.in_window {
                // Window just closed: the next one starts a fresh cycle
                if state.lamp_on {
                    Self::extinguish(state, sink);
                }
                state.elapsed_s = 0;
            }
            state.cycle_complete = false;
        }
        self.in_window = in_window;

        if in_window
            && state.elapsed_s < self.cap_s
            && !state.lamp_on
            && !state.cycle_complete
            && !state.person_present
            && !state.overcurrent_latched
        {
            sink.send(Directive::Illuminate);
            state.lamp_on = true;
        }

        self.phase = self.derive_phase();
        self.phase
    }

    /// Manually request illumination
    ///
    /// Refused while a person is present or an overcurrent is latched.
    /// Does not consult the window or the budget; the next tick still
    /// applies the duration cap.
    pub fn force_illuminate<S: DirectiveSink>(&mut self, sink: &mut S) -> Result<(), ExposureRefusal> {
        if self.state.overcurrent_latched {
            return Err(ExposureRefusal::Lockout);
        }
        if self.state.person_present {
            return Err(ExposureRefusal::PersonPresent);
        }
        sink.send(Directive::Illuminate);
        self.state.lamp_on = true;
        self.phase = self.derive_phase();
        Ok(())
    }

    /// Manually extinguish the lamp
    pub fn force_extinguish<S: DirectiveSink>(&mut self, sink: &mut S) {
        Self::extinguish(&mut self.state, sink);
        self.phase = self.derive_phase();
    }

    /// Check if the window contained the hour seen on the last tick
    pub fn in_window(&self) -> bool {
        self.in_window
    }

    /// Check a 24-hour clock hour against the window
    pub fn window_contains(&self, hour: u8) -> bool {
        self.window.contains(hour)
    }

    /// Current state
    pub fn state(&self) -> &ExposureState {
        &self.state
    }

    /// Phase after the last tick or manual command
    pub fn phase(&self) -> ExposurePhase {
        self.phase
    }

    /// Seconds of budget left in the current cycle
    pub fn remaining_s(&self) -> u32 {
        self.cap_s.saturating_sub(self.state.elapsed_s)
    }

    fn extinguish<S: DirectiveSink>(state: &mut ExposureState, sink: &mut S) {
        sink.send(Directive::Extinguish);
        state.lamp_on = false;
    }

    fn derive_phase(&self) -> ExposurePhase {
        let state = &self.state;
        if state.overcurrent_latched {
            ExposurePhase::Lockout
        } else if state.lamp_on {
            ExposurePhase::Illuminating
        } else if state.cycle_complete {
            ExposurePhase::CycleComplete
        } else if state.person_present && self.in_window {
            ExposurePhase::PresenceHold
        } else {
            ExposurePhase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Records every directive sent during a tick
    #[derive(Default)]
    struct Recorder {
        sent: Vec<Directive, 8>,
    }

    impl Recorder {
        fn take(&mut self) -> Vec<Directive, 8> {
            core::mem::take(&mut self.sent)
        }
    }

    impl DirectiveSink for Recorder {
        fn send(&mut self, directive: Directive) {
            self.sent.push(directive).unwrap();
        }
    }

    const IN: u8 = 12;
    const OUT: u8 = 23;

    fn scheduler(duration_minutes: u16) -> ExposureScheduler {
        ExposureScheduler::new(&ScheduleConfig {
            start_hour: 6,
            end_hour: 18,
            duration_minutes,
        })
    }

    fn at(hour: u8) -> ExposureFacts {
        ExposureFacts {
            hour,
            ..Default::default()
        }
    }

    fn present(hour: u8) -> ExposureFacts {
        ExposureFacts {
            hour,
            person_present: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_idle() {
        let s = scheduler(90);
        assert_eq!(s.phase(), ExposurePhase::Idle);
        assert_eq!(*s.state(), ExposureState::default());
    }

    #[test]
    fn test_illuminates_inside_window() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        assert_eq!(s.tick(at(IN), &mut rec), ExposurePhase::Illuminating);
        assert_eq!(rec.take().as_slice(), &[Directive::Illuminate]);
        assert!(s.state().lamp_on());

        // Lamp already on: nothing to send
        s.tick(at(IN), &mut rec);
        assert!(rec.take().is_empty());
        assert_eq!(s.state().elapsed_s(), 1);
    }

    #[test]
    fn test_stays_dark_outside_window() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        for _ in 0..10 {
            assert_eq!(s.tick(at(OUT), &mut rec), ExposurePhase::Idle);
        }
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_duration_cap() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        s.tick(at(IN), &mut rec);
        assert_eq!(rec.take().as_slice(), &[Directive::Illuminate]);

        // 90 minutes of illumination is still within budget
        for _ in 0..90 * 60 {
            s.tick(at(IN), &mut rec);
        }
        assert!(rec.take().is_empty());
        assert_eq!(s.state().elapsed_s(), 90 * 60);

        // The next second exceeds it
        assert_eq!(s.tick(at(IN), &mut rec), ExposurePhase::CycleComplete);
        assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
        assert!(s.state().cycle_complete());
        assert_eq!(s.state().elapsed_s(), 0);

        // No re-arm while the window stays open
        for _ in 0..600 {
            s.tick(at(IN), &mut rec);
        }
        assert!(rec.take().is_empty());
        assert_eq!(s.phase(), ExposurePhase::CycleComplete);

        // Window closes, then reopens
        assert_eq!(s.tick(at(OUT), &mut rec), ExposurePhase::Idle);
        assert!(!s.state().cycle_complete());
        assert!(rec.take().is_empty());

        assert_eq!(s.tick(at(IN), &mut rec), ExposurePhase::Illuminating);
        assert_eq!(rec.take().as_slice(), &[Directive::Illuminate]);
    }

    #[test]
    fn test_presence_preempts_and_resumes() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        s.tick(at(IN), &mut rec);
        for _ in 0..30 {
            s.tick(at(IN), &mut rec);
        }
        rec.take();
        assert_eq!(s.state().elapsed_s(), 30);

        // Presence: extinguish, counter advanced for the lit second only
        assert_eq!(s.tick(present(IN), &mut rec), ExposurePhase::PresenceHold);
        assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
        assert_eq!(s.state().elapsed_s(), 31);

        // Still present: extinguish every tick, counter frozen
        for _ in 0..5 {
            s.tick(present(IN), &mut rec);
            assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
        }
        assert_eq!(s.state().elapsed_s(), 31);

        // Presence clears: resume where it left off
        assert_eq!(s.tick(at(IN), &mut rec), ExposurePhase::Illuminating);
        assert_eq!(rec.take().as_slice(), &[Directive::Illuminate]);
        s.tick(at(IN), &mut rec);
        assert_eq!(s.state().elapsed_s(), 32);
    }

    #[test]
    fn test_presence_outside_window_is_idle() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        assert_eq!(s.tick(present(OUT), &mut rec), ExposurePhase::Idle);
        // Extinguish is still sent so the peer sees the inhibit
        assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
    }

    #[test]
    fn test_presence_wins_over_activation() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        s.tick(present(IN), &mut rec);
        assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
        assert!(!s.state().lamp_on());
    }

    #[test]
    fn test_window_close_extinguishes_and_resets() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        for _ in 0..11 {
            s.tick(at(IN), &mut rec);
        }
        rec.take();
        assert_eq!(s.state().elapsed_s(), 10);

        assert_eq!(s.tick(at(OUT), &mut rec), ExposurePhase::Idle);
        assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
        assert_eq!(s.state().elapsed_s(), 0);
        assert_eq!(s.remaining_s(), 90 * 60);
    }

    #[test]
    fn test_overcurrent_locks_out() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        s.tick(at(IN), &mut rec);
        rec.take();

        let fault = ExposureFacts {
            hour: IN,
            overcurrent: true,
            ..Default::default()
        };
        assert_eq!(s.tick(fault, &mut rec), ExposurePhase::Lockout);
        assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
        assert!(!s.state().lamp_on());
        assert!(s.state().overcurrent_latched());

        // Fact clears, latch does not
        for _ in 0..10 {
            assert_eq!(s.tick(at(IN), &mut rec), ExposurePhase::Lockout);
            assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
        }
        assert_eq!(
            s.force_illuminate(&mut rec),
            Err(ExposureRefusal::Lockout)
        );
        assert!(rec.take().is_empty());
    }

    #[test]
    fn test_force_illuminate_refused_with_presence() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        s.tick(present(OUT), &mut rec);
        rec.take();
        assert_eq!(
            s.force_illuminate(&mut rec),
            Err(ExposureRefusal::PersonPresent)
        );
        assert!(rec.take().is_empty());
        assert!(!s.state().lamp_on());
    }

    #[test]
    fn test_force_commands() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        s.tick(at(OUT), &mut rec);
        s.force_illuminate(&mut rec).unwrap();
        assert_eq!(s.phase(), ExposurePhase::Illuminating);

        s.force_extinguish(&mut rec);
        assert_eq!(
            rec.take().as_slice(),
            &[Directive::Illuminate, Directive::Extinguish]
        );
        assert_eq!(s.phase(), ExposurePhase::Idle);
    }

    #[test]
    fn test_extinguish_is_idempotent() {
        let mut s = scheduler(90);
        let mut rec = Recorder::default();

        s.tick(at(OUT), &mut rec);
        let before = *s.state();
        s.force_extinguish(&mut rec);
        assert_eq!(*s.state(), before);
        assert_eq!(rec.take().as_slice(), &[Directive::Extinguish]);
    }

    #[test]
    fn test_overnight_schedule() {
        let mut s = ExposureScheduler::new(&ScheduleConfig {
            start_hour: 22,
            end_hour: 2,
            duration_minutes: 90,
        });
        let mut rec = Recorder::default();

        s.tick(at(21), &mut rec);
        assert!(rec.take().is_empty());
        s.tick(at(1), &mut rec);
        assert_eq!(rec.take().as_slice(), &[Directive::Illuminate]);
        assert!(s.in_window());
        assert!(s.window_contains(23));
        assert!(!s.window_contains(3));
    }
}
