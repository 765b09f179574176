use crate::processor::{Processor, StepResult};
use std::time::{Duration, Instant};

/// The fixed rate at which `delay_timer`/`sound_timer` are pulsed, per the
/// original COSMAC VIP video interrupt.
const TIMER_HERTZ: u64 = 60;

/// Drives a [Processor] at a steady wall-clock pace. The processor itself
/// never reads the clock; all real-time bookkeeping — instruction cadence,
/// the 60 Hz timer pulse, pausing, speed scaling — lives here instead, so the
/// core stays deterministic and host-agnostic.
pub struct Scheduler {
    processor_speed_hertz: u64,
    speed_multiplier: f64,
    paused: bool,
    last_tick: Instant,
    cycle_accumulator: Duration,
    timer_accumulator: Duration,
}

impl Scheduler {
    /// Constructs a scheduler driving a processor at `processor_speed_hertz`
    /// instructions per second, unpaused, at normal speed.
    pub fn new(processor_speed_hertz: u64) -> Self {
        Scheduler {
            processor_speed_hertz,
            speed_multiplier: 1.0,
            paused: false,
            last_tick: Instant::now(),
            cycle_accumulator: Duration::ZERO,
            timer_accumulator: Duration::ZERO,
        }
    }

    pub fn set_processor_speed_hertz(&mut self, hertz: u64) {
        self.processor_speed_hertz = hertz;
    }

    /// Scales wall-clock time before it reaches the accumulators; `0.0` is
    /// equivalent to pausing, negative values are clamped to `0.0`.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        self.speed_multiplier = multiplier.max(0.0);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes the scheduler, discarding the time spent paused so it isn't
    /// replayed as a burst of catch-up cycles.
    pub fn resume(&mut self) {
        self.paused = false;
        self.last_tick = Instant::now();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advances `processor` by whatever wall-clock time has elapsed since the
    /// last call (or construction), fetching as many instructions and timer
    /// pulses as are now due. Ticks are never dropped or duplicated across
    /// calls: leftover fractional time carries forward in the accumulators.
    /// Stops stepping early (discarding the remaining accumulated cycle time)
    /// if the processor halts mid-burst, or if it just drew a frame under the
    /// `display_wait` quirk — in which case no further instructions run until
    /// the next timer tick, emulating a wait for vertical blank without the
    /// core itself needing to know what a frame is.
    pub fn advance(&mut self, processor: &mut Processor) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        if self.paused {
            return;
        }
        let elapsed = elapsed.mul_f64(self.speed_multiplier);
        self.cycle_accumulator += elapsed;
        self.timer_accumulator += elapsed;

        let cycle_period = Duration::from_secs_f64(1.0 / self.processor_speed_hertz as f64);
        while self.cycle_accumulator >= cycle_period {
            self.cycle_accumulator -= cycle_period;
            if matches!(processor.step(), StepResult::Halted) {
                self.cycle_accumulator = Duration::ZERO;
                break;
            }
            if processor.take_display_wait_pending() {
                self.cycle_accumulator = Duration::ZERO;
                break;
            }
        }

        let timer_period = Duration::from_secs_f64(1.0 / TIMER_HERTZ as f64);
        while self.timer_accumulator >= timer_period {
            self.timer_accumulator -= timer_period;
            processor.tick_timers();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Quirks;

    #[test]
    fn test_speed_multiplier_clamps_negative() {
        let mut scheduler = Scheduler::new(500);
        scheduler.set_speed_multiplier(-2.0);
        assert_eq!(scheduler.speed_multiplier, 0.0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut scheduler = Scheduler::new(500);
        assert!(!scheduler.is_paused());
        scheduler.pause();
        assert!(scheduler.is_paused());
        scheduler.resume();
        assert!(!scheduler.is_paused());
    }

    #[test]
    fn test_paused_scheduler_does_not_advance_processor() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0x60, 0x01]).unwrap();
        let mut scheduler = Scheduler::new(500);
        scheduler.pause();
        std::thread::sleep(Duration::from_millis(5));
        scheduler.advance(&mut processor);
        assert_eq!(processor.state_snapshot().cycles, 0);
    }

    #[test]
    fn test_advance_runs_due_cycles() {
        let mut processor = Processor::new(Quirks::cosmac());
        processor.load_rom(vec![0x60, 0x01, 0x60, 0x02]).unwrap();
        let mut scheduler = Scheduler::new(1000);
        std::thread::sleep(Duration::from_millis(20));
        scheduler.advance(&mut processor);
        assert!(processor.state_snapshot().cycles >= 1);
    }

    #[test]
    fn test_display_wait_quirk_stops_stepping_until_next_timer_tick() {
        // A draw followed by a register set; at high speed many cycles would
        // be due in one burst, but `display_wait` should cut the burst short
        // right after the draw.
        let mut processor = Processor::new(Quirks::cosmac());
        processor
            .load_rom(vec![0xD0, 0x01, 0x60, 0x05, 0x60, 0x06])
            .unwrap();
        let mut scheduler = Scheduler::new(10000);
        std::thread::sleep(Duration::from_millis(20));
        scheduler.advance(&mut processor);
        assert_eq!(processor.state_snapshot().cycles, 1);
        assert_eq!(processor.variable_registers[0], 0);
    }
}
