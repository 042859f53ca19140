//! Frame counting, FPS averaging and frame-rate capping.
//!
//! A [`FrameClock`](struct.FrameClock.html) is driven from two
//! independent call sites: the draw path calls
//! [`record_frame`](struct.FrameClock.html#method.record_frame) after
//! every rendered frame, and a 1 Hz timer calls
//! [`tick`](struct.FrameClock.html#method.tick). Neither call blocks,
//! and both are expected to happen on the same thread.

use std::time::Duration;

/// Something that can be asked to render again after a delay.
///
/// There is at most one pending request at a time: scheduling again
/// replaces the previous request instead of adding another one.
pub trait RenderScheduler {
    /// Requests a render `delay` from now, replacing any pending
    /// request.
    fn schedule_render(&mut self, delay: Duration);
    /// Drops the pending request, if any.
    fn cancel_render(&mut self);
}

/// The numbers reported once per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FpsSample {
    /// Frames rendered during the last completed second.
    pub instantaneous: u32,
    /// The mean of every `instantaneous` value so far, truncated at
    /// each step.
    pub average: u32,
}

/// Tracks rendered frames per second and the delay between frames.
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    frames_this_second: u32,
    last_instantaneous_fps: u32,
    samples_so_far: u32,
    running_average_fps: u32,
    min_frame_delay_ms: u32,
}

impl FrameClock {
    /// Creates a clock with no frame-rate cap.
    pub fn new() -> FrameClock {
        FrameClock::default()
    }

    /// Creates a clock capped at `limit_fps`. See
    /// [`set_frame_rate_limit`](#method.set_frame_rate_limit).
    pub fn with_frame_rate_limit(limit_fps: u32) -> FrameClock {
        let mut clock = FrameClock::new();
        clock.set_frame_rate_limit(limit_fps);
        clock
    }

    /// Counts one rendered frame, and asks `scheduler` for the next
    /// render [`min_frame_delay`](#method.min_frame_delay) from now.
    ///
    /// When there is no cap the delay is zero, which means "render
    /// again as soon as the event loop gets around to it".
    pub fn record_frame<S: RenderScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.frames_this_second = self.frames_this_second.saturating_add(1);
        scheduler.schedule_render(self.min_frame_delay());
    }

    /// Closes the current one-second window and returns its numbers.
    ///
    /// The running average uses truncating integer division at every
    /// step, so it can drift below the exact mean. A skipped or late
    /// tick just makes the window longer in wall-clock time; it still
    /// counts as one sample.
    pub fn tick(&mut self) -> FpsSample {
        self.last_instantaneous_fps = self.frames_this_second;
        self.frames_this_second = 0;

        let samples = u64::from(self.samples_so_far);
        let sum = u64::from(self.last_instantaneous_fps)
            + samples * u64::from(self.running_average_fps);
        // The result is between two u32 values, so it fits in a u32.
        self.running_average_fps = (sum / (samples + 1)) as u32;
        self.samples_so_far = self.samples_so_far.saturating_add(1);

        let sample = self.last_sample();
        log::debug!("FPS: {}, AVG: {}", sample.instantaneous, sample.average);
        sample
    }

    /// Sets the frame-rate cap. The delay between frames becomes
    /// `1000 / limit_fps` milliseconds, rounded down.
    ///
    /// Limits above 1000 round down to a zero delay, which is the
    /// same as no cap at all. A limit of zero also means no cap.
    /// Does not request a render by itself.
    pub fn set_frame_rate_limit(&mut self, limit_fps: u32) {
        self.min_frame_delay_ms = if limit_fps == 0 { 0 } else { 1000 / limit_fps };
    }

    /// Frames recorded since the last tick.
    pub fn frames_this_second(&self) -> u32 {
        self.frames_this_second
    }

    /// Frames recorded during the window closed by the last tick.
    pub fn instantaneous_fps(&self) -> u32 {
        self.last_instantaneous_fps
    }

    /// The running average over every tick so far.
    pub fn average_fps(&self) -> u32 {
        self.running_average_fps
    }

    /// How many ticks have happened.
    pub fn samples(&self) -> u32 {
        self.samples_so_far
    }

    /// The minimum delay between frames in milliseconds. Zero when
    /// there's no cap.
    pub fn min_frame_delay_ms(&self) -> u32 {
        self.min_frame_delay_ms
    }

    /// [`min_frame_delay_ms`](#method.min_frame_delay_ms) as a `Duration`.
    pub fn min_frame_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.min_frame_delay_ms))
    }

    /// The numbers the last tick reported.
    pub fn last_sample(&self) -> FpsSample {
        FpsSample {
            instantaneous: self.last_instantaneous_fps,
            average: self.running_average_fps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: Vec<Duration>,
        cancelled: usize,
    }

    impl RenderScheduler for RecordingScheduler {
        fn schedule_render(&mut self, delay: Duration) {
            self.scheduled.push(delay);
        }

        fn cancel_render(&mut self) {
            self.cancelled += 1;
        }
    }

    fn record(clock: &mut FrameClock, frames: u32) {
        let mut scheduler = RecordingScheduler::default();
        for _ in 0..frames {
            clock.record_frame(&mut scheduler);
        }
    }

    #[test]
    fn instantaneous_fps_counts_frames_between_ticks() {
        let mut clock = FrameClock::new();
        record(&mut clock, 7);
        clock.tick();
        record(&mut clock, 42);
        let sample = clock.tick();
        assert_eq!(sample.instantaneous, 42);
        assert_eq!(clock.instantaneous_fps(), 42);
    }

    #[test]
    fn tick_resets_frame_counter() {
        let mut clock = FrameClock::new();
        record(&mut clock, 123);
        assert_eq!(clock.frames_this_second(), 123);
        clock.tick();
        assert_eq!(clock.frames_this_second(), 0);
        clock.tick();
        assert_eq!(clock.frames_this_second(), 0);
    }

    #[test]
    fn first_tick_without_frames() {
        let mut clock = FrameClock::new();
        let sample = clock.tick();
        assert_eq!(sample, FpsSample { instantaneous: 0, average: 0 });
        assert_eq!(clock.samples(), 1);
    }

    #[test]
    fn running_average_of_ten_twenty_thirty() {
        let mut clock = FrameClock::new();
        let mut averages = Vec::new();
        for &frames in &[10, 20, 30] {
            record(&mut clock, frames);
            averages.push(clock.tick().average);
        }
        assert_eq!(averages, vec![10, 15, 20]);
        assert_eq!(clock.samples(), 3);
    }

    #[test]
    fn running_average_truncates_each_step() {
        let mut clock = FrameClock::new();
        let frames = [3, 4, 4, 1, 59, 60, 61];
        let mut expected = 0u64;
        for (k, &f) in frames.iter().enumerate() {
            record(&mut clock, f);
            let k = k as u64;
            expected = (u64::from(f) + k * expected) / (k + 1);
            assert_eq!(u64::from(clock.tick().average), expected);
        }
        // 3, then (4 + 3) / 2 = 3, which is below the exact mean of 3.5.
        let mut clock = FrameClock::new();
        record(&mut clock, 3);
        clock.tick();
        record(&mut clock, 4);
        assert_eq!(clock.tick().average, 3);
    }

    #[test]
    fn empty_ticks_approach_zero() {
        let mut clock = FrameClock::new();
        record(&mut clock, 60);
        clock.tick();
        let mut previous = clock.average_fps();
        for _ in 0..200 {
            let average = clock.tick().average;
            assert!(average <= previous);
            previous = average;
        }
        assert_eq!(previous, 0);
        assert_eq!(clock.tick().average, 0);
    }

    #[test]
    fn large_counts_do_not_overflow() {
        let mut clock = FrameClock::new();
        for _ in 0..3 {
            clock.frames_this_second = u32::max_value();
            assert_eq!(clock.tick().average, u32::max_value());
        }
    }

    #[test]
    fn frame_rate_limit_delays() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.min_frame_delay_ms(), 0);
        clock.set_frame_rate_limit(30);
        assert_eq!(clock.min_frame_delay_ms(), 33);
        clock.set_frame_rate_limit(60);
        assert_eq!(clock.min_frame_delay(), Duration::from_millis(16));
        clock.set_frame_rate_limit(1000);
        assert_eq!(clock.min_frame_delay_ms(), 1);
        clock.set_frame_rate_limit(2000);
        assert_eq!(clock.min_frame_delay_ms(), 0);
        clock.set_frame_rate_limit(0);
        assert_eq!(clock.min_frame_delay_ms(), 0);
    }

    #[test]
    fn record_frame_rearms_with_configured_delay() {
        let mut clock = FrameClock::with_frame_rate_limit(30);
        let mut scheduler = RecordingScheduler::default();
        clock.record_frame(&mut scheduler);
        clock.record_frame(&mut scheduler);
        assert_eq!(scheduler.scheduled, vec![Duration::from_millis(33); 2]);
        assert_eq!(scheduler.cancelled, 0);

        let mut unlimited = FrameClock::new();
        unlimited.record_frame(&mut scheduler);
        assert_eq!(scheduler.scheduled.last(), Some(&Duration::from_millis(0)));
    }

    #[test]
    fn setting_the_limit_does_not_schedule() {
        let mut clock = FrameClock::new();
        clock.set_frame_rate_limit(10);
        assert_eq!(clock.frames_this_second(), 0);
        assert_eq!(clock.samples(), 0);
    }
}
