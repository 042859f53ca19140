//! The two timers the slideshow's event loop runs on: a re-armable
//! one-shot render request, and a fixed-period interval.

use crate::frame_clock::RenderScheduler;
use std::time::{Duration, Instant};

/// A single pending "render at this instant" request.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderRequest {
    deadline: Option<Instant>,
}

impl RenderRequest {
    /// Creates a request with nothing pending.
    pub fn new() -> RenderRequest {
        RenderRequest::default()
    }

    /// Sets the pending deadline, replacing the previous one.
    pub fn arm_at(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    /// Returns true and clears the request if its deadline is at or
    /// before `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl RenderScheduler for RenderRequest {
    fn schedule_render(&mut self, delay: Duration) {
        self.arm_at(Instant::now() + delay);
    }

    fn cancel_render(&mut self) {
        self.deadline = None;
    }
}

/// Fires every `period`, like a repeating timer.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    /// Starts an interval whose first firing is one `period` after
    /// `start`.
    ///
    /// # Panics
    ///
    /// If `period` is zero.
    pub fn starting_at(start: Instant, period: Duration) -> Interval {
        assert!(period > Duration::from_millis(0), "interval period must be non-zero");
        Interval {
            period,
            next: start + period,
        }
    }

    /// Returns how many periods have elapsed since the last firing,
    /// and moves the next deadline past `now`.
    ///
    /// A loop that stalls for several periods gets one combined
    /// count here, and should treat it as a single firing.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next {
            return 0;
        }
        let missed = (now - self.next).as_nanos() / self.period.as_nanos();
        let fired = (missed + 1).min(u128::from(u32::max_value())) as u32;
        // Keep the original phase instead of drifting with the loop.
        self.next += self.period * fired;
        fired
    }

    /// Like `poll`, but reports a stall of any length as one firing.
    pub fn fire(&mut self, now: Instant) -> bool {
        self.poll(now) > 0
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn render_request_fires_once() {
        let start = Instant::now();
        let mut request = RenderRequest::new();
        assert!(!request.is_pending());
        request.arm_at(start + ms(10));
        assert!(!request.take_due(start + ms(5)));
        assert!(request.take_due(start + ms(10)));
        assert!(!request.take_due(start + ms(20)));
        assert!(!request.is_pending());
    }

    #[test]
    fn rearming_replaces_the_deadline() {
        let start = Instant::now();
        let mut request = RenderRequest::new();
        request.arm_at(start + ms(100));
        request.arm_at(start + ms(10));
        assert_eq!(request.deadline(), Some(start + ms(10)));
        assert!(request.take_due(start + ms(10)));
        assert!(!request.is_pending());

        request.arm_at(start + ms(10));
        request.arm_at(start + ms(100));
        assert!(!request.take_due(start + ms(50)));
    }

    #[test]
    fn scheduler_impl_arms_and_cancels() {
        let mut request = RenderRequest::new();
        let before = Instant::now();
        request.schedule_render(ms(33));
        let deadline = request.deadline().unwrap();
        assert!(deadline >= before + ms(33));
        request.cancel_render();
        assert!(!request.is_pending());
        assert!(!request.take_due(deadline + ms(1000)));
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut request = RenderRequest::new();
        request.schedule_render(ms(0));
        assert!(request.take_due(Instant::now()));
    }

    #[test]
    fn interval_fires_each_period() {
        let start = Instant::now();
        let mut interval = Interval::starting_at(start, ms(1000));
        assert_eq!(interval.poll(start + ms(999)), 0);
        assert_eq!(interval.poll(start + ms(1000)), 1);
        assert_eq!(interval.poll(start + ms(1500)), 0);
        assert_eq!(interval.poll(start + ms(2001)), 1);
        assert_eq!(interval.next_deadline(), start + ms(3000));
    }

    #[test]
    fn interval_coalesces_stalls() {
        let start = Instant::now();
        let mut interval = Interval::starting_at(start, ms(1000));
        assert_eq!(interval.poll(start + ms(3500)), 3);
        assert_eq!(interval.next_deadline(), start + ms(4000));
        assert_eq!(interval.poll(start + ms(3900)), 0);
    }

    #[test]
    fn fire_reports_a_stall_once() {
        let start = Instant::now();
        let mut interval = Interval::starting_at(start, ms(1000));
        assert!(!interval.fire(start + ms(999)));
        assert!(interval.fire(start + ms(3500)));
        assert!(!interval.fire(start + ms(3500)));
        assert!(interval.fire(start + ms(4000)));
    }

    #[test]
    #[should_panic]
    fn zero_period_panics() {
        Interval::starting_at(Instant::now(), ms(0));
    }
}
