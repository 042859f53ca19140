//! The slideshow: owns the window, the GL objects and the frame
//! clock, and runs the event loop.

use crate::error::Error;
use crate::frame_clock::{FpsSample, FrameClock, RenderScheduler};
use crate::gallery::{self, Gallery};
use crate::gl_version;
use crate::overlay;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::timer::{Interval, RenderRequest};
use crate::window::Window;
use std::cmp;
use std::thread;
use std::time::{Duration, Instant};

/// How often the FPS numbers are updated.
pub const FPS_PERIOD: Duration = Duration::from_secs(1);
/// The longest the loop sleeps before checking for events again.
const MAX_IDLE_SLEEP: Duration = Duration::from_millis(10);

pub struct Slideshow {
    // Declared before `window` so the GL objects are deleted while
    // the context still exists.
    renderer: Renderer,
    window: Window,
    gallery: Gallery,
    clock: FrameClock,
    render_request: RenderRequest,
    fps_timer: Interval,
    overlay_dirty: bool,
}

impl Slideshow {
    /// Opens the window, loads the images and uploads them.
    pub fn new(settings: &Settings) -> Result<Slideshow, Error> {
        let image_dir = match &settings.image_dir {
            Some(dir) => dir.clone(),
            None => gallery::default_image_dir()?,
        };
        let gallery = Gallery::load(&image_dir)?;

        let window = Window::create(settings)?;
        let version = gl_version::get_version();
        log::info!(
            "OpenGL context: {:?}{}",
            version,
            if window.is_legacy() { " (legacy)" } else { "" }
        );
        let mut renderer = Renderer::new(version.api(), window.is_legacy())?;
        renderer.set_clear_color(settings.clear_color);
        renderer.upload_slides(gallery.slides().iter().map(|slide| &slide.image));

        let mut clock = FrameClock::new();
        if let Some(limit) = settings.fps_limit {
            clock.set_frame_rate_limit(limit);
            log::info!(
                "Frame rate limited to {} FPS ({} ms per frame)",
                limit,
                clock.min_frame_delay_ms()
            );
        }

        let now = Instant::now();
        let mut render_request = RenderRequest::new();
        render_request.arm_at(now);

        Ok(Slideshow {
            renderer,
            window,
            gallery,
            clock,
            render_request,
            fps_timer: Interval::starting_at(now, FPS_PERIOD),
            overlay_dirty: true,
        })
    }

    /// Called after every rendered frame.
    pub fn on_frame_rendered(&mut self) {
        self.clock.record_frame(&mut self.render_request);
    }

    /// Called once per elapsed second.
    pub fn on_second_elapsed(&mut self) -> FpsSample {
        self.overlay_dirty = true;
        self.clock.tick()
    }

    /// Runs until the window is closed.
    pub fn run(&mut self) -> Result<(), Error> {
        log::info!("Showing {} image(s)", self.gallery.len());
        while self.window.refresh() {
            if self.window.take_resized() {
                let (width, height) = self.window.physical_size();
                self.renderer.set_viewport(width, height);
                self.render_request.schedule_render(Duration::from_millis(0));
            }

            let now = Instant::now();
            if self.fps_timer.fire(now) {
                self.on_second_elapsed();
            }

            if self.render_request.take_due(now) {
                self.render_frame();
                self.on_frame_rendered();
            } else {
                self.sleep_until_next_deadline(now);
            }
        }
        self.render_request.cancel_render();
        log::info!(
            "Closing after {} second(s), average {} FPS",
            self.clock.samples(),
            self.clock.average_fps()
        );
        Ok(())
    }

    fn render_frame(&mut self) {
        if self.overlay_dirty {
            let image = overlay::render_fps_overlay(self.clock.last_sample());
            self.renderer.update_overlay(&image);
            self.overlay_dirty = false;
        }
        let slide = self.gallery.advance().map(|(index, _)| index);
        self.renderer.draw(slide);
        self.window.swap_buffers();
    }

    fn sleep_until_next_deadline(&self, now: Instant) {
        let mut deadline = self.fps_timer.next_deadline();
        if let Some(render_deadline) = self.render_request.deadline() {
            deadline = cmp::min(deadline, render_deadline);
        }
        if deadline > now {
            thread::sleep(cmp::min(deadline - now, MAX_IDLE_SLEEP));
        }
    }
}

impl Drop for Slideshow {
    fn drop(&mut self) {
        self.render_request.cancel_render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    // The same steps `run` takes for the FPS timer, without a window.
    fn poll_fps(timer: &mut Interval, clock: &mut FrameClock, now: Instant) -> Option<FpsSample> {
        if timer.fire(now) {
            Some(clock.tick())
        } else {
            None
        }
    }

    #[test]
    fn stalled_loop_ticks_the_clock_once() {
        let start = Instant::now();
        let mut timer = Interval::starting_at(start, FPS_PERIOD);
        let mut clock = FrameClock::new();
        let mut request = RenderRequest::new();

        for _ in 0..5 {
            clock.record_frame(&mut request);
        }
        assert!(poll_fps(&mut timer, &mut clock, start + ms(999)).is_none());
        assert_eq!(clock.samples(), 0);

        let sample = poll_fps(&mut timer, &mut clock, start + ms(3500)).unwrap();
        assert_eq!(sample.instantaneous, 5);
        assert_eq!(clock.samples(), 1);
        assert!(poll_fps(&mut timer, &mut clock, start + ms(3999)).is_none());
        assert_eq!(clock.samples(), 1);

        assert_eq!(poll_fps(&mut timer, &mut clock, start + ms(4000)).unwrap().instantaneous, 0);
        assert_eq!(clock.samples(), 2);
    }

    #[test]
    fn capped_frames_keep_one_pending_render() {
        let mut clock = FrameClock::new();
        clock.set_frame_rate_limit(30);
        let mut request = RenderRequest::new();

        clock.record_frame(&mut request);
        let first = request.deadline().unwrap();
        thread::sleep(ms(2));
        clock.record_frame(&mut request);
        let second = request.deadline().unwrap();
        assert!(second > first);
        assert!(!request.take_due(second - ms(1)));
        assert!(request.take_due(second));
        assert!(!request.is_pending());
    }

    #[test]
    fn average_follows_each_second() {
        let mut clock = FrameClock::new();
        let mut request = RenderRequest::new();
        let mut averages = Vec::new();
        for &frames in &[10, 20, 30] {
            for _ in 0..frames {
                clock.record_frame(&mut request);
            }
            averages.push(clock.tick().average);
        }
        assert_eq!(averages, vec![10, 15, 20]);
    }
}
