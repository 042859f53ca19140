use crate::error::GlutinError;
use crate::gl;
use crate::settings::Settings;
use glutin::dpi::*;
use glutin::*;

/// The smallest size the window can be resized to, in logical pixels.
pub const MIN_SIZE: (f64, f64) = (50.0, 50.0);

/// The window and its OpenGL context.
pub struct Window {
    context: WindowedContext<PossiblyCurrent>,
    events_loop: EventsLoop,
    legacy: bool,
    physical_size: (u32, u32),
    dpi_factor: f64,
    resized: bool,
}

impl Window {
    /// Creates a new `Window` and makes its context current.
    ///
    /// A GL 3.3 core context (or GLES 3.0) is tried first, then GL
    /// 2.1 (or GLES 2.0). The second one is used straight away if
    /// `settings.opengl_legacy` is set.
    pub fn create(settings: &Settings) -> Result<Window, GlutinError> {
        let events_loop = EventsLoop::new();
        let legacy;
        let context = {
            let create_context = |gl_request, gl_profile| {
                let window = WindowBuilder::new()
                    .with_title(settings.title.clone())
                    .with_dimensions(LogicalSize::new(
                        f64::from(settings.width),
                        f64::from(settings.height),
                    ))
                    .with_min_dimensions(LogicalSize::new(MIN_SIZE.0, MIN_SIZE.1));
                ContextBuilder::new()
                    .with_vsync(settings.vsync)
                    .with_gl(gl_request)
                    .with_gl_profile(gl_profile)
                    .build_windowed(window, &events_loop)
            };
            let create_legacy = || {
                create_context(
                    GlRequest::GlThenGles {
                        opengl_version: (2, 1),
                        opengles_version: (2, 0),
                    },
                    GlProfile::Compatibility,
                )
            };

            if settings.opengl_legacy {
                legacy = true;
                create_legacy()?
            } else {
                match create_context(
                    GlRequest::GlThenGles {
                        opengl_version: (3, 3),
                        opengles_version: (3, 0),
                    },
                    GlProfile::Core,
                ) {
                    Ok(context) => {
                        legacy = false;
                        context
                    }
                    Err(err) => {
                        log::info!("No OpenGL 3.3 context ({}), falling back to 2.1", err);
                        legacy = true;
                        create_legacy()?
                    }
                }
            }
        };

        let context = unsafe { context.make_current()? };
        gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);

        let dpi_factor = context.window().get_hidpi_factor();
        let physical_size = context
            .window()
            .get_inner_size()
            .map(|size| size.to_physical(dpi_factor).into())
            .unwrap_or((settings.width, settings.height));

        Ok(Window {
            context,
            events_loop,
            legacy,
            physical_size,
            dpi_factor,
            resized: true,
        })
    }

    /// Handles pending events without waiting for more. Returns
    /// false once the user has asked the window to close.
    pub fn refresh(&mut self) -> bool {
        let mut running = true;
        let mut resized_logical_size = None;
        let mut dpi_changed = None;

        self.events_loop.poll_events(|event| {
            if let Event::WindowEvent { event, .. } = event {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => running = false,
                    WindowEvent::Resized(logical_size) => resized_logical_size = Some(logical_size),
                    WindowEvent::HiDpiFactorChanged(factor) => dpi_changed = Some(factor),
                    _ => {}
                }
            }
        });

        if let Some(dpi_factor) = dpi_changed {
            self.dpi_factor = dpi_factor;
            if resized_logical_size.is_none() {
                resized_logical_size = self.context.window().get_inner_size();
            }
        }

        /* Resize event handling */
        if let Some(logical_size) = resized_logical_size {
            let physical_size = logical_size.to_physical(self.dpi_factor);
            self.context.resize(physical_size);
            let (width, height): (u32, u32) = physical_size.into();
            log::debug!("{}x{}", width, height);
            self.physical_size = (width, height);
            self.resized = true;
        }

        running
    }

    /// Returns true once after each resize, and after creation.
    pub fn take_resized(&mut self) -> bool {
        let resized = self.resized;
        self.resized = false;
        resized
    }

    /// Shows the frame that was just drawn.
    pub fn swap_buffers(&self) {
        if let Err(err) = self.context.swap_buffers() {
            log::warn!("Could not swap buffers: {}", err);
        }
    }

    /// The drawable area in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        self.physical_size
    }

    /// Whether the context is the GL 2.1 / GLES 2.0 fallback.
    pub fn is_legacy(&self) -> bool {
        self.legacy
    }
}
