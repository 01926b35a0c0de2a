//! Opens a window and draws a single textured quad with wgpu.

pub mod app;
pub mod config;
pub mod frame_stats;
pub mod graphics;
pub mod logging;
pub mod resources;
pub mod state;

use anyhow::Context;
use winit::event_loop::EventLoop;

use crate::{
    app::App,
    config::AppConfig,
    logging::{LoggingConfig, init_logging},
};

/// Run the demo until the window is closed.
pub fn run() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(AppConfig::default());
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with an error")?;

    app.into_result()
}
