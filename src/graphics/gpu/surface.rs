use anyhow::Context;

/// What to do after the surface failed to hand out a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was reconfigured; rendering resumes next frame.
    Reconfigure,
    /// Transient; skip this frame.
    SkipFrame,
    /// Unrecoverable; stop rendering.
    Fatal,
}

impl From<&wgpu::SurfaceError> for SurfaceErrorAction {
    fn from(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
        }
    }
}

/// Pick the swapchain format: the first sRGB one if preferred, else whatever comes first.
pub fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let srgb = formats.iter().find(|f| f.is_srgb()).copied();
    match srgb {
        Some(format) if prefer_srgb => Some(format),
        _ => formats.first().copied(),
    }
}

/// Use the requested present mode when supported; FIFO is always available.
pub fn choose_present_mode(
    modes: &[wgpu::PresentMode],
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if modes.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Whether a surface of this size can be configured.
pub fn is_presentable(width: u32, height: u32) -> bool {
    width > 0 && height > 0
}

/// Store the requested size in `config`, returning whether it may be applied.
fn record_size(config: &mut wgpu::SurfaceConfiguration, width: u32, height: u32) -> bool {
    config.width = width;
    config.height = height;
    is_presentable(width, height)
}

/// Only reconfigure for errors that call for it, and never at a zero size.
fn should_reconfigure(action: SurfaceErrorAction, config: &wgpu::SurfaceConfiguration) -> bool {
    action == SurfaceErrorAction::Reconfigure && is_presentable(config.width, config.height)
}

/// The window surface and the configuration it is presented with.
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    is_configured: bool,
}

impl GpuSurface {
    /// Choose a configuration for the surface and apply it if the size allows.
    pub fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        width: u32,
        height: u32,
        present_mode: wgpu::PresentMode,
        prefer_srgb: bool,
    ) -> anyhow::Result<Self> {
        let caps = surface.get_capabilities(adapter);
        let format = choose_surface_format(&caps.formats, prefer_srgb)
            .context("surface reports no supported formats")?;
        let present_mode = choose_present_mode(&caps.present_modes, present_mode);
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        log::debug!("surface format {format:?}, present mode {present_mode:?}, alpha {alpha_mode:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let mut surface = Self {
            surface,
            config,
            is_configured: false,
        };
        surface.resize(device, width, height);
        Ok(surface)
    }

    /// Record a new size and reconfigure if it can be presented.
    /// Returns whether the surface was reconfigured.
    ///
    /// A zero-sized request (eg. a minimized window) is still recorded, but the surface stays
    /// unconfigured until a presentable size arrives.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        self.is_configured = record_size(&mut self.config, width, height);
        if !self.is_configured {
            log::debug!("surface hidden at {width}x{height}");
            return false;
        }
        self.surface.configure(device, &self.config);
        log::debug!("surface configured at {width}x{height}");
        true
    }

    /// Recover from a failed acquire where possible.
    pub fn handle_error(
        &mut self,
        device: &wgpu::Device,
        err: &wgpu::SurfaceError,
    ) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::from(err);
        if should_reconfigure(action, &self.config) {
            self.surface.configure(device, &self.config);
        }
        action
    }

    /// Acquire the next texture to draw into.
    pub fn acquire(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn is_configured(&self) -> bool {
        self.is_configured
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_srgb_format_when_asked() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Rgba16Float)
        );
        let no_srgb = [TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&no_srgb, true),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let modes = [wgpu::PresentMode::Fifo, wgpu::PresentMode::Mailbox];
        assert_eq!(
            choose_present_mode(&modes, wgpu::PresentMode::Mailbox),
            wgpu::PresentMode::Mailbox
        );
        assert_eq!(
            choose_present_mode(&modes, wgpu::PresentMode::Immediate),
            wgpu::PresentMode::Fifo
        );
    }

    #[test]
    fn zero_sized_surfaces_are_not_presentable() {
        assert!(is_presentable(640, 480));
        assert!(!is_presentable(0, 480));
        assert!(!is_presentable(640, 0));
    }

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError;
        assert_eq!(SurfaceErrorAction::from(&SurfaceError::Lost), SurfaceErrorAction::Reconfigure);
        assert_eq!(SurfaceErrorAction::from(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigure);
        assert_eq!(SurfaceErrorAction::from(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(SurfaceErrorAction::from(&SurfaceError::Other), SurfaceErrorAction::SkipFrame);
        assert_eq!(SurfaceErrorAction::from(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }

    fn config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: TextureFormat::Bgra8UnormSrgb,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    #[test]
    fn zero_size_is_recorded_but_not_applied() {
        let mut config = config(640, 480);
        assert!(!record_size(&mut config, 0, 0));
        assert_eq!((config.width, config.height), (0, 0));
        assert!(record_size(&mut config, 800, 600));
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn lost_surface_is_not_reconfigured_while_minimized() {
        let mut config = config(640, 480);
        assert!(should_reconfigure(SurfaceErrorAction::Reconfigure, &config));
        record_size(&mut config, 640, 0);
        assert!(!should_reconfigure(SurfaceErrorAction::Reconfigure, &config));
    }

    #[test]
    fn only_reconfigure_actions_touch_the_surface() {
        let config = config(640, 480);
        assert!(!should_reconfigure(SurfaceErrorAction::SkipFrame, &config));
        assert!(!should_reconfigure(SurfaceErrorAction::Fatal, &config));
    }
}
