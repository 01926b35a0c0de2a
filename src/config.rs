/// Window and rendering configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Image file under `res/` mapped onto the quad.
    pub texture_file: String,
    /// WGSL file under `res/`; must define `vs_main` and `fs_main`.
    pub shader_file: String,
    pub clear_color: wgpu::Color,
    /// Falls back to FIFO when the surface doesn't support it.
    pub present_mode: wgpu::PresentMode,
    pub backends: wgpu::Backends,
    pub prefer_srgb: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "textured quad".to_string(),
            width: 640,
            height: 480,
            texture_file: "happy-tree.png".to_string(),
            shader_file: "shader.wgsl".to_string(),
            clear_color: wgpu::Color {
                r: 0.25,
                g: 0.25,
                b: 0.25,
                a: 1.0,
            },
            present_mode: wgpu::PresentMode::Fifo,
            backends: wgpu::Backends::PRIMARY,
            prefer_srgb: true,
        }
    }
}
