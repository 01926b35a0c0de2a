use std::path::PathBuf;

use anyhow::Context;

use crate::graphics::gpu::{GpuContext, shader::GpuShader, texture::GpuTexture};

/// Where an asset copied from `res/` by the build script lives.
pub fn resource_path(file_name: &str) -> PathBuf {
    std::path::Path::new(env!("OUT_DIR"))
        .join("res")
        .join(file_name)
}

pub fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = resource_path(file_name);
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = resource_path(file_name);
    std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads and decodes an image.
pub fn load_image(file_name: &str) -> anyhow::Result<image::DynamicImage> {
    let data = load_binary(file_name)?;
    image::load_from_memory(&data).with_context(|| format!("failed to decode {file_name}"))
}

/// Loads a texture from an image.
pub fn load_texture(file_name: &str, gpu: &GpuContext) -> anyhow::Result<GpuTexture> {
    log::info!("loading texture {file_name}");
    let img = load_image(file_name)?;
    Ok(GpuTexture::from_image(gpu, &img, Some(file_name))?)
}

/// Loads WGSL source and compiles it into a shader module.
pub fn load_shader(file_name: &str, gpu: &GpuContext) -> anyhow::Result<GpuShader> {
    let source = load_string(file_name)?;
    Ok(GpuShader::from_wgsl(gpu, file_name, &source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use image::GenericImageView;

    #[test]
    fn shader_provides_both_entry_points() {
        let source = load_string(&AppConfig::default().shader_file).unwrap();
        assert!(source.contains(&format!("fn {}(", GpuShader::VERTEX_ENTRY_POINT)));
        assert!(source.contains(&format!("fn {}(", GpuShader::FRAGMENT_ENTRY_POINT)));
    }

    #[test]
    fn shader_binds_texture_and_sampler_in_group_zero() {
        let source = load_string(&AppConfig::default().shader_file).unwrap();
        assert!(source.contains("@group(0) @binding(0)"));
        assert!(source.contains("@group(0) @binding(1)"));
    }

    #[test]
    fn default_texture_decodes() {
        let img = load_image(&AppConfig::default().texture_file).unwrap();
        let (width, height) = img.dimensions();
        assert!(width > 0 && height > 0);
        assert!(img.color().has_alpha());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = load_binary("does-not-exist.png").unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.png"));
    }

    #[test]
    fn non_image_bytes_fail_to_decode() {
        let err = load_image(&AppConfig::default().shader_file).unwrap_err();
        assert!(err.to_string().contains("failed to decode"));
    }
}
