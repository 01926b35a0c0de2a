use crate::graphics::gpu::{GpuContext, texture::GpuTexture};

/// Abstraction of the bind group + its layout.
#[derive(Clone, Debug)]
pub struct GpuBindGroup {
    group: wgpu::BindGroup,
    layout: wgpu::BindGroupLayout,
}

impl GpuBindGroup {
    /// Create the bind group with mostly default configs.
    pub fn create_default(
        label: &str,
        gpu: &GpuContext,
        layout_entries: &[wgpu::BindGroupLayoutEntry],
        entries: &[wgpu::BindGroupEntry],
    ) -> Self {
        let device = gpu.device();

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: layout_entries,
            label: Some(&format!("{label}_layout")),
        });
        let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries,
            label: Some(label),
        });

        Self { group, layout }
    }

    /// Bind a texture and its sampler at bindings 0 and 1.
    pub fn for_texture(label: &str, gpu: &GpuContext, texture: &GpuTexture) -> Self {
        Self::create_default(
            label,
            gpu,
            &GpuTexture::BIND_GROUP_LAYOUT_ENTRIES,
            &texture.bind_group_entries(),
        )
    }

    /// Get the actual bind group.
    pub fn handle(&self) -> &wgpu::BindGroup {
        &self.group
    }

    /// Get the group's layout.
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_group_is_created_with_its_layout() {
        let gpu = GpuContext::noop();
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([255, 0, 0, 255]),
        ));
        let texture = GpuTexture::from_image(&gpu, &img, Some("red")).unwrap();
        let group = GpuBindGroup::for_texture("red_bind_group", &gpu, &texture);
        let copy = group.clone();
        assert_eq!(copy.handle(), group.handle());
        assert_eq!(copy.layout(), group.layout());
    }
}
