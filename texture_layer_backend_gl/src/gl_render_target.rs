//! GlRenderTarget - renderbuffer-backed attachment-only surface

use std::rc::Rc;
use texture_layer::texlayer::{Capabilities, Config, DeviceFeatures, Result};
use texture_layer::texlayer::texture::{
    Dimensions, PopulationState, ResidentHandle, Texture, TextureCubeFace, TextureDesc, TextureFormat,
    TextureRangeDesc, TextureType, TextureUsage,
};
use texture_layer::{texlayer_bail, texlayer_bail_warn, texlayer_debug};
use crate::gl_context::GlContext;
use crate::gl_enums::*;
use crate::gl_format;
use crate::gl_texture::check_native_error;

const BACKEND: &str = "texlayer::gl";

/// GL render target
///
/// Holds a renderbuffer instead of a texture. Renderbuffers can only be
/// attached to framebuffers, so uploads and residency are unsupported and
/// the state stays `Allocated`.
pub struct GlRenderTarget {
    ctx: Rc<dyn GlContext>,
    log_source: String,
    desc: TextureDesc,
    renderbuffer: GLuint,
    internal_format: GLenum,
}

impl GlRenderTarget {
    /// Whether `desc` describes a surface only ever rendered into
    pub fn accepts(desc: &TextureDesc) -> bool {
        desc.texture_type == TextureType::TwoD
            && desc.num_mip_levels == 1
            && desc.usage.contains(TextureUsage::ATTACHMENT)
            && !desc.usage.intersects(TextureUsage::SAMPLED | TextureUsage::STORAGE)
    }

    /// Create and allocate the renderbuffer
    ///
    /// # Errors
    ///
    /// - `ArgumentInvalid` if `desc` is not attachment-only 2D
    /// - `Unsupported` if the format has no sized equivalent or samples > 1 without MULTISAMPLE
    pub fn create(ctx: Rc<dyn GlContext>, caps: &Capabilities, config: &Config, desc: &TextureDesc) -> Result<Self> {
        let log_source = config.log_source(BACKEND);
        desc.validate()?;

        if !Self::accepts(desc) {
            texlayer_bail_warn!(
                &log_source,
                ArgumentInvalid,
                "Render target '{}' must be a single-level 2D attachment, got {:?} with {:?}",
                desc.debug_name, desc.texture_type, desc.usage
            );
        }
        if desc.num_samples > 1 && !caps.has_feature(DeviceFeatures::MULTISAMPLE) {
            texlayer_bail!(
                &log_source,
                Unsupported,
                "Render target '{}': {} samples need multisample support",
                desc.debug_name, desc.num_samples
            );
        }
        let internal_format = match gl_format::resolve(caps, desc.format, TextureUsage::ATTACHMENT) {
            Some(format_desc) if !format_desc.is_compressed() => format_desc.internal_format(),
            _ => texlayer_bail!(
                &log_source,
                Unsupported,
                "Render target '{}': {:?} is not renderable",
                desc.debug_name, desc.format
            ),
        };

        let renderbuffer = ctx.gen_renderbuffer();
        let target = Self {
            ctx,
            log_source,
            desc: desc.clone(),
            renderbuffer,
            internal_format,
        };

        let (width, height) = (desc.width as GLsizei, desc.height as GLsizei);
        target.ctx.bind_renderbuffer(RENDERBUFFER, renderbuffer);
        if desc.num_samples > 1 {
            target.ctx.renderbuffer_storage_multisample(
                RENDERBUFFER,
                desc.num_samples as GLsizei,
                internal_format,
                width,
                height,
            );
        } else {
            target.ctx.renderbuffer_storage(RENDERBUFFER, internal_format, width, height);
        }
        target.ctx.bind_renderbuffer(RENDERBUFFER, 0);

        if config.check_native_errors {
            let operation = format!("Renderbuffer allocation of '{}'", desc.debug_name);
            check_native_error(&*target.ctx, &target.log_source, &operation)?;
        }

        texlayer_debug!(
            &target.log_source,
            "Created render target '{}' {}x{} ({:?}, {} samples)",
            desc.debug_name, desc.width, desc.height, desc.format, desc.num_samples
        );
        Ok(target)
    }

    pub fn renderbuffer(&self) -> GLuint {
        self.renderbuffer
    }

    pub fn internal_format(&self) -> GLenum {
        self.internal_format
    }
}

impl Texture for GlRenderTarget {
    fn dimensions(&self) -> Dimensions {
        self.desc.dimensions()
    }

    fn num_layers(&self) -> u32 {
        1
    }

    fn texture_type(&self) -> TextureType {
        TextureType::TwoD
    }

    fn usage(&self) -> TextureUsage {
        self.desc.usage
    }

    fn samples(&self) -> u32 {
        self.desc.num_samples
    }

    fn num_mip_levels(&self) -> u32 {
        1
    }

    fn format(&self) -> TextureFormat {
        self.desc.format
    }

    fn state(&self) -> PopulationState {
        PopulationState::Allocated
    }

    fn upload(&self, _range: &TextureRangeDesc, _data: Option<&[u8]>, _bytes_per_row: usize) -> Result<()> {
        texlayer_bail_warn!(
            &self.log_source,
            Unsupported,
            "Render target '{}' is a renderbuffer and cannot be uploaded to",
            self.desc.debug_name
        );
    }

    fn upload_cube(
        &self,
        _range: &TextureRangeDesc,
        _face: TextureCubeFace,
        _data: Option<&[u8]>,
        _bytes_per_row: usize,
    ) -> Result<()> {
        texlayer_bail_warn!(
            &self.log_source,
            InvalidOperation,
            "Render target '{}' is not a cube texture",
            self.desc.debug_name
        );
    }

    fn resident_handle(&self) -> Result<ResidentHandle> {
        texlayer_bail_warn!(
            &self.log_source,
            Unsupported,
            "Render target '{}' has no bindless handle",
            self.desc.debug_name
        );
    }
}

impl Drop for GlRenderTarget {
    fn drop(&mut self) {
        if self.renderbuffer != 0 {
            self.ctx.delete_renderbuffer(self.renderbuffer);
        }
    }
}
