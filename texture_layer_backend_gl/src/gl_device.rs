//! GlDevice - texture factory over one GL context

use std::rc::Rc;
use texture_layer::texlayer::{BackendType, Capabilities, Config, Device, Result};
use texture_layer::texlayer::texture::{Texture, TextureDesc};
use texture_layer::texlayer_info;
use crate::gl_context::GlContext;
use crate::gl_render_target::GlRenderTarget;
use crate::gl_texture::GlTexture;

const BACKEND: &str = "texlayer::gl";

/// GL device
///
/// Owns the shared handle to the native context and the capability set
/// probed when the context was made current. Every texture it creates keeps
/// both alive.
pub struct GlDevice {
    ctx: Rc<dyn GlContext>,
    caps: Rc<Capabilities>,
    config: Config,
}

impl GlDevice {
    /// Create a device
    ///
    /// # Arguments
    ///
    /// * `ctx` - Native context, current on the calling thread
    /// * `caps` - Capabilities reported by `ctx`
    /// * `config` - Runtime configuration
    pub fn new(ctx: Rc<dyn GlContext>, caps: Capabilities, config: Config) -> Self {
        texlayer_info!(
            &config.log_source(BACKEND),
            "GL device ready, features {:?}, requirements {:?}",
            caps.features(), caps.requirements()
        );
        Self {
            ctx,
            caps: Rc::new(caps),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a texture with its concrete type
    ///
    /// With `has_external_storage` the texture only wraps a name whose
    /// storage an external producer attaches.
    pub fn create_gl_texture(&self, desc: &TextureDesc, has_external_storage: bool) -> Result<GlTexture> {
        GlTexture::create(self.ctx.clone(), self.caps.clone(), &self.config, desc, has_external_storage)
    }

    /// Create a renderbuffer-backed attachment
    pub fn create_render_target(&self, desc: &TextureDesc) -> Result<GlRenderTarget> {
        GlRenderTarget::create(self.ctx.clone(), &self.caps, &self.config, desc)
    }
}

impl Device for GlDevice {
    fn backend_type(&self) -> BackendType {
        BackendType::OpenGl
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    fn create_texture(&self, desc: &TextureDesc, has_external_storage: bool) -> Result<Box<dyn Texture>> {
        if !has_external_storage && GlRenderTarget::accepts(desc) {
            return Ok(Box::new(self.create_render_target(desc)?));
        }
        Ok(Box::new(self.create_gl_texture(desc, has_external_storage)?))
    }
}
