/*!
# Texture Layer - GL Backend

GL-family implementation of the texture layer traits.

Textures are allocated either with immutable storage (whole mip chain at
creation) or with per-level image specification, and populated one mip level
per upload through image or sub-image calls. Attachment-only 2D surfaces are
backed by renderbuffers.

The native API is reached through the [`GlContext`] trait. A loader for a
live context implements it outside this crate; [`SoftGlContext`] implements
it in host memory for headless use and tests.

## Example

```
use std::rc::Rc;
use texture_layer::texlayer::{Capabilities, Config, Device, DeviceFeatures};
use texture_layer::texlayer::texture::{Texture, TextureDesc, TextureFormat, TextureUsage};
use texture_layer_backend_gl::{GlContext, GlDevice, SoftGlContext};

let ctx: Rc<dyn GlContext> = Rc::new(SoftGlContext::new());
let caps = Capabilities::builder()
    .features(DeviceFeatures::SIZED_INTERNAL_FORMATS)
    .build();
let device = GlDevice::new(ctx, caps, Config::default());

let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 64, 64, TextureUsage::SAMPLED);
let texture = device.create_texture(&desc, false)?;
texture.upload(&texture.full_range(0, 1), Some(&vec![0u8; 64 * 64 * 4]), 0)?;
# Ok::<(), texture_layer::texlayer::Error>(())
```
*/

pub mod gl_enums;
mod gl_context;
mod gl_format;
mod soft_context;
mod gl_texture;
mod gl_render_target;
mod gl_device;

pub use gl_context::GlContext;
pub use gl_format::{needs_alpha_swizzle, resolve as resolve_format, FormatDescGl};
pub use soft_context::{GlCall, ImageInfo, RenderbufferInfo, SoftGlContext};
pub use gl_texture::{target_for, unpack_alignment, AllocationStrategy, GlTexture};
pub use gl_render_target::GlRenderTarget;
pub use gl_device::GlDevice;
