/*!
# Texture Layer - Unified Memory Backend

Implementation of the texture layer traits for devices whose texture memory
is directly addressable by the host.

Every texture owns one allocation holding its whole mip chain, sized at
creation from the native row pitch of each level. Uploads copy rows from the
caller's buffer (any stride at least as wide as a tight row) and
[`UnifiedTexture::read_bytes`] copies them back out. Alpha-only formats are
native, so no channel swizzle is ever applied.

## Example

```
use texture_layer::texlayer::Config;
use texture_layer::texlayer::texture::{Texture, TextureDesc, TextureFormat, TextureRangeDesc, TextureUsage};
use texture_layer_backend_unified::UnifiedDevice;

let device = UnifiedDevice::with_default_capabilities(false, Config::default());
let desc = TextureDesc::new_2d(TextureFormat::A_UNorm8, 4, 4, TextureUsage::SAMPLED);
let texture = device.create_unified_texture(&desc, false)?;

texture.upload(&texture.full_range(0, 1), Some(&[0x80u8; 16]), 0)?;

let mut texel = [0u8; 1];
texture.read_bytes(&TextureRangeDesc::new_2d(3, 3, 1, 1), &mut texel, 0)?;
assert_eq!(texel, [0x80]);
# Ok::<(), texture_layer::texlayer::Error>(())
```
*/

mod unified_format;
mod unified_texture;
mod unified_device;

pub use unified_format::{probe_capabilities, supported_formats, to_native, NativePixelFormat};
pub use unified_texture::UnifiedTexture;
pub use unified_device::UnifiedDevice;
