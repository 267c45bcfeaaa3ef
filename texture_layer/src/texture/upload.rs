//! Whole-chain initialization pass

use crate::error::Result;
use crate::texture::texture::Texture;

const LOG_SOURCE: &str = "texlayer::texture";

/// Upload a tightly packed mip chain, one mip level per upload call
///
/// `data` holds level 0 first; inside a level, layers follow each other and
/// inside a layer, cube faces follow each other. Nothing is written when
/// `data` is shorter than the whole chain.
pub fn upload_mip_chain(texture: &dyn Texture, data: &[u8]) -> Result<()> {
    let props = texture.properties();
    let num_mip_levels = texture.num_mip_levels();
    let required = props.bytes_per_range(&texture.full_range(0, num_mip_levels));
    if data.len() < required {
        crate::texlayer_bail_warn!(
            LOG_SOURCE,
            ArgumentInvalid,
            "Mip chain of {} levels needs {} bytes, got {}",
            num_mip_levels, required, data.len()
        );
    }

    let mut offset = 0;
    for level in 0..num_mip_levels {
        let range = texture.full_range(level, 1);
        let size = props.bytes_per_range(&range);
        texture.upload(&range, Some(&data[offset..offset + size]), 0)?;
        offset += size;
    }

    crate::texlayer_trace!(LOG_SOURCE, "Uploaded {} mip levels ({} bytes)", num_mip_levels, offset);
    Ok(())
}
