//! Texture resource trait

use crate::error::Result;
use crate::texture::desc::{Dimensions, TextureCubeFace, TextureType, TextureUsage};
use crate::texture::format::{TextureFormat, TextureFormatProperties};
use crate::texture::population::PopulationState;
use crate::texture::range::TextureRangeDesc;

const LOG_SOURCE: &str = "texlayer::texture";

/// Opaque shader-addressable texture handle (never 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidentHandle(pub u64);

/// Texture resource trait
///
/// Implemented by backend-specific texture types (e.g., GlTexture, UnifiedTexture).
/// The native storage is released when the texture is dropped, after its
/// resident handle (if one was ever acquired) has been made non-resident.
///
/// Textures are owned by one context and are not shareable across threads.
pub trait Texture {
    /// Extents of mip level 0
    fn dimensions(&self) -> Dimensions;

    fn num_layers(&self) -> u32;

    fn texture_type(&self) -> TextureType;

    fn usage(&self) -> TextureUsage;

    fn samples(&self) -> u32;

    fn num_mip_levels(&self) -> u32;

    fn format(&self) -> TextureFormat;

    /// Current population state of the backing storage
    fn state(&self) -> PopulationState;

    /// Write pixel data into one mip level of the texture
    ///
    /// On a cube texture every face is written, face after face, whatever
    /// the range's face fields say.
    ///
    /// # Arguments
    ///
    /// * `range` - Region to write; must address exactly one mip level
    /// * `data` - Pixel data, or `None` to leave the region untouched
    /// * `bytes_per_row` - Row stride of `data` in bytes (0 = tightly packed)
    ///
    /// # Errors
    ///
    /// * `Unimplemented` if `range.num_mip_levels > 1`
    /// * `ArgumentInvalid` if the range is out of bounds or `data` is too short
    /// * `Unsupported` if the device lacks the feature this dimensionality needs
    fn upload(&self, range: &TextureRangeDesc, data: Option<&[u8]>, bytes_per_row: usize) -> Result<()>;

    /// Write pixel data into one face of a cube texture
    ///
    /// Fails with `InvalidOperation` (without touching native state) when
    /// the texture is not a cube.
    fn upload_cube(
        &self,
        range: &TextureRangeDesc,
        face: TextureCubeFace,
        data: Option<&[u8]>,
        bytes_per_row: usize,
    ) -> Result<()>;

    /// Shader-addressable handle, acquired and made resident on first call
    fn resident_handle(&self) -> Result<ResidentHandle>;

    // ===== PROVIDED =====

    fn properties(&self) -> TextureFormatProperties {
        self.format().properties()
    }

    fn num_faces(&self) -> u32 {
        if self.texture_type() == TextureType::Cube {
            6
        } else {
            1
        }
    }

    fn aspect_ratio(&self) -> f32 {
        let dims = self.dimensions();
        dims.width as f32 / dims.height as f32
    }

    /// Every layer and face of `num_mip_levels` levels starting at `mip_level`
    fn full_range(&self, mip_level: u32, num_mip_levels: u32) -> TextureRangeDesc {
        let level = self.dimensions().at_mip_level(mip_level);
        TextureRangeDesc::new_3d(0, 0, 0, level.width, level.height, level.depth)
            .with_mip_level(mip_level)
            .with_num_mip_levels(num_mip_levels)
            .with_num_layers(self.num_layers())
            .with_num_faces(self.num_faces())
    }

    fn cube_face_range(&self, face: TextureCubeFace, mip_level: u32, num_mip_levels: u32) -> TextureRangeDesc {
        debug_assert_eq!(self.texture_type(), TextureType::Cube);
        self.full_range(mip_level, num_mip_levels).at_face(face.index())
    }

    fn layer_range(&self, layer: u32, mip_level: u32, num_mip_levels: u32) -> TextureRangeDesc {
        debug_assert!(self.texture_type().is_array());
        self.full_range(mip_level, num_mip_levels).at_layer(layer)
    }

    /// Tightly packed size of every level, layer and face
    fn estimated_size_in_bytes(&self) -> usize {
        let range = self.full_range(0, self.num_mip_levels());
        self.properties().bytes_per_range(&range) * self.samples() as usize
    }

    /// Check that `range` addresses texels inside this texture
    fn validate_range(&self, range: &TextureRangeDesc) -> Result<()> {
        if range.width == 0
            || range.height == 0
            || range.depth == 0
            || range.num_layers == 0
            || range.num_mip_levels == 0
            || range.num_faces == 0
        {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "width, height, depth, num_layers, num_mip_levels and num_faces must be at least 1"
            );
        }

        let tex_mips = self.num_mip_levels();
        if range.num_mip_levels > tex_mips || range.mip_level > tex_mips - range.num_mip_levels {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Mip levels {}..{} exceed the texture's {} levels",
                range.mip_level, range.mip_level as u64 + range.num_mip_levels as u64, tex_mips
            );
        }

        let level = self.dimensions().at_mip_level(range.mip_level);
        let tex_layers = self.num_layers();
        let tex_faces = self.num_faces();
        let fits = |origin: u32, extent: u32, limit: u32| extent <= limit && origin <= limit - extent;

        if !fits(range.x, range.width, level.width)
            || !fits(range.y, range.height, level.height)
            || !fits(range.z, range.depth, level.depth)
            || !fits(range.layer, range.num_layers, tex_layers)
            || !fits(range.face, range.num_faces, tex_faces)
        {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Range {:?} exceeds texture dimensions {}x{}x{} (layers {}, faces {}) at mip level {}",
                range, level.width, level.height, level.depth, tex_layers, tex_faces, range.mip_level
            );
        }

        let props = self.properties();
        if props.is_compressed()
            && (range.x % props.block_width as u32 != 0
                || range.y % props.block_height as u32 != 0
                || range.z % props.block_depth as u32 != 0)
        {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Range origin ({}, {}, {}) is not aligned to the {}x{}x{} blocks of {}",
                range.x, range.y, range.z,
                props.block_width, props.block_height, props.block_depth, props.name
            );
        }

        Ok(())
    }
}

/// Bytes an upload of `range` reads from its payload
///
/// With a stride of 0 the rows are tightly packed. Otherwise every row but
/// the last occupies `bytes_per_row` bytes.
pub fn upload_size(props: &TextureFormatProperties, range: &TextureRangeDesc, bytes_per_row: usize) -> usize {
    if bytes_per_row == 0 {
        return props.bytes_per_range(range);
    }
    let rows = props.rows(range);
    let tight_row = props.bytes_per_row(range.width);
    bytes_per_row * rows.saturating_sub(1) + tight_row
}

/// Reject payloads shorter than [`upload_size`]
pub fn check_upload_size(
    props: &TextureFormatProperties,
    range: &TextureRangeDesc,
    data: &[u8],
    bytes_per_row: usize,
) -> Result<()> {
    if bytes_per_row != 0 && bytes_per_row < props.bytes_per_row(range.width) {
        crate::texlayer_bail_warn!(
            LOG_SOURCE,
            ArgumentInvalid,
            "Row stride {} is smaller than a {} row of {} texels ({} bytes)",
            bytes_per_row, props.name, range.width, props.bytes_per_row(range.width)
        );
    }

    let required = upload_size(props, range, bytes_per_row);
    if data.len() < required {
        crate::texlayer_bail_warn!(
            LOG_SOURCE,
            ArgumentInvalid,
            "Upload of {}x{}x{} {} needs {} bytes, got {}",
            range.width, range.height, range.depth, props.name, required, data.len()
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
