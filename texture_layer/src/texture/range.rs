//! Sub-region of a texture addressed by one upload

use crate::texture::desc::{shift_clamped, TextureCubeFace};

/// A box of texels in one or more mip levels, layers and cube faces
///
/// Uploads accept exactly one mip level per call; the `num_mip_levels`
/// field exists so that ranges can describe whole mip chains for size
/// computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureRangeDesc {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub layer: u32,
    pub num_layers: u32,
    pub mip_level: u32,
    pub num_mip_levels: u32,
    pub face: u32,
    pub num_faces: u32,
}

impl Default for TextureRangeDesc {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            width: 1,
            height: 1,
            depth: 1,
            layer: 0,
            num_layers: 1,
            mip_level: 0,
            num_mip_levels: 1,
            face: 0,
            num_faces: 1,
        }
    }
}

impl TextureRangeDesc {
    pub fn new_1d(x: u32, width: u32) -> Self {
        Self::new_3d(x, 0, 0, width, 1, 1)
    }

    pub fn new_1d_array(x: u32, width: u32, layer: u32, num_layers: u32) -> Self {
        Self::new_2d_array(x, 0, width, 1, layer, num_layers)
    }

    pub fn new_2d(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::new_3d(x, y, 0, width, height, 1)
    }

    pub fn new_2d_array(x: u32, y: u32, width: u32, height: u32, layer: u32, num_layers: u32) -> Self {
        Self {
            layer,
            num_layers,
            ..Self::new_2d(x, y, width, height)
        }
    }

    pub fn new_3d(x: u32, y: u32, z: u32, width: u32, height: u32, depth: u32) -> Self {
        Self {
            x,
            y,
            z,
            width,
            height,
            depth,
            ..Self::default()
        }
    }

    /// All six faces of a cube
    pub fn new_cube(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            num_faces: 6,
            ..Self::new_2d(x, y, width, height)
        }
    }

    pub fn new_cube_face(x: u32, y: u32, width: u32, height: u32, face: TextureCubeFace) -> Self {
        Self {
            face: face.index(),
            num_faces: 1,
            ..Self::new_2d(x, y, width, height)
        }
    }

    /// Same range, addressed at `mip_level` without rescaling
    pub fn with_mip_level(self, mip_level: u32) -> Self {
        Self { mip_level, ..self }
    }

    /// The same region scaled down to `new_mip_level`
    ///
    /// Origin and extent are shifted by the level delta (extents clamped to
    /// 1) and the result always covers a single mip level. Moving to a
    /// coarser-or-equal index than the current one only relabels the level.
    pub fn at_mip_level(self, new_mip_level: u32) -> Self {
        let mut range = Self {
            mip_level: new_mip_level,
            num_mip_levels: 1,
            ..self
        };
        if new_mip_level <= self.mip_level {
            return range;
        }

        let delta = new_mip_level - self.mip_level;
        range.x = self.x.checked_shr(delta).unwrap_or(0);
        range.y = self.y.checked_shr(delta).unwrap_or(0);
        range.z = self.z.checked_shr(delta).unwrap_or(0);
        range.width = shift_clamped(self.width, delta);
        range.height = shift_clamped(self.height, delta);
        range.depth = shift_clamped(self.depth, delta);
        range
    }

    pub fn with_num_mip_levels(self, num_mip_levels: u32) -> Self {
        Self { num_mip_levels, ..self }
    }

    /// A single layer of this range
    pub fn at_layer(self, layer: u32) -> Self {
        Self {
            layer,
            num_layers: 1,
            ..self
        }
    }

    pub fn with_num_layers(self, num_layers: u32) -> Self {
        Self { num_layers, ..self }
    }

    /// A single cube face of this range
    pub fn at_face(self, face: u32) -> Self {
        Self {
            face,
            num_faces: 1,
            ..self
        }
    }

    pub fn with_num_faces(self, num_faces: u32) -> Self {
        Self { num_faces, ..self }
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
