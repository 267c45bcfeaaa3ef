//! Texture descriptor, dimensionality and usage

use bitflags::bitflags;
use crate::error::Result;
use crate::texture::format::TextureFormat;

const LOG_SOURCE: &str = "texlayer::texture";

/// Dimensionality tag of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureType {
    OneD,
    OneDArray,
    TwoD,
    TwoDArray,
    ThreeD,
    Cube,
    /// Backed by an externally produced image (camera frame, video decoder)
    ExternalImage,
}

impl TextureType {
    /// Returns true for 1D-array and 2D-array textures
    pub fn is_array(&self) -> bool {
        matches!(self, Self::OneDArray | Self::TwoDArray)
    }
}

bitflags! {
    /// How a texture will be used once created
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u8 {
        /// Sampled from shaders
        const SAMPLED = 1 << 0;
        /// Read/written as a storage image
        const STORAGE = 1 << 1;
        /// Rendered into as a color/depth/stencil attachment
        const ATTACHMENT = 1 << 2;
    }
}

impl Default for TextureUsage {
    fn default() -> Self {
        Self::SAMPLED
    }
}

/// Cube map faces, in native face order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureCubeFace {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl TextureCubeFace {
    /// All six faces in native order
    pub const ALL: [TextureCubeFace; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Texel extents of a texture (or of one of its mip levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }

    /// Extents of the given mip level, clamped to 1
    pub fn at_mip_level(&self, mip_level: u32) -> Self {
        Self {
            width: shift_clamped(self.width, mip_level),
            height: shift_clamped(self.height, mip_level),
            depth: shift_clamped(self.depth, mip_level),
        }
    }
}

pub(crate) fn shift_clamped(value: u32, shift: u32) -> u32 {
    value.checked_shr(shift).unwrap_or(0).max(1)
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
///
/// Build it with one of the `new_*` constructors and refine it with the
/// `with_*` methods. The descriptor is copied into the texture at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    pub texture_type: TextureType,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Array layer count (1 for non-array textures)
    pub num_layers: u32,
    pub num_samples: u32,
    pub num_mip_levels: u32,
    pub usage: TextureUsage,
    pub debug_name: String,
}

impl TextureDesc {
    fn new(
        texture_type: TextureType,
        format: TextureFormat,
        width: u32,
        height: u32,
        depth: u32,
        num_layers: u32,
        usage: TextureUsage,
    ) -> Self {
        Self {
            texture_type,
            format,
            width,
            height,
            depth,
            num_layers,
            num_samples: 1,
            num_mip_levels: 1,
            usage,
            debug_name: String::new(),
        }
    }

    pub fn new_1d(format: TextureFormat, width: u32, usage: TextureUsage) -> Self {
        Self::new(TextureType::OneD, format, width, 1, 1, 1, usage)
    }

    pub fn new_1d_array(format: TextureFormat, width: u32, num_layers: u32, usage: TextureUsage) -> Self {
        Self::new(TextureType::OneDArray, format, width, 1, 1, num_layers, usage)
    }

    pub fn new_2d(format: TextureFormat, width: u32, height: u32, usage: TextureUsage) -> Self {
        Self::new(TextureType::TwoD, format, width, height, 1, 1, usage)
    }

    pub fn new_2d_array(
        format: TextureFormat,
        width: u32,
        height: u32,
        num_layers: u32,
        usage: TextureUsage,
    ) -> Self {
        Self::new(TextureType::TwoDArray, format, width, height, 1, num_layers, usage)
    }

    pub fn new_3d(format: TextureFormat, width: u32, height: u32, depth: u32, usage: TextureUsage) -> Self {
        Self::new(TextureType::ThreeD, format, width, height, depth, 1, usage)
    }

    pub fn new_cube(format: TextureFormat, width: u32, height: u32, usage: TextureUsage) -> Self {
        Self::new(TextureType::Cube, format, width, height, 1, 1, usage)
    }

    pub fn new_external_image(format: TextureFormat, width: u32, height: u32, usage: TextureUsage) -> Self {
        Self::new(TextureType::ExternalImage, format, width, height, 1, 1, usage)
    }

    pub fn with_mip_levels(mut self, num_mip_levels: u32) -> Self {
        self.num_mip_levels = num_mip_levels;
        self
    }

    /// Request the full mip chain for the descriptor's width and height
    pub fn with_full_mip_chain(mut self) -> Self {
        self.num_mip_levels = calc_num_mip_levels(self.width, self.height);
        self
    }

    pub fn with_samples(mut self, num_samples: u32) -> Self {
        self.num_samples = num_samples;
        self
    }

    pub fn with_debug_name(mut self, name: impl Into<String>) -> Self {
        self.debug_name = name.into();
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.depth)
    }

    /// Check the descriptor invariants
    ///
    /// - width, height, depth, layer count, mip count and sample count are at least 1
    /// - the mip count does not exceed the full chain of the largest extent
    /// - depth > 1 only for 3D, layers > 1 only for arrays
    /// - samples > 1 only for single-level 2D textures
    /// - cube faces are square
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Texture '{}' has a zero extent ({}x{}x{})",
                self.debug_name, self.width, self.height, self.depth
            );
        }
        if self.num_layers == 0 || self.num_mip_levels == 0 || self.num_samples == 0 {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Texture '{}': layers ({}), mip levels ({}) and samples ({}) must be at least 1",
                self.debug_name, self.num_layers, self.num_mip_levels, self.num_samples
            );
        }

        let largest = self.width.max(self.height).max(self.depth);
        let max_levels = calc_num_mip_levels(largest, largest);
        if self.num_mip_levels > max_levels {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Texture '{}' requests {} mip levels, at most {} fit {}x{}x{}",
                self.debug_name, self.num_mip_levels, max_levels, self.width, self.height, self.depth
            );
        }

        if self.depth > 1 && self.texture_type != TextureType::ThreeD {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Texture '{}': depth {} requires a 3D texture",
                self.debug_name, self.depth
            );
        }
        if self.num_layers > 1 && !self.texture_type.is_array() {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Texture '{}': {} layers requires an array texture",
                self.debug_name, self.num_layers
            );
        }
        if matches!(self.texture_type, TextureType::OneD | TextureType::OneDArray) && self.height != 1 {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Texture '{}': 1D textures must have height 1, got {}",
                self.debug_name, self.height
            );
        }

        if self.num_samples > 1 {
            if self.texture_type != TextureType::TwoD {
                crate::texlayer_bail_warn!(
                    LOG_SOURCE,
                    ArgumentInvalid,
                    "Texture '{}': multisampling is only allowed for 2D textures",
                    self.debug_name
                );
            }
            if self.num_mip_levels > 1 {
                crate::texlayer_bail_warn!(
                    LOG_SOURCE,
                    ArgumentInvalid,
                    "Texture '{}': multisampled textures cannot have mip levels",
                    self.debug_name
                );
            }
        }

        if self.texture_type == TextureType::Cube && self.width != self.height {
            crate::texlayer_bail_warn!(
                LOG_SOURCE,
                ArgumentInvalid,
                "Texture '{}': cube faces must be square, got {}x{}",
                self.debug_name, self.width, self.height
            );
        }

        Ok(())
    }
}

/// Number of levels in a full mip chain for the given extents (0 if either is 0)
pub fn calc_num_mip_levels(width: u32, height: u32) -> u32 {
    if width == 0 || height == 0 {
        return 0;
    }
    32 - (width | height).leading_zeros()
}

#[cfg(test)]
#[path = "desc_tests.rs"]
mod tests;
