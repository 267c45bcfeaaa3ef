//! Device capability state
//!
//! Built once when a device is created, then shared read-only by every
//! texture of that device. Nothing in the layer queries capabilities through
//! global state.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use crate::texture::TextureFormat;

bitflags! {
    /// Optional device features relevant to texture allocation and upload
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceFeatures: u32 {
        const TEXTURE_1D = 1 << 0;
        const TEXTURE_ARRAY = 1 << 1;
        const TEXTURE_3D = 1 << 2;
        /// Whole-chain allocation with fixed format and extents
        const IMMUTABLE_STORAGE = 1 << 3;
        const MULTISAMPLE = 1 << 4;
        /// Shader-addressable texture handles without a bind step
        const BINDLESS_TEXTURE = 1 << 5;
        /// Sized internal formats accepted by image specification calls
        const SIZED_INTERNAL_FORMATS = 1 << 6;
        const TEXTURE_SWIZZLE = 1 << 7;
    }
}

bitflags! {
    /// Workarounds the device requires from the layer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceRequirements: u32 {
        /// No native alpha-only format: alpha formats are stored in red and swizzled
        const SWIZZLE_ALPHA_TEXTURES = 1 << 0;
    }
}

bitflags! {
    /// What the device can do with one pixel format
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureFormatCapabilities: u32 {
        const SAMPLED = 1 << 0;
        const SAMPLED_FILTER = 1 << 1;
        /// Usable with immutable storage / storage images
        const STORAGE = 1 << 2;
        const ATTACHMENT = 1 << 3;
        /// Compressed data accepted on the legacy image path
        const COMPRESSED_UPLOAD_IMAGE = 1 << 4;
        /// Compressed data accepted on the immutable storage path
        const COMPRESSED_UPLOAD_STORAGE = 1 << 5;
    }
}

/// Immutable capability set of one device
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    features: DeviceFeatures,
    requirements: DeviceRequirements,
    formats: FxHashMap<TextureFormat, TextureFormatCapabilities>,
}

impl Capabilities {
    pub fn builder() -> CapabilitiesBuilder {
        CapabilitiesBuilder::default()
    }

    pub fn features(&self) -> DeviceFeatures {
        self.features
    }

    pub fn has_feature(&self, feature: DeviceFeatures) -> bool {
        self.features.contains(feature)
    }

    pub fn requirements(&self) -> DeviceRequirements {
        self.requirements
    }

    pub fn has_requirement(&self, requirement: DeviceRequirements) -> bool {
        self.requirements.contains(requirement)
    }

    /// Capability bits of `format` (empty for formats the device never reported)
    pub fn format_capabilities(&self, format: TextureFormat) -> TextureFormatCapabilities {
        self.formats.get(&format).copied().unwrap_or(TextureFormatCapabilities::empty())
    }
}

/// Builder for [`Capabilities`]
#[derive(Debug, Default)]
pub struct CapabilitiesBuilder {
    caps: Capabilities,
}

impl CapabilitiesBuilder {
    pub fn features(mut self, features: DeviceFeatures) -> Self {
        self.caps.features |= features;
        self
    }

    pub fn requirements(mut self, requirements: DeviceRequirements) -> Self {
        self.caps.requirements |= requirements;
        self
    }

    /// Add capability bits for one format
    pub fn format(mut self, format: TextureFormat, caps: TextureFormatCapabilities) -> Self {
        *self.caps.formats.entry(format).or_insert(TextureFormatCapabilities::empty()) |= caps;
        self
    }

    /// Add the same capability bits for several formats
    pub fn formats(mut self, formats: &[TextureFormat], caps: TextureFormatCapabilities) -> Self {
        for &format in formats {
            self = self.format(format, caps);
        }
        self
    }

    pub fn build(self) -> Capabilities {
        self.caps
    }
}
