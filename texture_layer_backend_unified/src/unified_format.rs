//! Native pixel formats of the unified-memory backend

use texture_layer::texlayer::texture::TextureFormat;
use texture_layer::texlayer::{Capabilities, CapabilitiesBuilder, DeviceFeatures, TextureFormatCapabilities};

/// Native pixel format
///
/// The backend stores alpha-only textures natively, so no channel swizzle is
/// ever needed. Luminance formats and 3-component float formats have no
/// native equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum NativePixelFormat {
    A8Unorm,
    R8Unorm,
    R16Float,
    R16Uint,
    R16Unorm,
    BGR5A1Unorm,
    B5G6R5Unorm,
    ABGR4Unorm,
    A1BGR5Unorm,
    RG8Unorm,
    RGBA8Unorm,
    BGRA8Unorm,
    RGBA8Unorm_sRGB,
    BGRA8Unorm_sRGB,
    RG16Float,
    RG16Uint,
    RG16Unorm,
    RGB10A2Unorm,
    RGB10A2Uint,
    BGR10A2Unorm,
    R32Float,
    RGBA16Float,
    RGBA32Uint,
    RGBA32Float,

    ASTC_4x4_LDR,
    ASTC_4x4_sRGB,
    ASTC_5x5_LDR,
    ASTC_6x6_LDR,
    ASTC_8x8_LDR,
    ASTC_8x8_sRGB,
    ASTC_10x10_LDR,
    ASTC_12x12_LDR,
    PVRTC_RGBA_2BPP,
    PVRTC_RGB_2BPP,
    PVRTC_RGBA_4BPP,
    PVRTC_RGB_4BPP,
    ETC2_RGB8,
    ETC2_RGB8_sRGB,
    ETC2_RGB8A1,
    EAC_RGBA8,
    EAC_RGBA8_sRGB,
    EAC_RG11Unorm,
    EAC_R11Unorm,
    BC7_RGBAUnorm,
    BC7_RGBAUnorm_sRGB,

    Depth16Unorm,
    Depth24Unorm_Stencil8,
    Depth32Float_Stencil8,
    Stencil8,
}

/// Native format of a portable format (`None` when the backend has none)
pub fn to_native(format: TextureFormat) -> Option<NativePixelFormat> {
    use NativePixelFormat as N;
    use TextureFormat as F;

    let native = match format {
        F::A_UNorm8 => N::A8Unorm,
        F::R_UNorm8 => N::R8Unorm,
        F::R_F16 => N::R16Float,
        F::R_UInt16 => N::R16Uint,
        F::R_UNorm16 => N::R16Unorm,
        F::B5G5R5A1_UNorm => N::BGR5A1Unorm,
        F::B5G6R5_UNorm => N::B5G6R5Unorm,
        F::ABGR_UNorm4 => N::ABGR4Unorm,
        F::R5G5B5A1_UNorm => N::A1BGR5Unorm,
        F::RG_UNorm8 => N::RG8Unorm,
        F::RGBA_UNorm8 => N::RGBA8Unorm,
        F::BGRA_UNorm8 => N::BGRA8Unorm,
        F::RGBA_SRGB => N::RGBA8Unorm_sRGB,
        F::BGRA_SRGB => N::BGRA8Unorm_sRGB,
        F::RG_F16 => N::RG16Float,
        F::RG_UInt16 => N::RG16Uint,
        F::RG_UNorm16 => N::RG16Unorm,
        F::RGB10_A2_UNorm_Rev => N::RGB10A2Unorm,
        F::RGB10_A2_Uint_Rev => N::RGB10A2Uint,
        F::BGR10_A2_Unorm => N::BGR10A2Unorm,
        F::R_F32 => N::R32Float,
        F::RGBA_F16 => N::RGBA16Float,
        F::RGBA_UInt32 => N::RGBA32Uint,
        F::RGBA_F32 => N::RGBA32Float,

        F::RGBA_ASTC_4x4 => N::ASTC_4x4_LDR,
        F::SRGB8_A8_ASTC_4x4 => N::ASTC_4x4_sRGB,
        F::RGBA_ASTC_5x5 => N::ASTC_5x5_LDR,
        F::RGBA_ASTC_6x6 => N::ASTC_6x6_LDR,
        F::RGBA_ASTC_8x8 => N::ASTC_8x8_LDR,
        F::SRGB8_A8_ASTC_8x8 => N::ASTC_8x8_sRGB,
        F::RGBA_ASTC_10x10 => N::ASTC_10x10_LDR,
        F::RGBA_ASTC_12x12 => N::ASTC_12x12_LDR,
        F::RGBA_PVRTC_2BPPV1 => N::PVRTC_RGBA_2BPP,
        F::RGB_PVRTC_2BPPV1 => N::PVRTC_RGB_2BPP,
        F::RGBA_PVRTC_4BPPV1 => N::PVRTC_RGBA_4BPP,
        F::RGB_PVRTC_4BPPV1 => N::PVRTC_RGB_4BPP,
        // ETC2 decoders read ETC1 data
        F::RGB8_ETC1 | F::RGB8_ETC2 => N::ETC2_RGB8,
        F::SRGB8_ETC2 => N::ETC2_RGB8_sRGB,
        F::RGB8_Punchthrough_A1_ETC2 => N::ETC2_RGB8A1,
        F::RGBA8_EAC_ETC2 => N::EAC_RGBA8,
        F::SRGB8_A8_EAC_ETC2 => N::EAC_RGBA8_sRGB,
        F::RG_EAC_UNorm => N::EAC_RG11Unorm,
        F::R_EAC_UNorm => N::EAC_R11Unorm,
        F::RGBA_BC7_UNORM_4x4 => N::BC7_RGBAUnorm,
        F::RGBA_BC7_SRGB_4x4 => N::BC7_RGBAUnorm_sRGB,

        F::Z_UNorm16 => N::Depth16Unorm,
        F::S8_UInt_Z24_UNorm => N::Depth24Unorm_Stencil8,
        F::S8_UInt_Z32_UNorm => N::Depth32Float_Stencil8,
        F::S_UInt8 => N::Stencil8,

        F::L_UNorm8 | F::LA_UNorm8 | F::RGB_F16 | F::RGB_F32 | F::Z_UNorm24 | F::Z_UNorm32 => return None,
    };
    Some(native)
}

impl NativePixelFormat {
    /// Portable format of this native format
    ///
    /// Inverse of [`to_native`] except for ETC1, which reads back as ETC2.
    pub fn to_texture_format(self) -> TextureFormat {
        use NativePixelFormat as N;
        use TextureFormat as F;

        match self {
            N::A8Unorm => F::A_UNorm8,
            N::R8Unorm => F::R_UNorm8,
            N::R16Float => F::R_F16,
            N::R16Uint => F::R_UInt16,
            N::R16Unorm => F::R_UNorm16,
            N::BGR5A1Unorm => F::B5G5R5A1_UNorm,
            N::B5G6R5Unorm => F::B5G6R5_UNorm,
            N::ABGR4Unorm => F::ABGR_UNorm4,
            N::A1BGR5Unorm => F::R5G5B5A1_UNorm,
            N::RG8Unorm => F::RG_UNorm8,
            N::RGBA8Unorm => F::RGBA_UNorm8,
            N::BGRA8Unorm => F::BGRA_UNorm8,
            N::RGBA8Unorm_sRGB => F::RGBA_SRGB,
            N::BGRA8Unorm_sRGB => F::BGRA_SRGB,
            N::RG16Float => F::RG_F16,
            N::RG16Uint => F::RG_UInt16,
            N::RG16Unorm => F::RG_UNorm16,
            N::RGB10A2Unorm => F::RGB10_A2_UNorm_Rev,
            N::RGB10A2Uint => F::RGB10_A2_Uint_Rev,
            N::BGR10A2Unorm => F::BGR10_A2_Unorm,
            N::R32Float => F::R_F32,
            N::RGBA16Float => F::RGBA_F16,
            N::RGBA32Uint => F::RGBA_UInt32,
            N::RGBA32Float => F::RGBA_F32,
            N::ASTC_4x4_LDR => F::RGBA_ASTC_4x4,
            N::ASTC_4x4_sRGB => F::SRGB8_A8_ASTC_4x4,
            N::ASTC_5x5_LDR => F::RGBA_ASTC_5x5,
            N::ASTC_6x6_LDR => F::RGBA_ASTC_6x6,
            N::ASTC_8x8_LDR => F::RGBA_ASTC_8x8,
            N::ASTC_8x8_sRGB => F::SRGB8_A8_ASTC_8x8,
            N::ASTC_10x10_LDR => F::RGBA_ASTC_10x10,
            N::ASTC_12x12_LDR => F::RGBA_ASTC_12x12,
            N::PVRTC_RGBA_2BPP => F::RGBA_PVRTC_2BPPV1,
            N::PVRTC_RGB_2BPP => F::RGB_PVRTC_2BPPV1,
            N::PVRTC_RGBA_4BPP => F::RGBA_PVRTC_4BPPV1,
            N::PVRTC_RGB_4BPP => F::RGB_PVRTC_4BPPV1,
            N::ETC2_RGB8 => F::RGB8_ETC2,
            N::ETC2_RGB8_sRGB => F::SRGB8_ETC2,
            N::ETC2_RGB8A1 => F::RGB8_Punchthrough_A1_ETC2,
            N::EAC_RGBA8 => F::RGBA8_EAC_ETC2,
            N::EAC_RGBA8_sRGB => F::SRGB8_A8_EAC_ETC2,
            N::EAC_RG11Unorm => F::RG_EAC_UNorm,
            N::EAC_R11Unorm => F::R_EAC_UNorm,
            N::BC7_RGBAUnorm => F::RGBA_BC7_UNORM_4x4,
            N::BC7_RGBAUnorm_sRGB => F::RGBA_BC7_SRGB_4x4,
            N::Depth16Unorm => F::Z_UNorm16,
            N::Depth24Unorm_Stencil8 => F::S8_UInt_Z24_UNorm,
            N::Depth32Float_Stencil8 => F::S8_UInt_Z32_UNorm,
            N::Stencil8 => F::S_UInt8,
        }
    }

    pub fn is_depth_or_stencil(self) -> bool {
        matches!(
            self,
            Self::Depth16Unorm | Self::Depth24Unorm_Stencil8 | Self::Depth32Float_Stencil8 | Self::Stencil8
        )
    }

    /// Capability bits the backend reports for this format
    pub fn capabilities(self) -> TextureFormatCapabilities {
        let props = self.to_texture_format().properties();
        if props.is_compressed() {
            TextureFormatCapabilities::SAMPLED
                | TextureFormatCapabilities::SAMPLED_FILTER
                | TextureFormatCapabilities::COMPRESSED_UPLOAD_STORAGE
        } else if self.is_depth_or_stencil() {
            TextureFormatCapabilities::SAMPLED | TextureFormatCapabilities::ATTACHMENT
        } else {
            TextureFormatCapabilities::SAMPLED
                | TextureFormatCapabilities::SAMPLED_FILTER
                | TextureFormatCapabilities::STORAGE
                | TextureFormatCapabilities::ATTACHMENT
        }
    }
}

/// Every portable format the backend maps, with its native format
pub fn supported_formats() -> impl Iterator<Item = (TextureFormat, NativePixelFormat)> {
    ALL_FORMATS
        .iter()
        .filter_map(|&format| to_native(format).map(|native| (format, native)))
}

/// Capability set of a unified-memory device
///
/// The backend always has immutable storage, swizzle, multisampling and
/// every dimensionality; bindless ids depend on the hardware tier.
pub fn probe_capabilities(bindless: bool) -> Capabilities {
    let mut features = DeviceFeatures::TEXTURE_1D
        | DeviceFeatures::TEXTURE_ARRAY
        | DeviceFeatures::TEXTURE_3D
        | DeviceFeatures::IMMUTABLE_STORAGE
        | DeviceFeatures::MULTISAMPLE
        | DeviceFeatures::SIZED_INTERNAL_FORMATS
        | DeviceFeatures::TEXTURE_SWIZZLE;
    if bindless {
        features |= DeviceFeatures::BINDLESS_TEXTURE;
    }

    supported_formats()
        .fold(Capabilities::builder().features(features), |builder: CapabilitiesBuilder, (format, native)| {
            builder.format(format, native.capabilities())
        })
        .build()
}

const ALL_FORMATS: &[TextureFormat] = {
    use TextureFormat as F;
    &[
        F::A_UNorm8, F::L_UNorm8, F::R_UNorm8, F::R_F16, F::R_UInt16, F::R_UNorm16, F::B5G5R5A1_UNorm,
        F::B5G6R5_UNorm, F::ABGR_UNorm4, F::LA_UNorm8, F::RG_UNorm8, F::R5G5B5A1_UNorm, F::RGBA_UNorm8,
        F::BGRA_UNorm8, F::RGBA_SRGB, F::BGRA_SRGB, F::RG_F16, F::RG_UInt16, F::RG_UNorm16,
        F::RGB10_A2_UNorm_Rev, F::RGB10_A2_Uint_Rev, F::BGR10_A2_Unorm, F::R_F32, F::RGB_F16, F::RGBA_F16,
        F::RGB_F32, F::RGBA_UInt32, F::RGBA_F32, F::RGBA_ASTC_4x4, F::SRGB8_A8_ASTC_4x4, F::RGBA_ASTC_5x5,
        F::RGBA_ASTC_6x6, F::RGBA_ASTC_8x8, F::SRGB8_A8_ASTC_8x8, F::RGBA_ASTC_10x10, F::RGBA_ASTC_12x12,
        F::RGBA_PVRTC_2BPPV1, F::RGB_PVRTC_2BPPV1, F::RGBA_PVRTC_4BPPV1, F::RGB_PVRTC_4BPPV1, F::RGB8_ETC1,
        F::RGB8_ETC2, F::SRGB8_ETC2, F::RGB8_Punchthrough_A1_ETC2, F::RGBA8_EAC_ETC2, F::SRGB8_A8_EAC_ETC2,
        F::RG_EAC_UNorm, F::R_EAC_UNorm, F::RGBA_BC7_UNORM_4x4, F::RGBA_BC7_SRGB_4x4, F::Z_UNorm16,
        F::Z_UNorm24, F::Z_UNorm32, F::S8_UInt_Z24_UNorm, F::S8_UInt_Z32_UNorm, F::S_UInt8,
    ]
};

#[cfg(test)]
#[path = "unified_format_tests.rs"]
mod tests;
