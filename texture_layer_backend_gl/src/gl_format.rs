//! Portable format to GL format resolution

use texture_layer::texlayer::{Capabilities, DeviceFeatures, DeviceRequirements};
use texture_layer::texlayer::texture::{TextureFormat, TextureUsage};
use crate::gl_enums::*;

/// Native format triple of a portable format
///
/// Uncompressed formats carry the internal storage format together with the
/// transfer format and element type of uploads. Compressed formats carry only
/// the block format, which doubles as the transfer format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatDescGl {
    Uncompressed {
        internal_format: GLenum,
        format: GLenum,
        type_: GLenum,
    },
    Compressed {
        internal_format: GLenum,
    },
}

impl FormatDescGl {
    pub fn internal_format(&self) -> GLenum {
        match *self {
            FormatDescGl::Uncompressed { internal_format, .. } => internal_format,
            FormatDescGl::Compressed { internal_format } => internal_format,
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, FormatDescGl::Compressed { .. })
    }
}

/// Sized internal format, unsized internal format, transfer format, transfer type
type Mapping = (GLenum, GLenum, GLenum, GLenum);

fn uncompressed_mapping(format: TextureFormat, swizzle_alpha: bool) -> Option<Mapping> {
    use TextureFormat as F;
    let mapping = match format {
        F::A_UNorm8 if swizzle_alpha => (R8, RED, RED, UNSIGNED_BYTE),
        F::A_UNorm8 => (ALPHA8, ALPHA, ALPHA, UNSIGNED_BYTE),
        // Luminance has no red-channel equivalent that samples the same
        F::L_UNorm8 | F::LA_UNorm8 if swizzle_alpha => return None,
        F::L_UNorm8 => (LUMINANCE8, LUMINANCE, LUMINANCE, UNSIGNED_BYTE),
        F::LA_UNorm8 => (LUMINANCE8_ALPHA8, LUMINANCE_ALPHA, LUMINANCE_ALPHA, UNSIGNED_BYTE),
        F::R_UNorm8 => (R8, RED, RED, UNSIGNED_BYTE),
        F::RG_UNorm8 => (RG8, RG, RG, UNSIGNED_BYTE),
        F::RGBA_UNorm8 => (RGBA8, RGBA, RGBA, UNSIGNED_BYTE),
        F::BGRA_UNorm8 => (RGBA8, BGRA, BGRA, UNSIGNED_BYTE),
        F::RGBA_SRGB => (SRGB8_ALPHA8, SRGB8_ALPHA8, RGBA, UNSIGNED_BYTE),
        F::BGRA_SRGB => (SRGB8_ALPHA8, SRGB8_ALPHA8, BGRA, UNSIGNED_BYTE),

        F::B5G5R5A1_UNorm => (RGB5_A1, RGBA, BGRA, UNSIGNED_SHORT_1_5_5_5_REV),
        F::R5G5B5A1_UNorm => (RGB5_A1, RGBA, RGBA, UNSIGNED_SHORT_5_5_5_1),
        F::B5G6R5_UNorm => (RGB565, RGB, RGB, UNSIGNED_SHORT_5_6_5),
        F::ABGR_UNorm4 => (RGBA4, RGBA, RGBA, UNSIGNED_SHORT_4_4_4_4),
        F::RGB10_A2_UNorm_Rev => (RGB10_A2, RGB10_A2, RGBA, UNSIGNED_INT_2_10_10_10_REV),
        F::BGR10_A2_Unorm => (RGB10_A2, RGB10_A2, BGRA, UNSIGNED_INT_2_10_10_10_REV),
        F::RGB10_A2_Uint_Rev => (RGB10_A2UI, RGB10_A2UI, RGBA_INTEGER, UNSIGNED_INT_2_10_10_10_REV),

        F::R_UNorm16 => (R16, R16, RED, UNSIGNED_SHORT),
        F::RG_UNorm16 => (RG16, RG16, RG, UNSIGNED_SHORT),
        F::R_UInt16 => (R16UI, R16UI, RED_INTEGER, UNSIGNED_SHORT),
        F::RG_UInt16 => (RG16UI, RG16UI, RG_INTEGER, UNSIGNED_SHORT),
        F::RGBA_UInt32 => (RGBA32UI, RGBA32UI, RGBA_INTEGER, UNSIGNED_INT),

        F::R_F16 => (R16F, R16F, RED, HALF_FLOAT),
        F::RG_F16 => (RG16F, RG16F, RG, HALF_FLOAT),
        F::RGB_F16 => (RGB16F, RGB16F, RGB, HALF_FLOAT),
        F::RGBA_F16 => (RGBA16F, RGBA16F, RGBA, HALF_FLOAT),
        F::R_F32 => (R32F, R32F, RED, FLOAT),
        F::RGB_F32 => (RGB32F, RGB32F, RGB, FLOAT),
        F::RGBA_F32 => (RGBA32F, RGBA32F, RGBA, FLOAT),

        F::Z_UNorm16 => (DEPTH_COMPONENT16, DEPTH_COMPONENT16, DEPTH_COMPONENT, UNSIGNED_SHORT),
        F::Z_UNorm24 => (DEPTH_COMPONENT24, DEPTH_COMPONENT24, DEPTH_COMPONENT, UNSIGNED_INT),
        F::Z_UNorm32 => (DEPTH_COMPONENT32, DEPTH_COMPONENT32, DEPTH_COMPONENT, UNSIGNED_INT),
        F::S8_UInt_Z24_UNorm => (DEPTH24_STENCIL8, DEPTH24_STENCIL8, DEPTH_STENCIL, UNSIGNED_INT_24_8),
        F::S8_UInt_Z32_UNorm => {
            (DEPTH32F_STENCIL8, DEPTH32F_STENCIL8, DEPTH_STENCIL, FLOAT_32_UNSIGNED_INT_24_8_REV)
        }
        F::S_UInt8 => (STENCIL_INDEX8, STENCIL_INDEX8, STENCIL_INDEX, UNSIGNED_BYTE),

        _ => return None,
    };
    Some(mapping)
}

fn compressed_internal_format(format: TextureFormat) -> Option<GLenum> {
    use TextureFormat as F;
    let internal_format = match format {
        F::RGBA_ASTC_4x4 => COMPRESSED_RGBA_ASTC_4X4,
        F::SRGB8_A8_ASTC_4x4 => COMPRESSED_SRGB8_ALPHA8_ASTC_4X4,
        F::RGBA_ASTC_5x5 => COMPRESSED_RGBA_ASTC_5X5,
        F::RGBA_ASTC_6x6 => COMPRESSED_RGBA_ASTC_6X6,
        F::RGBA_ASTC_8x8 => COMPRESSED_RGBA_ASTC_8X8,
        F::SRGB8_A8_ASTC_8x8 => COMPRESSED_SRGB8_ALPHA8_ASTC_8X8,
        F::RGBA_ASTC_10x10 => COMPRESSED_RGBA_ASTC_10X10,
        F::RGBA_ASTC_12x12 => COMPRESSED_RGBA_ASTC_12X12,
        F::RGBA_PVRTC_2BPPV1 => COMPRESSED_RGBA_PVRTC_2BPPV1_IMG,
        F::RGB_PVRTC_2BPPV1 => COMPRESSED_RGB_PVRTC_2BPPV1_IMG,
        F::RGBA_PVRTC_4BPPV1 => COMPRESSED_RGBA_PVRTC_4BPPV1_IMG,
        F::RGB_PVRTC_4BPPV1 => COMPRESSED_RGB_PVRTC_4BPPV1_IMG,
        F::RGB8_ETC1 => ETC1_RGB8_OES,
        F::RGB8_ETC2 => COMPRESSED_RGB8_ETC2,
        F::SRGB8_ETC2 => COMPRESSED_SRGB8_ETC2,
        F::RGB8_Punchthrough_A1_ETC2 => COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2,
        F::RGBA8_EAC_ETC2 => COMPRESSED_RGBA8_ETC2_EAC,
        F::SRGB8_A8_EAC_ETC2 => COMPRESSED_SRGB8_ALPHA8_ETC2_EAC,
        F::RG_EAC_UNorm => COMPRESSED_RG11_EAC,
        F::R_EAC_UNorm => COMPRESSED_R11_EAC,
        F::RGBA_BC7_UNORM_4x4 => COMPRESSED_RGBA_BPTC_UNORM,
        F::RGBA_BC7_SRGB_4x4 => COMPRESSED_SRGB_ALPHA_BPTC_UNORM,
        _ => return None,
    };
    Some(internal_format)
}

/// Resolve the native format triple of `format` for `usage`
///
/// Sized internal formats are chosen when the usage needs fixed storage
/// (STORAGE or ATTACHMENT) or the device accepts them for image
/// specification. Returns `None` when the device cannot represent the format.
pub fn resolve(caps: &Capabilities, format: TextureFormat, usage: TextureUsage) -> Option<FormatDescGl> {
    if let Some(internal_format) = compressed_internal_format(format) {
        return Some(FormatDescGl::Compressed { internal_format });
    }

    let swizzle_alpha = caps.has_requirement(DeviceRequirements::SWIZZLE_ALPHA_TEXTURES);
    let (sized, unsized_, format, type_) = uncompressed_mapping(format, swizzle_alpha)?;
    let use_sized = usage.intersects(TextureUsage::STORAGE | TextureUsage::ATTACHMENT)
        || caps.has_feature(DeviceFeatures::SIZED_INTERNAL_FORMATS);

    Some(FormatDescGl::Uncompressed {
        internal_format: if use_sized { sized } else { unsized_ },
        format,
        type_,
    })
}

/// Whether `format` is stored in red and must be swizzled back into alpha
pub fn needs_alpha_swizzle(caps: &Capabilities, format: TextureFormat) -> bool {
    format == TextureFormat::A_UNorm8 && caps.has_requirement(DeviceRequirements::SWIZZLE_ALPHA_TEXTURES)
}

fn components_of(format: GLenum) -> Option<usize> {
    match format {
        RED | GREEN | BLUE | ALPHA | LUMINANCE | RED_INTEGER | DEPTH_COMPONENT | STENCIL_INDEX => Some(1),
        RG | LUMINANCE_ALPHA | RG_INTEGER | DEPTH_STENCIL => Some(2),
        RGB => Some(3),
        RGBA | BGRA | RGBA_INTEGER => Some(4),
        _ => None,
    }
}

/// Bytes of one texel transferred as `format` / `type_`
///
/// Packed types hold a whole texel in one element regardless of the
/// component count.
pub fn texel_size(format: GLenum, type_: GLenum) -> Option<usize> {
    let packed = match type_ {
        UNSIGNED_SHORT_4_4_4_4 | UNSIGNED_SHORT_5_5_5_1 | UNSIGNED_SHORT_5_6_5 | UNSIGNED_SHORT_1_5_5_5_REV => {
            Some(2)
        }
        UNSIGNED_INT_2_10_10_10_REV | UNSIGNED_INT_24_8 => Some(4),
        FLOAT_32_UNSIGNED_INT_24_8_REV => Some(8),
        _ => None,
    };
    if packed.is_some() {
        return packed;
    }

    let component = match type_ {
        UNSIGNED_BYTE => 1,
        UNSIGNED_SHORT | HALF_FLOAT => 2,
        UNSIGNED_INT | FLOAT => 4,
        _ => return None,
    };
    components_of(format).map(|n| n * component)
}

/// Bytes of one texel of a sized internal format
pub fn internal_format_texel_size(internal_format: GLenum) -> Option<usize> {
    let size = match internal_format {
        ALPHA8 | LUMINANCE8 | R8 | STENCIL_INDEX8 => 1,
        LUMINANCE8_ALPHA8 | RG8 | R16 | R16F | R16UI | RGBA4 | RGB5_A1 | RGB565 | DEPTH_COMPONENT16 => 2,
        RGBA8 | SRGB8_ALPHA8 | RGB10_A2 | RGB10_A2UI | RG16 | RG16F | RG16UI | R32F | DEPTH_COMPONENT24
        | DEPTH_COMPONENT32 | DEPTH24_STENCIL8 => 4,
        RGB16F => 6,
        RGBA16F | DEPTH32F_STENCIL8 => 8,
        RGB32F => 12,
        RGBA32F | RGBA32UI => 16,
        _ => return None,
    };
    Some(size)
}

/// Base format a sized internal format samples as (unsized formats map to themselves)
pub fn base_format_of(internal_format: GLenum) -> GLenum {
    match internal_format {
        ALPHA8 => ALPHA,
        LUMINANCE8 => LUMINANCE,
        LUMINANCE8_ALPHA8 => LUMINANCE_ALPHA,
        R8 | R16 | R16F | R32F | R16UI => RED,
        RG8 | RG16 | RG16F | RG16UI => RG,
        RGB565 | RGB16F | RGB32F => RGB,
        RGBA4 | RGB5_A1 | RGBA8 | SRGB8_ALPHA8 | RGB10_A2 | RGB10_A2UI | RGBA16F | RGBA32F | RGBA32UI => RGBA,
        DEPTH_COMPONENT16 | DEPTH_COMPONENT24 | DEPTH_COMPONENT32 => DEPTH_COMPONENT,
        DEPTH24_STENCIL8 | DEPTH32F_STENCIL8 => DEPTH_STENCIL,
        STENCIL_INDEX8 => STENCIL_INDEX,
        other => other,
    }
}

/// Block width, block height, bytes per block and minimum blocks per axis
/// of a compressed internal format
pub fn compressed_block_info(internal_format: GLenum) -> Option<(u32, u32, usize, u32)> {
    let info = match internal_format {
        COMPRESSED_RGBA_ASTC_4X4 | COMPRESSED_SRGB8_ALPHA8_ASTC_4X4 => (4, 4, 16, 1),
        COMPRESSED_RGBA_ASTC_5X5 => (5, 5, 16, 1),
        COMPRESSED_RGBA_ASTC_6X6 => (6, 6, 16, 1),
        COMPRESSED_RGBA_ASTC_8X8 | COMPRESSED_SRGB8_ALPHA8_ASTC_8X8 => (8, 8, 16, 1),
        COMPRESSED_RGBA_ASTC_10X10 => (10, 10, 16, 1),
        COMPRESSED_RGBA_ASTC_12X12 => (12, 12, 16, 1),
        COMPRESSED_RGBA_PVRTC_2BPPV1_IMG | COMPRESSED_RGB_PVRTC_2BPPV1_IMG => (8, 4, 8, 2),
        COMPRESSED_RGBA_PVRTC_4BPPV1_IMG | COMPRESSED_RGB_PVRTC_4BPPV1_IMG => (4, 4, 8, 2),
        ETC1_RGB8_OES
        | COMPRESSED_RGB8_ETC2
        | COMPRESSED_SRGB8_ETC2
        | COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2
        | COMPRESSED_R11_EAC => (4, 4, 8, 1),
        COMPRESSED_RGBA8_ETC2_EAC
        | COMPRESSED_SRGB8_ALPHA8_ETC2_EAC
        | COMPRESSED_RG11_EAC
        | COMPRESSED_RGBA_BPTC_UNORM
        | COMPRESSED_SRGB_ALPHA_BPTC_UNORM => (4, 4, 16, 1),
        _ => return None,
    };
    Some(info)
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
