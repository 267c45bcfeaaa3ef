//! Portable pixel formats and their block properties

use bitflags::bitflags;
use crate::texture::range::TextureRangeDesc;

/// Portable pixel format
///
/// Channel order reads from the lowest address. `_Rev` formats are packed
/// with reversed component order inside one machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    // 8 bpp
    A_UNorm8,
    L_UNorm8,
    R_UNorm8,

    // 16 bpp
    R_F16,
    R_UInt16,
    R_UNorm16,
    B5G5R5A1_UNorm,
    B5G6R5_UNorm,
    ABGR_UNorm4,
    LA_UNorm8,
    RG_UNorm8,
    R5G5B5A1_UNorm,

    // 32 bpp
    RGBA_UNorm8,
    BGRA_UNorm8,
    RGBA_SRGB,
    BGRA_SRGB,
    RG_F16,
    RG_UInt16,
    RG_UNorm16,
    RGB10_A2_UNorm_Rev,
    RGB10_A2_Uint_Rev,
    BGR10_A2_Unorm,
    R_F32,

    // 48 bpp
    RGB_F16,

    // 64 bpp
    RGBA_F16,

    // 96 bpp
    RGB_F32,

    // 128 bpp
    RGBA_UInt32,
    RGBA_F32,

    // Compressed
    RGBA_ASTC_4x4,
    SRGB8_A8_ASTC_4x4,
    RGBA_ASTC_5x5,
    RGBA_ASTC_6x6,
    RGBA_ASTC_8x8,
    SRGB8_A8_ASTC_8x8,
    RGBA_ASTC_10x10,
    RGBA_ASTC_12x12,
    RGBA_PVRTC_2BPPV1,
    RGB_PVRTC_2BPPV1,
    RGBA_PVRTC_4BPPV1,
    RGB_PVRTC_4BPPV1,
    RGB8_ETC1,
    RGB8_ETC2,
    SRGB8_ETC2,
    RGB8_Punchthrough_A1_ETC2,
    RGBA8_EAC_ETC2,
    SRGB8_A8_EAC_ETC2,
    RG_EAC_UNorm,
    R_EAC_UNorm,
    RGBA_BC7_UNORM_4x4,
    RGBA_BC7_SRGB_4x4,

    // Depth and stencil
    Z_UNorm16,
    Z_UNorm24,
    Z_UNorm32,
    S8_UInt_Z24_UNorm,
    S8_UInt_Z32_UNorm,
    S_UInt8,
}

bitflags! {
    /// Classification bits of a pixel format
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FormatFlags: u8 {
        const COMPRESSED = 1 << 0;
        const SRGB = 1 << 1;
        const DEPTH = 1 << 2;
        const STENCIL = 1 << 3;
    }
}

/// Block layout of a pixel format
///
/// Uncompressed formats are 1x1x1 blocks of `bytes_per_block` bytes.
/// Compressed formats encode `block_width x block_height x block_depth`
/// texels per block, and some (PVRTC) need a minimum block count per axis
/// even for tiny mip levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureFormatProperties {
    pub name: &'static str,
    pub format: TextureFormat,
    pub components: u8,
    pub bytes_per_block: u8,
    pub block_width: u8,
    pub block_height: u8,
    pub block_depth: u8,
    pub min_blocks_x: u8,
    pub min_blocks_y: u8,
    pub min_blocks_z: u8,
    pub flags: FormatFlags,
}

impl TextureFormatProperties {
    const fn color(name: &'static str, format: TextureFormat, components: u8, bytes: u8, flags: FormatFlags) -> Self {
        Self {
            name,
            format,
            components,
            bytes_per_block: bytes,
            block_width: 1,
            block_height: 1,
            block_depth: 1,
            min_blocks_x: 1,
            min_blocks_y: 1,
            min_blocks_z: 1,
            flags,
        }
    }

    #[allow(clippy::too_many_arguments)]
    const fn compressed(
        name: &'static str,
        format: TextureFormat,
        components: u8,
        bytes: u8,
        block_width: u8,
        block_height: u8,
        min_blocks: u8,
        srgb: bool,
    ) -> Self {
        Self {
            name,
            format,
            components,
            bytes_per_block: bytes,
            block_width,
            block_height,
            block_depth: 1,
            min_blocks_x: min_blocks,
            min_blocks_y: min_blocks,
            min_blocks_z: 1,
            flags: if srgb {
                FormatFlags::COMPRESSED.union(FormatFlags::SRGB)
            } else {
                FormatFlags::COMPRESSED
            },
        }
    }

    /// Block properties of `format`
    pub fn from_format(format: TextureFormat) -> Self {
        use TextureFormat as F;
        let none = FormatFlags::empty();
        let srgb = FormatFlags::SRGB;
        let depth = FormatFlags::DEPTH;
        let depth_stencil = FormatFlags::DEPTH.union(FormatFlags::STENCIL);

        match format {
            F::A_UNorm8 => Self::color("A_UNorm8", format, 1, 1, none),
            F::L_UNorm8 => Self::color("L_UNorm8", format, 1, 1, none),
            F::R_UNorm8 => Self::color("R_UNorm8", format, 1, 1, none),
            F::R_F16 => Self::color("R_F16", format, 1, 2, none),
            F::R_UInt16 => Self::color("R_UInt16", format, 1, 2, none),
            F::R_UNorm16 => Self::color("R_UNorm16", format, 1, 2, none),
            F::B5G5R5A1_UNorm => Self::color("B5G5R5A1_UNorm", format, 4, 2, none),
            F::B5G6R5_UNorm => Self::color("B5G6R5_UNorm", format, 3, 2, none),
            F::ABGR_UNorm4 => Self::color("ABGR_UNorm4", format, 4, 2, none),
            F::LA_UNorm8 => Self::color("LA_UNorm8", format, 2, 2, none),
            F::RG_UNorm8 => Self::color("RG_UNorm8", format, 2, 2, none),
            F::R5G5B5A1_UNorm => Self::color("R5G5B5A1_UNorm", format, 4, 2, none),
            F::RGBA_UNorm8 => Self::color("RGBA_UNorm8", format, 4, 4, none),
            F::BGRA_UNorm8 => Self::color("BGRA_UNorm8", format, 4, 4, none),
            F::RGBA_SRGB => Self::color("RGBA_SRGB", format, 4, 4, srgb),
            F::BGRA_SRGB => Self::color("BGRA_SRGB", format, 4, 4, srgb),
            F::RG_F16 => Self::color("RG_F16", format, 2, 4, none),
            F::RG_UInt16 => Self::color("RG_UInt16", format, 2, 4, none),
            F::RG_UNorm16 => Self::color("RG_UNorm16", format, 2, 4, none),
            F::RGB10_A2_UNorm_Rev => Self::color("RGB10_A2_UNorm_Rev", format, 4, 4, none),
            F::RGB10_A2_Uint_Rev => Self::color("RGB10_A2_Uint_Rev", format, 4, 4, none),
            F::BGR10_A2_Unorm => Self::color("BGR10_A2_Unorm", format, 4, 4, none),
            F::R_F32 => Self::color("R_F32", format, 1, 4, none),
            F::RGB_F16 => Self::color("RGB_F16", format, 3, 6, none),
            F::RGBA_F16 => Self::color("RGBA_F16", format, 4, 8, none),
            F::RGB_F32 => Self::color("RGB_F32", format, 3, 12, none),
            F::RGBA_UInt32 => Self::color("RGBA_UInt32", format, 4, 16, none),
            F::RGBA_F32 => Self::color("RGBA_F32", format, 4, 16, none),

            F::RGBA_ASTC_4x4 => Self::compressed("RGBA_ASTC_4x4", format, 4, 16, 4, 4, 1, false),
            F::SRGB8_A8_ASTC_4x4 => Self::compressed("SRGB8_A8_ASTC_4x4", format, 4, 16, 4, 4, 1, true),
            F::RGBA_ASTC_5x5 => Self::compressed("RGBA_ASTC_5x5", format, 4, 16, 5, 5, 1, false),
            F::RGBA_ASTC_6x6 => Self::compressed("RGBA_ASTC_6x6", format, 4, 16, 6, 6, 1, false),
            F::RGBA_ASTC_8x8 => Self::compressed("RGBA_ASTC_8x8", format, 4, 16, 8, 8, 1, false),
            F::SRGB8_A8_ASTC_8x8 => Self::compressed("SRGB8_A8_ASTC_8x8", format, 4, 16, 8, 8, 1, true),
            F::RGBA_ASTC_10x10 => Self::compressed("RGBA_ASTC_10x10", format, 4, 16, 10, 10, 1, false),
            F::RGBA_ASTC_12x12 => Self::compressed("RGBA_ASTC_12x12", format, 4, 16, 12, 12, 1, false),
            F::RGBA_PVRTC_2BPPV1 => Self::compressed("RGBA_PVRTC_2BPPV1", format, 4, 8, 8, 4, 2, false),
            F::RGB_PVRTC_2BPPV1 => Self::compressed("RGB_PVRTC_2BPPV1", format, 3, 8, 8, 4, 2, false),
            F::RGBA_PVRTC_4BPPV1 => Self::compressed("RGBA_PVRTC_4BPPV1", format, 4, 8, 4, 4, 2, false),
            F::RGB_PVRTC_4BPPV1 => Self::compressed("RGB_PVRTC_4BPPV1", format, 3, 8, 4, 4, 2, false),
            F::RGB8_ETC1 => Self::compressed("RGB8_ETC1", format, 3, 8, 4, 4, 1, false),
            F::RGB8_ETC2 => Self::compressed("RGB8_ETC2", format, 3, 8, 4, 4, 1, false),
            F::SRGB8_ETC2 => Self::compressed("SRGB8_ETC2", format, 3, 8, 4, 4, 1, true),
            F::RGB8_Punchthrough_A1_ETC2 => {
                Self::compressed("RGB8_Punchthrough_A1_ETC2", format, 3, 8, 4, 4, 1, false)
            }
            F::RGBA8_EAC_ETC2 => Self::compressed("RGBA8_EAC_ETC2", format, 4, 16, 4, 4, 1, false),
            F::SRGB8_A8_EAC_ETC2 => Self::compressed("SRGB8_A8_EAC_ETC2", format, 4, 16, 4, 4, 1, true),
            F::RG_EAC_UNorm => Self::compressed("RG_EAC_UNorm", format, 2, 16, 4, 4, 1, false),
            F::R_EAC_UNorm => Self::compressed("R_EAC_UNorm", format, 1, 8, 4, 4, 1, false),
            F::RGBA_BC7_UNORM_4x4 => Self::compressed("RGBA_BC7_UNORM_4x4", format, 4, 16, 4, 4, 1, false),
            F::RGBA_BC7_SRGB_4x4 => Self::compressed("RGBA_BC7_SRGB_4x4", format, 4, 16, 4, 4, 1, true),

            F::Z_UNorm16 => Self::color("Z_UNorm16", format, 1, 2, depth),
            F::Z_UNorm24 => Self::color("Z_UNorm24", format, 1, 3, depth),
            F::Z_UNorm32 => Self::color("Z_UNorm32", format, 1, 4, depth),
            F::S8_UInt_Z24_UNorm => Self::color("S8_UInt_Z24_UNorm", format, 2, 4, depth_stencil),
            F::S8_UInt_Z32_UNorm => Self::color("S8_UInt_Z32_UNorm", format, 2, 8, depth_stencil),
            F::S_UInt8 => Self::color("S_UInt8", format, 1, 1, FormatFlags::STENCIL),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.flags.contains(FormatFlags::COMPRESSED)
    }

    pub fn is_srgb(&self) -> bool {
        self.flags.contains(FormatFlags::SRGB)
    }

    pub fn is_depth_or_stencil(&self) -> bool {
        self.flags.intersects(FormatFlags::DEPTH | FormatFlags::STENCIL)
    }

    fn blocks(&self, texels: u32, block: u8, min_blocks: u8) -> usize {
        let texels = texels.max(1) as usize;
        let block = block as usize;
        texels.div_ceil(block).max(min_blocks as usize)
    }

    /// Tightly packed byte count of one row of `width` texels
    pub fn bytes_per_row(&self, width: u32) -> usize {
        if self.is_compressed() {
            self.blocks(width, self.block_width, self.min_blocks_x) * self.bytes_per_block as usize
        } else {
            width.max(1) as usize * self.bytes_per_block as usize
        }
    }

    /// Tightly packed byte count of one layer of `range` at its mip level
    ///
    /// Covers every face of the range, but a single layer.
    pub fn bytes_per_layer(&self, range: &TextureRangeDesc) -> usize {
        let faces = range.num_faces.max(1) as usize;
        if self.is_compressed() {
            faces
                * self.blocks(range.width, self.block_width, self.min_blocks_x)
                * self.blocks(range.height, self.block_height, self.min_blocks_y)
                * self.blocks(range.depth, self.block_depth, self.min_blocks_z)
                * self.bytes_per_block as usize
        } else {
            faces
                * range.width.max(1) as usize
                * range.height.max(1) as usize
                * range.depth.max(1) as usize
                * self.bytes_per_block as usize
        }
    }

    /// Tightly packed byte count of every level, layer and face of `range`
    pub fn bytes_per_range(&self, range: &TextureRangeDesc) -> usize {
        debug_assert!(range.x % self.block_width as u32 == 0);
        debug_assert!(range.y % self.block_height as u32 == 0);
        debug_assert!(range.z % self.block_depth as u32 == 0);

        (0..range.num_mip_levels)
            .map(|i| self.bytes_per_layer(&range.at_mip_level(range.mip_level + i)) * range.num_layers as usize)
            .sum()
    }

    /// Number of rows (block rows for compressed formats) in `range`
    pub fn rows(&self, range: &TextureRangeDesc) -> usize {
        if range.num_mip_levels == 1 {
            let rows = if self.is_compressed() {
                self.blocks(range.height, self.block_height, self.min_blocks_y)
            } else {
                range.height.max(1) as usize
            };
            rows * range.depth as usize * range.num_faces as usize * range.num_layers as usize
        } else {
            (range.mip_level..range.mip_level + range.num_mip_levels)
                .map(|level| self.rows(&range.at_mip_level(level)))
                .sum()
        }
    }

    /// Number of complete 2D mip levels, from level 0 down, that fit in `total_bytes`
    pub fn num_mip_levels_for_bytes(&self, width: u32, height: u32, mut total_bytes: usize) -> u32 {
        let range = TextureRangeDesc::new_2d(0, 0, width, height);
        let mut levels = 0;
        while total_bytes > 0 {
            let level_bytes = self.bytes_per_range(&range.at_mip_level(levels));
            if level_bytes > total_bytes {
                break;
            }
            total_bytes -= level_bytes;
            levels += 1;
        }
        levels
    }
}

impl TextureFormat {
    pub fn properties(self) -> TextureFormatProperties {
        TextureFormatProperties::from_format(self)
    }

    pub fn is_compressed(self) -> bool {
        self.properties().is_compressed()
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
