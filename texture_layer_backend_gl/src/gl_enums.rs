//! GL scalar types and enum values used by the texture backend

#![allow(dead_code)]

pub type GLenum = u32;
pub type GLint = i32;
pub type GLsizei = i32;
pub type GLuint = u32;

// Errors
pub const NO_ERROR: GLenum = 0;
pub const INVALID_ENUM: GLenum = 0x0500;
pub const INVALID_VALUE: GLenum = 0x0501;
pub const INVALID_OPERATION: GLenum = 0x0502;
pub const OUT_OF_MEMORY: GLenum = 0x0505;

// Texture targets
pub const TEXTURE_1D: GLenum = 0x0DE0;
pub const TEXTURE_2D: GLenum = 0x0DE1;
pub const TEXTURE_3D: GLenum = 0x806F;
pub const TEXTURE_1D_ARRAY: GLenum = 0x8C18;
pub const TEXTURE_2D_ARRAY: GLenum = 0x8C1A;
pub const TEXTURE_CUBE_MAP: GLenum = 0x8513;
pub const TEXTURE_CUBE_MAP_POSITIVE_X: GLenum = 0x8515;
pub const TEXTURE_CUBE_MAP_NEGATIVE_X: GLenum = 0x8516;
pub const TEXTURE_CUBE_MAP_POSITIVE_Y: GLenum = 0x8517;
pub const TEXTURE_CUBE_MAP_NEGATIVE_Y: GLenum = 0x8518;
pub const TEXTURE_CUBE_MAP_POSITIVE_Z: GLenum = 0x8519;
pub const TEXTURE_CUBE_MAP_NEGATIVE_Z: GLenum = 0x851A;
pub const TEXTURE_2D_MULTISAMPLE: GLenum = 0x9100;
pub const TEXTURE_EXTERNAL_OES: GLenum = 0x8D65;
pub const RENDERBUFFER: GLenum = 0x8D41;

/// Cube face targets in face index order
pub const CUBE_FACE_TARGETS: [GLenum; 6] = [
    TEXTURE_CUBE_MAP_POSITIVE_X,
    TEXTURE_CUBE_MAP_NEGATIVE_X,
    TEXTURE_CUBE_MAP_POSITIVE_Y,
    TEXTURE_CUBE_MAP_NEGATIVE_Y,
    TEXTURE_CUBE_MAP_POSITIVE_Z,
    TEXTURE_CUBE_MAP_NEGATIVE_Z,
];

// Texture parameters
pub const TEXTURE_MAG_FILTER: GLenum = 0x2800;
pub const TEXTURE_MIN_FILTER: GLenum = 0x2801;
pub const TEXTURE_MAX_LEVEL: GLenum = 0x813D;
pub const TEXTURE_SWIZZLE_R: GLenum = 0x8E42;
pub const TEXTURE_SWIZZLE_G: GLenum = 0x8E43;
pub const TEXTURE_SWIZZLE_B: GLenum = 0x8E44;
pub const TEXTURE_SWIZZLE_A: GLenum = 0x8E45;
pub const NEAREST: GLenum = 0x2600;
pub const LINEAR: GLenum = 0x2601;

// Pixel store
pub const UNPACK_ALIGNMENT: GLenum = 0x0CF5;

// Swizzle sources and base formats
pub const ZERO: GLenum = 0;
pub const ONE: GLenum = 1;
pub const STENCIL_INDEX: GLenum = 0x1901;
pub const DEPTH_COMPONENT: GLenum = 0x1902;
pub const RED: GLenum = 0x1903;
pub const GREEN: GLenum = 0x1904;
pub const BLUE: GLenum = 0x1905;
pub const ALPHA: GLenum = 0x1906;
pub const RGB: GLenum = 0x1907;
pub const RGBA: GLenum = 0x1908;
pub const LUMINANCE: GLenum = 0x1909;
pub const LUMINANCE_ALPHA: GLenum = 0x190A;
pub const BGRA: GLenum = 0x80E1;
pub const RG: GLenum = 0x8227;
pub const RG_INTEGER: GLenum = 0x8228;
pub const DEPTH_STENCIL: GLenum = 0x84F9;
pub const RED_INTEGER: GLenum = 0x8D94;
pub const RGBA_INTEGER: GLenum = 0x8D99;

// Transfer types
pub const UNSIGNED_BYTE: GLenum = 0x1401;
pub const UNSIGNED_SHORT: GLenum = 0x1403;
pub const UNSIGNED_INT: GLenum = 0x1405;
pub const FLOAT: GLenum = 0x1406;
pub const HALF_FLOAT: GLenum = 0x140B;
pub const UNSIGNED_SHORT_4_4_4_4: GLenum = 0x8033;
pub const UNSIGNED_SHORT_5_5_5_1: GLenum = 0x8034;
pub const UNSIGNED_SHORT_5_6_5: GLenum = 0x8363;
pub const UNSIGNED_SHORT_1_5_5_5_REV: GLenum = 0x8366;
pub const UNSIGNED_INT_2_10_10_10_REV: GLenum = 0x8368;
pub const UNSIGNED_INT_24_8: GLenum = 0x84FA;
pub const FLOAT_32_UNSIGNED_INT_24_8_REV: GLenum = 0x8DAD;

// Sized internal formats
pub const ALPHA8: GLenum = 0x803C;
pub const LUMINANCE8: GLenum = 0x8040;
pub const LUMINANCE8_ALPHA8: GLenum = 0x8045;
pub const RGBA4: GLenum = 0x8056;
pub const RGB5_A1: GLenum = 0x8057;
pub const RGBA8: GLenum = 0x8058;
pub const RGB10_A2: GLenum = 0x8059;
pub const R8: GLenum = 0x8229;
pub const R16: GLenum = 0x822A;
pub const RG8: GLenum = 0x822B;
pub const RG16: GLenum = 0x822C;
pub const R16F: GLenum = 0x822D;
pub const R32F: GLenum = 0x822E;
pub const RG16F: GLenum = 0x822F;
pub const R16UI: GLenum = 0x8234;
pub const RG16UI: GLenum = 0x823A;
pub const RGBA32F: GLenum = 0x8814;
pub const RGB32F: GLenum = 0x8815;
pub const RGBA16F: GLenum = 0x881A;
pub const RGB16F: GLenum = 0x881B;
pub const SRGB8_ALPHA8: GLenum = 0x8C43;
pub const RGBA32UI: GLenum = 0x8D70;
pub const RGB565: GLenum = 0x8D62;
pub const RGB10_A2UI: GLenum = 0x906F;
pub const DEPTH_COMPONENT16: GLenum = 0x81A5;
pub const DEPTH_COMPONENT24: GLenum = 0x81A6;
pub const DEPTH_COMPONENT32: GLenum = 0x81A7;
pub const DEPTH24_STENCIL8: GLenum = 0x88F0;
pub const DEPTH32F_STENCIL8: GLenum = 0x8CAD;
pub const STENCIL_INDEX8: GLenum = 0x8D48;

// Compressed internal formats
pub const COMPRESSED_RGB_PVRTC_4BPPV1_IMG: GLenum = 0x8C00;
pub const COMPRESSED_RGB_PVRTC_2BPPV1_IMG: GLenum = 0x8C01;
pub const COMPRESSED_RGBA_PVRTC_4BPPV1_IMG: GLenum = 0x8C02;
pub const COMPRESSED_RGBA_PVRTC_2BPPV1_IMG: GLenum = 0x8C03;
pub const ETC1_RGB8_OES: GLenum = 0x8D64;
pub const COMPRESSED_RGBA_BPTC_UNORM: GLenum = 0x8E8C;
pub const COMPRESSED_SRGB_ALPHA_BPTC_UNORM: GLenum = 0x8E8D;
pub const COMPRESSED_R11_EAC: GLenum = 0x9270;
pub const COMPRESSED_RG11_EAC: GLenum = 0x9272;
pub const COMPRESSED_RGB8_ETC2: GLenum = 0x9274;
pub const COMPRESSED_SRGB8_ETC2: GLenum = 0x9275;
pub const COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2: GLenum = 0x9276;
pub const COMPRESSED_RGBA8_ETC2_EAC: GLenum = 0x9278;
pub const COMPRESSED_SRGB8_ALPHA8_ETC2_EAC: GLenum = 0x9279;
pub const COMPRESSED_RGBA_ASTC_4X4: GLenum = 0x93B0;
pub const COMPRESSED_RGBA_ASTC_5X5: GLenum = 0x93B2;
pub const COMPRESSED_RGBA_ASTC_6X6: GLenum = 0x93B4;
pub const COMPRESSED_RGBA_ASTC_8X8: GLenum = 0x93B7;
pub const COMPRESSED_RGBA_ASTC_10X10: GLenum = 0x93BB;
pub const COMPRESSED_RGBA_ASTC_12X12: GLenum = 0x93BD;
pub const COMPRESSED_SRGB8_ALPHA8_ASTC_4X4: GLenum = 0x93D0;
pub const COMPRESSED_SRGB8_ALPHA8_ASTC_8X8: GLenum = 0x93D7;
