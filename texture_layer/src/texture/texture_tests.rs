//! Unit tests for texture.rs
//!
//! Tests the provided Texture methods (ranges, validation, sizes) and the
//! mip-chain upload pass against a MockTexture.

use std::cell::RefCell;
use crate::error::{ErrorKind, Result};
use crate::texlayer_bail;
use crate::texture::desc::{Dimensions, TextureCubeFace, TextureDesc, TextureType, TextureUsage};
use crate::texture::format::TextureFormat;
use crate::texture::population::PopulationState;
use crate::texture::range::TextureRangeDesc;
use crate::texture::texture::{check_upload_size, upload_size, ResidentHandle, Texture};
use crate::texture::upload::upload_mip_chain;

// ============================================================================
// Mock Texture
// ============================================================================

struct MockTexture {
    desc: TextureDesc,
    uploads: RefCell<Vec<(TextureRangeDesc, usize)>>,
    fail_at_level: Option<u32>,
}

impl MockTexture {
    fn new(desc: TextureDesc) -> Self {
        Self {
            desc,
            uploads: RefCell::new(Vec::new()),
            fail_at_level: None,
        }
    }
}

impl Texture for MockTexture {
    fn dimensions(&self) -> Dimensions {
        self.desc.dimensions()
    }

    fn num_layers(&self) -> u32 {
        self.desc.num_layers
    }

    fn texture_type(&self) -> TextureType {
        self.desc.texture_type
    }

    fn usage(&self) -> TextureUsage {
        self.desc.usage
    }

    fn samples(&self) -> u32 {
        self.desc.num_samples
    }

    fn num_mip_levels(&self) -> u32 {
        self.desc.num_mip_levels
    }

    fn format(&self) -> TextureFormat {
        self.desc.format
    }

    fn state(&self) -> PopulationState {
        PopulationState::Allocated
    }

    fn upload(&self, range: &TextureRangeDesc, data: Option<&[u8]>, bytes_per_row: usize) -> Result<()> {
        self.validate_range(range)?;
        if self.fail_at_level == Some(range.mip_level) {
            texlayer_bail!("texlayer::mock", BackendError, "injected failure");
        }
        let data = data.unwrap_or(&[]);
        check_upload_size(&self.properties(), range, data, bytes_per_row)?;
        self.uploads.borrow_mut().push((*range, data.len()));
        Ok(())
    }

    fn upload_cube(
        &self,
        range: &TextureRangeDesc,
        face: TextureCubeFace,
        data: Option<&[u8]>,
        bytes_per_row: usize,
    ) -> Result<()> {
        self.upload(&range.at_face(face.index()), data, bytes_per_row)
    }

    fn resident_handle(&self) -> Result<ResidentHandle> {
        Ok(ResidentHandle(1))
    }
}

fn rgba_2d(width: u32, height: u32) -> MockTexture {
    MockTexture::new(TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, width, height, TextureUsage::SAMPLED))
}

// ============================================================================
// PROVIDED ACCESSORS
// ============================================================================

#[test]
fn test_num_faces() {
    assert_eq!(rgba_2d(4, 4).num_faces(), 1);
    let cube = MockTexture::new(TextureDesc::new_cube(TextureFormat::RGBA_UNorm8, 4, 4, TextureUsage::SAMPLED));
    assert_eq!(cube.num_faces(), 6);
}

#[test]
fn test_aspect_ratio() {
    assert_eq!(rgba_2d(64, 32).aspect_ratio(), 2.0);
}

#[test]
fn test_full_range_at_mip_level() {
    let tex = MockTexture::new(
        TextureDesc::new_2d_array(TextureFormat::R_UNorm8, 32, 16, 3, TextureUsage::SAMPLED).with_mip_levels(3),
    );
    let range = tex.full_range(2, 1);

    assert_eq!((range.width, range.height, range.depth), (8, 4, 1));
    assert_eq!(range.mip_level, 2);
    assert_eq!(range.num_layers, 3);
    assert_eq!(range.num_faces, 1);
}

#[test]
fn test_cube_face_and_layer_ranges() {
    let cube = MockTexture::new(TextureDesc::new_cube(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED));
    let face = cube.cube_face_range(TextureCubeFace::PosZ, 0, 1);
    assert_eq!((face.face, face.num_faces), (4, 1));

    let array = MockTexture::new(TextureDesc::new_2d_array(TextureFormat::RGBA_UNorm8, 8, 8, 4, TextureUsage::SAMPLED));
    let layer = array.layer_range(3, 0, 1);
    assert_eq!((layer.layer, layer.num_layers), (3, 1));
}

#[test]
fn test_estimated_size_in_bytes() {
    let tex = MockTexture::new(
        TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 4, 4, TextureUsage::SAMPLED).with_mip_levels(3),
    );
    assert_eq!(tex.estimated_size_in_bytes(), (16 + 4 + 1) * 4);

    let cube = MockTexture::new(TextureDesc::new_cube(TextureFormat::R_UNorm8, 2, 2, TextureUsage::SAMPLED));
    assert_eq!(cube.estimated_size_in_bytes(), 6 * 4);
}

// ============================================================================
// RANGE VALIDATION
// ============================================================================

#[test]
fn test_validate_range_accepts_inside() {
    let tex = rgba_2d(16, 16);
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 16, 16)).is_ok());
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(8, 4, 8, 12)).is_ok());
}

#[test]
fn test_validate_range_rejects_zero_extent() {
    let tex = rgba_2d(16, 16);
    let err = tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 0, 16)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
}

#[test]
fn test_validate_range_rejects_out_of_bounds() {
    let tex = rgba_2d(16, 16);
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 17, 16)).is_err());
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(9, 0, 8, 16)).is_err());
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 16, 16).with_num_layers(2)).is_err());
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 16, 16).at_face(1)).is_err());
}

#[test]
fn test_validate_range_checks_mip_level() {
    let tex = MockTexture::new(
        TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 16, 16, TextureUsage::SAMPLED).with_mip_levels(2),
    );
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 8, 8).with_mip_level(1)).is_ok());
    // level 1 is 8x8
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 16, 16).with_mip_level(1)).is_err());
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(0, 0, 1, 1).with_mip_level(2)).is_err());
    assert!(tex
        .validate_range(&TextureRangeDesc::new_2d(0, 0, 8, 8).with_mip_level(1).with_num_mip_levels(2))
        .is_err());
}

#[test]
fn test_validate_range_rejects_unaligned_compressed_origin() {
    let tex = MockTexture::new(TextureDesc::new_2d(TextureFormat::RGBA_ASTC_4x4, 16, 16, TextureUsage::SAMPLED));
    assert!(tex.validate_range(&TextureRangeDesc::new_2d(4, 8, 4, 4)).is_ok());
    let err = tex.validate_range(&TextureRangeDesc::new_2d(2, 0, 4, 4)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
}

// ============================================================================
// PAYLOAD SIZE
// ============================================================================

#[test]
fn test_upload_size_tight_and_strided() {
    let props = TextureFormat::RGB_F32.properties();
    let range = TextureRangeDesc::new_2d(0, 0, 3, 4);

    assert_eq!(upload_size(&props, &range, 0), 3 * 12 * 4);
    // three padded rows plus one tight row
    assert_eq!(upload_size(&props, &range, 40), 40 * 3 + 36);
}

#[test]
fn test_check_upload_size() {
    let props = TextureFormat::RGBA_UNorm8.properties();
    let range = TextureRangeDesc::new_2d(0, 0, 4, 4);

    assert!(check_upload_size(&props, &range, &[0u8; 64], 0).is_ok());
    assert_eq!(
        check_upload_size(&props, &range, &[0u8; 63], 0).unwrap_err().kind(),
        ErrorKind::ArgumentInvalid
    );
    // stride narrower than a row
    assert!(check_upload_size(&props, &range, &[0u8; 256], 8).is_err());
}

// ============================================================================
// MIP CHAIN UPLOAD
// ============================================================================

#[test]
fn test_upload_mip_chain_one_call_per_level() {
    let tex = MockTexture::new(
        TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED).with_full_mip_chain(),
    );
    let data = vec![0u8; (64 + 16 + 4 + 1) * 4];

    upload_mip_chain(&tex, &data).unwrap();

    let uploads = tex.uploads.borrow();
    assert_eq!(uploads.len(), 4);
    for (level, (range, len)) in uploads.iter().enumerate() {
        assert_eq!(range.mip_level, level as u32);
        assert_eq!(range.num_mip_levels, 1);
        assert_eq!(*len, (range.width * range.height * 4) as usize);
    }
}

#[test]
fn test_upload_mip_chain_rejects_short_data() {
    let tex = MockTexture::new(
        TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED).with_mip_levels(2),
    );
    let err = upload_mip_chain(&tex, &[0u8; 64 * 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
    assert!(tex.uploads.borrow().is_empty());
}

#[test]
fn test_upload_mip_chain_stops_at_first_failure() {
    let mut tex = MockTexture::new(
        TextureDesc::new_2d(TextureFormat::R_UNorm8, 4, 4, TextureUsage::SAMPLED).with_mip_levels(3),
    );
    tex.fail_at_level = Some(1);

    let err = upload_mip_chain(&tex, &[0u8; 16 + 4 + 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BackendError);
    assert_eq!(tex.uploads.borrow().len(), 1);
}
