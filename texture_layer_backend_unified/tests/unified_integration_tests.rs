//! Integration tests for the unified-memory backend
//!
//! Drives textures through the Device / Texture traits and checks the
//! stored bytes with readbacks.
//!
//! Run with: cargo test --test unified_integration_tests

use texture_layer::texlayer::{BackendType, Config, Device, DeviceFeatures, ErrorKind};
use texture_layer::texlayer::texture::{
    upload_mip_chain, PopulationState, Texture, TextureCubeFace, TextureDesc, TextureFormat, TextureRangeDesc,
    TextureUsage,
};
use texture_layer_backend_unified::{NativePixelFormat, UnifiedDevice};

fn device() -> UnifiedDevice {
    UnifiedDevice::with_default_capabilities(true, Config::default().with_label("tests"))
}

// ============================================================================
// DEVICE
// ============================================================================

#[test]
fn test_backend_type_and_capabilities() {
    let device = device();

    assert_eq!(device.backend_type(), BackendType::UnifiedMemory);
    assert!(device.capabilities().has_feature(DeviceFeatures::BINDLESS_TEXTURE));
    assert_eq!(device.config().label, "tests");
}

#[test]
fn test_create_texture_through_trait() {
    let device = device();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 64, 64, TextureUsage::SAMPLED).with_debug_name("albedo");
    let texture = device.create_texture(&desc, false).unwrap();

    assert_eq!(texture.state(), PopulationState::Populated);
    assert_eq!(texture.estimated_size_in_bytes(), 64 * 64 * 4);
    texture.upload(&texture.full_range(0, 1), Some(&vec![0x5Au8; 64 * 64 * 4]), 0).unwrap();

    let err = device
        .create_texture(&TextureDesc::new_2d(TextureFormat::RGB_F32, 4, 4, TextureUsage::SAMPLED), false)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_external_storage_through_trait() {
    let device = device();
    let desc = TextureDesc::new_2d(TextureFormat::RGB_F32, 4, 4, TextureUsage::SAMPLED);
    // format resolution is skipped for storage the device does not own
    let texture = device.create_texture(&desc, true).unwrap();

    assert_eq!(texture.state(), PopulationState::Allocated);
    let err = texture.upload(&texture.full_range(0, 1), Some(&[0u8; 192]), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
}

// ============================================================================
// ROUND TRIPS
// ============================================================================

#[test]
fn test_float_texels_round_trip() {
    let device = device();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_F32, 2, 2, TextureUsage::SAMPLED);
    let texture = device.create_unified_texture(&desc, false).unwrap();

    let texels: Vec<f32> = (0..16).map(|i| i as f32 * 0.25 - 1.0).collect();
    let range = texture.full_range(0, 1);
    texture.upload(&range, Some(bytemuck::cast_slice(&texels[..])), 0).unwrap();

    let mut out = vec![0u8; 64];
    texture.read_bytes(&range, &mut out, 0).unwrap();
    let read: Vec<f32> = out
        .chunks_exact(4)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    assert_eq!(read, texels);
}

#[test]
fn test_alpha_only_texels_are_stored_unswizzled() {
    let device = device();
    let desc = TextureDesc::new_2d(TextureFormat::A_UNorm8, 2, 1, TextureUsage::SAMPLED);
    let texture = device.create_unified_texture(&desc, false).unwrap();

    assert_eq!(texture.native_format(), Some(NativePixelFormat::A8Unorm));
    texture.upload(&texture.full_range(0, 1), Some(&[90, 200]), 0).unwrap();

    let mut out = [0u8; 2];
    texture.read_bytes(&texture.full_range(0, 1), &mut out, 0).unwrap();
    assert_eq!(out, [90, 200]);
}

#[test]
fn test_one_d_array_layers() {
    let device = device();
    let desc = TextureDesc::new_1d_array(TextureFormat::RG_UNorm8, 4, 2, TextureUsage::SAMPLED);
    let texture = device.create_unified_texture(&desc, false).unwrap();

    texture
        .upload(&TextureRangeDesc::new_1d_array(2, 2, 1, 1), Some(&[1, 2, 3, 4]), 0)
        .unwrap();

    let mut out = vec![0u8; 16];
    texture.read_bytes(&texture.full_range(0, 1), &mut out, 0).unwrap();
    assert_eq!(out, vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4]);
}

#[test]
fn test_pvrtc_minimum_blocks() {
    let device = device();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_PVRTC_4BPPV1, 8, 8, TextureUsage::SAMPLED).with_full_mip_chain();
    let texture = device.create_unified_texture(&desc, false).unwrap();

    // levels 1..3 are all padded to 2x2 blocks of 8 bytes
    assert_eq!(texture.bytes_per_row(3), 16);
    assert_eq!(texture.allocated_bytes(), 32 + 32 + 32 + 32);

    let tail = [0x11u8; 32];
    texture.upload(&texture.full_range(3, 1), Some(&tail), 0).unwrap();
    let mut out = [0u8; 32];
    texture.read_bytes(&texture.full_range(3, 1), &mut out, 0).unwrap();
    assert_eq!(out, tail);
}

// ============================================================================
// MIP CHAIN AND CUBES
// ============================================================================

#[test]
fn test_mip_chain_upload() {
    let device = device();
    let desc = TextureDesc::new_2d(TextureFormat::R_UNorm8, 4, 4, TextureUsage::SAMPLED).with_full_mip_chain();
    let texture = device.create_unified_texture(&desc, false).unwrap();

    let mut chain = vec![1u8; 16];
    chain.extend_from_slice(&[2u8; 4]);
    chain.push(3);
    upload_mip_chain(&texture, &chain).unwrap();

    let mut level2 = [0u8; 1];
    texture.read_bytes(&texture.full_range(2, 1), &mut level2, 0).unwrap();
    assert_eq!(level2, [3]);

    assert_eq!(upload_mip_chain(&texture, &chain[..20]).unwrap_err().kind(), ErrorKind::ArgumentInvalid);
}

#[test]
fn test_cube_fan_out_orders_faces() {
    let device = device();
    let desc = TextureDesc::new_cube(TextureFormat::R_UNorm8, 1, 1, TextureUsage::SAMPLED);
    let texture = device.create_unified_texture(&desc, false).unwrap();

    texture.upload(&texture.full_range(0, 1), Some(&[10, 11, 12, 13, 14, 15]), 0).unwrap();

    for face in TextureCubeFace::ALL {
        let mut out = [0u8; 1];
        texture.read_bytes(&texture.cube_face_range(face, 0, 1), &mut out, 0).unwrap();
        assert_eq!(out[0], 10 + face.index() as u8);
    }
}

#[test]
fn test_cube_upload_covers_all_faces_whatever_the_range_faces() {
    let device = device();
    let desc = TextureDesc::new_cube(TextureFormat::R_UNorm8, 1, 1, TextureUsage::SAMPLED);
    let texture = device.create_unified_texture(&desc, false).unwrap();

    let single_face = TextureRangeDesc::new_2d(0, 0, 1, 1);
    assert_eq!(texture.upload(&single_face, Some(&[9]), 0).unwrap_err().kind(), ErrorKind::ArgumentInvalid);

    texture.upload(&single_face, Some(&[20, 21, 22, 23, 24, 25]), 0).unwrap();
    for face in TextureCubeFace::ALL {
        let mut out = [0u8; 1];
        texture.read_bytes(&texture.cube_face_range(face, 0, 1), &mut out, 0).unwrap();
        assert_eq!(out[0], 20 + face.index() as u8);
    }
}

#[test]
fn test_cube_face_range_with_stride() {
    let device = device();
    let desc = TextureDesc::new_cube(TextureFormat::R_UNorm8, 2, 2, TextureUsage::SAMPLED);
    let texture = device.create_unified_texture(&desc, false).unwrap();

    let range = TextureRangeDesc::new_2d(0, 0, 2, 2);
    texture.upload_cube(&range, TextureCubeFace::PosZ, Some(&[1, 2, 0, 0, 3, 4]), 4).unwrap();

    let mut out = [0u8; 4];
    texture.read_bytes(&texture.cube_face_range(TextureCubeFace::PosZ, 0, 1), &mut out, 0).unwrap();
    assert_eq!(out, [1, 2, 3, 4]);
}

// ============================================================================
// RESIDENCY
// ============================================================================

#[test]
fn test_resident_ids_are_distinct_per_texture() {
    let device = device();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 4, 4, TextureUsage::SAMPLED);
    let a = device.create_texture(&desc, false).unwrap();
    let b = device.create_texture(&desc, false).unwrap();

    let ha = a.resident_handle().unwrap();
    let hb = b.resident_handle().unwrap();
    assert_ne!(ha, hb);

    drop(a);
    assert!(!device.is_resident(ha.0));
    assert!(device.is_resident(hb.0));
}
