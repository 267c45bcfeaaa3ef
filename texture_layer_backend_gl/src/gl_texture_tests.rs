//! Unit tests for gl_texture.rs
//!
//! Covers the creation strategy selector against SoftGlContext: allocation
//! path choice, validation order, initialization parameters, native error
//! mapping and residency.

use std::rc::Rc;
use texture_layer::texlayer::{
    Capabilities, Config, DeviceFeatures, DeviceRequirements, Error, ErrorKind, TextureFormatCapabilities,
};
use texture_layer::texlayer::texture::{
    PopulationState, Texture, TextureDesc, TextureFormat, TextureRangeDesc, TextureType, TextureUsage,
};
use crate::gl_context::GlContext;
use crate::gl_enums::*;
use crate::gl_texture::*;
use crate::soft_context::{GlCall, SoftGlContext};

fn full_caps() -> Rc<Capabilities> {
    Rc::new(
        Capabilities::builder()
            .features(DeviceFeatures::all())
            .formats(
                &[TextureFormat::RGBA_UNorm8, TextureFormat::R_UNorm8, TextureFormat::RGBA_F32],
                TextureFormatCapabilities::SAMPLED
                    | TextureFormatCapabilities::SAMPLED_FILTER
                    | TextureFormatCapabilities::STORAGE
                    | TextureFormatCapabilities::ATTACHMENT,
            )
            .build(),
    )
}

fn setup() -> (Rc<SoftGlContext>, Rc<dyn GlContext>) {
    let soft = Rc::new(SoftGlContext::new());
    let ctx: Rc<dyn GlContext> = soft.clone();
    (soft, ctx)
}

fn create(ctx: &Rc<dyn GlContext>, caps: &Rc<Capabilities>, desc: &TextureDesc) -> texture_layer::texlayer::Result<GlTexture> {
    GlTexture::create(ctx.clone(), caps.clone(), &Config::default(), desc, false)
}

fn write_calls(soft: &SoftGlContext) -> Vec<GlCall> {
    soft.calls().into_iter().filter(GlCall::is_write).collect()
}

// ============================================================================
// FREE FUNCTIONS
// ============================================================================

#[test]
fn test_target_for_types() {
    assert_eq!(target_for(TextureType::OneD, 1), TEXTURE_1D);
    assert_eq!(target_for(TextureType::OneDArray, 1), TEXTURE_1D_ARRAY);
    assert_eq!(target_for(TextureType::TwoD, 1), TEXTURE_2D);
    assert_eq!(target_for(TextureType::TwoD, 4), TEXTURE_2D_MULTISAMPLE);
    assert_eq!(target_for(TextureType::TwoDArray, 1), TEXTURE_2D_ARRAY);
    assert_eq!(target_for(TextureType::ThreeD, 1), TEXTURE_3D);
    assert_eq!(target_for(TextureType::Cube, 1), TEXTURE_CUBE_MAP);
    assert_eq!(target_for(TextureType::ExternalImage, 1), TEXTURE_EXTERNAL_OES);
}

#[test]
fn test_unpack_alignment() {
    // 0 means tight
    assert_eq!(unpack_alignment(12, 0), Some(4));
    assert_eq!(unpack_alignment(256, 256), Some(8));
    assert_eq!(unpack_alignment(12, 16), Some(8));
    assert_eq!(unpack_alignment(6, 8), Some(8));
    assert_eq!(unpack_alignment(3, 3), Some(1));
    assert_eq!(unpack_alignment(3, 4), Some(4));
    assert_eq!(unpack_alignment(12, 14), None);
    assert_eq!(unpack_alignment(12, 32), None);
}

// ============================================================================
// STRATEGY SELECTION
// ============================================================================

#[test]
fn test_sampled_texture_uses_legacy_upload() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 64, 64, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.allocation_strategy(), AllocationStrategy::LegacyUpload);
    assert_eq!(texture.state(), PopulationState::Populated);
    assert!(!soft.is_immutable(texture.id()));

    let writes = write_calls(&soft);
    assert_eq!(writes.len(), 1);
    assert!(matches!(
        writes[0],
        GlCall::TexImage { dims: 2, target: TEXTURE_2D, level: 0, width: 64, height: 64, has_data: false, .. }
    ));
}

#[test]
fn test_storage_usage_uses_immutable_storage() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(
        TextureFormat::RGBA_UNorm8,
        64,
        64,
        TextureUsage::SAMPLED | TextureUsage::STORAGE,
    )
    .with_full_mip_chain();
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.allocation_strategy(), AllocationStrategy::ImmutableStorage);
    assert_eq!(texture.state(), PopulationState::Populated);
    assert!(soft.is_immutable(texture.id()));

    let writes = write_calls(&soft);
    assert_eq!(writes.len(), 1);
    assert!(matches!(
        writes[0],
        GlCall::TexStorage { dims: 2, levels: 7, internal_format: RGBA8, width: 64, height: 64, .. }
    ));
}

#[test]
fn test_storage_usage_without_format_storage_falls_back_to_legacy() {
    let (_soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RG_UNorm8, 8, 8, TextureUsage::STORAGE);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.allocation_strategy(), AllocationStrategy::LegacyUpload);
}

#[test]
fn test_storage_usage_needs_immutable_storage_feature() {
    let (_soft, ctx) = setup();
    let caps = Rc::new(
        Capabilities::builder()
            .features(DeviceFeatures::SIZED_INTERNAL_FORMATS)
            .format(TextureFormat::RGBA_UNorm8, TextureFormatCapabilities::STORAGE)
            .build(),
    );
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::STORAGE);

    let err = create(&ctx, &caps, &desc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_storage_path_per_dimensionality() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let usage = TextureUsage::STORAGE;
    let format = TextureFormat::R_UNorm8;

    let one_d = create(&ctx, &caps, &TextureDesc::new_1d(format, 32, usage)).unwrap();
    let one_d_array = create(&ctx, &caps, &TextureDesc::new_1d_array(format, 32, 3, usage)).unwrap();
    let array = create(&ctx, &caps, &TextureDesc::new_2d_array(format, 8, 8, 4, usage)).unwrap();
    let volume = create(&ctx, &caps, &TextureDesc::new_3d(format, 8, 8, 2, usage)).unwrap();
    let cube = create(&ctx, &caps, &TextureDesc::new_cube(format, 8, 8, usage)).unwrap();

    let writes = write_calls(&soft);
    assert_eq!(
        writes,
        vec![
            GlCall::TexStorage { dims: 1, target: TEXTURE_1D, levels: 1, internal_format: R8, width: 32, height: 1, depth: 1 },
            GlCall::TexStorage { dims: 2, target: TEXTURE_1D_ARRAY, levels: 1, internal_format: R8, width: 32, height: 3, depth: 1 },
            GlCall::TexStorage { dims: 3, target: TEXTURE_2D_ARRAY, levels: 1, internal_format: R8, width: 8, height: 8, depth: 4 },
            GlCall::TexStorage { dims: 3, target: TEXTURE_3D, levels: 1, internal_format: R8, width: 8, height: 8, depth: 2 },
            GlCall::TexStorage { dims: 2, target: TEXTURE_CUBE_MAP, levels: 1, internal_format: R8, width: 8, height: 8, depth: 1 },
        ]
    );
    for texture in [&one_d, &one_d_array, &array, &volume, &cube] {
        assert_eq!(texture.state(), PopulationState::Populated);
    }
}

#[test]
fn test_legacy_cube_chain_writes_every_face_and_level() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_cube(TextureFormat::RGBA_UNorm8, 16, 16, TextureUsage::SAMPLED).with_full_mip_chain();
    let texture = create(&ctx, &caps, &desc).unwrap();

    let writes = write_calls(&soft);
    assert_eq!(writes.len(), 5 * 6);
    for (i, call) in writes.iter().enumerate() {
        let GlCall::TexImage { target, level, width, .. } = *call else {
            panic!("unexpected call {:?}", call);
        };
        assert_eq!(target, CUBE_FACE_TARGETS[i % 6]);
        assert_eq!(level, (i / 6) as GLint);
        assert_eq!(width, 16 >> (i / 6));
    }
    assert_eq!(texture.state(), PopulationState::Populated);
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_usage_must_include_sampled_or_storage() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::ATTACHMENT);

    let err = create(&ctx, &caps, &desc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
    assert!(soft.calls().is_empty());
}

#[test]
fn test_attachment_only_2d_with_mips_is_accepted() {
    let (_soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::ATTACHMENT).with_mip_levels(2);

    assert!(create(&ctx, &caps, &desc).is_ok());
}

#[test]
fn test_invalid_descriptor_rejected_before_native_calls() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 0, 8, TextureUsage::SAMPLED);

    let err = create(&ctx, &caps, &desc).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
    assert!(soft.calls().is_empty());
}

#[test]
fn test_missing_dimensionality_feature() {
    let (_soft, ctx) = setup();
    let caps = Rc::new(Capabilities::builder().features(DeviceFeatures::TEXTURE_ARRAY).build());

    let volume = TextureDesc::new_3d(TextureFormat::RGBA_UNorm8, 4, 4, 4, TextureUsage::SAMPLED);
    let one_d_array = TextureDesc::new_1d_array(TextureFormat::RGBA_UNorm8, 4, 2, TextureUsage::SAMPLED);
    let msaa = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 4, 4, TextureUsage::SAMPLED).with_samples(4);

    assert_eq!(create(&ctx, &caps, &volume).unwrap_err().kind(), ErrorKind::Unsupported);
    assert_eq!(create(&ctx, &caps, &one_d_array).unwrap_err().kind(), ErrorKind::Unsupported);
    assert_eq!(create(&ctx, &caps, &msaa).unwrap_err().kind(), ErrorKind::Unsupported);
}

#[test]
fn test_unresolvable_format_is_unsupported() {
    let (_soft, ctx) = setup();
    let caps = Rc::new(
        Capabilities::builder()
            .features(DeviceFeatures::TEXTURE_SWIZZLE)
            .requirements(DeviceRequirements::SWIZZLE_ALPHA_TEXTURES)
            .build(),
    );
    let desc = TextureDesc::new_2d(TextureFormat::L_UNorm8, 4, 4, TextureUsage::SAMPLED);

    assert_eq!(create(&ctx, &caps, &desc).unwrap_err().kind(), ErrorKind::Unsupported);
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[test]
fn test_single_level_parameters() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_MAX_LEVEL), Some(0));
    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_MIN_FILTER), Some(NEAREST as GLint));
    assert_eq!(soft.bound_texture(TEXTURE_2D), 0);
}

#[test]
fn test_mip_chain_keeps_default_min_filter() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED).with_full_mip_chain();
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_MAX_LEVEL), Some(3));
    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_MIN_FILTER), None);
}

#[test]
fn test_alpha_swizzle_parameters() {
    let (soft, ctx) = setup();
    let caps = Rc::new(
        Capabilities::builder()
            .features(DeviceFeatures::TEXTURE_SWIZZLE | DeviceFeatures::SIZED_INTERNAL_FORMATS)
            .requirements(DeviceRequirements::SWIZZLE_ALPHA_TEXTURES)
            .build(),
    );
    let desc = TextureDesc::new_2d(TextureFormat::A_UNorm8, 4, 4, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_SWIZZLE_R), Some(ZERO as GLint));
    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_SWIZZLE_G), Some(ZERO as GLint));
    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_SWIZZLE_B), Some(ZERO as GLint));
    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_SWIZZLE_A), Some(RED as GLint));
    assert_eq!(soft.image_info(texture.id(), TEXTURE_2D, 0).unwrap().internal_format, R8);
}

#[test]
fn test_alpha_swizzle_needs_swizzle_feature() {
    let (_soft, ctx) = setup();
    let caps = Rc::new(
        Capabilities::builder()
            .requirements(DeviceRequirements::SWIZZLE_ALPHA_TEXTURES)
            .build(),
    );
    let desc = TextureDesc::new_2d(TextureFormat::A_UNorm8, 4, 4, TextureUsage::SAMPLED);

    assert_eq!(create(&ctx, &caps, &desc).unwrap_err().kind(), ErrorKind::Unsupported);
}

#[test]
fn test_compressed_population_skipped_without_capability() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_ASTC_4x4, 16, 16, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.state(), PopulationState::Allocated);
    assert!(write_calls(&soft).is_empty());
}

#[test]
fn test_compressed_population_with_image_capability() {
    let (soft, ctx) = setup();
    let caps = Rc::new(
        Capabilities::builder()
            .format(TextureFormat::RGBA_ASTC_4x4, TextureFormatCapabilities::COMPRESSED_UPLOAD_IMAGE)
            .build(),
    );
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_ASTC_4x4, 16, 16, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.state(), PopulationState::Populated);
    assert_eq!(
        write_calls(&soft),
        vec![GlCall::CompressedTexImage {
            dims: 2,
            target: TEXTURE_2D,
            level: 0,
            internal_format: COMPRESSED_RGBA_ASTC_4X4,
            width: 16,
            height: 16,
            depth: 1,
            image_size: 256,
            has_data: false,
        }]
    );
}

#[test]
fn test_compressed_storage_gate_is_path_specific() {
    let (soft, ctx) = setup();
    // image-path support does not unlock the storage path
    let caps = Rc::new(
        Capabilities::builder()
            .features(DeviceFeatures::IMMUTABLE_STORAGE)
            .format(
                TextureFormat::RGBA_ASTC_4x4,
                TextureFormatCapabilities::STORAGE | TextureFormatCapabilities::COMPRESSED_UPLOAD_IMAGE,
            )
            .build(),
    );
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_ASTC_4x4, 16, 16, TextureUsage::STORAGE);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.allocation_strategy(), AllocationStrategy::ImmutableStorage);
    assert_eq!(texture.state(), PopulationState::Allocated);
    // extents and format are still fixed by the storage call
    assert_eq!(
        write_calls(&soft),
        vec![GlCall::TexStorage {
            dims: 2,
            target: TEXTURE_2D,
            levels: 1,
            internal_format: COMPRESSED_RGBA_ASTC_4X4,
            width: 16,
            height: 16,
            depth: 1,
        }]
    );
    assert_eq!(soft.image_info(texture.id(), TEXTURE_2D, 0).unwrap().width, 16);
}

#[test]
fn test_unpopulated_compressed_storage_texture_accepts_uploads() {
    let (soft, ctx) = setup();
    let caps = Rc::new(
        Capabilities::builder()
            .features(DeviceFeatures::IMMUTABLE_STORAGE)
            .format(
                TextureFormat::RGBA_ASTC_4x4,
                TextureFormatCapabilities::STORAGE | TextureFormatCapabilities::COMPRESSED_UPLOAD_IMAGE,
            )
            .build(),
    );
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_ASTC_4x4, 4, 4, TextureUsage::STORAGE | TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();
    assert_eq!(texture.state(), PopulationState::Allocated);
    soft.clear_calls();

    let block = [0x5Au8; 16];
    texture.upload(&texture.full_range(0, 1), Some(&block), 0).unwrap();

    assert!(matches!(write_calls(&soft)[0], GlCall::CompressedTexSubImage { dims: 2, width: 4, height: 4, .. }));
    assert_eq!(soft.read_image(texture.id(), TEXTURE_2D, 0).unwrap(), block);
    assert_eq!(texture.state(), PopulationState::Populated);
}

#[test]
fn test_multisample_allocation() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 32, 32, TextureUsage::SAMPLED).with_samples(4);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.target(), TEXTURE_2D_MULTISAMPLE);
    assert_eq!(texture.state(), PopulationState::Populated);
    assert_eq!(soft.texture_parameter(texture.id(), TEXTURE_MAX_LEVEL), None);
    assert_eq!(
        write_calls(&soft),
        vec![GlCall::TexImageMultisample {
            target: TEXTURE_2D_MULTISAMPLE,
            samples: 4,
            internal_format: RGBA8,
            width: 32,
            height: 32,
        }]
    );
    assert_eq!(soft.image_info(texture.id(), TEXTURE_2D_MULTISAMPLE, 0).unwrap().samples, 4);

    let range = TextureRangeDesc::new_2d(0, 0, 32, 32);
    let err = texture.upload(&range, Some(&[0u8; 32 * 32 * 4]), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

// ============================================================================
// NATIVE ERRORS
// ============================================================================

#[test]
fn test_native_error_mapping() {
    let cases = [
        (INVALID_ENUM, ErrorKind::ArgumentInvalid),
        (INVALID_VALUE, ErrorKind::ArgumentInvalid),
        (INVALID_OPERATION, ErrorKind::InvalidOperation),
        (OUT_OF_MEMORY, ErrorKind::OutOfMemory),
        (0x0503, ErrorKind::BackendError),
    ];
    for (code, kind) in cases {
        let (soft, ctx) = setup();
        let caps = full_caps();
        soft.inject_error_on_write(0, code);
        let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);

        let err = create(&ctx, &caps, &desc).unwrap_err();
        assert_eq!(err.kind(), kind, "code 0x{:04X}", code);
        // the failed texture is released
        assert_eq!(soft.live_textures(), 0);
    }
}

#[test]
fn test_out_of_memory_variant() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    soft.inject_error_on_write(0, OUT_OF_MEMORY);
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);

    assert!(matches!(create(&ctx, &caps, &desc), Err(Error::OutOfMemory)));
}

#[test]
fn test_native_error_checks_can_be_disabled() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    soft.inject_error_on_write(0, INVALID_VALUE);
    let config = Config::default().with_native_error_checks(false);
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);

    let texture = GlTexture::create(ctx.clone(), caps, &config, &desc, false).unwrap();
    assert_eq!(texture.state(), PopulationState::Populated);
    assert!(!soft.calls().contains(&GlCall::GetError));
}

// ============================================================================
// EXTERNAL STORAGE
// ============================================================================

#[test]
fn test_external_storage_skips_validation_and_allocation() {
    let (soft, ctx) = setup();
    let caps = Rc::new(Capabilities::builder().build());
    // attachment-only usage would fail the usage gate
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::ATTACHMENT);
    let texture = GlTexture::create(ctx.clone(), caps, &Config::default(), &desc, true).unwrap();

    assert_eq!(texture.allocation_strategy(), AllocationStrategy::External);
    assert_eq!(texture.state(), PopulationState::Allocated);
    assert_eq!(texture.target(), TEXTURE_2D);
    assert_eq!(soft.calls(), vec![GlCall::GenTexture(texture.id())]);
}

#[test]
fn test_external_image_rejects_uploads() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_external_image(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();
    assert_eq!(texture.target(), TEXTURE_EXTERNAL_OES);
    soft.clear_calls();

    let range = TextureRangeDesc::new_2d(0, 0, 8, 8);
    let err = texture.upload(&range, Some(&[0u8; 256]), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert!(soft.calls().is_empty());
}

// ============================================================================
// RESIDENCY
// ============================================================================

#[test]
fn test_resident_handle_is_acquired_once() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();

    let first = texture.resident_handle().unwrap();
    let second = texture.resident_handle().unwrap();

    assert_eq!(first, second);
    assert!(soft.is_resident(first.0));
    let acquisitions = soft.calls().iter().filter(|c| matches!(c, GlCall::MakeResident(_))).count();
    assert_eq!(acquisitions, 1);
}

#[test]
fn test_drop_releases_residency_before_deletion() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();
    let id = texture.id();
    let handle = texture.resident_handle().unwrap();
    soft.clear_calls();

    drop(texture);

    assert_eq!(soft.calls(), vec![GlCall::MakeNonResident(handle.0), GlCall::DeleteTexture(id)]);
    assert!(!soft.is_resident(handle.0));
    assert!(!soft.texture_exists(id));
}

#[test]
fn test_drop_without_handle_only_deletes() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();
    let id = texture.id();
    soft.clear_calls();

    drop(texture);
    assert_eq!(soft.calls(), vec![GlCall::DeleteTexture(id)]);
}

#[test]
fn test_failed_residency_is_rolled_back() {
    let (soft, ctx) = setup();
    let caps = full_caps();
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();
    let id = texture.id();
    soft.clear_calls();
    soft.raise_error(INVALID_OPERATION);

    assert_eq!(texture.resident_handle().unwrap_err().kind(), ErrorKind::InvalidOperation);
    let handle = soft
        .calls()
        .into_iter()
        .find_map(|c| match c {
            GlCall::MakeResident(handle) => Some(handle),
            _ => None,
        })
        .unwrap();
    assert!(!soft.is_resident(handle));
    assert!(soft.calls().contains(&GlCall::MakeNonResident(handle)));

    // a later request starts over and is released on drop
    assert_eq!(texture.resident_handle().unwrap().0, handle);
    assert!(soft.is_resident(handle));
    soft.clear_calls();
    drop(texture);
    assert_eq!(soft.calls(), vec![GlCall::MakeNonResident(handle), GlCall::DeleteTexture(id)]);
}

#[test]
fn test_resident_handle_needs_bindless() {
    let (_soft, ctx) = setup();
    let caps = Rc::new(Capabilities::builder().build());
    let desc = TextureDesc::new_2d(TextureFormat::RGBA_UNorm8, 8, 8, TextureUsage::SAMPLED);
    let texture = create(&ctx, &caps, &desc).unwrap();

    assert_eq!(texture.resident_handle().unwrap_err().kind(), ErrorKind::Unsupported);
}
