//! Unit tests for range.rs

use crate::texture::desc::TextureCubeFace;
use crate::texture::range::TextureRangeDesc;

// ============================================================================
// CONSTRUCTORS
// ============================================================================

#[test]
fn test_new_2d_defaults() {
    let range = TextureRangeDesc::new_2d(4, 8, 16, 32);

    assert_eq!((range.x, range.y, range.z), (4, 8, 0));
    assert_eq!((range.width, range.height, range.depth), (16, 32, 1));
    assert_eq!(range.num_layers, 1);
    assert_eq!(range.num_faces, 1);
    assert_eq!(range.mip_level, 0);
    assert_eq!(range.num_mip_levels, 1);
}

#[test]
fn test_new_1d_array_puts_layers_in_layer_fields() {
    let range = TextureRangeDesc::new_1d_array(0, 64, 2, 3);
    assert_eq!(range.height, 1);
    assert_eq!(range.layer, 2);
    assert_eq!(range.num_layers, 3);
}

#[test]
fn test_new_cube_covers_six_faces() {
    let range = TextureRangeDesc::new_cube(0, 0, 16, 16);
    assert_eq!(range.face, 0);
    assert_eq!(range.num_faces, 6);
}

#[test]
fn test_new_cube_face() {
    let range = TextureRangeDesc::new_cube_face(0, 0, 16, 16, TextureCubeFace::NegY);
    assert_eq!(range.face, 3);
    assert_eq!(range.num_faces, 1);
}

// ============================================================================
// TRANSFORMS
// ============================================================================

#[test]
fn test_at_mip_level_scales_origin_and_extent() {
    let range = TextureRangeDesc::new_2d(8, 4, 64, 32).with_num_mip_levels(4);
    let level2 = range.at_mip_level(2);

    assert_eq!((level2.x, level2.y), (2, 1));
    assert_eq!((level2.width, level2.height, level2.depth), (16, 8, 1));
    assert_eq!(level2.mip_level, 2);
    assert_eq!(level2.num_mip_levels, 1);
}

#[test]
fn test_at_mip_level_clamps_extent_to_one() {
    let range = TextureRangeDesc::new_2d(0, 0, 4, 2);
    let level5 = range.at_mip_level(5);
    assert_eq!((level5.width, level5.height), (1, 1));
}

#[test]
fn test_at_mip_level_to_same_or_lower_only_relabels() {
    let range = TextureRangeDesc::new_2d(0, 0, 8, 8).with_mip_level(3).with_num_mip_levels(2);
    let same = range.at_mip_level(3);
    assert_eq!(same.width, 8);
    assert_eq!(same.num_mip_levels, 1);

    let lower = range.at_mip_level(1);
    assert_eq!(lower.mip_level, 1);
    assert_eq!(lower.width, 8);
}

#[test]
fn test_at_layer_and_at_face_select_one() {
    let range = TextureRangeDesc::new_2d_array(0, 0, 8, 8, 0, 4).at_layer(2);
    assert_eq!((range.layer, range.num_layers), (2, 1));

    let face = TextureRangeDesc::new_cube(0, 0, 8, 8).at_face(5);
    assert_eq!((face.face, face.num_faces), (5, 1));
}

#[test]
fn test_with_setters_keep_other_fields() {
    let range = TextureRangeDesc::new_3d(1, 2, 3, 4, 5, 6)
        .with_num_layers(2)
        .with_num_faces(6)
        .with_num_mip_levels(3);

    assert_eq!((range.x, range.y, range.z), (1, 2, 3));
    assert_eq!(range.num_layers, 2);
    assert_eq!(range.num_faces, 6);
    assert_eq!(range.num_mip_levels, 3);
}
