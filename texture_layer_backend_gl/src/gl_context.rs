//! Native GL entry points consumed by the texture backend
//!
//! The loader glue (function pointers of a live context) implements this
//! trait outside of this crate; `SoftGlContext` implements it in memory.

use crate::gl_enums::{GLenum, GLint, GLsizei, GLuint};

/// GL context entry points
///
/// Mirrors the native calls one-to-one. A `None` payload is the native null
/// pointer: image specification calls allocate without writing, sub-image
/// calls do nothing. Implementations record failures in the native error
/// state, read back with [`GlContext::get_error`].
#[allow(clippy::too_many_arguments)]
pub trait GlContext {
    // ===== OBJECTS AND STATE =====

    fn gen_texture(&self) -> GLuint;

    fn delete_texture(&self, texture: GLuint);

    fn bind_texture(&self, target: GLenum, texture: GLuint);

    fn tex_parameteri(&self, target: GLenum, pname: GLenum, param: GLint);

    fn pixel_storei(&self, pname: GLenum, param: GLint);

    /// Return and clear the first error recorded since the last call
    fn get_error(&self) -> GLenum;

    // ===== IMAGE SPECIFICATION =====

    fn tex_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    );

    fn tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    );

    fn tex_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    );

    fn tex_sub_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        width: GLsizei,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    );

    fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    );

    fn tex_sub_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        data: Option<&[u8]>,
    );

    // ===== COMPRESSED IMAGE SPECIFICATION =====

    fn compressed_tex_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: Option<&[u8]>,
    );

    fn compressed_tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: Option<&[u8]>,
    );

    fn compressed_tex_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: Option<&[u8]>,
    );

    fn compressed_tex_sub_image_1d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        width: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: Option<&[u8]>,
    );

    fn compressed_tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: Option<&[u8]>,
    );

    fn compressed_tex_sub_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        x: GLint,
        y: GLint,
        z: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: Option<&[u8]>,
    );

    // ===== IMMUTABLE STORAGE =====

    fn tex_storage_1d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, width: GLsizei);

    fn tex_storage_2d(
        &self,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );

    fn tex_storage_3d(
        &self,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    );

    fn tex_storage_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        fixed_sample_locations: bool,
    );

    fn tex_image_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
        fixed_sample_locations: bool,
    );

    // ===== BINDLESS HANDLES =====

    /// Bindless handle of `texture` (0 on failure)
    fn get_texture_handle(&self, texture: GLuint) -> u64;

    fn make_texture_handle_resident(&self, handle: u64);

    fn make_texture_handle_non_resident(&self, handle: u64);

    // ===== RENDERBUFFERS =====

    fn gen_renderbuffer(&self) -> GLuint;

    fn delete_renderbuffer(&self, renderbuffer: GLuint);

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint);

    fn renderbuffer_storage(&self, target: GLenum, internal_format: GLenum, width: GLsizei, height: GLsizei);

    fn renderbuffer_storage_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
}
