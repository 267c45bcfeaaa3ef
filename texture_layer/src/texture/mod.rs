//! Texture module - descriptors, formats, ranges and the texture trait

// Module declarations
pub mod desc;
pub mod format;
pub mod range;
pub mod population;
pub mod texture;
pub mod upload;

// Re-export everything
pub use desc::*;
pub use format::*;
pub use range::*;
pub use population::*;
pub use texture::*;
pub use upload::*;
