// crates/imstack-core/src/lib.rs
pub mod error;
pub mod geometry;
pub mod options;
pub mod style;

pub use error::*;
pub use geometry::*;
pub use options::*;
pub use style::*;

/// Identity of a node among its siblings.
pub type NodeId = i32;

pub type Result<T> = std::result::Result<T, LayoutError>;
