// crates/imstack-layout/src/lib.rs

//! Stack-based immediate-mode layout.
//!
//! Nodes are declared every frame through [`StackLayout`]; rects are
//! answered from the tree resolved at the end of the previous frame.

pub mod config;
pub mod entry;
pub mod group;
pub mod pool;
pub mod scene;
pub mod snapshot;
pub mod stack;

pub use config::*;
pub use entry::*;
pub use group::*;
pub use pool::*;
pub use scene::*;
pub use snapshot::*;
pub use stack::*;
