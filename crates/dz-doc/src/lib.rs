//! Session document model for drizzle.
//!
//! This crate defines the types shared across the tool: the session
//! tree of folders, groups and containers, the noise parameter set
//! every generation unit carries, and the placement values the engine
//! emits. The engine consumes these types; front ends edit them.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod node;
mod params;
mod path;
mod placement;
mod session;
mod summary;

pub use node::{Container, Folder, Group, Node, NodeId};
pub use params::{Algorithm, NoiseParams, MAX_OCTAVES};
pub use path::{
    child_list, child_list_mut, group_paths, locate_container, path_of, resolve, resolve_group,
    resolve_group_mut, resolve_mut, NodePath,
};
pub use placement::Placement;
pub use session::{Session, TimeSelection};
pub use summary::{summarize, Shared};
