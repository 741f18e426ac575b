//! Session tree node types.
//!
//! The tree has two structural node kinds: folders, which only group
//! other nodes, and groups, which carry generation parameters and own
//! their containers. Containers are leaves addressed by index within
//! their group rather than by tree position.

use alloc::vec::Vec;
use arrayvec::ArrayString;

use crate::params::NoiseParams;

/// Stable identifier for a generation node.
///
/// Minted by the session from a monotonically increasing counter when
/// the node is created, and never reused. Throttle bookkeeping keys on
/// this, so a node keeps its identity across structural edits while a
/// path or flat index would go stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

/// A node addressable by tree position.
#[derive(Clone, Debug)]
pub enum Node {
    Folder(Folder),
    Group(Group),
}

impl Node {
    /// The node's display name.
    pub fn name(&self) -> &str {
        match self {
            Node::Folder(f) => &f.name,
            Node::Group(g) => &g.name,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Folder(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Node::Folder(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Node::Group(g) => Some(g),
            _ => None,
        }
    }
}

/// Pure structure: a folder groups arbitrary child nodes.
#[derive(Clone, Debug, Default)]
pub struct Folder {
    pub name: ArrayString<32>,
    pub children: Vec<Node>,
}

impl Folder {
    /// Create a new empty folder.
    pub fn new(name: &str) -> Self {
        let mut folder = Self::default();
        let _ = folder.name.try_push_str(name);
        folder
    }
}

/// A generation unit: carries parameters and owns its containers.
#[derive(Clone, Debug)]
pub struct Group {
    pub name: ArrayString<32>,
    /// Session-stable identity, see [`NodeId`].
    pub id: NodeId,
    /// Generated content is stale relative to `params`.
    pub needs_regen: bool,
    /// Parameters applied to every container that does not override.
    pub params: NoiseParams,
    /// Containers in document order, addressed as (group path, index).
    pub containers: Vec<Container>,
}

impl Group {
    /// New group with default parameters. Fresh groups start dirty so
    /// their first generation happens without an explicit edit.
    pub fn new(id: NodeId, name: &str) -> Self {
        let mut group = Self {
            name: ArrayString::new(),
            id,
            needs_regen: true,
            params: NoiseParams::default(),
            containers: Vec::new(),
        };
        let _ = group.name.try_push_str(name);
        group
    }

    /// Parameters that govern the container at `index`: the group's
    /// own unless the container opts out.
    pub fn container_params(&self, index: usize) -> Option<NoiseParams> {
        let container = self.containers.get(index)?;
        Some(if container.override_group {
            container.params
        } else {
            self.params
        })
    }
}

/// A generation leaf within a group.
#[derive(Clone, Debug)]
pub struct Container {
    pub name: ArrayString<32>,
    /// Session-stable identity, see [`NodeId`].
    pub id: NodeId,
    /// Generated content is stale relative to the governing parameters.
    pub needs_regen: bool,
    /// Local parameters, consulted only when `override_group` is set.
    pub params: NoiseParams,
    /// Ignore the parent group's parameters and use `params` instead.
    pub override_group: bool,
}

impl Container {
    /// New container inheriting its group's parameters. Starts dirty,
    /// same as a fresh group.
    pub fn new(id: NodeId, name: &str) -> Self {
        let mut container = Self {
            name: ArrayString::new(),
            id,
            needs_regen: true,
            params: NoiseParams::default(),
            override_group: false,
        };
        let _ = container.name.try_push_str(name);
        container
    }
}
