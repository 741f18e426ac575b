//! Session document root.
//!
//! Owns the node tree, mints stable ids, and tracks the active time
//! selection. Structural edits go through the session so every group
//! and container receives a unique id; field edits may write to nodes
//! directly once resolved.

use alloc::vec::Vec;

use crate::node::{Container, Folder, Group, Node, NodeId};
use crate::params::NoiseParams;
use crate::path::{self, NodePath};

/// Half-open time range `[start, end)` in seconds that generation
/// applies to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSelection {
    pub start: f64,
    pub end: f64,
}

impl TimeSelection {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Selected length in seconds; zero or negative means nothing to
    /// generate.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The session document: node tree plus edit state.
#[derive(Clone, Debug)]
pub struct Session {
    /// Implicit root folder; the visible tree is its children.
    pub root: Folder,
    /// Time range the next generation applies to, if any.
    pub selection: Option<TimeSelection>,
    /// Last id handed out; ids start at 1 and never repeat.
    next_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            root: Folder::default(),
            selection: None,
            next_id: 0,
        }
    }

    fn mint_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    /// Add an empty folder under the folder at `parent`. Returns the
    /// new node's path, or `None` if `parent` is not a folder.
    pub fn add_folder(&mut self, parent: &NodePath, name: &str) -> Option<NodePath> {
        let children = path::child_list_mut(&mut self.root, parent)?;
        children.push(Node::Folder(Folder::new(name)));
        Some(parent.child(children.len() - 1))
    }

    /// Add a group under the folder at `parent`. The group starts
    /// dirty and carries `params`.
    pub fn add_group(&mut self, parent: &NodePath, name: &str, params: NoiseParams) -> Option<NodePath> {
        let id = self.mint_id();
        let children = path::child_list_mut(&mut self.root, parent)?;
        let mut group = Group::new(id, name);
        group.params = params;
        children.push(Node::Group(group));
        Some(parent.child(children.len() - 1))
    }

    /// Add a container to the group at `group`. The container starts
    /// dirty with the group's parameters copied in. Returns its index.
    pub fn add_container(&mut self, group: &NodePath, name: &str) -> Option<usize> {
        let id = self.mint_id();
        let group = path::resolve_group_mut(&mut self.root, group)?;
        let mut container = Container::new(id, name);
        container.params = group.params;
        group.containers.push(container);
        Some(group.containers.len() - 1)
    }

    /// Detach and return the node at `path`. Dirty flags travel with
    /// the node, so nothing lingers for the regeneration pass.
    pub fn remove_node(&mut self, path: &NodePath) -> Option<Node> {
        let index = path.last()?;
        let parent = path.parent()?;
        let children = path::child_list_mut(&mut self.root, &parent)?;
        if index < children.len() {
            Some(children.remove(index))
        } else {
            None
        }
    }

    /// Detach and return the container at `index` under the group at
    /// `group`.
    pub fn remove_container(&mut self, group: &NodePath, index: usize) -> Option<Container> {
        let group = path::resolve_group_mut(&mut self.root, group)?;
        if index < group.containers.len() {
            Some(group.containers.remove(index))
        } else {
            None
        }
    }

    pub fn group(&self, path: &NodePath) -> Option<&Group> {
        path::resolve_group(&self.root, path)
    }

    pub fn group_mut(&mut self, path: &NodePath) -> Option<&mut Group> {
        path::resolve_group_mut(&mut self.root, path)
    }

    /// Every group as (path, id) in document order.
    pub fn groups(&self) -> Vec<(NodePath, NodeId)> {
        path::group_paths(&self.root)
    }

    /// The stored parameters of the group or container with `id`.
    ///
    /// For containers this is their own parameter set regardless of
    /// the override flag; callers resolving effective parameters go
    /// through [`Group::container_params`].
    pub fn params_of(&self, id: NodeId) -> Option<NoiseParams> {
        if let Some(path) = path::path_of(&self.root, id) {
            return self.group(&path).map(|g| g.params);
        }
        let (path, index) = path::locate_container(&self.root, id)?;
        let group = self.group(&path)?;
        group.containers.get(index).map(|c| c.params)
    }

    pub fn set_selection(&mut self, start: f64, end: f64) {
        self.selection = Some(TimeSelection::new(start, end));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Flag the group at `path` for regeneration. Returns whether the
    /// path resolved.
    pub fn mark_group_dirty(&mut self, path: &NodePath) -> bool {
        match self.group_mut(path) {
            Some(group) => {
                group.needs_regen = true;
                true
            }
            None => false,
        }
    }

    /// Flag the container at `index` under `path` for regeneration.
    pub fn mark_container_dirty(&mut self, path: &NodePath, index: usize) -> bool {
        match self.group_mut(path).and_then(|g| g.containers.get_mut(index)) {
            Some(container) => {
                container.needs_regen = true;
                true
            }
            None => false,
        }
    }
}
