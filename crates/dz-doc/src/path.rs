//! Positional addressing for session tree nodes.
//!
//! A path is the sequence of child indices from the session root down
//! to a node. Paths are cheap and human-readable but go stale the
//! moment siblings are inserted or removed, so anything that acts on a
//! path later than it was collected must re-resolve it and verify the
//! node id still matches.

use alloc::vec::Vec;

use crate::node::{Folder, Group, Node, NodeId};

/// Positional address of a node: child indices from the tree root.
///
/// The empty path names the root folder itself, which is not a
/// [`Node`]; resolution of the empty path therefore yields `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the implicit root folder.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_indices(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path extended by one more child index.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the enclosing folder, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    /// Index of this node within its parent, or `None` at the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

/// Node at `path` under `root`, or `None` if the path leads nowhere.
///
/// Paths descend through folders only; a path that tries to step into
/// a group does not resolve.
pub fn resolve<'a>(root: &'a Folder, path: &NodePath) -> Option<&'a Node> {
    let (&first, rest) = path.indices().split_first()?;
    let mut node = root.children.get(first)?;
    for &index in rest {
        node = node.as_folder()?.children.get(index)?;
    }
    Some(node)
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Folder, path: &NodePath) -> Option<&'a mut Node> {
    let (&first, rest) = path.indices().split_first()?;
    let mut node = root.children.get_mut(first)?;
    for &index in rest {
        node = node.as_folder_mut()?.children.get_mut(index)?;
    }
    Some(node)
}

/// Group at `path`, or `None` if the path misses or hits a folder.
pub fn resolve_group<'a>(root: &'a Folder, path: &NodePath) -> Option<&'a Group> {
    resolve(root, path)?.as_group()
}

/// Mutable variant of [`resolve_group`].
pub fn resolve_group_mut<'a>(root: &'a mut Folder, path: &NodePath) -> Option<&'a mut Group> {
    resolve_mut(root, path)?.as_group_mut()
}

/// Children list addressed by `path`: the root's for the empty path,
/// otherwise the folder's at that path. `None` when `path` does not
/// name a folder.
pub fn child_list<'a>(root: &'a Folder, path: &NodePath) -> Option<&'a Vec<Node>> {
    if path.is_root() {
        return Some(&root.children);
    }
    Some(&resolve(root, path)?.as_folder()?.children)
}

/// Mutable variant of [`child_list`].
pub fn child_list_mut<'a>(root: &'a mut Folder, path: &NodePath) -> Option<&'a mut Vec<Node>> {
    if path.is_root() {
        return Some(&mut root.children);
    }
    Some(&mut resolve_mut(root, path)?.as_folder_mut()?.children)
}

/// Current path of the group with `id`, searched in document order.
pub fn path_of(root: &Folder, id: NodeId) -> Option<NodePath> {
    let mut prefix = Vec::new();
    search_group(&root.children, id, &mut prefix)
}

fn search_group(children: &[Node], id: NodeId, prefix: &mut Vec<usize>) -> Option<NodePath> {
    for (index, child) in children.iter().enumerate() {
        prefix.push(index);
        let found = match child {
            Node::Group(g) if g.id == id => Some(NodePath::from_indices(prefix)),
            Node::Folder(f) => search_group(&f.children, id, prefix),
            Node::Group(_) => None,
        };
        prefix.pop();
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Current address of the container with `id` as (group path, index).
pub fn locate_container(root: &Folder, id: NodeId) -> Option<(NodePath, usize)> {
    for (path, _) in group_paths(root) {
        let group = resolve_group(root, &path)?;
        if let Some(index) = group.containers.iter().position(|c| c.id == id) {
            return Some((path, index));
        }
    }
    None
}

/// Every group in the tree as (path, id), in document order.
///
/// This is the snapshot the regeneration pass works from: the paths
/// are immutable copies taken up front, so later tree edits cannot
/// shift the iteration out from under the caller.
pub fn group_paths(root: &Folder) -> Vec<(NodePath, NodeId)> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    collect_groups(&root.children, &mut prefix, &mut out);
    out
}

fn collect_groups(children: &[Node], prefix: &mut Vec<usize>, out: &mut Vec<(NodePath, NodeId)>) {
    for (index, child) in children.iter().enumerate() {
        prefix.push(index);
        match child {
            Node::Group(g) => out.push((NodePath::from_indices(prefix), g.id)),
            Node::Folder(f) => collect_groups(&f.children, prefix, out),
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Container;
    use alloc::vec;

    /// root -> [folder "a" -> [group(1), folder "b" -> [group(2)]], group(3)]
    fn make_tree() -> Folder {
        let mut inner = Folder::new("b");
        inner.children.push(Node::Group(Group::new(NodeId(2), "deep")));

        let mut outer = Folder::new("a");
        outer.children.push(Node::Group(Group::new(NodeId(1), "shallow")));
        outer.children.push(Node::Folder(inner));

        let mut root = Folder::default();
        root.children.push(Node::Folder(outer));
        root.children.push(Node::Group(Group::new(NodeId(3), "top")));
        root
    }

    #[test]
    fn resolve_walks_nested_folders() {
        let root = make_tree();
        let deep = resolve(&root, &NodePath::from_indices(&[0, 1, 0]));
        assert_eq!(deep.and_then(Node::as_group).map(|g| g.id), Some(NodeId(2)));
        let top = resolve(&root, &NodePath::from_indices(&[1]));
        assert_eq!(top.and_then(Node::as_group).map(|g| g.id), Some(NodeId(3)));
    }

    #[test]
    fn resolve_rejects_bad_paths() {
        let root = make_tree();
        assert!(resolve(&root, &NodePath::root()).is_none());
        assert!(resolve(&root, &NodePath::from_indices(&[9])).is_none());
        // Paths cannot descend into a group.
        assert!(resolve(&root, &NodePath::from_indices(&[1, 0])).is_none());
    }

    #[test]
    fn resolve_group_filters_folders() {
        let root = make_tree();
        assert!(resolve_group(&root, &NodePath::from_indices(&[0])).is_none());
        assert!(resolve_group(&root, &NodePath::from_indices(&[1])).is_some());
    }

    #[test]
    fn group_paths_in_document_order() {
        let root = make_tree();
        let ids: Vec<NodeId> = group_paths(&root).into_iter().map(|(_, id)| id).collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(2), NodeId(3)]);
    }

    #[test]
    fn path_of_inverts_group_paths() {
        let root = make_tree();
        for (path, id) in group_paths(&root) {
            assert_eq!(path_of(&root, id), Some(path));
        }
        assert!(path_of(&root, NodeId(77)).is_none());
    }

    #[test]
    fn locate_container_returns_group_path_and_index() {
        let mut root = make_tree();
        if let Some(group) = resolve_group_mut(&mut root, &NodePath::from_indices(&[1])) {
            group.containers.push(Container::new(NodeId(10), "x"));
            group.containers.push(Container::new(NodeId(11), "y"));
        }
        assert_eq!(
            locate_container(&root, NodeId(11)),
            Some((NodePath::from_indices(&[1]), 1))
        );
        assert!(locate_container(&root, NodeId(99)).is_none());
    }

    #[test]
    fn structural_edit_invalidates_collected_path() {
        let mut root = make_tree();
        let (path, id) = group_paths(&root)
            .into_iter()
            .find(|&(_, id)| id == NodeId(3))
            .unwrap();

        // Removing an earlier sibling shifts the group to a new index.
        root.children.remove(0);
        let at_old_path = resolve_group(&root, &path);
        assert!(at_old_path.is_none() || at_old_path.map(|g| g.id) != Some(id));
        assert_eq!(path_of(&root, id), Some(NodePath::from_indices(&[0])));
    }

    #[test]
    fn child_list_addresses_folders_only() {
        let root = make_tree();
        assert_eq!(child_list(&root, &NodePath::root()).map(Vec::len), Some(2));
        assert_eq!(
            child_list(&root, &NodePath::from_indices(&[0])).map(Vec::len),
            Some(2)
        );
        // A group has no child list.
        assert!(child_list(&root, &NodePath::from_indices(&[1])).is_none());
    }

    #[test]
    fn child_and_parent_round_trip() {
        let path = NodePath::root().child(2).child(5);
        assert_eq!(path.indices(), &[2, 5]);
        assert_eq!(path.last(), Some(5));
        assert_eq!(path.parent(), Some(NodePath::from_indices(&[2])));
        assert_eq!(NodePath::root().parent(), None);
    }
}
