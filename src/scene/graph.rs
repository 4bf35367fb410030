use glam::Mat4;

use super::bounds::Aabb;
use super::node::{Node, NodeId, NodeKind, Transform};
use crate::error::CameramanError;

/// Default bound on upward parent walks.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Arena-backed scene graph.
///
/// Nodes are never removed; detached nodes simply stop being reachable from
/// a scene root. World matrices are cached per node and only refreshed by
/// [`update_world_transforms`](Self::update_world_transforms).
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    max_depth: usize,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Empty graph using [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Empty graph with a custom bound on parent-walk depth.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            nodes: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Number of nodes ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- Construction --

    /// Create a new scene root.
    pub fn add_scene(&mut self, name: &str) -> NodeId {
        self.push(Node::new(name, NodeKind::Scene))
    }

    /// Create a node with no parent.
    pub fn add_detached(&mut self, name: &str, kind: NodeKind) -> NodeId {
        self.push(Node::new(name, kind))
    }

    /// Create a group under `parent`.
    pub fn add_group(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Result<NodeId, CameramanError> {
        self.add_child(parent, name, NodeKind::Group)
    }

    /// Create a mesh under `parent` whose geometry spans `local_bounds`.
    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: &str,
        local_bounds: Aabb,
    ) -> Result<NodeId, CameramanError> {
        self.add_child(parent, name, NodeKind::Mesh { local_bounds })
    }

    fn add_child(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
    ) -> Result<NodeId, CameramanError> {
        let _ = self.node(parent)?;
        let id = self.push(Node::new(name, kind));
        self.link(id, parent);
        Ok(id)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn link(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    // -- Access --

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Result<&Node, CameramanError> {
        self.nodes.get(id.0).ok_or(CameramanError::UnknownNode(id))
    }

    /// Look up a node mutably.
    pub fn node_mut(
        &mut self,
        id: NodeId,
    ) -> Result<&mut Node, CameramanError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(CameramanError::UnknownNode(id))
    }

    /// Replace a node's local transform. The world matrix is stale until
    /// the next refresh.
    pub fn set_transform(
        &mut self,
        id: NodeId,
        transform: Transform,
    ) -> Result<(), CameramanError> {
        self.node_mut(id)?.transform = transform;
        Ok(())
    }

    /// Set or clear the "exclude from bounding box" override.
    pub fn set_exclude_from_box(
        &mut self,
        id: NodeId,
        exclude: Option<bool>,
    ) -> Result<(), CameramanError> {
        self.node_mut(id)?.exclude_from_box = exclude;
        Ok(())
    }

    // -- Reparenting --

    /// Move `child` (with its subtree) under `parent`.
    pub fn attach(
        &mut self,
        child: NodeId,
        parent: NodeId,
    ) -> Result<(), CameramanError> {
        let _ = self.node(child)?;
        let _ = self.node(parent)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(CameramanError::CycleDetected { child, parent });
        }
        self.unlink(child);
        self.link(child, parent);
        Ok(())
    }

    /// Remove `child` from its parent. No-op for a node without a parent.
    pub fn detach(&mut self, child: NodeId) -> Result<(), CameramanError> {
        let _ = self.node(child)?;
        self.unlink(child);
        Ok(())
    }

    fn unlink(&mut self, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|&c| c != child);
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    // -- Queries --

    /// Walk parent links from `id` up to the enclosing scene root.
    ///
    /// The walk is bounded by the graph's max depth; running past it is
    /// reported the same way as a node that never reaches a scene.
    pub fn scene_root(&self, id: NodeId) -> Result<NodeId, CameramanError> {
        let mut current = id;
        for _ in 0..=self.max_depth {
            let node = self.node(current)?;
            if node.is_scene() {
                return Ok(current);
            }
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Err(CameramanError::SceneRootMissing { node: id })
    }

    /// Depth-first, pre-order traversal of `root` and its descendants.
    pub fn traverse(
        &self,
        root: NodeId,
        mut visit: impl FnMut(NodeId, &Node),
    ) -> Result<(), CameramanError> {
        let _ = self.node(root)?;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            visit(id, node);
            stack.extend(node.children.iter().rev());
        }
        Ok(())
    }

    /// First node named `name` in the subtree of `root` (pre-order).
    #[must_use]
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut found = None;
        let _ = self.traverse(root, |id, node| {
            if found.is_none() && node.name == name {
                found = Some(id);
            }
        });
        found
    }

    /// Like [`find_by_name`](Self::find_by_name), but a missing node is an
    /// error carrying the name.
    pub fn node_by_name(
        &self,
        root: NodeId,
        name: &str,
    ) -> Result<NodeId, CameramanError> {
        let _ = self.node(root)?;
        self.find_by_name(root, name)
            .ok_or_else(|| CameramanError::NodeNotFound(name.to_owned()))
    }

    /// Mesh nodes under `root` that count toward its bounding box.
    ///
    /// A node's `exclude_from_box` override applies to itself and is
    /// inherited by its descendants unless one of them overrides it again.
    /// Inheritance starts at `root`; flags on ancestors of `root` are
    /// ignored.
    pub fn framed_meshes(
        &self,
        root: NodeId,
    ) -> Result<Vec<NodeId>, CameramanError> {
        let _ = self.node(root)?;
        let mut meshes = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((id, inherited)) = stack.pop() {
            let node = &self.nodes[id.0];
            let excluded = node.exclude_from_box.unwrap_or(inherited);
            if !excluded && node.mesh_bounds().is_some() {
                meshes.push(id);
            }
            stack.extend(node.children.iter().rev().map(|&c| (c, excluded)));
        }
        Ok(meshes)
    }

    // -- World transforms --

    /// Recompute cached world matrices for `root` and every descendant.
    ///
    /// `root`'s own parent chain is honored, so refreshing a subtree yields
    /// the same matrices as refreshing the whole scene.
    pub fn update_world_transforms(
        &mut self,
        root: NodeId,
    ) -> Result<(), CameramanError> {
        let base = self.parent_world(root)?;
        let mut stack = vec![(root, base)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.world = parent_world * node.transform.matrix();
            let world = node.world;
            stack.extend(node.children.iter().map(|&c| (c, world)));
        }
        Ok(())
    }

    fn parent_world(&self, id: NodeId) -> Result<Mat4, CameramanError> {
        let mut chain = Vec::new();
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            if chain.len() > self.max_depth {
                return Err(CameramanError::SceneRootMissing { node: id });
            }
            chain.push(parent);
            current = self.nodes[parent.0].parent;
        }
        Ok(chain.iter().rev().fold(Mat4::IDENTITY, |acc, p| {
            acc * self.nodes[p.0].transform.matrix()
        }))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_center_size(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn scene_root_found_through_groups() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let car = g.add_group(scene, "car").unwrap();
        let logo = g.add_mesh(car, "logo", unit_box()).unwrap();
        assert_eq!(g.scene_root(logo).unwrap(), scene);
    }

    #[test]
    fn detached_node_has_no_scene_root() {
        let mut g = SceneGraph::new();
        let orphan = g.add_detached("orphan", NodeKind::Group);
        let leaf = g.add_mesh(orphan, "leaf", unit_box()).unwrap();
        assert!(matches!(
            g.scene_root(leaf),
            Err(CameramanError::SceneRootMissing { node }) if node == leaf
        ));
    }

    #[test]
    fn depth_bound_stops_the_walk() {
        let mut g = SceneGraph::with_max_depth(2);
        let scene = g.add_scene("scene");
        let a = g.add_group(scene, "a").unwrap();
        let b = g.add_group(a, "b").unwrap();
        let c = g.add_group(b, "c").unwrap();
        assert!(g.scene_root(b).is_ok());
        assert!(g.scene_root(c).is_err());
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let a = g.add_group(scene, "a").unwrap();
        let b = g.add_group(a, "b").unwrap();
        assert!(matches!(
            g.attach(a, b),
            Err(CameramanError::CycleDetected { .. })
        ));
        assert!(g.attach(a, a).is_err());
    }

    #[test]
    fn reparenting_moves_children_list() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let a = g.add_group(scene, "a").unwrap();
        let b = g.add_group(scene, "b").unwrap();
        let leaf = g.add_mesh(a, "leaf", unit_box()).unwrap();
        g.attach(leaf, b).unwrap();
        assert!(g.node(a).unwrap().children().is_empty());
        assert_eq!(g.node(b).unwrap().children(), &[leaf]);
        assert_eq!(g.node(leaf).unwrap().parent(), Some(b));
    }

    #[test]
    fn world_transforms_compose_parent_first() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let a = g.add_group(scene, "a").unwrap();
        let leaf = g.add_mesh(a, "leaf", unit_box()).unwrap();
        g.set_transform(a, Transform::from_translation(Vec3::X * 10.0))
            .unwrap();
        g.set_transform(leaf, Transform::from_translation(Vec3::Y))
            .unwrap();
        g.update_world_transforms(scene).unwrap();
        let p = g.node(leaf).unwrap().world_position();
        assert!(p.abs_diff_eq(Vec3::new(10.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    fn subtree_refresh_honors_ancestors() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let a = g.add_group(scene, "a").unwrap();
        let leaf = g.add_mesh(a, "leaf", unit_box()).unwrap();
        g.set_transform(a, Transform::from_translation(Vec3::Z * 3.0))
            .unwrap();
        g.update_world_transforms(leaf).unwrap();
        let p = g.node(leaf).unwrap().world_position();
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-6));
    }

    #[test]
    fn exclusion_is_inherited_unless_overridden() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let body = g.add_mesh(scene, "body", unit_box()).unwrap();
        let ground = g.add_group(scene, "ground").unwrap();
        let plane = g.add_mesh(ground, "plane", unit_box()).unwrap();
        let marker = g.add_mesh(ground, "marker", unit_box()).unwrap();
        g.set_exclude_from_box(ground, Some(true)).unwrap();
        g.set_exclude_from_box(marker, Some(false)).unwrap();

        let meshes = g.framed_meshes(scene).unwrap();
        assert!(meshes.contains(&body));
        assert!(!meshes.contains(&plane));
        assert!(meshes.contains(&marker));
    }

    #[test]
    fn find_by_name_searches_subtree_only() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let a = g.add_group(scene, "a").unwrap();
        let b = g.add_group(scene, "b").unwrap();
        let logo = g.add_mesh(b, "logo", unit_box()).unwrap();
        assert_eq!(g.find_by_name(scene, "logo"), Some(logo));
        assert_eq!(g.find_by_name(a, "logo"), None);
    }

    #[test]
    fn missing_name_reports_the_name() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let logo = g.add_mesh(scene, "logo", unit_box()).unwrap();
        assert_eq!(g.node_by_name(scene, "logo").unwrap(), logo);
        assert!(matches!(
            g.node_by_name(scene, "spoiler"),
            Err(CameramanError::NodeNotFound(name)) if name == "spoiler"
        ));
    }

    #[test]
    fn traverse_is_preorder() {
        let mut g = SceneGraph::new();
        let scene = g.add_scene("scene");
        let a = g.add_group(scene, "a").unwrap();
        let a1 = g.add_group(a, "a1").unwrap();
        let b = g.add_group(scene, "b").unwrap();
        let mut order = Vec::new();
        g.traverse(scene, |id, _| order.push(id)).unwrap();
        assert_eq!(order, vec![scene, a, a1, b]);
    }
}
