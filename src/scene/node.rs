use std::fmt;

use glam::{Mat4, Quat, Vec3};

use super::bounds::Aabb;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Handle to a node inside a [`SceneGraph`](super::SceneGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    /// Arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Root container. World transforms are refreshed from here.
    Scene,
    /// Pure transform node with no geometry of its own.
    Group,
    /// Renderable leaf carrying the bounds of its geometry in local space.
    Mesh {
        /// Geometry bounds before the node's world transform is applied.
        local_bounds: Aabb,
    },
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Local translation/rotation/scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Offset from the parent origin.
    pub translation: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, rotation or scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Local matrix (`T * R * S`).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A node in the scene graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Human-readable name (not required to be unique).
    pub name: String,
    /// Node role.
    pub kind: NodeKind,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Explicit "exclude from bounding box" flag. `None` inherits from the
    /// parent within a traversal.
    pub exclude_from_box: Option<bool>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) world: Mat4,
}

impl Node {
    pub(super) fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            transform: Transform::IDENTITY,
            exclude_from_box: None,
            parent: None,
            children: Vec::new(),
            world: Mat4::IDENTITY,
        }
    }

    /// Parent node, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// World matrix as of the last
    /// [`update_world_transforms`](super::SceneGraph::update_world_transforms).
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// World-space origin of this node.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// Whether this node is a scene root container.
    #[must_use]
    pub fn is_scene(&self) -> bool {
        matches!(self.kind, NodeKind::Scene)
    }

    /// Local geometry bounds, for mesh nodes.
    #[must_use]
    pub fn mesh_bounds(&self) -> Option<&Aabb> {
        match &self.kind {
            NodeKind::Mesh { local_bounds } => Some(local_bounds),
            NodeKind::Scene | NodeKind::Group => None,
        }
    }
}
