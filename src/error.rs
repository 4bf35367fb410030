//! Crate-level error types.

use crate::scene::NodeId;

/// Errors produced by the cameraman crate.
#[derive(Debug, thiserror::Error)]
pub enum CameramanError {
    /// The node is not attached (transitively) to a scene root, so its world
    /// transform cannot be refreshed.
    #[error("node {node} is not attached to a scene root")]
    SceneRootMissing {
        /// Node whose ancestry was walked.
        node: NodeId,
    },
    /// The handle does not belong to this scene graph.
    #[error("unknown scene node {0}")]
    UnknownNode(NodeId),
    /// No node with this name exists in the searched subtree.
    #[error("no scene node named \"{0}\"")]
    NodeNotFound(String),
    /// Attaching `child` under `parent` would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    CycleDetected {
        /// Node being attached.
        child: NodeId,
        /// Requested new parent.
        parent: NodeId,
    },
    /// Strict view angle parsing failed.
    #[error("unknown view angle \"{0}\"")]
    UnknownViewAngle(String),
    /// A transition is already running and the conflict policy rejects
    /// overlapping requests.
    #[error("a camera transition is already in progress")]
    TransitionInProgress,
    /// Options file could not be read or written.
    #[error("options I/O error: {0}")]
    OptionsIo(#[from] std::io::Error),
    /// TOML options parsing/serialization failure.
    #[error("options parse error: {0}")]
    OptionsParse(String),
}
