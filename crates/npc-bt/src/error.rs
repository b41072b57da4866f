use thiserror::Error;

/// Tree shapes rejected by [`BehaviorTree::new`](crate::BehaviorTree::new).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("composite node `{name}` has no children")]
    EmptyComposite { name: String },

    #[error("action node `{name}` has invalid duration {duration}")]
    InvalidDuration { name: String, duration: f32 },
}
