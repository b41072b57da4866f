use thiserror::Error;

use crate::StateKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsmError {
    #[error("state `{0}` is not registered")]
    UnknownState(StateKey),

    #[error("state `{0}` is already registered")]
    DuplicateState(StateKey),
}
