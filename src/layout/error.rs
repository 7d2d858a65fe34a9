use thiserror::Error;

/// Caller contract violations.
///
/// The layout algorithm itself is total over well-formed input sequences:
/// truncated histories, octopus merges and never-seen parents are all
/// regular data. These variants only cover misuse of the engine's call
/// protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("commit {id} was already processed in this layout run")]
    DuplicateCommit { id: String },

    #[error("commit {id} arrived after its parent {parent}; input must be child-before-parent")]
    OutOfOrder { id: String, parent: String },

    #[error("layout is finalized; call resume() before processing more commits")]
    Finalized,

    #[error("layout is not finalized; resume() only follows finalize()")]
    NotFinalized,
}
