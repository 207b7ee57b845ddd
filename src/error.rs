use thiserror::Error;

/// Why a widget could not bind to the page tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MountError {
    /// No element with the requested container ID exists in the tree.
    #[error("container `{id}` not found")]
    MissingContainer { id: String },
    /// The container exists but holds no toggle element.
    #[error("container `{container}` has no `pin-toggle` descendant")]
    MissingToggle { container: String },
}
