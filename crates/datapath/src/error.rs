use thiserror::Error;

/// Hard failures reported by the engine.
///
/// Missing paths are never errors: they resolve to `None` or to the
/// caller-supplied default.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// More items were requested than the container holds.
    #[error("requested {requested} items, but only {available} are available")]
    NotEnoughItems { requested: usize, available: usize },

    /// The operation needs a keyed container at `path` and none could be
    /// produced.
    #[error("expected a keyed container at `{path}`")]
    NotAContainer { path: String },

    /// No extension function is registered under this name.
    #[error("no macro named `{0}` is registered")]
    UnknownMacro(String),
}

/// Shorthand for results produced by this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
