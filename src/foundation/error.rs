/// Convenience result type used across graphreel.
pub type GraphreelResult<T> = Result<T, GraphreelError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every error is raised synchronously to the immediate caller; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum GraphreelError {
    /// A visual attribute is present but has the wrong type.
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A numeric attribute lies outside its declared domain.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// Missing required data or an inconsistent graph/animation structure.
    #[error("structural error: {0}")]
    Structural(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraphreelError {
    /// Build a [`GraphreelError::InvalidType`] value.
    pub fn invalid_type(msg: impl Into<String>) -> Self {
        Self::InvalidType(msg.into())
    }

    /// Build a [`GraphreelError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`GraphreelError::Structural`] value.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }

    /// Build a [`GraphreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GraphreelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

/// Kind of a degraded-but-non-fatal render condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// An edge from a node to itself was skipped.
    SelfLoop,
}

/// Diagnostic returned alongside rendered output instead of failing the render.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderWarning {
    /// What went wrong.
    pub kind: WarningKind,
    /// Human-readable detail.
    pub message: String,
}

impl RenderWarning {
    /// Warning for a skipped self-loop on `node`, also logged through `tracing`.
    pub fn self_loop(node: &str) -> Self {
        tracing::warn!(node, "self loops are not supported, ignoring");
        Self {
            kind: WarningKind::SelfLoop,
            message: format!("self loop on '{node}' is not supported, ignoring"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
