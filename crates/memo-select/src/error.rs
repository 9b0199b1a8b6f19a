use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectorError>;

/// Construction-time failures. Invoking a built selector never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A dependency sequence was combined with further positional dependencies.
    #[error(
        "invalid selector signature: a dependency sequence must be the only dependency argument, found {extra} more"
    )]
    InvalidSignature { extra: usize },

    /// At least one supplied dependency is not callable. `kinds` lists the
    /// kind of every supplied dependency, in order.
    #[error(
        "selector creators expect all input-selectors to be functions, instead received the following types: [{}]",
        .kinds.join(", ")
    )]
    InvalidDependencyType { kinds: Vec<&'static str> },
}

impl SelectorError {
    /// Zero-based positions of the non-callable dependencies.
    #[must_use]
    pub fn offending_positions(&self) -> Vec<usize> {
        match self {
            Self::InvalidSignature { .. } => Vec::new(),
            Self::InvalidDependencyType { kinds } => kinds
                .iter()
                .enumerate()
                .filter(|(_, kind)| **kind != "function")
                .map(|(i, _)| i)
                .collect(),
        }
    }
}
