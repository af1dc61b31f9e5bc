use std::fmt;

use petgraph::graph::NodeIndex;

/// Machine-readable error codes for scripted callers of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DefinitionParseError,
    ConfigParseError,
    InvalidWeight,
    DuplicateNode,
    DuplicateEdge,
    UnknownNode,
    MissingEdge,
    DisconnectedPath,
    Cancelled,
    DeadlineExceeded,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DefinitionParseError => "E1001",
            Self::ConfigParseError => "E1002",
            Self::InvalidWeight => "E1003",
            Self::DuplicateNode => "E1004",
            Self::DuplicateEdge => "E1005",
            Self::UnknownNode => "E2001",
            Self::MissingEdge => "E2002",
            Self::DisconnectedPath => "E2003",
            Self::Cancelled => "E4001",
            Self::DeadlineExceeded => "E4002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DefinitionParseError => "Graph definition parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidWeight => "Edge weight must be finite and positive",
            Self::DuplicateNode => "Node declared more than once",
            Self::DuplicateEdge => "Edge weight declared more than once",
            Self::UnknownNode => "Node not found",
            Self::MissingEdge => "Adjacency entry has no weight",
            Self::DisconnectedPath => "No predecessor chain for target",
            Self::Cancelled => "Search cancelled",
            Self::DeadlineExceeded => "Search deadline exceeded",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DefinitionParseError => {
                Some("Check the [[nodes]] / [[edges]] tables of the graph file.")
            }
            Self::ConfigParseError => Some("Fix syntax in waypath.toml and retry."),
            Self::InvalidWeight => Some("Use weights greater than zero; negative weights are unsupported."),
            Self::DuplicateNode => Some("Merge the duplicate [[nodes]] entries into one."),
            Self::DuplicateEdge => Some("Keep a single [[edges]] entry per (from, to) pair."),
            Self::UnknownNode => Some("Run `wp stats` to list the nodes of the loaded graph."),
            Self::MissingEdge => Some("Add an [[edges]] entry for every listed neighbor."),
            Self::DisconnectedPath => {
                Some("Check for a no-path outcome before reconstructing a path.")
            }
            Self::Cancelled => None,
            Self::DeadlineExceeded => Some("Raise [search].timeout_ms in waypath.toml."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while building a graph or querying it.
///
/// An unreachable target is not an error: the engine reports it as a
/// distinct search outcome.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// A query referenced a label that is not in the graph.
    #[error("unknown node: {label}")]
    UnknownNode { label: String },

    /// An adjacency list names `to` as a neighbor of `from`, but no weight
    /// was declared for that edge.
    #[error("missing weight for edge {from} -> {to}")]
    MissingEdge { from: String, to: String },

    /// Path reconstruction was asked for a target that the predecessor map
    /// never reached.
    #[error("no predecessor chain reaches node #{}", .target.index())]
    DisconnectedPath { target: NodeIndex },

    /// A declared weight was zero, negative, or not finite.
    #[error("invalid weight {weight} for edge {from} -> {to}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// A node label was declared twice.
    #[error("duplicate node: {label}")]
    DuplicateNode { label: String },

    /// A weight for the same directed pair was declared twice.
    #[error("duplicate weight for edge {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    /// The caller tripped the cancellation token.
    #[error("search cancelled")]
    Cancelled,

    /// The search ran past its deadline.
    #[error("search deadline exceeded")]
    DeadlineExceeded,
}

impl GraphError {
    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownNode { .. } => ErrorCode::UnknownNode,
            Self::MissingEdge { .. } => ErrorCode::MissingEdge,
            Self::DisconnectedPath { .. } => ErrorCode::DisconnectedPath,
            Self::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            Self::DuplicateNode { .. } => ErrorCode::DuplicateNode,
            Self::DuplicateEdge { .. } => ErrorCode::DuplicateEdge,
            Self::Cancelled => ErrorCode::Cancelled,
            Self::DeadlineExceeded => ErrorCode::DeadlineExceeded,
        }
    }

    /// Shorthand for an [`GraphError::UnknownNode`] error.
    pub fn unknown(label: impl Into<String>) -> Self {
        Self::UnknownNode {
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, GraphError};
    use petgraph::graph::NodeIndex;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 10] = [
        ErrorCode::DefinitionParseError,
        ErrorCode::ConfigParseError,
        ErrorCode::InvalidWeight,
        ErrorCode::DuplicateNode,
        ErrorCode::DuplicateEdge,
        ErrorCode::UnknownNode,
        ErrorCode::MissingEdge,
        ErrorCode::DisconnectedPath,
        ErrorCode::Cancelled,
        ErrorCode::DeadlineExceeded,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn errors_map_to_codes() {
        assert_eq!(GraphError::unknown("x").code(), ErrorCode::UnknownNode);
        assert_eq!(GraphError::Cancelled.code().code(), "E4001");
        let err = GraphError::DisconnectedPath {
            target: NodeIndex::new(3),
        };
        assert_eq!(err.to_string(), "no predecessor chain reaches node #3");
    }

    #[test]
    fn missing_edge_message_names_both_endpoints() {
        let err = GraphError::MissingEdge {
            from: "a".into(),
            to: "b".into(),
        };
        assert_eq!(err.to_string(), "missing weight for edge a -> b");
    }
}
