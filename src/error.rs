use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which relationship list an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    Object,
    Array,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object_relationships",
            Self::Array => "array_relationships",
        }
    }

    /// Accepted entry lengths, as shown in error messages.
    pub fn expected_arity(&self) -> &'static str {
        match self {
            Self::Object => "2 or 3",
            Self::Array => "3",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(
        "table '{table}': {kind}[{index}] has {arity} elements, expected {}",
        .kind.expected_arity()
    )]
    InvalidRelationship {
        table: String,
        kind: RelationshipKind,
        index: usize,
        arity: usize,
    },

    #[error("table '{table}': {kind}[{index}] contains an empty name")]
    EmptyName {
        table: String,
        kind: RelationshipKind,
        index: usize,
    },

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("table '{table}' is declared more than once")]
    DuplicateTable { table: String },

    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid tables file {}: {source}", .path.display())]
    TablesFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl GeneratorError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
