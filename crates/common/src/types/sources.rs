use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Whether a registered source (or the target of a statement) is an
/// append-only stream or a changelog table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Stream,
    Table,
}

impl SourceKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            SourceKind::Stream => "STREAM",
            SourceKind::Table => "TABLE",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}
