use core::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{display_comma_separated, Expr, Ident, Properties, Query, SourceKind};

/// `CREATE STREAM|TABLE <name> [WITH (...)] AS <query> [PARTITION BY <expr>]`
///
/// The query is shared behind an [`Arc`] so rewrites of the property clause
/// never copy or disturb the query tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateAsSelect {
    pub name: Ident,
    pub kind: SourceKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Properties,
    pub query: Arc<Query>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub partition_by: Option<Expr>,
}

impl CreateAsSelect {
    pub fn new(kind: SourceKind, name: impl Into<Ident>, query: Query) -> Self {
        Self {
            name: name.into(),
            kind,
            properties: Properties::new(),
            query: Arc::new(query),
            partition_by: None,
        }
    }

    /// Same statement with its property clause replaced.
    pub fn with_properties(&self, properties: Properties) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            properties,
            query: Arc::clone(&self.query),
            partition_by: self.partition_by.clone(),
        }
    }

    pub fn is_windowed(&self) -> bool {
        self.query.is_windowed()
    }
}

impl fmt::Display for CreateAsSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE {} {}", self.kind, self.name)?;
        if !self.properties.is_empty() {
            write!(f, " WITH ({})", self.properties)?;
        }
        write!(f, " AS {}", self.query)?;
        if let Some(partition_by) = &self.partition_by {
            write!(f, "\nPARTITION BY {partition_by}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableElement {
    pub name: Ident,
    pub data_type: String,
}

impl fmt::Display for TableElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type.to_uppercase())
    }
}

/// `CREATE STREAM|TABLE` over an existing topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CreateSource {
    pub name: Ident,
    pub kind: SourceKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub if_not_exists: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elements: Vec<TableElement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub properties: Properties,
}

impl fmt::Display for CreateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE {} ", self.kind)?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if !self.elements.is_empty() {
            write!(f, " ({})", display_comma_separated(&self.elements))?;
        }
        if !self.properties.is_empty() {
            write!(f, " WITH ({})", self.properties)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InsertInto {
    pub target: Ident,
    pub query: Arc<Query>,
}

impl fmt::Display for InsertInto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {} {}", self.target, self.query)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropSource {
    pub name: Ident,
    pub kind: SourceKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub if_exists: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub delete_topic: bool,
}

impl fmt::Display for DropSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {} ", self.kind)?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if self.delete_topic {
            f.write_str(" DELETE TOPIC")?;
        }
        Ok(())
    }
}
