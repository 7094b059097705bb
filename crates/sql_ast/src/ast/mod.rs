mod ddl;
mod expr;
mod properties;
mod query;
mod value;

use core::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use common::types::SourceKind;
pub use ddl::{CreateAsSelect, CreateSource, DropSource, InsertInto, TableElement};
pub use expr::{ComparisonOperator, Expr, LogicalOperator};
pub use properties::{
    Properties, KAFKA_TOPIC_NAME_PROPERTY, KEY_PROPERTY, PARTITIONS_PROPERTY, REPLICAS_PROPERTY,
    VALUE_FORMAT_PROPERTY,
};
pub use query::{
    AliasedRelation, Join, JoinType, Query, Relation, SelectItem, TimeUnit, WindowDuration,
    WindowExpression, WithinExpression,
};
pub use value::{escape_single_quote_string, Literal};

pub(crate) struct DisplaySeparated<'a, T: fmt::Display> {
    slice: &'a [T],
    sep: &'static str,
}

impl<T: fmt::Display> fmt::Display for DisplaySeparated<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut delim = "";
        for t in self.slice {
            write!(f, "{delim}")?;
            delim = self.sep;
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

pub(crate) fn display_comma_separated<T: fmt::Display>(slice: &[T]) -> DisplaySeparated<'_, T> {
    DisplaySeparated { slice, sep: ", " }
}

/// An identifier. Unquoted identifiers are case-insensitive and fold to upper
/// case, quoted ones keep their spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "IdentRepr")
)]
pub struct Ident {
    pub value: String,
    pub quoted: bool,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }

    /// The name the catalog knows this identifier by.
    pub fn normalized(&self) -> String {
        if self.quoted {
            self.value.clone()
        } else {
            self.value.to_uppercase()
        }
    }
}

impl From<&str> for Ident {
    fn from(value: &str) -> Self {
        Ident::new(value)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "`{}`", self.value.replace('`', "``"))
        } else {
            f.write_str(&self.value.to_uppercase())
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum IdentRepr {
    Plain(String),
    Full {
        value: String,
        #[serde(default)]
        quoted: bool,
    },
}

#[cfg(feature = "serde")]
impl From<IdentRepr> for Ident {
    fn from(repr: IdentRepr) -> Self {
        match repr {
            IdentRepr::Plain(value) => Ident::new(value),
            IdentRepr::Full { value, quoted } => Ident { value, quoted },
        }
    }
}

/// Top level statements understood by the preparation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Statement {
    CreateAsSelect(CreateAsSelect),
    CreateSource(CreateSource),
    InsertInto(InsertInto),
    Query(Arc<Query>),
    DropSource(DropSource),
    ListProperties,
    ListTopics,
    ListStreams,
    ListTables,
    SetProperty { name: String, value: String },
    UnsetProperty { name: String },
}

impl Statement {
    pub fn as_create_as_select(&self) -> Option<&CreateAsSelect> {
        match self {
            Statement::CreateAsSelect(cas) => Some(cas),
            _ => None,
        }
    }

    pub fn is_create_as_select(&self) -> bool {
        matches!(self, Statement::CreateAsSelect(_))
    }
}

impl From<CreateAsSelect> for Statement {
    fn from(value: CreateAsSelect) -> Self {
        Statement::CreateAsSelect(value)
    }
}

impl From<CreateSource> for Statement {
    fn from(value: CreateSource) -> Self {
        Statement::CreateSource(value)
    }
}

impl From<InsertInto> for Statement {
    fn from(value: InsertInto) -> Self {
        Statement::InsertInto(value)
    }
}

impl From<Query> for Statement {
    fn from(value: Query) -> Self {
        Statement::Query(Arc::new(value))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::CreateAsSelect(cas) => write!(f, "{cas}")?,
            Statement::CreateSource(create) => write!(f, "{create}")?,
            Statement::InsertInto(insert) => write!(f, "{insert}")?,
            Statement::Query(query) => write!(f, "{query}")?,
            Statement::DropSource(drop) => write!(f, "{drop}")?,
            Statement::ListProperties => f.write_str("LIST PROPERTIES")?,
            Statement::ListTopics => f.write_str("LIST TOPICS")?,
            Statement::ListStreams => f.write_str("LIST STREAMS")?,
            Statement::ListTables => f.write_str("LIST TABLES")?,
            Statement::SetProperty { name, value } => write!(
                f,
                "SET '{}' = '{}'",
                escape_single_quote_string(name),
                escape_single_quote_string(value)
            )?,
            Statement::UnsetProperty { name } => {
                write!(f, "UNSET '{}'", escape_single_quote_string(name))?
            }
        }
        f.write_str(";")
    }
}
