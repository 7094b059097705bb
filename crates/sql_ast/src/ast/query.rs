use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{display_comma_separated, Expr, Ident};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SelectItem {
    Wildcard,
    QualifiedWildcard(Ident),
    Expr {
        expr: Expr,
        #[cfg_attr(feature = "serde", serde(default))]
        alias: Option<Ident>,
    },
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::Wildcard => f.write_str("*"),
            SelectItem::QualifiedWildcard(source) => write!(f, "{source}.*"),
            SelectItem::Expr { expr, alias: None } => write!(f, "{expr}"),
            SelectItem::Expr {
                expr,
                alias: Some(alias),
            } => write!(f, "{expr} AS {alias}"),
        }
    }
}

/// A named relation. The alias defaults to the relation's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AliasedRelation {
    pub name: Ident,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alias: Option<Ident>,
}

impl AliasedRelation {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<Ident>, alias: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn alias_or_name(&self) -> &Ident {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

impl fmt::Display for AliasedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.alias_or_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum JoinType {
    Inner,
    Left,
    Outer,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT OUTER",
            JoinType::Outer => "FULL OUTER",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeUnit::Milliseconds => "MILLISECONDS",
            TimeUnit::Seconds => "SECONDS",
            TimeUnit::Minutes => "MINUTES",
            TimeUnit::Hours => "HOURS",
            TimeUnit::Days => "DAYS",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowDuration {
    pub value: u64,
    pub unit: TimeUnit,
}

impl WindowDuration {
    pub fn new(value: u64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for WindowDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WindowExpression {
    Tumbling {
        size: WindowDuration,
    },
    Hopping {
        size: WindowDuration,
        advance_by: WindowDuration,
    },
    Session {
        gap: WindowDuration,
    },
}

impl fmt::Display for WindowExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowExpression::Tumbling { size } => write!(f, "TUMBLING (SIZE {size})"),
            WindowExpression::Hopping { size, advance_by } => {
                write!(f, "HOPPING (SIZE {size}, ADVANCE BY {advance_by})")
            }
            WindowExpression::Session { gap } => write!(f, "SESSION ({gap})"),
        }
    }
}

/// Join window for stream-stream joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithinExpression {
    pub before: WindowDuration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub after: Option<WindowDuration>,
}

impl fmt::Display for WithinExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.after {
            Some(after) => write!(f, "WITHIN ({}, {after})", self.before),
            None => write!(f, "WITHIN {}", self.before),
        }
    }
}

/// Joins are left-deep: the right side is always a named relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Join {
    pub join_type: JoinType,
    pub left: Relation,
    pub right: AliasedRelation,
    pub criteria: Expr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub within: Option<WithinExpression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Relation {
    Table(AliasedRelation),
    Join(Box<Join>),
}

impl Relation {
    pub fn table(name: &str) -> Self {
        Relation::Table(AliasedRelation::new(name))
    }

    pub fn join(
        join_type: JoinType,
        left: Relation,
        right: AliasedRelation,
        criteria: Expr,
    ) -> Self {
        Relation::Join(Box::new(Join {
            join_type,
            left,
            right,
            criteria,
            within: None,
        }))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Table(table) => write!(f, "{table}"),
            Relation::Join(join) => {
                write!(f, "{}\n{} JOIN {}", join.left, join.join_type, join.right)?;
                if let Some(within) = &join.within {
                    write!(f, " {within}")?;
                }
                write!(f, " ON ({})", join.criteria)
            }
        }
    }
}

/// A `SELECT` query. Every clause after the projection starts on its own line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Query {
    pub projection: Vec<SelectItem>,
    pub from: Relation,
    #[cfg_attr(feature = "serde", serde(default))]
    pub window: Option<WindowExpression>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub selection: Option<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub group_by: Vec<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub having: Option<Expr>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub limit: Option<u64>,
}

impl Query {
    pub fn select_all(from: Relation) -> Self {
        Self {
            projection: vec![SelectItem::Wildcard],
            from,
            window: None,
            selection: None,
            group_by: Vec::new(),
            having: None,
            limit: None,
        }
    }

    pub fn with_window(mut self, window: WindowExpression) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_selection(mut self, selection: Expr) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_group_by(mut self, group_by: Vec<Expr>) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn is_windowed(&self) -> bool {
        self.window.is_some()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {}", display_comma_separated(&self.projection))?;
        write!(f, "\nFROM {}", self.from)?;
        if let Some(window) = &self.window {
            write!(f, "\nWINDOW {window}")?;
        }
        if let Some(selection) = &self.selection {
            write!(f, "\nWHERE {selection}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, "\nGROUP BY {}", display_comma_separated(&self.group_by))?;
        }
        if let Some(having) = &self.having {
            write!(f, "\nHAVING {having}")?;
        }
        if let Some(limit) = self.limit {
            write!(f, "\nLIMIT {limit}")?;
        }
        Ok(())
    }
}
