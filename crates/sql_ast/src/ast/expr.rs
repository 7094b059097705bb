use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{display_comma_separated, Ident, Literal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ComparisonOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::NotEq => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::LtEq => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::GtEq => ">=",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LogicalOperator {
    And,
    Or,
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        })
    }
}

/// Scalar expressions. Binary expressions always render parenthesised so the
/// canonical text never depends on operator precedence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Expr {
    Column {
        #[cfg_attr(feature = "serde", serde(default))]
        source: Option<Ident>,
        name: Ident,
    },
    Literal(Literal),
    Comparison {
        op: ComparisonOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Not(Box<Expr>),
    Function {
        name: Ident,
        args: Vec<Expr>,
    },
    /// `*` as a function argument, e.g. `COUNT(*)`.
    Wildcard,
}

impl Expr {
    pub fn column(name: &str) -> Self {
        Expr::Column {
            source: None,
            name: Ident::new(name),
        }
    }

    pub fn qualified(source: &str, name: &str) -> Self {
        Expr::Column {
            source: Some(Ident::new(source)),
            name: Ident::new(name),
        }
    }

    pub fn comparison(op: ComparisonOperator, left: Expr, right: Expr) -> Self {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn equals(left: Expr, right: Expr) -> Self {
        Self::comparison(ComparisonOperator::Eq, left, right)
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op: LogicalOperator::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn function(name: &str, args: Vec<Expr>) -> Self {
        Expr::Function {
            name: Ident::new(name),
            args,
        }
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column {
                source: Some(source),
                name,
            } => write!(f, "{source}.{name}"),
            Expr::Column { source: None, name } => write!(f, "{name}"),
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Comparison { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Logical { op, left, right } => write!(f, "({left} {op} {right})"),
            Expr::Not(inner) => write!(f, "(NOT {inner})"),
            Expr::Function { name, args } => write!(f, "{name}({})", display_comma_separated(args)),
            Expr::Wildcard => f.write_str("*"),
        }
    }
}
