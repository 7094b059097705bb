use std::sync::Arc;

use common::config::{EngineConfig, SessionOverrides};

use crate::ast::Statement;

/// A statement together with the text it was submitted as and the
/// configuration it is to be prepared under.
///
/// Values are immutable. Every `with_*` method returns a new value; the
/// statement tree is shared between copies.
#[derive(Debug, Clone)]
pub struct ConfiguredStatement {
    statement: Arc<Statement>,
    statement_text: String,
    overrides: SessionOverrides,
    config: Arc<EngineConfig>,
}

impl ConfiguredStatement {
    pub fn new(
        statement_text: impl Into<String>,
        statement: Arc<Statement>,
        overrides: SessionOverrides,
        config: Arc<EngineConfig>,
    ) -> Self {
        Self {
            statement,
            statement_text: statement_text.into(),
            overrides,
            config,
        }
    }

    /// Wraps `statement`, using its canonical rendering as the statement text.
    pub fn of(statement: Statement, overrides: SessionOverrides, config: EngineConfig) -> Self {
        let statement_text = statement.to_string();
        Self::new(statement_text, Arc::new(statement), overrides, Arc::new(config))
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn shared_statement(&self) -> &Arc<Statement> {
        &self.statement
    }

    pub fn statement_text(&self) -> &str {
        &self.statement_text
    }

    pub fn overrides(&self) -> &SessionOverrides {
        &self.overrides
    }

    pub fn config(&self) -> &Arc<EngineConfig> {
        &self.config
    }

    pub fn with_config(&self, config: EngineConfig) -> Self {
        Self {
            config: Arc::new(config),
            ..self.clone()
        }
    }

    pub fn with_overrides(&self, overrides: SessionOverrides) -> Self {
        Self {
            overrides,
            ..self.clone()
        }
    }

    /// Replaces the statement, keeping overrides and config.
    pub fn with_statement(&self, statement_text: impl Into<String>, statement: Statement) -> Self {
        Self {
            statement: Arc::new(statement),
            statement_text: statement_text.into(),
            overrides: self.overrides.clone(),
            config: Arc::clone(&self.config),
        }
    }

    /// True when both values wrap the very same statement instance.
    pub fn is_same_statement(&self, other: &ConfiguredStatement) -> bool {
        Arc::ptr_eq(&self.statement, &other.statement)
    }
}
