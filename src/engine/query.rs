//! Query submission type

use serde_json::Value;

use crate::transport::QueryParameter;

/// One logical query as the caller wrote it: dialect text plus bound
/// parameters. The engine treats the text as opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Query text with `@name` placeholders
    pub text: String,
    /// Values bound into the placeholders
    pub parameters: Vec<QueryParameter>,
}

impl Query {
    /// Creates a parameterless query
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: Vec::new(),
        }
    }

    /// Binds one named parameter
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.push(QueryParameter::new(name, value));
        self
    }
}
