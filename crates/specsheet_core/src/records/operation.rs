//! Operations and their parameters.

use serde::Serialize;
use url::Url;

use super::cardinality::Cardinality;

/// An operation row together with the parameter rows that follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub name: String,
    /// `system`, `type` and/or `instance`.
    pub operation_use: Option<String>,
    /// `operation` or `query`.
    pub operation_type: Option<String>,
    pub title: Option<String>,
    pub documentation: Option<String>,
    pub footer: Option<String>,
    pub parameters: Vec<OperationParameter>,
}

impl Operation {
    pub fn inputs(&self) -> impl Iterator<Item = &OperationParameter> {
        self.parameters.iter().filter(|p| p.is_input())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &OperationParameter> {
        self.parameters.iter().filter(|p| !p.is_input())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OperationParameter {
    /// Name without the operation prefix; nested parts keep their dots.
    pub name: String,
    /// `in` or `out`.
    pub parameter_use: Option<String>,
    pub cardinality: Cardinality,
    pub parameter_type: Option<String>,
    pub profile: Option<Url>,
    pub documentation: Option<String>,
}

impl OperationParameter {
    pub fn is_input(&self) -> bool {
        self.parameter_use
            .as_deref()
            .is_some_and(|u| u.eq_ignore_ascii_case("in"))
    }
}
