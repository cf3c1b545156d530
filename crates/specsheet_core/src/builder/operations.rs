//! The Operations tab: operation rows, each followed by its parameters.

use super::cells::RowReader;
use super::TabBuild;
use crate::error::FieldError;
use crate::records::{Cardinality, Operation, OperationParameter};

const OPERATION_USES: &[&str] = &["system", "type", "instance"];
const PARAMETER_USES: &[&str] = &["in", "out"];

/// Splits `operation.parameter` into its two halves.
fn split_parameter_name(name: &str) -> Option<(&str, &str)> {
    name.split_once('.')
}

fn read_operation(reader: &mut RowReader<'_>) -> Operation {
    for column in ["Type", "Title", "Documentation"] {
        reader.require(column);
    }

    // An operation may apply at several levels, e.g. "type | instance".
    let operation_use = reader.text("Use");
    if let Some(u) = operation_use.as_deref() {
        let valid = u
            .split('|')
            .map(str::trim)
            .all(|level| OPERATION_USES.iter().any(|o| o.eq_ignore_ascii_case(level)));
        if !valid {
            reader.reject("Use", u, "operation use must be system, type or instance");
        }
    }

    Operation {
        name: reader.text("Name").unwrap_or_default(),
        operation_use,
        operation_type: reader.text("Type"),
        title: reader.text("Title"),
        documentation: reader.text("Documentation"),
        footer: reader.text("Footer"),
        parameters: Vec::new(),
    }
}

fn read_parameter(reader: &mut RowReader<'_>, name: &str) -> OperationParameter {
    reader.require("Min");
    reader.require("Max");

    let parameter_use = reader.text("Use");
    if let Some(u) = parameter_use.as_deref() {
        if !PARAMETER_USES.iter().any(|p| p.eq_ignore_ascii_case(u)) {
            reader.reject("Use", u, "parameter use must be in or out");
        }
    }

    let min = reader.count("Min");
    let max = match reader.value("Max") {
        None | Some("*") => None,
        Some(max) => match max.parse::<u32>() {
            Ok(n) => Some(n),
            Err(_) => {
                reader.reject("Max", max, "expected a non-negative integer or *");
                None
            }
        },
    };
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            reader.reject("Max", &hi.to_string(), "maximum is below the minimum");
        }
    }

    OperationParameter {
        name: name.to_string(),
        parameter_use,
        cardinality: Cardinality::new(min, max),
        parameter_type: reader.text("Type"),
        profile: reader.url("Profile"),
        documentation: reader.text("Documentation"),
    }
}

enum OperationRow {
    Operation(Operation),
    Parameter {
        operation: String,
        parameter: OperationParameter,
    },
}

/// Groups parameter rows under the operation row above them.
///
/// A parameter whose prefix does not name that operation, or that has no
/// operation above it at all, is reported and left out of the records.
pub(super) fn build(build: &mut TabBuild<'_>) -> Vec<Operation> {
    let rows = build.each_row(|reader| {
        match reader.value("Name").and_then(split_parameter_name) {
            Some((operation, parameter)) => OperationRow::Parameter {
                operation: operation.to_string(),
                parameter: read_parameter(reader, parameter),
            },
            None => OperationRow::Operation(read_operation(reader)),
        }
    });

    let indices: Vec<usize> = build.rows().map(|(index, _)| index).collect();
    let mut operations: Vec<Operation> = Vec::new();
    for (row, index) in rows.into_iter().zip(indices) {
        let (operation, parameter) = match row {
            OperationRow::Operation(operation) => {
                operations.push(operation);
                continue;
            }
            OperationRow::Parameter { operation, parameter } => (operation, parameter),
        };
        let error = match operations.last_mut() {
            Some(owner) if owner.name == operation => {
                owner.parameters.push(parameter);
                continue;
            }
            Some(_) => FieldError::ParameterOperationMismatch {
                parameter: parameter.name,
                operation,
            },
            None => FieldError::OrphanParameter {
                parameter: parameter.name,
            },
        };
        build.record_errors(Some(index), vec![error]);
    }
    operations
}
