//! HCL native syntax, parsed with `hcl-rs`.

use hcl::eval::{Context, Evaluate};
use hcl::{Body, Expression, Structure};
use serde_json::Value;

use crate::{Assignment, Error, Result, VariableBlock};

/// Evaluate an expression that must not depend on anything else.
///
/// References, function calls and interpolations of variables fail because
/// the evaluation context is empty.
fn literal(name: impl Into<String>, expr: &Expression) -> Result<Value> {
    let value = expr
        .evaluate(&Context::new())
        .map_err(|e| Error::NotLiteral {
            name: name.into(),
            message: e.to_string(),
        })?;
    Ok(serde_json::to_value(value)?)
}

pub(crate) fn variable_blocks(source: &str) -> Result<Vec<VariableBlock>> {
    let body: Body = hcl::parse(source)?;

    let mut blocks = Vec::new();
    for block in body.blocks().filter(|b| b.identifier() == "variable") {
        let [label] = block.labels() else {
            return Err(Error::shape(format!(
                "variable block must have exactly one label, found {}",
                block.labels().len()
            )));
        };
        let name = label.as_str().to_string();

        let default = block
            .body()
            .attributes()
            .find(|attr| attr.key() == "default")
            .map(|attr| literal(format!("default of variable {name}"), attr.expr()))
            .transpose()?;

        tracing::trace!(%name, has_default = default.is_some(), "Found variable block");
        blocks.push(VariableBlock { name, default });
    }
    Ok(blocks)
}

pub(crate) fn assignments(source: &str) -> Result<Vec<Assignment>> {
    let body: Body = hcl::parse(source)?;

    body.iter()
        .map(|structure| match structure {
            Structure::Attribute(attr) => Ok(Assignment {
                name: attr.key().to_string(),
                value: literal(attr.key(), attr.expr())?,
            }),
            Structure::Block(block) => Err(Error::shape(format!(
                "blocks are not allowed in a value file, found {}",
                block.identifier()
            ))),
        })
        .collect()
}
