//! JSON syntax: `*.tf.json` declarations and `*.tfvars.json` values.
//!
//! Both accept either a single top-level object or a list of objects,
//! so generated files may emit one block per list element.

use serde_json::{Map, Value};

use crate::{Assignment, Error, Result, VariableBlock};

fn top_level_objects(source: &str) -> Result<Vec<Map<String, Value>>> {
    match serde_json::from_str::<Value>(source)? {
        Value::Object(object) => Ok(vec![object]),
        Value::Array(elements) => elements
            .into_iter()
            .map(|element| match element {
                Value::Object(object) => Ok(object),
                other => Err(Error::shape(format!(
                    "expected a JSON object, found {}",
                    kind_of(&other)
                ))),
            })
            .collect(),
        other => Err(Error::shape(format!(
            "expected a JSON object or list of objects, found {}",
            kind_of(&other)
        ))),
    }
}

pub(crate) fn variable_blocks(source: &str) -> Result<Vec<VariableBlock>> {
    let mut blocks = Vec::new();

    for block in top_level_objects(source)? {
        let Some(variable) = block.get("variable") else {
            continue;
        };

        let groups: Vec<&Value> = match variable {
            Value::Array(groups) => groups.iter().collect(),
            single => vec![single],
        };

        for group in groups {
            let Value::Object(group) = group else {
                return Err(Error::shape(format!(
                    "variable must be an object, found {}",
                    kind_of(group)
                )));
            };
            for (name, body) in group {
                let Value::Object(body) = body else {
                    return Err(Error::shape(format!(
                        "variable {name} must be an object, found {}",
                        kind_of(body)
                    )));
                };
                blocks.push(VariableBlock {
                    name: name.clone(),
                    default: body.get("default").cloned(),
                });
            }
        }
    }
    Ok(blocks)
}

pub(crate) fn assignments(source: &str) -> Result<Vec<Assignment>> {
    Ok(top_level_objects(source)?
        .into_iter()
        .flatten()
        .map(|(name, value)| Assignment { name, value })
        .collect())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
