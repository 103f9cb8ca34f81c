//! Loader for workspaces saved with the editor's JSON serializer.
//!
//! Fields and inputs keep their document order (`preserve_order`), which
//! the comment scrubber relies on when it walks nested value inputs.

use crate::blocks::{Block, ExtraState, FieldValue, InputKind, VariableModel, Workspace};
use crate::generators::{shape_of, Shape};
use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct RawVariable {
    name: String,
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawExtraState {
    item_count: Option<usize>,
    params: Vec<RawParam>,
    name: Option<String>,
    has_return_value: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawParam {
    Name(String),
    Named { name: String },
}

impl From<RawExtraState> for ExtraState {
    fn from(raw: RawExtraState) -> Self {
        Self {
            item_count: raw.item_count,
            params: raw
                .params
                .into_iter()
                .map(|param| match param {
                    RawParam::Name(name) | RawParam::Named { name } => name,
                })
                .collect(),
            name: raw.name,
            has_return_value: raw.has_return_value,
        }
    }
}

/// Parses a serialized workspace: `{"blocks": {"blocks": [...]},
/// "variables": [...]}`. A missing `blocks` section is an empty workspace.
pub fn workspace_from_json(text: &str) -> Result<Workspace> {
    let mut de = serde_json::Deserializer::from_str(text);
    // statement chains nest one level per block
    de.disable_recursion_limit();
    let root = Value::deserialize(&mut de).context("Invalid workspace JSON.")?;
    de.end().context("Trailing characters after workspace JSON.")?;

    let root = root
        .as_object()
        .ok_or_else(|| anyhow!("Workspace JSON must be an object."))?;

    let variables = match root.get("variables") {
        Some(node) => Vec::<RawVariable>::deserialize(node)
            .context("Invalid 'variables' array.")?
            .into_iter()
            .map(|raw| VariableModel {
                id: raw.id.unwrap_or_else(|| raw.name.clone()),
                name: raw.name,
            })
            .collect(),
        None => Vec::new(),
    };

    let mut top_blocks = Vec::new();
    if let Some(blocks) = root.get("blocks").and_then(|b| b.get("blocks")) {
        let blocks = blocks
            .as_array()
            .ok_or_else(|| anyhow!("'blocks.blocks' must be an array."))?;
        for (index, node) in blocks.iter().enumerate() {
            top_blocks.push(
                read_block(node).with_context(|| format!("Invalid top block #{}.", index))?,
            );
        }
    }
    debug!(
        "loaded JSON workspace with {} top block(s) and {} variable(s)",
        top_blocks.len(),
        variables.len()
    );
    Ok(Workspace {
        variables,
        top_blocks,
    })
}

fn read_block(node: &Value) -> Result<Block> {
    let obj = node
        .as_object()
        .ok_or_else(|| anyhow!("Block entry is not an object."))?;
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("Block missing 'type'."))?;
    let id = obj.get("id").and_then(Value::as_str).unwrap_or_default();
    let mut block = Block::new(kind, id);
    block.x = obj.get("x").and_then(Value::as_f64);
    block.y = obj.get("y").and_then(Value::as_f64);
    block.enabled = read_enabled(obj);
    block.comment = read_comment(obj);

    if let Some(fields) = obj.get("fields").and_then(Value::as_object) {
        for (name, value) in fields {
            block.fields.push((name.clone(), read_field(value)));
        }
    }

    if let Some(inputs) = obj.get("inputs").and_then(Value::as_object) {
        for (name, input) in inputs {
            let target = input.get("block").or_else(|| input.get("shadow"));
            let child = match target {
                Some(child) => Some(
                    read_block(child)
                        .with_context(|| format!("Invalid input '{}' of block '{}'.", name, id))?,
                ),
                None => None,
            };
            let input_kind = match child.as_ref().and_then(|c| shape_of(&c.kind)) {
                Some(Shape::Statement) => InputKind::Statement,
                _ => InputKind::Value,
            };
            block = block.with_input(name, input_kind, child);
        }
    }

    if let Some(next) = obj.get("next").and_then(|n| n.get("block")) {
        let next = read_block(next).with_context(|| format!("Invalid next block of '{}'.", id))?;
        block.next = Some(Box::new(next));
    }

    if let Some(extra) = obj.get("extraState") {
        block.extra = read_extra_state(extra, id)?;
    }
    Ok(block)
}

fn read_field(value: &Value) -> FieldValue {
    match value {
        Value::String(text) => FieldValue::Text(text.clone()),
        Value::Number(number) => FieldValue::Text(number.to_string()),
        Value::Bool(flag) => FieldValue::Text(if *flag { "TRUE" } else { "FALSE" }.to_string()),
        Value::Object(map) => FieldValue::Variable {
            id: map.get("id").and_then(Value::as_str).map(str::to_string),
            name: map.get("name").and_then(Value::as_str).map(str::to_string),
        },
        Value::Null => FieldValue::Text(String::new()),
        other => FieldValue::Text(other.to_string()),
    }
}

/// Newer files write `enabled: false` or `disabledReasons`, older ones
/// `disabled: true`.
fn read_enabled(obj: &Map<String, Value>) -> bool {
    if obj.get("enabled").and_then(Value::as_bool) == Some(false) {
        return false;
    }
    if obj.get("disabled").and_then(Value::as_bool) == Some(true) {
        return false;
    }
    !obj.get("disabledReasons")
        .and_then(Value::as_array)
        .is_some_and(|reasons| !reasons.is_empty())
}

fn read_comment(obj: &Map<String, Value>) -> Option<String> {
    let node = obj
        .get("icons")
        .and_then(|icons| icons.get("comment"))
        .or_else(|| obj.get("comment"))?;
    match node {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => map.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Blocks without a JSON state hook serialize their XML mutation as a
/// string instead of an object.
fn read_extra_state(extra: &Value, id: &str) -> Result<ExtraState> {
    match extra {
        Value::Object(_) => Ok(RawExtraState::deserialize(extra)
            .with_context(|| format!("Invalid extraState on block '{}'.", id))?
            .into()),
        Value::String(mutation) => crate::xml::extra_state_from_str(mutation)
            .with_context(|| format!("Invalid mutation on block '{}'.", id)),
        Value::Null => Ok(ExtraState::default()),
        other => bail!("Unexpected extraState {} on block '{}'.", other, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_fields_inputs_and_next_in_order() {
        let workspace = workspace_from_json(
            r#"{
                "blocks": {"languageVersion": 0, "blocks": [{
                    "type": "controls_repeat_ext", "id": "r", "x": 10, "y": 20,
                    "inputs": {
                        "TIMES": {"shadow": {"type": "math_number", "id": "n", "fields": {"NUM": 4}}},
                        "DO": {"block": {"type": "logo_move", "id": "m", "fields": {"OP": "FD"}}}
                    },
                    "next": {"block": {"type": "logo_pen", "id": "p", "fields": {"OP": "PU"}}}
                }]},
                "variables": [{"name": "size", "id": "v1"}]
            }"#,
        )
        .unwrap();
        assert_eq!(workspace.variables[0].id, "v1");
        let block = &workspace.top_blocks[0];
        assert_eq!(block.y, Some(20.0));
        assert_eq!(block.input("TIMES").unwrap().kind, InputKind::Value);
        assert_eq!(block.input_target("TIMES").unwrap().field_value("NUM"), "4");
        assert_eq!(block.input("DO").unwrap().kind, InputKind::Statement);
        assert_eq!(block.next_block().unwrap().id, "p");
    }

    #[test]
    fn reads_variable_fields_and_extra_state() {
        let workspace = workspace_from_json(
            r#"{"blocks": {"blocks": [
                {"type": "procedures_defnoreturn", "id": "d",
                 "fields": {"NAME": "go"},
                 "extraState": {"params": [{"name": "x", "id": "vx"}]}},
                {"type": "procedures_callnoreturn", "id": "c",
                 "extraState": {"name": "go", "params": ["x"]}},
                {"type": "variables_get", "id": "g", "fields": {"VAR": {"id": "vx"}}},
                {"type": "procedures_ifreturn", "id": "i",
                 "extraState": "<mutation value=\"0\"></mutation>"}
            ]}}"#,
        )
        .unwrap();
        let blocks = &workspace.top_blocks;
        assert_eq!(blocks[0].extra.params, vec!["x".to_string()]);
        assert_eq!(blocks[1].extra.name.as_deref(), Some("go"));
        assert_eq!(blocks[2].field_value("VAR"), "vx");
        assert_eq!(blocks[3].extra.has_return_value, Some(false));
    }

    #[test]
    fn reads_disabled_flags_and_comments() {
        let workspace = workspace_from_json(
            r#"{"blocks": {"blocks": [
                {"type": "logo_pen", "enabled": false},
                {"type": "logo_pen", "disabled": true},
                {"type": "logo_pen", "disabledReasons": ["MANUALLY_DISABLED"]},
                {"type": "logo_pen", "icons": {"comment": {"text": "note", "pinned": false}}}
            ]}}"#,
        )
        .unwrap();
        let blocks = &workspace.top_blocks;
        assert!(!blocks[0].enabled);
        assert!(!blocks[1].enabled);
        assert!(!blocks[2].enabled);
        assert!(blocks[3].enabled);
        assert_eq!(blocks[3].comment.as_deref(), Some("note"));
    }

    #[test]
    fn empty_document_is_an_empty_workspace() {
        let workspace = workspace_from_json("{}").unwrap();
        assert!(workspace.top_blocks.is_empty());
        assert!(workspace.variables.is_empty());
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(workspace_from_json("[1, 2]").is_err());
        assert!(workspace_from_json(r#"{"blocks": {"blocks": [{"id": "x"}]}}"#).is_err());
        assert!(workspace_from_json("{} trailing").is_err());
    }

    #[test]
    fn long_statement_chains_load() {
        let mut text = String::new();
        for _ in 0..150 {
            text.push_str(r#"{"type": "logo_pen", "fields": {"OP": "PD"}, "next": {"block": "#);
        }
        text.push_str(r#"{"type": "logo_pen", "fields": {"OP": "PU"}}"#);
        for _ in 0..150 {
            text.push_str("}}");
        }
        let document = format!(r#"{{"blocks": {{"blocks": [{}]}}}}"#, text);
        let workspace = workspace_from_json(&document).unwrap();
        assert_eq!(workspace.all_blocks().len(), 151);
    }
}
