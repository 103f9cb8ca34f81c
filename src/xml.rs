//! Loader for workspaces saved in the editor's XML format.

use crate::blocks::{Block, ExtraState, FieldValue, InputKind, VariableModel, Workspace};
use anyhow::{anyhow, Context, Result};
use log::debug;
use xmltree::{Element, XMLNode};

pub fn workspace_from_xml(text: &str) -> Result<Workspace> {
    let root = Element::parse(text.as_bytes())
        .map_err(|e| anyhow!("Invalid workspace XML: {}.", e))?;
    let mut workspace = Workspace::default();
    for child in child_elements(&root) {
        match child.name.as_str() {
            "variables" => {
                for variable in child_elements(child).filter(|e| e.name == "variable") {
                    let name = element_text(variable);
                    let id = variable
                        .attributes
                        .get("id")
                        .cloned()
                        .unwrap_or_else(|| name.clone());
                    workspace.variables.push(VariableModel { id, name });
                }
            }
            "block" => {
                let index = workspace.top_blocks.len();
                workspace.top_blocks.push(
                    read_block(child).with_context(|| format!("Invalid top block #{}.", index))?,
                );
            }
            _ => {}
        }
    }
    debug!(
        "loaded XML workspace with {} top block(s) and {} variable(s)",
        workspace.top_blocks.len(),
        workspace.variables.len()
    );
    Ok(workspace)
}

/// Parses a standalone `<mutation>` element.
pub fn extra_state_from_str(text: &str) -> Result<ExtraState> {
    let mutation = Element::parse(text.as_bytes())
        .map_err(|e| anyhow!("Invalid mutation XML: {}.", e))?;
    Ok(read_mutation(&mutation))
}

fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(XMLNode::as_element)
}

fn element_text(element: &Element) -> String {
    element
        .get_text()
        .map(|text| text.into_owned())
        .unwrap_or_default()
}

fn attribute<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attributes.get(name).map(String::as_str)
}

fn read_block(element: &Element) -> Result<Block> {
    let kind = attribute(element, "type").ok_or_else(|| anyhow!("Block missing 'type'."))?;
    let id = attribute(element, "id").unwrap_or_default();
    let mut block = Block::new(kind, id);
    block.x = attribute(element, "x").and_then(|x| x.parse().ok());
    block.y = attribute(element, "y").and_then(|y| y.parse().ok());
    block.enabled = attribute(element, "disabled") != Some("true")
        && attribute(element, "disabled-reasons").map_or(true, str::is_empty);

    for child in child_elements(element) {
        match child.name.as_str() {
            "field" => {
                let name = attribute(child, "name").unwrap_or_default().to_string();
                let text = element_text(child);
                let value = match attribute(child, "id") {
                    Some(var_id) => FieldValue::Variable {
                        id: Some(var_id.to_string()),
                        name: Some(text),
                    },
                    None => FieldValue::Text(text),
                };
                block.fields.push((name, value));
            }
            "value" | "statement" => {
                let name = attribute(child, "name").unwrap_or_default();
                let kind = if child.name == "value" {
                    InputKind::Value
                } else {
                    InputKind::Statement
                };
                let target = child
                    .get_child("block")
                    .or_else(|| child.get_child("shadow"));
                let target = match target {
                    Some(target) => Some(read_block(target).with_context(|| {
                        format!("Invalid input '{}' of block '{}'.", name, id)
                    })?),
                    None => None,
                };
                block = block.with_input(name, kind, target);
            }
            "next" => {
                if let Some(next) = child.get_child("block") {
                    let next = read_block(next)
                        .with_context(|| format!("Invalid next block of '{}'.", id))?;
                    block.next = Some(Box::new(next));
                }
            }
            "mutation" => block.extra = read_mutation(child),
            "comment" => block.comment = Some(element_text(child)),
            _ => {}
        }
    }
    Ok(block)
}

fn read_mutation(mutation: &Element) -> ExtraState {
    ExtraState {
        item_count: attribute(mutation, "items").and_then(|n| n.parse().ok()),
        params: child_elements(mutation)
            .filter(|e| e.name == "arg")
            .filter_map(|arg| attribute(arg, "name"))
            .map(str::to_string)
            .collect(),
        name: attribute(mutation, "name").map(str::to_string),
        has_return_value: attribute(mutation, "value").map(|v| v == "1"),
    }
}
