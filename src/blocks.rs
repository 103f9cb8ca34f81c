//! The block graph consumed by the generator.
//!
//! Value inputs form a tree and statement inputs hold linked chains through
//! `next`, so the whole workspace is owned top-down and read-only during a
//! generation pass.

#[derive(Debug, Clone, PartialEq)]
pub struct VariableModel {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Variable {
        id: Option<String>,
        name: Option<String>,
    },
}

impl FieldValue {
    /// The raw value the host would report: the id of a variable reference,
    /// otherwise the text itself.
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Variable { id, name } => id
                .as_deref()
                .or(name.as_deref())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Value,
    Statement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub name: String,
    pub kind: InputKind,
    pub block: Option<Box<Block>>,
}

/// Mutator state carried by blocks whose shape depends on user edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraState {
    pub item_count: Option<usize>,
    /// Procedure parameter names, in declaration order.
    pub params: Vec<String>,
    /// Callee name recorded on procedure call blocks.
    pub name: Option<String>,
    pub has_return_value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: String,
    pub fields: Vec<(String, FieldValue)>,
    pub inputs: Vec<Input>,
    pub next: Option<Box<Block>>,
    pub comment: Option<String>,
    pub extra: ExtraState,
    pub enabled: bool,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Block {
    pub fn new(kind: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            fields: Vec::new(),
            inputs: Vec::new(),
            next: None,
            comment: None,
            extra: ExtraState::default(),
            enabled: true,
            x: None,
            y: None,
        }
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields
            .push((name.to_string(), FieldValue::Text(value.to_string())));
        self
    }

    pub fn with_variable(mut self, name: &str, var_id: &str) -> Self {
        self.fields.push((
            name.to_string(),
            FieldValue::Variable {
                id: Some(var_id.to_string()),
                name: None,
            },
        ));
        self
    }

    pub fn with_value(self, name: &str, child: Block) -> Self {
        self.with_input(name, InputKind::Value, Some(child))
    }

    pub fn with_statement(self, name: &str, child: Block) -> Self {
        self.with_input(name, InputKind::Statement, Some(child))
    }

    pub fn with_input(mut self, name: &str, kind: InputKind, child: Option<Block>) -> Self {
        self.inputs.push(Input {
            name: name.to_string(),
            kind,
            block: child.map(Box::new),
        });
        self
    }

    pub fn with_next(mut self, next: Block) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_extra(mut self, extra: ExtraState) -> Self {
        self.extra = extra;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_value(&self, name: &str) -> &str {
        self.field(name).map(FieldValue::as_str).unwrap_or_default()
    }

    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|input| input.name == name)
    }

    pub fn input_target(&self, name: &str) -> Option<&Block> {
        self.input(name).and_then(|input| input.block.as_deref())
    }

    pub fn next_block(&self) -> Option<&Block> {
        self.next.as_deref()
    }

    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    /// This block followed by every block reachable through its inputs and
    /// `next` link, depth first in input order.
    pub fn descendants(&self) -> Vec<&Block> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Block>) {
        out.push(self);
        for input in &self.inputs {
            if let Some(child) = input.block.as_deref() {
                child.collect_descendants(out);
            }
        }
        if let Some(next) = self.next.as_deref() {
            next.collect_descendants(out);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workspace {
    pub variables: Vec<VariableModel>,
    pub top_blocks: Vec<Block>,
}

impl Workspace {
    /// Top blocks in reading order: top to bottom, then left to right.
    pub fn ordered_top_blocks(&self) -> Vec<&Block> {
        let mut blocks = self.top_blocks.iter().collect::<Vec<_>>();
        blocks.sort_by(|a, b| {
            block_sort_key(a)
                .partial_cmp(&block_sort_key(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        blocks
    }

    pub fn all_blocks(&self) -> Vec<&Block> {
        self.ordered_top_blocks()
            .into_iter()
            .flat_map(Block::descendants)
            .collect()
    }
}

fn block_sort_key(block: &Block) -> (f64, f64) {
    (
        block.y.unwrap_or(f64::MAX),
        block.x.unwrap_or(f64::MAX),
    )
}
