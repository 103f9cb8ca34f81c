//! The Logo generator facade: lifecycle hooks, the recursive block driver,
//! statement scrubbing, helper memoization and index adjustment.
//!
//! One [`LogoGenerator`] runs at most one generation pass at a time. All
//! per-pass state lives in [`PassState`], which `init` replaces and `finish`
//! takes, so nothing leaks between passes.

use crate::blocks::{Block, InputKind, Workspace};
use crate::error::{GenerateError, Result};
use crate::generators::{self, Emitter, Shape};
use crate::names::{NameType, Names};
use crate::order::{needs_parens, Order};
use crate::strings;
use log::{debug, trace, warn};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Stand-in for the final helper name inside a helper template.
pub const FUNCTION_NAME_PLACEHOLDER: &str = "{leCUI8hutHZI4480Dc}";

/// Procedure definitions share the definitions table with helpers; this
/// prefix keeps their keys apart.
const PROCEDURE_KEY_PREFIX: &str = "%";

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub one_based_index: bool,
    /// Snippet emitted before each statement; `%1` becomes the quoted block id.
    pub statement_prefix: Option<String>,
    pub statement_suffix: Option<String>,
    pub infinite_loop_trap: Option<String>,
    pub indent: String,
    pub comment_wrap: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            one_based_index: true,
            statement_prefix: None,
            statement_suffix: None,
            infinite_loop_trap: None,
            indent: "  ".to_string(),
            comment_wrap: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Code {
    Statement(String),
    Value(String, Order),
    /// The emitter registered its output elsewhere (procedure definitions).
    Hoisted,
}

#[derive(Debug, Default)]
struct PassState {
    names: Names,
    definitions: Vec<(String, String)>,
    /// Helper key to allocated name and the template it was built from.
    function_names: HashMap<String, (String, String)>,
}

pub struct LogoGenerator {
    options: GeneratorOptions,
    for_block: HashMap<String, Emitter>,
    state: PassState,
    initialized: bool,
}

impl Default for LogoGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl LogoGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        let for_block = generators::EMITTERS
            .iter()
            .map(|(kind, emitter)| (kind.to_string(), *emitter))
            .collect();
        Self {
            options,
            for_block,
            state: PassState::default(),
            initialized: false,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn register(&mut self, kind: &str, emitter: Emitter) {
        self.for_block.insert(kind.to_string(), emitter);
    }

    pub fn emitter(&self, kind: &str) -> Option<Emitter> {
        self.for_block.get(kind).copied()
    }

    /// Starts a generation pass: fresh definitions and a name database seeded
    /// with the workspace's variables and procedures.
    pub fn init(&mut self, workspace: &Workspace) {
        self.state = PassState::default();
        let names = &mut self.state.names;
        names.set_variable_map(&workspace.variables);
        for variable in &workspace.variables {
            names.get_name(&variable.id, NameType::Variable);
        }
        let mut procedure_count = 0usize;
        for block in workspace.ordered_top_blocks() {
            if is_procedure_definition(block) {
                names.get_name(block.field_value("NAME"), NameType::Procedure);
                procedure_count += 1;
            }
        }
        debug!(
            "logo generator initialized with {} variable(s) and {} procedure(s)",
            workspace.variables.len(),
            procedure_count
        );
        self.initialized = true;
    }

    /// Ends the pass: prepends every registered definition to `code` and
    /// releases all per-pass state.
    pub fn finish(&mut self, code: &str) -> String {
        let state = std::mem::take(&mut self.state);
        self.initialized = false;
        debug!(
            "logo generator finished with {} definition(s)",
            state.definitions.len()
        );
        let definitions = state
            .definitions
            .into_iter()
            .map(|(_, body)| body)
            .collect::<Vec<_>>();
        format!("{}\n\n\n{}", definitions.join("\n\n"), code)
    }

    fn abort(&mut self) {
        self.state = PassState::default();
        self.initialized = false;
    }

    pub fn workspace_to_code(&mut self, workspace: &Workspace) -> Result<String> {
        self.init(workspace);
        let lines = match self.top_blocks_to_code(workspace) {
            Ok(lines) => lines,
            Err(err) => {
                self.abort();
                return Err(err);
            }
        };
        let code = self.finish(&lines.join("\n"));
        Ok(normalize_whitespace(&code))
    }

    fn top_blocks_to_code(&mut self, workspace: &Workspace) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for block in workspace.ordered_top_blocks() {
            let mut line = match self.block_to_code(Some(block), false)? {
                Code::Statement(code) => code,
                Code::Value(code, _) => code,
                Code::Hoisted => String::new(),
            };
            if line.is_empty() {
                continue;
            }
            if self.shape_of(block) == Some(Shape::Value) {
                line = self.scrub_naked_value(&line);
                if !self.suppresses_prefix_suffix(block) {
                    if let Some(prefix) = self.injected_prefix(block) {
                        line = prefix + &line;
                    }
                    if let Some(suffix) = self.injected_suffix(block) {
                        line.push_str(&suffix);
                    }
                }
            }
            lines.push(line);
        }
        Ok(lines)
    }

    pub fn block_to_code(&mut self, block: Option<&Block>, this_only: bool) -> Result<Code> {
        self.emit_block(block, this_only, false)
    }

    fn emit_block(&mut self, block: Option<&Block>, this_only: bool, plugged: bool) -> Result<Code> {
        if !self.initialized {
            warn!("logo generator used before init; names and helpers will not be reset");
        }
        let Some(block) = block else {
            return Ok(Code::Statement(String::new()));
        };
        if !block.enabled {
            if this_only {
                return Ok(Code::Statement(String::new()));
            }
            return self.emit_block(block.next_block(), false, plugged);
        }
        let emitter = self
            .emitter(&block.kind)
            .ok_or_else(|| GenerateError::UnknownBlockType(block.kind.clone()))?;
        trace!("emitting block '{}' ({})", block.id, block.kind);
        match (emitter.emit)(block, self)? {
            Code::Value(code, order) => {
                if emitter.shape != Shape::Value {
                    return Err(GenerateError::ExpectedStatement(block.kind.clone()));
                }
                let code = self.scrub(block, &code, this_only, plugged)?;
                Ok(Code::Value(code, order))
            }
            Code::Statement(mut code) => {
                if !emitter.suppress_prefix_suffix {
                    if let Some(prefix) = self.injected_prefix(block) {
                        code = prefix + &code;
                    }
                    if let Some(suffix) = self.injected_suffix(block) {
                        code.push_str(&suffix);
                    }
                }
                Ok(Code::Statement(self.scrub(block, &code, this_only, plugged)?))
            }
            Code::Hoisted => Ok(Code::Statement(String::new())),
        }
    }

    /// Code for the block plugged into value input `name`, parenthesized if
    /// its order is too loose for `outer`. Empty when nothing is connected.
    pub fn value_to_code(&mut self, block: &Block, name: &str, outer: Order) -> Result<String> {
        let Some(target) = block.input_target(name) else {
            return Ok(String::new());
        };
        let (code, inner) = match self.emit_block(Some(target), false, true)? {
            Code::Value(code, inner) => (code, inner),
            Code::Statement(code) if code.is_empty() => return Ok(String::new()),
            _ => return Err(GenerateError::ExpectedValue(target.kind.clone())),
        };
        if code.is_empty() {
            return Ok(code);
        }
        if needs_parens(outer, inner) {
            Ok(format!("({})", code))
        } else {
            Ok(code)
        }
    }

    pub fn statement_to_code(&mut self, block: &Block, name: &str) -> Result<String> {
        let code = self.statement_chain(block.input_target(name))?;
        if code.is_empty() {
            return Ok(code);
        }
        Ok(strings::prefix_lines(&code, &self.options.indent))
    }

    fn statement_chain(&mut self, block: Option<&Block>) -> Result<String> {
        match self.emit_block(block, false, false)? {
            Code::Statement(code) => Ok(code),
            Code::Hoisted => Ok(String::new()),
            Code::Value(..) => Err(GenerateError::ExpectedStatement(
                block.map(|b| b.kind.clone()).unwrap_or_default(),
            )),
        }
    }

    /// Prepends the block's comments (and those of its unplugged value
    /// children) and appends the code of the next statement.
    pub fn scrub(&mut self, block: &Block, code: &str, this_only: bool, plugged: bool) -> Result<String> {
        let mut comment_code = String::new();
        if !plugged {
            if let Some(comment) = block.comment_text() {
                let wrapped = strings::wrap(comment, self.options.comment_wrap.saturating_sub(3));
                comment_code.push_str(&strings::prefix_lines(&(wrapped + "\n"), "; "));
            }
            for input in &block.inputs {
                if input.kind != InputKind::Value {
                    continue;
                }
                if let Some(child) = input.block.as_deref() {
                    let nested = all_nested_comments(child);
                    if !nested.is_empty() {
                        comment_code.push_str(&strings::prefix_lines(&nested, "; "));
                    }
                }
            }
        }
        let next_code = if this_only {
            String::new()
        } else {
            self.statement_chain(block.next_block())?
        };
        Ok(format!("{}{}{}", comment_code, code, next_code))
    }

    /// Top-level values need a consumer to be legal Logo.
    pub fn scrub_naked_value(&self, line: &str) -> String {
        format!("ignore {}\n", line)
    }

    pub fn quote(&self, text: &str) -> String {
        strings::quote(text)
    }

    pub fn multiline_quote(&self, text: &str) -> String {
        strings::multiline_quote(text)
    }

    pub fn indent(&self) -> &str {
        &self.options.indent
    }

    pub fn inject_id(&self, snippet: &str, block: &Block) -> String {
        snippet.replace("%1", &format!("'{}'", block.id))
    }

    pub fn injected_prefix(&self, block: &Block) -> Option<String> {
        self.options
            .statement_prefix
            .as_deref()
            .map(|s| self.inject_id(s, block))
    }

    pub fn injected_suffix(&self, block: &Block) -> Option<String> {
        self.options
            .statement_suffix
            .as_deref()
            .map(|s| self.inject_id(s, block))
    }

    pub fn injected_loop_trap(&self, block: &Block) -> Option<String> {
        self.options
            .infinite_loop_trap
            .as_deref()
            .map(|s| self.inject_id(s, block))
    }

    /// Wraps a loop body with the loop trap, the suffix at the top and the
    /// prefix at the bottom.
    pub fn add_loop_trap(&self, branch: &str, block: &Block) -> String {
        let mut branch = branch.to_string();
        let indent = &self.options.indent;
        if let Some(trap) = self.injected_loop_trap(block) {
            branch = strings::prefix_lines(&trap, indent) + &branch;
        }
        if !self.suppresses_prefix_suffix(block) {
            if let Some(suffix) = self.injected_suffix(block) {
                branch = strings::prefix_lines(&suffix, indent) + &branch;
            }
            if let Some(prefix) = self.injected_prefix(block) {
                branch.push_str(&strings::prefix_lines(&prefix, indent));
            }
        }
        branch
    }

    fn shape_of(&self, block: &Block) -> Option<Shape> {
        self.emitter(&block.kind).map(|e| e.shape)
    }

    fn suppresses_prefix_suffix(&self, block: &Block) -> bool {
        self.emitter(&block.kind)
            .map(|e| e.suppress_prefix_suffix)
            .unwrap_or(false)
    }

    pub fn variable_name(&mut self, name_or_id: &str) -> String {
        self.state.names.get_name(name_or_id, NameType::Variable)
    }

    pub fn procedure_name(&mut self, name: &str) -> String {
        self.state.names.get_name(name, NameType::Procedure)
    }

    /// Registers a helper procedure once per pass and returns its name.
    /// `lines` may use [`FUNCTION_NAME_PLACEHOLDER`] for the name and
    /// two-space steps for indentation. A later call with the same key keeps
    /// the first body.
    pub fn provide_function(&mut self, key: &str, lines: &[&str]) -> String {
        let template = lines.join("\n");
        if let Some((name, first_template)) = self.state.function_names.get(key) {
            if *first_template != template {
                debug!("helper '{}' requested with a different body; keeping the first", key);
            }
            return name.clone();
        }
        let name = self.state.names.get_distinct_name(key);
        let body = reindent(
            &template.replace(FUNCTION_NAME_PLACEHOLDER, &name),
            &self.options.indent,
        );
        debug!("registered helper '{}' as '{}'", key, name);
        self.state.definitions.push((key.to_string(), body));
        self.state
            .function_names
            .insert(key.to_string(), (name.clone(), template));
        name
    }

    pub fn define_procedure(&mut self, name: &str, code: String) {
        let key = format!("{}{}", PROCEDURE_KEY_PREFIX, name);
        debug!("hoisted procedure '{}'", name);
        if let Some(slot) = self.state.definitions.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = code;
        } else {
            self.state.definitions.push((key, code));
        }
    }

    /// Translates the index in input `at_id` into Logo's one-based index,
    /// adding `delta` and optionally negating it. Literal indices are folded
    /// now; dynamic ones get explicit arithmetic, parenthesized unless
    /// `order` is strictly looser than the arithmetic.
    pub fn get_adjusted(
        &mut self,
        block: &Block,
        at_id: &str,
        delta: i64,
        negate: bool,
        order: Order,
    ) -> Result<String> {
        let mut delta = delta;
        if !self.options.one_based_index {
            delta += 1;
        }
        let default_at = if self.options.one_based_index { "1" } else { "0" };

        let order_for_input = if delta > 0 {
            Order::Addition
        } else if delta < 0 {
            Order::Subtraction
        } else if negate {
            Order::UnaryNegation
        } else {
            order
        };

        let mut at = self.value_to_code(block, at_id, order_for_input)?;
        if at.is_empty() {
            at = default_at.to_string();
        }

        if delta == 0 && !negate {
            return Ok(at);
        }
        if strings::is_number(&at) {
            let mut value = strings::parse_number(&at) + delta as f64;
            if negate {
                value = -value;
            }
            return Ok(strings::format_number(value));
        }
        if delta > 0 {
            at = format!("{} + {}", at, delta);
        } else if delta < 0 {
            at = format!("{} - {}", at, -delta);
        }
        if negate {
            at = if delta != 0 {
                format!("-({})", at)
            } else {
                format!("-{}", at)
            };
        }
        if order.class() <= order_for_input.class() {
            at = format!("({})", at);
        }
        Ok(at)
    }
}

fn is_procedure_definition(block: &Block) -> bool {
    matches!(
        block.kind.as_str(),
        "procedures_defreturn" | "procedures_defnoreturn"
    )
}

/// The comments of a block and all of its descendants, one per line, with a
/// trailing newline when there are any.
fn all_nested_comments(block: &Block) -> String {
    let mut comments = block
        .descendants()
        .into_iter()
        .filter_map(Block::comment_text)
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    if !comments.is_empty() {
        comments.push(String::new());
    }
    comments.join("\n")
}

/// Re-expresses leading two-space indentation steps in the configured unit.
fn reindent(code: &str, indent: &str) -> String {
    if indent == "  " {
        return code.to_string();
    }
    code.split('\n')
        .map(|line| {
            let leading = line.len() - line.trim_start_matches(' ').len();
            format!(
                "{}{}{}",
                indent.repeat(leading / 2),
                " ".repeat(leading % 2),
                &line[leading..]
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize_whitespace(code: &str) -> String {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    static TRAILING: OnceLock<Regex> = OnceLock::new();
    static LINE_END: OnceLock<Regex> = OnceLock::new();
    let leading = LEADING.get_or_init(|| Regex::new(r"^\s+\n").expect("valid leading pattern"));
    let trailing = TRAILING.get_or_init(|| Regex::new(r"\n\s+$").expect("valid trailing pattern"));
    let line_end = LINE_END.get_or_init(|| Regex::new(r"[ \t]+\n").expect("valid line-end pattern"));
    let code = leading.replace(code, "");
    let code = trailing.replace(&code, "\n");
    line_end.replace_all(&code, "\n").into_owned()
}
