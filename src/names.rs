//! Allocation of collision-free Logo identifiers for user variables,
//! procedures and generated helper procedures.
//!
//! Logo resolves names case-insensitively, so both the per-category lookup
//! and the set of names already handed out compare lowercased text.

use crate::blocks::VariableModel;
use std::collections::{HashMap, HashSet};

/// Logo primitives a user name must never shadow.
pub const RESERVED_WORDS: &[&str] = &[
    "abs", "and", "arccos", "arcsin", "arctan", "back", "bf", "bk", "bl", "butfirst",
    "butlast", "cascade", "clean", "clearscreen", "cos", "count", "cs", "definedp",
    "difference", "emptyp", "end", "equalp", "exp", "false", "fd", "fill", "filter", "find",
    "first", "for", "foreach", "forever", "forward", "fput", "home", "if", "ifelse", "ignore",
    "int", "item", "left", "list", "listp", "ln", "local", "localmake", "log10", "lowercase",
    "lput", "lt", "make", "map", "memberp", "modulo", "not", "numberp", "op", "or", "output",
    "pd", "pendown", "penup", "pi", "pick", "power", "pr", "print", "product", "pu",
    "quotient", "random", "readword", "reduce", "remainder", "repeat", "reverse", "right",
    "round", "rt", "run", "se", "sentence", "setpc", "show", "sin", "sort", "sqrt", "stop",
    "sum", "tan", "thing", "to", "true", "type", "until", "uppercase", "while", "word",
    "wordp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameType {
    Variable,
    Procedure,
}

#[derive(Debug, Clone)]
pub struct Names {
    reserved: HashSet<String>,
    db: HashMap<NameType, HashMap<String, String>>,
    taken: HashSet<String>,
    variables: HashMap<String, String>,
}

impl Default for Names {
    fn default() -> Self {
        Self::new(RESERVED_WORDS)
    }
}

impl Names {
    pub fn new(reserved: &[&str]) -> Self {
        Self {
            reserved: reserved.iter().map(|w| w.to_lowercase()).collect(),
            db: HashMap::new(),
            taken: HashSet::new(),
            variables: HashMap::new(),
        }
    }

    /// Forgets every allocated name. Reserved words stay reserved.
    pub fn reset(&mut self) {
        self.db.clear();
        self.taken.clear();
        self.variables.clear();
    }

    pub fn set_variable_map(&mut self, variables: &[VariableModel]) {
        self.variables = variables
            .iter()
            .map(|v| (v.id.clone(), v.name.clone()))
            .collect();
    }

    /// The stable target name for a user name (or variable id) within one
    /// category. Repeated calls return the same identifier.
    pub fn get_name(&mut self, name_or_id: &str, kind: NameType) -> String {
        let name = match kind {
            NameType::Variable => self
                .variables
                .get(name_or_id)
                .cloned()
                .unwrap_or_else(|| name_or_id.to_string()),
            NameType::Procedure => name_or_id.to_string(),
        };
        let normalized = name.to_lowercase();
        if let Some(existing) = self.db.get(&kind).and_then(|m| m.get(&normalized)) {
            return existing.clone();
        }
        let safe = self.get_distinct_name(&name);
        self.db
            .entry(kind)
            .or_default()
            .insert(normalized, safe.clone());
        safe
    }

    /// A name derived from `name` that collides with neither a reserved word
    /// nor any name handed out so far. Each call reserves a fresh name.
    pub fn get_distinct_name(&mut self, name: &str) -> String {
        let base = safe_name(name);
        let mut candidate = base.clone();
        let mut suffix = 2usize;
        while self.is_taken(&candidate) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        self.taken.insert(candidate.to_lowercase());
        candidate
    }

    fn is_taken(&self, candidate: &str) -> bool {
        let lowered = candidate.to_lowercase();
        self.taken.contains(&lowered) || self.reserved.contains(&lowered)
    }
}

/// Rewrites arbitrary user text into a legal identifier: spaces become
/// underscores, other non-word characters are percent-encoded with `_` in
/// place of `%`, and a leading digit gains a `my_` prefix.
pub fn safe_name(name: &str) -> String {
    if name.is_empty() {
        return "unnamed".to_string();
    }
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == ' ' {
            out.push(if c == ' ' { '_' } else { c });
        } else if c.is_ascii() && !is_uri_escaped(c) {
            out.push('_');
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("_{:02X}", byte));
            }
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert_str(0, "my_");
    }
    out
}

/// ASCII characters that URI encoding leaves untouched would become a single
/// `_`; everything else expands to its encoded bytes.
fn is_uri_escaped(c: char) -> bool {
    !matches!(
        c,
        ';' | ',' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | '-' | '.' | '!' | '~' | '*'
            | '\'' | '(' | ')' | '#'
    )
}
