//! Procedure blocks. Definitions are hoisted into the definitions table and
//! emitted ahead of the program body by `finish`.

use crate::blocks::Block;
use crate::error::Result;
use crate::generator::{Code, LogoGenerator};
use crate::generators::or_default;
use crate::order::Order;
use crate::strings::prefix_lines;

/// Handles both the returning and the non-returning definition block.
pub fn procedures_defreturn(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let name = gen.procedure_name(block.field_value("NAME"));
    let mut xfix = String::new();
    if let Some(prefix) = gen.injected_prefix(block) {
        xfix.push_str(&prefix);
    }
    if let Some(suffix) = gen.injected_suffix(block) {
        xfix.push_str(&suffix);
    }
    if !xfix.is_empty() {
        xfix = prefix_lines(&xfix, gen.indent());
    }
    let loop_trap = gen
        .injected_loop_trap(block)
        .map(|trap| prefix_lines(&trap, gen.indent()))
        .unwrap_or_default();
    let branch = gen.statement_to_code(block, "STACK")?;
    let mut return_value = gen.value_to_code(block, "RETURN", Order::None)?;
    // the suffix must fire again on the way out through `op`
    let xfix_before_return = if !branch.is_empty() && !return_value.is_empty() {
        xfix.clone()
    } else {
        String::new()
    };
    if !return_value.is_empty() {
        return_value = format!("{}op {}\n", gen.indent(), return_value);
    }
    let params = block
        .extra
        .params
        .iter()
        .map(|param| format!(" :{}", gen.variable_name(param)))
        .collect::<String>();
    let code = format!(
        "to {}{}\n{}{}{}{}{}end",
        name, params, xfix, loop_trap, branch, xfix_before_return, return_value
    );
    let code = gen.scrub(block, &code, false, false)?;
    gen.define_procedure(&name, code);
    Ok(Code::Hoisted)
}

fn callee(block: &Block) -> &str {
    block
        .extra
        .name
        .as_deref()
        .unwrap_or_else(|| block.field_value("NAME"))
}

pub fn procedures_callreturn(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let name = gen.procedure_name(callee(block));
    let mut code = name;
    for i in 0..block.extra.params.len() {
        let arg = gen.value_to_code(block, &format!("ARG{}", i), Order::None)?;
        code.push(' ');
        code.push_str(&or_default(arg, "[]"));
    }
    Ok(Code::Value(code, Order::Procedure))
}

pub fn procedures_callnoreturn(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    match procedures_callreturn(block, gen)? {
        Code::Value(code, _) => Ok(Code::Statement(code + "\n")),
        other => Ok(other),
    }
}

/// Early exit from the enclosing procedure. The suffix is injected inside
/// the branch because the regular one after the statement is skipped.
pub fn procedures_ifreturn(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let condition = or_default(gen.value_to_code(block, "CONDITION", Order::None)?, "\"false");
    let mut code = format!("if {} [\n", condition);
    if let Some(suffix) = gen.injected_suffix(block) {
        code.push_str(&prefix_lines(&suffix, gen.indent()));
    }
    if block.extra.has_return_value.unwrap_or(true) {
        let value = or_default(gen.value_to_code(block, "VALUE", Order::None)?, "[]");
        code.push_str(&format!("{}op {}\n", gen.indent(), value));
    } else {
        code.push_str(&format!("{}stop\n", gen.indent()));
    }
    code.push_str("]\n");
    Ok(Code::Statement(code))
}
