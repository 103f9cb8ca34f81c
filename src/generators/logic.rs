//! Logic blocks: two-way branching, comparison, boolean operators.

use crate::blocks::Block;
use crate::error::{GenerateError, Result};
use crate::generator::{Code, LogoGenerator};
use crate::generators::or_default;
use crate::order::Order;
use crate::strings::prefix_lines;

/// The block places its own prefix/suffix: the prefix before the whole
/// `ifelse` and the suffix at the top of each branch.
pub fn controls_ifelse(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let mut code = gen.injected_prefix(block).unwrap_or_default();
    let condition = or_default(gen.value_to_code(block, "IF0", Order::None)?, "\"false");
    let mut if_code = gen.statement_to_code(block, "DO0")?;
    let mut else_code = gen.statement_to_code(block, "ELSE")?;
    if let Some(suffix) = gen.injected_suffix(block) {
        let suffix = prefix_lines(&suffix, gen.indent());
        if_code = suffix.clone() + &if_code;
        else_code = suffix + &else_code;
    }
    code.push_str(&format!(
        "ifelse {} [\n{}] [\n{}]\n",
        condition, if_code, else_code
    ));
    Ok(Code::Statement(code))
}

pub fn logic_compare(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let op = block.field_value("OP");
    let operator = match op {
        "EQ" => "=",
        "NEQ" => "<>",
        "LT" => "<",
        "LTE" => "<=",
        "GT" => ">",
        "GTE" => ">=",
        other => return Err(GenerateError::unsupported(&block.kind, "OP", other)),
    };
    let a = or_default(gen.value_to_code(block, "A", Order::Comparison)?, "0");
    let b = or_default(gen.value_to_code(block, "B", Order::Comparison)?, "0");
    Ok(Code::Value(format!("{} {} {}", a, operator, b), Order::Comparison))
}

/// A missing operand is replaced by the operator's identity so that it has
/// no effect on the result.
pub fn logic_operation(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let (operator, identity) = if block.field_value("OP") == "AND" {
        ("and", "\"true")
    } else {
        ("or", "\"false")
    };
    let a = or_default(gen.value_to_code(block, "A", Order::None)?, identity);
    let b = or_default(gen.value_to_code(block, "B", Order::None)?, identity);
    Ok(Code::Value(format!("{} {} {}", operator, a, b), Order::Procedure))
}

pub fn logic_negate(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let arg = or_default(gen.value_to_code(block, "BOOL", Order::None)?, "\"true");
    Ok(Code::Value(format!("not {}", arg), Order::Procedure))
}

pub fn logic_boolean(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    let code = if block.field_value("BOOL") == "TRUE" {
        "\"true"
    } else {
        "\"false"
    };
    Ok(Code::Value(code.to_string(), Order::Atomic))
}

pub fn logic_null(_block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(Code::Value("[]".to_string(), Order::Atomic))
}

pub fn logic_ternary(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let condition = or_default(gen.value_to_code(block, "IF", Order::None)?, "\"false");
    let then = or_default(gen.value_to_code(block, "THEN", Order::None)?, "[]");
    let otherwise = or_default(gen.value_to_code(block, "ELSE", Order::None)?, "[]");
    Ok(Code::Value(
        format!("ifelse {} [{}] [{}]", condition, then, otherwise),
        Order::Procedure,
    ))
}
