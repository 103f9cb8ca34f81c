//! Loop blocks. Every body goes through `add_loop_trap` so the loop trap,
//! suffix and prefix snippets fire once per iteration.

use crate::blocks::Block;
use crate::error::Result;
use crate::generator::{Code, LogoGenerator};
use crate::generators::or_default;
use crate::order::Order;
use crate::strings;

/// `controls_repeat` carries the count in a field, `controls_repeat_ext` in
/// a value input.
pub fn controls_repeat_ext(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let repeats = if block.has_field("TIMES") {
        strings::format_number(strings::parse_number(block.field_value("TIMES")))
    } else {
        or_default(gen.value_to_code(block, "TIMES", Order::None)?, "0")
    };
    let branch = gen.statement_to_code(block, "DO")?;
    let branch = gen.add_loop_trap(&branch, block);
    Ok(Code::Statement(format!("repeat {} [\n{}]\n", repeats, branch)))
}

pub fn controls_while_until(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let keyword = if block.field_value("MODE") == "UNTIL" {
        "until"
    } else {
        "while"
    };
    let condition = or_default(gen.value_to_code(block, "BOOL", Order::None)?, "\"false");
    let branch = gen.statement_to_code(block, "DO")?;
    let branch = gen.add_loop_trap(&branch, block);
    Ok(Code::Statement(format!(
        "{} [{}] [\n{}]\n",
        keyword, condition, branch
    )))
}

pub fn controls_for(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let variable = gen.variable_name(block.field_value("VAR"));
    let from = or_default(gen.value_to_code(block, "FROM", Order::None)?, "0");
    let to = or_default(gen.value_to_code(block, "TO", Order::None)?, "0");
    let by = or_default(gen.value_to_code(block, "BY", Order::None)?, "1");
    let branch = gen.statement_to_code(block, "DO")?;
    let branch = gen.add_loop_trap(&branch, block);
    Ok(Code::Statement(format!(
        "for [{} [{}] [{}] [{}]] [\n{}]\n",
        variable, from, to, by, branch
    )))
}

/// `foreach` binds the element to `?`; the body copies it into the loop
/// variable first.
pub fn controls_for_each(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let variable = gen.variable_name(block.field_value("VAR"));
    let list = or_default(gen.value_to_code(block, "LIST", Order::None)?, "[]");
    let branch = gen.statement_to_code(block, "DO")?;
    let branch = gen.add_loop_trap(&branch, block);
    Ok(Code::Statement(format!(
        "foreach {} [\n{}make \"{} ?\n{}]\n",
        list,
        gen.indent(),
        variable,
        branch
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeneratorOptions;
    use crate::generators::test_support::{gen, gen_with, num, statement, text, var};

    fn print(message: &str) -> Block {
        Block::new("text_print", "p").with_value("TEXT", text(message))
    }

    #[test]
    fn repeat_with_a_connected_count() {
        let mut gen = gen();
        let block = Block::new("controls_repeat_ext", "r")
            .with_value("TIMES", num("3"))
            .with_statement("DO", print("hi"));
        assert_eq!(statement(&mut gen, &block), "repeat 3 [\n  pr \"hi\n]\n");
    }

    #[test]
    fn repeat_with_a_count_field_normalizes_the_number() {
        let mut gen = gen();
        let block = Block::new("controls_repeat", "r").with_field("TIMES", "010");
        assert_eq!(statement(&mut gen, &block), "repeat 10 [\n]\n");
    }

    #[test]
    fn while_and_until_bracket_the_condition() {
        let mut gen = gen();
        let until = Block::new("controls_whileUntil", "w")
            .with_field("MODE", "UNTIL")
            .with_value("BOOL", var("done"));
        assert_eq!(statement(&mut gen, &until), "until [:done] [\n]\n");
        let forever = Block::new("controls_whileUntil", "w").with_field("MODE", "WHILE");
        assert_eq!(statement(&mut gen, &forever), "while [\"false] [\n]\n");
    }

    #[test]
    fn for_uses_defaults_for_missing_bounds() {
        let mut gen = gen();
        let block = Block::new("controls_for", "f")
            .with_variable("VAR", "i")
            .with_value("TO", num("10"));
        assert_eq!(statement(&mut gen, &block), "for [i [0] [10] [1]] [\n]\n");
    }

    #[test]
    fn for_each_binds_the_loop_variable() {
        let mut gen = gen();
        let block = Block::new("controls_forEach", "f")
            .with_variable("VAR", "item")
            .with_value("LIST", var("xs"))
            .with_statement("DO", print("x"));
        assert_eq!(
            statement(&mut gen, &block),
            "foreach :xs [\n  make \"item2 ?\n  pr \"x\n]\n"
        );
    }

    #[test]
    fn loop_body_carries_trap_suffix_and_prefix() {
        let mut gen = gen_with(GeneratorOptions {
            statement_prefix: Some("hl %1\n".to_string()),
            statement_suffix: Some("done %1\n".to_string()),
            infinite_loop_trap: Some("trap %1\n".to_string()),
            ..GeneratorOptions::default()
        });
        let block = Block::new("controls_repeat_ext", "r").with_value("TIMES", num("2"));
        assert_eq!(
            statement(&mut gen, &block),
            "hl 'r'\nrepeat 2 [\n  done 'r'\n  trap 'r'\n  hl 'r'\n]\ndone 'r'\n"
        );
    }
}
