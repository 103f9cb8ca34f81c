//! Variable blocks, including the dynamically typed aliases.

use crate::blocks::Block;
use crate::error::Result;
use crate::generator::{Code, LogoGenerator};
use crate::generators::or_default;
use crate::order::Order;

pub fn variables_get(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let name = gen.variable_name(block.field_value("VAR"));
    Ok(Code::Value(format!(":{}", name), Order::Atomic))
}

pub fn variables_set(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let value = or_default(gen.value_to_code(block, "VALUE", Order::Atomic)?, "0");
    let name = gen.variable_name(block.field_value("VAR"));
    Ok(Code::Statement(format!("make {} {}\n", gen.quote(&name), value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{VariableModel, Workspace};
    use crate::generators::test_support::{gen, num, statement, value, var};

    #[test]
    fn get_reads_through_a_colon() {
        let mut gen = gen();
        assert_eq!(value(&mut gen, &var("total")), (":total".to_string(), Order::Atomic));
    }

    #[test]
    fn set_parenthesizes_compound_values() {
        let mut gen = gen();
        let sum = Block::new("math_arithmetic", "m")
            .with_field("OP", "ADD")
            .with_value("A", var("a"))
            .with_value("B", num("1"));
        let block = Block::new("variables_set", "s")
            .with_variable("VAR", "a")
            .with_value("VALUE", sum);
        assert_eq!(statement(&mut gen, &block), "make \"a (:a + 1)\n");
        let unset = Block::new("variables_set", "s").with_variable("VAR", "b");
        assert_eq!(statement(&mut gen, &unset), "make \"b 0\n");
    }

    #[test]
    fn variable_ids_resolve_to_mangled_names() {
        let mut gen = LogoGenerator::default();
        gen.init(&Workspace {
            variables: vec![VariableModel {
                id: "v1".to_string(),
                name: "my count".to_string(),
            }],
            top_blocks: Vec::new(),
        });
        let block = Block::new("variables_get_dynamic", "g").with_variable("VAR", "v1");
        assert_eq!(value(&mut gen, &block).0, ":my_count");
    }
}
