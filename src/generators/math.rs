//! Math blocks.

use crate::blocks::Block;
use crate::error::{GenerateError, Result};
use crate::generator::{Code, LogoGenerator};
use crate::generators::or_default;
use crate::order::Order;
use crate::strings;

pub fn math_number(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    let number = strings::parse_number(block.field_value("NUM"));
    let order = if number >= 0.0 {
        Order::Atomic
    } else {
        Order::UnaryNegation
    };
    Ok(Code::Value(strings::format_number(number), order))
}

pub fn math_arithmetic(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let (operator, order) = match block.field_value("OP") {
        "ADD" => ("+", Order::Addition),
        "MINUS" => ("-", Order::Subtraction),
        "MULTIPLY" => ("*", Order::Multiplication),
        "DIVIDE" => ("/", Order::Division),
        "POWER" => {
            let base = or_default(gen.value_to_code(block, "A", Order::None)?, "0");
            let exponent = or_default(gen.value_to_code(block, "B", Order::None)?, "0");
            return Ok(Code::Value(
                format!("power {} {}", base, exponent),
                Order::Procedure,
            ));
        }
        other => return Err(GenerateError::unsupported(&block.kind, "OP", other)),
    };
    let a = or_default(gen.value_to_code(block, "A", order)?, "0");
    let b = or_default(gen.value_to_code(block, "B", order)?, "0");
    Ok(Code::Value(format!("{} {} {}", a, operator, b), order))
}

/// Shared by `math_single`, `math_round` and `math_trig`.
pub fn math_single(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let operator = block.field_value("OP");
    if operator == "NEG" {
        let mut arg = or_default(gen.value_to_code(block, "NUM", Order::UnaryNegation)?, "0");
        // `--3` would read as a single word
        if arg.starts_with('-') {
            arg.insert(0, ' ');
        }
        return Ok(Code::Value(format!("-{}", arg), Order::UnaryNegation));
    }
    let prefix = match operator {
        "ABS" => "abs",
        "ROOT" => "sqrt",
        "LN" => "ln",
        "EXP" => "exp",
        "POW10" => "power 10",
        "ROUND" => "round",
        "ROUNDUP" => "round 0.5 +",
        "ROUNDDOWN" => "int",
        "SIN" => "sin",
        "COS" => "cos",
        "TAN" => "tan",
        "LOG10" => "log10",
        "ASIN" => "arcsin",
        "ACOS" => "arccos",
        "ATAN" => "arctan",
        other => return Err(GenerateError::unsupported(&block.kind, "OP", other)),
    };
    let outer = if operator == "ROUNDUP" {
        Order::Addition
    } else {
        Order::None
    };
    let arg = or_default(gen.value_to_code(block, "NUM", outer)?, "0");
    Ok(Code::Value(format!("{} {}", prefix, arg), Order::Procedure))
}

pub fn math_constant(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    let (code, order) = match block.field_value("CONSTANT") {
        "PI" => ("pi", Order::Atomic),
        "E" => ("exp 1", Order::Procedure),
        "GOLDEN_RATIO" => ("(1 + sqrt 5) / 2", Order::Division),
        "SQRT2" => ("sqrt 2", Order::Procedure),
        "SQRT1_2" => ("sqrt 1/2", Order::Procedure),
        other => return Err(GenerateError::unsupported(&block.kind, "CONSTANT", other)),
    };
    Ok(Code::Value(code.to_string(), order))
}

pub fn math_number_property(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let property = block.field_value("PROPERTY");
    if property == "PRIME" {
        return Err(GenerateError::NotSupported(
            "Primality testing isn't supported yet".to_string(),
        ));
    }
    let number_order = match property {
        "POSITIVE" | "NEGATIVE" => Order::Comparison,
        _ => Order::None,
    };
    let number = or_default(gen.value_to_code(block, "NUMBER_TO_CHECK", number_order)?, "0");
    let code = match property {
        "EVEN" => format!("0 = modulo {} 2", number),
        "ODD" => format!("1 = modulo {} 2", number),
        "WHOLE" => format!("0 = modulo {} 1", number),
        "POSITIVE" => format!("{} > 0", number),
        "NEGATIVE" => format!("{} < 0", number),
        "DIVISIBLE_BY" => {
            let divisor = or_default(gen.value_to_code(block, "DIVISOR", Order::None)?, "0");
            format!("0 = modulo {} {}", number, divisor)
        }
        other => return Err(GenerateError::unsupported(&block.kind, "PROPERTY", other)),
    };
    Ok(Code::Value(code, Order::Comparison))
}

/// Non-numeric variables count as zero before the increment.
pub fn math_change(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let delta = or_default(gen.value_to_code(block, "DELTA", Order::Addition)?, "0");
    let name = gen.variable_name(block.field_value("VAR"));
    Ok(Code::Statement(format!(
        "make \"{0} (ifelse numberp :{0} :{0} 0) + {1}\n",
        name, delta
    )))
}

pub fn math_modulo(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let dividend = or_default(gen.value_to_code(block, "DIVIDEND", Order::None)?, "0");
    let divisor = or_default(gen.value_to_code(block, "DIVISOR", Order::None)?, "0");
    Ok(Code::Value(
        format!("modulo {} {}", dividend, divisor),
        Order::Procedure,
    ))
}

/// `random n` yields 0..n-1, so the range is shifted onto `[from, to]`.
pub fn math_random_int(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let from = or_default(gen.value_to_code(block, "FROM", Order::Subtraction)?, "0");
    let to = or_default(gen.value_to_code(block, "TO", Order::Subtraction)?, "0");
    Ok(Code::Value(
        format!("{0} + random {1} - {0} + 1", from, to),
        Order::Procedure,
    ))
}

pub fn math_atan2(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let x = or_default(gen.value_to_code(block, "X", Order::None)?, "0");
    let y = or_default(gen.value_to_code(block, "Y", Order::None)?, "0");
    Ok(Code::Value(format!("(arctan {} {})", x, y), Order::Atomic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{gen, num, statement, value, var};

    fn arithmetic(op: &str, a: Block, b: Block) -> Block {
        Block::new("math_arithmetic", "m")
            .with_field("OP", op)
            .with_value("A", a)
            .with_value("B", b)
    }

    #[test]
    fn numbers_are_normalized() {
        let mut gen = gen();
        let positive = num("007");
        assert_eq!(value(&mut gen, &positive), ("7".to_string(), Order::Atomic));
        let negative = num("-2.5");
        assert_eq!(
            value(&mut gen, &negative),
            ("-2.5".to_string(), Order::UnaryNegation)
        );
    }

    #[test]
    fn nested_arithmetic_is_parenthesized_by_precedence() {
        let mut gen = gen();
        let sum = arithmetic("ADD", num("1"), num("2"));
        let product = arithmetic("MULTIPLY", sum, var("x"));
        assert_eq!(
            value(&mut gen, &product),
            ("(1 + 2) * :x".to_string(), Order::Multiplication)
        );
    }

    #[test]
    fn associative_chains_stay_flat() {
        let mut gen = gen();
        let inner = arithmetic("ADD", num("1"), num("2"));
        let outer = arithmetic("ADD", inner, num("3"));
        assert_eq!(value(&mut gen, &outer).0, "1 + 2 + 3");
        let inner = arithmetic("MINUS", num("1"), num("2"));
        let outer = arithmetic("MINUS", num("5"), inner);
        assert_eq!(value(&mut gen, &outer).0, "5 - (1 - 2)");
    }

    #[test]
    fn power_is_a_procedure_call() {
        let mut gen = gen();
        let block = arithmetic("POWER", var("x"), num("2"));
        assert_eq!(
            value(&mut gen, &block),
            ("power :x 2".to_string(), Order::Procedure)
        );
    }

    #[test]
    fn negation_parenthesizes_a_negative_operand() {
        let mut gen = gen();
        let block = Block::new("math_single", "s")
            .with_field("OP", "NEG")
            .with_value("NUM", num("-3"));
        assert_eq!(
            value(&mut gen, &block),
            ("-(-3)".to_string(), Order::UnaryNegation)
        );
        let plain = Block::new("math_single", "s")
            .with_field("OP", "NEG")
            .with_value("NUM", var("x"));
        assert_eq!(value(&mut gen, &plain).0, "-:x");
    }

    #[test]
    fn single_operand_functions() {
        let mut gen = gen();
        let root = Block::new("math_single", "s")
            .with_field("OP", "ROOT")
            .with_value("NUM", num("9"));
        assert_eq!(value(&mut gen, &root).0, "sqrt 9");
        let sum = arithmetic("ADD", var("a"), num("1"));
        let round_up = Block::new("math_round", "r")
            .with_field("OP", "ROUNDUP")
            .with_value("NUM", sum);
        assert_eq!(value(&mut gen, &round_up).0, "round 0.5 + :a + 1");
        let trig = Block::new("math_trig", "t").with_field("OP", "ACOS");
        assert_eq!(value(&mut gen, &trig).0, "arccos 0");
    }

    #[test]
    fn unknown_operators_are_fatal() {
        let mut gen = gen();
        let single = Block::new("math_single", "s").with_field("OP", "CBRT");
        assert!(gen.block_to_code(Some(&single), false).is_err());
        let infinity = Block::new("math_constant", "c").with_field("CONSTANT", "INFINITY");
        assert!(matches!(
            gen.block_to_code(Some(&infinity), false),
            Err(GenerateError::UnsupportedOption { .. })
        ));
    }

    #[test]
    fn constants_carry_their_order() {
        let mut gen = gen();
        let golden = Block::new("math_constant", "c").with_field("CONSTANT", "GOLDEN_RATIO");
        assert_eq!(
            value(&mut gen, &golden),
            ("(1 + sqrt 5) / 2".to_string(), Order::Division)
        );
    }

    #[test]
    fn primality_is_not_supported() {
        let mut gen = gen();
        let block = Block::new("math_number_property", "p")
            .with_field("PROPERTY", "PRIME")
            .with_value("NUMBER_TO_CHECK", num("7"));
        assert_eq!(
            gen.block_to_code(Some(&block), false),
            Err(GenerateError::NotSupported(
                "Primality testing isn't supported yet".to_string()
            ))
        );
    }

    #[test]
    fn number_properties() {
        let mut gen = gen();
        let even = Block::new("math_number_property", "p")
            .with_field("PROPERTY", "EVEN")
            .with_value("NUMBER_TO_CHECK", var("n"));
        assert_eq!(
            value(&mut gen, &even),
            ("0 = modulo :n 2".to_string(), Order::Comparison)
        );
        let divisible = Block::new("math_number_property", "p")
            .with_field("PROPERTY", "DIVISIBLE_BY")
            .with_value("NUMBER_TO_CHECK", var("n"))
            .with_value("DIVISOR", num("3"));
        assert_eq!(value(&mut gen, &divisible).0, "0 = modulo :n 3");
        let negative = Block::new("math_number_property", "p").with_field("PROPERTY", "NEGATIVE");
        assert_eq!(value(&mut gen, &negative).0, "0 < 0");
    }

    #[test]
    fn change_treats_unset_variables_as_zero() {
        let mut gen = gen();
        let block = Block::new("math_change", "c")
            .with_variable("VAR", "total")
            .with_value("DELTA", num("5"));
        assert_eq!(
            statement(&mut gen, &block),
            "make \"total (ifelse numberp :total :total 0) + 5\n"
        );
    }

    #[test]
    fn random_int_shifts_the_range() {
        let mut gen = gen();
        let block = Block::new("math_random_int", "r")
            .with_value("FROM", num("1"))
            .with_value("TO", num("6"));
        assert_eq!(value(&mut gen, &block).0, "1 + random 6 - 1 + 1");
    }

    #[test]
    fn modulo_and_atan2() {
        let mut gen = gen();
        let modulo = Block::new("math_modulo", "m")
            .with_value("DIVIDEND", num("7"))
            .with_value("DIVISOR", num("2"));
        assert_eq!(value(&mut gen, &modulo).0, "modulo 7 2");
        let atan2 = Block::new("math_atan2", "a").with_value("Y", num("1"));
        assert_eq!(value(&mut gen, &atan2), ("(arctan 0 1)".to_string(), Order::Atomic));
    }
}
