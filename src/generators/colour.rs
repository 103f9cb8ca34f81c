//! Colour blocks. Logo colours are `[r g b]` lists with 0-255 components.

use crate::blocks::Block;
use crate::error::{GenerateError, Result};
use crate::generator::{Code, LogoGenerator};
use crate::generators::or_default;
use crate::order::Order;

pub fn colour_picker(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    let colour = block.field_value("COLOUR");
    let (r, g, b) = parse_hex_colour(colour)?;
    Ok(Code::Value(format!("[{} {} {}]", r, g, b), Order::Atomic))
}

pub fn colour_random(_block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(Code::Value(
        "(list random 256 random 256 random 256)".to_string(),
        Order::Atomic,
    ))
}

/// Components arrive as percentages.
pub fn colour_rgb(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let red = or_default(gen.value_to_code(block, "RED", Order::Multiplication)?, "0");
    let green = or_default(gen.value_to_code(block, "GREEN", Order::Multiplication)?, "0");
    let blue = or_default(gen.value_to_code(block, "BLUE", Order::Multiplication)?, "0");
    Ok(Code::Value(
        format!("(list 2.55 * {} 2.55 * {} 2.55 * {})", red, green, blue),
        Order::Atomic,
    ))
}

fn parse_hex_colour(colour: &str) -> Result<(u8, u8, u8)> {
    let hex = colour
        .strip_prefix('#')
        .filter(|h| h.len() == 6 && h.is_ascii())
        .ok_or_else(|| GenerateError::InvalidColour(colour.to_string()))?;
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| GenerateError::InvalidColour(colour.to_string()))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{gen, num, value};

    #[test]
    fn picker_expands_hex_into_a_list() {
        let mut gen = gen();
        let block = Block::new("colour_picker", "c").with_field("COLOUR", "#ff8000");
        assert_eq!(value(&mut gen, &block), ("[255 128 0]".to_string(), Order::Atomic));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        let mut gen = gen();
        let block = Block::new("colour_picker", "c").with_field("COLOUR", "red");
        assert_eq!(
            gen.block_to_code(Some(&block), false),
            Err(GenerateError::InvalidColour("red".to_string()))
        );
    }

    #[test]
    fn rgb_scales_percentages_and_defaults_to_zero() {
        let mut gen = gen();
        let block = Block::new("colour_rgb", "c").with_value("RED", num("100"));
        assert_eq!(
            value(&mut gen, &block).0,
            "(list 2.55 * 100 2.55 * 0 2.55 * 0)"
        );
    }

    #[test]
    fn random_colour_is_atomic() {
        let mut gen = gen();
        let block = Block::new("colour_random", "c");
        assert_eq!(
            value(&mut gen, &block),
            ("(list random 256 random 256 random 256)".to_string(), Order::Atomic)
        );
    }
}
