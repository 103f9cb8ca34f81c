//! Turtle blocks. Their dropdowns carry the Logo primitive itself in upper
//! case, so most emitters just lowercase the selection.

use crate::blocks::Block;
use crate::error::Result;
use crate::generator::{Code, LogoGenerator};
use crate::generators::or_default;
use crate::order::Order;

fn command_with_argument(
    block: &Block,
    gen: &mut LogoGenerator,
    field: &str,
    input: &str,
    outer: Order,
    default: &str,
) -> Result<Code> {
    let command = block.field_value(field).to_lowercase();
    let argument = or_default(gen.value_to_code(block, input, outer)?, default);
    Ok(Code::Statement(format!("{} {}\n", command, argument)))
}

fn bare_command(block: &Block, field: &str) -> Code {
    Code::Statement(format!("{}\n", block.field_value(field).to_lowercase()))
}

fn reporter(block: &Block) -> Code {
    Code::Value(block.field_value("WHICH").to_lowercase(), Order::Procedure)
}

pub fn logo_move(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    command_with_argument(block, gen, "OP", "AMOUNT", Order::None, "0")
}

pub fn logo_rotate(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    command_with_argument(block, gen, "DIRECTION", "AMOUNT", Order::None, "0")
}

pub fn logo_circle(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    command_with_argument(block, gen, "METHOD", "R", Order::None, "0")
}

pub fn logo_pen(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(bare_command(block, "OP"))
}

pub fn logo_setcolor(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    command_with_argument(block, gen, "WHICH", "COLOR", Order::Atomic, "[0 0 0]")
}

pub fn logo_getcolor(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(reporter(block))
}

pub fn logo_mode(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(bare_command(block, "WHICH"))
}

pub fn logo_screen(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(bare_command(block, "WHICH"))
}

pub fn logo_set(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    command_with_argument(block, gen, "WHICH", "VALUE", Order::None, "0")
}

pub fn logo_get(block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(reporter(block))
}
