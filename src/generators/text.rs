//! Text blocks. Logo text is a word, so the empty text is a lone `"`.

use crate::blocks::Block;
use crate::error::{GenerateError, Result};
use crate::generator::{Code, LogoGenerator, FUNCTION_NAME_PLACEHOLDER};
use crate::generators::lists::item_count;
use crate::generators::or_default;
use crate::order::Order;

const EMPTY_WORD: &str = "\"";

pub fn text(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    Ok(Code::Value(gen.quote(block.field_value("TEXT")), Order::Atomic))
}

pub fn text_multiline(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let mut code = gen.multiline_quote(block.field_value("TEXT"));
    if code.contains('\n') {
        code = format!("({})", code);
    }
    Ok(Code::Value(code, Order::Atomic))
}

pub fn text_join(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    match item_count(block) {
        0 => Ok(Code::Value(EMPTY_WORD.to_string(), Order::Atomic)),
        2 => {
            let first = or_default(gen.value_to_code(block, "ADD0", Order::Atomic)?, EMPTY_WORD);
            let second = or_default(gen.value_to_code(block, "ADD1", Order::None)?, EMPTY_WORD);
            Ok(Code::Value(format!("word {} {}", first, second), Order::Procedure))
        }
        count => {
            let mut elements = Vec::with_capacity(count);
            for i in 0..count {
                let element = gen.value_to_code(block, &format!("ADD{}", i), Order::None)?;
                elements.push(or_default(element, EMPTY_WORD));
            }
            Ok(Code::Value(format!("(word {})", elements.join(" ")), Order::Atomic))
        }
    }
}

pub fn text_append(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let name = gen.variable_name(block.field_value("VAR"));
    let value = or_default(gen.value_to_code(block, "TEXT", Order::None)?, EMPTY_WORD);
    Ok(Code::Statement(format!(
        "make \"{0} word :{0} {1}\n",
        name, value
    )))
}

pub fn text_length(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let text = or_default(gen.value_to_code(block, "VALUE", Order::None)?, EMPTY_WORD);
    Ok(Code::Value(format!("count {}", text), Order::Procedure))
}

pub fn text_is_empty(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let text = or_default(gen.value_to_code(block, "VALUE", Order::None)?, EMPTY_WORD);
    Ok(Code::Value(format!("emptyp {}", text), Order::Procedure))
}

pub fn text_char_at(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let location = match block.field_value("WHERE") {
        "" => "FROM_START",
        location => location,
    };
    let text_order = if location == "FROM_END" {
        Order::Subtraction
    } else {
        Order::None
    };
    let text = or_default(gen.value_to_code(block, "VALUE", text_order)?, EMPTY_WORD);
    let code = match location {
        "FIRST" => format!("first {}", text),
        "LAST" => format!("last {}", text),
        "FROM_START" => {
            let at = gen.get_adjusted(block, "AT", 0, false, Order::None)?;
            format!("item {} {}", at, text)
        }
        "FROM_END" => {
            let at = gen.get_adjusted(block, "AT", -1, true, Order::None)?;
            let function_name = gen.provide_function(
                "wordLetterFromEnd",
                &[
                    &format!("to {} :w :a", FUNCTION_NAME_PLACEHOLDER),
                    "op item :a + count :w :w",
                    "end",
                ],
            );
            format!("{} {} {}", function_name, text, at)
        }
        "RANDOM" => format!("pick {}", text),
        other => return Err(GenerateError::unsupported(&block.kind, "WHERE", other)),
    };
    Ok(Code::Value(code, Order::Procedure))
}

pub fn text_change_case(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let case = block.field_value("CASE");
    let text = or_default(gen.value_to_code(block, "TEXT", Order::None)?, EMPTY_WORD);
    let operator = match case {
        "UPPERCASE" => "uppercase".to_string(),
        "LOWERCASE" => "lowercase".to_string(),
        "TITLECASE" => gen.provide_function(
            "textToTitleCase",
            &[
                &format!("to {} :w", FUNCTION_NAME_PLACEHOLDER),
                "op map [ifelse #>1 [ifelse \"\\  = item #-1 :w [uppercase ?] [lowercase ?]][uppercase ?]] :w",
                "end",
            ],
        ),
        other => return Err(GenerateError::unsupported(&block.kind, "CASE", other)),
    };
    Ok(Code::Value(format!("{} {}", operator, text), Order::Procedure))
}

pub fn text_print(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let message = or_default(gen.value_to_code(block, "TEXT", Order::None)?, EMPTY_WORD);
    Ok(Code::Statement(format!("pr {}\n", message)))
}

/// `text_prompt` carries the message in a field, `text_prompt_ext` in a
/// value input.
pub fn text_prompt_ext(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let message = if block.has_field("TEXT") {
        gen.quote(block.field_value("TEXT"))
    } else {
        or_default(gen.value_to_code(block, "TEXT", Order::None)?, EMPTY_WORD)
    };
    Ok(Code::Value(
        format!("readword {0} {0}", message),
        Order::None,
    ))
}
