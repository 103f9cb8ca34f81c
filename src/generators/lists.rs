//! List blocks.

use crate::blocks::Block;
use crate::error::{GenerateError, Result};
use crate::generator::{Code, LogoGenerator, FUNCTION_NAME_PLACEHOLDER};
use crate::generators::or_default;
use crate::order::Order;

pub fn lists_create_empty(_block: &Block, _gen: &mut LogoGenerator) -> Result<Code> {
    Ok(Code::Value("[]".to_string(), Order::Atomic))
}

/// Number of `ADD<i>` slots: the mutator's count when present, otherwise
/// the inputs actually carried by the block.
pub(crate) fn item_count(block: &Block) -> usize {
    block.extra.item_count.unwrap_or_else(|| {
        block
            .inputs
            .iter()
            .filter(|input| input.name.starts_with("ADD"))
            .count()
    })
}

pub fn lists_create_with(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    match item_count(block) {
        0 => Ok(Code::Value("[]".to_string(), Order::Atomic)),
        2 => {
            let first = or_default(gen.value_to_code(block, "ADD0", Order::Atomic)?, "[]");
            let second = or_default(gen.value_to_code(block, "ADD1", Order::None)?, "[]");
            Ok(Code::Value(format!("list {} {}", first, second), Order::Procedure))
        }
        count => {
            let mut elements = Vec::with_capacity(count);
            for i in 0..count {
                let element = gen.value_to_code(block, &format!("ADD{}", i), Order::None)?;
                elements.push(or_default(element, "[]"));
            }
            Ok(Code::Value(format!("(list {})", elements.join(" ")), Order::Atomic))
        }
    }
}

pub fn lists_repeat(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let function_name = gen.provide_function(
        "listsRepeat",
        &[
            &format!("to {} :value :n", FUNCTION_NAME_PLACEHOLDER),
            "  op cascade :n [lput :value ?] []",
            "end",
        ],
    );
    let element = or_default(gen.value_to_code(block, "ITEM", Order::None)?, "[]");
    let count = or_default(gen.value_to_code(block, "NUM", Order::None)?, "0");
    Ok(Code::Value(
        format!("{} {} {}", function_name, element, count),
        Order::Procedure,
    ))
}

pub fn lists_length(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let list = or_default(gen.value_to_code(block, "VALUE", Order::None)?, "[]");
    Ok(Code::Value(format!("count {}", list), Order::Procedure))
}

pub fn lists_is_empty(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let list = or_default(gen.value_to_code(block, "VALUE", Order::None)?, "[]");
    Ok(Code::Value(format!("emptyp {}", list), Order::Procedure))
}

/// Position of the first (or last) match, 0 when absent. Searching from the
/// end scans the reversed list and maps the hit back.
pub fn lists_index_of(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let reverse = if block.field_value("END") == "FIRST" {
        "\"false"
    } else {
        "\"true"
    };
    let item = or_default(gen.value_to_code(block, "FIND", Order::None)?, "\"");
    let list = or_default(gen.value_to_code(block, "VALUE", Order::None)?, "[]");
    let function_name = gen.provide_function(
        "listsIndexOf",
        &[
            &format!("to {} :item :l :reverse", FUNCTION_NAME_PLACEHOLDER),
            "  ifelse :reverse [",
            "    localmake \"res find [? = :item] reverse :l",
            "    op ifelse listp :res 0 1 - :res + count :l",
            "  ][",
            "    localmake \"res find [? = :item] :l",
            "    op ifelse listp :res 0 :res",
            "  ]",
            "end",
        ],
    );
    let code = format!("{} {} {} {}", function_name, item, list, reverse);
    if gen.options().one_based_index {
        Ok(Code::Value(code, Order::Procedure))
    } else {
        Ok(Code::Value(format!("-1 + {}", code), Order::Procedure))
    }
}

/// Only the GET mode is translated.
pub fn lists_get_index(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let mode = match block.field_value("MODE") {
        "" => "GET",
        mode => mode,
    };
    let location = match block.field_value("WHERE") {
        "" => "FROM_START",
        location => location,
    };
    let list = or_default(gen.value_to_code(block, "VALUE", Order::None)?, "[]");
    let code = match (mode, location) {
        ("GET", "FIRST") => format!("first {}", list),
        ("GET", "LAST") => format!("last {}", list),
        ("GET", "FROM_START") => {
            let at = gen.get_adjusted(block, "AT", 0, false, Order::None)?;
            format!("item {} {}", at, list)
        }
        ("GET", "RANDOM") => format!("pick {}", list),
        (mode, location) => {
            return Err(GenerateError::unhandled(
                &block.kind,
                format!("MODE {} with WHERE {}", mode, location),
            ))
        }
    };
    Ok(Code::Value(code, Order::Procedure))
}

pub fn lists_sort(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let list = or_default(gen.value_to_code(block, "LIST", Order::None)?, "[]");
    let kind = block.field_value("TYPE");
    let ascending = block.field_value("DIRECTION") == "1";
    let compare = match (ascending, kind == "NUMERIC") {
        (true, true) => "\"lessp",
        (true, false) => "\"beforep",
        (false, true) => "\"greaterp",
        (false, false) => "[beforep ?2 ?1]",
    };
    let ignore_case = if kind == "TEXT" { "\"false" } else { "\"true" };
    // One helper serves every sort block, so the comparator and case flag
    // travel as arguments.
    let function_name = gen.provide_function(
        "listsGetSort",
        &[
            &format!("to {} :l :cmp :ci", FUNCTION_NAME_PLACEHOLDER),
            "  localmake \"cip ifelse definedp \"caseignoredp [:caseignoredp] \"\"true",
            "  make \"caseignoredp :ci",
            "  localmake \"res (sort :l :cmp)",
            "  make \"caseignoredp :cip",
            "  op :res",
            "end",
        ],
    );
    Ok(Code::Value(
        format!("{} {} {} {}", function_name, list, compare, ignore_case),
        Order::Procedure,
    ))
}

pub fn lists_reverse(block: &Block, gen: &mut LogoGenerator) -> Result<Code> {
    let list = or_default(gen.value_to_code(block, "LIST", Order::None)?, "[]");
    Ok(Code::Value(format!("reverse {}", list), Order::Procedure))
}
