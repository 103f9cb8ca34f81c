//! Per-block-type emitters, grouped by toolbox category.
//!
//! Each emitter is a plain function of the block and the generator facade.
//! [`EMITTERS`] is the closed default table; hosts may add or replace entries
//! at runtime through [`crate::generator::LogoGenerator::register`].

pub mod colour;
pub mod lists;
pub mod logic;
pub mod logo;
pub mod loops;
pub mod math;
pub mod procedures;
pub mod text;
pub mod variables;

use crate::blocks::Block;
use crate::error::Result;
use crate::generator::{Code, LogoGenerator};

pub type EmitFn = fn(&Block, &mut LogoGenerator) -> Result<Code>;

/// Whether a block type sits in a statement chain or plugs into a value
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Statement,
    Value,
}

#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    pub shape: Shape,
    pub emit: EmitFn,
    /// The emitter places statement prefix/suffix snippets itself.
    pub suppress_prefix_suffix: bool,
}

impl Emitter {
    pub const fn statement(emit: EmitFn) -> Self {
        Self {
            shape: Shape::Statement,
            emit,
            suppress_prefix_suffix: false,
        }
    }

    pub const fn value(emit: EmitFn) -> Self {
        Self {
            shape: Shape::Value,
            emit,
            suppress_prefix_suffix: false,
        }
    }

    pub const fn manual_prefix_suffix(self) -> Self {
        Self {
            suppress_prefix_suffix: true,
            ..self
        }
    }
}

pub static EMITTERS: &[(&str, Emitter)] = &[
    ("colour_picker", Emitter::value(colour::colour_picker)),
    ("colour_random", Emitter::value(colour::colour_random)),
    ("colour_rgb", Emitter::value(colour::colour_rgb)),
    ("lists_create_empty", Emitter::value(lists::lists_create_empty)),
    ("lists_create_with", Emitter::value(lists::lists_create_with)),
    ("lists_repeat", Emitter::value(lists::lists_repeat)),
    ("lists_length", Emitter::value(lists::lists_length)),
    ("lists_isEmpty", Emitter::value(lists::lists_is_empty)),
    ("lists_indexOf", Emitter::value(lists::lists_index_of)),
    ("lists_getIndex", Emitter::value(lists::lists_get_index)),
    ("lists_sort", Emitter::value(lists::lists_sort)),
    ("lists_reverse", Emitter::value(lists::lists_reverse)),
    (
        "controls_ifelse",
        Emitter::statement(logic::controls_ifelse).manual_prefix_suffix(),
    ),
    ("logic_compare", Emitter::value(logic::logic_compare)),
    ("logic_operation", Emitter::value(logic::logic_operation)),
    ("logic_negate", Emitter::value(logic::logic_negate)),
    ("logic_boolean", Emitter::value(logic::logic_boolean)),
    ("logic_null", Emitter::value(logic::logic_null)),
    ("logic_ternary", Emitter::value(logic::logic_ternary)),
    ("logo_move", Emitter::statement(logo::logo_move)),
    ("logo_rotate", Emitter::statement(logo::logo_rotate)),
    ("logo_circle", Emitter::statement(logo::logo_circle)),
    ("logo_pen", Emitter::statement(logo::logo_pen)),
    ("logo_setcolor", Emitter::statement(logo::logo_setcolor)),
    ("logo_getcolor", Emitter::value(logo::logo_getcolor)),
    ("logo_mode", Emitter::statement(logo::logo_mode)),
    ("logo_screen", Emitter::statement(logo::logo_screen)),
    ("logo_set", Emitter::statement(logo::logo_set)),
    ("logo_get", Emitter::value(logo::logo_get)),
    ("controls_repeat_ext", Emitter::statement(loops::controls_repeat_ext)),
    ("controls_repeat", Emitter::statement(loops::controls_repeat_ext)),
    ("controls_whileUntil", Emitter::statement(loops::controls_while_until)),
    ("controls_for", Emitter::statement(loops::controls_for)),
    ("controls_forEach", Emitter::statement(loops::controls_for_each)),
    ("math_number", Emitter::value(math::math_number)),
    ("math_arithmetic", Emitter::value(math::math_arithmetic)),
    ("math_single", Emitter::value(math::math_single)),
    ("math_round", Emitter::value(math::math_single)),
    ("math_trig", Emitter::value(math::math_single)),
    ("math_constant", Emitter::value(math::math_constant)),
    ("math_number_property", Emitter::value(math::math_number_property)),
    ("math_change", Emitter::statement(math::math_change)),
    ("math_modulo", Emitter::value(math::math_modulo)),
    ("math_random_int", Emitter::value(math::math_random_int)),
    ("math_atan2", Emitter::value(math::math_atan2)),
    ("procedures_defreturn", Emitter::statement(procedures::procedures_defreturn)),
    ("procedures_defnoreturn", Emitter::statement(procedures::procedures_defreturn)),
    ("procedures_callreturn", Emitter::value(procedures::procedures_callreturn)),
    ("procedures_callnoreturn", Emitter::statement(procedures::procedures_callnoreturn)),
    ("procedures_ifreturn", Emitter::statement(procedures::procedures_ifreturn)),
    ("text", Emitter::value(text::text)),
    ("text_multiline", Emitter::value(text::text_multiline)),
    ("text_join", Emitter::value(text::text_join)),
    ("text_append", Emitter::statement(text::text_append)),
    ("text_length", Emitter::value(text::text_length)),
    ("text_isEmpty", Emitter::value(text::text_is_empty)),
    ("text_charAt", Emitter::value(text::text_char_at)),
    ("text_changeCase", Emitter::value(text::text_change_case)),
    ("text_print", Emitter::statement(text::text_print)),
    ("text_prompt_ext", Emitter::value(text::text_prompt_ext)),
    ("text_prompt", Emitter::value(text::text_prompt_ext)),
    ("variables_get", Emitter::value(variables::variables_get)),
    ("variables_set", Emitter::statement(variables::variables_set)),
    ("variables_get_dynamic", Emitter::value(variables::variables_get)),
    ("variables_set_dynamic", Emitter::statement(variables::variables_set)),
];

/// Substitutes the documented literal for an unconnected input.
pub(crate) fn or_default(code: String, default: &str) -> String {
    if code.is_empty() {
        default.to_string()
    } else {
        code
    }
}

/// Shape of a block type in the default table.
pub fn shape_of(kind: &str) -> Option<Shape> {
    EMITTERS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, emitter)| emitter.shape)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::blocks::{Block, Workspace};
    use crate::generator::{Code, GeneratorOptions, LogoGenerator};
    use crate::order::Order;

    pub fn gen() -> LogoGenerator {
        gen_with(GeneratorOptions::default())
    }

    pub fn gen_with(options: GeneratorOptions) -> LogoGenerator {
        let mut gen = LogoGenerator::new(options);
        gen.init(&Workspace::default());
        gen
    }

    pub fn num(value: &str) -> Block {
        Block::new("math_number", "num").with_field("NUM", value)
    }

    pub fn text(value: &str) -> Block {
        Block::new("text", "txt").with_field("TEXT", value)
    }

    pub fn var(name: &str) -> Block {
        Block::new("variables_get", "var").with_variable("VAR", name)
    }

    pub fn value(gen: &mut LogoGenerator, block: &Block) -> (String, Order) {
        match gen.block_to_code(Some(block), false).unwrap() {
            Code::Value(code, order) => (code, order),
            other => panic!("expected a value, got {:?}", other),
        }
    }

    pub fn statement(gen: &mut LogoGenerator, block: &Block) -> String {
        match gen.block_to_code(Some(block), false).unwrap() {
            Code::Statement(code) => code,
            other => panic!("expected a statement, got {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_no_duplicate_block_types() {
        let mut kinds = EMITTERS.iter().map(|(kind, _)| *kind).collect::<Vec<_>>();
        let total = kinds.len();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), total);
    }

    #[test]
    fn shapes_distinguish_values_from_statements() {
        assert_eq!(shape_of("math_number"), Some(Shape::Value));
        assert_eq!(shape_of("text_print"), Some(Shape::Statement));
        assert_eq!(shape_of("no_such_block"), None);
    }
}
