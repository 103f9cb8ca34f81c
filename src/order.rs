//! Operator precedence for emitted Logo expressions.
//!
//! Lower values bind tighter. Fractional levels split one precedence class
//! into siblings: multiplication and division share class 2, subtraction and
//! addition share class 3.

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Order {
    /// `()` and literals.
    Atomic,
    /// `-x`
    UnaryNegation,
    /// `*`
    Multiplication,
    /// `/`
    Division,
    /// `-`
    Subtraction,
    /// `+`
    Addition,
    /// `= < > <= >= <>`
    Comparison,
    /// `pr "|Hello World|`
    Procedure,
    /// `(...)`
    None,
}

/// Outer/inner pairings that do not need parentheses even though they sit in
/// the same precedence class.
pub const ORDER_OVERRIDES: [(Order, Order); 2] = [
    // a * (b * c) -> a * b * c
    (Order::Multiplication, Order::Multiplication),
    // a + (b + c) -> a + b + c
    (Order::Addition, Order::Addition),
];

impl Order {
    pub fn value(self) -> f64 {
        match self {
            Order::Atomic => 0.0,
            Order::UnaryNegation => 1.0,
            Order::Multiplication => 2.1,
            Order::Division => 2.2,
            Order::Subtraction => 3.1,
            Order::Addition => 3.2,
            Order::Comparison => 4.0,
            Order::Procedure => 5.0,
            Order::None => 99.0,
        }
    }

    /// The integral precedence class the order belongs to.
    pub fn class(self) -> u32 {
        self.value().floor() as u32
    }
}

/// Decides whether an inner expression of order `inner` must be wrapped in
/// parentheses when placed in a context that demands `outer`.
pub fn needs_parens(outer: Order, inner: Order) -> bool {
    let outer_class = outer.class();
    let inner_class = inner.class();
    if outer_class > inner_class {
        return false;
    }
    if outer_class == inner_class
        && (outer_class == Order::Atomic.class() || outer_class == Order::None.class())
    {
        return false;
    }
    !ORDER_OVERRIDES
        .iter()
        .any(|&(o, i)| o == outer && i == inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tighter_inner_is_left_bare() {
        assert!(!needs_parens(Order::Addition, Order::Multiplication));
        assert!(!needs_parens(Order::None, Order::Procedure));
        assert!(!needs_parens(Order::Comparison, Order::Atomic));
    }

    #[test]
    fn looser_inner_is_wrapped() {
        assert!(needs_parens(Order::Multiplication, Order::Addition));
        assert!(needs_parens(Order::Atomic, Order::Procedure));
        assert!(needs_parens(Order::UnaryNegation, Order::Subtraction));
    }

    #[test]
    fn same_class_siblings_are_wrapped_unless_overridden() {
        assert!(needs_parens(Order::Subtraction, Order::Subtraction));
        assert!(needs_parens(Order::Subtraction, Order::Addition));
        assert!(needs_parens(Order::Division, Order::Multiplication));
        assert!(!needs_parens(Order::Addition, Order::Addition));
        assert!(!needs_parens(Order::Multiplication, Order::Multiplication));
    }

    #[test]
    fn atomic_and_none_pairs_never_wrap() {
        assert!(!needs_parens(Order::Atomic, Order::Atomic));
        assert!(!needs_parens(Order::None, Order::None));
    }

    #[test]
    fn fractional_levels_order_within_a_class() {
        assert!(Order::Multiplication < Order::Division);
        assert!(Order::Subtraction < Order::Addition);
        assert_eq!(Order::Division.class(), 2);
        assert_eq!(Order::Addition.class(), 3);
    }
}
