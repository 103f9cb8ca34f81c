//! Errors raised while translating a block graph into Logo.
//!
//! Every variant is fatal for the generation pass it occurs in: the emitter
//! returns it, `?` carries it up through the driver, and no partial program
//! is produced.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// No emitter is registered for the block type.
    #[error("Logo generator does not know how to generate code for block type \"{0}\".")]
    UnknownBlockType(String),

    /// A dropdown carried a value outside the closed vocabulary of its block.
    #[error("Unknown {field} option '{value}' on block type \"{block_type}\".")]
    UnsupportedOption {
        block_type: String,
        field: String,
        value: String,
    },

    /// A pair of orthogonal dropdowns selected a combination with no Logo
    /// translation.
    #[error("Unhandled combination ({block_type}): {detail}.")]
    UnhandledCombination { block_type: String, detail: String },

    /// The block is recognized but deliberately not translated yet.
    #[error("{0}")]
    NotSupported(String),

    #[error("Expecting tuple from value block: {0}")]
    ExpectedValue(String),

    #[error("Expecting string from statement block: {0}")]
    ExpectedStatement(String),

    #[error("Invalid colour '{0}': expected #rrggbb.")]
    InvalidColour(String),
}

impl GenerateError {
    pub fn unsupported(block_type: &str, field: &str, value: &str) -> Self {
        Self::UnsupportedOption {
            block_type: block_type.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn unhandled(block_type: &str, detail: impl Into<String>) -> Self {
        Self::UnhandledCombination {
            block_type: block_type.to_string(),
            detail: detail.into(),
        }
    }
}
