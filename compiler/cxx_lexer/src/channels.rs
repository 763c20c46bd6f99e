//! The C++ channels.
//!
//! Every channel measures its token with a splice-aware
//! [`Lookahead`](cxx_lexer_core::Lookahead) and only then advances the
//! cursor, so a channel that gives up never has anything to undo.

mod comment;
mod identifier;
mod literal;
mod number;
mod preprocessor;
mod punctuator;
mod whitespace;

pub use comment::CommentChannel;
pub use identifier::IdentifierChannel;
pub use literal::{CharacterChannel, StringChannel};
pub use number::NumberChannel;
pub use preprocessor::PreprocessorChannel;
pub use punctuator::PunctuatorChannel;
pub use whitespace::WhitespaceChannel;

use crate::Channel;

/// The C++ pipeline, in priority order.
pub fn cxx() -> Vec<Box<dyn Channel>> {
    vec![
        Box::new(CommentChannel),
        Box::new(WhitespaceChannel),
        Box::new(StringChannel),
        Box::new(CharacterChannel),
        Box::new(PreprocessorChannel),
        Box::new(NumberChannel),
        Box::new(IdentifierChannel),
        Box::new(PunctuatorChannel),
    ]
}

#[cfg(test)]
mod tests;
