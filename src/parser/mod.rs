//! Template parsing: tokenizer, styled-text tree, and tree builder

pub mod ast;
pub mod builder;
pub mod lexer;

pub use ast::{Spanned, StyledNode, Tag};
pub use builder::build;
pub use lexer::{tokenize, Syntax, Token, Tokens};
