//! Serializers for the styled-text tree

mod markup;
mod plain;

pub use markup::to_markup;
pub use plain::to_plain_text;
