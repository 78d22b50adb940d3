//! Placeholder resolution against caller-supplied bindings

mod bindings;
mod resolver;

pub use bindings::{Binding, Bindings};
pub use resolver::{InvalidPolicy, MissingPlaceholder, MissingPolicy, Resolution, Resolver};
