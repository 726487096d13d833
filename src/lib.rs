pub mod codegen;
pub mod diagnostic;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod program;
pub mod source;
pub mod transform;

pub use diagnostic::ParseError;
pub use pipeline::{hoist, hoist_with, Backend, Frontend, Transformer};
pub use program::Program;
pub use source::Source;
pub use transform::{HeaderStyle, HoistConfig, ScopeMode};
