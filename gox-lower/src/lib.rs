pub mod lower;
pub mod tables;

pub use lower::{Lowerer, TagKind, classify, lower, lower_file};
pub use tables::{EntryPoints, RenderApi};
