pub mod parsing;

pub use parsing::parse_offset;
