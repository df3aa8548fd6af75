//! The Lyra compiler.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

use crate::chunk::Chunk;

/// Compile the input source code into a chunk ready for execution.
pub fn compile(input: &str) -> Result<Chunk, Vec<error::CompilerError>> {
    parser::parse(input)
}
