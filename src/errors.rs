//! Error types for the compile and execution pipeline.

use std::result;

use thiserror::Error;

use crate::compiler::error::CompilerError;
use crate::utils::Join;

pub type Result<T> = result::Result<T, Error>;

/// Enum representing any lyra error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The scanner or compiler produced at least one diagnostic; no chunk was
    /// built and nothing was executed.
    #[error("compile error: {}", .0.iter().join("; "))]
    Compile(Vec<CompilerError>),
    /// The VM aborted while executing a valid chunk.
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// A fault raised by the VM, tagged with the source line of the offending
/// instruction (reconstructed from the chunk's line table).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} [line {line}]")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: u32,
}

/// Kind of RuntimeError.
///
/// These are structural faults: they indicate a corrupt or hand-crafted
/// invalid chunk, since a correct compiler never emits code that triggers
/// them. The VM detects them defensively rather than executing undefined
/// behavior.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    #[error("stack underflow")]
    StackUnderflow,
    #[error("stack overflow")]
    StackOverflow,
    #[error("unknown opcode {byte:#04x} at offset {offset}")]
    UnknownOpcode { byte: u8, offset: usize },
    #[error("truncated instruction at offset {offset}")]
    TruncatedInstruction { offset: usize },
    #[error("constant index {index} out of range")]
    BadConstant { index: u8 },
    #[error("execution ran off the end of the chunk")]
    MissingReturn,
}
