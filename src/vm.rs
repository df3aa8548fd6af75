//! The Lyra virtual machine.

use crate::{
    chunk::{Chunk, ConstIdx},
    compiler, debug,
    errors::{Error, Result, RuntimeError, RuntimeErrorKind},
    opcode::OpCode,
    value::Value,
};

/// Maximum operand stack depth. Exceeding it is a reported fault, never a
/// silent truncation.
const STACK_MAX: usize = 256;

/// A stack-based virtual machine.
///
/// The VM owns only its operand stack; chunks are borrowed for the duration
/// of one run and never mutated. Each run starts from an empty stack, and the
/// stack is cleared again on completion or error, so instances can be reused
/// across programs. There is no shared state between instances: concurrent
/// interpretation means one `Vm` per call site.
#[derive(Debug, Default)]
pub struct Vm {
    stack: Vec<Value>,
}

impl Vm {
    pub fn new() -> Vm {
        Vm { stack: Vec::new() }
    }

    /// Compiles `source` and executes the resulting chunk.
    ///
    /// Returns the program's result value (`None` for the void result), an
    /// [`Error::Compile`] carrying every diagnostic of the failed pass, or an
    /// [`Error::Runtime`] if the chunk aborted mid-execution.
    pub fn interpret(&mut self, source: &str) -> Result<Option<Value>> {
        let chunk = compiler::compile(source).map_err(Error::Compile)?;
        self.run(&chunk)
    }

    /// Executes a pre-built chunk. Lower-level entry for callers that build
    /// or cache chunks themselves.
    pub fn run(&mut self, chunk: &Chunk) -> Result<Option<Value>> {
        self.stack.clear();
        let result = self.execute(chunk);
        // Partial stack state is discarded, never inspected.
        self.stack.clear();
        result.map_err(Error::from)
    }

    /// The fetch-decode-execute loop.
    ///
    /// Dispatch is exhaustive over the closed opcode set; anything else in
    /// the byte stream (unknown opcode, missing operand, out-of-range
    /// constant, stack fault) aborts with a [`RuntimeError`] tagged with the
    /// offending instruction's source line.
    fn execute(&mut self, chunk: &Chunk) -> std::result::Result<Option<Value>, RuntimeError> {
        let code = chunk.code();
        let mut ip = 0usize;

        loop {
            let offset = ip;

            macro_rules! fault {
                ($kind:expr) => {
                    RuntimeError {
                        kind: $kind,
                        line: chunk.line_at(offset),
                    }
                };
            }
            macro_rules! pop {
                () => {
                    match self.stack.pop() {
                        Some(value) => value,
                        None => return Err(fault!(RuntimeErrorKind::StackUnderflow)),
                    }
                };
            }
            macro_rules! push {
                ($value:expr) => {{
                    if self.stack.len() == STACK_MAX {
                        return Err(fault!(RuntimeErrorKind::StackOverflow));
                    }
                    self.stack.push($value);
                }};
            }
            macro_rules! bin_op {
                ($op:tt) => {{
                    let rhs = pop!();
                    let lhs = pop!();
                    push!(lhs $op rhs);
                }};
            }

            let Some(&byte) = code.get(ip) else {
                return Err(fault!(RuntimeErrorKind::MissingReturn));
            };
            ip += 1;

            let opcode = OpCode::try_from(byte)
                .map_err(|byte| fault!(RuntimeErrorKind::UnknownOpcode { byte, offset }))?;

            if log::log_enabled!(log::Level::Trace) {
                let (text, _) = debug::disassemble_instruction(chunk, offset);
                log::trace!("{text:<40} stack={:?}", self.stack);
            }

            match opcode {
                OpCode::Constant => {
                    let Some(&operand) = code.get(ip) else {
                        return Err(fault!(RuntimeErrorKind::TruncatedInstruction { offset }));
                    };
                    ip += 1;
                    let value = chunk
                        .constant(ConstIdx::from_usize(operand as usize))
                        .ok_or_else(|| fault!(RuntimeErrorKind::BadConstant { index: operand }))?;
                    push!(value);
                }
                OpCode::Negate => {
                    let value = pop!();
                    push!(-value);
                }
                OpCode::Add => bin_op!(+),
                OpCode::Subtract => bin_op!(-),
                OpCode::Multiply => bin_op!(*),
                OpCode::Divide => bin_op!(/),
                OpCode::Return => {
                    return Ok(self.stack.pop());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::OpCode;

    /// Builds a chunk computing `-((3 * 3) / 3)`, all on one line.
    fn arithmetic_chunk() -> Chunk {
        let mut chunk = Chunk::new();
        for _ in 0..3 {
            chunk.add_constant(3.0);
        }
        chunk.write(OpCode::Constant, 1);
        chunk.write(0u8, 1);
        chunk.write(OpCode::Constant, 1);
        chunk.write(1u8, 1);
        chunk.write(OpCode::Multiply, 1);
        chunk.write(OpCode::Constant, 1);
        chunk.write(2u8, 1);
        chunk.write(OpCode::Divide, 1);
        chunk.write(OpCode::Negate, 1);
        chunk.write(OpCode::Return, 1);
        chunk
    }

    #[test]
    fn executes_stack_arithmetic_end_to_end() {
        let mut vm = Vm::new();
        assert_eq!(vm.run(&arithmetic_chunk()).unwrap(), Some(-3.0));
    }

    #[test]
    fn constant_operand_resolves_through_the_pool() {
        let mut chunk = Chunk::new();
        chunk.add_constant(1.2);
        chunk.add_constant(5.5);
        chunk.add_constant(12.2);
        chunk.write(OpCode::Constant, 1);
        chunk.write(1u8, 1);
        chunk.write(OpCode::Return, 1);
        assert_eq!(Vm::new().run(&chunk).unwrap(), Some(5.5));
    }

    #[test]
    fn right_operand_is_popped_first() {
        // 6 - 2 must be 4, not -4.
        let mut chunk = Chunk::new();
        chunk.add_constant(6.0);
        chunk.add_constant(2.0);
        chunk.write(OpCode::Constant, 1);
        chunk.write(0u8, 1);
        chunk.write(OpCode::Constant, 1);
        chunk.write(1u8, 1);
        chunk.write(OpCode::Subtract, 1);
        chunk.write(OpCode::Return, 1);
        assert_eq!(Vm::new().run(&chunk).unwrap(), Some(4.0));
    }

    #[test]
    fn return_on_an_empty_stack_yields_the_void_result() {
        let mut chunk = Chunk::new();
        chunk.write(OpCode::Return, 1);
        assert_eq!(Vm::new().run(&chunk).unwrap(), None);
    }

    #[test]
    fn division_by_zero_follows_ieee_semantics() {
        let mut vm = Vm::new();
        assert_eq!(vm.interpret("1 / 0").unwrap(), Some(f64::INFINITY));
        assert_eq!(vm.interpret("-1 / 0").unwrap(), Some(f64::NEG_INFINITY));
        assert!(vm.interpret("0 / 0").unwrap().unwrap().is_nan());
    }

    #[test]
    fn underflow_is_a_fault_with_the_offending_line() {
        let mut chunk = Chunk::new();
        chunk.write(OpCode::Negate, 42);
        let err = Vm::new().run(&chunk).unwrap_err();
        assert_eq!(
            err,
            Error::Runtime(RuntimeError {
                kind: RuntimeErrorKind::StackUnderflow,
                line: 42,
            })
        );
    }

    #[test]
    fn overflow_is_detected_not_silent() {
        let mut chunk = Chunk::new();
        chunk.add_constant(1.0);
        for _ in 0..(STACK_MAX + 1) {
            chunk.write(OpCode::Constant, 1);
            chunk.write(0u8, 1);
        }
        chunk.write(OpCode::Return, 1);
        let err = Vm::new().run(&chunk).unwrap_err();
        assert_eq!(
            err,
            Error::Runtime(RuntimeError {
                kind: RuntimeErrorKind::StackOverflow,
                line: 1,
            })
        );
    }

    #[test]
    fn unknown_opcode_names_the_byte_and_offset() {
        let mut chunk = Chunk::new();
        chunk.write(0xffu8, 3);
        let err = Vm::new().run(&chunk).unwrap_err();
        assert_eq!(
            err,
            Error::Runtime(RuntimeError {
                kind: RuntimeErrorKind::UnknownOpcode {
                    byte: 0xff,
                    offset: 0,
                },
                line: 3,
            })
        );
    }

    #[test]
    fn truncated_constant_instruction_is_a_fault() {
        let mut chunk = Chunk::new();
        chunk.write(OpCode::Constant, 9);
        let err = Vm::new().run(&chunk).unwrap_err();
        assert_eq!(
            err,
            Error::Runtime(RuntimeError {
                kind: RuntimeErrorKind::TruncatedInstruction { offset: 0 },
                line: 9,
            })
        );
    }

    #[test]
    fn out_of_range_constant_index_is_a_fault() {
        let mut chunk = Chunk::new();
        chunk.write(OpCode::Constant, 2);
        chunk.write(5u8, 2);
        let err = Vm::new().run(&chunk).unwrap_err();
        assert_eq!(
            err,
            Error::Runtime(RuntimeError {
                kind: RuntimeErrorKind::BadConstant { index: 5 },
                line: 2,
            })
        );
    }

    #[test]
    fn running_off_the_end_of_the_chunk_is_a_fault() {
        let mut chunk = Chunk::new();
        chunk.add_constant(1.0);
        chunk.write(OpCode::Constant, 6);
        chunk.write(0u8, 6);
        let err = Vm::new().run(&chunk).unwrap_err();
        assert_eq!(
            err,
            Error::Runtime(RuntimeError {
                kind: RuntimeErrorKind::MissingReturn,
                line: 6,
            })
        );
    }
}
