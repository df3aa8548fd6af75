//! Human-readable rendering of compiled chunks.

use std::fmt::Write;

use crate::chunk::{Chunk, ConstIdx};
use crate::opcode::OpCode;

/// Renders every instruction in the chunk under a `== name ==` header.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {name} ==");
    let mut offset = 0;
    while offset < chunk.code().len() {
        let (text, next) = disassemble_instruction(chunk, offset);
        let _ = writeln!(out, "{text}");
        offset = next;
    }
    out
}

/// Renders the instruction at `offset` as `OFFS LINE MNEMONIC [operand]`,
/// returning the text and the offset of the next instruction.
///
/// When the instruction shares its source line with the one before it, the
/// line column shows `   |` instead of repeating the number.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> (String, usize) {
    let mut out = String::new();
    let _ = write!(out, "{offset:04} ");
    if offset > 0 && chunk.line_at(offset) == chunk.line_at(offset - 1) {
        let _ = write!(out, "   | ");
    } else {
        let _ = write!(out, "{:4} ", chunk.line_at(offset));
    }

    let byte = chunk.code()[offset];
    match OpCode::try_from(byte) {
        Ok(opcode @ OpCode::Constant) => match chunk.code().get(offset + 1) {
            Some(&operand) => {
                match chunk.constant(ConstIdx::from_usize(operand as usize)) {
                    Some(value) => {
                        let _ = write!(out, "{:<16} {operand:4} '{value}'", opcode.mnemonic());
                    }
                    None => {
                        let _ = write!(
                            out,
                            "{:<16} {operand:4} <bad constant>",
                            opcode.mnemonic()
                        );
                    }
                }
                (out, offset + 2)
            }
            None => {
                let _ = write!(out, "{:<16} <truncated>", opcode.mnemonic());
                (out, offset + 1)
            }
        },
        Ok(opcode) => {
            let _ = write!(out, "{}", opcode.mnemonic());
            (out, offset + opcode.width())
        }
        Err(byte) => {
            let _ = write!(out, "Unknown opcode {byte}");
            (out, offset + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lines_render_as_a_pipe() {
        let mut chunk = Chunk::new();
        let idx = chunk.add_constant(1.2);
        chunk.write(OpCode::Constant, 123);
        chunk.write(idx.index() as u8, 123);
        chunk.write(OpCode::Negate, 123);
        chunk.write(OpCode::Return, 124);

        let text = disassemble_chunk(&chunk, "test");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== test ==");
        assert_eq!(lines[1], "0000  123 OP_CONSTANT         0 '1.2'");
        assert_eq!(lines[2], "0002    | OP_NEGATE");
        assert_eq!(lines[3], "0003  124 OP_RETURN");
    }

    #[test]
    fn unknown_bytes_are_named_not_executed() {
        let mut chunk = Chunk::new();
        chunk.write(0xabu8, 7);
        let (text, next) = disassemble_instruction(&chunk, 0);
        assert!(text.ends_with("Unknown opcode 171"));
        assert_eq!(next, 1);
    }

    #[test]
    fn truncated_constant_is_rendered_defensively() {
        let mut chunk = Chunk::new();
        chunk.write(OpCode::Constant, 1);
        let (text, next) = disassemble_instruction(&chunk, 0);
        assert!(text.contains("<truncated>"));
        assert_eq!(next, 1);
    }
}
