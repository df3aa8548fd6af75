use std::fmt::{Debug, Display};

/// The operation code.
///
/// The set is closed: every byte in a chunk's code buffer is either one of
/// these discriminants or the one-byte operand that follows [`OpCode::Constant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OpCode {
    /// Pushes `constants[operand]` onto the stack. Followed by one operand byte.
    Constant = 0,
    /// Implements `TOS = -TOS`.
    Negate = 1,
    /// Implements `TOS = TOS1 + TOS`.
    Add = 2,
    /// Implements `TOS = TOS1 - TOS`.
    Subtract = 3,
    /// Implements `TOS = TOS1 * TOS`.
    Multiply = 4,
    /// Implements `TOS = TOS1 / TOS`.
    ///
    /// Division by zero follows IEEE-754: the result is a signed infinity or
    /// NaN and execution continues.
    Divide = 5,
    /// Halts execution of the current chunk, yielding TOS to the caller
    /// (or the void result if the stack is empty).
    Return = 6,
}

impl OpCode {
    /// Width of the whole instruction in bytes, operands included.
    pub fn width(self) -> usize {
        match self {
            OpCode::Constant => 2,
            OpCode::Negate
            | OpCode::Add
            | OpCode::Subtract
            | OpCode::Multiply
            | OpCode::Divide
            | OpCode::Return => 1,
        }
    }

    /// The disassembler mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Constant => "OP_CONSTANT",
            OpCode::Negate => "OP_NEGATE",
            OpCode::Add => "OP_ADD",
            OpCode::Subtract => "OP_SUBTRACT",
            OpCode::Multiply => "OP_MULTIPLY",
            OpCode::Divide => "OP_DIVIDE",
            OpCode::Return => "OP_RETURN",
        }
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> u8 {
        opcode as u8
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    /// Decodes an instruction byte. An unrecognized byte is returned as the
    /// error so the VM can name it in its diagnostic.
    fn try_from(byte: u8) -> Result<OpCode, u8> {
        Ok(match byte {
            0 => OpCode::Constant,
            1 => OpCode::Negate,
            2 => OpCode::Add,
            3 => OpCode::Subtract,
            4 => OpCode::Multiply,
            5 => OpCode::Divide,
            6 => OpCode::Return,
            _ => return Err(byte),
        })
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}
