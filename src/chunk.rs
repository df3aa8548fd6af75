//! The bytecode chunk.

use index_vec::IndexVec;

use crate::value::Value;

index_vec::define_index_type! {
    /// Index into a chunk's constant pool.
    pub struct ConstIdx = u32;
}

/// A run of consecutive instruction bytes that share one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    pub line: u32,
    pub count: u32,
}

/// A compiled unit: instruction bytes, a constant pool, and a run-length
/// encoded table mapping each byte back to the source line that produced it.
///
/// Chunks are append-only. The compiler is the sole writer; the VM only
/// borrows a finished chunk.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    code: Vec<u8>,
    constants: IndexVec<ConstIdx, Value>,
    lines: Vec<LineRun>,
}

impl Chunk {
    pub fn new() -> Chunk {
        Chunk::default()
    }

    /// Appends one instruction or operand byte, recording the source line it
    /// was generated from.
    ///
    /// When `line` equals the line of the last recorded run, that run's count
    /// is incremented instead of starting a new run. This is an append-time
    /// decision only; the table is never re-optimized, and a line may appear
    /// in more than one run when code for an earlier line is emitted after a
    /// later one.
    pub fn write(&mut self, byte: impl Into<u8>, line: u32) {
        self.code.push(byte.into());
        match self.lines.last_mut() {
            Some(run) if run.line == line => run.count += 1,
            _ => self.lines.push(LineRun { line, count: 1 }),
        }
    }

    /// Appends `value` to the constant pool and returns its index.
    ///
    /// The pool itself is unbounded; callers referencing constants through
    /// one-byte operands must check the returned index fits (the compiler
    /// rejects a chunk that would need more than 256 constants).
    pub fn add_constant(&mut self, value: Value) -> ConstIdx {
        self.constants.push(value)
    }

    /// The instruction byte stream.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// The constant at `idx`, if the pool is that large.
    pub fn constant(&self, idx: ConstIdx) -> Option<Value> {
        self.constants.get(idx).copied()
    }

    /// Number of entries in the constant pool.
    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    /// The run-length line table.
    pub fn lines(&self) -> &[LineRun] {
        &self.lines
    }

    /// The source line for the byte at `offset`.
    ///
    /// Scans runs from the start, O(number of runs); this is used for
    /// diagnostics only, never on the execution hot path. Offsets at or past
    /// the end of the code buffer report the final run's line.
    pub fn line_at(&self, offset: usize) -> u32 {
        let mut covered = 0usize;
        for run in &self.lines {
            covered += run.count as usize;
            if offset < covered {
                return run.line;
            }
        }
        self.lines.last().map_or(0, |run| run.line)
    }
}
