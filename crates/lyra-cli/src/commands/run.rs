use std::{fs, path::Path};

use anyhow::Context;
use lyra_lang::{Vm, compiler, debug as disasm};

use super::{EX_DATAERR, EX_IOERR, EX_SOFTWARE};

/// Compiles and executes a script file, returning the process exit code.
pub fn run_file(path: &Path, disassemble: bool) -> i32 {
    log::debug!("running {}", path.display());
    match read_source(path) {
        Ok(source) => evaluate(&mut Vm::new(), &source, disassemble),
        Err(err) => {
            eprintln!("{err:#}");
            EX_IOERR
        }
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

/// Compiles and runs one source buffer, printing diagnostics or the result
/// value. Shared between the file runner and the REPL.
pub(crate) fn evaluate(vm: &mut Vm, source: &str, disassemble: bool) -> i32 {
    let chunk = match compiler::compile(source) {
        Ok(chunk) => chunk,
        Err(errors) => {
            for err in &errors {
                eprintln!("{err}");
            }
            return EX_DATAERR;
        }
    };
    if disassemble {
        print!("{}", disasm::disassemble_chunk(&chunk, "script"));
    }
    match vm.run(&chunk) {
        Ok(Some(value)) => {
            println!("{value}");
            0
        }
        Ok(None) => 0,
        Err(err) => {
            eprintln!("{err}");
            EX_SOFTWARE
        }
    }
}
