pub mod repl;
pub mod run;

use crate::args::LyraCliArgs;

/// Exit code for a source error (sysexits `EX_DATAERR`).
pub const EX_DATAERR: i32 = 65;
/// Exit code for a runtime fault (sysexits `EX_SOFTWARE`).
pub const EX_SOFTWARE: i32 = 70;
/// Exit code for an unreadable input file (sysexits `EX_IOERR`).
pub const EX_IOERR: i32 = 74;

/// Dispatches to the file runner or the REPL, returning the process exit
/// code.
pub fn execute(args: &LyraCliArgs) -> i32 {
    match &args.path {
        Some(path) => run::run_file(path, args.disassemble),
        None => repl::repl(args.disassemble),
    }
}
