use std::io::{self, BufRead, Write};

use lyra_lang::Vm;

use super::run::evaluate;

/// Line-at-a-time REPL over one long-lived VM. Errors are printed but never
/// end the session; EOF (ctrl-D) exits cleanly.
pub fn repl(disassemble: bool) -> i32 {
    let stdin = io::stdin();
    let mut vm = Vm::new();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break 0,
            Ok(_) => {
                if !line.trim().is_empty() {
                    evaluate(&mut vm, &line, disassemble);
                }
            }
            Err(err) => {
                eprintln!("{err}");
                break 1;
            }
        }
    }
}
