//! Quill compiler CLI.
//!
//! `quillc <file>` compiles one source file and prints the WAT module.

use quill_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};

fn main() {
    quillc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        print_usage(&args);
        std::process::exit(1);
    }

    let path = &args[1];

    let Ok(source) = std::fs::read_to_string(path) else {
        eprintln!("ERROR: Unable to open file '{path}'.");
        std::process::exit(1);
    };

    match quillc::compile(&source) {
        Ok(wat) => print!("{wat}"),
        Err(diagnostic) => {
            let mut emitter = TerminalEmitter::stderr();
            // Nothing more useful to do if stderr itself is gone.
            let _ = emitter.emit(&diagnostic);
            let _ = emitter.flush();
            std::process::exit(1);
        }
    }
}

fn print_usage(args: &[String]) {
    let program = args.first().map_or("quillc", String::as_str);
    eprintln!("Usage: {program} <file>");
    eprintln!();
    eprintln!("Compiles a Quill source file to WebAssembly text on stdout.");
    eprintln!("Set QUILL_LOG (e.g. QUILL_LOG=debug) to trace the compiler.");
}
