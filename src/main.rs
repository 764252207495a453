use clac::{
    config::Config,
    repl::{self, display::render_result},
    runtime::{
        error::{self, ScriptError},
        interpreter::{Interpreter, InterpreterStack, clac_interpreter::ClacInterpreter},
    },
};
use std::{env::args, io::stderr};

fn main() -> error::Result<()> {
    let config = Config::from_env();

    // Diagnostics go to stderr so that they never mix with results.
    tracing_subscriber::fmt()
        .with_writer(stderr)
        .with_max_level(config.log_level)
        .with_target(false)
        .without_time()
        .init();

    // Create the calculator with its built-in words, then layer the user's words on top.
    let mut interpreter = ClacInterpreter::with_builtins();
    let words_file = config.words_file();

    if let Some(path) = &words_file {
        interpreter.process_words_file(path)?;
    }

    // A single argument is evaluated once and printed, otherwise we start an interactive session.
    let args: Vec<String> = args().collect();

    match args.len() {
        1 => repl::run(&mut interpreter, words_file),

        2 => {
            // Only the message is kept, a runaway expansion leaves a call stack too long to read.
            interpreter.evaluate(&args[1]).map_err(|error| {
                ScriptError::new(error.location().clone(), error.error().clone(), None)
            })?;
            print!("{}", render_result(interpreter.stack()));

            Ok(())
        }

        _ => ScriptError::new_as_result(
            None,
            "Usage: clac [expression]".to_string(),
            None,
        ),
    }
}
