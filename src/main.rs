use std::fs::read_to_string;
use std::io::Write;
use std::path::Path;
use std::process::exit;
use std::{env, io};

use thiserror::Error;

use crate::scanner::tokenize;

mod ast;
mod scanner;
mod token;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("file does not seem to exist {0}")]
    FileDoesNotExist(String),
}

fn main() -> Result<(), color_eyre::eyre::Error> {
    color_eyre::install()?;

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        println!("Too many arguments received ({})", args.len());
        println!("Usage: rlox-scanner [script]");
        exit(64);
    }
    if args.len() == 2 {
        let file_path = &args[1];
        run_file(file_path)?;
    } else {
        run_prompt()?;
    }
    Ok(())
}

fn run_file(path_string: &String) -> Result<(), CliError> {
    let path = Path::new(path_string);
    if !path.try_exists()? {
        return Err(CliError::FileDoesNotExist(String::to_string(path_string)));
    }
    let content = read_to_string(path)?;
    run(content);
    Ok(())
}

fn run_prompt() -> Result<(), CliError> {
    fn prompt() {
        print!("> ");
        io::stdout().flush().unwrap();
    }

    let lines = io::stdin().lines();
    prompt();
    for line in lines {
        run(line?);
        prompt();
    }
    Ok(())
}

fn run(source: String) {
    match tokenize(source, report_unrecognized_character) {
        Ok(tokens) => {
            for token in tokens {
                println!("{token}");
            }
        }
        // a fatal scanning error discards the whole batch
        Err(err) => report(err.get_line(), &format!("{err}")),
    }
}

fn report_unrecognized_character(line: usize, character: char) {
    report(line, &format!("Unexpected character '{character}'."))
}

fn report(line: usize, message: &str) {
    eprintln!("[line {line}] Error: {message}")
}
