mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};

/// Runs a line in the session, printing its output or reporting its error.
fn run_line(line: &str, session: &mut Session) {
    match session.execute(line) {
        Ok(output) => output.iter().for_each(|line| println!("{}", line)),
        Err(err) => err.report_to_stderr(line),
    }
}

/// Runs every non-empty line of the input in a fresh session.
fn run_batch(input: &str) {
    let mut session = Session::new();
    input.lines()
        .filter(|line| !line.trim().is_empty())
        .for_each(|line| run_line(line, &mut session));
}

fn read_input(source: impl Read) -> io::Result<String> {
    let mut input = String::new();
    BufReader::new(source).read_to_string(&mut input)?;
    Ok(input)
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run the lines of a file
        match File::open(&filename).and_then(|file| read_input(file)) {
            Ok(input) => run_batch(&input),
            Err(err) => eprintln!("{}: {}", filename, err),
        }
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        match read_input(io::stdin()) {
            Ok(input) => run_batch(&input),
            Err(err) => eprintln!("{}", err),
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };
        let mut session = Session::new();

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(&input, session);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
