use std::io::{self, Write};

use thompson_re::Regex;

fn main() -> io::Result<()> {
    env_logger::init();

    println!("Thompson NFA Regex REPL");
    println!("Type an empty pattern to exit.");

    let stdin = io::stdin();
    loop {
        print!("regex> ");
        io::stdout().flush()?;
        let mut pattern = String::new();
        if stdin.read_line(&mut pattern)? == 0 {
            break;
        }
        let pattern = pattern.trim();
        if pattern.is_empty() {
            break;
        }

        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                println!("Compile error: {e}");
                continue;
            }
        };
        println!("Postfix: {}", re.postfix());
        log::debug!("automaton for {re}:\n{}", re.nfa());

        loop {
            println!("Type return to go back to the regex prompt.");
            print!("input> ");
            io::stdout().flush()?;
            let mut input = String::new();
            if stdin.read_line(&mut input)? == 0 {
                return Ok(());
            }
            let input = input.trim_end_matches(['\r', '\n']);
            if input == "return" {
                break;
            }
            if re.is_match(input) {
                println!("Matched!");
            } else {
                println!("No match.");
            }
        }
    }

    Ok(())
}
