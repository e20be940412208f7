//! Interactive terminal input.

use std::io::{self, Write};

/// Ask a yes/no question, defaulting to no.
pub fn prompt_confirmation(message: &str) -> io::Result<bool> {
    print!("{message} [y/N]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
