//! Plain stdin/stdout prompt helpers for the interactive loop.

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Prompt the user to select from numbered options; returns the chosen index.
pub fn prompt_select(prompt: &str, options: &[(&str, &str)], default: usize) -> Result<usize> {
    println!("\n{}", prompt);
    for (i, (name, desc)) in options.iter().enumerate() {
        let marker = if i == default { " (default)" } else { "" };
        println!("  {}. {} - {}{}", i + 1, name, desc, marker);
    }

    print!("\nEnter choice [{}]: ", default + 1);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        return Ok(default);
    }

    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= options.len() => Ok(n - 1),
        _ => {
            println!("Invalid choice, using default.");
            Ok(default)
        }
    }
}

/// Prompt for a single trimmed line of input.
pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Read source lines from stdin until a lone `END` line.
pub fn read_source_stdin() -> Result<String> {
    Ok(read_source(io::stdin().lock())?)
}

/// Read source lines until a lone `END` line or end of input, prompting with
/// `>>> ` per line.
fn read_source(mut reader: impl BufRead) -> io::Result<String> {
    let mut source = String::new();
    loop {
        print!(">>> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim_end() == "END" {
            break;
        }
        source.push_str(line.trim_end_matches(['\r', '\n']));
        source.push('\n');
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_source_stops_at_end_marker() {
        let input = Cursor::new("print('a')\nprint('b')\nEND\nprint('c')\n");
        let source = read_source(input).unwrap();
        assert_eq!(source, "print('a')\nprint('b')\n");
    }

    #[test]
    fn test_read_source_without_marker_reads_everything() {
        let input = Cursor::new("x = 1\ny = 2\n");
        let source = read_source(input).unwrap();
        assert_eq!(source, "x = 1\ny = 2\n");
    }

    #[test]
    fn test_read_source_empty_input() {
        let source = read_source(Cursor::new("")).unwrap();
        assert_eq!(source, "");
    }

    #[test]
    fn test_read_source_handles_crlf() {
        let input = Cursor::new("print('a')\r\nEND\r\n");
        let source = read_source(input).unwrap();
        assert_eq!(source, "print('a')\n");
    }
}
