use std::io::{BufRead, Write};

use crate::config::{ConfigError, GameConfig};

/// Asks for the grid size and border mode, one answer per line.
pub fn read_config<I: BufRead, O: Write>(input: &mut I, output: &mut O) -> Result<GameConfig, ConfigError> {
    let rows = ask_number(input, output, "Input the row (20 recommended):", "row count")?;
    let cols = ask_number(input, output, "Input the column (30 recommended):", "column count")?;
    let answer = ask(input, output, "Is the map borderless? (y/n):")?;
    let borderless = answer.chars().next().map_or(false, |c| c.eq_ignore_ascii_case(&'y'));

    GameConfig::new(rows, cols, borderless)
}

fn ask<I: BufRead, O: Write>(input: &mut I, output: &mut O, question: &str) -> Result<String, ConfigError> {
    writeln!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ConfigError::UnexpectedEof);
    }
    Ok(line.trim().to_string())
}

fn ask_number<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    question: &str,
    field: &'static str,
) -> Result<i32, ConfigError> {
    let answer = ask(input, output, question)?;
    answer.parse().map_err(|_| ConfigError::InvalidNumber { field, input: answer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(script: &str) -> (Result<GameConfig, ConfigError>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let res = read_config(&mut input, &mut output);
        (res, String::from_utf8(output).unwrap())
    }

    #[test]
    fn reads_size_and_border_mode() {
        let (res, output) = run("20\n30\ny\n");
        let config = res.unwrap();
        assert_eq!((config.rows(), config.cols(), config.borderless()), (20, 30, true));
        assert_eq!(
            output,
            "Input the row (20 recommended):\nInput the column (30 recommended):\nIs the map borderless? (y/n):\n"
        );
    }

    #[test]
    fn border_answer_is_case_insensitive() {
        assert!(run("5\n5\nY\n").0.unwrap().borderless());
        assert!(run("5\n5\n  yes\n").0.unwrap().borderless());
        assert!(!run("5\n5\nn\n").0.unwrap().borderless());
        assert!(!run("5\n5\n\n").0.unwrap().borderless());
    }

    #[test]
    fn non_positive_size_is_a_config_error() {
        match run("0\n10\nn\n").0 {
            Err(ConfigError::InvalidDimensions { rows: 0, cols: 10 }) => {}
            other => panic!("unexpected {:?}", other),
        }
        match run("10\n-4\nn\n").0 {
            Err(ConfigError::InvalidDimensions { rows: 10, cols: -4 }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn garbage_size_is_reported() {
        match run("twenty\n30\ny\n").0 {
            Err(ConfigError::InvalidNumber { field: "row count", input }) => assert_eq!(input, "twenty"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn stops_at_end_of_input() {
        assert!(matches!(run("12\n").0, Err(ConfigError::UnexpectedEof)));
    }
}
