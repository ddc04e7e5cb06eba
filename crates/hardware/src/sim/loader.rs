//! Hex text program loader.
//!
//! This module reads machine-code programs supplied as text. It performs:
//! 1. **Parsing:** One 32-bit hexadecimal word per non-empty, non-comment line.
//! 2. **Normalization:** Comment lines start with `#`; interior whitespace is stripped.
//! 3. **Placement:** Words land at sequential instruction-memory indices
//!    starting at 0, capped at the memory capacity (excess lines are ignored).
//!
//! A stored word of 0 acts as the end-of-program sentinel when reached by
//! fetch, so programs need no explicit halt instruction.

use std::fs;
use std::path::Path;

use crate::common::error::LoadError;
use crate::core::Cpu;

/// Parses hex program text into machine words.
///
/// Blank lines and lines whose first character is `#` are skipped. Interior
/// whitespace is stripped from every other line, an optional `0x`/`0X` prefix
/// is accepted, and the surviving token is parsed as a 32-bit hexadecimal
/// word. At most `capacity` words are returned; the rest of the input is
/// ignored.
///
/// # Arguments
///
/// * `text`     - The program text.
/// * `capacity` - Maximum number of words to produce.
///
/// # Returns
///
/// The parsed words in program order, or the first parse failure.
pub fn parse_program(text: &str, capacity: usize) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        if words.len() >= capacity {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let token: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(&token);

        let word = u32::from_str_radix(digits, 16).map_err(|_| LoadError::MalformedWord {
            line: line_index + 1,
            token: token.clone(),
        })?;
        words.push(word);
    }

    Ok(words)
}

/// Loads a hex program file into a CPU's instruction memory.
///
/// Reads the file at `path`, parses it with [`parse_program`], and places the
/// words at instruction-memory indices `0..N`.
///
/// # Arguments
///
/// * `cpu`  - The CPU whose instruction memory receives the program.
/// * `path` - Path to the program file.
///
/// # Returns
///
/// The number of words loaded, or the load failure.
pub fn load_program<P: AsRef<Path>>(cpu: &mut Cpu, path: P) -> Result<usize, LoadError> {
    let text = fs::read_to_string(path)?;
    let words = parse_program(&text, cpu.imem.len())?;
    cpu.load_words(&words);
    Ok(words.len())
}
