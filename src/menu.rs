//! Numbered console menus with range selection.
//!
//! Users answer with 1-based numbers separated by commas, where any element
//! may be a hyphenated range in either order (`1-3, 5, 11-9`). The entry one
//! past the last item selects everything, `E` exits and `?` shows help.

use crate::constants::MENU_HELP_TEXT;
use crate::errors::{AppError, AppResult};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

/// Parses a range selection against a list of `len` entries.
///
/// Returns the selected zero-based indices, sorted and without duplicates.
/// Whitespace must already be stripped.
///
/// # Errors
///
/// Returns `InvalidInput` if the text contains anything other than digits,
/// commas and hyphens, has an empty or malformed element, or refers to an
/// entry outside `1..=len`.
pub fn parse_selection(input: &str, len: usize) -> AppResult<Vec<usize>> {
    if let Some(c) = input
        .chars()
        .find(|c| !(c.is_ascii_digit() || *c == ',' || *c == '-'))
    {
        return Err(AppError::InvalidInput(format!(
            "Unexpected character '{c}' in selection"
        )));
    }

    let mut indices = BTreeSet::new();
    for element in input.split(',') {
        let (lo, hi) = match element.split_once('-') {
            None => {
                let n = parse_entry_number(element)?;
                (n, n)
            }
            Some((a, b)) => {
                let a = parse_entry_number(a)?;
                let b = parse_entry_number(b)?;
                (a.min(b), a.max(b))
            }
        };
        if lo == 0 || hi > len {
            return Err(AppError::InvalidInput(format!(
                "Selection must be between 1 and {len}"
            )));
        }
        indices.extend(lo - 1..hi);
    }

    Ok(indices.into_iter().collect())
}

fn parse_entry_number(text: &str) -> AppResult<usize> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidInput(format!(
            "'{text}' is not a number or range"
        )));
    }
    Ok(text.parse()?)
}

/// Shows `entries` as a numbered menu and returns the user's selection.
///
/// Malformed answers and `?` re-prompt; `E`, end of input, and an empty
/// `entries` list return an empty selection.
///
/// # Errors
///
/// Returns `IoError` if reading from `input` or writing to `output` fails.
pub fn select_from_list<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    entries: &[String],
    title: &str,
) -> AppResult<Vec<usize>> {
    if entries.is_empty() {
        writeln!(output, "\n{title}:")?;
        pause(input, output, "Error: Nothing to list. Press return to continue")?;
        return Ok(Vec::new());
    }

    let all_entries = (entries.len() + 1).to_string();
    loop {
        writeln!(output, "\n{title}:")?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(output, "{:>3} - {entry}", i + 1)?;
        }
        writeln!(output, "{all_entries:>3} - All of the above")?;
        writeln!(output, "{:>3} - Help", "?")?;
        writeln!(output, "{:>3} - Exit", "E")?;

        write!(output, "Choose one or more items from the menu: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(Vec::new());
        };
        let response: String = line.chars().filter(|c| !c.is_whitespace()).collect();

        if response == "?" {
            writeln!(output, "{MENU_HELP_TEXT}")?;
            pause(input, output, "Press return to continue")?;
            continue;
        }
        if response.eq_ignore_ascii_case("e") {
            return Ok(Vec::new());
        }
        if response == all_entries {
            return Ok((0..entries.len()).collect());
        }

        match parse_selection(&response, entries.len()) {
            Ok(indices) => return Ok(indices),
            Err(e) => {
                writeln!(output, "{e}")?;
                pause(input, output, "Error: Invalid response. Press return to continue")?;
            }
        }
    }
}

/// Reads one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> AppResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn pause<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> AppResult<()> {
    write!(output, "{message}")?;
    output.flush()?;
    read_line(input)?;
    Ok(())
}
