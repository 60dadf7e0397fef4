use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Asks for confirmation once the eligible-file count exceeds the
/// configured threshold. At or below the threshold the run proceeds
/// without interaction.
pub fn confirm(eligible: u64, threshold: u64) -> Result<bool> {
    if eligible <= threshold {
        return Ok(true);
    }
    println!(
        "Warning: Found {} files exceeding limit of {}",
        eligible, threshold
    );
    read_answer(&mut io::stdin().lock(), &mut io::stdout())
}

/// Prompts and reads one line; only a trimmed, case-insensitive `y`
/// proceeds. Empty input and end of input decline.
fn read_answer(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "Continue? (y/n): ").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
