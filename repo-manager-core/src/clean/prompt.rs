//! The `delete '<owner/repo>'? [N|y]` confirmation loop

use std::io::{BufRead, Write};

use crate::workspace::RepoRef;
use crate::Result;

/// One answer to the delete prompt, already trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// `y` or `Y`
    Confirm,
    /// empty, `n` or `N`
    Decline,
    /// anything else; the same question is asked again
    Invalid,
}

impl Answer {
    pub fn parse(answer: &str) -> Self {
        match answer {
            "y" | "Y" => Answer::Confirm,
            "" | "n" | "N" => Answer::Decline,
            _ => Answer::Invalid,
        }
    }
}

/// Ask whether `repo` should be deleted until a valid answer is given
///
/// The prompt is written without a line terminator. A non-empty answer ends
/// the line; an empty one does not, a terminal already echoes the newline.
/// End of input is an empty answer. Bytes that are not UTF-8 make an answer
/// invalid rather than failing the read.
pub fn confirm_delete<R, W>(repo: &RepoRef, input: &mut R, output: &mut W) -> Result<bool>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    loop {
        write!(output, "delete '{}'? [N|y]", repo)?;
        output.flush()?;

        let mut line = Vec::new();
        input.read_until(b'\n', &mut line)?;
        let line = String::from_utf8_lossy(&line);
        let answer = line.trim();

        if !answer.is_empty() {
            writeln!(output)?;
        }

        match Answer::parse(answer) {
            Answer::Confirm => return Ok(true),
            Answer::Decline => return Ok(false),
            Answer::Invalid => {
                tracing::debug!(repo = %repo, answer, "Invalid answer, asking again");
            }
        }
    }
}
