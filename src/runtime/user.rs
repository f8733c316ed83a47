//! Confirmation prompts.

use anyhow::Result;

use std::io::{self, BufRead, Write};

/// Ask `prompt` on `output` and read a yes/no answer from `input`.
///
/// Anything other than `y` or `yes` (case-insensitive) counts as no.
pub(crate) fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

/// Prompt on stdout and read the answer from stdin.
pub(super) fn confirm(prompt: &str) -> Result<bool> {
    confirm_with_io(prompt, &mut io::stdin().lock(), &mut io::stdout())
}

#[cfg(test)]
mod tests {
    use super::confirm_with_io;
    use anyhow::Result;
    use std::io::Cursor;

    fn answer(input: &str) -> Result<(bool, String)> {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let ok = confirm_with_io("Remove 2 packages?", &mut input, &mut output)?;
        Ok((ok, String::from_utf8(output)?))
    }

    #[test]
    fn accepts_yes() -> Result<()> {
        for case in ["y\n", "Y\n", "yes\n", " YES \n"] {
            let (ok, _) = answer(case)?;
            assert!(ok, "expected '{}' to be accepted", case);
        }
        Ok(())
    }

    #[test]
    fn rejects_everything_else() -> Result<()> {
        for case in ["n\n", "no\n", "\n", "", "yep\n"] {
            let (ok, _) = answer(case)?;
            assert!(!ok, "expected '{}' to be rejected", case);
        }
        Ok(())
    }

    #[test]
    fn writes_prompt_with_default_hint() -> Result<()> {
        let (_, out) = answer("n\n")?;
        assert_eq!(out, "Remove 2 packages? [y/N] ");
        Ok(())
    }
}
