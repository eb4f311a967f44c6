use crate::options::DefaultAnswer;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Cancelled,
}

pub trait Confirm {
    fn confirm(&mut self, source: &Path, target: &Path) -> Result<Answer>;
}

pub struct LinePrompt<R, W> {
    input: R,
    output: W,
    default_answer: DefaultAnswer,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W, default_answer: DefaultAnswer) -> Self {
        Self {
            input,
            output,
            default_answer,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, source: &Path, target: &Path) -> Result<Answer> {
        writeln!(self.output, "{} -> {}", source.display(), target.display())
            .and_then(|_| write!(self.output, "Rename {}? ", self.default_answer.hint()))
            .and_then(|_| self.output.flush())
            .context("failed to write prompt")?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => return Ok(Answer::Cancelled),
            Ok(_) => {}
        }

        Ok(parse_answer(&line, self.default_answer))
    }
}

pub fn parse_answer(line: &str, default_answer: DefaultAnswer) -> Answer {
    match line.trim().to_lowercase().as_str() {
        "" => match default_answer {
            DefaultAnswer::Yes => Answer::Yes,
            DefaultAnswer::No => Answer::No,
        },
        "y" | "yes" => Answer::Yes,
        _ => Answer::No,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_answer, Answer, Confirm, LinePrompt};
    use crate::options::DefaultAnswer;
    use std::io::Cursor;
    use std::path::Path;

    #[test]
    fn empty_line_takes_configured_default() {
        assert_eq!(parse_answer("\n", DefaultAnswer::No), Answer::No);
        assert_eq!(parse_answer("\n", DefaultAnswer::Yes), Answer::Yes);
    }

    #[test]
    fn explicit_answers_override_default() {
        assert_eq!(parse_answer("Y\n", DefaultAnswer::No), Answer::Yes);
        assert_eq!(parse_answer("  yes \n", DefaultAnswer::No), Answer::Yes);
        assert_eq!(parse_answer("n\n", DefaultAnswer::Yes), Answer::No);
        assert_eq!(parse_answer("maybe\n", DefaultAnswer::Yes), Answer::No);
    }

    #[test]
    fn prompt_shows_pair_and_reads_one_line_per_question() {
        let mut prompt = LinePrompt::new(Cursor::new("y\nn\n"), Vec::new(), DefaultAnswer::No);
        let a = prompt
            .confirm(Path::new("a.jpg"), Path::new("2020-05-01 10.00.00.jpg"))
            .expect("first");
        let b = prompt
            .confirm(Path::new("b.jpg"), Path::new("2020-05-02 10.00.00.jpg"))
            .expect("second");
        assert_eq!((a, b), (Answer::Yes, Answer::No));

        let shown = String::from_utf8(prompt.into_output()).expect("utf8");
        assert!(shown.starts_with("a.jpg -> 2020-05-01 10.00.00.jpg\nRename [y/N]? "));
        assert!(shown.contains("b.jpg -> 2020-05-02 10.00.00.jpg\n"));
    }

    #[test]
    fn closed_input_cancels() {
        let mut prompt = LinePrompt::new(Cursor::new(""), Vec::new(), DefaultAnswer::Yes);
        let answer = prompt
            .confirm(Path::new("a.jpg"), Path::new("b.jpg"))
            .expect("confirm");
        assert_eq!(answer, Answer::Cancelled);
    }
}
