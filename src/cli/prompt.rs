//! Confirmation prompts for destructive commands.

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Ask a yes/no question on stdin. Anything other than `y`/`yes` is a no.
pub fn confirm(question: &str) -> bool {
    confirm_from(question, &mut io::stdin().lock())
}

/// Ask a question that must be answered by typing `word` exactly.
pub fn confirm_word(question: &str, word: &str) -> bool {
    confirm_word_from(question, word, &mut io::stdin().lock())
}

fn confirm_from<R: BufRead>(question: &str, input: &mut R) -> bool {
    print!("  {} {} [y/n] ", "?".cyan(), question);
    io::stdout().flush().ok();

    read_line(input).is_some_and(|answer| is_yes(&answer))
}

fn confirm_word_from<R: BufRead>(question: &str, word: &str, input: &mut R) -> bool {
    print!("  {} {} [type '{word}'] ", "⚠".yellow(), question.yellow());
    io::stdout().flush().ok();

    read_line(input).is_some_and(|answer| answer == word)
}

fn read_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    input.read_line(&mut line).ok()?;
    Some(line.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}
