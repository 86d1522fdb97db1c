use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "sec", "csc", "asin", "acos", "atan", "sinh", "cosh", "tanh",
    "exp", "log", "log10", "log2", "sqrt", "nthroot", "abs", "norm", "det", "max", "min",
];

const CONSTANTS: &[&str] = &["pi", "inf"];

pub struct EqnHelper {
    commands: Vec<String>,
}

impl EqnHelper {
    pub fn new(directive: &str) -> Self {
        Self {
            commands: vec![
                directive.to_string(),
                "help".to_string(),
                "quit".to_string(),
                "exit".to_string(),
            ],
        }
    }

    fn candidates<'a>(&'a self, word: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.commands
            .iter()
            .map(String::as_str)
            .chain(FUNCTIONS.iter().copied())
            .chain(CONSTANTS.iter().copied())
            .filter(move |c| c.starts_with(word))
    }
}

impl Completer for EqnHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, word) = extract_word(line, pos);
        if word.is_empty() {
            return Ok((start, Vec::new()));
        }
        let matches = self
            .candidates(word)
            .map(|c| Pair {
                display: c.to_string(),
                replacement: c.to_string(),
            })
            .collect();
        Ok((start, matches))
    }
}

impl Hinter for EqnHelper {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for EqnHelper {}

impl Validator for EqnHelper {}

impl Helper for EqnHelper {}

fn is_word_break(c: char) -> bool {
    c.is_whitespace() || "(,+-*/^=<>~;'.".contains(c)
}

fn extract_word(line: &str, pos: usize) -> (usize, &str) {
    let line = &line[..pos];
    let start = line
        .char_indices()
        .rev()
        .find(|&(_, c)| is_word_break(c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    (start, &line[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_word_after_operator() {
        assert_eq!(extract_word("y = 2*sq", 8), (6, "sq"));
        assert_eq!(extract_word("si", 2), (0, "si"));
        assert_eq!(extract_word("f(x) + ", 7), (7, ""));
    }

    #[test]
    fn test_candidates_include_directive_and_functions() {
        let helper = EqnHelper::new("eqn");
        let found: Vec<&str> = helper.candidates("e").collect();
        assert!(found.contains(&"eqn"));
        assert!(found.contains(&"exp"));
        assert!(found.contains(&"exit"));
        assert!(!found.contains(&"sin"));
    }
}
