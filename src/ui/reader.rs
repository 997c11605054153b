// src/ui/reader.rs

//! Prompts, behind a [`Prompter`] so runs can be scripted.

use crate::core::command::Context;
use crate::core::errors::{ConsoleError, ConsoleResult};
use dialoguer::{Confirm, Input, MultiSelect, Password, Select, theme::ColorfulTheme};
use log::debug;
use std::collections::VecDeque;
use std::fmt;
use std::io;

/// Low-level prompt primitives. Implemented over `dialoguer` for terminals and
/// over a queue of answers for tests and scripted runs.
pub trait Prompter {
    /// Free-text input.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> ConsoleResult<String>;
    /// Input that is not echoed.
    fn password(&mut self, prompt: &str) -> ConsoleResult<String>;
    /// Yes/no question.
    fn confirm(&mut self, prompt: &str, default: bool) -> ConsoleResult<bool>;
    /// Index of one chosen item.
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> ConsoleResult<usize>;
    /// Indices of the chosen items.
    fn multi_select(&mut self, prompt: &str, items: &[String]) -> ConsoleResult<Vec<usize>>;
}

/// Interactive prompts on the controlling terminal.
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl fmt::Debug for DialoguerPrompter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialoguerPrompter").finish_non_exhaustive()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> ConsoleResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        match default {
            Some("") => input = input.allow_empty(true),
            Some(default) => input = input.default(default.to_string()),
            None => {}
        }
        Ok(input.interact_text()?)
    }

    fn password(&mut self, prompt: &str) -> ConsoleResult<String> {
        Ok(Password::with_theme(&self.theme).with_prompt(prompt).interact()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> ConsoleResult<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> ConsoleResult<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> ConsoleResult<Vec<usize>> {
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .interact()?)
    }
}

/// Answers prompts from a queue. An empty answer selects the default.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Answers are consumed in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next(&mut self, prompt: &str) -> ConsoleResult<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            ConsoleError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer left for '{}'", prompt),
            ))
        })
    }
}

fn index_of(answer: &str, items: &[String]) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|i| *i < items.len())
        .or_else(|| items.iter().position(|item| item == answer))
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> ConsoleResult<String> {
        let answer = self.next(prompt)?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn password(&mut self, prompt: &str) -> ConsoleResult<String> {
        self.next(prompt)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> ConsoleResult<bool> {
        let answer = self.next(prompt)?.to_lowercase();
        Ok(match answer.as_str() {
            "" => default,
            "y" | "yes" | "true" | "1" => true,
            _ => false,
        })
    }

    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> ConsoleResult<usize> {
        let answer = self.next(prompt)?;
        if answer.is_empty() {
            return Ok(default);
        }
        index_of(&answer, items).ok_or_else(|| {
            ConsoleError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not one of the choices", answer),
            ))
        })
    }

    fn multi_select(&mut self, prompt: &str, items: &[String]) -> ConsoleResult<Vec<usize>> {
        let answer = self.next(prompt)?;
        Ok(answer
            .split(',')
            .map(str::trim)
            .filter_map(|a| index_of(a, items))
            .collect())
    }
}

/// Reads user input through a [`Prompter`].
pub struct Reader {
    prompter: Box<dyn Prompter>,
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader").finish_non_exhaustive()
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new(Box::new(DialoguerPrompter::default()))
    }
}

impl Reader {
    /// A reader over any prompter.
    pub fn new(prompter: Box<dyn Prompter>) -> Self {
        Self { prompter }
    }

    /// A reader that answers from a fixed list.
    pub fn scripted<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Box::new(ScriptedPrompter::new(answers)))
    }

    /// Asks for free text.
    ///
    /// # Errors
    /// Returns `ConsoleError::Prompt` when the prompt fails.
    pub fn prompt(&mut self, message: &str, default: Option<&str>) -> ConsoleResult<String> {
        self.prompter.input(message, default)
    }

    /// Asks for a secret.
    ///
    /// # Errors
    /// As [`Reader::prompt`].
    pub fn prompt_hidden(&mut self, message: &str) -> ConsoleResult<String> {
        self.prompter.password(message)
    }

    /// Asks a yes/no question.
    ///
    /// # Errors
    /// As [`Reader::prompt`].
    pub fn confirm(&mut self, question: &str, default: bool) -> ConsoleResult<bool> {
        self.prompter.confirm(question, default)
    }

    /// Lets the user pick one item; returns the item.
    pub fn choice(&mut self, question: &str, items: &[String], default: usize) -> ConsoleResult<String> {
        let index = self.prompter.select(question, items, default)?;
        Ok(items.get(index).cloned().unwrap_or_default())
    }

    /// Lets the user pick any number of items; returns them in list order.
    pub fn choices(&mut self, question: &str, items: &[String]) -> ConsoleResult<Vec<String>> {
        let mut indexes = self.prompter.multi_select(question, items)?;
        indexes.sort_unstable();
        indexes.dedup();
        Ok(indexes.into_iter().filter_map(|i| items.get(i).cloned()).collect())
    }

    /// Free-text answer, expanded to the single possibility it is a prefix of.
    pub fn ask_with_completion(
        &mut self,
        question: &str,
        possibilities: &[String],
        default: Option<&str>,
    ) -> ConsoleResult<String> {
        let answer = self.prompter.input(question, default)?;
        Ok(complete(&answer, possibilities))
    }
}

/// `answer` itself when it is exact or ambiguous, else the unique possibility it prefixes.
fn complete(answer: &str, possibilities: &[String]) -> String {
    if answer.is_empty() || possibilities.iter().any(|p| p == answer) {
        return answer.to_string();
    }
    let mut matches = possibilities.iter().filter(|p| p.starts_with(answer));
    match (matches.next(), matches.next()) {
        (Some(only), None) => {
            debug!("Completed '{}' to '{}'", answer, only);
            only.clone()
        }
        _ => answer.to_string(),
    }
}

// --- Handler-facing helpers ---

impl Context<'_> {
    /// Asks a question in the `question` style.
    ///
    /// # Errors
    /// Returns `ConsoleError::Prompt` when the terminal interaction fails.
    pub fn ask(&self, question: &str, default: Option<&str>) -> ConsoleResult<String> {
        let styled = self.writer().paint("question", question);
        self.reader().prompt(&styled, default)
    }

    /// Asks for input without echo.
    ///
    /// # Errors
    /// As [`Context::ask`].
    pub fn secret(&self, question: &str) -> ConsoleResult<String> {
        let styled = self.writer().paint("question", question);
        self.reader().prompt_hidden(&styled)
    }

    /// Asks a yes/no question.
    ///
    /// # Errors
    /// As [`Context::ask`].
    pub fn confirm(&self, question: &str, default: bool) -> ConsoleResult<bool> {
        let styled = self.writer().paint("question", question);
        self.reader().confirm(&styled, default)
    }

    /// Lets the user pick one item.
    ///
    /// # Errors
    /// As [`Context::ask`].
    pub fn choice(&self, question: &str, items: &[String], default: usize) -> ConsoleResult<String> {
        let styled = self.writer().paint("question", question);
        self.reader().choice(&styled, items, default)
    }

    /// Lets the user pick several items, returned in list order.
    ///
    /// # Errors
    /// As [`Context::ask`].
    pub fn choices(&self, question: &str, items: &[String]) -> ConsoleResult<Vec<String>> {
        let styled = self.writer().paint("question", question);
        self.reader().choices(&styled, items)
    }

    /// Free text, completed to the one possibility it is a prefix of.
    ///
    /// # Errors
    /// As [`Context::ask`].
    pub fn ask_with_completion(
        &self,
        question: &str,
        possibilities: &[String],
        default: Option<&str>,
    ) -> ConsoleResult<String> {
        let hint = self.writer().paint("comment", &format!("[{}]", possibilities.join(", ")));
        let styled = format!("{} {}", self.writer().paint("question", question), hint);
        self.reader().ask_with_completion(&styled, possibilities, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Setup ---
    fn items(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scripted_prompts_and_defaults() {
        let mut reader = Reader::scripted(["Ada", "", "yes", ""]);
        assert_eq!(reader.prompt("Name?", None).unwrap(), "Ada");
        assert_eq!(reader.prompt("City?", Some("Paris")).unwrap(), "Paris");
        assert!(reader.confirm("Sure?", false).unwrap());
        assert!(reader.confirm("Really?", true).unwrap());
    }

    #[test]
    fn test_choice_by_index_or_text() {
        let options = items(&["red", "green", "blue"]);
        let mut reader = Reader::scripted(["1", "blue", "", "2, red, 9"]);
        assert_eq!(reader.choice("Colour?", &options, 0).unwrap(), "green");
        assert_eq!(reader.choice("Colour?", &options, 0).unwrap(), "blue");
        assert_eq!(reader.choice("Colour?", &options, 0).unwrap(), "red");
        assert_eq!(reader.choices("Colours?", &options).unwrap(), items(&["red", "blue"]));
    }

    #[test]
    fn test_invalid_choice_and_exhaustion() {
        let options = items(&["a"]);
        let mut reader = Reader::scripted(["z"]);
        assert!(reader.choice("?", &options, 0).is_err());
        assert!(matches!(reader.prompt("?", None), Err(ConsoleError::Io(_))));
    }

    #[test]
    fn test_completion() {
        let possibilities = items(&["deploy", "destroy", "build"]);
        assert_eq!(complete("b", &possibilities), "build");
        assert_eq!(complete("de", &possibilities), "de");
        assert_eq!(complete("deploy", &possibilities), "deploy");

        let mut reader = Reader::scripted(["bu"]);
        assert_eq!(
            reader.ask_with_completion("Target?", &possibilities, None).unwrap(),
            "build"
        );
    }
}
