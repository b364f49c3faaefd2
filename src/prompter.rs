use anyhow::{Result, anyhow};
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

use crate::model::{InputDraft, MAX_FEATURES};

pub trait InputPrompter {
    /// Reads one answer. Required questions are repeated until non-empty.
    fn ask(&mut self, question: &str, required: bool) -> Result<String>;
}

pub struct EditorPrompter {
    editor: rustyline::DefaultEditor,
}

impl EditorPrompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: rustyline::DefaultEditor::new()?,
        })
    }
}

impl InputPrompter for EditorPrompter {
    fn ask(&mut self, question: &str, required: bool) -> Result<String> {
        let prompt = format!("? {}: ", question.trim());
        loop {
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let answer = line.trim();
                    if !answer.is_empty() {
                        let _ = self.editor.add_history_entry(answer);
                    }
                    if answer.is_empty() && required {
                        eprintln!("please input a non-empty value");
                        continue;
                    }
                    return Ok(answer.to_string());
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    return Err(anyhow!("input aborted"));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[derive(Default)]
pub struct StdioPrompter;

impl InputPrompter for StdioPrompter {
    fn ask(&mut self, question: &str, required: bool) -> Result<String> {
        let stdin = io::stdin();
        let mut lock = stdin.lock();
        let mut line = String::new();
        loop {
            line.clear();
            print!("? {}: ", question.trim());
            io::stdout().flush()?;
            if lock.read_line(&mut line)? == 0 {
                return Err(anyhow!("input aborted"));
            }
            let answer = line.trim();
            if answer.is_empty() && required {
                eprintln!("please input a non-empty value");
                continue;
            }
            return Ok(answer.to_string());
        }
    }
}

/// Asks for every empty field of `draft`. Features are entered one per line
/// until a blank answer; `-N` removes the N-th feature entered so far.
pub fn complete_draft(draft: &mut InputDraft, prompter: &mut dyn InputPrompter) -> Result<()> {
    if draft.missing_topic() {
        draft.topic = prompter.ask("topic", true)?;
    }
    if draft.missing_product_name() {
        draft.product_name = prompter.ask("product name", true)?;
    }
    if draft.features().is_empty() {
        loop {
            let question = format!(
                "feature {}/{} (blank to finish, -N to remove)",
                draft.features().len() + 1,
                MAX_FEATURES
            );
            let answer = prompter.ask(&question, false)?;
            if answer.is_empty() {
                break;
            }
            if let Some(index) = removal_index(&answer) {
                match draft.remove_feature(index) {
                    Some(removed) => eprintln!("removed feature '{removed}'"),
                    None => eprintln!("no feature number {}", index + 1),
                }
                continue;
            }
            if let Err(err) = draft.add_feature(&answer) {
                eprintln!("{err}");
                break;
            }
        }
    }
    if draft.target_audience.trim().is_empty() {
        draft.target_audience = prompter.ask("target audience (optional)", false)?;
    }
    Ok(())
}

fn removal_index(answer: &str) -> Option<usize> {
    let number: usize = answer.strip_prefix('-')?.trim().parse().ok()?;
    number.checked_sub(1)
}
