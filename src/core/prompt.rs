/// Prompting for the composer
///
/// Candidates are hints only: every prompt accepts whatever the user types.

use crate::error::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Completion, Input};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::collections::VecDeque;

/// Reads one answer per call
pub trait Prompter {
    /// Ask `label`, offering `candidates` for completion
    fn ask(&mut self, label: &str, candidates: &[String]) -> Result<String>;
}

/// Tab completion over a fixed candidate list
///
/// A prefix match wins; otherwise the best fuzzy match is offered.
pub struct CandidateCompletion {
    candidates: Vec<String>,
    matcher: SkimMatcherV2,
}

impl CandidateCompletion {
    pub fn new(candidates: &[String]) -> Self {
        Self {
            candidates: candidates.to_vec(),
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn complete(&self, input: &str) -> Option<String> {
        if let Some(hit) = self
            .candidates
            .iter()
            .find(|c| c.starts_with(input) && c.as_str() != input)
        {
            return Some(hit.clone());
        }

        if input.is_empty() {
            return None;
        }

        self.candidates
            .iter()
            .filter(|c| c.as_str() != input)
            .filter_map(|c| self.matcher.fuzzy_match(c, input).map(|score| (score, c)))
            // Highest score; ties go to the earlier candidate
            .fold(None, |best: Option<(i64, &String)>, (score, c)| match best {
                Some((top, _)) if top >= score => best,
                _ => Some((score, c)),
            })
            .map(|(_, c)| c.clone())
    }
}

impl Completion for CandidateCompletion {
    fn get(&self, input: &str) -> Option<String> {
        self.complete(input)
    }
}

/// Interactive prompts on the terminal
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, label: &str, candidates: &[String]) -> Result<String> {
        let completion = CandidateCompletion::new(candidates);
        let prompt = if candidates.is_empty() {
            label.to_string()
        } else {
            format!("{} (tab: {})", label, candidates.join(", "))
        };

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !candidates.is_empty() {
            input = input.completion_with(&completion);
        }

        Ok(input.interact_text()?)
    }
}

/// Replays canned answers and records what each prompt offered
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<(String, Vec<String>)>,
}

impl ScriptedPrompter {
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

    /// Labels and candidate lists, in the order they were asked
    pub fn asked(&self) -> &[(String, Vec<String>)] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, label: &str, candidates: &[String]) -> Result<String> {
        self.asked.push((label.to_string(), candidates.to_vec()));
        // Running out of answers reads as an empty line
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
