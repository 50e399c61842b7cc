// File: src/model/parser.rs
//! Task assembly: runs every resolver over the same trimmed text.
use crate::model::dates::resolve_with_grammar;
use crate::model::item::ParsedTask;
use crate::model::keywords::{is_urgent, resolve_priority};
use crate::model::roles::{NameMatchers, resolve_owner_with, resolve_subject_with};
use chrono::{Local, NaiveDate};

/// Parses `input` against the local calendar date.
pub fn parse_task(input: &str, known_names: &[String]) -> ParsedTask {
    parse_task_on(input, known_names, Local::now().date_naive())
}

/// Parses `input` with an explicit reference date for relative phrases.
///
/// Total: any string yields a fully populated task, empty input included.
pub fn parse_task_on(input: &str, known_names: &[String], today: NaiveDate) -> ParsedTask {
    parse_task_with(input, &NameMatchers::new(known_names), today)
}

/// Like [`parse_task_on`] with the known names already compiled, for callers
/// parsing many texts against the same list.
pub fn parse_task_with(input: &str, names: &NameMatchers, today: NaiveDate) -> ParsedTask {
    let text = input.trim();

    let due = resolve_with_grammar(text, today);
    let task = ParsedTask {
        title: text.to_string(),
        description: Some(text.to_string()),
        owner: resolve_owner_with(text, names),
        subject: resolve_subject_with(text, names),
        due_date: due.map(|(_, date)| date),
        priority: resolve_priority(text),
        is_urgent: is_urgent(text),
    };

    log::debug!(
        "parsed '{}': owner={} subject={:?} due={:?} ({}) priority={} urgent={}",
        task.title,
        task.owner,
        task.subject,
        task.due_date,
        due.map(|(grammar, _)| grammar.to_string())
            .unwrap_or_else(|| "no date".to_string()),
        task.priority,
        task.is_urgent
    );
    task
}

/// Parses one task per non-blank line.
pub fn parse_batch<'a, I>(lines: I, known_names: &[String], today: NaiveDate) -> Vec<ParsedTask>
where
    I: IntoIterator<Item = &'a str>,
{
    let names = NameMatchers::new(known_names);
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_task_with(line, &names, today))
        .collect()
}
