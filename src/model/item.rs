// File: ./src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Owner used whenever the text does not name anybody else.
pub const SELF_OWNER: &str = "Me";

#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    P1,
    P2,
    #[default]
    P3,
    P4,
}

impl Priority {
    /// Checking order of the classifier (most important first).
    pub const ALL: [Priority; 4] = [Priority::P1, Priority::P2, Priority::P3, Priority::P4];
}

/// Structured result of parsing one line of free text.
///
/// Created fresh on every parse; the parser never keeps or mutates it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParsedTask {
    pub title: String,
    /// Same text as `title` for now; kept separate so editors can diverge it.
    pub description: Option<String>,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub is_urgent: bool,
}

impl Default for ParsedTask {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            owner: SELF_OWNER.to_string(),
            subject: None,
            due_date: None,
            priority: Priority::default(),
            is_urgent: false,
        }
    }
}

impl ParsedTask {
    pub fn is_self_owned(&self) -> bool {
        self.owner == SELF_OWNER
    }
}
