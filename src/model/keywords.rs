// File: ./src/model/keywords.rs
// Priority and urgency keyword detection.
use crate::model::item::Priority;
use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords that select `level`.
fn priority_keywords(level: Priority) -> &'static [&'static str] {
    match level {
        Priority::P1 => &[
            "p1",
            r"priority\s+1",
            r"high\s+priority",
            r"urgent\s+priority",
            r"highest\s+priority",
        ],
        Priority::P2 => &["p2", r"priority\s+2", r"medium\s+priority"],
        Priority::P3 => &["p3", r"priority\s+3", r"normal\s+priority"],
        Priority::P4 => &[
            "p4",
            r"priority\s+4",
            r"low\s+priority",
            r"lowest\s+priority",
        ],
    }
}

const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "critical",
    "emergency",
    "rush",
    r"high\s+priority",
    r"needs\s+attention",
];

fn keyword_regex(keywords: &[&str]) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{})\b", keywords.join("|"))).unwrap()
}

// Checked in `Priority::ALL` order, so P1 beats P2 beats P3 beats P4.
static PRIORITY_PATTERNS: Lazy<Vec<(Priority, Regex)>> = Lazy::new(|| {
    Priority::ALL
        .iter()
        .map(|level| (*level, keyword_regex(priority_keywords(*level))))
        .collect()
});

static URGENCY_PATTERN: Lazy<Regex> = Lazy::new(|| keyword_regex(URGENCY_KEYWORDS));

/// First level whose keywords appear in `text`, or P3.
pub fn resolve_priority(text: &str) -> Priority {
    PRIORITY_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(level, _)| *level)
        .unwrap_or_default()
}

pub fn is_urgent(text: &str) -> bool {
    URGENCY_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_levels() {
        assert_eq!(resolve_priority("P1 deploy fix"), Priority::P1);
        assert_eq!(resolve_priority("this is high priority"), Priority::P1);
        assert_eq!(resolve_priority("urgent priority: db"), Priority::P1);
        assert_eq!(resolve_priority("priority 2 cleanup"), Priority::P2);
        assert_eq!(resolve_priority("medium priority"), Priority::P2);
        assert_eq!(resolve_priority("normal priority task"), Priority::P3);
        assert_eq!(resolve_priority("p4 someday"), Priority::P4);
        assert_eq!(resolve_priority("low priority: tidy desk"), Priority::P4);
    }

    #[test]
    fn test_priority_precedence() {
        assert_eq!(resolve_priority("Fix this p1 task, not p2"), Priority::P1);
        assert_eq!(resolve_priority("p4 or maybe p2"), Priority::P2);
    }

    #[test]
    fn test_patterns_follow_priority_order() {
        let order: Vec<Priority> = PRIORITY_PATTERNS.iter().map(|(level, _)| *level).collect();
        assert_eq!(order, Priority::ALL.to_vec());
        assert_eq!(resolve_priority("low priority, then high priority"), Priority::P1);
    }

    #[test]
    fn test_priority_needs_word_boundary() {
        assert_eq!(resolve_priority("update mp3 player"), Priority::P3);
        assert_eq!(resolve_priority("call p1a office"), Priority::P3);
        assert_eq!(resolve_priority("priority 12"), Priority::P3);
        assert_eq!(resolve_priority(""), Priority::P3);
    }

    #[test]
    fn test_urgency() {
        assert!(is_urgent("URGENT: submit report ASAP"));
        assert!(is_urgent("server down, needs attention"));
        assert!(is_urgent("High Priority fix"));
        assert!(is_urgent("rush order"));
        assert!(!is_urgent("Buy milk"));
        assert!(!is_urgent("brush teeth"));
        assert!(!is_urgent("criticality review"));
    }
}
