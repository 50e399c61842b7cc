// File: ./src/model/roles.rs
//! Who owns a task and who (or what) it is about.
//!
//! Both resolvers first look for caller-supplied names in a specific
//! grammatical position, then fall back to generic patterns tried in a fixed
//! order. Matching is case-insensitive throughout.
use crate::model::item::SELF_OWNER;
use once_cell::sync::Lazy;
use regex::Regex;

const MODAL_VERBS: &str = r"should|will|needs\s+to|has\s+to|have\s+to|must";
const CONTACT_VERBS: &str = r"ask|tell|contact|call|email|message|remind";
// A single word: whatever follows a name is left to the other resolvers.
const PERSON_WORD: &str = r"[a-z][\w'-]*";
const TOPIC_SPAN: &str = r"[^.,;!?\n]+";
const TOPIC_MAX_WORDS: usize = 4;

/// Words dropped from the end of a captured span.
const CONNECTOR_WORDS: &[&str] = &[
    "to", "about", "that", "if", "when", "where", "why", "how", "the", "a", "an",
];

static SELF_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bI\s+(?:need\s+to|have\s+to|must|should|will|am\s+going\s+to|plan\s+to)\b",
    )
    .unwrap()
});

// Up to three leading words before the modal ("Mary Jane Watson will").
static LEADING_SUBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^([a-z][\w'-]*(?:\s+[a-z][\w'-]*){{0,2}}?)\s+(?:{})\b",
        MODAL_VERBS
    ))
    .unwrap()
});

/// Explicit owner markers, in checking order.
static OWNER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bassign(?:ed)?\s+to\s+",
        r"\bresponsible\s*:\s*",
        r"\bowner\s*:\s*",
    ]
    .iter()
    .map(|marker| Regex::new(&format!(r"(?i){}({})", marker, PERSON_WORD)).unwrap())
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Topic,
    Person,
}

/// Generic subject patterns, in checking order.
static SUBJECT_PATTERNS: Lazy<Vec<(SpanKind, Regex)>> = Lazy::new(|| {
    let topic = |marker: &str| {
        (
            SpanKind::Topic,
            Regex::new(&format!(r"(?i){}({})", marker, TOPIC_SPAN)).unwrap(),
        )
    };
    let person = |marker: &str| {
        (
            SpanKind::Person,
            Regex::new(&format!(r"(?i){}({})", marker, PERSON_WORD)).unwrap(),
        )
    };
    vec![
        topic(r"(?:\b(?:about|regarding)\s+|\bre:\s*)"),
        topic(r"\bproject\s*:\s*"),
        topic(r"\bcategory\s*:\s*"),
        person(&format!(r"\b(?:{})\s+", CONTACT_VERBS)),
        person(r"\bmeet(?:ing)?\s+with\s+"),
        person(r"\bsend\b.*?\bto\s+"),
    ]
});

#[derive(Debug, Clone)]
struct NamePatterns {
    name: String,
    assignment: Regex,
    reference: Regex,
}

/// Known names with their position patterns compiled once.
///
/// Build one per name list and share it across every text parsed with that
/// list. Blank names are dropped; the rest keep the caller's order and casing.
#[derive(Debug, Clone, Default)]
pub struct NameMatchers {
    names: Vec<NamePatterns>,
}

impl NameMatchers {
    pub fn new(known_names: &[String]) -> Self {
        let names = usable_names(known_names)
            .filter_map(|name| match (assignment_regex(name), reference_regex(name)) {
                (Ok(assignment), Ok(reference)) => Some(NamePatterns {
                    name: name.to_string(),
                    assignment,
                    reference,
                }),
                (Err(e), _) | (_, Err(e)) => {
                    log::warn!("Skipping known name '{}': {}", name, e);
                    None
                }
            })
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// First name, in caller order, standing where an owner would.
    fn assigned_in(&self, text: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|p| p.assignment.is_match(text))
            .map(|p| p.name.as_str())
    }

    /// First name, in caller order, standing where a contact would.
    fn referenced_in(&self, text: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|p| p.reference.is_match(text))
            .map(|p| p.name.as_str())
    }
}

/// Who is responsible for the task described by `text`.
///
/// Never empty: falls back to [`SELF_OWNER`].
pub fn resolve_owner(text: &str, known_names: &[String]) -> String {
    resolve_owner_with(text, &NameMatchers::new(known_names))
}

/// [`resolve_owner`] with names compiled ahead of time.
pub fn resolve_owner_with(text: &str, names: &NameMatchers) -> String {
    if SELF_REFERENCE.is_match(text) {
        return SELF_OWNER.to_string();
    }

    if let Some(name) = names.assigned_in(text) {
        log::trace!("owner: known name '{}' in assignment position", name);
        return name.to_string();
    }

    if let Some(caps) = LEADING_SUBJECT.captures(text) {
        let owner = title_case(&caps[1]);
        if !owner.is_empty() {
            return owner;
        }
    }

    for re in OWNER_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            let owner = title_case(&strip_trailing_connectors(&caps[1]));
            if !owner.is_empty() {
                return owner;
            }
        }
    }

    SELF_OWNER.to_string()
}

/// Who or what the task concerns, distinct from its owner.
pub fn resolve_subject(text: &str, known_names: &[String]) -> Option<String> {
    resolve_subject_with(text, &NameMatchers::new(known_names))
}

/// [`resolve_subject`] with names compiled ahead of time.
pub fn resolve_subject_with(text: &str, names: &NameMatchers) -> Option<String> {
    if let Some(name) = names.referenced_in(text) {
        log::trace!("subject: known name '{}' in reference position", name);
        return Some(name.to_string());
    }

    for (kind, re) in SUBJECT_PATTERNS.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let span = match kind {
            SpanKind::Topic => caps[1]
                .split_whitespace()
                .take(TOPIC_MAX_WORDS)
                .collect::<Vec<_>>()
                .join(" "),
            SpanKind::Person => caps[1].to_string(),
        };
        let subject = title_case(&strip_trailing_connectors(&span));
        if !subject.is_empty() {
            return Some(subject);
        }
    }
    None
}

/// Upper-cases the first letter of every word and lower-cases the rest.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn strip_trailing_connectors(span: &str) -> String {
    let mut words: Vec<&str> = span.split_whitespace().collect();
    while let Some(last) = words.last() {
        if CONNECTOR_WORDS.contains(&last.to_lowercase().as_str()) {
            words.pop();
        } else {
            break;
        }
    }
    words.join(" ")
}

fn usable_names(known_names: &[String]) -> impl Iterator<Item = &str> {
    known_names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
}

// Names can start or end with punctuation ("J.R."), so the boundary is
// spelled out instead of relying on `\b`.
fn assignment_regex(name: &str) -> Result<Regex, regex::Error> {
    let name = regex::escape(name);
    Regex::new(&format!(
        r"(?i)(?:(?:\b(?:assign(?:ed)?\s+to|for)\s+|@\s*){name}(?:\W|$)|(?:^|\W){name}\s+(?:{MODAL_VERBS})\b)"
    ))
}

fn reference_regex(name: &str) -> Result<Regex, regex::Error> {
    let name = regex::escape(name);
    Regex::new(&format!(
        r"(?i)(?:\b(?:{CONTACT_VERBS})\s+|\b(?:meet|meeting|schedule)\s+with\s+|\b(?:send|give|deliver|provide)\b.*?\bto\s+){name}(?:\W|$)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_self_reference_wins() {
        let known = names(&["Sarah"]);
        assert_eq!(resolve_owner("I need to call the bank", &known), "Me");
        assert_eq!(
            resolve_owner("Sarah should know I am going to fix it", &known),
            "Me"
        );
        assert_eq!(resolve_owner("i plan to assign to Sarah", &known), "Me");
    }

    #[test]
    fn test_known_name_assignment() {
        let known = names(&["Sarah", "Tom"]);
        assert_eq!(
            resolve_owner("assign to Sarah: review budget", &known),
            "Sarah"
        );
        assert_eq!(resolve_owner("draft slides for tom", &known), "Tom");
        assert_eq!(resolve_owner("@sarah check logs", &known), "Sarah");
        assert_eq!(resolve_owner("Review doc, Tom will help", &known), "Tom");
    }

    #[test]
    fn test_known_name_first_in_caller_order() {
        let known = names(&["Tom", "Sarah"]);
        assert_eq!(
            resolve_owner("for Sarah and for Tom: plan offsite", &known),
            "Tom"
        );
    }

    #[test]
    fn test_known_name_outside_assignment_is_ignored() {
        let known = names(&["Sarah"]);
        assert_eq!(resolve_owner("Ask Sarah about the report", &known), "Me");
        assert_eq!(resolve_owner("Sarahs notes", &known), "Me");
    }

    #[test]
    fn test_leading_subject_verb() {
        assert_eq!(resolve_owner("john should update the wiki", &[]), "John");
        assert_eq!(
            resolve_owner("Mary jane needs to sign the form", &[]),
            "Mary Jane"
        );
        assert_eq!(
            resolve_owner("Mary Jane Watson will water the plants", &[]),
            "Mary Jane Watson"
        );
    }

    #[test]
    fn test_leading_subject_is_at_most_three_words() {
        assert_eq!(
            resolve_owner("Call the bank and tell them we will pay", &[]),
            "Me"
        );
        assert_eq!(
            resolve_owner("the new intern from sales should file it", &[]),
            "Me"
        );
    }

    #[test]
    fn test_explicit_owner_markers() {
        assert_eq!(resolve_owner("assign to Sarah: review budget", &[]), "Sarah");
        assert_eq!(resolve_owner("Deploy, responsible: ops", &[]), "Ops");
        assert_eq!(resolve_owner("quarterly taxes owner: ann", &[]), "Ann");
        assert_eq!(resolve_owner("assign to Sarah Tomorrow", &[]), "Sarah");
        assert_eq!(resolve_owner("assigned to the team", &[]), "Me");
    }

    #[test]
    fn test_owner_default() {
        assert_eq!(resolve_owner("Buy milk", &[]), "Me");
        assert_eq!(resolve_owner("", &[]), "Me");
    }

    #[test]
    fn test_subject_known_name() {
        let known = names(&["Sarah"]);
        assert_eq!(
            resolve_subject("Ask Sarah about the quarterly report", &known),
            Some("Sarah".to_string())
        );
        assert_eq!(
            resolve_subject("schedule with sarah next week", &known),
            Some("Sarah".to_string())
        );
        assert_eq!(
            resolve_subject("Send the deck to SARAH", &known),
            Some("Sarah".to_string())
        );
    }

    #[test]
    fn test_subject_generic_order() {
        assert_eq!(
            resolve_subject("Ask Sarah about the quarterly report", &[]),
            Some("The Quarterly Report".to_string())
        );
        assert_eq!(
            resolve_subject("project: website redesign. tomorrow", &[]),
            Some("Website Redesign".to_string())
        );
        assert_eq!(
            resolve_subject("category: Finance", &[]),
            Some("Finance".to_string())
        );
        assert_eq!(
            resolve_subject("email bob to confirm", &[]),
            Some("Bob".to_string())
        );
        assert_eq!(
            resolve_subject("meet with priya", &[]),
            Some("Priya".to_string())
        );
        assert_eq!(
            resolve_subject("send the invoice to accounting", &[]),
            Some("Accounting".to_string())
        );
    }

    #[test]
    fn test_person_subject_is_one_word() {
        let cases = [
            ("Call Sarah Tomorrow", "Sarah"),
            ("meet with Tom ASAP", "Tom"),
            ("Email Bob Friday", "Bob"),
            ("remind Ann P1", "Ann"),
            ("send the slides to Priya Urgent", "Priya"),
        ];
        for (text, expected) in cases {
            assert_eq!(
                resolve_subject(text, &[]).as_deref(),
                Some(expected),
                "subject of {:?}",
                text
            );
        }
    }

    #[test]
    fn test_subject_topic_is_trimmed() {
        assert_eq!(
            resolve_subject("talk regarding the budget for next quarter planning", &[]),
            Some("The Budget For Next".to_string())
        );
        assert_eq!(
            resolve_subject("re: the offsite venue", &[]),
            Some("The Offsite Venue".to_string())
        );
        assert_eq!(
            resolve_subject("think about how", &[]),
            None,
            "only connector words remain"
        );
    }

    #[test]
    fn test_subject_none() {
        assert_eq!(resolve_subject("Buy milk", &[]), None);
        assert_eq!(resolve_subject("I need to call the bank", &[]), None);
        assert_eq!(resolve_subject("", &[]), None);
    }

    #[test]
    fn test_title_case_and_connectors() {
        assert_eq!(title_case("mARY  jane"), "Mary Jane");
        assert_eq!(strip_trailing_connectors("the report about the"), "the report");
        assert_eq!(strip_trailing_connectors("to the"), "");
    }

    #[test]
    fn test_blank_names_ignored() {
        let known = names(&["", "   "]);
        assert_eq!(resolve_owner("for you", &known), "Me");
        assert_eq!(resolve_subject("ask   ", &known), None);
        assert!(NameMatchers::new(&known).is_empty());
    }

    #[test]
    fn test_name_matchers_are_reusable() {
        let known = names(&[" Sarah ", "", "Tom"]);
        let matchers = NameMatchers::new(&known);
        assert_eq!(matchers.len(), 2);

        let texts = [
            "assign to Sarah: review budget",
            "Tom will ask Sarah about the report",
            "Send the deck to tom",
            "I need to call Sarah",
            "Buy milk",
        ];
        for text in texts {
            assert_eq!(
                resolve_owner_with(text, &matchers),
                resolve_owner(text, &known),
                "owner of {:?}",
                text
            );
            assert_eq!(
                resolve_subject_with(text, &matchers),
                resolve_subject(text, &known),
                "subject of {:?}",
                text
            );
        }
        assert_eq!(resolve_owner_with(texts[1], &matchers), "Tom");
        assert_eq!(
            resolve_subject_with(texts[1], &matchers).as_deref(),
            Some("Sarah")
        );
    }
}
