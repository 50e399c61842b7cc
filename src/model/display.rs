// File: ./src/model/display.rs
use crate::model::item::{ParsedTask, Priority};

pub trait TaskDisplay {
    fn to_smart_string(&self) -> String;
    fn to_detail_lines(&self) -> Vec<String>;
    fn priority_marker(&self) -> &'static str;
}

impl TaskDisplay for ParsedTask {
    fn priority_marker(&self) -> &'static str {
        match self.priority {
            Priority::P1 => "!!!",
            Priority::P2 => "!!",
            Priority::P3 => "!",
            Priority::P4 => "·",
        }
    }

    // e.g. "Call the bank !P1 !urgent @2025-08-15 owner:Sarah re:Budget"
    fn to_smart_string(&self) -> String {
        let mut s = self.title.clone();
        if self.priority != Priority::default() {
            s.push_str(&format!(" !{}", self.priority));
        }
        if self.is_urgent {
            s.push_str(" !urgent");
        }
        if let Some(d) = self.due_date {
            s.push_str(&format!(" @{}", d.format("%Y-%m-%d")));
        }
        if !self.is_self_owned() {
            s.push_str(&format!(" owner:{}", quote_if_spaced(&self.owner)));
        }
        if let Some(subject) = &self.subject {
            s.push_str(&format!(" re:{}", quote_if_spaced(subject)));
        }
        s
    }

    fn to_detail_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Title:    {}", self.title),
            format!("Priority: {} {}", self.priority, self.priority_marker()),
            format!("Urgent:   {}", if self.is_urgent { "yes" } else { "no" }),
            format!("Owner:    {}", self.owner),
        ];
        if let Some(subject) = &self.subject {
            lines.push(format!("Subject:  {}", subject));
        }
        match self.due_date {
            Some(d) => lines.push(format!("Due:      {}", d.format("%a %Y-%m-%d"))),
            None => lines.push("Due:      -".to_string()),
        }
        lines
    }
}

fn quote_value(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

fn quote_if_spaced(s: &str) -> String {
    if s.contains(' ') || s.contains('"') {
        quote_value(s)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_default_task_is_just_the_title() {
        let task = ParsedTask {
            title: "Buy milk".to_string(),
            ..ParsedTask::default()
        };
        assert_eq!(task.to_smart_string(), "Buy milk");
    }

    #[test]
    fn test_full_smart_string() {
        let task = ParsedTask {
            title: "Prep deck".to_string(),
            description: Some("Prep deck".to_string()),
            owner: "Sarah".to_string(),
            subject: Some("Quarterly Report".to_string()),
            due_date: NaiveDate::from_ymd_opt(2025, 8, 15),
            priority: Priority::P1,
            is_urgent: true,
        };
        assert_eq!(
            task.to_smart_string(),
            "Prep deck !P1 !urgent @2025-08-15 owner:Sarah re:\"Quarterly Report\""
        );
    }

    #[test]
    fn test_detail_lines() {
        let task = ParsedTask {
            title: "Pay rent".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 8, 15),
            ..ParsedTask::default()
        };
        let lines = task.to_detail_lines();
        assert_eq!(lines[1], "Priority: P3 !");
        assert_eq!(lines.last().unwrap(), "Due:      Fri 2025-08-15");
        assert!(!lines.iter().any(|l| l.starts_with("Subject")));
    }
}
