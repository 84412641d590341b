//! Regular expression assertion

use std::cell::RefCell;

use regex::Regex;
use serde_json::Value;

use super::{Assertion, AssertionType, Configurable, Operands};
use crate::error::PropertyError;

const DELIMITERS: &[char] = &['/', '#', '~', '!', '@', '%'];

/// Whether the check value (subject) matches the right-hand value (pattern).
///
/// Patterns may be bare (`\d+`) or delimited with trailing flags
/// (`/ciao .*/i`); flags `i`, `m`, `s`, `x` and `u` are understood. Every
/// match is captured and readable through [`RegexMatch::captures`] once the
/// assertion has been evaluated. Invalid patterns and non-string operands
/// evaluate to `false`.
#[derive(Debug, Clone)]
pub struct RegexMatch {
    operands: Operands,
    captures: RefCell<Vec<Vec<String>>>,
}

impl RegexMatch {
    /// Create a regex assertion.
    pub fn new(subject: Value, pattern: Value) -> Self {
        Self {
            operands: Operands::new(subject, pattern),
            captures: RefCell::new(Vec::new()),
        }
    }

    /// Captured text grouped by capture group, then by match.
    ///
    /// Index 0 holds every full match, index `n` every capture of group `n`
    /// (empty string where the group did not participate).
    pub fn captures(&self) -> Vec<Vec<String>> {
        self.captures.borrow().clone()
    }

    /// All captures of a single group.
    pub fn capture(&self, group: usize) -> Option<Vec<String>> {
        self.captures.borrow().get(group).cloned()
    }

    fn compute(&self) -> bool {
        self.captures.borrow_mut().clear();
        let (Value::String(subject), Value::String(pattern)) =
            (&self.operands.check, &self.operands.value)
        else {
            return false;
        };
        let regex = match compile(pattern) {
            Some(regex) => regex,
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(pattern = %pattern, "invalid regular expression");
                return false;
            }
        };

        let mut groups = vec![Vec::new(); regex.captures_len()];
        for caps in regex.captures_iter(subject) {
            for (index, group) in groups.iter_mut().enumerate() {
                let text = caps.get(index).map(|m| m.as_str()).unwrap_or_default();
                group.push(text.to_string());
            }
        }
        let matched = groups.first().is_some_and(|full| !full.is_empty());
        *self.captures.borrow_mut() = groups;
        matched
    }
}

/// Compile a bare or delimited pattern.
fn compile(pattern: &str) -> Option<Regex> {
    let source = match split_delimited(pattern) {
        Some((body, flags)) if flags.is_empty() => body.to_string(),
        Some((body, flags)) => {
            let mut inline = String::new();
            for flag in flags.chars() {
                match flag {
                    'i' | 'm' | 's' | 'x' => inline.push(flag),
                    'u' => {}
                    _ => return None,
                }
            }
            if inline.is_empty() {
                body.to_string()
            } else {
                format!("(?{inline}){body}")
            }
        }
        None => pattern.to_string(),
    };
    Regex::new(&source).ok()
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let delimiter = pattern.chars().next().filter(|c| DELIMITERS.contains(c))?;
    let close = pattern.rfind(delimiter).filter(|&i| i > 0)?;
    Some((&pattern[1..close], &pattern[close + 1..]))
}

/// Create a regex assertion.
///
/// ```rust
/// use assertree::predicate::*;
/// use serde_json::json;
///
/// let m = regex(json!("Ciao Mondo"), json!("/(\\w+) Mondo/"));
/// assert!(m.evaluate());
/// assert_eq!(m.capture(1), Some(vec!["Ciao".to_string()]));
/// ```
pub fn regex(subject: Value, pattern: Value) -> RegexMatch {
    RegexMatch::new(subject, pattern)
}

impl Assertion for RegexMatch {
    fn evaluate(&self) -> bool {
        self.operands.memo.get_or_eval(|| self.compute())
    }

    fn last_result(&self) -> Option<bool> {
        self.operands.memo.peek()
    }
}

impl Configurable for RegexMatch {
    fn check_value(&self) -> &Value {
        &self.operands.check
    }

    fn set_check_value(&mut self, value: Value) {
        self.captures.get_mut().clear();
        self.operands.set_check(value);
    }

    fn set_value(&mut self, value: Value) {
        self.captures.get_mut().clear();
        self.operands.set_value(value);
    }

    fn set_property(&mut self, name: &str, value: &Value) -> Result<(), PropertyError> {
        match name {
            "value" => {
                self.set_value(value.clone());
                Ok(())
            }
            _ => Err(PropertyError::Unknown(name.to_string())),
        }
    }
}

impl AssertionType for RegexMatch {
    const PROPERTIES: &'static [&'static str] = &["value"];

    fn with_check_value(check_value: Value) -> Self {
        RegexMatch::new(check_value, Value::Null)
    }
}
