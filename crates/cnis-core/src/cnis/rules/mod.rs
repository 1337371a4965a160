//! Rule-based field extractors for CNIS statements.
//!
//! Most fields are found by an ordered list of alternative patterns tried
//! until one succeeds. Each alternative is a [`MatchRule`]; a [`Cascade`]
//! evaluates them left to right and stops at the first hit.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{extract_last_salary, parse_brl_amount};
pub use dates::{last_day_of_month, normalize_month_year};

use regex::Regex;

/// A single alternative in a pattern cascade.
pub trait MatchRule: Send + Sync {
    /// The type of value this rule produces.
    type Output;

    /// Short identifier used in logs and tests.
    fn name(&self) -> &str;

    /// Try the rule against `text`.
    fn try_match(&self, text: &str) -> Option<Self::Output>;
}

/// Ordered list of rules evaluated with early exit.
pub struct Cascade<T> {
    rules: Vec<Box<dyn MatchRule<Output = T>>>,
}

impl<T> Cascade<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after every rule already added.
    pub fn with_rule(mut self, rule: impl MatchRule<Output = T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Result of the first rule that matches.
    pub fn first_match(&self, text: &str) -> Option<T> {
        self.first_match_named(text).map(|(_, value)| value)
    }

    /// Like [`Cascade::first_match`], also naming the rule that fired.
    pub fn first_match_named(&self, text: &str) -> Option<(&str, T)> {
        self.rules
            .iter()
            .find_map(|rule| rule.try_match(text).map(|value| (rule.name(), value)))
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T> Default for Cascade<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rule returning one trimmed capture group of a regex.
pub struct CaptureRule {
    name: &'static str,
    pattern: Regex,
    group: usize,
}

impl CaptureRule {
    pub fn new(name: &'static str, pattern: Regex, group: usize) -> Self {
        Self {
            name,
            pattern,
            group,
        }
    }
}

impl MatchRule for CaptureRule {
    type Output = String;

    fn name(&self) -> &str {
        self.name
    }

    fn try_match(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let value = caps.get(self.group)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Option<&'static str>);

    impl MatchRule for Fixed {
        type Output = String;

        fn name(&self) -> &str {
            self.0
        }

        fn try_match(&self, _text: &str) -> Option<String> {
            self.1.map(str::to_string)
        }
    }

    #[test]
    fn test_cascade_stops_at_first_match() {
        let cascade = Cascade::new()
            .with_rule(Fixed("miss", None))
            .with_rule(Fixed("first", Some("a")))
            .with_rule(Fixed("second", Some("b")));

        assert_eq!(cascade.first_match_named("x"), Some(("first", "a".to_string())));
        assert_eq!(cascade.rule_names(), vec!["miss", "first", "second"]);
    }

    #[test]
    fn test_empty_cascade_matches_nothing() {
        let cascade: Cascade<String> = Cascade::default();
        assert!(cascade.is_empty());
        assert_eq!(cascade.first_match("anything"), None);
    }

    #[test]
    fn test_capture_rule_ignores_blank_groups() {
        let rule = CaptureRule::new("label", Regex::new(r"Nome:(\s*)").unwrap(), 1);
        assert_eq!(rule.try_match("Nome:   "), None);

        let rule = CaptureRule::new("label", Regex::new(r"Nome:\s*(\w+)").unwrap(), 1);
        assert_eq!(rule.try_match("Nome: Maria"), Some("Maria".to_string()));
    }
}
