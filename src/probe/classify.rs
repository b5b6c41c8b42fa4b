// src/probe/classify.rs
// =============================================================================
// The existence classifier: decides whether a fetched page is a real profile.
//
// The decision is a rule table of substrings checked against the lower-cased
// page text:
// 1. Positive rules ("followers", "joined"...) mark the account as existing
// 2. Negative rules ("not found", "no such user"...) are checked afterwards
//    and always win, marking the account as missing with "Not Found"
//
// Anything other than HTTP 200 counts as missing without looking at the text.
// A 200 "user not found" page that also says "profile" is still classified
// as missing; a 200 error page without any negative phrase may show up as
// found. Text heuristics cannot tell those apart.
// =============================================================================

use super::http::{FetchError, FetchResponse};

/// Error kind recorded when a negative rule matches
pub const NOT_FOUND: &str = "Not Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Evidence the account exists
    Positive,
    /// Evidence the account does not exist; overrides positive matches
    Negative,
}

/// One substring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub polarity: Polarity,
    /// Lower-case text to look for
    pub needle: &'static str,
}

impl Rule {
    pub const fn positive(needle: &'static str) -> Self {
        Self { polarity: Polarity::Positive, needle }
    }

    pub const fn negative(needle: &'static str) -> Self {
        Self { polarity: Polarity::Negative, needle }
    }

    fn matches(&self, lowered_body: &str) -> bool {
        lowered_body.contains(self.needle)
    }
}

pub const DEFAULT_RULES: &[Rule] = &[
    Rule::positive("profile"),
    Rule::positive("user profile"),
    Rule::positive("member since"),
    Rule::positive("joined"),
    Rule::positive("followers"),
    Rule::positive("following"),
    Rule::negative("not found"),
    Rule::negative("doesn't exist"),
    Rule::negative("user not found"),
    Rule::negative("profile not found"),
    Rule::negative("no such user"),
    Rule::negative("user doesn't exist"),
];

/// The classifier's answer for one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A positive rule matched and no negative rule did
    Exists,
    /// A negative rule matched
    NotFound,
    /// Non-200 status, or a 200 page with no rule matching
    Missing,
    /// The fetch itself failed
    Failed(String),
}

impl Verdict {
    pub fn exists(&self) -> bool {
        matches!(self, Verdict::Exists)
    }

    /// Text stored as the outcome's `error_type`
    pub fn error_kind(&self) -> Option<String> {
        match self {
            Verdict::NotFound => Some(NOT_FOUND.to_string()),
            Verdict::Failed(reason) => Some(reason.clone()),
            Verdict::Exists | Verdict::Missing => None,
        }
    }
}

/// Applies a rule table to fetched pages
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Classifies the result of a fetch, success or failure
    pub fn classify(&self, fetched: &Result<FetchResponse, FetchError>) -> Verdict {
        match fetched {
            Ok(response) => self.classify_page(response.status, &response.body),
            Err(e) => Verdict::Failed(e.to_string()),
        }
    }

    /// Classifies a completed HTTP response
    pub fn classify_page(&self, status: u16, body: &str) -> Verdict {
        if status != 200 {
            return Verdict::Missing;
        }

        let lowered = body.to_lowercase();

        let mut verdict = Verdict::Missing;
        if self.any_match(Polarity::Positive, &lowered) {
            verdict = Verdict::Exists;
        }
        // Negative rules run second so they override
        if self.any_match(Polarity::Negative, &lowered) {
            verdict = Verdict::NotFound;
        }
        verdict
    }

    fn any_match(&self, polarity: Polarity, lowered_body: &str) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.polarity == polarity)
            .any(|rule| rule.matches(lowered_body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_indicator_means_exists() {
        let classifier = Classifier::default();
        let verdict = classifier.classify_page(200, "Alice's profile, 120 followers");
        assert_eq!(verdict, Verdict::Exists);
        assert!(verdict.exists());
        assert_eq!(verdict.error_kind(), None);
    }

    #[test]
    fn test_matching_ignores_case() {
        let classifier = Classifier::default();
        assert!(classifier.classify_page(200, "MEMBER SINCE 2019").exists());
    }

    #[test]
    fn test_negative_indicator_wins() {
        let classifier = Classifier::default();
        let verdict = classifier.classify_page(200, "1 followers - user not found");
        assert_eq!(verdict, Verdict::NotFound);
        assert!(!verdict.exists());
        assert_eq!(verdict.error_kind().as_deref(), Some("Not Found"));
    }

    #[test]
    fn test_negative_wins_regardless_of_rule_order() {
        let classifier = Classifier::new(vec![
            Rule::negative("gone"),
            Rule::positive("followers"),
        ]);
        assert_eq!(
            classifier.classify_page(200, "followers: 3, account gone"),
            Verdict::NotFound
        );
    }

    #[test]
    fn test_no_indicator_is_missing_without_error() {
        let classifier = Classifier::default();
        let verdict = classifier.classify_page(200, "<html>welcome</html>");
        assert_eq!(verdict, Verdict::Missing);
        assert_eq!(verdict.error_kind(), None);
    }

    #[test]
    fn test_non_200_ignores_body() {
        let classifier = Classifier::default();
        for status in [201, 301, 403, 404, 500] {
            assert_eq!(
                classifier.classify_page(status, "profile with 500 followers"),
                Verdict::Missing
            );
        }
    }

    #[test]
    fn test_fetch_failure_carries_description() {
        let classifier = Classifier::default();
        let verdict = classifier.classify(&Err(FetchError::Timeout));
        assert!(!verdict.exists());
        assert_eq!(verdict.error_kind().as_deref(), Some("Request timed out"));
    }

    #[test]
    fn test_classification_is_repeatable() {
        let classifier = Classifier::default();
        let response = Ok(FetchResponse {
            status: 200,
            body: "Joined March 2020".to_string(),
        });
        let first = classifier.classify(&response);
        for _ in 0..5 {
            assert_eq!(classifier.classify(&response), first);
        }
    }
}
