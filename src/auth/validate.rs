//! Declarative field checks run before any flow touches the store.
//!
//! Every check is evaluated; failures are reported in declaration order.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AppError, ErrorDetail};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    NotEmpty,
    Email,
    MinLen(usize),
}

impl Rule {
    fn passes(self, value: &str) -> bool {
        match self {
            Rule::NotEmpty => !value.is_empty(),
            Rule::Email => is_valid_email(value),
            Rule::MinLen(min) => value.chars().count() >= min,
        }
    }
}

pub struct Check<'a> {
    field: &'static str,
    value: &'a str,
    msg: &'static str,
    rule: Rule,
}

impl<'a> Check<'a> {
    pub fn not_empty(field: &'static str, value: &'a str, msg: &'static str) -> Self {
        Self { field, value, msg, rule: Rule::NotEmpty }
    }

    pub fn email(field: &'static str, value: &'a str, msg: &'static str) -> Self {
        Self { field, value, msg, rule: Rule::Email }
    }

    pub fn min_len(field: &'static str, value: &'a str, min: usize, msg: &'static str) -> Self {
        Self { field, value, msg, rule: Rule::MinLen(min) }
    }
}

/// Runs all checks and collects every failure into [`AppError::Validation`].
pub fn run(checks: &[Check<'_>]) -> Result<(), AppError> {
    let errors: Vec<ErrorDetail> = checks
        .iter()
        .filter(|c| !c.rule.passes(c.value))
        .map(|c| ErrorDetail::field(c.field, c.msg))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
