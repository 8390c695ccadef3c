use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use cadence_core::{AppError, AppResult};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Pure check returning an error message for a rejected value.
pub type ValueCheck = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Custom validation attached to a field.
///
/// Rules only run against present values; required-ness is checked separately.
#[derive(Clone, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValueRule {
    /// Value must be an absolute `http://` or `https://` URL.
    HttpUrl {
        /// Message reported on rejection.
        message: String,
    },
    /// Value must look like an email address.
    EmailAddress {
        /// Message reported on rejection.
        message: String,
    },
    /// Value must match a regular expression.
    Pattern {
        /// Source of the expression.
        pattern: String,
        /// Message reported on rejection.
        message: String,
        /// Expression compiled once at construction.
        #[serde(skip)]
        compiled: Regex,
    },
    /// Numeric value must fall inside an inclusive range.
    NumberRange {
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
        /// Message reported on rejection.
        message: String,
    },
    /// Arbitrary pure check.
    Custom {
        /// Name reported to API clients.
        name: String,
        /// Check returning a message for rejected values.
        #[serde(skip)]
        check: ValueCheck,
    },
}

impl ValueRule {
    /// Creates an http(s) URL rule.
    #[must_use]
    pub fn http_url(message: impl Into<String>) -> Self {
        Self::HttpUrl {
            message: message.into(),
        }
    }

    /// Creates an email address rule.
    #[must_use]
    pub fn email_address(message: impl Into<String>) -> Self {
        Self::EmailAddress {
            message: message.into(),
        }
    }

    /// Creates a pattern rule, rejecting invalid expressions.
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> AppResult<Self> {
        let pattern = pattern.into();
        let compiled = Regex::new(pattern.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid validation pattern '{pattern}': {error}"))
        })?;

        Ok(Self::Pattern {
            pattern,
            message: message.into(),
            compiled,
        })
    }

    /// Creates an inclusive number range rule.
    pub fn number_range(
        min: Option<f64>,
        max: Option<f64>,
        message: impl Into<String>,
    ) -> AppResult<Self> {
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(AppError::Validation(format!(
                "number range minimum {min} exceeds maximum {max}"
            )));
        }

        Ok(Self::NumberRange {
            min,
            max,
            message: message.into(),
        })
    }

    /// Creates a rule from an arbitrary pure check.
    #[must_use]
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self::Custom {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Returns the stable rule name.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        match self {
            Self::HttpUrl { .. } => "http_url",
            Self::EmailAddress { .. } => "email_address",
            Self::Pattern { .. } => "pattern",
            Self::NumberRange { .. } => "number_range",
            Self::Custom { name, .. } => name.as_str(),
        }
    }

    /// Evaluates the rule, returning the error message on rejection.
    #[must_use]
    pub fn evaluate(&self, value: &Value) -> Option<String> {
        match self {
            Self::HttpUrl { message } => {
                (!value.as_str().is_some_and(is_http_url)).then(|| message.clone())
            }
            Self::EmailAddress { message } => {
                (!value.as_str().is_some_and(looks_like_email)).then(|| message.clone())
            }
            Self::Pattern {
                message, compiled, ..
            } => (!value.as_str().is_some_and(|text| compiled.is_match(text)))
                .then(|| message.clone()),
            Self::NumberRange { min, max, message } => {
                let in_range = value.as_f64().is_some_and(|number| {
                    min.is_none_or(|min| number >= min) && max.is_none_or(|max| number <= max)
                });
                (!in_range).then(|| message.clone())
            }
            Self::Custom { check, .. } => check(value),
        }
    }
}

impl Debug for ValueRule {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpUrl { message } => formatter
                .debug_struct("HttpUrl")
                .field("message", message)
                .finish(),
            Self::EmailAddress { message } => formatter
                .debug_struct("EmailAddress")
                .field("message", message)
                .finish(),
            Self::Pattern {
                pattern, message, ..
            } => formatter
                .debug_struct("Pattern")
                .field("pattern", pattern)
                .field("message", message)
                .finish(),
            Self::NumberRange { min, max, message } => formatter
                .debug_struct("NumberRange")
                .field("min", min)
                .field("max", max)
                .field("message", message)
                .finish(),
            Self::Custom { name, .. } => formatter
                .debug_struct("Custom")
                .field("name", name)
                .finish_non_exhaustive(),
        }
    }
}

fn is_http_url(value: &str) -> bool {
    let trimmed = value.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return false;
    }

    Url::parse(trimmed).is_ok_and(|url| url.host_str().is_some())
}

fn looks_like_email(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.len() > 254 || trimmed.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
