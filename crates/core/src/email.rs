//! Best-effort structural email checks.
//!
//! This is not a standards-complete validator. It catches the obvious typos
//! and explains them in words a user can act on. Rules are evaluated
//! together by [`check`]; [`EmailWarnings::first`] picks the one to show,
//! in a fixed priority order.

use std::fmt;

/// Longest local part (before the `@`) accepted.
pub const MAX_LOCAL_LENGTH: usize = 64;

/// Shortest final DNS label accepted as a top-level domain.
///
/// Addresses such as `user@localhost` are technically possible but rare
/// enough in practice to flag.
pub const MIN_TOP_LEVEL_DOMAIN_LENGTH: usize = 2;

/// Punctuation allowed in an unquoted local part, besides ASCII
/// alphanumerics.
const LOCAL_PUNCTUATION: &str = "_{}.!#$'*+=?^`|~-";

/// One failed rule, with the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailWarning {
    Empty,
    NoAt,
    TooManyAt,
    InvalidLocalCharacter(char),
    LocalTooLong,
    InvalidDomainCharacter(char),
    EmptyDomain,
    ZeroLengthLabel,
    MissingTopLevelDomain,
}

impl fmt::Display for EmailWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("No email entered"),
            Self::NoAt => f.write_str("Should contain @"),
            Self::TooManyAt => f.write_str("Should only contain one @"),
            Self::InvalidLocalCharacter(c) => {
                write!(f, "{c} is not allowed in an email address")
            }
            Self::LocalTooLong => f.write_str("The first part of the email address is too long"),
            Self::InvalidDomainCharacter(c) => {
                write!(f, "{c} is not allowed in the domain part of an email address")
            }
            Self::EmptyDomain => f.write_str("Expected something after the @"),
            Self::ZeroLengthLabel => {
                f.write_str("Unexpected . in the second part of the email address")
            }
            Self::MissingTopLevelDomain => {
                f.write_str("Missing the end part of the address such as .com")
            }
        }
    }
}

/// Outcome of every rule for one candidate address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailWarnings {
    pub is_empty: bool,
    pub no_at: bool,
    pub too_many_at: bool,
    /// First disallowed character in the local part, if any.
    pub invalid_character_in_local: Option<char>,
    pub local_too_long: bool,
    /// First disallowed character in a domain label, if any.
    pub invalid_character_in_domain: Option<char>,
    pub empty_domain: bool,
    /// A label between dots is empty, e.g. `user@example..com`.
    pub zero_length_dns_label: bool,
    pub missing_top_level_domain: bool,
}

impl EmailWarnings {
    /// The highest-priority failed rule.
    pub fn first(&self) -> Option<EmailWarning> {
        if self.is_empty {
            return Some(EmailWarning::Empty);
        }
        if self.no_at {
            return Some(EmailWarning::NoAt);
        }
        if self.too_many_at {
            return Some(EmailWarning::TooManyAt);
        }
        if let Some(c) = self.invalid_character_in_local {
            return Some(EmailWarning::InvalidLocalCharacter(c));
        }
        if self.local_too_long {
            return Some(EmailWarning::LocalTooLong);
        }
        if let Some(c) = self.invalid_character_in_domain {
            return Some(EmailWarning::InvalidDomainCharacter(c));
        }
        if self.empty_domain {
            return Some(EmailWarning::EmptyDomain);
        }
        if self.zero_length_dns_label {
            return Some(EmailWarning::ZeroLengthLabel);
        }
        if self.missing_top_level_domain {
            return Some(EmailWarning::MissingTopLevelDomain);
        }
        None
    }

    pub fn warning_message(&self) -> Option<String> {
        self.first().map(|warning| warning.to_string())
    }

    /// True when the address should stop an assignment.
    ///
    /// An empty field is left to the separate "input is empty" disable
    /// cause, so it shows no warning here.
    pub fn blocks_submission(&self) -> bool {
        !self.is_empty && self.first().is_some()
    }
}

/// Evaluate every rule against `email`.
///
/// The local part is everything before the first `@` (the whole input when
/// there is none); the domain is everything after it (empty when there is
/// none).
pub fn check(email: &str) -> EmailWarnings {
    let at_count = email.matches('@').count();

    let (local, domain) = match email.split_once('@') {
        Some((local, domain)) => (local, domain),
        None => (email, ""),
    };

    let mut warnings = EmailWarnings {
        is_empty: email.is_empty(),
        no_at: at_count == 0,
        too_many_at: at_count > 1,
        ..EmailWarnings::default()
    };
    check_local_part(local, &mut warnings);
    check_domain_part(domain, &mut warnings);
    warnings
}

/// Message for the first failed rule, or `None` when `email` passes.
///
/// ```
/// use pawpal_core::email::validate;
///
/// assert_eq!(validate("someone@example.com"), None);
/// assert_eq!(validate("a@@b.com").as_deref(), Some("Should only contain one @"));
/// ```
pub fn validate(email: &str) -> Option<String> {
    check(email).warning_message()
}

fn check_local_part(local: &str, warnings: &mut EmailWarnings) {
    // Quoted local parts have far laxer rules; they are not checked.
    let is_quoted = local.starts_with('"') && local.ends_with('"');
    if !is_quoted {
        warnings.invalid_character_in_local = local
            .chars()
            .find(|&c| !(c.is_ascii_alphanumeric() || LOCAL_PUNCTUATION.contains(c)));
    }

    warnings.local_too_long = local.chars().count() > MAX_LOCAL_LENGTH;
}

fn check_domain_part(domain: &str, warnings: &mut EmailWarnings) {
    let labels: Vec<&str> = domain.split('.').collect();

    warnings.empty_domain = domain.is_empty();
    warnings.zero_length_dns_label = labels.iter().any(|label| label.is_empty());
    warnings.missing_top_level_domain = labels.len() < 2
        || labels
            .last()
            .is_some_and(|tld| tld.chars().count() < MIN_TOP_LEVEL_DOMAIN_LENGTH);
    warnings.invalid_character_in_domain = labels.iter().find_map(|label| invalid_label_char(label));
}

/// First offending character of a DNS label: a leading or trailing hyphen,
/// or anything other than an ASCII letter, digit or hyphen.
fn invalid_label_char(label: &str) -> Option<char> {
    let last = label.chars().count().saturating_sub(1);
    label.chars().enumerate().find_map(|(i, c)| {
        let edge_hyphen = c == '-' && (i == 0 || i == last);
        let disallowed = !(c.is_ascii_alphanumeric() || c == '-');
        (edge_hyphen || disallowed).then_some(c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(email: &str) -> Option<EmailWarning> {
        check(email).first()
    }

    #[test]
    fn plain_address_passes() {
        assert_eq!(first("a@b.com"), None);
        assert_eq!(first("someone@example.com"), None);
        assert_eq!(first("first.last+tag@sub.example.co.uk"), None);
    }

    #[test]
    fn empty_input() {
        assert_eq!(first(""), Some(EmailWarning::Empty));
        assert_eq!(validate("").as_deref(), Some("No email entered"));
    }

    #[test]
    fn missing_at() {
        let warnings = check("invalid.address.com");
        assert!(warnings.no_at);
        assert!(warnings.missing_top_level_domain);
        assert_eq!(warnings.first(), Some(EmailWarning::NoAt));
    }

    #[test]
    fn too_many_at() {
        assert_eq!(first("a@@b.com"), Some(EmailWarning::TooManyAt));
        assert_eq!(first("a@b@c.com"), Some(EmailWarning::TooManyAt));
    }

    #[test]
    fn invalid_local_character() {
        assert_eq!(
            first("jo hn@example.com"),
            Some(EmailWarning::InvalidLocalCharacter(' '))
        );
        assert_eq!(
            validate("a,b@example.com").as_deref(),
            Some(", is not allowed in an email address")
        );
    }

    #[test]
    fn quoted_local_part_skips_character_check() {
        assert_eq!(first("\"john smith\"@example.com"), None);
    }

    #[test]
    fn local_part_length_limit() {
        let at_limit = format!("{}@example.com", "a".repeat(MAX_LOCAL_LENGTH));
        let over_limit = format!("{}@example.com", "a".repeat(MAX_LOCAL_LENGTH + 1));
        assert_eq!(first(&at_limit), None);
        assert_eq!(first(&over_limit), Some(EmailWarning::LocalTooLong));
    }

    #[test]
    fn invalid_domain_character() {
        assert_eq!(
            first("user@ex ample.com"),
            Some(EmailWarning::InvalidDomainCharacter(' '))
        );
        assert_eq!(
            first("a@not.a.valid.addréss"),
            Some(EmailWarning::InvalidDomainCharacter('é'))
        );
    }

    #[test]
    fn hyphen_at_label_edges() {
        assert_eq!(
            first("a@-example.com"),
            Some(EmailWarning::InvalidDomainCharacter('-'))
        );
        assert_eq!(
            first("a@example-.com"),
            Some(EmailWarning::InvalidDomainCharacter('-'))
        );
        assert_eq!(first("a@ex-ample.com"), None);
    }

    #[test]
    fn empty_domain() {
        assert_eq!(first("a@"), Some(EmailWarning::EmptyDomain));
        assert_eq!(
            validate("a@").as_deref(),
            Some("Expected something after the @")
        );
    }

    #[test]
    fn zero_length_label() {
        assert_eq!(first("a@b..com"), Some(EmailWarning::ZeroLengthLabel));
        assert_eq!(first("a@.com"), Some(EmailWarning::ZeroLengthLabel));
    }

    #[test]
    fn missing_top_level_domain() {
        assert_eq!(first("a@b"), Some(EmailWarning::MissingTopLevelDomain));
        assert_eq!(first("a@b.c"), Some(EmailWarning::MissingTopLevelDomain));
    }

    #[test]
    fn blocks_submission_ignores_empty_input() {
        assert!(!check("").blocks_submission());
        assert!(check("a@b").blocks_submission());
        assert!(!check("a@b.com").blocks_submission());
    }
}
