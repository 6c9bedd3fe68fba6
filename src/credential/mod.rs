//! API credential handling.
//!
//! * [`Credential`]: opaque secret for one run; never logged, never
//!   serialised.
//! * [`CredentialValidator`]: fail-fast reachability/authentication check
//!   run before any paid generation call.

pub mod validator;

pub use validator::{CredentialValidator, Validation, ValidationFailure};

use std::fmt;

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// An API key, held only for the lifetime of a run.
///
/// `Debug` is redacted so the secret cannot leak through `log` macros or
/// error reports.
///
/// ```
/// use research_article::credential::Credential;
///
/// let key = Credential::new("sk-live-123").unwrap();
/// assert_eq!(format!("{key:?}"), "Credential(****)");
/// assert!(Credential::new("   ").is_none());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret.  Surrounding whitespace is dropped; a blank secret is
    /// treated as absent.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        let trimmed = secret.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw secret, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank() {
        assert_eq!(Credential::new("  sk-abc \n").unwrap().expose(), "sk-abc");
        assert!(Credential::new("").is_none());
        assert!(Credential::new("\t\n").is_none());
    }

    #[test]
    fn debug_never_shows_secret() {
        let key = Credential::new("sk-very-secret").unwrap();
        let rendered = format!("{key:?} {:?}", Some(&key));
        assert!(!rendered.contains("sk-very-secret"));
    }
}
