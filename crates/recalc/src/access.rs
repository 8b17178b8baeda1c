//! E-mail domain gating for calculator access.

use serde::{Deserialize, Serialize};

/// Domain part of an address, lowercased; empty when the address is malformed.
pub fn email_domain(email: &str) -> String {
    let normalized = email.trim().to_ascii_lowercase();
    let mut parts = normalized.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(domain), None) => domain.to_string(),
        _ => String::new(),
    }
}

/// Exact match, or `*.base` matching strict subdomains of `base` only.
pub fn is_allowed_domain<S: AsRef<str>>(domain: &str, allowed_domains: &[S]) -> bool {
    let normalized = domain.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return false;
    }

    allowed_domains.iter().any(|entry| {
        let allowed = entry.as_ref().to_ascii_lowercase();
        match allowed.strip_prefix("*.") {
            Some(base) => normalized != base && normalized.ends_with(&format!(".{base}")),
            None => normalized == allowed,
        }
    })
}

/// Configured allowlist shared by request handlers.
#[derive(Debug, Clone, Default)]
pub struct DomainAllowlist {
    domains: Vec<String>,
}

impl DomainAllowlist {
    pub fn new(domains: Vec<String>) -> Self {
        Self { domains }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn permits_email(&self, email: &str) -> bool {
        is_allowed_domain(&email_domain(email), &self.domains)
    }
}

/// Signed-in user record kept by the front end between visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSession {
    pub email: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("stored session is not valid JSON")]
    Malformed,
    #[error("stored session is missing the e-mail or university slug")]
    Incomplete,
}

impl AccessSession {
    /// Decode a stored session; empty fields invalidate it.
    pub fn from_stored(raw: &str) -> Result<Self, AccessError> {
        let session: Self = serde_json::from_str(raw).map_err(|_| AccessError::Malformed)?;
        if session.email.trim().is_empty() || session.slug.trim().is_empty() {
            return Err(AccessError::Incomplete);
        }
        Ok(session)
    }

    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIVERSITY: [&str; 3] = ["example.mx", "example.edu.mx", "*.example.edu.mx"];

    #[test]
    fn extracts_lowercase_domain() {
        assert_eq!(email_domain("  Ana.Ruiz@Example.MX "), "example.mx");
        assert_eq!(email_domain("no-at-sign"), "");
        assert_eq!(email_domain("a@b@c"), "");
    }

    #[test]
    fn exact_entries_match_whole_domain_only() {
        assert!(is_allowed_domain("example.mx", &UNIVERSITY));
        assert!(is_allowed_domain("EXAMPLE.EDU.MX", &UNIVERSITY));
        assert!(!is_allowed_domain("mail.example.mx", &UNIVERSITY));
        assert!(!is_allowed_domain("", &UNIVERSITY));
    }

    #[test]
    fn wildcard_entries_require_a_subdomain() {
        let wildcard_only = ["*.example.edu.mx"];
        assert!(is_allowed_domain("campus.example.edu.mx", &wildcard_only));
        assert!(!is_allowed_domain("example.edu.mx", &wildcard_only));
        assert!(!is_allowed_domain("badexample.edu.mx", &wildcard_only));
    }

    #[test]
    fn allowlist_checks_full_addresses() {
        let allowlist = DomainAllowlist::new(UNIVERSITY.iter().map(|d| d.to_string()).collect());
        assert!(allowlist.permits_email("student@norte.example.edu.mx"));
        assert!(!allowlist.permits_email("student@gmail.com"));
    }

    #[test]
    fn stored_session_requires_both_fields() {
        let session = AccessSession {
            email: "ana@example.mx".to_string(),
            slug: "example".to_string(),
        };
        let stored = session.to_stored().expect("session serializes");
        assert_eq!(stored, r#"{"email":"ana@example.mx","slug":"example"}"#);
        let restored = AccessSession::from_stored(&stored).expect("round trip");
        assert_eq!(restored, session);

        assert_eq!(
            AccessSession::from_stored(r#"{"email":"","slug":"example"}"#),
            Err(AccessError::Incomplete)
        );
        assert_eq!(
            AccessSession::from_stored("not json"),
            Err(AccessError::Malformed)
        );
    }
}
