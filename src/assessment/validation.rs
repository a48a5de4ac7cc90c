// src/assessment/validation.rs
// Client profile checks run before any session state is touched

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{AssessmentError, AssessmentResult};
use crate::session::ClientInfo;

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

/// Partial client profile as sent by the client; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfoInput {
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_role: Option<String>,
    pub company_size: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ClientInfoInput {
    /// Build a complete profile, rejecting missing fields and a malformed email
    pub fn into_client_info(self) -> AssessmentResult<ClientInfo> {
        let (Some(company_name), Some(contact_name), Some(contact_email), Some(contact_role)) = (
            present(self.company_name),
            present(self.contact_name),
            present(self.contact_email),
            present(self.contact_role),
        ) else {
            return Err(AssessmentError::missing_client_fields());
        };

        if !is_valid_email(&contact_email) {
            return Err(AssessmentError::invalid("Invalid email format"));
        }

        Ok(ClientInfo {
            company_name,
            contact_name,
            contact_email,
            contact_role,
            company_size: present(self.company_size),
        })
    }

    /// Overlay the supplied fields on an existing profile.
    /// Empty strings leave the stored value alone.
    pub fn merge_into(self, mut base: ClientInfo) -> AssessmentResult<ClientInfo> {
        if let Some(email) = present(self.contact_email) {
            if !is_valid_email(&email) {
                return Err(AssessmentError::invalid("Invalid email format"));
            }
            base.contact_email = email;
        }
        if let Some(name) = present(self.company_name) {
            base.company_name = name;
        }
        if let Some(name) = present(self.contact_name) {
            base.contact_name = name;
        }
        if let Some(role) = present(self.contact_role) {
            base.contact_role = role;
        }
        if let Some(size) = present(self.company_size) {
            base.company_size = Some(size);
        }
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::error::REQUIRED_CLIENT_FIELDS;

    fn complete() -> ClientInfoInput {
        ClientInfoInput {
            company_name: Some("Acme".into()),
            contact_name: Some("Jordan".into()),
            contact_email: Some("jordan@acme.io".into()),
            contact_role: Some("CTO".into()),
            company_size: None,
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@c.d"));
    }

    #[test]
    fn test_complete_profile() {
        let info = complete().into_client_info().unwrap();
        assert_eq!(info.company_name, "Acme");
        assert!(info.company_size.is_none());
    }

    #[test]
    fn test_missing_field_lists_required() {
        let input = ClientInfoInput { contact_role: Some("  ".into()), ..complete() };
        match input.into_client_info() {
            Err(AssessmentError::Validation { required: Some(fields), .. }) => {
                assert_eq!(fields, REQUIRED_CLIENT_FIELDS.to_vec());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_bad_email_rejected() {
        let input = ClientInfoInput { contact_email: Some("not-an-email".into()), ..complete() };
        assert!(matches!(
            input.into_client_info(),
            Err(AssessmentError::Validation { required: None, .. })
        ));
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let base = complete().into_client_info().unwrap();
        let patch = ClientInfoInput {
            company_size: Some("50-200".into()),
            contact_role: Some(String::new()),
            ..Default::default()
        };
        let merged = patch.merge_into(base).unwrap();
        assert_eq!(merged.contact_role, "CTO");
        assert_eq!(merged.company_size.as_deref(), Some("50-200"));

        let bad = ClientInfoInput { contact_email: Some("nope".into()), ..Default::default() };
        assert!(bad.merge_into(merged).is_err());
    }
}
