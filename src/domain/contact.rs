use crate::domain::error::{AppError, Result};
use validator::{Validate, ValidationErrors};

/// Normalized name/email pair collected by the form.
///
/// Email is validated strictly; the name only has to be non-empty after
/// trimming.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct Contact {
    #[validate(length(min = 1, message = "o nome não pode ficar vazio"))]
    pub name: String,
    #[validate(email(message = "endereço de e-mail inválido"))]
    pub email: String,
}

impl Contact {
    /// Builds a validated contact from raw answers. Both fields are trimmed
    /// before validation. Returns `InvalidContact` with a user-presentable
    /// description on failure.
    pub fn new(name: &str, email: &str) -> Result<Contact> {
        let contact = Contact {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        };
        contact
            .validate()
            .map_err(|errors| AppError::InvalidContact(render_errors(&errors)))?;
        if !has_top_level_segment(&contact.email) {
            return Err(AppError::InvalidContact(
                "email: o domínio não tem um sufixo válido".to_string(),
            ));
        }
        Ok(contact)
    }
}

/// The email rule alone accepts bare domains like "ana@example". The form
/// additionally requires the final dot-separated label to exist and be at
/// least two characters long.
fn has_top_level_segment(email: &str) -> bool {
    email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .map(|(_, tld)| tld.len() >= 2)
        .unwrap_or(false)
}

fn render_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    let mut lines = Vec::new();
    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error.message.as_deref().unwrap_or(error.code.as_ref());
            lines.push(format!("{}: {}", field, message));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contact_is_normalized() {
        let contact = Contact::new("  Ana Silva  ", " ana@example.com ").unwrap();
        assert_eq!(contact.name, "Ana Silva");
        assert_eq!(contact.email, "ana@example.com");
    }

    #[test]
    fn test_rejects_malformed_email() {
        let err = Contact::new("Ana Silva", "not-an-email").unwrap_err();
        match err {
            AppError::InvalidContact(detail) => assert!(detail.contains("email")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_email_without_top_level_segment() {
        assert!(Contact::new("Ana Silva", "ana@example").is_err());
        assert!(Contact::new("Ana Silva", "ana@example.c").is_err());
        assert!(Contact::new("Ana Silva", "ana@example.com.").is_err());
    }

    #[test]
    fn test_accepts_short_but_complete_domain() {
        assert!(Contact::new("Ana", "a@b.co").is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = Contact::new("   ", "ana@example.com").unwrap_err();
        match err {
            AppError::InvalidContact(detail) => assert!(detail.contains("name")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_any_non_empty_name_passes() {
        assert!(Contact::new("x", "ana@example.com").is_ok());
        assert!(Contact::new("1234", "ana@example.com").is_ok());
    }
}
