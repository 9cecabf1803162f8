use crate::domain::model::{Field, Industry, LeadInput, ValidationError};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const INDUSTRY_REQUIRED: &str = "Please select your industry";
pub const INDUSTRY_INVALID: &str = "Please select a valid industry";

// local@domain.tld: no whitespace, a single '@', and a '.' in the domain.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Input that passed validation, with the industry resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLead {
    pub name: String,
    pub email: String,
    pub industry: Industry,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Field-level errors for `input`, ordered name, email, industry.
/// An empty list means the input can be persisted.
pub fn validate(input: &LeadInput) -> Vec<ValidationError> {
    match check(input) {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    }
}

pub fn check(input: &LeadInput) -> Result<ValidLead, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if input.name.trim().is_empty() {
        errors.push(ValidationError::new(Field::Name, NAME_REQUIRED));
    }

    if input.email.trim().is_empty() {
        errors.push(ValidationError::new(Field::Email, EMAIL_REQUIRED));
    } else if !is_valid_email(&input.email) {
        errors.push(ValidationError::new(Field::Email, EMAIL_INVALID));
    }

    let industry = if input.industry.is_empty() {
        errors.push(ValidationError::new(Field::Industry, INDUSTRY_REQUIRED));
        None
    } else {
        match input.industry.parse::<Industry>() {
            Ok(industry) => Some(industry),
            Err(_) => {
                errors.push(ValidationError::new(Field::Industry, INDUSTRY_INVALID));
                None
            }
        }
    };

    match industry {
        Some(industry) if errors.is_empty() => Ok(ValidLead {
            name: input.name.clone(),
            email: input.email.clone(),
            industry,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(errors: &[ValidationError]) -> Vec<Field> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        let input = LeadInput::new("Ann", "a@b.com", "technology");
        assert!(validate(&input).is_empty());

        let lead = check(&input).unwrap();
        assert_eq!(lead.industry, Industry::Technology);
        assert_eq!(lead.name, "Ann");
    }

    #[test]
    fn test_empty_name_error_comes_first() {
        for name in ["", "   ", "\t\n"] {
            let errors = validate(&LeadInput::new(name, "not-an-email", ""));
            assert_eq!(errors[0], ValidationError::new(Field::Name, NAME_REQUIRED));
        }
    }

    #[test]
    fn test_all_fields_empty_reports_in_declaration_order() {
        let errors = validate(&LeadInput::default());
        assert_eq!(fields(&errors), vec![Field::Name, Field::Email, Field::Industry]);
        assert_eq!(errors[1].message, EMAIL_REQUIRED);
        assert_eq!(errors[2].message, INDUSTRY_REQUIRED);
    }

    #[test]
    fn test_malformed_emails_are_rejected() {
        for email in [
            "plainaddress",
            "ann@",
            "@b.com",
            "ann@bcom",
            "ann@b.",
            "a nn@b.com",
            "ann@@b.com",
            "ann@b@c.com",
        ] {
            let errors = validate(&LeadInput::new("Ann", email, "retail"));
            assert_eq!(
                errors,
                vec![ValidationError::new(Field::Email, EMAIL_INVALID)],
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_well_formed_emails_are_accepted() {
        for email in ["a@b.com", "first.last@sub.example.org", "x+tag@y.io"] {
            assert!(is_valid_email(email), "expected {email:?} to be accepted");
        }
    }

    #[test]
    fn test_whitespace_email_is_reported_as_missing() {
        let errors = validate(&LeadInput::new("Ann", "   ", "other"));
        assert_eq!(errors, vec![ValidationError::new(Field::Email, EMAIL_REQUIRED)]);
    }

    #[test]
    fn test_industry_must_be_selected_from_the_list() {
        let missing = validate(&LeadInput::new("Ann", "a@b.com", ""));
        assert_eq!(
            missing,
            vec![ValidationError::new(Field::Industry, INDUSTRY_REQUIRED)]
        );

        let unknown = validate(&LeadInput::new("Ann", "a@b.com", "aerospace"));
        assert_eq!(
            unknown,
            vec![ValidationError::new(Field::Industry, INDUSTRY_INVALID)]
        );
    }

    #[test]
    fn test_every_listed_industry_is_accepted() {
        for industry in Industry::ALL {
            let input = LeadInput::new("Ann", "a@b.com", industry.as_str());
            assert!(validate(&input).is_empty());
        }
    }
}
