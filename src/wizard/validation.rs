//! Single rule set behind both the per-step and whole-document validators.
//!
//! The per-step view blocks `next` on the two validating steps; the
//! whole-document view runs at submit time and is a strict superset, so the
//! acknowledgment rules are re-checked even when the signature step was
//! skipped or revisited.

use std::collections::BTreeMap;

use super::document::ApplicationDocument;
use super::step::WizardStep;

/// Field errors keyed by dotted path (`section.field` or deeper).
pub type FieldErrors = BTreeMap<String, String>;

pub(crate) const PATH_FULL_NAME: &str = "personal_information.full_name";
pub(crate) const PATH_EMAIL: &str = "personal_information.email";
pub(crate) const PATH_PHONE: &str = "personal_information.phone_number";
pub(crate) const PATH_LEASE_TERMS: &str =
    "signature_acknowledgment.terms_acknowledgment.agree_to_lease_terms";
pub(crate) const PATH_BACKGROUND_CONSENT: &str =
    "signature_acknowledgment.terms_acknowledgment.consent_to_background_credit_checks";
pub(crate) const PATH_MONTHLY_INCOME: &str =
    "employment_income.current_employer.monthly_income";
pub(crate) const PATH_OTHER_INCOME: &str = "employment_income.other_income_amount";

/// Validate only the rules attached to one step.
///
/// Personal info and signature/terms are the only blocking steps; every other
/// step returns an empty map so `next` and `skip` behave identically there.
pub fn validate_step(step: WizardStep, document: &ApplicationDocument) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match step {
        WizardStep::PersonalInfo => personal_information_rules(document, &mut errors),
        WizardStep::SignatureTerms => acknowledgment_rules(document, &mut errors),
        _ => {}
    }
    errors
}

/// Validate the complete document ahead of submission.
pub fn validate_document(document: &ApplicationDocument) -> FieldErrors {
    let mut errors = FieldErrors::new();
    personal_information_rules(document, &mut errors);
    employment_income_rules(document, &mut errors);
    acknowledgment_rules(document, &mut errors);
    errors
}

fn personal_information_rules(document: &ApplicationDocument, errors: &mut FieldErrors) {
    let personal = &document.personal_information;

    if personal.full_name.trim().is_empty() {
        errors.insert(
            PATH_FULL_NAME.to_string(),
            "Full name is required".to_string(),
        );
    }

    if personal.email.trim().is_empty() {
        errors.insert(PATH_EMAIL.to_string(), "Email is required".to_string());
    } else if !is_plausible_email(&personal.email) {
        errors.insert(
            PATH_EMAIL.to_string(),
            "Enter a valid email address".to_string(),
        );
    }

    if personal.phone_number.trim().is_empty() {
        errors.insert(
            PATH_PHONE.to_string(),
            "Phone number is required".to_string(),
        );
    }
}

fn acknowledgment_rules(document: &ApplicationDocument, errors: &mut FieldErrors) {
    let terms = &document.signature_acknowledgment.terms_acknowledgment;

    if !terms.agree_to_lease_terms {
        errors.insert(
            PATH_LEASE_TERMS.to_string(),
            "You must agree to the lease terms".to_string(),
        );
    }
    if !terms.consent_to_background_credit_checks {
        errors.insert(
            PATH_BACKGROUND_CONSENT.to_string(),
            "Consent to background and credit checks is required".to_string(),
        );
    }
}

fn employment_income_rules(document: &ApplicationDocument, errors: &mut FieldErrors) {
    let employment = &document.employment_income;

    if let Some(income) = employment.current_employer.monthly_income {
        if income < 0.0 {
            errors.insert(
                PATH_MONTHLY_INCOME.to_string(),
                "Monthly income cannot be negative".to_string(),
            );
        }
    }
    if let Some(amount) = employment.other_income_amount {
        if amount < 0.0 {
            errors.insert(
                PATH_OTHER_INCOME.to_string(),
                "Additional income cannot be negative".to_string(),
            );
        }
    }
}

/// Basic `local@domain.tld` shape check; intentionally lenient beyond that.
fn is_plausible_email(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
