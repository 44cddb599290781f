use super::common::*;
use crate::wizard::{
    validate_document, validate_step, DocumentCommand, EmploymentPatch, EmployerPatch,
    WizardStep,
};

#[test]
fn personal_info_step_reports_every_failing_field_at_once() {
    let document = empty_wizard().document().clone();
    let errors = validate_step(WizardStep::PersonalInfo, &document);

    assert_eq!(errors.len(), 3);
    assert!(errors.contains_key("personal_information.full_name"));
    assert!(errors.contains_key("personal_information.email"));
    assert!(errors.contains_key("personal_information.phone_number"));
}

#[test]
fn malformed_email_is_flagged_even_when_present() {
    let document = empty_wizard()
        .document()
        .apply(&personal_info_command())
        .expect("fill personal info")
        .apply(&DocumentCommand::UpdatePersonalInformation(
            crate::wizard::PersonalPatch {
                email: Some("not-an-email".to_string()),
                ..Default::default()
            },
        ))
        .expect("break the email");

    let errors = validate_step(WizardStep::PersonalInfo, &document);
    assert_eq!(
        errors.get("personal_information.email").map(String::as_str),
        Some("Enter a valid email address")
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn optional_steps_have_no_blocking_rules() {
    let document = empty_wizard().document().clone();
    for step in [
        WizardStep::PropertyInfo,
        WizardStep::ResidentialHistory,
        WizardStep::EmploymentIncome,
        WizardStep::CreditBackground,
        WizardStep::References,
        WizardStep::AdditionalInfo,
        WizardStep::ReviewSubmit,
        WizardStep::Confirmation,
    ] {
        assert!(
            validate_step(step, &document).is_empty(),
            "{step} should not block on an empty document"
        );
    }
}

#[test]
fn signature_step_requires_both_acknowledgments() {
    let document = empty_wizard().document().clone();
    let errors = validate_step(WizardStep::SignatureTerms, &document);

    assert_eq!(errors.len(), 2);
    assert!(errors
        .contains_key("signature_acknowledgment.terms_acknowledgment.agree_to_lease_terms"));
    assert!(errors.contains_key(
        "signature_acknowledgment.terms_acknowledgment.consent_to_background_credit_checks"
    ));

    let acknowledged = document.apply(&terms_command()).expect("acknowledge");
    assert!(validate_step(WizardStep::SignatureTerms, &acknowledged).is_empty());
}

#[test]
fn whole_document_validation_is_a_superset_of_the_step_rules() {
    // A document whose signature step was skipped still fails at submit time.
    let document = empty_wizard()
        .document()
        .apply(&personal_info_command())
        .expect("fill personal info");

    let errors = validate_document(&document);
    assert!(errors
        .contains_key("signature_acknowledgment.terms_acknowledgment.agree_to_lease_terms"));
    assert!(errors.contains_key(
        "signature_acknowledgment.terms_acknowledgment.consent_to_background_credit_checks"
    ));

    for (path, message) in validate_step(WizardStep::SignatureTerms, &document) {
        assert_eq!(errors.get(&path), Some(&message), "step rule missing for {path}");
    }
}

#[test]
fn negative_income_is_rejected_at_submit_time_only() {
    let document = empty_wizard()
        .document()
        .apply(&DocumentCommand::UpdateEmployment(EmploymentPatch {
            current_employer: Some(EmployerPatch {
                monthly_income: Some(-1200.0),
                ..EmployerPatch::default()
            }),
            other_income_amount: Some(-50.0),
            ..EmploymentPatch::default()
        }))
        .expect("record negative income");

    // The employment step itself never blocks navigation.
    assert!(validate_step(WizardStep::EmploymentIncome, &document).is_empty());

    let errors = validate_document(&document);
    assert!(errors.contains_key("employment_income.current_employer.monthly_income"));
    assert!(errors.contains_key("employment_income.other_income_amount"));
}

#[test]
fn clean_filled_document_passes_whole_document_validation() {
    let wizard = wizard_at(WizardStep::ReviewSubmit);
    assert!(validate_document(wizard.document()).is_empty());
}
