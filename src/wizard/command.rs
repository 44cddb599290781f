use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::document::{
    AdditionalInformation, ApplicationDocument, BankruptcyHistory, CreditScoreRange,
    CriminalBackground, EvictionHistory, PreviousAddress, ReferenceEntry,
};

/// Typed update command applied to an [`ApplicationDocument`].
///
/// Each variant names a concrete section so invalid section/field
/// combinations are unrepresentable. Scalar sections take a patch whose
/// `Some` fields are shallow-merged; array sections follow the positional
/// add/remove/update contract, where indices target the array as it stands
/// when the command is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocumentCommand {
    UpdatePersonalInformation(PersonalPatch),
    UpdateCurrentAddress(CurrentAddressPatch),
    AddPreviousAddress,
    RemovePreviousAddress { index: usize },
    UpdatePreviousAddress { index: usize, patch: PreviousAddressPatch },
    UpdateEmployment(EmploymentPatch),
    UpdateCreditBackground(CreditPatch),
    AddPersonalReference,
    RemovePersonalReference { index: usize },
    UpdatePersonalReference { index: usize, patch: ReferencePatch },
    AddProfessionalReference,
    RemoveProfessionalReference { index: usize },
    UpdateProfessionalReference { index: usize, patch: ReferencePatch },
    UpdateAdditionalInformation(AdditionalInfoPatch),
    ReplaceAdditionalInformation(AdditionalInformation),
    UpdateSignature(SignaturePatch),
}

/// Error raised when a command cannot be applied to the current document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("index {index} is out of range for {section} (len {len})")]
    IndexOutOfRange {
        section: &'static str,
        index: usize,
        len: usize,
    },
}

impl ApplicationDocument {
    /// Apply a command, producing a new document and leaving `self` intact.
    ///
    /// Callers replace their copy with the returned value; the previous
    /// document never changes underneath anyone still holding it.
    pub fn apply(&self, command: &DocumentCommand) -> Result<ApplicationDocument, DocumentError> {
        let mut next = self.clone();

        match command {
            DocumentCommand::UpdatePersonalInformation(patch) => {
                patch.merge_into(&mut next.personal_information);
            }
            DocumentCommand::UpdateCurrentAddress(patch) => {
                patch.merge_into(&mut next.residential_history.current_address);
            }
            DocumentCommand::AddPreviousAddress => {
                next.residential_history
                    .previous_addresses
                    .push(PreviousAddress::default());
            }
            DocumentCommand::RemovePreviousAddress { index } => {
                remove_at(
                    &mut next.residential_history.previous_addresses,
                    *index,
                    "residential_history.previous_addresses",
                )?;
            }
            DocumentCommand::UpdatePreviousAddress { index, patch } => {
                let entry = entry_at(
                    &mut next.residential_history.previous_addresses,
                    *index,
                    "residential_history.previous_addresses",
                )?;
                patch.merge_into(entry);
            }
            DocumentCommand::UpdateEmployment(patch) => {
                patch.merge_into(&mut next.employment_income);
            }
            DocumentCommand::UpdateCreditBackground(patch) => {
                patch.merge_into(&mut next.credit_background_check);
            }
            DocumentCommand::AddPersonalReference => {
                next.references
                    .personal_references
                    .push(ReferenceEntry::default());
            }
            DocumentCommand::RemovePersonalReference { index } => {
                remove_at(
                    &mut next.references.personal_references,
                    *index,
                    "references.personal_references",
                )?;
            }
            DocumentCommand::UpdatePersonalReference { index, patch } => {
                let entry = entry_at(
                    &mut next.references.personal_references,
                    *index,
                    "references.personal_references",
                )?;
                patch.merge_into(entry);
            }
            DocumentCommand::AddProfessionalReference => {
                next.references
                    .professional_references
                    .push(ReferenceEntry::default());
            }
            DocumentCommand::RemoveProfessionalReference { index } => {
                remove_at(
                    &mut next.references.professional_references,
                    *index,
                    "references.professional_references",
                )?;
            }
            DocumentCommand::UpdateProfessionalReference { index, patch } => {
                let entry = entry_at(
                    &mut next.references.professional_references,
                    *index,
                    "references.professional_references",
                )?;
                patch.merge_into(entry);
            }
            DocumentCommand::UpdateAdditionalInformation(patch) => {
                patch.merge_into(&mut next.additional_information);
            }
            DocumentCommand::ReplaceAdditionalInformation(section) => {
                next.additional_information = section.clone();
            }
            DocumentCommand::UpdateSignature(patch) => {
                patch.merge_into(&mut next.signature_acknowledgment);
            }
        }

        Ok(next)
    }
}

impl DocumentCommand {
    /// Dotted error-map paths this command writes to, used for opportunistic
    /// clearing of stale validation errors when a field is edited again.
    pub fn touched_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        match self {
            DocumentCommand::UpdatePersonalInformation(patch) => {
                patch.touched("personal_information", &mut paths);
            }
            DocumentCommand::UpdateCurrentAddress(patch) => {
                patch.touched("residential_history.current_address", &mut paths);
            }
            DocumentCommand::UpdateEmployment(patch) => {
                patch.touched("employment_income", &mut paths);
            }
            DocumentCommand::UpdateCreditBackground(patch) => {
                patch.touched("credit_background_check", &mut paths);
            }
            DocumentCommand::UpdateSignature(patch) => {
                patch.touched("signature_acknowledgment", &mut paths);
            }
            DocumentCommand::UpdateAdditionalInformation(patch) => {
                patch.touched("additional_information", &mut paths);
            }
            DocumentCommand::ReplaceAdditionalInformation(_) => {
                paths.push("additional_information".to_string());
            }
            // Array entries carry no blocking validation, so there are no
            // error-map entries to clear for them.
            DocumentCommand::AddPreviousAddress
            | DocumentCommand::RemovePreviousAddress { .. }
            | DocumentCommand::UpdatePreviousAddress { .. }
            | DocumentCommand::AddPersonalReference
            | DocumentCommand::RemovePersonalReference { .. }
            | DocumentCommand::UpdatePersonalReference { .. }
            | DocumentCommand::AddProfessionalReference
            | DocumentCommand::RemoveProfessionalReference { .. }
            | DocumentCommand::UpdateProfessionalReference { .. } => {}
        }
        paths
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, section: &'static str) -> Result<T, DocumentError> {
    if index >= items.len() {
        return Err(DocumentError::IndexOutOfRange {
            section,
            index,
            len: items.len(),
        });
    }
    // Vec::remove shifts the tail left, preserving relative order.
    Ok(items.remove(index))
}

fn entry_at<'a, T>(
    items: &'a mut [T],
    index: usize,
    section: &'static str,
) -> Result<&'a mut T, DocumentError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(DocumentError::IndexOutOfRange {
            section,
            index,
            len,
        })
}

macro_rules! merge_field {
    ($patch:expr, $target:expr, $field:ident) => {
        if let Some(value) = &$patch.$field {
            $target.$field = value.clone();
        }
    };
}

macro_rules! touch_field {
    ($patch:expr, $prefix:expr, $out:expr, $field:ident) => {
        if $patch.$field.is_some() {
            $out.push(format!("{}.{}", $prefix, stringify!($field)));
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub social_security_number: Option<String>,
    pub drivers_license_number: Option<String>,
    pub emergency_contact: Option<ContactPatch>,
}

impl PersonalPatch {
    fn merge_into(&self, target: &mut super::document::PersonalInformation) {
        merge_field!(self, target, full_name);
        merge_field!(self, target, email);
        merge_field!(self, target, phone_number);
        merge_field!(self, target, social_security_number);
        merge_field!(self, target, drivers_license_number);
        if let Some(date) = self.date_of_birth {
            target.date_of_birth = Some(date);
        }
        if let Some(contact) = &self.emergency_contact {
            merge_field!(contact, target.emergency_contact, name);
            merge_field!(contact, target.emergency_contact, relationship);
            merge_field!(contact, target.emergency_contact, phone_number);
        }
    }

    fn touched(&self, prefix: &str, out: &mut Vec<String>) {
        touch_field!(self, prefix, out, full_name);
        touch_field!(self, prefix, out, email);
        touch_field!(self, prefix, out, phone_number);
        touch_field!(self, prefix, out, date_of_birth);
        touch_field!(self, prefix, out, social_security_number);
        touch_field!(self, prefix, out, drivers_license_number);
        if let Some(contact) = &self.emergency_contact {
            let nested = format!("{prefix}.emergency_contact");
            touch_field!(contact, nested, out, name);
            touch_field!(contact, nested, out, relationship);
            touch_field!(contact, nested, out, phone_number);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentAddressPatch {
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub monthly_rent: Option<f64>,
    pub move_in_date: Option<NaiveDate>,
    pub reason_for_moving: Option<String>,
}

impl CurrentAddressPatch {
    fn merge_into(&self, target: &mut super::document::CurrentAddress) {
        merge_field!(self, target, street_address);
        merge_field!(self, target, city);
        merge_field!(self, target, state);
        merge_field!(self, target, zip_code);
        merge_field!(self, target, reason_for_moving);
        if let Some(rent) = self.monthly_rent {
            target.monthly_rent = Some(rent);
        }
        if let Some(date) = self.move_in_date {
            target.move_in_date = Some(date);
        }
    }

    fn touched(&self, prefix: &str, out: &mut Vec<String>) {
        touch_field!(self, prefix, out, street_address);
        touch_field!(self, prefix, out, city);
        touch_field!(self, prefix, out, state);
        touch_field!(self, prefix, out, zip_code);
        touch_field!(self, prefix, out, monthly_rent);
        touch_field!(self, prefix, out, move_in_date);
        touch_field!(self, prefix, out, reason_for_moving);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviousAddressPatch {
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub monthly_rent: Option<f64>,
    pub move_in_date: Option<NaiveDate>,
    pub move_out_date: Option<NaiveDate>,
    pub landlord_name: Option<String>,
    pub landlord_phone: Option<String>,
}

impl PreviousAddressPatch {
    fn merge_into(&self, target: &mut PreviousAddress) {
        merge_field!(self, target, street_address);
        merge_field!(self, target, city);
        merge_field!(self, target, state);
        merge_field!(self, target, zip_code);
        merge_field!(self, target, landlord_name);
        merge_field!(self, target, landlord_phone);
        if let Some(rent) = self.monthly_rent {
            target.monthly_rent = Some(rent);
        }
        if let Some(date) = self.move_in_date {
            target.move_in_date = Some(date);
        }
        if let Some(date) = self.move_out_date {
            target.move_out_date = Some(date);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentPatch {
    pub current_employer: Option<EmployerPatch>,
    pub additional_income_sources: Option<String>,
    pub other_income_amount: Option<f64>,
}

impl EmploymentPatch {
    fn merge_into(&self, target: &mut super::document::EmploymentIncome) {
        merge_field!(self, target, additional_income_sources);
        if let Some(amount) = self.other_income_amount {
            target.other_income_amount = Some(amount);
        }
        if let Some(employer) = &self.current_employer {
            let target = &mut target.current_employer;
            merge_field!(employer, target, company_name);
            merge_field!(employer, target, job_title);
            merge_field!(employer, target, phone_number);
            merge_field!(employer, target, supervisor_name);
            if let Some(income) = employer.monthly_income {
                target.monthly_income = Some(income);
            }
            if let Some(date) = employer.start_date {
                target.start_date = Some(date);
            }
        }
    }

    fn touched(&self, prefix: &str, out: &mut Vec<String>) {
        touch_field!(self, prefix, out, additional_income_sources);
        touch_field!(self, prefix, out, other_income_amount);
        if let Some(employer) = &self.current_employer {
            let nested = format!("{prefix}.current_employer");
            touch_field!(employer, nested, out, company_name);
            touch_field!(employer, nested, out, job_title);
            touch_field!(employer, nested, out, monthly_income);
            touch_field!(employer, nested, out, start_date);
            touch_field!(employer, nested, out, phone_number);
            touch_field!(employer, nested, out, supervisor_name);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployerPatch {
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub monthly_income: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub supervisor_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditPatch {
    pub credit_score_range: Option<CreditScoreRange>,
    pub bankruptcy_history: Option<BankruptcyHistory>,
    pub eviction_history: Option<EvictionHistory>,
    pub criminal_background: Option<CriminalBackground>,
}

impl CreditPatch {
    fn merge_into(&self, target: &mut super::document::CreditBackgroundCheck) {
        if let Some(range) = self.credit_score_range {
            target.credit_score_range = Some(range);
        }
        if let Some(history) = self.bankruptcy_history {
            target.bankruptcy_history = Some(history);
        }
        if let Some(history) = &self.eviction_history {
            target.eviction_history = history.clone();
        }
        if let Some(background) = self.criminal_background {
            target.criminal_background = background;
        }
    }

    fn touched(&self, prefix: &str, out: &mut Vec<String>) {
        touch_field!(self, prefix, out, credit_score_range);
        touch_field!(self, prefix, out, bankruptcy_history);
        touch_field!(self, prefix, out, eviction_history);
        touch_field!(self, prefix, out, criminal_background);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencePatch {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub years_known: Option<u8>,
}

impl ReferencePatch {
    fn merge_into(&self, target: &mut ReferenceEntry) {
        merge_field!(self, target, name);
        merge_field!(self, target, relationship);
        merge_field!(self, target, phone_number);
        merge_field!(self, target, email);
        if let Some(years) = self.years_known {
            target.years_known = Some(years);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalInfoPatch {
    pub has_pets: Option<bool>,
    pub pet_type: Option<String>,
    pub number_of_pets: Option<u8>,
    pub pet_description: Option<String>,
    pub number_of_vehicles: Option<u8>,
    pub vehicle_types: Option<String>,
    pub special_requests: Option<String>,
}

impl AdditionalInfoPatch {
    fn merge_into(&self, target: &mut AdditionalInformation) {
        merge_field!(self, target, pet_type);
        merge_field!(self, target, pet_description);
        merge_field!(self, target, vehicle_types);
        merge_field!(self, target, special_requests);
        if let Some(flag) = self.has_pets {
            target.has_pets = flag;
        }
        if let Some(count) = self.number_of_pets {
            target.number_of_pets = Some(count);
        }
        if let Some(count) = self.number_of_vehicles {
            target.number_of_vehicles = Some(count);
        }
    }

    fn touched(&self, prefix: &str, out: &mut Vec<String>) {
        touch_field!(self, prefix, out, has_pets);
        touch_field!(self, prefix, out, pet_type);
        touch_field!(self, prefix, out, number_of_pets);
        touch_field!(self, prefix, out, pet_description);
        touch_field!(self, prefix, out, number_of_vehicles);
        touch_field!(self, prefix, out, vehicle_types);
        touch_field!(self, prefix, out, special_requests);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignaturePatch {
    pub electronic_signature: Option<ElectronicSignaturePatch>,
    pub terms_acknowledgment: Option<TermsPatch>,
}

impl SignaturePatch {
    fn merge_into(&self, target: &mut super::document::SignatureAcknowledgment) {
        if let Some(signature) = &self.electronic_signature {
            merge_field!(signature, target.electronic_signature, full_name);
            if let Some(date) = signature.signature_date {
                target.electronic_signature.signature_date = Some(date);
            }
        }
        if let Some(terms) = &self.terms_acknowledgment {
            let target = &mut target.terms_acknowledgment;
            if let Some(flag) = terms.agree_to_lease_terms {
                target.agree_to_lease_terms = flag;
            }
            if let Some(flag) = terms.consent_to_background_credit_checks {
                target.consent_to_background_credit_checks = flag;
            }
            if let Some(flag) = terms.understand_rental_policies {
                target.understand_rental_policies = flag;
            }
        }
    }

    fn touched(&self, prefix: &str, out: &mut Vec<String>) {
        if let Some(signature) = &self.electronic_signature {
            let nested = format!("{prefix}.electronic_signature");
            touch_field!(signature, nested, out, full_name);
            touch_field!(signature, nested, out, signature_date);
        }
        if let Some(terms) = &self.terms_acknowledgment {
            let nested = format!("{prefix}.terms_acknowledgment");
            touch_field!(terms, nested, out, agree_to_lease_terms);
            touch_field!(terms, nested, out, consent_to_background_credit_checks);
            touch_field!(terms, nested, out, understand_rental_policies);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectronicSignaturePatch {
    pub full_name: Option<String>,
    pub signature_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermsPatch {
    pub agree_to_lease_terms: Option<bool>,
    pub consent_to_background_credit_checks: Option<bool>,
    pub understand_rental_policies: Option<bool>,
}
