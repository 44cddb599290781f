use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of the property an application targets. Assigned when the
/// wizard starts and never reassigned afterwards (no command touches it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// The single aggregate the wizard assembles across its steps.
///
/// Every leaf starts empty; sections are only mutated through
/// [`DocumentCommand`](super::command::DocumentCommand) application, which
/// produces a fresh document value rather than editing in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDocument {
    pub property_id: PropertyId,
    pub personal_information: PersonalInformation,
    pub residential_history: ResidentialHistory,
    pub employment_income: EmploymentIncome,
    pub credit_background_check: CreditBackgroundCheck,
    pub references: References,
    pub additional_information: AdditionalInformation,
    pub signature_acknowledgment: SignatureAcknowledgment,
}

impl ApplicationDocument {
    pub fn new(property_id: PropertyId) -> Self {
        Self {
            property_id,
            personal_information: PersonalInformation::default(),
            residential_history: ResidentialHistory::default(),
            employment_income: EmploymentIncome::default(),
            credit_background_check: CreditBackgroundCheck::default(),
            references: References::default(),
            additional_information: AdditionalInformation::default(),
            signature_acknowledgment: SignatureAcknowledgment::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInformation {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub social_security_number: String,
    pub drivers_license_number: String,
    pub emergency_contact: EmergencyContact,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResidentialHistory {
    pub current_address: CurrentAddress,
    pub previous_addresses: Vec<PreviousAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub monthly_rent: Option<f64>,
    pub move_in_date: Option<NaiveDate>,
    pub reason_for_moving: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviousAddress {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub monthly_rent: Option<f64>,
    pub move_in_date: Option<NaiveDate>,
    pub move_out_date: Option<NaiveDate>,
    pub landlord_name: String,
    pub landlord_phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmploymentIncome {
    pub current_employer: CurrentEmployer,
    pub additional_income_sources: String,
    pub other_income_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentEmployer {
    pub company_name: String,
    pub job_title: String,
    pub monthly_income: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub phone_number: String,
    pub supervisor_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditBackgroundCheck {
    pub credit_score_range: Option<CreditScoreRange>,
    pub bankruptcy_history: Option<BankruptcyHistory>,
    pub eviction_history: EvictionHistory,
    pub criminal_background: CriminalBackground,
}

/// Self-reported credit band offered on the credit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditScoreRange {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl CreditScoreRange {
    pub const fn label(self) -> &'static str {
        match self {
            CreditScoreRange::Excellent => "750 or above",
            CreditScoreRange::Good => "700-749",
            CreditScoreRange::Fair => "650-699",
            CreditScoreRange::Poor => "600-649",
            CreditScoreRange::VeryPoor => "below 600",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankruptcyHistory {
    NeverFiled,
    Discharged,
    Active,
}

/// Eviction disclosure; free-text details accompany a prior eviction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvictionHistory {
    #[default]
    None,
    PastEviction {
        details: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriminalBackground {
    #[default]
    None,
    Misdemeanor,
    Felony,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct References {
    pub personal_references: Vec<ReferenceEntry>,
    pub professional_references: Vec<ReferenceEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub relationship: String,
    pub phone_number: String,
    pub email: String,
    pub years_known: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInformation {
    pub has_pets: bool,
    pub pet_type: String,
    pub number_of_pets: Option<u8>,
    pub pet_description: String,
    pub number_of_vehicles: Option<u8>,
    pub vehicle_types: String,
    pub special_requests: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureAcknowledgment {
    pub electronic_signature: ElectronicSignature,
    pub terms_acknowledgment: TermsAcknowledgment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectronicSignature {
    pub full_name: String,
    pub signature_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsAcknowledgment {
    pub agree_to_lease_terms: bool,
    pub consent_to_background_credit_checks: bool,
    pub understand_rental_policies: bool,
}
