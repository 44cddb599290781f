use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered stages of the application wizard.
///
/// The flow is linear; `Confirmation` is terminal and only reachable through
/// a successful submission from `ReviewSubmit`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PropertyInfo,
    PersonalInfo,
    ResidentialHistory,
    EmploymentIncome,
    CreditBackground,
    References,
    AdditionalInfo,
    SignatureTerms,
    ReviewSubmit,
    Confirmation,
}

impl WizardStep {
    pub const ALL: [WizardStep; 10] = [
        WizardStep::PropertyInfo,
        WizardStep::PersonalInfo,
        WizardStep::ResidentialHistory,
        WizardStep::EmploymentIncome,
        WizardStep::CreditBackground,
        WizardStep::References,
        WizardStep::AdditionalInfo,
        WizardStep::SignatureTerms,
        WizardStep::ReviewSubmit,
        WizardStep::Confirmation,
    ];

    /// One-based position for display.
    pub const fn number(self) -> u8 {
        match self {
            WizardStep::PropertyInfo => 1,
            WizardStep::PersonalInfo => 2,
            WizardStep::ResidentialHistory => 3,
            WizardStep::EmploymentIncome => 4,
            WizardStep::CreditBackground => 5,
            WizardStep::References => 6,
            WizardStep::AdditionalInfo => 7,
            WizardStep::SignatureTerms => 8,
            WizardStep::ReviewSubmit => 9,
            WizardStep::Confirmation => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::PropertyInfo => "Property Information",
            WizardStep::PersonalInfo => "Personal Information",
            WizardStep::ResidentialHistory => "Residential History",
            WizardStep::EmploymentIncome => "Employment & Income",
            WizardStep::CreditBackground => "Credit & Background",
            WizardStep::References => "References",
            WizardStep::AdditionalInfo => "Additional Information",
            WizardStep::SignatureTerms => "Signature & Terms",
            WizardStep::ReviewSubmit => "Review & Submit",
            WizardStep::Confirmation => "Confirmation",
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        let position = self.number() as usize;
        Self::ALL.get(position).copied()
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self.number() {
            1 => None,
            n => Self::ALL.get(n as usize - 2).copied(),
        }
    }

    /// Optional sections may be skipped without validation; the identity and
    /// contact steps plus review/confirmation may not.
    pub const fn is_skippable(self) -> bool {
        matches!(
            self,
            WizardStep::ResidentialHistory
                | WizardStep::EmploymentIncome
                | WizardStep::CreditBackground
                | WizardStep::References
                | WizardStep::AdditionalInfo
                | WizardStep::SignatureTerms
        )
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, WizardStep::Confirmation)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
