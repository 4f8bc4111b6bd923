//! Closed status enumerations.
//!
//! Every categorical field in the record model is one of these enums. They
//! are deliberately *closed*: adding a new status is a compile-time-checked
//! change, and each enum carries an exhaustive `label()` mapping so display
//! text can never drift out of sync with the variants.
//!
//! Wire form is kebab-case (`up-to-date`, `visit-due`), matching the JSON
//! the record surfaces exchange.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::text::TextError;

/// Three-tier severity classification attached to mothers, children and visits.
///
/// Defaults to `Low`, the starting value of every registration form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Wire form of the risk level.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for RiskLevel {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(TextError::UnknownVariant {
                what: "risk level",
                value: other.to_string(),
            }),
        }
    }
}

/// Gender of a child record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Display label used by the child surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Boy",
            Gender::Female => "Girl",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for Gender {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(TextError::UnknownVariant {
                what: "gender",
                value: other.to_string(),
            }),
        }
    }
}

/// Which record collection a polymorphic patient reference resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientKind {
    Mother,
    Child,
}

impl PatientKind {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            PatientKind::Mother => "mother",
            PatientKind::Child => "child",
        }
    }
}

impl fmt::Display for PatientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for PatientKind {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mother" => Ok(PatientKind::Mother),
            "child" => Ok(PatientKind::Child),
            other => Err(TextError::UnknownVariant {
                what: "patient kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle state of a scheduled home visit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitStatus {
    Pending,
    Completed,
    Missed,
}

impl VisitStatus {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            VisitStatus::Pending => "pending",
            VisitStatus::Completed => "completed",
            VisitStatus::Missed => "missed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisitStatus::Pending => "Pending",
            VisitStatus::Completed => "Completed",
            VisitStatus::Missed => "Missed",
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for VisitStatus {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VisitStatus::Pending),
            "completed" => Ok(VisitStatus::Completed),
            "missed" => Ok(VisitStatus::Missed),
            other => Err(TextError::UnknownVariant {
                what: "visit status",
                value: other.to_string(),
            }),
        }
    }
}

/// Where a child stands against the immunisation schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VaccinationStatus {
    UpToDate,
    Due,
    Overdue,
}

impl VaccinationStatus {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            VaccinationStatus::UpToDate => "up-to-date",
            VaccinationStatus::Due => "due",
            VaccinationStatus::Overdue => "overdue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VaccinationStatus::UpToDate => "Up to Date",
            VaccinationStatus::Due => "Due",
            VaccinationStatus::Overdue => "Overdue",
        }
    }

    /// Guidance message shown alongside the status on child surfaces.
    pub fn guidance(self) -> &'static str {
        match self {
            VaccinationStatus::UpToDate => {
                "All vaccinations are up to date. Next vaccination due according to schedule."
            }
            VaccinationStatus::Due => {
                "Some vaccinations are due. Please schedule vaccination appointment."
            }
            VaccinationStatus::Overdue => {
                "Some vaccinations are overdue. Immediate attention required."
            }
        }
    }
}

impl fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for VaccinationStatus {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up-to-date" => Ok(VaccinationStatus::UpToDate),
            "due" => Ok(VaccinationStatus::Due),
            "overdue" => Ok(VaccinationStatus::Overdue),
            other => Err(TextError::UnknownVariant {
                what: "vaccination status",
                value: other.to_string(),
            }),
        }
    }
}

/// Category of a worker notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    FollowUp,
    Vaccination,
    HighRisk,
    VisitDue,
}

impl NotificationKind {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            NotificationKind::FollowUp => "follow-up",
            NotificationKind::Vaccination => "vaccination",
            NotificationKind::HighRisk => "high-risk",
            NotificationKind::VisitDue => "visit-due",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::FollowUp => "Follow-up",
            NotificationKind::Vaccination => "Vaccination",
            NotificationKind::HighRisk => "High Risk",
            NotificationKind::VisitDue => "Visit Due",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for NotificationKind {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow-up" => Ok(NotificationKind::FollowUp),
            "vaccination" => Ok(NotificationKind::Vaccination),
            "high-risk" => Ok(NotificationKind::HighRisk),
            "visit-due" => Ok(NotificationKind::VisitDue),
            other => Err(TextError::UnknownVariant {
                what: "notification kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Actor role a session acts under.
///
/// An ASHA worker owns data entry and sees every record in her area; a
/// beneficiary is a read-only consumer of her own mother/child records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Asha,
    Beneficiary,
}

impl Role {
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Role::Asha => "asha",
            Role::Beneficiary => "beneficiary",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for Role {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asha" => Ok(Role::Asha),
            "beneficiary" => Ok(Role::Beneficiary),
            other => Err(TextError::UnknownVariant {
                what: "role",
                value: other.to_string(),
            }),
        }
    }
}
