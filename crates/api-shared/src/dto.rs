//! Request/response bodies for the REST surface.
//!
//! Record shapes serialise themselves (camelCase, see `sakhi-core`);
//! the types here exist where the wire shape differs from the domain
//! shape: registration requests mirror form state, error responses carry
//! the field→message map.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

use sakhi_core::collections::CategoryFilter;
use sakhi_core::records::{Child, DashboardStats, HealthExam, Mother, Notification, Visit, Vitals};
use sakhi_core::validation::{ChildDraft, MotherDraft};
use sakhi_core::FieldErrors;
use sakhi_store::ExamDraft;
use sakhi_types::{Gender, PatientKind, RiskLevel, VaccinationStatus, VisitStatus};

/// Turn an optional query value into the shared category filter: absent
/// means "all", the sentinel no-op.
pub fn category_filter<T>(value: Option<T>) -> CategoryFilter<T> {
    value.map_or(CategoryFilter::All, CategoryFilter::Only)
}

/// Query parameters for the mother list.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct MotherListQuery {
    /// Case-insensitive name search.
    pub search: Option<String>,
    /// Keep only mothers at this risk level.
    #[param(value_type = Option<String>, example = "high")]
    pub risk: Option<RiskLevel>,
}

/// Query parameters for the child list.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct ChildListQuery {
    /// Case-insensitive search over child and mother names.
    pub search: Option<String>,
    /// Keep only children at this risk level.
    #[param(value_type = Option<String>, example = "high")]
    pub risk: Option<RiskLevel>,
    /// Keep only children with this vaccination status.
    #[param(value_type = Option<String>, example = "overdue")]
    pub vaccination: Option<VaccinationStatus>,
}

/// Query parameters for the visit list.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct VisitListQuery {
    /// Case-insensitive search over patient name and address.
    pub search: Option<String>,
    /// Keep only visits in this status.
    #[param(value_type = Option<String>, example = "pending")]
    pub status: Option<VisitStatus>,
}

/// Mother registration form, as submitted.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMotherReq {
    pub name: String,
    pub age: Option<u32>,
    pub phone: String,
    pub address: String,
    pub pregnancy_week: Option<u32>,
    /// Defaults to `low` when omitted, like the form's initial state.
    #[schema(value_type = Option<String>, example = "low")]
    pub risk_level: Option<RiskLevel>,
    pub lmp: Option<NaiveDate>,
    pub last_visit: Option<NaiveDate>,
}

impl RegisterMotherReq {
    pub fn into_draft(self) -> MotherDraft {
        MotherDraft {
            name: self.name,
            age: self.age,
            phone: self.phone,
            address: self.address,
            pregnancy_week: self.pregnancy_week,
            risk_level: self.risk_level.unwrap_or_default(),
            lmp: self.lmp,
            last_visit: self.last_visit,
        }
    }
}

/// Child registration form, as submitted.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterChildReq {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Defaults to `male`, the form's initial selection.
    #[schema(value_type = Option<String>, example = "male")]
    pub gender: Option<Gender>,
    pub mother_id: String,
    /// Birth weight in kg.
    pub birth_weight: Option<f64>,
    #[schema(value_type = Option<String>, example = "low")]
    pub risk_level: Option<RiskLevel>,
}

impl RegisterChildReq {
    pub fn into_draft(self) -> ChildDraft {
        ChildDraft {
            name: self.name,
            date_of_birth: self.date_of_birth,
            gender: self.gender.unwrap_or(Gender::Male),
            mother_id: self.mother_id,
            birth_weight: self.birth_weight,
            risk_level: self.risk_level.unwrap_or_default(),
        }
    }
}

/// Health examination submission.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordExamReq {
    pub patient_id: String,
    #[schema(value_type = String, example = "mother")]
    pub patient_kind: PatientKind,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub vitals: Vitals,
    pub notes: Option<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

impl RecordExamReq {
    pub fn into_draft(self) -> ExamDraft {
        ExamDraft {
            patient_id: self.patient_id,
            patient_kind: self.patient_kind,
            vitals: self.vitals,
            notes: self.notes,
            risk_factors: self.risk_factors,
        }
    }
}

/// Field-scoped validation failure, HTTP 422.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorRes {
    /// Field name → human-readable message, one entry per violation.
    pub errors: BTreeMap<String, String>,
}

impl ValidationErrorRes {
    pub fn from_field_errors(errors: FieldErrors) -> Self {
        Self {
            errors: errors
                .into_iter()
                .map(|(field, message)| (field.to_string(), message))
                .collect(),
        }
    }
}

/// Generic error body for 404/500 responses.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListMothersRes {
    #[schema(value_type = Vec<Object>)]
    pub mothers: Vec<Mother>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListChildrenRes {
    #[schema(value_type = Vec<Object>)]
    pub children: Vec<Child>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListVisitsRes {
    #[schema(value_type = Vec<Object>)]
    pub visits: Vec<Visit>,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ListNotificationsRes {
    #[schema(value_type = Vec<Object>)]
    pub notifications: Vec<Notification>,
    /// Unread badge count over the returned notifications.
    pub unread: usize,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct DashboardRes {
    #[schema(value_type = Object)]
    pub stats: DashboardStats,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ExamRes {
    #[schema(value_type = Object)]
    pub exam: HealthExam,
}
