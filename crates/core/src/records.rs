//! Record shapes.
//!
//! Small, explicit, human-readable structs for the records Sakhi reasons
//! about. Records are immutable value objects: no record owns another, they
//! reference each other by opaque identifier strings (`Child.mother_id`,
//! `Visit.patient_id` resolved by `patient_kind`).
//!
//! Wire form is camelCase JSON, matching what the mobile surfaces exchange.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sakhi_types::{
    Gender, NotificationKind, PatientKind, RiskLevel, VaccinationStatus, VisitStatus,
};

/// A registered expectant or recent mother.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mother {
    pub id: String,
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    pub phone: String,
    pub address: String,
    /// Last menstrual period, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmp: Option<NaiveDate>,
    /// Expected delivery date, derived from `lmp` at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edd: Option<NaiveDate>,
    pub risk_level: RiskLevel,
    /// Gestation week at registration, 0..=42 when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnancy_week: Option<u32>,
    pub visit_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_visit: Option<NaiveDate>,
}

/// A child under five tracked against the immunisation schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub mother_id: String,
    /// Denormalised for list surfaces; authoritative name lives on `Mother`.
    pub mother_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    /// Whole months since birth, recomputed from `date_of_birth` and "now".
    pub age_months: u32,
    pub risk_level: RiskLevel,
    pub vaccination_status: VaccinationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_screening: Option<NaiveDate>,
    /// Weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in cm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// A scheduled home visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub patient_kind: PatientKind,
    pub risk_level: RiskLevel,
    pub scheduled_date: DateTime<Utc>,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Distance from the worker's base, in km.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub status: VisitStatus,
    /// Lower number = more urgent.
    pub priority: u32,
}

/// A notification on the worker's attention list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Vitals captured during a health examination. Every field is optional;
/// whatever was not measured is simply absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_systolic: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_diastolic: Option<f64>,
    /// Weight in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in cm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Body temperature in °F.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Beats per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse_rate: Option<f64>,
    /// Oxygen saturation, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sp_o2: Option<f64>,
    /// Haemoglobin in g/dL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<f64>,
}

/// A recorded health examination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthExam {
    pub id: String,
    pub patient_id: String,
    pub patient_kind: PatientKind,
    pub date: DateTime<Utc>,
    pub vitals: Vitals,
    /// Derived from `vitals.weight`/`vitals.height` when both were measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_factors: Vec<String>,
}

/// Aggregate counters for the dashboard: a derived read model, never
/// stored independently. See [`crate::collections::dashboard_stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_visits: u32,
    pub completed_visits: u32,
    pub pending_visits: u32,
    pub high_risk_cases: u32,
    pub total_mothers: u32,
    pub total_children: u32,
}
