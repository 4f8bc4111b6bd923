//! The in-memory record registry.
//!
//! One shared `Registry` handle backs every surface. Reads are scoped by
//! the calling [`Session`]; writes validate through `sakhi-core` and
//! fabricate identifiers the same way records would receive them from a
//! real backend (hyphen-less UUIDv4).

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use sakhi_core::records::{Child, DashboardStats, HealthExam, Mother, Notification, Visit, Vitals};
use sakhi_core::validation::{validate_child, validate_mother, ChildDraft, MotherDraft};
use sakhi_core::{clinical, collections, temporal};
use sakhi_types::{PatientKind, VaccinationStatus, VisitStatus};

use crate::error::{StoreError, StoreResult};
use crate::seed;
use crate::session::Session;

/// Input for recording a health examination.
#[derive(Clone, Debug)]
pub struct ExamDraft {
    pub patient_id: String,
    pub patient_kind: PatientKind,
    pub vitals: Vitals,
    pub notes: Option<String>,
    pub risk_factors: Vec<String>,
}

#[derive(Default)]
struct State {
    mothers: Vec<Mother>,
    children: Vec<Child>,
    visits: Vec<Visit>,
    notifications: Vec<Notification>,
    exams: Vec<HealthExam>,
}

impl State {
    /// Ids of every record the session may see: visible mothers plus the
    /// children of those mothers. Visits and notifications are visible
    /// when they reference a visible patient.
    fn visible_patient_ids(&self, session: &Session) -> HashSet<&str> {
        let mut ids: HashSet<&str> = self
            .mothers
            .iter()
            .filter(|mother| session.can_see_mother(mother))
            .map(|mother| mother.id.as_str())
            .collect();

        let child_ids: Vec<&str> = self
            .children
            .iter()
            .filter(|child| ids.contains(child.mother_id.as_str()))
            .map(|child| child.id.as_str())
            .collect();
        ids.extend(child_ids);

        ids
    }
}

/// Cloneable handle on the shared record collections.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<State>>,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Registry {
    /// An empty registry, mainly for tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the fictional fixture records, dated
    /// relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let state = State {
            mothers: seed::mothers(now),
            children: seed::children(now),
            visits: seed::visits(now),
            notifications: seed::notifications(now),
            exams: Vec::new(),
        };
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    // ------------------------------------------------------------------
    // Mothers
    // ------------------------------------------------------------------

    pub async fn list_mothers(&self, session: &Session) -> Vec<Mother> {
        let state = self.inner.read().await;
        state
            .mothers
            .iter()
            .filter(|mother| session.can_see_mother(mother))
            .cloned()
            .collect()
    }

    pub async fn get_mother(&self, session: &Session, id: &str) -> StoreResult<Mother> {
        let state = self.inner.read().await;
        state
            .mothers
            .iter()
            .find(|mother| mother.id == id && session.can_see_mother(mother))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                what: "mother",
                id: id.to_string(),
            })
    }

    /// Validate and register a mother. The expected delivery date is
    /// derived from the LMP when one was recorded.
    pub async fn register_mother(&self, draft: MotherDraft) -> StoreResult<Mother> {
        let errors = validate_mother(&draft);
        if !errors.is_empty() {
            return Err(StoreError::Validation {
                what: "mother",
                errors,
            });
        }

        let mother = Mother {
            id: new_id(),
            name: draft.name.trim().to_string(),
            age: draft.age.unwrap_or_default(),
            phone: draft.phone.trim().to_string(),
            address: draft.address.trim().to_string(),
            lmp: draft.lmp,
            edd: draft.lmp.map(temporal::estimated_delivery_date),
            risk_level: draft.risk_level,
            pregnancy_week: draft.pregnancy_week,
            visit_count: 0,
            last_visit: draft.last_visit,
            next_visit: None,
        };

        let mut state = self.inner.write().await;
        state.mothers.push(mother.clone());
        tracing::info!(mother_id = %mother.id, "registered mother");
        Ok(mother)
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    pub async fn list_children(&self, session: &Session) -> Vec<Child> {
        let state = self.inner.read().await;
        let visible = state.visible_patient_ids(session);
        state
            .children
            .iter()
            .filter(|child| visible.contains(child.id.as_str()))
            .cloned()
            .collect()
    }

    pub async fn get_child(&self, session: &Session, id: &str) -> StoreResult<Child> {
        let state = self.inner.read().await;
        let visible = state.visible_patient_ids(session);
        state
            .children
            .iter()
            .find(|child| child.id == id && visible.contains(child.id.as_str()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                what: "child",
                id: id.to_string(),
            })
    }

    /// Validate and register a child under an existing mother. Age in
    /// months is derived from the date of birth; new children start with a
    /// `Due` vaccination status.
    pub async fn register_child(
        &self,
        draft: ChildDraft,
        now: DateTime<Utc>,
    ) -> StoreResult<Child> {
        let today = now.date_naive();
        let mut state = self.inner.write().await;

        let known: Vec<&str> = state.mothers.iter().map(|m| m.id.as_str()).collect();
        let errors = validate_child(&draft, today, &known);
        if !errors.is_empty() {
            return Err(StoreError::Validation {
                what: "child",
                errors,
            });
        }

        // Validation guarantees the mother exists and the dob is present.
        let mother_name = state
            .mothers
            .iter()
            .find(|mother| mother.id == draft.mother_id)
            .map(|mother| mother.name.clone())
            .unwrap_or_default();
        let dob = draft.date_of_birth.unwrap_or(today);

        let child = Child {
            id: new_id(),
            name: draft.name.trim().to_string(),
            mother_id: draft.mother_id.trim().to_string(),
            mother_name,
            date_of_birth: dob,
            gender: draft.gender,
            age_months: temporal::age_in_months(dob, today),
            risk_level: draft.risk_level,
            vaccination_status: VaccinationStatus::Due,
            last_screening: None,
            weight: draft.birth_weight,
            height: None,
        };

        state.children.push(child.clone());
        tracing::info!(child_id = %child.id, mother_id = %child.mother_id, "registered child");
        Ok(child)
    }

    // ------------------------------------------------------------------
    // Visits
    // ------------------------------------------------------------------

    pub async fn list_visits(&self, session: &Session) -> Vec<Visit> {
        let state = self.inner.read().await;
        let visible = state.visible_patient_ids(session);
        state
            .visits
            .iter()
            .filter(|visit| visible.contains(visit.patient_id.as_str()))
            .cloned()
            .collect()
    }

    pub async fn complete_visit(&self, id: &str) -> StoreResult<Visit> {
        self.transition_visit(id, VisitStatus::Completed).await
    }

    pub async fn miss_visit(&self, id: &str) -> StoreResult<Visit> {
        self.transition_visit(id, VisitStatus::Missed).await
    }

    async fn transition_visit(&self, id: &str, status: VisitStatus) -> StoreResult<Visit> {
        let mut state = self.inner.write().await;
        let visit = state
            .visits
            .iter_mut()
            .find(|visit| visit.id == id)
            .ok_or_else(|| StoreError::NotFound {
                what: "visit",
                id: id.to_string(),
            })?;
        visit.status = status;
        Ok(visit.clone())
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub async fn list_notifications(&self, session: &Session) -> Vec<Notification> {
        let state = self.inner.read().await;
        let visible = state.visible_patient_ids(session);
        state
            .notifications
            .iter()
            .filter(|notification| match &notification.patient_id {
                Some(patient_id) => visible.contains(patient_id.as_str()),
                // Unaddressed notifications are worker-wide.
                None => session.phone.is_none(),
            })
            .cloned()
            .collect()
    }

    pub async fn mark_notification_read(&self, id: &str) -> StoreResult<Notification> {
        let mut state = self.inner.write().await;
        let notification = state
            .notifications
            .iter_mut()
            .find(|notification| notification.id == id)
            .ok_or_else(|| StoreError::NotFound {
                what: "notification",
                id: id.to_string(),
            })?;
        notification.is_read = true;
        Ok(notification.clone())
    }

    /// Mark every notification read; returns how many changed.
    pub async fn mark_all_notifications_read(&self) -> usize {
        let mut state = self.inner.write().await;
        let mut changed = 0;
        for notification in &mut state.notifications {
            if !notification.is_read {
                notification.is_read = true;
                changed += 1;
            }
        }
        changed
    }

    // ------------------------------------------------------------------
    // Examinations
    // ------------------------------------------------------------------

    /// Record a health examination for an existing patient. BMI is derived
    /// from the measured weight/height; a child's last-screening date is
    /// advanced to the exam date.
    pub async fn record_exam(&self, draft: ExamDraft, now: DateTime<Utc>) -> StoreResult<HealthExam> {
        let mut state = self.inner.write().await;

        let patient_exists = match draft.patient_kind {
            PatientKind::Mother => state.mothers.iter().any(|m| m.id == draft.patient_id),
            PatientKind::Child => state.children.iter().any(|c| c.id == draft.patient_id),
        };
        if !patient_exists {
            return Err(StoreError::NotFound {
                what: match draft.patient_kind {
                    PatientKind::Mother => "mother",
                    PatientKind::Child => "child",
                },
                id: draft.patient_id,
            });
        }

        let exam = HealthExam {
            id: new_id(),
            patient_id: draft.patient_id,
            patient_kind: draft.patient_kind,
            date: now,
            bmi: clinical::bmi(draft.vitals.weight, draft.vitals.height),
            vitals: draft.vitals,
            notes: draft.notes.filter(|notes| !notes.trim().is_empty()),
            risk_factors: draft.risk_factors,
        };

        if exam.patient_kind == PatientKind::Child {
            if let Some(child) = state
                .children
                .iter_mut()
                .find(|child| child.id == exam.patient_id)
            {
                child.last_screening = Some(now.date_naive());
            }
        }

        state.exams.push(exam.clone());
        Ok(exam)
    }

    pub async fn list_exams(&self, patient_id: &str) -> Vec<HealthExam> {
        let state = self.inner.read().await;
        state
            .exams
            .iter()
            .filter(|exam| exam.patient_id == patient_id)
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    /// Derive the dashboard counters over the session's scoped records.
    pub async fn dashboard_stats(&self, session: &Session, now: DateTime<Utc>) -> DashboardStats {
        let mothers = self.list_mothers(session).await;
        let children = self.list_children(session).await;
        let visits = self.list_visits(session).await;
        collections::dashboard_stats(&mothers, &children, &visits, now.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use sakhi_types::{Gender, Phone, RiskLevel};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 10, 0, 0).unwrap()
    }

    fn asha() -> Session {
        Session::asha("Sunita")
    }

    #[tokio::test]
    async fn seeded_registry_lists_every_record_for_asha() {
        let registry = Registry::seeded(now());
        let session = asha();
        assert_eq!(registry.list_mothers(&session).await.len(), 4);
        assert_eq!(registry.list_children(&session).await.len(), 3);
        assert_eq!(registry.list_visits(&session).await.len(), 5);
        assert_eq!(registry.list_notifications(&session).await.len(), 4);
    }

    #[tokio::test]
    async fn beneficiary_sees_only_her_own_records() {
        let registry = Registry::seeded(now());
        let session = Session::beneficiary(Phone::new("9876543210").unwrap(), "Priya");

        let mothers = registry.list_mothers(&session).await;
        assert_eq!(mothers.len(), 1);
        assert_eq!(mothers[0].name, "Priya Sharma");

        let children = registry.list_children(&session).await;
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Aarav");

        // Only visits for her and her child are visible.
        let visits = registry.list_visits(&session).await;
        assert!(visits
            .iter()
            .all(|visit| visit.patient_id == "m1" || visit.patient_id == "c1"));
        assert_eq!(visits.len(), 2);
    }

    #[tokio::test]
    async fn register_mother_rejects_invalid_draft_with_field_map() {
        let registry = Registry::empty();
        let draft = MotherDraft {
            name: "".into(),
            age: Some(12),
            phone: "123".into(),
            address: "".into(),
            pregnancy_week: Some(50),
            risk_level: RiskLevel::Low,
            lmp: None,
            last_visit: None,
        };

        let err = registry
            .register_mother(draft)
            .await
            .expect_err("should reject");
        match err {
            StoreError::Validation { what, errors } => {
                assert_eq!(what, "mother");
                assert_eq!(errors.len(), 5);
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_mother_derives_edd_from_lmp() {
        let registry = Registry::empty();
        let lmp = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let draft = MotherDraft {
            name: "Kavita Yadav".into(),
            age: Some(24),
            phone: "9876501234".into(),
            address: "Ward 2, Devipur".into(),
            pregnancy_week: Some(9),
            risk_level: RiskLevel::Low,
            lmp: Some(lmp),
            last_visit: None,
        };

        let mother = registry
            .register_mother(draft)
            .await
            .expect("should register");
        assert_eq!(mother.edd, Some(lmp + chrono::Duration::days(280)));
        assert_eq!(mother.visit_count, 0);
        assert_eq!(mother.id.len(), 32);

        let fetched = registry
            .get_mother(&asha(), &mother.id)
            .await
            .expect("should fetch");
        assert_eq!(fetched, mother);
    }

    #[tokio::test]
    async fn register_child_derives_age_and_denormalises_mother_name() {
        let registry = Registry::seeded(now());
        let draft = ChildDraft {
            name: "Isha".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2026, 1, 10),
            gender: Gender::Female,
            mother_id: "m3".into(),
            birth_weight: Some(2.9),
            risk_level: RiskLevel::Low,
        };

        let child = registry
            .register_child(draft, now())
            .await
            .expect("should register");
        assert_eq!(child.mother_name, "Sunita Kumari");
        assert_eq!(child.age_months, 7);
        assert_eq!(child.vaccination_status, VaccinationStatus::Due);
    }

    #[tokio::test]
    async fn register_child_rejects_unknown_mother() {
        let registry = Registry::seeded(now());
        let draft = ChildDraft {
            name: "Isha".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2026, 1, 10),
            gender: Gender::Female,
            mother_id: "missing".into(),
            birth_weight: None,
            risk_level: RiskLevel::Low,
        };

        let err = registry
            .register_child(draft, now())
            .await
            .expect_err("should reject");
        assert!(matches!(
            err,
            StoreError::Validation { errors, .. } if errors.contains_key("motherId")
        ));
    }

    #[tokio::test]
    async fn visit_transitions_update_dashboard_counts() {
        let registry = Registry::seeded(now());
        let session = asha();

        let before = registry.dashboard_stats(&session, now()).await;
        assert_eq!(before.today_visits, 4);
        assert_eq!(before.completed_visits, 1);
        assert_eq!(before.pending_visits, 3);

        let visit = registry.complete_visit("v2").await.expect("should complete");
        assert_eq!(visit.status, VisitStatus::Completed);

        let after = registry.dashboard_stats(&session, now()).await;
        assert_eq!(after.completed_visits, 2);
        assert_eq!(after.pending_visits, 2);
    }

    #[tokio::test]
    async fn unknown_visit_id_is_not_found() {
        let registry = Registry::seeded(now());
        let err = registry
            .complete_visit("missing")
            .await
            .expect_err("should fail");
        assert!(matches!(err, StoreError::NotFound { what: "visit", .. }));
    }

    #[tokio::test]
    async fn record_exam_computes_bmi_and_advances_screening_date() {
        let registry = Registry::seeded(now());
        let draft = ExamDraft {
            patient_id: "c1".into(),
            patient_kind: PatientKind::Child,
            vitals: Vitals {
                weight: Some(7.4),
                height: Some(66.0),
                ..Vitals::default()
            },
            notes: Some("routine screening".into()),
            risk_factors: vec![],
        };

        let exam = registry.record_exam(draft, now()).await.expect("should record");
        assert_eq!(exam.bmi, Some(17.0));

        let child = registry.get_child(&asha(), "c1").await.expect("fetch child");
        assert_eq!(child.last_screening, Some(now().date_naive()));

        let exams = registry.list_exams("c1").await;
        assert_eq!(exams.len(), 1);
    }

    #[tokio::test]
    async fn record_exam_for_unknown_patient_is_not_found() {
        let registry = Registry::seeded(now());
        let draft = ExamDraft {
            patient_id: "missing".into(),
            patient_kind: PatientKind::Mother,
            vitals: Vitals::default(),
            notes: None,
            risk_factors: vec![],
        };
        let err = registry
            .record_exam(draft, now())
            .await
            .expect_err("should fail");
        assert!(matches!(err, StoreError::NotFound { what: "mother", .. }));
    }

    #[tokio::test]
    async fn mark_all_notifications_read_reports_changed_count() {
        let registry = Registry::seeded(now());
        assert_eq!(registry.mark_all_notifications_read().await, 3);
        assert_eq!(registry.mark_all_notifications_read().await, 0);

        let session = asha();
        let notifications = registry.list_notifications(&session).await;
        assert!(notifications.iter().all(|n| n.is_read));
    }
}
