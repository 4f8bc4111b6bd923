//! Seeded record fixtures.
//!
//! All data in this module is fictional and hardcoded. It stands in for the
//! clinical database a production deployment would supply, so the rest of
//! the system can be exercised end-to-end without contacting anything.
//!
//! Dates are built relative to a caller-supplied "now" so the fixtures stay
//! current: today's visit list is always populated and child ages follow
//! the clock.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sakhi_core::records::{Child, Mother, Notification, Visit};
use sakhi_core::temporal;
use sakhi_types::{
    Gender, NotificationKind, PatientKind, RiskLevel, VaccinationStatus, VisitStatus,
};

fn weeks_before(today: NaiveDate, weeks: u32) -> NaiveDate {
    today - Duration::weeks(weeks as i64)
}

pub fn mothers(now: DateTime<Utc>) -> Vec<Mother> {
    let today = now.date_naive();

    let with_lmp = |id: &str,
                    name: &str,
                    age: u32,
                    phone: &str,
                    address: &str,
                    risk_level: RiskLevel,
                    week: u32,
                    visit_count: u32| {
        let lmp = weeks_before(today, week);
        Mother {
            id: id.into(),
            name: name.into(),
            age,
            phone: phone.into(),
            address: address.into(),
            lmp: Some(lmp),
            edd: Some(temporal::estimated_delivery_date(lmp)),
            risk_level,
            pregnancy_week: Some(week),
            visit_count,
            last_visit: Some(today - Duration::days(7)),
            next_visit: Some(today + Duration::days(7)),
        }
    };

    vec![
        with_lmp(
            "m1",
            "Priya Sharma",
            26,
            "9876543210",
            "Rampur village, ward 4",
            RiskLevel::High,
            32,
            5,
        ),
        with_lmp(
            "m2",
            "Anita Devi",
            31,
            "9812045673",
            "Bharatpur road, near temple",
            RiskLevel::Medium,
            24,
            3,
        ),
        with_lmp(
            "m3",
            "Sunita Kumari",
            22,
            "9934217850",
            "Lakshmi Nagar, house 12",
            RiskLevel::Low,
            12,
            1,
        ),
        with_lmp(
            "m4",
            "Meera Patel",
            28,
            "9765432108",
            "Station road, Devipur",
            RiskLevel::Low,
            8,
            1,
        ),
    ]
}

pub fn children(now: DateTime<Utc>) -> Vec<Child> {
    let today = now.date_naive();

    let child = |id: &str,
                 name: &str,
                 mother_id: &str,
                 mother_name: &str,
                 months_old: u32,
                 gender: Gender,
                 risk_level: RiskLevel,
                 vaccination_status: VaccinationStatus,
                 weight: f64,
                 height: f64| {
        let dob = today - Duration::days(months_old as i64 * 30);
        Child {
            id: id.into(),
            name: name.into(),
            mother_id: mother_id.into(),
            mother_name: mother_name.into(),
            date_of_birth: dob,
            gender,
            age_months: temporal::age_in_months(dob, today),
            risk_level,
            vaccination_status,
            last_screening: Some(today - Duration::days(21)),
            weight: Some(weight),
            height: Some(height),
        }
    };

    vec![
        child(
            "c1",
            "Aarav",
            "m1",
            "Priya Sharma",
            7,
            Gender::Male,
            RiskLevel::Medium,
            VaccinationStatus::Due,
            7.2,
            66.0,
        ),
        child(
            "c2",
            "Diya",
            "m2",
            "Anita Devi",
            16,
            Gender::Female,
            RiskLevel::Low,
            VaccinationStatus::UpToDate,
            9.8,
            76.0,
        ),
        child(
            "c3",
            "Rohan",
            "m4",
            "Meera Patel",
            11,
            Gender::Male,
            RiskLevel::High,
            VaccinationStatus::Overdue,
            7.9,
            70.0,
        ),
    ]
}

pub fn visits(now: DateTime<Utc>) -> Vec<Visit> {
    let visit = |id: &str,
                 patient_id: &str,
                 patient_name: &str,
                 patient_kind: PatientKind,
                 risk_level: RiskLevel,
                 scheduled: DateTime<Utc>,
                 address: &str,
                 distance_km: f64,
                 status: VisitStatus,
                 priority: u32| Visit {
        id: id.into(),
        patient_id: patient_id.into(),
        patient_name: patient_name.into(),
        patient_kind,
        risk_level,
        scheduled_date: scheduled,
        address: address.into(),
        latitude: Some(26.85),
        longitude: Some(80.95),
        distance_km: Some(distance_km),
        status,
        priority,
    };

    vec![
        visit(
            "v1",
            "m1",
            "Priya Sharma",
            PatientKind::Mother,
            RiskLevel::High,
            now - Duration::hours(2),
            "Rampur village, ward 4",
            1.2,
            VisitStatus::Completed,
            1,
        ),
        visit(
            "v2",
            "c3",
            "Rohan",
            PatientKind::Child,
            RiskLevel::High,
            now + Duration::hours(1),
            "Station road, Devipur",
            3.4,
            VisitStatus::Pending,
            2,
        ),
        visit(
            "v3",
            "m2",
            "Anita Devi",
            PatientKind::Mother,
            RiskLevel::Medium,
            now + Duration::hours(3),
            "Bharatpur road, near temple",
            2.1,
            VisitStatus::Pending,
            3,
        ),
        visit(
            "v4",
            "c1",
            "Aarav",
            PatientKind::Child,
            RiskLevel::Medium,
            now + Duration::hours(5),
            "Rampur village, ward 4",
            1.2,
            VisitStatus::Pending,
            4,
        ),
        visit(
            "v5",
            "m3",
            "Sunita Kumari",
            PatientKind::Mother,
            RiskLevel::Low,
            now - Duration::days(1),
            "Lakshmi Nagar, house 12",
            4.8,
            VisitStatus::Missed,
            5,
        ),
    ]
}

pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let today = now.date_naive();

    let notification = |id: &str,
                        kind: NotificationKind,
                        title: &str,
                        message: &str,
                        patient: Option<(&str, &str)>,
                        due_date: Option<NaiveDate>,
                        is_read: bool,
                        age: Duration| Notification {
        id: id.into(),
        kind,
        title: title.into(),
        message: message.into(),
        patient_id: patient.map(|(id, _)| id.into()),
        patient_name: patient.map(|(_, name)| name.into()),
        due_date,
        is_read,
        created_at: now - age,
    };

    vec![
        notification(
            "n1",
            NotificationKind::HighRisk,
            "High risk case needs attention",
            "Priya Sharma's latest screening flagged high risk. Schedule a follow-up visit.",
            Some(("m1", "Priya Sharma")),
            Some(today),
            false,
            Duration::minutes(25),
        ),
        notification(
            "n2",
            NotificationKind::Vaccination,
            "Vaccination overdue",
            "Rohan has missed the 10-month vaccination window.",
            Some(("c3", "Rohan")),
            Some(today - Duration::days(3)),
            false,
            Duration::hours(4),
        ),
        notification(
            "n3",
            NotificationKind::VisitDue,
            "Visit due today",
            "Anita Devi's antenatal check-up is scheduled for today.",
            Some(("m2", "Anita Devi")),
            Some(today),
            false,
            Duration::hours(9),
        ),
        notification(
            "n4",
            NotificationKind::FollowUp,
            "Follow-up recorded",
            "Sunita Kumari's first-trimester follow-up was completed.",
            Some(("m3", "Sunita Kumari")),
            None,
            true,
            Duration::days(2),
        ),
    ]
}
