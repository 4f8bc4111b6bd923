//! Registration form validation.
//!
//! Validators are total: every field is checked and every violation is
//! reported at once, so a caller can render all errors simultaneously.
//! The result is data: a field-to-message map, empty when the draft is
//! valid, never raised as an error from this crate.

use chrono::{Months, NaiveDate};
use std::collections::BTreeMap;

use sakhi_types::{Gender, NonEmptyText, Phone, RiskLevel};

/// Field name → human-readable message. Field names are the camelCase keys
/// the form surfaces bind errors to.
pub type FieldErrors = BTreeMap<&'static str, String>;

// Mother registration bounds.
const MOTHER_MIN_AGE: u32 = 15;
const MOTHER_MAX_AGE: u32 = 50;
const MAX_PREGNANCY_WEEK: u32 = 42;

// Child registration bounds.
const MAX_CHILD_AGE_YEARS: u32 = 10;
const MIN_BIRTH_WEIGHT_KG: f64 = 0.5;
const MAX_BIRTH_WEIGHT_KG: f64 = 10.0;

/// Form state for registering a mother.
#[derive(Clone, Debug, Default)]
pub struct MotherDraft {
    pub name: String,
    pub age: Option<u32>,
    pub phone: String,
    pub address: String,
    pub pregnancy_week: Option<u32>,
    pub risk_level: RiskLevel,
    pub lmp: Option<NaiveDate>,
    pub last_visit: Option<NaiveDate>,
}

/// Form state for registering a child.
#[derive(Clone, Debug)]
pub struct ChildDraft {
    pub name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub mother_id: String,
    pub birth_weight: Option<f64>,
    pub risk_level: RiskLevel,
}

/// Validate a mother registration draft.
///
/// Checks: non-empty name and address, age 15–50, a 10-digit phone number,
/// pregnancy week 0–42. Age and pregnancy week are required.
pub fn validate_mother(draft: &MotherDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if NonEmptyText::new(&draft.name).is_err() {
        errors.insert("name", "Name is required".to_string());
    }

    match draft.age {
        Some(age) if (MOTHER_MIN_AGE..=MOTHER_MAX_AGE).contains(&age) => {}
        _ => {
            errors.insert(
                "age",
                format!("Age must be between {} and {}", MOTHER_MIN_AGE, MOTHER_MAX_AGE),
            );
        }
    }

    if !Phone::is_valid(draft.phone.trim()) {
        errors.insert("phone", "Valid 10-digit phone number required".to_string());
    }

    if NonEmptyText::new(&draft.address).is_err() {
        errors.insert("address", "Address is required".to_string());
    }

    match draft.pregnancy_week {
        Some(week) if week <= MAX_PREGNANCY_WEEK => {}
        _ => {
            errors.insert(
                "pregnancyWeek",
                format!("Pregnancy week must be between 0 and {}", MAX_PREGNANCY_WEEK),
            );
        }
    }

    errors
}

/// Validate a child registration draft against today's date and the set of
/// registered mother ids.
///
/// The date of birth must be present, not in the future, and no more than
/// ten years back. Birth weight is optional but bounded when given.
pub fn validate_child(draft: &ChildDraft, today: NaiveDate, known_mothers: &[&str]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if NonEmptyText::new(&draft.name).is_err() {
        errors.insert("name", "Child's name is required".to_string());
    }

    match draft.date_of_birth {
        None => {
            errors.insert("dateOfBirth", "Date of birth is required".to_string());
        }
        Some(dob) => {
            let earliest = today
                .checked_sub_months(Months::new(MAX_CHILD_AGE_YEARS * 12))
                .unwrap_or(NaiveDate::MIN);
            if dob > today {
                errors.insert(
                    "dateOfBirth",
                    "Date of birth cannot be in the future".to_string(),
                );
            } else if dob < earliest {
                errors.insert(
                    "dateOfBirth",
                    format!(
                        "Date of birth cannot be more than {} years ago",
                        MAX_CHILD_AGE_YEARS
                    ),
                );
            }
        }
    }

    let mother_id = draft.mother_id.trim();
    if mother_id.is_empty() || !known_mothers.contains(&mother_id) {
        errors.insert("motherId", "Mother selection is required".to_string());
    }

    if let Some(weight) = draft.birth_weight {
        if !(MIN_BIRTH_WEIGHT_KG..=MAX_BIRTH_WEIGHT_KG).contains(&weight) {
            errors.insert(
                "birthWeight",
                format!(
                    "Birth weight must be between {} and {} kg",
                    MIN_BIRTH_WEIGHT_KG, MAX_BIRTH_WEIGHT_KG
                ),
            );
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_mother() -> MotherDraft {
        MotherDraft {
            name: "Priya Sharma".into(),
            age: Some(26),
            phone: "9876543210".into(),
            address: "Rampur village, ward 4".into(),
            pregnancy_week: Some(24),
            risk_level: RiskLevel::Low,
            lmp: None,
            last_visit: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid test date")
    }

    fn valid_child() -> ChildDraft {
        ChildDraft {
            name: "Aarav".into(),
            date_of_birth: Some(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()),
            gender: Gender::Male,
            mother_id: "m1".into(),
            birth_weight: Some(3.1),
            risk_level: RiskLevel::Low,
        }
    }

    #[test]
    fn valid_mother_draft_has_no_errors() {
        assert!(validate_mother(&valid_mother()).is_empty());
    }

    #[test]
    fn all_mother_violations_are_reported_at_once() {
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
        let errors = validate_mother(&draft);
        assert_eq!(errors.len(), 5);
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["age"], "Age must be between 15 and 50");
        assert_eq!(errors["phone"], "Valid 10-digit phone number required");
        assert_eq!(errors["address"], "Address is required");
        assert_eq!(errors["pregnancyWeek"], "Pregnancy week must be between 0 and 42");
    }

    #[test]
    fn mother_age_bounds_are_inclusive() {
        let mut draft = valid_mother();
        draft.age = Some(15);
        assert!(validate_mother(&draft).is_empty());
        draft.age = Some(50);
        assert!(validate_mother(&draft).is_empty());
        draft.age = Some(14);
        assert!(validate_mother(&draft).contains_key("age"));
        draft.age = Some(51);
        assert!(validate_mother(&draft).contains_key("age"));
        draft.age = None;
        assert!(validate_mother(&draft).contains_key("age"));
    }

    #[test]
    fn pregnancy_week_zero_is_valid() {
        let mut draft = valid_mother();
        draft.pregnancy_week = Some(0);
        assert!(validate_mother(&draft).is_empty());
        draft.pregnancy_week = Some(42);
        assert!(validate_mother(&draft).is_empty());
        draft.pregnancy_week = None;
        assert!(validate_mother(&draft).contains_key("pregnancyWeek"));
    }

    #[test]
    fn valid_child_draft_has_no_errors() {
        assert!(validate_child(&valid_child(), today(), &["m1"]).is_empty());
    }

    #[test]
    fn child_dob_cannot_be_tomorrow() {
        let mut draft = valid_child();
        draft.date_of_birth = Some(today() + Duration::days(1));
        let errors = validate_child(&draft, today(), &["m1"]);
        assert_eq!(errors["dateOfBirth"], "Date of birth cannot be in the future");
    }

    #[test]
    fn child_dob_cannot_be_eleven_years_back() {
        let mut draft = valid_child();
        draft.date_of_birth = NaiveDate::from_ymd_opt(2015, 8, 6);
        let errors = validate_child(&draft, today(), &["m1"]);
        assert_eq!(
            errors["dateOfBirth"],
            "Date of birth cannot be more than 10 years ago"
        );
    }

    #[test]
    fn child_dob_just_inside_ten_years_is_accepted() {
        let mut draft = valid_child();
        // Ten years minus one day back.
        draft.date_of_birth = NaiveDate::from_ymd_opt(2016, 8, 7);
        assert!(validate_child(&draft, today(), &["m1"]).is_empty());
        // Today itself is a legal date of birth.
        draft.date_of_birth = Some(today());
        assert!(validate_child(&draft, today(), &["m1"]).is_empty());
    }

    #[test]
    fn child_mother_must_be_a_known_record() {
        let mut draft = valid_child();
        draft.mother_id = "".into();
        let errors = validate_child(&draft, today(), &["m1"]);
        assert_eq!(errors["motherId"], "Mother selection is required");

        draft.mother_id = "m9".into();
        let errors = validate_child(&draft, today(), &["m1"]);
        assert_eq!(errors["motherId"], "Mother selection is required");
    }

    #[test]
    fn birth_weight_is_optional_but_bounded() {
        let mut draft = valid_child();
        draft.birth_weight = None;
        assert!(validate_child(&draft, today(), &["m1"]).is_empty());

        draft.birth_weight = Some(0.4);
        assert!(validate_child(&draft, today(), &["m1"]).contains_key("birthWeight"));
        draft.birth_weight = Some(10.5);
        assert!(validate_child(&draft, today(), &["m1"]).contains_key("birthWeight"));
        draft.birth_weight = Some(0.5);
        assert!(validate_child(&draft, today(), &["m1"]).is_empty());
        draft.birth_weight = Some(10.0);
        assert!(validate_child(&draft, today(), &["m1"]).is_empty());
    }
}
