//! Clinical derivations: BMI, risk-score bucketing, immunisation schedule.

use sakhi_types::{RiskLevel, VaccinationStatus};

/// Body-mass index from weight (kg) and height (cm), to one decimal place.
///
/// Returns `None` when either measurement is absent, non-finite, or not
/// strictly positive: the consistent "unavailable" sentinel, never `NaN`.
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let height_m = height_cm.filter(|h| h.is_finite() && *h > 0.0)? / 100.0;
    Some((weight / (height_m * height_m) * 10.0).round() / 10.0)
}

/// WHO adult BMI band. Bands are inclusive on the lower bound, exclusive on
/// the upper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// Map a 0–100 risk score onto the three-tier severity classification.
///
/// The single threshold function for every surface that colours a score;
/// score bars and labels must call this rather than re-stating the cutoffs.
pub fn risk_bucket(score: f64) -> RiskLevel {
    if score >= 70.0 {
        RiskLevel::High
    } else if score >= 40.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// One vaccine entry on a child's schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledVaccine {
    pub name: &'static str,
    pub status: VaccinationStatus,
}

/// Vaccines falling due in the age band containing `age_months`.
///
/// Bands are half-open `[low, high)`. An age outside every band yields an
/// empty schedule, read as "up to date for this age".
pub fn vaccination_schedule(age_months: u32) -> Vec<ScheduledVaccine> {
    const BANDS: &[(u32, u32, &[&str])] = &[
        (0, 2, &["BCG", "Hepatitis B - Birth Dose", "OPV - Birth Dose"]),
        (6, 8, &["DPT - 1st Dose", "OPV - 1st Dose", "Rotavirus - 1st Dose"]),
        (10, 12, &["DPT - 2nd Dose", "OPV - 2nd Dose", "Rotavirus - 2nd Dose"]),
    ];

    let mut schedule = Vec::new();
    for (low, high, vaccines) in BANDS {
        if age_months >= *low && age_months < *high {
            schedule.extend(vaccines.iter().map(|name| ScheduledVaccine {
                name,
                status: VaccinationStatus::Due,
            }));
        }
    }
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_computes_to_one_decimal() {
        assert_eq!(bmi(Some(70.0), Some(175.0)), Some(22.9));
        assert_eq!(bmi(Some(55.0), Some(160.0)), Some(21.5));
    }

    #[test]
    fn bmi_is_unavailable_for_missing_or_bad_inputs() {
        assert_eq!(bmi(None, Some(175.0)), None);
        assert_eq!(bmi(Some(70.0), None), None);
        assert_eq!(bmi(Some(0.0), Some(175.0)), None);
        assert_eq!(bmi(Some(70.0), Some(0.0)), None);
        assert_eq!(bmi(Some(-4.0), Some(175.0)), None);
        assert_eq!(bmi(Some(f64::NAN), Some(175.0)), None);
    }

    #[test]
    fn bmi_category_bands_are_half_open() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn bmi_example_falls_in_normal_band() {
        let value = bmi(Some(70.0), Some(175.0)).expect("computable");
        assert_eq!(BmiCategory::from_bmi(value), BmiCategory::Normal);
    }

    #[test]
    fn risk_bucket_thresholds() {
        assert_eq!(risk_bucket(72.0), RiskLevel::High);
        assert_eq!(risk_bucket(70.0), RiskLevel::High);
        assert_eq!(risk_bucket(69.999), RiskLevel::Medium);
        assert_eq!(risk_bucket(40.0), RiskLevel::Medium);
        assert_eq!(risk_bucket(39.999), RiskLevel::Low);
        assert_eq!(risk_bucket(0.0), RiskLevel::Low);
    }

    #[test]
    fn newborn_band_includes_bcg() {
        let schedule = vaccination_schedule(1);
        assert!(schedule.iter().any(|v| v.name == "BCG"));
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn gaps_between_bands_yield_empty_schedule() {
        assert!(vaccination_schedule(5).is_empty());
        assert!(vaccination_schedule(8).is_empty());
        assert!(vaccination_schedule(24).is_empty());
    }

    #[test]
    fn six_month_band_includes_first_dpt_dose() {
        let schedule = vaccination_schedule(7);
        assert!(schedule.iter().any(|v| v.name == "DPT - 1st Dose"));
        assert!(schedule.iter().all(|v| v.status == VaccinationStatus::Due));
    }

    #[test]
    fn band_upper_bounds_are_exclusive() {
        assert!(vaccination_schedule(2).is_empty());
        assert!(!vaccination_schedule(11).is_empty());
        assert!(vaccination_schedule(12).is_empty());
    }
}
