//! Filtering, ordering and aggregation over record collections.
//!
//! The list surfaces all share these operations; none of them re-implement
//! a predicate or comparator locally.

use chrono::NaiveDate;
use sakhi_types::{RiskLevel, VisitStatus};

use crate::records::{Child, DashboardStats, Mother, Notification, Visit};

/// Case-insensitive substring search across the text fields `fields` yields
/// for each item. An empty or whitespace-only query matches everything;
/// input order is preserved.
pub fn filter_by_search<'a, T, F>(items: &'a [T], query: &str, fields: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<&str>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            fields(item)
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

/// Exact-match filter over a categorical field, with an explicit
/// all-records sentinel instead of a magic string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryFilter<T> {
    All,
    Only(T),
}

impl<T: PartialEq> CategoryFilter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == value,
        }
    }
}

/// Order visits for the all-visits list: scheduled date descending, with
/// priority ascending breaking exact-date ties.
///
/// Date-descending is the observed product behaviour even for future-dated
/// pending visits (farther-future visits sort first). The sort is stable,
/// so re-sorting a sorted list leaves it unchanged.
pub fn sort_visits(mut visits: Vec<Visit>) -> Vec<Visit> {
    visits.sort_by(|a, b| {
        b.scheduled_date
            .cmp(&a.scheduled_date)
            .then_with(|| a.priority.cmp(&b.priority))
    });
    visits
}

/// Order visits for the daily route plan: priority ascending only, stable.
pub fn route_plan(mut visits: Vec<Visit>) -> Vec<Visit> {
    visits.sort_by_key(|visit| visit.priority);
    visits
}

/// Severity colouring of a route priority on the map surface: 1–2 high,
/// 3–4 medium, the rest low.
pub fn route_priority_bucket(priority: u32) -> RiskLevel {
    if priority <= 2 {
        RiskLevel::High
    } else if priority <= 4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Derive the dashboard counters from the scoped record collections.
///
/// "Today's" visits are those scheduled on `today` (UTC date); completed
/// and pending are counted within that day's visits.
pub fn dashboard_stats(
    mothers: &[Mother],
    children: &[Child],
    visits: &[Visit],
    today: NaiveDate,
) -> DashboardStats {
    let today_visits: Vec<&Visit> = visits
        .iter()
        .filter(|visit| visit.scheduled_date.date_naive() == today)
        .collect();

    let completed = today_visits
        .iter()
        .filter(|visit| visit.status == VisitStatus::Completed)
        .count();
    let pending = today_visits
        .iter()
        .filter(|visit| visit.status == VisitStatus::Pending)
        .count();

    let high_risk = mothers
        .iter()
        .filter(|mother| mother.risk_level == RiskLevel::High)
        .count()
        + children
            .iter()
            .filter(|child| child.risk_level == RiskLevel::High)
            .count();

    DashboardStats {
        today_visits: today_visits.len() as u32,
        completed_visits: completed as u32,
        pending_visits: pending as u32,
        high_risk_cases: high_risk as u32,
        total_mothers: mothers.len() as u32,
        total_children: children.len() as u32,
    }
}

/// Unread badge count for the notification surfaces.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sakhi_types::{Gender, PatientKind, VaccinationStatus};

    fn visit(id: &str, priority: u32, day: u32) -> Visit {
        Visit {
            id: id.into(),
            patient_id: "p1".into(),
            patient_name: "Priya Sharma".into(),
            patient_kind: PatientKind::Mother,
            risk_level: RiskLevel::Medium,
            scheduled_date: Utc.with_ymd_and_hms(2026, 8, day, 9, 0, 0).unwrap(),
            address: "Rampur village".into(),
            latitude: None,
            longitude: None,
            distance_km: None,
            status: VisitStatus::Pending,
            priority,
        }
    }

    fn mother(id: &str, name: &str, risk: RiskLevel) -> Mother {
        Mother {
            id: id.into(),
            name: name.into(),
            age: 26,
            phone: "9876543210".into(),
            address: "Rampur village".into(),
            lmp: None,
            edd: None,
            risk_level: risk,
            pregnancy_week: None,
            visit_count: 0,
            last_visit: None,
            next_visit: None,
        }
    }

    fn child(id: &str, risk: RiskLevel) -> Child {
        Child {
            id: id.into(),
            name: "Aarav".into(),
            mother_id: "m1".into(),
            mother_name: "Priya Sharma".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            gender: Gender::Male,
            age_months: 8,
            risk_level: risk,
            vaccination_status: VaccinationStatus::Due,
            last_screening: None,
            weight: None,
            height: None,
        }
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let mothers = vec![
            mother("1", "Priya Sharma", RiskLevel::Low),
            mother("2", "Anita Devi", RiskLevel::High),
        ];
        let found = filter_by_search(&mothers, "", |m| vec![m.name.as_str()]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "1");
        assert_eq!(found[1].id, "2");
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mothers = vec![
            mother("1", "Priya Sharma", RiskLevel::Low),
            mother("2", "Anita Devi", RiskLevel::High),
        ];
        let by_name = filter_by_search(&mothers, "PRIYA", |m| {
            vec![m.name.as_str(), m.address.as_str()]
        });
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "1");

        let by_address = filter_by_search(&mothers, "rampur", |m| {
            vec![m.name.as_str(), m.address.as_str()]
        });
        assert_eq!(by_address.len(), 2);
    }

    #[test]
    fn category_filter_all_is_a_no_op() {
        let filter = CategoryFilter::All;
        assert!(filter.matches(&RiskLevel::Low));
        assert!(filter.matches(&RiskLevel::High));

        let only_high = CategoryFilter::Only(RiskLevel::High);
        assert!(only_high.matches(&RiskLevel::High));
        assert!(!only_high.matches(&RiskLevel::Low));
    }

    #[test]
    fn visits_sort_newest_first_then_priority() {
        let sorted = sort_visits(vec![
            visit("a", 2, 5),
            visit("b", 1, 7),
            visit("c", 3, 7),
            visit("d", 2, 7),
        ]);
        let ids: Vec<&str> = sorted.iter().map(|v| v.id.as_str()).collect();
        // Day 7 before day 5; within day 7, priority 1, 2, 3.
        assert_eq!(ids, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn sort_visits_is_idempotent() {
        let once = sort_visits(vec![
            visit("a", 2, 5),
            visit("b", 1, 7),
            visit("c", 1, 5),
        ]);
        let twice = sort_visits(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn route_plan_orders_by_priority_alone() {
        let planned = route_plan(vec![
            visit("a", 3, 5),
            visit("b", 1, 5),
            visit("c", 2, 7),
        ]);
        let priorities: Vec<u32> = planned.iter().map(|v| v.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3]);
    }

    #[test]
    fn route_priority_buckets() {
        assert_eq!(route_priority_bucket(1), RiskLevel::High);
        assert_eq!(route_priority_bucket(2), RiskLevel::High);
        assert_eq!(route_priority_bucket(3), RiskLevel::Medium);
        assert_eq!(route_priority_bucket(4), RiskLevel::Medium);
        assert_eq!(route_priority_bucket(5), RiskLevel::Low);
    }

    #[test]
    fn dashboard_counts_todays_visits_and_high_risk() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let mut completed = visit("a", 1, 7);
        completed.status = VisitStatus::Completed;
        let visits = vec![completed, visit("b", 2, 7), visit("c", 1, 5)];
        let mothers = vec![
            mother("1", "Priya Sharma", RiskLevel::High),
            mother("2", "Anita Devi", RiskLevel::Low),
        ];
        let children = vec![child("c1", RiskLevel::High), child("c2", RiskLevel::Low)];

        let stats = dashboard_stats(&mothers, &children, &visits, today);
        assert_eq!(stats.today_visits, 2);
        assert_eq!(stats.completed_visits, 1);
        assert_eq!(stats.pending_visits, 1);
        assert_eq!(stats.high_risk_cases, 2);
        assert_eq!(stats.total_mothers, 2);
        assert_eq!(stats.total_children, 2);
    }

    #[test]
    fn unread_count_ignores_read_notifications() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap();
        let make = |id: &str, is_read: bool| Notification {
            id: id.into(),
            kind: sakhi_types::NotificationKind::VisitDue,
            title: "Visit due".into(),
            message: "Scheduled visit today".into(),
            patient_id: None,
            patient_name: None,
            due_date: None,
            is_read,
            created_at: now,
        };
        let notifications = vec![make("1", false), make("2", true), make("3", false)];
        assert_eq!(unread_count(&notifications), 2);
    }
}
