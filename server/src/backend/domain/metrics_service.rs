//! The derivation engine.
//!
//! Read-only projections over a store snapshot: per-student balances,
//! per-enrollment remainders, and the revenue/expense/debt aggregates behind
//! the dashboard and the date-filtered report. Every number is recomputed on
//! demand from the same primitives, so the dashboard, the report and the
//! detail views can never disagree. Data volumes are tens to low thousands
//! of records; no caching.

use crate::backend::domain::commands::reports::{
    DashboardSnapshot, DateRange, FinancialSummary, StudentBalance,
};
use crate::backend::domain::ledger::{date_in_range, day_in_range, session_cost};
use crate::backend::domain::models::{Course, Enrollment, Student};
use crate::backend::storage::document::StoreDocument;
use crate::backend::storage::Store;

#[derive(Clone)]
pub struct MetricsService {
    store: Store,
}

impl MetricsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Priced total minus paid amount for one enrollment. A dangling course
    /// reference prices at zero, matching every other derivation here.
    pub fn course_remaining(enrollment: &Enrollment, course: &Course) -> f64 {
        course.price_total - enrollment.paid_amount
    }

    /// Money position of one student: everything priced across their
    /// enrollments and subscriptions versus everything they have paid.
    /// `remaining` is signed (negative means overpaid); callers clamp
    /// visually if they want to.
    pub fn student_balance(&self, student_id: &str) -> StudentBalance {
        self.store
            .read(|document| balance_in(document, student_id))
    }

    /// Revenue/expense/debt aggregates, optionally scoped to an inclusive
    /// day range. Revenue counts realized payments only; debt is what is
    /// still owed on priced items (workspace sessions are pay-as-you-go and
    /// never owed in advance).
    pub fn financial_summary(&self, range: DateRange) -> FinancialSummary {
        self.store.read(|document| summary_in(document, range))
    }

    /// Everything the dashboard renders, derived in one consistent read.
    pub fn dashboard(&self) -> DashboardSnapshot {
        self.store.read(|document| DashboardSnapshot {
            summary: summary_in(document, DateRange::unbounded()),
            student_count: document.students.len(),
            mentor_count: document.mentors.len(),
            course_count: document.courses.len(),
            open_session_count: document.workspace.iter().filter(|w| w.is_open()).count(),
            outstanding: outstanding_in(document),
        })
    }

    /// Students still owing money, in store iteration order (no defined
    /// sort). Feeds the payment-alerts list.
    pub fn students_with_outstanding_balance(&self) -> Vec<(Student, f64)> {
        self.store.read(outstanding_in)
    }
}

fn balance_in(document: &StoreDocument, student_id: &str) -> StudentBalance {
    let mut total_due = 0.0;
    let mut total_paid = 0.0;
    for enrollment in document
        .enrollments
        .iter()
        .filter(|e| e.student_id == student_id)
    {
        total_due += document
            .course(&enrollment.course_id)
            .map(|c| c.price_total)
            .unwrap_or(0.0);
        total_paid += enrollment.paid_amount;
    }
    for subscription in document
        .subscriptions
        .iter()
        .filter(|sub| sub.student_id.as_deref() == Some(student_id))
    {
        total_due += subscription.total_price;
        total_paid += subscription.paid_amount;
    }
    StudentBalance {
        total_due,
        total_paid,
        remaining: total_due - total_paid,
    }
}

fn outstanding_in(document: &StoreDocument) -> Vec<(Student, f64)> {
    document
        .students
        .iter()
        .filter_map(|student| {
            let balance = balance_in(document, &student.id);
            (balance.remaining > 0.0).then(|| (student.clone(), balance.remaining))
        })
        .collect()
}

fn summary_in(document: &StoreDocument, range: DateRange) -> FinancialSummary {
    let enrollments: Vec<&Enrollment> = document
        .enrollments
        .iter()
        .filter(|e| date_in_range(e.created_at, range.start, range.end))
        .collect();
    let subscriptions: Vec<_> = document
        .subscriptions
        .iter()
        .filter(|sub| date_in_range(sub.created_at, range.start, range.end))
        .collect();
    let sessions: Vec<_> = document
        .workspace
        .iter()
        .filter(|w| day_in_range(w.date, range.start, range.end))
        .collect();
    let expenses: Vec<_> = document
        .expenses
        .iter()
        .filter(|e| day_in_range(e.date, range.start, range.end))
        .collect();

    let course_revenue: f64 = enrollments.iter().map(|e| e.paid_amount).sum();
    let subscription_revenue: f64 = subscriptions.iter().map(|sub| sub.paid_amount).sum();
    let workspace_revenue: f64 = sessions
        .iter()
        .map(|s| session_cost(s, document.settings.hourly_rate))
        .sum();
    let total_revenue = course_revenue + subscription_revenue + workspace_revenue;

    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();
    let net_profit = total_revenue - total_expenses;
    let profit_margin = if total_revenue > 0.0 {
        net_profit / total_revenue * 100.0
    } else {
        0.0
    };

    // What was priced on the filtered enrollments and subscriptions.
    let course_potential: f64 = enrollments
        .iter()
        .map(|e| {
            document
                .course(&e.course_id)
                .map(|c| c.price_total)
                .unwrap_or(0.0)
        })
        .sum();
    let subscription_potential: f64 = subscriptions.iter().map(|sub| sub.total_price).sum();
    let total_debt =
        (course_potential + subscription_potential) - (course_revenue + subscription_revenue);

    FinancialSummary {
        course_revenue,
        subscription_revenue,
        workspace_revenue,
        total_revenue,
        total_expenses,
        net_profit,
        profit_margin,
        total_debt,
    }
}
