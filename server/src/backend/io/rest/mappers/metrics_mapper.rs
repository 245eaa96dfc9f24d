//! Mappers for derived metrics.

use crate::backend::domain::commands::reports::{
    DashboardSnapshot, FinancialSummary as DomainSummary, StudentBalance,
};
use crate::backend::domain::ledger::format_money;

use super::people_mapper::StudentMapper;

pub struct MetricsMapper;

impl MetricsMapper {
    pub fn summary_to_dto(domain: DomainSummary) -> shared::FinancialSummary {
        shared::FinancialSummary {
            course_revenue: domain.course_revenue,
            subscription_revenue: domain.subscription_revenue,
            workspace_revenue: domain.workspace_revenue,
            total_revenue: domain.total_revenue,
            total_expenses: domain.total_expenses,
            net_profit: domain.net_profit,
            profit_margin: domain.profit_margin,
            total_debt: domain.total_debt,
        }
    }

    pub fn dashboard_to_dto(domain: DashboardSnapshot) -> shared::DashboardResponse {
        shared::DashboardResponse {
            summary: Self::summary_to_dto(domain.summary),
            student_count: domain.student_count,
            mentor_count: domain.mentor_count,
            course_count: domain.course_count,
            open_session_count: domain.open_session_count,
            outstanding: domain
                .outstanding
                .into_iter()
                .map(|(student, remaining)| shared::OutstandingStudent {
                    student: StudentMapper::to_dto(student),
                    remaining,
                })
                .collect(),
        }
    }

    pub fn balance_to_dto(
        student_id: &str,
        balance: StudentBalance,
        currency: &str,
    ) -> shared::StudentBalanceResponse {
        shared::StudentBalanceResponse {
            student_id: student_id.to_string(),
            total_due: balance.total_due,
            total_paid: balance.total_paid,
            remaining: balance.remaining,
            formatted_remaining: format_money(balance.remaining, currency),
        }
    }
}
