//! Mappers for workspace sessions, subscriptions and expenses.

use crate::backend::domain::commands::expenses::CreateExpenseCommand;
use crate::backend::domain::commands::subscriptions::CreateSubscriptionCommand;
use crate::backend::domain::commands::workspace::CheckInCommand;
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::{
    Expense as DomainExpense, Subscription as DomainSubscription,
    WorkspaceSession as DomainWorkspaceSession,
};

use super::parse_optional_day;

pub struct WorkspaceMapper;

impl WorkspaceMapper {
    pub fn to_dto(domain: DomainWorkspaceSession) -> shared::WorkspaceSession {
        shared::WorkspaceSession {
            id: domain.id,
            date: domain.date.format("%Y-%m-%d").to_string(),
            person_name: domain.person_name,
            check_in_at: domain.check_in_at.to_rfc3339(),
            check_out_at: domain.check_out_at.map(|t| t.to_rfc3339()),
        }
    }

    pub fn to_check_in_command(request: shared::CheckInRequest) -> DomainResult<CheckInCommand> {
        Ok(CheckInCommand {
            person_name: request.person_name,
            date: parse_optional_day(request.date.as_deref())?,
        })
    }
}

pub struct SubscriptionMapper;

impl SubscriptionMapper {
    pub fn to_dto(domain: DomainSubscription) -> shared::Subscription {
        shared::Subscription {
            id: domain.id,
            student_id: domain.student_id,
            person_name: domain.person_name,
            plan: domain.plan.to_string(),
            total_price: domain.total_price,
            paid_amount: domain.paid_amount,
            method: domain.method.to_string(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(
        request: shared::CreateSubscriptionRequest,
    ) -> DomainResult<CreateSubscriptionCommand> {
        Ok(CreateSubscriptionCommand {
            student_id: request.student_id,
            person_name: request.person_name,
            plan: request.plan.parse().map_err(DomainError::Validation)?,
            total_price: request.total_price,
            method: request.method.parse().map_err(DomainError::Validation)?,
        })
    }
}

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: DomainExpense) -> shared::Expense {
        shared::Expense {
            id: domain.id,
            title: domain.title,
            amount: domain.amount,
            category: domain.category.to_string(),
            date: domain.date.format("%Y-%m-%d").to_string(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(
        request: shared::CreateExpenseRequest,
    ) -> DomainResult<CreateExpenseCommand> {
        Ok(CreateExpenseCommand {
            title: request.title,
            amount: request.amount,
            category: request.category.parse().map_err(DomainError::Validation)?,
            date: parse_optional_day(request.date.as_deref())?,
        })
    }
}
