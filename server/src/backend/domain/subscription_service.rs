//! Flat-rate subscription sales and payments.

use log::{debug, info};

use crate::backend::domain::commands::subscriptions::{
    CreateSubscriptionCommand, SubscriptionPaymentOutcome,
};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::ledger::round_money;
use crate::backend::domain::models::Subscription;
use crate::backend::storage::Store;

#[derive(Clone)]
pub struct SubscriptionService {
    store: Store,
}

impl SubscriptionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Subscription> {
        self.store.read(|document| document.subscriptions.clone())
    }

    pub fn list_for_student(&self, student_id: &str) -> Vec<Subscription> {
        self.store.read(|document| {
            document
                .subscriptions
                .iter()
                .filter(|sub| sub.student_id.as_deref() == Some(student_id))
                .cloned()
                .collect()
        })
    }

    /// Sell a subscription. The person name defaults to the referenced
    /// student's name; the total price defaults to the configured price for
    /// the plan. New subscriptions start unpaid.
    pub fn add(&self, command: CreateSubscriptionCommand) -> DomainResult<Subscription> {
        let (resolved_name, default_price) = self.store.read(|document| {
            let student_name = command
                .student_id
                .as_deref()
                .and_then(|id| document.student(id))
                .map(|s| s.name.clone());
            (
                student_name,
                document.settings.sub_prices.price_for(command.plan),
            )
        });

        let person_name = command
            .person_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .or(resolved_name)
            .unwrap_or_default();
        if person_name.is_empty() {
            return Err(DomainError::Validation(
                "person name must not be empty".to_string(),
            ));
        }

        let subscription = Subscription {
            id: Store::next_id(),
            student_id: command.student_id,
            person_name,
            plan: command.plan,
            total_price: round_money(command.total_price.unwrap_or(default_price)),
            paid_amount: 0.0,
            method: command.method,
            created_at: Store::now(),
        };
        self.store
            .mutate(|document| document.subscriptions.push(subscription.clone()))?;
        info!(
            "added {} subscription for {} ({})",
            subscription.plan, subscription.person_name, subscription.id
        );
        Ok(subscription)
    }

    /// Apply a signed payment delta, rounding the result to the cent. The
    /// `[0, total_price]` bound is checked here, before the store merge,
    /// under the same rule as course payments. Unknown ids are a silent no-op and
    /// return `None`.
    pub fn record_payment(
        &self,
        subscription_id: &str,
        delta: f64,
    ) -> DomainResult<Option<SubscriptionPaymentOutcome>> {
        let checked = self.store.read(|document| {
            document
                .subscriptions
                .iter()
                .find(|sub| sub.id == subscription_id)
                .map(|sub| (round_money(sub.paid_amount + delta), sub.total_price))
        });
        let Some((new_paid, total_price)) = checked else {
            debug!(
                "payment for unknown subscription {} ignored",
                subscription_id
            );
            return Ok(None);
        };
        if new_paid < 0.0 {
            return Err(DomainError::Validation(
                "paid amount cannot be less than zero".to_string(),
            ));
        }
        if new_paid > total_price {
            return Err(DomainError::Validation(
                "amount exceeds total price".to_string(),
            ));
        }

        let outcome = self.store.mutate(|document| {
            let subscription = document
                .subscriptions
                .iter_mut()
                .find(|sub| sub.id == subscription_id)?;
            subscription.paid_amount = new_paid;
            Some(SubscriptionPaymentOutcome {
                subscription: subscription.clone(),
                remaining: total_price - new_paid,
            })
        })?;
        Ok(outcome)
    }

    /// Remove a subscription. Unknown ids are a silent no-op.
    pub fn delete(&self, subscription_id: &str) -> DomainResult<()> {
        self.store.mutate(|document| {
            let before = document.subscriptions.len();
            document.subscriptions.retain(|sub| sub.id != subscription_id);
            if document.subscriptions.len() == before {
                debug!("delete for unknown subscription {} ignored", subscription_id);
            }
        })?;
        Ok(())
    }
}
