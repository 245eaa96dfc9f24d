//! Domain model for a flat-rate workspace subscription.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Daily,
    Weekly,
    Monthly,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Daily => "daily",
            SubscriptionPlan::Weekly => "weekly",
            SubscriptionPlan::Monthly => "monthly",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(SubscriptionPlan::Daily),
            "weekly" => Ok(SubscriptionPlan::Weekly),
            "monthly" => Ok(SubscriptionPlan::Monthly),
            other => Err(format!("unknown subscription plan: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Bank => "bank",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "bank" => Ok(PaymentMethod::Bank),
            other => Err(format!("unknown payment method: {}", other)),
        }
    }
}

/// A flat-rate access plan sold to a student or a guest. Guests carry only a
/// `person_name`; students additionally weak-reference their Student record
/// and are swept away when that student is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub student_id: Option<String>,
    pub person_name: String,
    pub plan: SubscriptionPlan,
    pub total_price: f64,
    pub paid_amount: f64,
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// A subscription is settled once payments have reached the total price.
    pub fn is_settled(&self) -> bool {
        self.paid_amount >= self.total_price
    }
}
