//! Process-wide settings singleton.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::subscription::SubscriptionPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Ar,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ar => "ar",
            Lang::En => "en",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ar" => Ok(Lang::Ar),
            "en" => Ok(Lang::En),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Flat-rate subscription price list, one entry per plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPrices {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

impl SubPrices {
    pub fn price_for(&self, plan: SubscriptionPlan) -> f64 {
        match plan {
            SubscriptionPlan::Daily => self.daily,
            SubscriptionPlan::Weekly => self.weekly,
            SubscriptionPlan::Monthly => self.monthly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub lang: Lang,
    /// Workspace billing rate per hour.
    pub hourly_rate: f64,
    pub theme: Theme,
    /// ISO 4217 currency code used for display formatting only.
    pub currency: String,
    pub sub_prices: SubPrices,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lang: Lang::Ar,
            hourly_rate: 5.0,
            theme: Theme::Dark,
            currency: "ILS".to_string(),
            sub_prices: SubPrices {
                daily: 20.0,
                weekly: 120.0,
                monthly: 350.0,
            },
        }
    }
}
