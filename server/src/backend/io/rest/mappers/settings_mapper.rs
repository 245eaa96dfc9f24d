//! Mappers for settings and login identities.

use crate::backend::domain::commands::settings::SettingsPatch;
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::{
    Settings as DomainSettings, SubPrices as DomainSubPrices, User as DomainUser,
};

pub struct SettingsMapper;

impl SettingsMapper {
    pub fn to_dto(domain: DomainSettings) -> shared::Settings {
        shared::Settings {
            lang: domain.lang.to_string(),
            hourly_rate: domain.hourly_rate,
            theme: domain.theme.to_string(),
            currency: domain.currency,
            sub_prices: shared::SubPrices {
                daily: domain.sub_prices.daily,
                weekly: domain.sub_prices.weekly,
                monthly: domain.sub_prices.monthly,
            },
        }
    }

    pub fn to_patch(request: shared::UpdateSettingsRequest) -> DomainResult<SettingsPatch> {
        Ok(SettingsPatch {
            lang: request
                .lang
                .map(|l| l.parse().map_err(DomainError::Validation))
                .transpose()?,
            hourly_rate: request.hourly_rate,
            theme: request
                .theme
                .map(|t| t.parse().map_err(DomainError::Validation))
                .transpose()?,
            currency: request.currency,
            sub_prices: request.sub_prices.map(|p| DomainSubPrices {
                daily: p.daily,
                weekly: p.weekly,
                monthly: p.monthly,
            }),
        })
    }
}

pub struct UserMapper;

impl UserMapper {
    pub fn to_dto(domain: DomainUser) -> shared::User {
        shared::User {
            id: domain.id,
            username: domain.username,
            role: domain.role.to_string(),
            name: domain.name,
        }
    }
}
