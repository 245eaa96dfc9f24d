//! The process-wide settings singleton.

use log::info;

use crate::backend::domain::commands::settings::SettingsPatch;
use crate::backend::domain::error::DomainResult;
use crate::backend::domain::models::Settings;
use crate::backend::storage::Store;

#[derive(Clone)]
pub struct SettingsService {
    store: Store,
}

impl SettingsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Settings {
        self.store.read(|document| document.settings.clone())
    }

    /// Merge the patch into the singleton. `sub_prices` replaces the whole
    /// price list, matching how the settings form submits it.
    pub fn update(&self, patch: SettingsPatch) -> DomainResult<Settings> {
        let settings = self.store.mutate(|document| {
            let settings = &mut document.settings;
            if let Some(lang) = patch.lang {
                settings.lang = lang;
            }
            if let Some(hourly_rate) = patch.hourly_rate {
                settings.hourly_rate = hourly_rate.max(0.0);
            }
            if let Some(theme) = patch.theme {
                settings.theme = theme;
            }
            if let Some(currency) = patch.currency {
                settings.currency = currency;
            }
            if let Some(sub_prices) = patch.sub_prices {
                settings.sub_prices = sub_prices;
            }
            settings.clone()
        })?;
        info!("updated settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::{Lang, SubPrices, Theme};
    use crate::backend::storage::MemoryConnection;

    #[test]
    fn test_patch_touches_only_named_fields() {
        let service = SettingsService::new(Store::open(MemoryConnection::new()).unwrap());

        let updated = service
            .update(SettingsPatch {
                lang: Some(Lang::En),
                hourly_rate: Some(8.0),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.lang, Lang::En);
        assert_eq!(updated.hourly_rate, 8.0);
        // Untouched fields keep their defaults.
        assert_eq!(updated.theme, Theme::Dark);
        assert_eq!(updated.currency, "ILS");
        assert_eq!(updated.sub_prices.monthly, 350.0);
    }

    #[test]
    fn test_sub_prices_replace_wholesale() {
        let service = SettingsService::new(Store::open(MemoryConnection::new()).unwrap());
        let updated = service
            .update(SettingsPatch {
                sub_prices: Some(SubPrices {
                    daily: 25.0,
                    weekly: 140.0,
                    monthly: 400.0,
                }),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.sub_prices.daily, 25.0);
        assert_eq!(updated.sub_prices.monthly, 400.0);
    }

    #[test]
    fn test_negative_hourly_rate_clamps_to_zero() {
        let service = SettingsService::new(Store::open(MemoryConnection::new()).unwrap());
        let updated = service
            .update(SettingsPatch {
                hourly_rate: Some(-3.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.hourly_rate, 0.0);
    }
}
