//! Runtime configuration.
//!
//! Every field has a default matching the ARC test network deployment, so the
//! game runs with no configuration at all. A host page may override fields by
//! embedding JSON in `<script id="arc-clicker-config" type="application/json">`.

use log::{Level, warn};
use serde::Deserialize;

use crate::chain::{CONTRACT_ADDRESS, ChainConfig, DEFAULT_GAS_LIMIT};
use crate::error::ConfigError;
use crate::game::{EffectLifetimes, UpgradePrices};

pub const CONFIG_ELEMENT_ID: &str = "arc-clicker-config";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub chain: ChainConfig,
    pub contract_address: String,
    pub gas_limit: u64,
    pub prices: UpgradePrices,
    /// Auto-click period.
    pub auto_tick_ms: i32,
    /// How often expired click effects are swept.
    pub effect_prune_ms: i32,
    pub particle_lifetime_ms: f64,
    pub ripple_lifetime_ms: f64,
    /// Delay before re-reading the on-chain score after a transaction is sent.
    pub score_refresh_delay_ms: i32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let lifetimes = EffectLifetimes::default();
        Self {
            chain: ChainConfig::arc_testnet(),
            contract_address: CONTRACT_ADDRESS.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
            prices: UpgradePrices::default(),
            auto_tick_ms: 1000,
            effect_prune_ms: 100,
            particle_lifetime_ms: lifetimes.particle_ms,
            ripple_lifetime_ms: lifetimes.ripple_ms,
            score_refresh_delay_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read the inline config element if the page has one. Bad config is
    /// reported and replaced by defaults rather than stopping the game.
    pub fn load_from_document() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match text {
            Some(text) if !text.trim().is_empty() => Self::from_json(&text).unwrap_or_else(|e| {
                warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let id = self.chain.chain_id.strip_prefix("0x").unwrap_or("");
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("chain.chainId", format!("not a 0x hex id: {}", self.chain.chain_id)));
        }
        let addr = self.contract_address.strip_prefix("0x").unwrap_or("");
        if addr.len() != 40 || !addr.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid(
                "contractAddress",
                format!("not a 20-byte hex address: {}", self.contract_address),
            ));
        }
        if self.prices.click_power == 0 || self.prices.auto_clicker == 0 {
            return Err(invalid("prices", "upgrade prices must be non-zero".to_string()));
        }
        for (field, value) in [
            ("autoTickMs", self.auto_tick_ms),
            ("effectPruneMs", self.effect_prune_ms),
            ("scoreRefreshDelayMs", self.score_refresh_delay_ms),
        ] {
            if value <= 0 {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        for (field, value) in [
            ("particleLifetimeMs", self.particle_lifetime_ms),
            ("rippleLifetimeMs", self.ripple_lifetime_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be a positive duration, got {value}")));
            }
        }
        if self.gas_limit == 0 {
            return Err(invalid("gasLimit", "must be non-zero".to_string()));
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| invalid("logLevel", format!("unknown level {}", self.log_level)))
    }

    pub fn lifetimes(&self) -> EffectLifetimes {
        EffectLifetimes {
            particle_ms: self.particle_lifetime_ms,
            ripple_ms: self.ripple_lifetime_ms,
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid_and_target_arc_testnet() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.chain.chain_id, "0x4cf0ea");
        assert_eq!(cfg.gas_limit, 200_000);
        assert_eq!(cfg.prices.cost(crate::game::UpgradeKind::AutoClicker), 50);
        assert_eq!(cfg.level().unwrap(), Level::Info);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = Config::from_json(r#"{ "prices": { "clickPower": 25 }, "logLevel": "debug" }"#).unwrap();
        assert_eq!(cfg.prices.click_power, 25);
        assert_eq!(cfg.prices.auto_clicker, 50);
        assert_eq!(cfg.level().unwrap(), Level::Debug);
        assert_eq!(cfg.contract_address, CONTRACT_ADDRESS);
    }

    #[test]
    fn chain_override_keeps_unnamed_chain_fields() {
        let cfg = Config::from_json(r#"{ "chain": { "chainId": "0x1" } }"#).unwrap();
        assert_eq!(cfg.chain.chain_id, "0x1");
        assert_eq!(cfg.chain.chain_name, "Arc Network Testnet");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(Config::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Config::from_json(r#"{ "contractAddress": "0x1234" }"#),
            Err(ConfigError::Invalid { field: "contractAddress", .. })
        ));
        assert!(matches!(
            Config::from_json(r#"{ "autoTickMs": 0 }"#),
            Err(ConfigError::Invalid { field: "autoTickMs", .. })
        ));
        assert!(matches!(
            Config::from_json(r#"{ "logLevel": "loud" }"#),
            Err(ConfigError::Invalid { field: "logLevel", .. })
        ));
    }

    #[test]
    fn rejects_non_positive_effect_lifetimes() {
        assert!(matches!(
            Config::from_json(r#"{ "particleLifetimeMs": 0 }"#),
            Err(ConfigError::Invalid { field: "particleLifetimeMs", .. })
        ));
        assert!(matches!(
            Config::from_json(r#"{ "rippleLifetimeMs": -600 }"#),
            Err(ConfigError::Invalid { field: "rippleLifetimeMs", .. })
        ));
        let cfg = Config { particle_lifetime_ms: f64::NAN, ..Config::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "particleLifetimeMs", .. })
        ));
        assert_eq!(Config::from_json(r#"{ "rippleLifetimeMs": 250.5 }"#).unwrap().ripple_lifetime_ms, 250.5);
    }
}
