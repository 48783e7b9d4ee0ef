//! Clicker rules: score, click power, auto clickers and upgrade purchases.
//!
//! Everything here is plain Rust with no browser dependency so the rules can be
//! exercised by native tests. The browser side (`crate::app`) owns timing and
//! calls into this module from its event and interval callbacks.

use serde::Deserialize;

mod effects;

pub use effects::{EffectLifetimes, Effects, Particle, Ripple};

/// Purchasable upgrades.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    /// +1 score per manual click.
    ClickPower,
    /// +1 score per auto tick.
    AutoClicker,
}

impl UpgradeKind {
    /// Parse the short names used by the host page (`"power"` / `"auto"`).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "power" | "click_power" => Some(UpgradeKind::ClickPower),
            "auto" | "auto_clicker" => Some(UpgradeKind::AutoClicker),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::ClickPower => "+1 Click Power",
            UpgradeKind::AutoClicker => "+1 Auto Clicker",
        }
    }
}

/// Flat upgrade prices. Prices never scale with the number bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpgradePrices {
    pub click_power: u64,
    pub auto_clicker: u64,
}

impl Default for UpgradePrices {
    fn default() -> Self {
        Self { click_power: 10, auto_clicker: 50 }
    }
}

impl UpgradePrices {
    pub fn cost(&self, kind: UpgradeKind) -> u64 {
        match kind {
            UpgradeKind::ClickPower => self.click_power,
            UpgradeKind::AutoClicker => self.auto_clicker,
        }
    }
}

#[derive(Debug)]
pub struct GameState {
    score: u64,
    click_power: u64,
    auto_clickers: u64,
    prices: UpgradePrices,
    lifetimes: EffectLifetimes,
    effects: Effects,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(UpgradePrices::default(), EffectLifetimes::default())
    }
}

impl GameState {
    pub fn new(prices: UpgradePrices, lifetimes: EffectLifetimes) -> Self {
        Self {
            score: 0,
            click_power: 1,
            auto_clickers: 0,
            prices,
            lifetimes,
            effects: Effects::default(),
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn click_power(&self) -> u64 {
        self.click_power
    }

    pub fn auto_clickers(&self) -> u64 {
        self.auto_clickers
    }

    pub fn prices(&self) -> &UpgradePrices {
        &self.prices
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Manual click at `(x, y)` relative to the click target.
    pub fn click(&mut self, x: f64, y: f64, now: f64) {
        self.score = self.score.saturating_add(self.click_power);
        self.effects.spawn_click(x, y, self.click_power, now);
    }

    pub fn can_afford(&self, kind: UpgradeKind) -> bool {
        self.score >= self.prices.cost(kind)
    }

    /// Returns false (leaving state untouched) when the score is short.
    pub fn buy_upgrade(&mut self, kind: UpgradeKind) -> bool {
        let cost = self.prices.cost(kind);
        if self.score < cost {
            return false;
        }
        self.score -= cost;
        match kind {
            UpgradeKind::ClickPower => self.click_power += 1,
            UpgradeKind::AutoClicker => self.auto_clickers += 1,
        }
        true
    }

    /// One auto-click period elapsed.
    pub fn auto_tick(&mut self) {
        self.score = self.score.saturating_add(self.auto_clickers);
    }

    pub fn prune_effects(&mut self, now: f64) -> bool {
        self.effects.prune(now, self.lifetimes)
    }
}
