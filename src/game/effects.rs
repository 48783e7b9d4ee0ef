// Transient click effects: floating "+N" particles and expanding ripples.
// Both are keyed by a running id and pruned by age.

/// Floating "+value" label spawned at the click point.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub value: u64,
    pub born_ms: f64,
}

/// Expanding ring spawned at the click point.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub born_ms: f64,
}

/// Display lifetimes in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectLifetimes {
    pub particle_ms: f64,
    pub ripple_ms: f64,
}

impl Default for EffectLifetimes {
    fn default() -> Self {
        Self { particle_ms: 1000.0, ripple_ms: 600.0 }
    }
}

#[derive(Debug, Default)]
pub struct Effects {
    next_id: u64,
    particles: Vec<Particle>,
    ripples: Vec<Ripple>,
}

impl Effects {
    pub fn spawn_click(&mut self, x: f64, y: f64, value: u64, now: f64) {
        let pid = self.bump();
        self.particles.push(Particle { id: pid, x, y, value, born_ms: now });
        let rid = self.bump();
        self.ripples.push(Ripple { id: rid, x, y, born_ms: now });
    }

    /// Drop records whose age reached their lifetime. Returns true if anything
    /// was removed so callers can skip a re-render otherwise.
    pub fn prune(&mut self, now: f64, lifetimes: EffectLifetimes) -> bool {
        let before = self.particles.len() + self.ripples.len();
        self.particles.retain(|p| now - p.born_ms < lifetimes.particle_ms);
        self.ripples.retain(|r| now - r.born_ms < lifetimes.ripple_ms);
        before != self.particles.len() + self.ripples.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.ripples.is_empty()
    }

    fn bump(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripples_expire_before_particles() {
        let mut fx = Effects::default();
        fx.spawn_click(10.0, 20.0, 3, 1_000.0);
        assert_eq!(fx.particles().len(), 1);
        assert_eq!(fx.ripples().len(), 1);

        assert!(fx.prune(1_650.0, EffectLifetimes::default()));
        assert_eq!(fx.particles().len(), 1);
        assert!(fx.ripples().is_empty());

        assert!(fx.prune(2_000.0, EffectLifetimes::default()));
        assert!(fx.is_empty());
    }

    #[test]
    fn prune_reports_no_change_when_nothing_expired() {
        let mut fx = Effects::default();
        fx.spawn_click(0.0, 0.0, 1, 0.0);
        assert!(!fx.prune(100.0, EffectLifetimes::default()));
    }

    #[test]
    fn ids_are_unique_across_kinds() {
        let mut fx = Effects::default();
        fx.spawn_click(0.0, 0.0, 1, 0.0);
        fx.spawn_click(5.0, 5.0, 1, 0.0);
        let mut ids: Vec<u64> = fx.particles().iter().map(|p| p.id).collect();
        ids.extend(fx.ripples().iter().map(|r| r.id));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
