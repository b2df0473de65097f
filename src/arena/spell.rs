//! Transient spell markers.

use serde::{Deserialize, Serialize};

use super::geometry::Position;
use crate::cards::SpellKind;
use crate::core::{EntityId, Team};

/// Marker left where a spell landed. Damage is applied when the spell is
/// cast; the marker only exists for the renderer and expires after the
/// configured lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellEffect {
    /// Entity id.
    pub id: EntityId,
    /// Which spell.
    pub kind: SpellKind,
    /// Caster.
    pub team: Team,
    /// Impact point.
    pub position: Position,
    /// Simulation time of the cast.
    pub created_ms: u64,
}

impl SpellEffect {
    /// Whether the marker has outlived `lifetime_ms` at `now_ms`.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64, lifetime_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_ms) >= lifetime_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let effect = SpellEffect {
            id: EntityId(10),
            kind: SpellKind::Fireball,
            team: Team::Player,
            position: Position::new(50.0, 25.0),
            created_ms: 2000,
        };

        assert!(!effect.is_expired(2000, 1000));
        assert!(!effect.is_expired(2999, 1000));
        assert!(effect.is_expired(3000, 1000));
    }
}
