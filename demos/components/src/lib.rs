//! Example component definitions for the sieve demos.
//!
//! These show what a host's payloads look like: plain `Serialize` structs
//! with a stable [`Component::type_name`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use sieve_component::Component;

/// A 2D position in world units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position(pub Vec2);

impl Position {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// A 2D velocity in world units per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity(pub Vec2);

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self(Vec2::ZERO);

    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// A health component with current and maximum hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Health {
    /// Current hit points.
    pub current: u32,
    /// Maximum hit points.
    pub max: u32,
}

impl Health {
    /// Create a new health component at full HP.
    #[must_use]
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Returns `true` if HP > 0.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Apply damage, clamping to zero.
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Heal, clamping to max.
    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

/// A display name, handy in log output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Name(pub String);

impl Name {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Component for Name {
    fn type_name() -> &'static str {
        "Name"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_and_heal() {
        let mut h = Health::full(100);
        assert!(h.is_alive());
        h.damage(60);
        assert_eq!(h.current, 40);
        h.heal(300);
        assert_eq!(h.current, 100);
        h.damage(200);
        assert_eq!(h.current, 0);
        assert!(!h.is_alive());
    }

    #[test]
    fn test_position_json_shape() {
        let json = serde_json::to_value(Position::new(10.0, 10.0)).unwrap();
        assert_eq!(json, serde_json::json!([10.0, 10.0]));
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Position::meta().field_name, "position");
        assert_eq!(Velocity::meta().field_name, "velocity");
    }
}
