//! # Game Mathematics
//!
//! Small numeric helpers shared by the combat and crafting formulas.

use crate::config::DEFENSE_CURVE_CONSTANT;

/// Fraction of incoming damage that survives a defense value.
///
/// Uses the diminishing-returns curve `1 - d / (d + 50)`. Negative defense is treated as zero,
/// so the factor always lies in `(0, 1]`.
///
/// # Examples
///
/// ```
/// use runeforge::defense_factor;
///
/// assert_eq!(defense_factor(0), 1.0);
/// assert_eq!(defense_factor(50), 0.5);
/// ```
pub fn defense_factor(defense: i32) -> f64 {
    let defense = defense.max(0) as f64;
    1.0 - defense / (defense + DEFENSE_CURVE_CONSTANT)
}

/// Fraction of damage that survives an elemental resistance percentage.
///
/// Resistances above 100 fully block the element; negative resistances amplify it.
pub fn resistance_factor(resistance: i32) -> f64 {
    (1.0 - resistance as f64 / 100.0).max(0.0)
}

/// Floors a damage value and applies the minimum-of-one rule.
///
/// Values beyond `u32::MAX` saturate. NaN counts as the minimum.
pub fn finalize_damage(raw: f64) -> u32 {
    if raw.is_nan() {
        return 1;
    }
    raw.floor().max(1.0) as u32
}

/// Computes `stat * power / 100` as a float, treating negative stats as zero.
pub fn scaled(stat: i32, power: u32) -> f64 {
    stat.max(0) as f64 * power as f64 / 100.0
}

/// Clamps a percentage into `[min, max]`.
pub fn clamp_percent(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_factor_midpoint() {
        assert_eq!(defense_factor(50), 0.5);
    }

    #[test]
    fn test_defense_factor_negative_defense() {
        assert_eq!(defense_factor(-20), 1.0);
    }

    #[test]
    fn test_resistance_factor() {
        assert_eq!(resistance_factor(0), 1.0);
        assert_eq!(resistance_factor(25), 0.75);
        assert_eq!(resistance_factor(150), 0.0);
        assert_eq!(resistance_factor(-50), 1.5);
    }

    #[test]
    fn test_finalize_damage_minimum() {
        assert_eq!(finalize_damage(0.0), 1);
        assert_eq!(finalize_damage(0.99), 1);
        assert_eq!(finalize_damage(17.24), 17);
        assert_eq!(finalize_damage(f64::NAN), 1);
    }

    #[test]
    fn test_finalize_damage_saturates() {
        assert_eq!(finalize_damage(1.0e12), u32::MAX);
        assert_eq!(finalize_damage(f64::INFINITY), u32::MAX);
        assert_eq!(finalize_damage(f64::NEG_INFINITY), 1);
        assert_eq!(finalize_damage(4_294_967_295.5), u32::MAX);
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(-910.0, 5.0, 95.0), 5.0);
        assert_eq!(clamp_percent(135.0, 5.0, 95.0), 95.0);
        assert_eq!(clamp_percent(60.0, 5.0, 95.0), 60.0);
    }
}
