//! Numeric scene fields exposed to an external control panel.
//!
//! The scene registers each field with a range and step; the panel reads the
//! current value and writes changes straight back. Writes are not clamped,
//! keeping inside the range is the panel's job.

use glam::Vec3;

use crate::error::{ConstructionError, SceneResult};
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TunableId {
    AmbientIntensity,
    DirectionalIntensity,
    DirectionalX,
    DirectionalY,
    DirectionalZ,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunable {
    pub id: TunableId,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Tunable {
    pub fn new(id: TunableId, label: &'static str, min: f32, max: f32, step: f32) -> SceneResult<Self> {
        let ordered = min.is_finite() && max.is_finite() && min <= max;
        if !ordered || !step.is_finite() || step <= 0.0 {
            return Err(ConstructionError::InvalidTunableRange {
                label,
                min,
                max,
                step,
            });
        }
        Ok(Self {
            id,
            label,
            min,
            max,
            step,
        })
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Light controls in panel order.
pub fn light_tunables() -> SceneResult<Vec<Tunable>> {
    const STEP: f32 = 0.001;
    Ok(vec![
        Tunable::new(TunableId::AmbientIntensity, "ambient intensity", 0.0, 1.0, STEP)?,
        Tunable::new(TunableId::DirectionalIntensity, "moon intensity", 0.0, 1.0, STEP)?,
        Tunable::new(TunableId::DirectionalX, "moon x", -5.0, 5.0, STEP)?,
        Tunable::new(TunableId::DirectionalY, "moon y", -5.0, 5.0, STEP)?,
        Tunable::new(TunableId::DirectionalZ, "moon z", -5.0, 5.0, STEP)?,
    ])
}

impl Scene {
    pub fn tunable(&self, id: TunableId) -> Option<&Tunable> {
        self.tunables().iter().find(|t| t.id == id)
    }

    pub fn tunable_value(&self, id: TunableId) -> f32 {
        let moon = self.directional_light();
        match id {
            TunableId::AmbientIntensity => self.ambient_light().intensity(),
            TunableId::DirectionalIntensity => moon.intensity(),
            TunableId::DirectionalX => moon.position().x,
            TunableId::DirectionalY => moon.position().y,
            TunableId::DirectionalZ => moon.position().z,
        }
    }

    /// Write `value` into the referenced field without range checks.
    pub fn set_tunable(&self, id: TunableId, value: f32) {
        let moon = self.directional_light();
        let with_axis = |axis: usize| {
            let mut p: Vec3 = moon.position();
            p[axis] = value;
            moon.set_position(p);
        };
        match id {
            TunableId::AmbientIntensity => self.ambient_light().set_intensity(value),
            TunableId::DirectionalIntensity => moon.set_intensity(value),
            TunableId::DirectionalX => with_axis(0),
            TunableId::DirectionalY => with_axis(1),
            TunableId::DirectionalZ => with_axis(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_tunables_ranges() {
        let tunables = light_tunables().unwrap();
        assert_eq!(tunables.len(), 5);
        assert_eq!(tunables[0].id, TunableId::AmbientIntensity);
        assert_eq!((tunables[0].min, tunables[0].max), (0.0, 1.0));
        assert_eq!((tunables[2].min, tunables[2].max), (-5.0, 5.0));
        assert!(tunables.iter().all(|t| t.step == 0.001));
    }

    #[test]
    fn test_tunable_rejects_inverted_range() {
        let err = Tunable::new(TunableId::DirectionalX, "x", 5.0, -5.0, 0.1).unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidTunableRange { label: "x", .. }));
    }

    #[test]
    fn test_tunable_rejects_zero_step() {
        assert!(Tunable::new(TunableId::DirectionalX, "x", 0.0, 1.0, 0.0).is_err());
        assert!(Tunable::new(TunableId::DirectionalX, "x", 0.0, f32::NAN, 0.1).is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let t = Tunable::new(TunableId::AmbientIntensity, "a", 0.0, 1.0, 0.001).unwrap();
        assert!(t.contains(0.0));
        assert!(t.contains(1.0));
        assert!(!t.contains(1.001));
    }
}
