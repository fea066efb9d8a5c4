use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{config::CityConfig, constants::*, rng::RngManager};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f64,
    pub y: f64,
}

impl GroundPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &GroundPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageState {
    #[default]
    None,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub id: u32,
    pub position: GroundPoint,
    pub width_m: f64,
    pub depth_m: f64,
    pub height_m: f64,
    pub damage_threshold_psi: f64,
    pub resilience: f64,
    /// Overwritten by every run.
    pub current_overpressure_psi: f64,
    pub damage: DamageState,
}

impl Structure {
    /// Taller structures tolerate proportionally more overpressure than the
    /// `base_threshold_psi` a ground-level structure collapses at.
    pub fn new(
        id: u32,
        position: GroundPoint,
        width_m: f64,
        depth_m: f64,
        height_m: f64,
        base_threshold_psi: f64,
    ) -> Self {
        Self {
            id,
            position,
            width_m,
            depth_m,
            height_m,
            damage_threshold_psi: base_threshold_psi * (1.0 + height_m / THRESHOLD_HEIGHT_SCALE_M),
            resilience: height_m / RESILIENCE_HEIGHT_SCALE_M,
            current_overpressure_psi: 0.0,
            damage: DamageState::None,
        }
    }
}

/// The fixed structure population of a session.
///
/// Layout never changes after construction; runs only rewrite each
/// structure's overpressure and damage state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    structures: Vec<Structure>,
}

impl City {
    pub fn generate(config: &CityConfig, base_threshold_psi: f64, rng: &mut RngManager) -> Self {
        let mut stream = rng.stream("city");
        let half = config.half_extent_m;
        let structures = (0..config.building_count)
            .map(|index| {
                let width = BUILDING_MIN_FOOTPRINT_M + stream.gen::<f64>() * BUILDING_FOOTPRINT_SPAN_M;
                let depth = BUILDING_MIN_FOOTPRINT_M + stream.gen::<f64>() * BUILDING_FOOTPRINT_SPAN_M;
                let height = BUILDING_MIN_HEIGHT_M + stream.gen::<f64>() * BUILDING_HEIGHT_SPAN_M;
                let x = (stream.gen::<f64>() - 0.5) * half * 2.0;
                let y = (stream.gen::<f64>() - 0.5) * half * 2.0;
                Structure::new(
                    index as u32,
                    GroundPoint::new(x, y),
                    width,
                    depth,
                    height,
                    base_threshold_psi,
                )
            })
            .collect();
        Self { structures }
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub(crate) fn structures_mut(&mut self) -> &mut [Structure] {
        &mut self.structures
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_scales_with_height() {
        let origin = GroundPoint::new(0.0, 0.0);
        let low = Structure::new(0, origin, 20.0, 20.0, 0.0, BUILDING_DAMAGE_THRESHOLD_PSI);
        let tall = Structure::new(1, origin, 20.0, 20.0, 500.0, BUILDING_DAMAGE_THRESHOLD_PSI);
        assert_eq!(low.damage_threshold_psi, 5.0);
        assert_eq!(tall.damage_threshold_psi, 10.0);
        assert_eq!(tall.resilience, 2.5);
    }

    #[test]
    fn threshold_follows_configured_base() {
        let config = CityConfig::default();
        let city = City::generate(&config, 50.0, &mut RngManager::new(7));
        for structure in city.structures() {
            let expected = 50.0 * (1.0 + structure.height_m / THRESHOLD_HEIGHT_SCALE_M);
            assert!((structure.damage_threshold_psi - expected).abs() < 1e-9);
            assert!(structure.damage_threshold_psi >= 50.0);
        }
    }

    #[test]
    fn generated_layout_respects_bounds() {
        let config = CityConfig::default();
        let city = City::generate(&config, BUILDING_DAMAGE_THRESHOLD_PSI, &mut RngManager::new(7));
        assert_eq!(city.len(), 100);
        for structure in city.structures() {
            assert!(structure.position.x.abs() <= 500.0);
            assert!(structure.position.y.abs() <= 500.0);
            assert!((30.0..180.0).contains(&structure.height_m));
            assert!((10.0..60.0).contains(&structure.width_m));
            assert!(structure.damage_threshold_psi >= 5.0);
            assert_eq!(structure.damage, DamageState::None);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = CityConfig::default();
        let a = City::generate(&config, BUILDING_DAMAGE_THRESHOLD_PSI, &mut RngManager::new(11));
        let b = City::generate(&config, BUILDING_DAMAGE_THRESHOLD_PSI, &mut RngManager::new(11));
        let c = City::generate(&config, BUILDING_DAMAGE_THRESHOLD_PSI, &mut RngManager::new(12));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
