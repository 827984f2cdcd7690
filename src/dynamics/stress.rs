use crate::core::{link::Link, material::MaterialTable};

/// Converts a link's strain into normalized stress and decides failure.
///
/// `stress = |strain| / (failure_coefficient * strength)`; anything above 1.0
/// severs the link.
#[derive(Debug, Clone)]
pub struct StressModel {
    pub failure_coefficient: f32,
    pub materials: MaterialTable,
}

impl StressModel {
    pub fn new(failure_coefficient: f32, materials: MaterialTable) -> Self {
        Self {
            failure_coefficient,
            materials,
        }
    }

    /// Signed strain; positive when stretched. Zero for a non-positive rest length.
    pub fn strain(rest_length: f32, distance: f32) -> f32 {
        if rest_length <= 0.0 {
            return 0.0;
        }
        (distance - rest_length) / rest_length
    }

    pub fn stress(&self, link: &Link, distance: f32) -> f32 {
        let max_strain = self.failure_coefficient * self.materials.strength(link.material);
        if max_strain <= 0.0 {
            return 0.0;
        }
        Self::strain(link.rest_length, distance).abs() / max_strain
    }

    /// Records the link's stress at `distance` and breaks it when over the limit.
    /// Returns `true` if the link broke during this call.
    pub fn evaluate(&self, link: &mut Link, distance: f32) -> bool {
        link.stress = self.stress(link, distance);
        link.stress > 1.0 && link.mark_broken()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::material::MaterialKind, utils::allocator::PointId};
    use approx::assert_relative_eq;

    fn link(material: MaterialKind) -> Link {
        Link::new(PointId::new(0, 0), PointId::new(1, 0), 100.0, material)
    }

    #[test]
    fn stress_scales_with_material_strength() {
        let model = StressModel::new(0.3, MaterialTable::default());
        // 15% stretch: wood tolerates 36%, steel 150%.
        assert_relative_eq!(model.stress(&link(MaterialKind::Wood), 115.0), 0.15 / 0.36, epsilon = 1e-5);
        assert_relative_eq!(model.stress(&link(MaterialKind::Steel), 115.0), 0.1, epsilon = 1e-5);
    }

    #[test]
    fn compression_counts_like_tension() {
        let model = StressModel::new(0.3, MaterialTable::default());
        let stretched = model.stress(&link(MaterialKind::Road), 120.0);
        let squashed = model.stress(&link(MaterialKind::Road), 80.0);
        assert_relative_eq!(stretched, squashed, epsilon = 1e-5);
    }

    #[test]
    fn overstrain_breaks_once() {
        let model = StressModel::new(0.3, MaterialTable::default());
        let mut wood = link(MaterialKind::Wood);

        assert!(!model.evaluate(&mut wood, 130.0));
        assert!(!wood.is_broken());

        assert!(model.evaluate(&mut wood, 140.0));
        assert!(wood.is_broken());
        assert!(!model.evaluate(&mut wood, 140.0));
        // Relaxing back to rest does not repair it.
        assert!(!model.evaluate(&mut wood, 100.0));
        assert!(wood.is_broken());
    }

    #[test]
    fn zero_rest_length_is_neutral() {
        let model = StressModel::new(0.3, MaterialTable::default());
        let mut degenerate = link(MaterialKind::Wood);
        degenerate.rest_length = 0.0;
        assert_eq!(model.stress(&degenerate, 5.0), 0.0);
    }
}
