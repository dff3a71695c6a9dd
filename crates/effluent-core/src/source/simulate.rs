use crate::model::ParameterKind;
use rand::Rng;
use rust_decimal::Decimal;

/// Interval a simulated reading is drawn from, and its decimal precision.
///
/// Ranges deliberately straddle the safety thresholds so both outcomes occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationRange {
    pub min: Decimal,
    pub max: Decimal,
    pub scale: u32,
}

impl SimulationRange {
    /// Draw uniformly from the decimal grid `min, min + 10^-scale, ..., max`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Decimal {
        let lo = grid_steps(self.min, self.scale);
        let hi = grid_steps(self.max, self.scale);
        Decimal::new(rng.random_range(lo..=hi), self.scale)
    }

    pub fn contains(&self, value: Decimal) -> bool {
        self.min <= value && value <= self.max
    }
}

fn grid_steps(value: Decimal, scale: u32) -> i64 {
    let mut v = value;
    v.rescale(scale);
    v.mantissa() as i64
}

pub fn simulation_range(kind: ParameterKind) -> SimulationRange {
    let (min, max, scale) = match kind {
        ParameterKind::Ph => (Decimal::new(40, 1), Decimal::new(100, 1), 2),
        ParameterKind::Turbidity => (Decimal::new(5, 1), Decimal::new(100, 1), 2),
        ParameterKind::TotalSuspendedSolids => (Decimal::new(50, 1), Decimal::new(500, 1), 2),
        ParameterKind::ChemicalOxygenDemand => (Decimal::new(500, 1), Decimal::new(5000, 1), 2),
        ParameterKind::BiologicalOxygenDemand => (Decimal::new(100, 1), Decimal::new(1000, 1), 2),
        ParameterKind::OilGrease => (Decimal::new(1, 1), Decimal::new(200, 1), 2),
        ParameterKind::HeavyMetals => (Decimal::new(1, 2), Decimal::new(5, 1), 3),
    };
    SimulationRange { min, max, scale }
}

/// Draw one reading per parameter, in canonical order.
pub fn simulate_readings<R: Rng + ?Sized>(rng: &mut R) -> Vec<(ParameterKind, Decimal)> {
    ParameterKind::ALL
        .iter()
        .map(|&kind| (kind, simulation_range(kind).draw(rng)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    #[test]
    fn test_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in ParameterKind::ALL {
            let range = simulation_range(kind);
            for _ in 0..10_000 {
                let v = range.draw(&mut rng);
                assert!(range.contains(v), "{kind}: {v} outside {}..={}", range.min, range.max);
                assert!(v.scale() <= range.scale);
            }
        }
    }

    #[test]
    fn test_heavy_metals_three_decimals() {
        let range = simulation_range(ParameterKind::HeavyMetals);
        assert_eq!(range.scale, 3);
        assert_eq!(range.min, dec!(0.01));
        assert_eq!(range.max, dec!(0.5));
    }

    #[test]
    fn test_ranges_straddle_thresholds() {
        let table = crate::thresholds::builtin();
        for kind in ParameterKind::ALL {
            let range = simulation_range(kind);
            let rule = table.rule(kind).unwrap();
            assert!(range.contains(rule.max()), "{kind} limit outside simulated range");
            assert!(!rule.admits(range.max), "{kind} range never unsafe");
        }
    }

    #[test]
    fn test_same_seed_same_readings() {
        let a = simulate_readings(&mut StdRng::seed_from_u64(42));
        let b = simulate_readings(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
    }
}
