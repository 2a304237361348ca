use drumwatch_schemas::{
    reading::{LevelState, Reading},
    status::FleetStatus,
};

/// Reduces a set of readings to the most urgent fleet-wide status.
pub fn fleet_status(readings: &[Reading]) -> FleetStatus {
    if readings.iter().any(|r| r.level_state == LevelState::Low) {
        FleetStatus::RefillRequired
    } else if readings.iter().any(|r| r.level_state == LevelState::Mid) {
        FleetStatus::PlanReplacement
    } else {
        FleetStatus::AllSafe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::reading_for;

    #[test]
    fn test_any_low_drum_requires_refill() {
        let readings = vec![reading_for("A", 90), reading_for("B", 12)];
        assert_eq!(fleet_status(&readings), FleetStatus::RefillRequired);
    }

    #[test]
    fn test_low_outranks_mid() {
        let readings = vec![reading_for("A", 45), reading_for("B", 30)];
        assert_eq!(fleet_status(&readings), FleetStatus::RefillRequired);
    }

    #[test]
    fn test_mid_without_low_plans_replacement() {
        let readings = vec![reading_for("A", 60), reading_for("B", 61)];
        assert_eq!(fleet_status(&readings), FleetStatus::PlanReplacement);
    }

    #[test]
    fn test_all_above_mid_is_safe() {
        let readings = vec![reading_for("A", 61), reading_for("B", 100)];
        assert_eq!(fleet_status(&readings), FleetStatus::AllSafe);
        assert_eq!(fleet_status(&[]), FleetStatus::AllSafe);
    }
}
