#[cfg(test)]
mod tests {
    use crate::enums::*;
    use crate::state::{AircraftView, MissileView, Observation};
    use crate::types::{ActuatorCommand, BodyState, Quaternion, ReferencePoint, Vec3};

    /// Verify status/team enums round-trip through serde_json.
    #[test]
    fn test_missile_status_serde() {
        let variants = vec![
            MissileStatus::Armed,
            MissileStatus::Flying,
            MissileStatus::Hit,
            MissileStatus::OutOfRange,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: MissileStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_missile_status_is_terminal() {
        assert!(MissileStatus::Hit.is_terminal());
        assert!(MissileStatus::OutOfRange.is_terminal());
        assert!(!MissileStatus::Armed.is_terminal());
        assert!(!MissileStatus::Flying.is_terminal());
    }

    #[test]
    fn test_observation_serde_round_trip() {
        let obs = Observation {
            elapsed_secs: 12.5,
            aircraft: vec![AircraftView {
                sim_id: 1,
                live: true,
                name: "F-16".into(),
                team: Team::Blue,
                lon_deg: 127.0,
                lat_deg: 30.0,
                alt_m: 20_000.0,
                roll_deg: 0.0,
                pitch_deg: 0.0,
                yaw_deg: 0.0,
            }],
            missiles: vec![MissileView {
                sim_id: 20_000_001,
                live: true,
                name: "PL-10".into(),
                team: Team::Red,
                lon_deg: 127.01,
                lat_deg: 30.01,
                alt_m: 19_500.0,
                roll_deg: 1.0,
                pitch_deg: 2.0,
                yaw_deg: 3.0,
                parent_id: 2,
                target_id: 1,
                status: MissileStatus::Flying,
            }],
        };
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, back);
    }

    #[test]
    fn test_body_state_vector_arithmetic() {
        let a = BodyState::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.2, 0.3), Quaternion::IDENTITY);
        let b = BodyState::new(Vec3::new(10.0, 20.0, 30.0), Vec3::ZERO, Quaternion::IDENTITY);
        let sum = a + b;
        assert_eq!(sum.position, Vec3::new(11.0, 22.0, 33.0));

        let scaled = a * 2.0;
        assert_eq!(scaled.position, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_actuator_command_zero_is_all_zero() {
        let cmd = ActuatorCommand::ZERO;
        assert_eq!(cmd, ActuatorCommand::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_reference_point_fields() {
        let rp = ReferencePoint::new(126.0, 30.0, 1000.0);
        assert_eq!(rp.lon_deg, 126.0);
        assert_eq!(rp.lat_deg, 30.0);
        assert_eq!(rp.alt_m, 1000.0);
    }
}
