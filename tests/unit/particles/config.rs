use super::*;

#[test]
fn default_config_is_valid() {
    ParticleSystemConfig::default().validate().unwrap();
}

#[test]
fn config_rejects_bad_numbers() {
    let bad = [
        ParticleSystemConfig {
            friction: 0.0,
            ..Default::default()
        },
        ParticleSystemConfig {
            friction: 1.5,
            ..Default::default()
        },
        ParticleSystemConfig {
            lifespan_ms: -1.0,
            ..Default::default()
        },
        ParticleSystemConfig {
            particle_size: -2.0,
            ..Default::default()
        },
        ParticleSystemConfig {
            max_particles: 0,
            ..Default::default()
        },
        ParticleSystemConfig {
            colors: vec![],
            ..Default::default()
        },
        ParticleSystemConfig {
            opacity: 1.2,
            ..Default::default()
        },
        ParticleSystemConfig {
            speed: Spread::range(10.0, 5.0),
            ..Default::default()
        },
    ];
    for cfg in bad {
        assert!(cfg.validate().is_err(), "{cfg:?}");
    }
}

#[test]
fn negative_gravity_is_allowed() {
    let cfg = ParticleSystemConfig {
        gravity: -40.0,
        ..Default::default()
    };
    cfg.validate().unwrap();
}

#[test]
fn velocity_variation_is_bounded_so_speed_keeps_its_sign() {
    let with = |velocity_variation| ParticleSystemConfig {
        velocity_variation,
        ..Default::default()
    };
    with(0.0).validate().unwrap();
    with(2.0).validate().unwrap();
    assert!(with(2.5).validate().is_err());
    assert!(with(-0.1).validate().is_err());
    assert!(with(f64::NAN).validate().is_err());
}

#[test]
fn burst_validation() {
    BurstConfig::new(10).validate().unwrap();
    BurstConfig::new(10)
        .with_angle(Spread::range(-3.0, -1.0))
        .validate()
        .unwrap();

    assert!(
        BurstConfig::new(1)
            .with_speed(Spread::range(200.0, 100.0))
            .validate()
            .is_err()
    );
    assert!(BurstConfig::new(1).with_life(-5.0).validate().is_err());
    assert!(
        BurstConfig::new(1)
            .with_size(Spread::fixed(-1.0))
            .validate()
            .is_err()
    );
    assert!(BurstConfig::new(1).with_colors(vec![]).validate().is_err());
    assert!(
        BurstConfig::new(1)
            .with_speed(Spread::fixed(f64::NAN))
            .validate()
            .is_err()
    );
}

#[test]
fn burst_json_accepts_fixed_and_range_spreads() {
    let json = r##"{"count":50,"speed":{"min":100,"max":200},"size":4,"life":2000,"colors":["#FFFFFF"]}"##;
    let burst: BurstConfig = serde_json::from_str(json).unwrap();
    assert_eq!(burst.count, 50);
    assert_eq!(burst.speed, Some(Spread::range(100.0, 200.0)));
    assert_eq!(burst.size, Some(Spread::fixed(4.0)));
    assert_eq!(burst.angle, None);
    assert_eq!(burst.colors, Some(vec![Rgb8::WHITE]));
}

#[test]
fn config_json_fills_missing_fields_with_defaults() {
    let cfg: ParticleSystemConfig =
        serde_json::from_str(r#"{"max_particles":200,"blend_mode":"lighter"}"#).unwrap();
    assert_eq!(cfg.max_particles, 200);
    assert_eq!(cfg.blend_mode, ParticleBlendMode::Lighter);
    assert_eq!(cfg.friction, ParticleSystemConfig::default().friction);
}

#[test]
fn spread_sampling_stays_in_range() {
    let mut rng = ParticleRng::seeded(7);
    for _ in 0..500 {
        let v = Spread::range(2.0, 3.0).sample(&mut rng);
        assert!((2.0..3.0).contains(&v));
    }
    assert_eq!(Spread::fixed(4.5).sample(&mut rng), 4.5);
}
