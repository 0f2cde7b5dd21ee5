use super::*;
use crate::context::festival::FestivalCatalog;
use crate::context::relationship::builtin_relationship;
use crate::foundation::core::Point;
use crate::particles::emitter::emit_burst;
use crate::particles::pool::ParticlePool;
use crate::particles::rng::ParticleRng;

fn ctx(festival: &str, relationship: &str) -> AnimationContext {
    let catalog = FestivalCatalog::builtin();
    AnimationContext::derive(
        catalog.get(festival).unwrap(),
        &builtin_relationship(relationship),
    )
}

#[test]
fn firework_config_uses_context_palette_and_additive_blend() {
    let c = ctx("diwali", "parent");
    let config = EffectKind::Firework.system_config(&c);
    config.validate().unwrap();

    assert_eq!(config.colors, c.palette);
    assert_eq!(config.blend_mode, ParticleBlendMode::Lighter);
    assert_eq!(config.max_particles, 320);
    assert!((config.lifespan_ms - 1600.0).abs() < 1e-9);
}

#[test]
fn low_intensity_context_shrinks_pool_and_dims() {
    let c = ctx("diwali", "colleague");
    let config = EffectKind::Firework.system_config(&c);
    assert_eq!(config.max_particles, 160);
    assert!((config.opacity - 0.85).abs() < 1e-9);
}

#[test]
fn rising_effects_have_negative_gravity() {
    let c = ctx("pongal", "friend");
    assert!(EffectKind::Steam.system_config(&c).gravity < 0.0);
    assert!(EffectKind::Sparkle.system_config(&c).gravity < 0.0);
    assert!(EffectKind::Confetti.system_config(&c).gravity > 0.0);
}

#[test]
fn every_preset_yields_valid_configs_for_builtin_contexts() {
    let catalog = FestivalCatalog::builtin();
    for id in catalog.ids() {
        for rel in ["boss", "parent", "best-friend", "spouse", "stranger"] {
            let c = AnimationContext::derive(catalog.get(id).unwrap(), &builtin_relationship(rel));
            for kind in EffectKind::ALL {
                kind.system_config(&c).validate().unwrap();
                kind.burst(&c, 10).validate().unwrap();
            }
        }
    }
}

#[test]
fn confetti_launches_upward() {
    let c = ctx("holi", "friend");
    let config = EffectKind::Confetti.system_config(&c);
    let burst = EffectKind::Confetti.burst(&c, 50);

    let mut pool = ParticlePool::new(config.max_particles);
    let mut rng = ParticleRng::seeded(11);
    let n = emit_burst(&mut pool, &config, &mut rng, Point::new(400.0, 500.0), &burst);
    assert_eq!(n, 50);
    assert!(pool.active().all(|p| p.velocity.y < 0.0));
}

#[test]
fn firework_burst_is_radial() {
    let c = ctx("new-year", "friend");
    let burst = EffectKind::Firework.burst(&c, 12);
    assert_eq!(burst.count, 12);
    assert!(burst.angle.is_none());
}

#[test]
fn launch_times_span_the_window_in_order() {
    let c = ctx("diwali", "parent");
    let times = EffectKind::Firework.launch_times(&c, 5);
    assert_eq!(times.len(), 5);
    assert!(times[0].abs() < 1e-6);
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    // 4000 ms duration minus 1600 ms particle life.
    assert!((times[4] - 2400.0).abs() < 1e-6);
}

#[test]
fn names_parse_and_serialize() {
    for kind in EffectKind::ALL {
        assert_eq!(kind.as_str().parse::<EffectKind>().unwrap(), kind);
        assert_eq!(
            serde_json::to_string(&kind).unwrap(),
            format!("\"{}\"", kind.as_str())
        );
    }
    assert_eq!(" Sparkle ".parse::<EffectKind>().unwrap(), EffectKind::Sparkle);
    assert!("smoke".parse::<EffectKind>().is_err());
}
