use nalgebra::Vector2;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::config::SystemConfig;
use crate::error::GenerationError;
use crate::sampling::{Generator, GeneratorRegistry, Range};
use crate::slot::GeneratorKind;

fn registry() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    registry
        .define("p_mass", Generator::Mass(Range::new(0.1, 0.3)))
        .unwrap();
    registry
        .define(
            "p_trans",
            Generator::Translation {
                x: Range::new(-10.0, 10.0),
                y: Range::new(5.0, 6.0),
            },
        )
        .unwrap();
    registry
        .define(
            "p_vel",
            Generator::Velocity {
                dx: Range::new(-1.0, 1.0),
                dy: Range::new(-2.0, 2.0),
            },
        )
        .unwrap();
    registry
        .define("p_rot", Generator::Rotation(Range::new(0.1, 0.3)))
        .unwrap();
    registry
}

#[test]
fn test_samples_stay_within_bounds() {
    let registry = registry();

    for seed in 0..50 {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        for _ in 0..20 {
            let mass: f64 = registry.sample("p_mass", GeneratorKind::Mass, &mut rng).unwrap();
            assert!((0.1..=0.3).contains(&mass));

            let t: Vector2<f64> = registry
                .sample("p_trans", GeneratorKind::Translation, &mut rng)
                .unwrap();
            assert!((-10.0..=10.0).contains(&t.x));
            assert!((5.0..=6.0).contains(&t.y));

            let v: Vector2<f64> = registry
                .sample("p_vel", GeneratorKind::Velocity, &mut rng)
                .unwrap();
            assert!((-1.0..=1.0).contains(&v.x));
            assert!((-2.0..=2.0).contains(&v.y));

            let r: f64 = registry.sample("p_rot", GeneratorKind::Rotation, &mut rng).unwrap();
            assert!((0.1..=0.3).contains(&r));
        }
    }
}

#[test]
fn test_degenerate_range_returns_its_bound() {
    let mut registry = GeneratorRegistry::new();
    registry
        .define("fixed", Generator::Mass(Range::new(4.0, 4.0)))
        .unwrap();
    let mut rng = ChaChaRng::seed_from_u64(7);

    let mass: f64 = registry.sample("fixed", GeneratorKind::Mass, &mut rng).unwrap();
    assert_eq!(mass, 4.0);
}

#[test]
fn test_same_seed_same_samples() {
    let registry = registry();
    let mut rng_a = ChaChaRng::seed_from_u64(42);
    let mut rng_b = ChaChaRng::seed_from_u64(42);

    for _ in 0..10 {
        let a: Vector2<f64> = registry
            .sample("p_trans", GeneratorKind::Translation, &mut rng_a)
            .unwrap();
        let b: Vector2<f64> = registry
            .sample("p_trans", GeneratorKind::Translation, &mut rng_b)
            .unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_unknown_generator() {
    let registry = registry();
    let mut rng = ChaChaRng::seed_from_u64(1);

    let result: Result<f64, _> = registry.sample("nope", GeneratorKind::Mass, &mut rng);
    assert!(matches!(result, Err(GenerationError::UnknownGenerator(name)) if name == "nope"));
}

#[test]
fn test_kind_mismatch() {
    let registry = registry();
    let mut rng = ChaChaRng::seed_from_u64(1);

    // A velocity generator cannot fill a rotation slot
    let result: Result<f64, _> = registry.sample("p_vel", GeneratorKind::Rotation, &mut rng);
    assert!(matches!(
        result,
        Err(GenerationError::KindMismatch {
            expected: GeneratorKind::Rotation,
            found: GeneratorKind::Velocity,
            ..
        })
    ));

    // Same shape is not enough: mass and rotation are distinct kinds
    assert!(matches!(
        registry.check("p_mass", GeneratorKind::Rotation),
        Err(GenerationError::KindMismatch { .. })
    ));
}

#[test]
fn test_duplicate_name() {
    let mut registry = registry();

    let result = registry.define("p_mass", Generator::Rotation(Range::new(0.0, 1.0)));
    assert!(matches!(
        result,
        Err(GenerationError::DuplicateName { namespace: "generator", name }) if name == "p_mass"
    ));
}

#[test]
fn test_invalid_bounds() {
    let mut registry = GeneratorRegistry::new();

    let result = registry.define(
        "backwards",
        Generator::Translation {
            x: Range::new(0.0, 1.0),
            y: Range::new(3.0, -3.0),
        },
    );
    assert!(matches!(
        result,
        Err(GenerationError::InvalidBounds { min, max, .. }) if min == 3.0 && max == -3.0
    ));

    let result = registry.define("nan", Generator::Mass(Range::new(f64::NAN, 1.0)));
    assert!(matches!(result, Err(GenerationError::InvalidBounds { .. })));
    assert!(registry.is_empty());
}

#[test]
fn test_range_wider_than_f64_is_rejected() {
    let mut registry = GeneratorRegistry::new();

    let result = registry.define("wide", Generator::Mass(Range::new(-1.0e308, 1.0e308)));
    assert!(matches!(
        result,
        Err(GenerationError::InvalidBounds { name, .. }) if name == "wide"
    ));
    assert!(registry.get("wide").is_none());

    assert!(!Range::new(f64::MIN, f64::MAX).is_valid());
    assert!(Range::new(0.0, f64::MAX).is_valid());
}

#[test]
fn test_half_of_f64_range_samples_within_bounds() {
    let mut registry = GeneratorRegistry::new();
    registry
        .define("half", Generator::Rotation(Range::new(0.0, f64::MAX)))
        .unwrap();
    let mut rng = ChaChaRng::seed_from_u64(17);

    for _ in 0..100 {
        let value: f64 = registry
            .sample("half", GeneratorKind::Rotation, &mut rng)
            .unwrap();
        assert!((0.0..=f64::MAX).contains(&value));
    }
}

#[test]
fn test_from_defs() {
    let config = SystemConfig::from_json_str(include_str!("../fixtures/solar_system.json")).unwrap();
    let registry = GeneratorRegistry::from_defs(&config.gens).unwrap();

    assert_eq!(registry.len(), 4);
    assert_eq!(
        registry.get("p_vel"),
        Some(&Generator::Velocity {
            dx: Range::new(-10.0, 10.0),
            dy: Range::new(-10.0, 10.0),
        })
    );
    assert_eq!(registry.get("p_rot").map(Generator::kind), Some(GeneratorKind::Rotation));
}

#[test]
fn test_range_contains() {
    let range = Range::new(-1.0, 1.0);

    assert!(range.contains(-1.0));
    assert!(range.contains(1.0));
    assert!(!range.contains(1.0001));
    assert!(range.is_valid());
    assert!(!Range::new(1.0, f64::INFINITY).is_valid());
}
