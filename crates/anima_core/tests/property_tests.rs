//! Property-based tests for anima_core.
//!
//! Uses proptest to verify invariants that must hold for ALL inputs the
//! engine can be fed, not just hand-picked examples.

use anima_core::{AgentSnapshot, Context, Engine, EngineConfig, Stimulus};
use proptest::prelude::*;

const SIGNALS: [&str; 7] = ["heat", "chill", "idle", "talking", "playing", "novelty", "threat"];
const EVENTS: [&str; 11] = [
    "praise",
    "compliment",
    "success",
    "support",
    "reassurance",
    "surprise",
    "insult",
    "threat",
    "failure",
    "loss",
    "rejection",
];

// ============================================================================
// Strategies
// ============================================================================

/// Signal strengths, including out-of-range and non-finite ones.
fn arb_strength() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => 0.0f32..=1.0,
        1 => -2.0f32..=3.0,
        1 => Just(f32::NAN),
    ]
}

fn arb_context() -> impl Strategy<Value = Context> {
    (
        prop::collection::vec((0..SIGNALS.len(), arb_strength()), 0..5),
        any::<bool>(),
    )
        .prop_map(|(entries, with_unknown)| {
            let mut ctx: Context = entries
                .into_iter()
                .map(|(i, s)| (SIGNALS[i], s))
                .collect();
            if with_unknown {
                ctx.set("gravity", 0.5);
            }
            ctx
        })
}

fn arb_stimulus() -> impl Strategy<Value = Stimulus> {
    (
        prop_oneof![
            9 => (0..EVENTS.len()).prop_map(|i| EVENTS[i].to_string()),
            1 => Just("tickle".to_string()),
        ],
        prop::option::of(0.0f32..=1.0),
    )
        .prop_map(|(name, strength)| Stimulus { name, strength })
}

/// One tick's worth of input: a context, a step and maybe a stimulus.
fn arb_step() -> impl Strategy<Value = (Context, f64, Option<Stimulus>)> {
    (arb_context(), 0.0f64..=5.0, prop::option::of(arb_stimulus()))
}

fn engine_at(age: f64) -> Engine {
    Engine::new(EngineConfig::default().with_initial_age(age)).unwrap()
}

fn assert_bounded(s: &AgentSnapshot) -> Result<(), TestCaseError> {
    for t in &s.traits {
        for (label, v) in [("core", t.core), ("plastic", t.plastic), ("effective", t.effective)] {
            prop_assert!(v.is_finite() && (0.0..=1.0).contains(&v), "{}.{} = {}", t.name, label, v);
        }
        for f in &t.facets {
            prop_assert!(
                f.value.is_finite() && (0.0..=1.0).contains(&f.value),
                "{}.{} = {}",
                t.name,
                f.name,
                f.value
            );
        }
    }
    for m in &s.mood_vector {
        prop_assert!(
            m.intensity.is_finite() && (0.0..=1.0).contains(&m.intensity),
            "mood {} = {}",
            m.name,
            m.intensity
        );
    }
    for e in &s.active_emotions {
        prop_assert!(
            e.intensity.is_finite() && (0.0..=1.0).contains(&e.intensity),
            "emotion {} = {}",
            e.kind,
            e.intensity
        );
        prop_assert!(e.habituation > 0.0 && e.habituation <= 1.0);
    }
    prop_assert!(s.maturity_factor >= 0.0 && s.maturity_factor < 1.0);
    prop_assert!(s.volatility_scale > 0.0 && s.volatility_scale <= 1.0);
    Ok(())
}

// ============================================================================
// State invariants
// ============================================================================

proptest! {
    /// **Core invariant**: no sequence of inputs pushes any value out of bounds.
    #[test]
    fn state_stays_bounded(
        age in 0.0f64..2000.0,
        steps in prop::collection::vec(arb_step(), 1..60),
    ) {
        let mut engine = engine_at(age);
        for (ctx, dt, stimulus) in steps {
            if let Some(s) = stimulus {
                engine.trigger(s);
            }
            engine.tick(&ctx, dt);
            assert_bounded(&engine.snapshot())?;
        }
    }

    /// Reading a snapshot never changes the engine.
    #[test]
    fn snapshot_is_idempotent(steps in prop::collection::vec(arb_step(), 0..20)) {
        let mut engine = engine_at(0.0);
        for (ctx, dt, stimulus) in steps {
            if let Some(s) = stimulus {
                engine.trigger(s);
            }
            engine.tick(&ctx, dt);
        }
        let first = engine.snapshot();
        let second = engine.snapshot();
        prop_assert_eq!(first, second);
    }

    /// Age and maturity never decrease, whatever `dt` is thrown at them.
    #[test]
    fn maturity_is_monotonic(
        dts in prop::collection::vec(
            prop_oneof![8 => 0.0f64..50.0, 1 => Just(-3.0), 1 => Just(f64::NAN)],
            1..80,
        ),
    ) {
        let mut engine = engine_at(0.0);
        let mut age = engine.age();
        let mut factor = engine.maturity_factor();
        for dt in dts {
            engine.tick(&Context::new(), dt);
            prop_assert!(engine.age() >= age);
            prop_assert!(engine.maturity_factor() >= factor);
            prop_assert!(engine.maturity_factor() < 1.0);
            age = engine.age();
            factor = engine.maturity_factor();
        }
    }

    /// An older agent's traits move no more than a younger one's under the
    /// same context.
    #[test]
    fn trait_changes_dampen_with_age(
        young_age in 0.0f64..100.0,
        extra in 50.0f64..2000.0,
        ctx in arb_context(),
        dt in 0.1f64..5.0,
    ) {
        let mut young = engine_at(young_age);
        let mut old = engine_at(young_age + extra);
        let before = young.snapshot();
        young.tick(&ctx, dt);
        old.tick(&ctx, dt);
        let (y, o) = (young.snapshot(), old.snapshot());
        for ((b, yt), ot) in before.traits.iter().zip(&y.traits).zip(&o.traits) {
            let dy = (yt.effective - b.effective).abs();
            let dold = (ot.effective - b.effective).abs();
            prop_assert!(dold <= dy + 1e-6, "{}: old {} > young {}", b.name, dold, dy);
        }
    }

    /// Same for moods, driven through both traits and signals.
    #[test]
    fn mood_changes_dampen_with_age(
        young_age in 0.0f64..100.0,
        extra in 50.0f64..2000.0,
        heat in 0.0f32..=1.0,
        dt in 0.1f64..3.0,
    ) {
        let mut young = engine_at(young_age);
        let mut old = engine_at(young_age + extra);
        let before = young.snapshot();
        let ctx = Context::new().with("heat", heat);
        young.tick(&ctx, dt);
        old.tick(&ctx, dt);
        let (y, o) = (young.snapshot(), old.snapshot());
        for ((b, ym), om) in before.mood_vector.iter().zip(&y.mood_vector).zip(&o.mood_vector) {
            let dy = (ym.intensity - b.intensity).abs();
            let dold = (om.intensity - b.intensity).abs();
            prop_assert!(dold <= dy + 1e-6, "{}: old {} > young {}", b.name, dold, dy);
        }
    }
}

// ============================================================================
// Emotion invariants
// ============================================================================

proptest! {
    /// Repeating a stimulus with no time in between never hits harder.
    #[test]
    fn habituation_never_increases_impulse(
        event in 0..EVENTS.len(),
        repeats in 2usize..12,
        age in 0.0f64..500.0,
    ) {
        let mut engine = engine_at(age);
        let mut last = f32::INFINITY;
        for _ in 0..repeats {
            let r = engine.trigger(EVENTS[event]).unwrap();
            prop_assert!(r.impulse <= last + 1e-6, "impulse rose: {} > {}", r.impulse, last);
            prop_assert!(r.intensity <= 1.0);
            last = r.impulse;
        }
    }

    /// Every instance fades in finite time and is archived exactly once;
    /// history never exceeds its capacity.
    #[test]
    fn emotions_fade_into_bounded_history(
        events in prop::collection::vec(0..EVENTS.len(), 1..8),
        capacity in 1usize..5,
    ) {
        let mut cfg = EngineConfig::default();
        cfg.emotion_dynamics.history_capacity = capacity;
        // Only the fired stimuli should reach history
        cfg.mood_dynamics.transition_strength = 0.0;
        let mut engine = Engine::new(cfg).unwrap();
        let mut fired = 0usize;
        for e in events {
            prop_assert!(engine.trigger(EVENTS[e]).is_some());
            fired += 1;
            let mut ticks = 0;
            while !engine.snapshot().active_emotions.is_empty() {
                engine.tick(&Context::new(), 1.0);
                ticks += 1;
                prop_assert!(ticks < 10_000, "emotion never faded");
            }
            let history = engine.snapshot().emotion_history;
            prop_assert_eq!(history.len(), fired.min(capacity));
        }
        // Quiet ticks archive nothing further
        let len = engine.snapshot().emotion_history.len();
        for _ in 0..50 {
            engine.tick(&Context::new(), 1.0);
        }
        prop_assert_eq!(engine.snapshot().emotion_history.len(), len);
    }
}
