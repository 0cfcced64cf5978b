//! Personality: eight traits with a slow core, a responsive plastic layer
//! and weighted facets.
//!
//! Per tick, each trait gathers influences from the context signals its
//! facets listen to and from active emotions it has an affinity for. The
//! plastic value moves with that drive and is pulled back toward the core
//! (elastic regression). The core only follows once the plastic value has
//! stayed on one side of it for longer than `persistence`, and then at
//! `core_rate`, which is always slower than `plastic_rate`.
//!
//! All movement is multiplied by the volatility scale, so an older agent's
//! personality moves less for the same input.

use crate::catalog::Catalog;
use crate::config::{TraitConfig, TraitDynamicsConfig};
use crate::context::Context;
use crate::fuzzy::{combine, Influence};
use crate::snapshot::{FacetReading, TraitReading};
use crate::state::{approach_fraction, bounded_step, sanitize_f32};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
struct Facet {
    name: String,
    weight: f32,
    stability: f32,
    value: f32,
    signals: Vec<(String, f32)>,
}

#[derive(Debug, Clone)]
struct Trait {
    name: String,
    core: f32,
    plastic: f32,
    facets: Vec<Facet>,
    /// (emotion kind index, signed affinity)
    affinity: Vec<(usize, f32)>,
    rise: f32,
    fall: f32,
    /// How long the plastic value has stayed on `deviation_sign`'s side of core.
    deviation_time: f32,
    deviation_sign: i8,
}

impl Trait {
    fn facet_mean(&self) -> f32 {
        let total: f32 = self.facets.iter().map(|f| f.weight).sum();
        if total <= 0.0 {
            return self.core;
        }
        self.facets.iter().map(|f| f.weight * f.value).sum::<f32>() / total
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TraitModel {
    traits: Vec<Trait>,
    dynamics: TraitDynamicsConfig,
}

impl TraitModel {
    pub(crate) fn new(
        configs: &[TraitConfig],
        dynamics: &TraitDynamicsConfig,
        catalog: &Catalog,
    ) -> Self {
        let traits = configs
            .iter()
            .map(|t| Trait {
                name: t.name.clone(),
                core: t.core,
                plastic: t.core,
                facets: t
                    .facets
                    .iter()
                    .map(|f| Facet {
                        name: f.name.clone(),
                        weight: f.weight,
                        stability: f.stability,
                        value: t.core,
                        signals: f.signals.iter().map(|(s, w)| (s.clone(), *w)).collect(),
                    })
                    .collect(),
                affinity: t
                    .emotion_affinity
                    .iter()
                    .filter_map(|(kind, w)| catalog.emotions.get(kind).map(|idx| (idx, *w)))
                    .collect(),
                rise: t.rise,
                fall: t.fall,
                deviation_time: 0.0,
                deviation_sign: 0,
            })
            .collect();

        Self {
            traits,
            dynamics: dynamics.clone(),
        }
    }

    /// Jitter starting core and facet values deterministically from `seed`.
    pub(crate) fn randomize(&mut self, seed: u64, spread: f32) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (lower, upper) = (self.dynamics.lower, self.dynamics.upper);
        let range = upper - lower;
        for t in &mut self.traits {
            t.core = (t.core + rng.gen_range(-spread..=spread) * range).clamp(lower, upper);
            t.plastic = t.core;
            let half = spread / 2.0;
            for f in &mut t.facets {
                f.value = (t.core + rng.gen_range(-half..=half) * range).clamp(lower, upper);
            }
        }
        tracing::debug!(seed, spread, "Randomized starting traits");
    }

    /// Every context signal some facet listens to.
    pub(crate) fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.traits
            .iter()
            .flat_map(|t| t.facets.iter())
            .flat_map(|f| f.signals.iter().map(|(s, _)| s.as_str()))
    }

    /// Advance every trait by `dt`.
    ///
    /// `signals` must already be sanitized (finite, clamped to 0-1).
    /// `emotions` is indexed by emotion kind.
    pub(crate) fn update(&mut self, signals: &Context, emotions: &[f32], dt: f32, volatility: f32) {
        if dt <= 0.0 {
            return;
        }
        let d = &self.dynamics;
        let (lower, upper) = (d.lower, d.upper);
        let regression = approach_fraction(d.elasticity, dt) * volatility;

        for t in &mut self.traits {
            let mut influences = Vec::new();
            for facet in &t.facets {
                for (signal, w) in &facet.signals {
                    if let Some(s) = signals.get(signal) {
                        influences.push(Influence::certain(w.signum() * s, w.abs() * facet.weight));
                    }
                }
            }
            for &(kind, a) in &t.affinity {
                let intensity = emotions.get(kind).copied().unwrap_or(0.0);
                if intensity > 0.0 {
                    influences.push(Influence::new(
                        a.signum() * intensity,
                        a.abs(),
                        d.emotion_confidence,
                    ));
                }
            }

            // Plastic: pushed by the drive, pulled back toward core
            let drive = combine(influences, Some(1.0));
            let p0 = t.plastic;
            let push = bounded_step(
                drive * d.plastic_rate * dt * volatility,
                p0,
                lower,
                upper,
                t.rise,
                t.fall,
            );
            let pull = (t.core - p0) * regression;
            t.plastic = sanitize_f32(p0 + push + pull, t.core).clamp(lower, upper);

            // Facets: same rule on their own signals, damped by stability
            for f in &mut t.facets {
                let drive = combine(
                    f.signals.iter().filter_map(|(signal, w)| {
                        signals
                            .get(signal)
                            .map(|s| Influence::certain(w.signum() * s, w.abs()))
                    }),
                    Some(1.0),
                );
                let v0 = f.value;
                let push = bounded_step(
                    drive * d.facet_rate * (1.0 - f.stability) * dt * volatility,
                    v0,
                    lower,
                    upper,
                    t.rise,
                    t.fall,
                );
                let pull = (t.core - v0) * regression;
                f.value = sanitize_f32(v0 + push + pull, t.core).clamp(lower, upper);
            }

            // Core: follows only a persistent, one-sided deviation
            let deviation = t.plastic - t.core;
            let sign: i8 = if deviation.abs() > d.deviation_threshold {
                if deviation > 0.0 {
                    1
                } else {
                    -1
                }
            } else {
                0
            };
            if sign != 0 && sign == t.deviation_sign {
                t.deviation_time += dt;
            } else {
                t.deviation_sign = sign;
                t.deviation_time = if sign != 0 { dt } else { 0.0 };
            }
            if sign != 0 && t.deviation_time >= d.persistence {
                let old = t.core;
                t.core += deviation * approach_fraction(d.core_rate, dt) * volatility;
                t.core = sanitize_f32(t.core, old).clamp(lower, upper);
                tracing::trace!(
                    trait_name = %t.name,
                    from = old,
                    to = t.core,
                    "Core drifted after persistent deviation"
                );
            }
        }
    }

    pub(crate) fn effective(&self, idx: usize) -> f32 {
        let d = &self.dynamics;
        let t = &self.traits[idx];
        let total = d.core_weight + d.plastic_weight + d.facet_weight;
        let v = (d.core_weight * t.core + d.plastic_weight * t.plastic + d.facet_weight * t.facet_mean())
            / total;
        v.clamp(d.lower, d.upper)
    }

    /// Effective trait levels mapped onto 0-1, indexed like the catalog.
    pub(crate) fn normalized(&self) -> Vec<f32> {
        let range = self.dynamics.upper - self.dynamics.lower;
        (0..self.traits.len())
            .map(|i| ((self.effective(i) - self.dynamics.lower) / range).clamp(0.0, 1.0))
            .collect()
    }

    pub(crate) fn readings(&self) -> Vec<TraitReading> {
        self.traits
            .iter()
            .enumerate()
            .map(|(i, t)| TraitReading {
                name: t.name.clone(),
                core: t.core,
                plastic: t.plastic,
                effective: self.effective(i),
                facets: t
                    .facets
                    .iter()
                    .map(|f| FacetReading {
                        name: f.name.clone(),
                        value: f.value,
                    })
                    .collect(),
            })
            .collect()
    }
}
