//! The stock personality catalog.
//!
//! Trait, mood and emotion names are configuration, not code: these tables
//! are only what [`EngineConfig::default`](crate::EngineConfig) ships with.
//! Context signals understood by the defaults: `heat`, `chill`, `idle`,
//! `talking`, `playing`, `novelty`, `threat`.

use crate::config::{
    EmotionKindConfig, EventCandidate, EventConfig, FacetConfig, HabituationConfig, MoodConfig,
    TraitConfig,
};
use std::collections::BTreeMap;

fn map(entries: &[(&str, f32)]) -> BTreeMap<String, f32> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn facet(name: &str, weight: f32, stability: f32, signals: &[(&str, f32)]) -> FacetConfig {
    FacetConfig {
        name: name.to_string(),
        weight,
        stability,
        signals: map(signals),
    }
}

fn trait_cfg(
    name: &str,
    core: f32,
    facets: Vec<FacetConfig>,
    affinity: &[(&str, f32)],
    (rise, fall): (f32, f32),
) -> TraitConfig {
    TraitConfig {
        name: name.to_string(),
        core,
        facets,
        emotion_affinity: map(affinity),
        rise,
        fall,
    }
}

pub(crate) fn traits() -> Vec<TraitConfig> {
    vec![
        trait_cfg(
            "socialness",
            0.6,
            vec![
                facet("friendliness", 0.4, 0.9, &[("talking", 0.5)]),
                facet("assertiveness", 0.3, 0.7, &[("threat", -0.3)]),
                facet("gregariousness", 0.3, 0.6, &[("talking", 0.8), ("idle", -0.4)]),
            ],
            &[("proud", 0.6), ("grateful", 0.5), ("lonely", -0.5), ("delighted", 0.3)],
            (0.8, 1.2),
        ),
        trait_cfg(
            "playfulness",
            0.6,
            vec![
                facet("humor", 0.5, 0.8, &[("playing", 0.6)]),
                facet("spontaneity", 0.5, 0.6, &[("playing", 0.8), ("novelty", 0.4)]),
            ],
            &[("delighted", 0.7), ("surprised", 0.3), ("lonely", -0.3), ("sad", -0.3)],
            (1.0, 1.0),
        ),
        trait_cfg(
            "curiosity",
            0.65,
            vec![
                facet("openness", 0.6, 0.8, &[("novelty", 0.6)]),
                facet("imagination", 0.4, 0.7, &[("novelty", 0.8), ("idle", 0.2)]),
            ],
            &[("surprised", 0.5), ("hopeful", 0.3), ("afraid", -0.3)],
            (1.0, 1.1),
        ),
        trait_cfg(
            "happiness",
            0.6,
            vec![
                facet("optimism", 0.5, 0.85, &[("threat", -0.4)]),
                facet("cheerfulness", 0.5, 0.6, &[("playing", 0.5), ("talking", 0.3), ("heat", -0.2)]),
            ],
            &[
                ("delighted", 0.9),
                ("proud", 0.5),
                ("grateful", 0.5),
                ("relieved", 0.4),
                ("sad", -0.7),
                ("angry", -0.4),
            ],
            // easier to lose than to regain
            (0.7, 1.5),
        ),
        trait_cfg(
            "grumpiness",
            0.3,
            vec![
                facet("irritability", 0.7, 0.7, &[("heat", 0.5), ("threat", 0.4)]),
                facet("pessimism", 0.3, 0.85, &[("threat", 0.3)]),
            ],
            &[("angry", 0.8), ("disgusted", 0.5), ("sad", 0.4), ("delighted", -0.4)],
            (1.3, 0.8),
        ),
        trait_cfg(
            "energy",
            0.6,
            vec![
                facet("vitality", 0.6, 0.8, &[("playing", 0.4), ("heat", -0.4), ("idle", -0.2)]),
                facet("restlessness", 0.4, 0.6, &[("idle", 0.5), ("novelty", 0.3)]),
            ],
            &[("delighted", 0.5), ("surprised", 0.5), ("calm", -0.3), ("sad", -0.4)],
            (0.8, 1.2),
        ),
        trait_cfg(
            "sensitivity",
            0.5,
            vec![
                facet("anxiety", 0.6, 0.5, &[("threat", 0.8), ("chill", 0.2)]),
                facet("empathy", 0.4, 0.8, &[("talking", 0.3)]),
            ],
            &[("afraid", 0.7), ("ashamed", 0.5), ("lonely", 0.5), ("calm", -0.4)],
            // anxiety comes more easily than it leaves
            (1.5, 0.7),
        ),
        trait_cfg(
            "quirkiness",
            0.5,
            vec![
                facet("eccentricity", 0.7, 0.7, &[("novelty", 0.5)]),
                facet("creativity", 0.3, 0.8, &[("playing", 0.4), ("novelty", 0.4)]),
            ],
            &[("surprised", 0.5), ("delighted", 0.3)],
            (1.2, 0.8),
        ),
    ]
}

fn mood(
    name: &str,
    valence: f32,
    baseline: f32,
    inertia: f32,
    traits: &[(&str, f32)],
    signals: &[(&str, f32)],
) -> MoodConfig {
    MoodConfig {
        name: name.to_string(),
        valence,
        baseline,
        inertia,
        transition_emotion: transition_for(name).map(str::to_string),
        traits: map(traits),
        signals: map(signals),
    }
}

/// Emotion a mood stirs up when it becomes dominant.
fn transition_for(mood: &str) -> Option<&'static str> {
    let kind = match mood {
        "happy" => "delighted",
        "content" => "relieved",
        "excited" | "curious" => "surprised",
        "neutral" | "sleepy" => "calm",
        "bored" | "cold" => "lonely",
        "sad" | "anxious" => "afraid",
        "confused" => "ashamed",
        "hot" => "angry",
        _ => return None,
    };
    Some(kind)
}

/// Listed in dominance tie-break priority.
pub(crate) fn moods() -> Vec<MoodConfig> {
    vec![
        mood(
            "happy",
            0.8,
            0.1,
            0.35,
            &[("happiness", 0.8), ("energy", 0.3), ("socialness", 0.2), ("grumpiness", -0.3)],
            &[("playing", 0.4)],
        ),
        mood(
            "content",
            0.6,
            0.1,
            0.2,
            &[("happiness", 0.6), ("energy", 0.3), ("socialness", 0.3), ("grumpiness", -0.2)],
            &[("talking", 0.3), ("threat", -0.5)],
        ),
        mood(
            "excited",
            0.7,
            0.1,
            0.4,
            &[("playfulness", 0.7), ("energy", 0.5), ("happiness", 0.3), ("grumpiness", -0.2)],
            &[("playing", 0.6), ("novelty", 0.4)],
        ),
        mood(
            "curious",
            0.3,
            0.1,
            0.3,
            &[("curiosity", 0.8), ("energy", 0.2), ("playfulness", 0.2), ("sensitivity", -0.2)],
            &[("novelty", 0.7)],
        ),
        mood("neutral", 0.0, 0.5, 0.15, &[], &[]),
        mood(
            "bored",
            -0.3,
            0.1,
            0.2,
            &[("curiosity", -0.8), ("energy", -0.3), ("playfulness", -0.3), ("happiness", -0.2)],
            &[("idle", 0.6), ("novelty", -0.5)],
        ),
        mood(
            "sleepy",
            -0.1,
            0.1,
            0.1,
            &[("energy", -1.0), ("happiness", -0.2), ("playfulness", -0.2)],
            &[("idle", 0.3), ("heat", 0.2)],
        ),
        mood(
            "sad",
            -0.8,
            0.1,
            0.15,
            &[("grumpiness", 0.7), ("sensitivity", 0.4), ("happiness", -0.4), ("energy", -0.2)],
            &[],
        ),
        mood(
            "anxious",
            -0.6,
            0.1,
            0.3,
            &[("sensitivity", 0.8), ("grumpiness", 0.3), ("energy", -0.2), ("happiness", -0.2)],
            &[("threat", 0.8)],
        ),
        mood(
            "confused",
            -0.2,
            0.1,
            0.25,
            &[("quirkiness", 0.8), ("curiosity", 0.4), ("happiness", -0.2)],
            &[("novelty", 0.3)],
        ),
        mood(
            "hot",
            -0.3,
            0.1,
            0.1,
            &[("energy", -0.2), ("grumpiness", 0.2)],
            &[("heat", 1.0)],
        ),
        mood(
            "cold",
            -0.3,
            0.1,
            0.1,
            &[("energy", -0.2), ("sensitivity", 0.2)],
            &[("chill", 1.0)],
        ),
    ]
}

fn emotion(
    name: &str,
    valence: f32,
    decay_rate: f32,
    moods: &[(&str, f32)],
    trait_bias: &[(&str, f32)],
) -> EmotionKindConfig {
    EmotionKindConfig {
        name: name.to_string(),
        valence,
        decay_rate,
        moods: map(moods),
        trait_bias: map(trait_bias),
        habituation: HabituationConfig::default(),
    }
}

pub(crate) fn emotions() -> Vec<EmotionKindConfig> {
    vec![
        emotion(
            "surprised",
            0.1,
            0.5,
            &[("excited", 0.6), ("curious", 0.5), ("confused", 0.4), ("neutral", -0.4)],
            &[("curiosity", 0.5), ("quirkiness", 0.3)],
        ),
        emotion(
            "angry",
            -0.8,
            0.25,
            &[("anxious", 0.4), ("sad", 0.3), ("happy", -0.6), ("content", -0.5), ("neutral", -0.4)],
            &[("grumpiness", 0.7), ("socialness", 0.3)],
        ),
        emotion(
            "afraid",
            -0.7,
            0.3,
            &[("anxious", 1.0), ("sad", 0.3), ("happy", -0.5), ("content", -0.5), ("neutral", -0.4)],
            &[("sensitivity", 0.8), ("grumpiness", 0.3)],
        ),
        emotion(
            "delighted",
            0.9,
            0.2,
            &[
                ("happy", 1.0),
                ("excited", 0.5),
                ("content", 0.4),
                ("neutral", -0.6),
                ("sad", -0.5),
                ("bored", -0.3),
            ],
            &[("happiness", 0.7), ("playfulness", 0.3)],
        ),
        emotion(
            "disgusted",
            -0.6,
            0.3,
            &[("sad", 0.4), ("anxious", 0.3), ("happy", -0.5), ("neutral", -0.3)],
            &[("grumpiness", 0.5), ("sensitivity", 0.2)],
        ),
        emotion(
            "proud",
            0.7,
            0.15,
            &[("happy", 0.7), ("content", 0.6), ("excited", 0.3), ("sad", -0.4), ("neutral", -0.4)],
            &[("socialness", 0.5), ("happiness", 0.3)],
        ),
        emotion(
            "ashamed",
            -0.6,
            0.2,
            &[("sad", 0.6), ("anxious", 0.5), ("confused", 0.3), ("happy", -0.5), ("neutral", -0.3)],
            &[("sensitivity", 0.5)],
        ),
        emotion(
            "relieved",
            0.6,
            0.25,
            &[("content", 0.8), ("happy", 0.4), ("anxious", -0.6), ("neutral", -0.2)],
            &[("happiness", 0.5)],
        ),
        emotion(
            "hopeful",
            0.6,
            0.12,
            &[("happy", 0.5), ("content", 0.4), ("curious", 0.3), ("sad", -0.4)],
            &[("happiness", 0.8)],
        ),
        emotion(
            "jealous",
            -0.5,
            0.15,
            &[("anxious", 0.5), ("sad", 0.4), ("content", -0.5)],
            &[("sensitivity", 0.4), ("energy", 0.3)],
        ),
        emotion(
            "grateful",
            0.8,
            0.15,
            &[("content", 0.7), ("happy", 0.6), ("sad", -0.3), ("neutral", -0.3)],
            &[("socialness", 0.6), ("sensitivity", 0.3)],
        ),
        emotion(
            "lonely",
            -0.6,
            0.1,
            &[("sad", 0.8), ("bored", 0.4), ("content", -0.5), ("happy", -0.4)],
            &[("socialness", -0.7)],
        ),
        emotion(
            "calm",
            0.3,
            0.1,
            &[("content", 0.6), ("neutral", 0.5), ("sleepy", 0.2), ("anxious", -0.5), ("excited", -0.3)],
            &[("happiness", 0.3), ("sensitivity", -0.7)],
        ),
        emotion(
            "sad",
            -0.8,
            0.08,
            &[("sad", 1.0), ("sleepy", 0.3), ("happy", -0.7), ("excited", -0.4), ("neutral", -0.3)],
            &[("happiness", -0.6), ("sensitivity", 0.4)],
        ),
    ]
}

fn event(name: &str, intensity: f32, candidates: &[(&str, f32)]) -> EventConfig {
    EventConfig {
        name: name.to_string(),
        intensity,
        candidates: candidates
            .iter()
            .map(|(kind, weight)| EventCandidate {
                kind: kind.to_string(),
                weight: *weight,
            })
            .collect(),
    }
}

pub(crate) fn events() -> Vec<EventConfig> {
    vec![
        event("praise", 0.7, &[("delighted", 0.8), ("proud", 0.6), ("grateful", 0.4)]),
        event("compliment", 0.6, &[("proud", 0.8), ("delighted", 0.5)]),
        event("success", 0.7, &[("delighted", 0.8), ("proud", 0.7), ("relieved", 0.3)]),
        event("support", 0.6, &[("grateful", 0.8), ("relieved", 0.4)]),
        event("reassurance", 0.5, &[("calm", 0.7), ("relieved", 0.6)]),
        event("surprise", 0.8, &[("surprised", 1.0)]),
        event("insult", 0.7, &[("angry", 0.8), ("ashamed", 0.4), ("sad", 0.3)]),
        event("threat", 0.8, &[("afraid", 0.9), ("angry", 0.3)]),
        event("failure", 0.6, &[("ashamed", 0.7), ("sad", 0.5), ("angry", 0.2)]),
        event("loss", 0.7, &[("sad", 0.9), ("lonely", 0.4)]),
        event("rejection", 0.7, &[("lonely", 0.8), ("sad", 0.5), ("angry", 0.3)]),
    ]
}
