//! Host adapter around an [`Engine`].
//!
//! The LimbicSystem owns the engine and is the only thing that mutates it:
//! - a heartbeat task ticks it with the current context
//! - stimuli arrive over a channel and are applied between ticks; the sender
//!   is acknowledged only after the resulting snapshot has been published
//! - every change is published as an [`AgentSnapshot`] on a watch channel
//!
//! Observers only ever see snapshots.

use crate::heartbeat::HeartbeatConfig;
use anima_core::{AgentSnapshot, ConfigError, Context, Engine, EngineConfig, Reaction, Stimulus};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch, RwLock};
use tokio::task::JoinHandle;

pub struct LimbicSystem {
    /// The engine (protected by RwLock for the heartbeat and manual ticks)
    engine: Arc<RwLock<Engine>>,

    /// Context applied on every heartbeat until replaced
    context: Arc<RwLock<Context>>,

    /// Channel to send stimuli, each with a reply slot for its reaction
    stimulus_tx: mpsc::Sender<QueuedStimulus>,

    /// Watch channel for snapshots (observers subscribe to this)
    snapshot_tx: watch::Sender<AgentSnapshot>,

    /// Receiver for snapshots (cloneable)
    snapshot_rx: watch::Receiver<AgentSnapshot>,

    heartbeat_config: HeartbeatConfig,

    heartbeat: Option<JoinHandle<()>>,
}

type QueuedStimulus = (Stimulus, oneshot::Sender<Option<Reaction>>);

impl LimbicSystem {
    /// Create a system with the default catalog and heartbeat.
    /// Must be called from within a tokio runtime.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(EngineConfig::default(), HeartbeatConfig::default())
    }

    pub fn with_config(
        config: EngineConfig,
        heartbeat_config: HeartbeatConfig,
    ) -> Result<Self, ConfigError> {
        heartbeat_config.validate()?;
        let engine = Engine::new(config)?;
        let (stimulus_tx, stimulus_rx) = mpsc::channel(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        let mut system = Self {
            engine: Arc::new(RwLock::new(engine)),
            context: Arc::new(RwLock::new(Context::new())),
            stimulus_tx,
            snapshot_tx,
            snapshot_rx,
            heartbeat_config,
            heartbeat: None,
        };

        system.heartbeat = Some(system.spawn_heartbeat(stimulus_rx));
        Ok(system)
    }

    /// Spawn the background heartbeat task
    fn spawn_heartbeat(&self, mut stimulus_rx: mpsc::Receiver<QueuedStimulus>) -> JoinHandle<()> {
        let engine = Arc::clone(&self.engine);
        let context = Arc::clone(&self.context);
        let snapshot_tx = self.snapshot_tx.clone();
        let config = self.heartbeat_config.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.interval);
            tracing::info!(
                interval_ms = config.interval.as_millis() as u64,
                dt = config.dt,
                "Heartbeat started"
            );

            loop {
                tokio::select! {
                    // Regular heartbeat
                    _ = interval.tick() => {
                        let ctx = context.read().await.clone();
                        let mut guard = engine.write().await;
                        guard.tick(&ctx, config.dt);
                        let _ = snapshot_tx.send(guard.snapshot());
                    }

                    // External stimulus received
                    received = stimulus_rx.recv() => {
                        let Some((stimulus, reply)) = received else {
                            tracing::info!("Stimulus channel closed, heartbeat stopped");
                            break;
                        };
                        let mut guard = engine.write().await;
                        let name = stimulus.name.clone();
                        let reaction = guard.trigger(stimulus);
                        match &reaction {
                            Some(r) => tracing::trace!(
                                "Processed stimulus {}: {} at {:.2}",
                                name, r.kind, r.intensity
                            ),
                            None => tracing::trace!("Stimulus {} had no effect", name),
                        }
                        let _ = snapshot_tx.send(guard.snapshot());
                        drop(guard);
                        // The sender may have given up waiting
                        let _ = reply.send(reaction);
                    }
                }
            }
        })
    }

    /// Hand a stimulus to the heartbeat task and wait until it has been
    /// applied and published, so the next [`snapshot`](Self::snapshot)
    /// reflects it. Returns the reaction, `None` when nothing fired.
    pub async fn receive_stimulus(
        &self,
        stimulus: impl Into<Stimulus>,
    ) -> anyhow::Result<Option<Reaction>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.stimulus_tx
            .send((stimulus.into(), reply_tx))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send stimulus: {}", e))?;
        reply_rx
            .await
            .map_err(|e| anyhow::anyhow!("Heartbeat dropped stimulus: {}", e))
    }

    /// Replace the context used by subsequent heartbeats
    pub async fn set_context(&self, context: Context) {
        *self.context.write().await = context;
    }

    pub async fn context(&self) -> Context {
        self.context.read().await.clone()
    }

    /// Tick immediately with an explicit `dt`, outside the heartbeat
    pub async fn tick_now(&self, dt: f64) -> AgentSnapshot {
        let ctx = self.context.read().await.clone();
        let mut guard = self.engine.write().await;
        guard.tick(&ctx, dt);
        let snapshot = guard.snapshot();
        let _ = self.snapshot_tx.send(snapshot.clone());
        snapshot
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> AgentSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Latest published snapshot as JSON
    pub fn snapshot_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(&*self.snapshot_rx.borrow())?)
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<AgentSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn heartbeat_config(&self) -> &HeartbeatConfig {
        &self.heartbeat_config
    }
}

impl Drop for LimbicSystem {
    fn drop(&mut self) {
        if let Some(handle) = self.heartbeat.take() {
            handle.abort();
            tracing::info!("Heartbeat stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn slow_system() -> LimbicSystem {
        // Heartbeat far slower than any test, so only manual ticks advance state
        let hb = HeartbeatConfig {
            interval: Duration::from_secs(3600),
            dt: 1.0,
        };
        LimbicSystem::with_config(EngineConfig::default(), hb).unwrap()
    }

    #[tokio::test]
    async fn test_limbic_system_creation() {
        let limbic = LimbicSystem::new().unwrap();
        let snap = limbic.snapshot();
        assert_eq!(snap.traits.len(), anima_core::TRAIT_COUNT);
        assert_eq!(snap.mood_vector.len(), anima_core::MOOD_COUNT);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.traits.clear();
        assert!(LimbicSystem::with_config(cfg, HeartbeatConfig::testing()).is_err());
    }

    #[tokio::test]
    async fn test_stimulus_visible_in_next_snapshot() {
        let limbic = slow_system();
        let reaction = limbic.receive_stimulus("praise").await.unwrap();
        assert_eq!(reaction.map(|r| r.kind).as_deref(), Some("delighted"));

        let snap = limbic.snapshot();
        assert!(
            snap.emotion("delighted").is_some(),
            "praise should be visible in the published snapshot"
        );
    }

    #[tokio::test]
    async fn test_unknown_stimulus_still_acknowledged() {
        let limbic = slow_system();
        let reaction = limbic.receive_stimulus("tickle").await.unwrap();
        assert!(reaction.is_none());
        assert_eq!(limbic.snapshot().ignored_signals, 1);
    }

    #[tokio::test]
    async fn test_invalid_heartbeat_rejected() {
        let zero = HeartbeatConfig {
            interval: Duration::ZERO,
            dt: 0.1,
        };
        assert!(matches!(
            LimbicSystem::with_config(EngineConfig::default(), zero),
            Err(ConfigError::NonPositive { .. })
        ));

        let backwards = HeartbeatConfig {
            interval: Duration::from_millis(100),
            dt: -1.0,
        };
        assert!(LimbicSystem::with_config(EngineConfig::default(), backwards).is_err());
    }

    #[tokio::test]
    async fn test_tick_now_advances_age() {
        let limbic = slow_system();
        // interval() fires once immediately; let that zero-length tick pass
        sleep(Duration::from_millis(20)).await;
        let age0 = limbic.snapshot().age;
        let snap = limbic.tick_now(2.0).await;
        assert!((snap.age - age0 - 2.0).abs() < 1e-6);
        assert_eq!(limbic.snapshot(), snap);
    }

    #[tokio::test]
    async fn test_context_applies_on_tick() {
        let limbic = slow_system();
        limbic
            .set_context(Context::new().with("heat", 1.0))
            .await;
        assert_eq!(limbic.context().await.get("heat"), Some(1.0));
        let before = limbic.snapshot().mood_intensity("hot").unwrap();
        let mut after = before;
        for _ in 0..5 {
            after = limbic.tick_now(1.0).await.mood_intensity("hot").unwrap();
        }
        assert!(after > before);
    }

    #[tokio::test]
    async fn test_heartbeat_publishes() {
        let limbic =
            LimbicSystem::with_config(EngineConfig::default(), HeartbeatConfig::testing()).unwrap();
        let mut rx = limbic.subscribe();
        tokio::time::timeout(Duration::from_secs(2), rx.changed())
            .await
            .expect("heartbeat should publish")
            .unwrap();
        sleep(Duration::from_millis(50)).await;
        assert!(limbic.snapshot().tick > 0);
    }

    #[tokio::test]
    async fn test_snapshot_json() {
        let limbic = slow_system();
        let json = limbic.snapshot_json().unwrap();
        let parsed: AgentSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.dominant_mood, "neutral");
    }
}
