use std::sync::Arc;

use chrono::{DateTime, Utc};
use cryptodip::adapter::outbound::memory::MemoryStore;
use cryptodip::application::{BotSettings, DipEngine};
use cryptodip::port::{NotifierRegistry, PriceStore};
use cryptodip::testkit::clock::ManualClock;
use cryptodip::testkit::domain::{asset, utc};
use cryptodip::testkit::gateway::ScriptedGateway;
use cryptodip::testkit::notifier::RecordingNotifier;

/// An engine wired to test doubles, with handles to every double.
pub struct TestBot<S: PriceStore> {
    pub engine: DipEngine<S>,
    pub store: Arc<S>,
    pub gateway: Arc<ScriptedGateway>,
    pub clock: Arc<ManualClock>,
    pub alerts: RecordingNotifier,
}

pub fn start_time() -> DateTime<Utc> {
    utc(2024, 3, 1, 12)
}

pub fn memory_bot(settings: BotSettings) -> TestBot<MemoryStore> {
    bot_with_store(settings, Arc::new(MemoryStore::new(asset("BTC"))))
}

pub fn bot_with_store<S: PriceStore>(settings: BotSettings, store: Arc<S>) -> TestBot<S> {
    let gateway = Arc::new(ScriptedGateway::new());
    let clock = Arc::new(ManualClock::new(start_time()));
    let alerts = RecordingNotifier::new();

    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(alerts.clone()));

    let engine = DipEngine::new(
        settings,
        Arc::clone(&store),
        gateway.clone(),
        Arc::new(registry),
        clock.clone(),
    );

    TestBot {
        engine,
        store,
        gateway,
        clock,
        alerts,
    }
}
