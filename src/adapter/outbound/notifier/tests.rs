use crate::domain::AssetSymbol;
use crate::port::{
    outbound::notifier::ErrorEvent, outbound::notifier::Event, outbound::notifier::LogNotifier,
    outbound::notifier::Notifier, outbound::notifier::NotifierRegistry,
    outbound::notifier::NullNotifier,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingNotifier {
    count: Arc<AtomicUsize>,
}

impl Notifier for CountingNotifier {
    fn notify(&self, _event: Event) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

fn price_error() -> Event {
    Event::PriceUnavailable(ErrorEvent {
        asset: AssetSymbol::new("ETH").unwrap(),
        reason: "timeout".into(),
    })
}

#[test]
fn test_registry_notify_all() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut registry = NotifierRegistry::new();

    registry.register(Box::new(CountingNotifier {
        count: count.clone(),
    }));
    registry.register(Box::new(CountingNotifier {
        count: count.clone(),
    }));

    registry.notify_all(price_error());

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_null_and_log_notifiers_accept_events() {
    NullNotifier.notify(price_error());
    LogNotifier.notify(price_error());
}

#[test]
fn test_registry_len_and_is_empty() {
    let mut registry = NotifierRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);

    registry.register(Box::new(NullNotifier));
    assert!(!registry.is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_price_error_subject_and_body() {
    let event = price_error();
    assert_eq!(event.subject(), "ETH-Bot Price Error");
    assert!(event.body().contains("timeout"));
}
