//! Message formatting for Telegram notifications.

use crate::port::outbound::notifier::Event;

/// Telegram rejects messages longer than this many characters.
const MAX_MESSAGE_CHARS: usize = 4096;

/// Render an event as a plain text Telegram message.
pub fn format_event_message(event: &Event) -> String {
    let emoji = match event {
        Event::BotStarted(_) => "🚀",
        Event::PriceUnavailable(_) | Event::BalanceUnavailable(_) => "⚠️",
        Event::InsufficientFunds(_) => "💸",
        Event::PurchaseAttempted(e) if e.success => "✅",
        Event::PurchaseAttempted(_) => "❌",
    };

    let text = format!("{emoji} {}\n\n{}", event.subject(), event.body());
    truncate(&text, MAX_MESSAGE_CHARS)
}

/// Truncate to at most `max_chars` characters, marking the cut with "…".
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
