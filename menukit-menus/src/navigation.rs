//! Head transitions and the controls exposed at each head.

use crate::signal::{ControlSignal, ORDINAL_SLOTS};

/// Next head for a navigation signal, or `None` when `signal` does not move the head.
///
/// Clamps at both ends, so moving past a boundary is a no-op.
pub fn next_head(head: usize, signal: ControlSignal, page_count: usize) -> Option<usize> {
    let last = page_count.max(1) - 1;
    let head = head.min(last);

    match signal {
        ControlSignal::First => Some(0),
        ControlSignal::Prev => Some(head.saturating_sub(1)),
        ControlSignal::Next => Some((head + 1).min(last)),
        ControlSignal::Last => Some(last),
        ControlSignal::Pause
        | ControlSignal::Close
        | ControlSignal::Select(_)
        | ControlSignal::Confirm
        | ControlSignal::Deny => None,
    }
}

/// Controls of an arrow menu at `head`.
///
/// First shows from the third page on, since Prev already reaches the first page from the
/// second. Last mirrors it at the other end.
pub fn navigation_signals(head: usize, page_count: usize) -> Vec<ControlSignal> {
    let mut signals = Vec::with_capacity(6);
    if head >= 2 {
        signals.push(ControlSignal::First);
    }
    if head >= 1 {
        signals.push(ControlSignal::Prev);
    }
    if head + 1 < page_count {
        signals.push(ControlSignal::Next);
    }
    if head + 2 < page_count {
        signals.push(ControlSignal::Last);
    }
    signals.push(ControlSignal::Pause);
    signals.push(ControlSignal::Close);
    signals
}

/// Controls of a multichoice page with `slots` options.
///
/// Cross-page arrows appear only when there is more than one page.
pub fn choice_signals(head: usize, slots: usize, page_count: usize) -> Vec<ControlSignal> {
    let multiple = page_count > 1;
    let mut signals = Vec::with_capacity(ORDINAL_SLOTS + 5);

    if multiple && head > 0 {
        signals.extend([ControlSignal::First, ControlSignal::Prev]);
    }
    signals.extend((0..slots.min(ORDINAL_SLOTS)).filter_map(ControlSignal::select));
    if multiple && head + 1 < page_count {
        signals.extend([ControlSignal::Next, ControlSignal::Last]);
    }
    signals.push(ControlSignal::Close);
    signals
}
