//! Control signals and the reaction tokens that carry them.

/// Discrete control accepted by a menu session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ControlSignal {
    First,
    Prev,
    Next,
    Last,
    Pause,
    Close,
    /// 0-based slot on the current page, `0..=9`.
    Select(u8),
    Confirm,
    Deny,
}

/// Keycap emojis for slots 0..=9, shown as 1️⃣..🔟.
const ORDINAL_TOKENS: [&str; 10] = [
    "1\u{fe0f}\u{20e3}",
    "2\u{fe0f}\u{20e3}",
    "3\u{fe0f}\u{20e3}",
    "4\u{fe0f}\u{20e3}",
    "5\u{fe0f}\u{20e3}",
    "6\u{fe0f}\u{20e3}",
    "7\u{fe0f}\u{20e3}",
    "8\u{fe0f}\u{20e3}",
    "9\u{fe0f}\u{20e3}",
    "\u{1f51f}",
];

/// Number of ordinal slots a page can expose.
pub const ORDINAL_SLOTS: usize = ORDINAL_TOKENS.len();

impl ControlSignal {
    /// Ordinal signal for a 0-based slot, if one exists.
    pub fn select(slot: usize) -> Option<Self> {
        (slot < ORDINAL_SLOTS).then_some(ControlSignal::Select(slot as u8))
    }

    /// Reaction token displayed for this signal.
    pub fn token(self) -> &'static str {
        match self {
            ControlSignal::First => "\u{23ee}\u{fe0f}",
            ControlSignal::Prev => "\u{25c0}\u{fe0f}",
            ControlSignal::Next => "\u{25b6}\u{fe0f}",
            ControlSignal::Last => "\u{23ed}\u{fe0f}",
            ControlSignal::Pause => "\u{23f8}\u{fe0f}",
            ControlSignal::Close | ControlSignal::Deny => "\u{274c}",
            ControlSignal::Confirm => "\u{1f44d}",
            ControlSignal::Select(slot) => ORDINAL_TOKENS
                .get(usize::from(slot))
                .copied()
                .unwrap_or(ORDINAL_TOKENS[ORDINAL_SLOTS - 1]),
        }
    }

    /// Whether a raw reaction token carries this signal.
    ///
    /// Variation selectors are ignored because clients do not always echo them back.
    pub fn matches_token(self, raw: &str) -> bool {
        strip_variation(self.token()).eq(strip_variation(raw))
    }
}

fn strip_variation(token: &str) -> impl Iterator<Item = char> + '_ {
    token.chars().filter(|c| *c != '\u{fe0f}')
}

/// Map a raw token to one of the signals a session currently exposes.
///
/// The same token can mean different signals (❌ closes a menu or denies a confirmation),
/// so resolution is always against the exposed set.
pub fn signal_for(exposed: &[ControlSignal], raw: &str) -> Option<ControlSignal> {
    exposed
        .iter()
        .copied()
        .find(|signal| signal.matches_token(raw))
}
