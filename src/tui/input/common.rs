use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Terminals disagree on whether Shift+letter arrives as `Char('L')` with or
/// without SHIFT, or as `Char('l')` with SHIFT. Normalize to the uppercase
/// char with SHIFT removed so handlers can match on the char alone.
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}
