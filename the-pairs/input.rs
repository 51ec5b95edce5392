//! Keystroke types delivered by the host editor.
//!
//! Hosts translate their native key events into [`KeyEvent`] before handing
//! them to the pairing engine. Only two kinds of keystrokes matter to the
//! engine: a printable character and backspace. Everything else is passed
//! through untouched.

use bitflags::bitflags;

bitflags! {
  /// Modifier keys held while a key was pressed.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct Modifiers: u8 {
    const CTRL  = 0b0000_0001;
    const ALT   = 0b0000_0010;
    const SHIFT = 0b0000_0100;
    const SUPER = 0b0000_1000;
  }
}

impl Modifiers {
  #[must_use]
  pub const fn ctrl(self) -> bool {
    self.contains(Self::CTRL)
  }

  #[must_use]
  pub const fn alt(self) -> bool {
    self.contains(Self::ALT)
  }

  #[must_use]
  pub const fn shift(self) -> bool {
    self.contains(Self::SHIFT)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Char(char),
  Backspace,
  Delete,
  Enter,
  Escape,
  Tab,
  Home,
  End,
  Left,
  Right,
  Up,
  Down,
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
  pub key:       Key,
  pub modifiers: Modifiers,
}

impl KeyEvent {
  pub const fn new(key: Key, modifiers: Modifiers) -> Self {
    Self { key, modifiers }
  }

  /// A printable character with no modifier held.
  pub const fn char(ch: char) -> Self {
    Self::new(Key::Char(ch), Modifiers::empty())
  }

  /// Delete-backward with no modifier held.
  pub const fn backspace() -> Self {
    Self::new(Key::Backspace, Modifiers::empty())
  }

  #[must_use]
  pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
    self.modifiers = modifiers;
    self
  }

  /// true when no modifier key is held.
  pub const fn is_plain(&self) -> bool {
    self.modifiers.is_empty()
  }
}

impl From<char> for KeyEvent {
  fn from(ch: char) -> Self {
    Self::char(ch)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn plain_events_have_no_modifiers() {
    assert!(KeyEvent::char('(').is_plain());
    assert!(KeyEvent::backspace().is_plain());
    assert_eq!(KeyEvent::from('x'), KeyEvent::char('x'));
  }

  #[test]
  fn with_modifiers_replaces_the_set() {
    let event = KeyEvent::char('(').with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
    assert!(!event.is_plain());
    assert!(event.modifiers.ctrl());
    assert!(event.modifiers.shift());
    assert!(!event.modifiers.alt());

    let event = event.with_modifiers(Modifiers::empty());
    assert!(event.is_plain());
  }
}
