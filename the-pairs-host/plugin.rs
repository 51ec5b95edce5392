//! Keystroke interception for the active document.
//!
//! The host calls an [`EventFilter`] synchronously for every keystroke and
//! skips its own handling when the filter reports [`FilterResult::Handled`].
//! [`PairingPlugin`] is the filter backed by the pairing engine. It follows
//! the active document through explicit lifecycle calls:
//!
//! ```ignore
//! let mut plugin = PairingPlugin::new(PairsConfig::default());
//! plugin.attach(first);
//!
//! // The user switched tabs.
//! plugin.on_document_changed(Some(first), Some(second));
//!
//! if handle_key(&mut plugin, second, &mut buffer, KeyEvent::char('(')) {
//!   // consumed, skip default insertion
//! }
//! ```

use the_pairs::{
  auto_pairs::{
    self,
    EditDecision,
  },
  buffer::TextBuffer,
  input::KeyEvent,
  table::DelimiterTable,
};

use crate::{
  config::PairsConfig,
  document::DocumentId,
};

/// Result of filtering a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
  /// Let the host process the keystroke normally.
  Continue,
  /// The keystroke was consumed; suppress default handling.
  Handled,
}

impl FilterResult {
  pub const fn is_handled(self) -> bool {
    matches!(self, Self::Handled)
  }
}

impl From<FilterResult> for bool {
  fn from(result: FilterResult) -> Self {
    result.is_handled()
  }
}

/// A synchronous keystroke interceptor.
pub trait EventFilter<B: TextBuffer + ?Sized> {
  fn filter(&mut self, document: DocumentId, buffer: &mut B, event: KeyEvent) -> FilterResult;
}

/// Runs `event` through `filter`, returning true if it was consumed.
pub fn handle_key<F, B>(filter: &mut F, document: DocumentId, buffer: &mut B, event: KeyEvent) -> bool
where
  F: EventFilter<B> + ?Sized,
  B: TextBuffer + ?Sized,
{
  filter.filter(document, buffer, event).into()
}

/// Auto pairing attached to at most one document at a time.
#[derive(Debug, Clone)]
pub struct PairingPlugin {
  config:   PairsConfig,
  table:    &'static DelimiterTable,
  attached: Option<DocumentId>,
}

impl Default for PairingPlugin {
  fn default() -> Self {
    Self::new(PairsConfig::default())
  }
}

impl PairingPlugin {
  pub fn new(config: PairsConfig) -> Self {
    Self {
      config,
      table: DelimiterTable::global(),
      attached: None,
    }
  }

  pub fn config(&self) -> &PairsConfig {
    &self.config
  }

  /// Applies changed settings; takes effect from the next keystroke.
  pub fn set_config(&mut self, config: PairsConfig) {
    if self.config != config {
      log::debug!("auto-pairs settings changed: {config:?}");
    }
    self.config = config;
  }

  pub fn attached(&self) -> Option<DocumentId> {
    self.attached
  }

  pub fn is_attached(&self, document: DocumentId) -> bool {
    self.attached == Some(document)
  }

  /// Starts filtering keystrokes of `document`, replacing any previous one.
  pub fn attach(&mut self, document: DocumentId) {
    if let Some(previous) = self.attached.replace(document) {
      if previous != document {
        log::debug!("auto-pairs moved from document {previous} to {document}");
        return;
      }
    }
    log::debug!("auto-pairs attached to document {document}");
  }

  /// Stops filtering keystrokes of `document`.
  ///
  /// Detaching a document that is not attached, or was already closed, does
  /// nothing.
  pub fn detach(&mut self, document: DocumentId) {
    if self.attached == Some(document) {
      self.attached = None;
      log::debug!("auto-pairs detached from document {document}");
    } else {
      log::trace!("auto-pairs not attached to document {document}, ignoring detach");
    }
  }

  /// Follows the host's active document.
  pub fn on_document_changed(&mut self, old: Option<DocumentId>, new: Option<DocumentId>) {
    if let Some(old) = old {
      self.detach(old);
    }
    if let Some(new) = new {
      self.attach(new);
    }
  }

  /// Detaches from whatever document is attached.
  pub fn terminate(&mut self) {
    if let Some(document) = self.attached.take() {
      log::debug!("auto-pairs terminated, detached from document {document}");
    }
  }
}

impl<B> EventFilter<B> for PairingPlugin
where
  B: TextBuffer + ?Sized,
{
  fn filter(&mut self, document: DocumentId, buffer: &mut B, event: KeyEvent) -> FilterResult {
    if !self.config.enabled || !self.is_attached(document) {
      return FilterResult::Continue;
    }

    let decision = auto_pairs::decide(self.table, buffer, event);
    match decision.edit {
      EditDecision::NoAction => return FilterResult::Continue,
      EditDecision::WrapSelection(_) if !self.config.wrap_selection => {
        return FilterResult::Continue;
      },
      _ => {},
    }

    match auto_pairs::apply(buffer, &decision) {
      Ok(()) => FilterResult::Handled,
      Err(err) => {
        log::warn!("auto-pairs edit failed in document {document}: {err}");
        FilterResult::Continue
      },
    }
  }
}

#[cfg(test)]
mod test {
  use std::num::NonZeroUsize;

  use the_pairs::buffer::RopeBuffer;

  use super::*;

  fn doc(id: usize) -> DocumentId {
    DocumentId::new(NonZeroUsize::new(id).unwrap())
  }

  #[test]
  fn attach_replaces_previous_document() {
    let mut plugin = PairingPlugin::default();
    assert_eq!(plugin.attached(), None);

    plugin.attach(doc(1));
    assert!(plugin.is_attached(doc(1)));

    plugin.attach(doc(2));
    assert!(!plugin.is_attached(doc(1)));
    assert!(plugin.is_attached(doc(2)));
  }

  #[test]
  fn detach_is_tolerant() {
    let mut plugin = PairingPlugin::default();
    plugin.detach(doc(1));
    assert_eq!(plugin.attached(), None);

    plugin.attach(doc(1));
    plugin.detach(doc(2));
    assert_eq!(plugin.attached(), Some(doc(1)));

    plugin.detach(doc(1));
    plugin.detach(doc(1));
    assert_eq!(plugin.attached(), None);
  }

  #[test]
  fn document_change_moves_attachment() {
    let mut plugin = PairingPlugin::default();
    plugin.on_document_changed(None, Some(doc(1)));
    assert_eq!(plugin.attached(), Some(doc(1)));

    plugin.on_document_changed(Some(doc(1)), Some(doc(2)));
    assert_eq!(plugin.attached(), Some(doc(2)));

    // The old document was closed before the switch was reported.
    plugin.on_document_changed(Some(doc(7)), None);
    assert_eq!(plugin.attached(), Some(doc(2)));

    plugin.terminate();
    assert_eq!(plugin.attached(), None);
  }

  #[test]
  fn filters_only_the_attached_document() {
    let mut plugin = PairingPlugin::default();
    let mut buffer = RopeBuffer::from_markup("ab|cd").unwrap();

    let result = plugin.filter(doc(1), &mut buffer, KeyEvent::char('('));
    assert_eq!(result, FilterResult::Continue);
    assert_eq!(buffer.to_markup(), "ab|cd");

    plugin.attach(doc(1));
    let result = plugin.filter(doc(1), &mut buffer, KeyEvent::char('('));
    assert_eq!(result, FilterResult::Handled);
    assert_eq!(buffer.to_markup(), "ab(|)cd");
  }

  #[test]
  fn filter_result_converts_to_consumed_flag() {
    assert!(bool::from(FilterResult::Handled));
    assert!(!bool::from(FilterResult::Continue));
  }
}
