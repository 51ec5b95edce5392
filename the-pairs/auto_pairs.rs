//! Automatic bracket and quote pairing.
//!
//! Given the current buffer and a single keystroke, [`decide`] picks one of
//! the edits below. [`apply`] performs it through the [`TextBuffer`] contract
//! and [`hook`] does both in one call.
//!
//! # Decisions
//!
//! Evaluated in this order:
//!
//! 1. **Modifier held** - any modifier key means [`EditDecision::NoAction`].
//! 2. **Skip over** - typing a closer that already sits right of the cursor
//!    moves the cursor past it: `(|)` → type `)` → `()|`
//! 3. **Wrap** - typing an opener over a selection encloses it:
//!    `a#[bc]#d` → type `{` → `a{bc}|d`
//! 4. **Insert pair** - typing an opener inserts both halves:
//!    `ab|cd` → type `(` → `ab(|)cd`
//! 5. **Delete pair** - backspace between an opener and its closer removes
//!    both: `a(|)b` → `a|b`
//!
//! Anything else is [`EditDecision::NoAction`] and the host handles the key
//! itself.
//!
//! Quotes and the backtick are their own closer. Because skip over is checked
//! before insertion, typing `"` in front of an existing `"` steps over it and
//! only inserts a fresh pair otherwise.
//!
//! # Usage
//!
//! ```ignore
//! use the_pairs::{
//!   auto_pairs::hook,
//!   buffer::RopeBuffer,
//!   input::KeyEvent,
//!   table::DelimiterTable,
//! };
//!
//! let mut buffer = RopeBuffer::from_markup("ab|cd")?;
//! let decision = hook(DelimiterTable::global(), &mut buffer, KeyEvent::char('('))?;
//! assert!(decision.is_consumed());
//! assert_eq!(buffer.to_markup(), "ab(|)cd");
//! ```

use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;

use crate::{
  Tendril,
  buffer::{
    BufferError,
    Range,
    TextBuffer,
  },
  input::{
    Key,
    KeyEvent,
  },
  table::{
    DelimiterTable,
    Pair,
  },
};

pub type Result<T> = std::result::Result<T, PairsError>;

/// (from, to) replacement.
pub type Change = (usize, usize, Option<Tendril>);

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PairsError {
  #[error(transparent)]
  Buffer(#[from] BufferError),
}

/// What the engine wants done with a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision {
  /// Insert `open` and `close` at the cursor, cursor between them.
  InsertPair(Pair),
  /// Enclose the selection with `open` and `close`.
  WrapSelection(Pair),
  /// Move the cursor past the closer right of it.
  SkipOverCloser,
  /// Remove the opener left of the cursor and the closer right of it.
  DeletePairedChars,
  /// Leave the keystroke to the host.
  NoAction,
}

/// A decision together with the positions it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
  pub edit:   EditDecision,
  /// Cursor before the edit.
  pub cursor: usize,
  /// Selection the edit operates on, only set for wraps.
  pub range:  Option<Range>,
}

impl Decision {
  const fn no_action(cursor: usize) -> Self {
    Self {
      edit: EditDecision::NoAction,
      cursor,
      range: None,
    }
  }

  const fn at_cursor(edit: EditDecision, cursor: usize) -> Self {
    Self {
      edit,
      cursor,
      range: None,
    }
  }

  /// true if the host must suppress its default handling of the key.
  pub const fn is_consumed(&self) -> bool {
    !matches!(self.edit, EditDecision::NoAction)
  }

  /// Cursor position once the edit is applied, `None` for no action.
  pub fn cursor_after(&self) -> Option<usize> {
    match self.edit {
      EditDecision::InsertPair(_) | EditDecision::SkipOverCloser => Some(self.cursor + 1),
      EditDecision::WrapSelection(_) => self.range.map(|range| range.end + 2),
      EditDecision::DeletePairedChars => Some(self.cursor.saturating_sub(1)),
      EditDecision::NoAction => None,
    }
  }

  /// The edit as replacements against the text the decision was made on.
  ///
  /// Changes are sorted and non-overlapping. A skip over has no changes, only
  /// a cursor move.
  pub fn changes(&self) -> SmallVec<[Change; 2]> {
    match self.edit {
      EditDecision::InsertPair(pair) => {
        let mut text = Tendril::new();
        text.push(pair.open);
        text.push(pair.close);
        smallvec![(self.cursor, self.cursor, Some(text))]
      },
      EditDecision::WrapSelection(pair) => match self.range {
        Some(range) => smallvec![
          (range.start, range.start, Some(char_tendril(pair.open))),
          (range.end, range.end, Some(char_tendril(pair.close))),
        ],
        None => SmallVec::new(),
      },
      EditDecision::DeletePairedChars => {
        smallvec![(self.cursor.saturating_sub(1), self.cursor + 1, None)]
      },
      EditDecision::SkipOverCloser | EditDecision::NoAction => SmallVec::new(),
    }
  }
}

fn char_tendril(ch: char) -> Tendril {
  let mut text = Tendril::new();
  text.push(ch);
  text
}

/// Decide what to do with `event` given the current buffer state.
///
/// Never mutates the buffer and never fails: reads past either end of the
/// buffer see no character, which matches no delimiter.
pub fn decide<B>(table: &DelimiterTable, buffer: &B, event: KeyEvent) -> Decision
where
  B: TextBuffer + ?Sized,
{
  let cursor = buffer.cursor();

  if !event.is_plain() {
    return Decision::no_action(cursor);
  }

  let decision = match event.key {
    Key::Char(ch) => decide_char(table, buffer, cursor, ch),
    Key::Backspace => {
      if table.is_pair(buffer.prev_char(), buffer.next_char()) {
        Decision::at_cursor(EditDecision::DeletePairedChars, cursor)
      } else {
        Decision::no_action(cursor)
      }
    },
    _ => Decision::no_action(cursor),
  };

  tracing::trace!(?event, ?decision, "auto pairs decision");
  decision
}

fn decide_char<B>(table: &DelimiterTable, buffer: &B, cursor: usize, ch: char) -> Decision
where
  B: TextBuffer + ?Sized,
{
  if table.is_closer(ch) && buffer.next_char() == Some(ch) {
    return Decision::at_cursor(EditDecision::SkipOverCloser, cursor);
  }

  let Some(pair) = table.pair_for_opener(ch) else {
    return Decision::no_action(cursor);
  };

  match buffer.non_empty_selection() {
    Some(range) => Decision {
      edit: EditDecision::WrapSelection(pair),
      cursor,
      range: Some(range),
    },
    None => Decision::at_cursor(EditDecision::InsertPair(pair), cursor),
  }
}

/// Perform `decision` on the buffer it was computed for.
pub fn apply<B>(buffer: &mut B, decision: &Decision) -> Result<()>
where
  B: TextBuffer + ?Sized,
{
  let Some(cursor) = decision.cursor_after() else {
    return Ok(());
  };

  // Later changes first so earlier offsets stay valid.
  for (from, to, text) in decision.changes().into_iter().rev() {
    for pos in (from..to).rev() {
      buffer.delete_char(pos)?;
    }
    if let Some(text) = text {
      buffer.insert(from, &text)?;
    }
  }

  // Any consumed key leaves a bare cursor behind.
  if buffer.selection().is_some() {
    buffer.set_selection(None)?;
  }
  buffer.set_cursor(cursor)?;

  tracing::debug!(?decision, cursor, "applied auto pair edit");
  Ok(())
}

/// Decide and apply in one step.
///
/// The returned decision tells the host whether the key was consumed.
pub fn hook<B>(table: &DelimiterTable, buffer: &mut B, event: KeyEvent) -> Result<Decision>
where
  B: TextBuffer + ?Sized,
{
  let decision = decide(table, buffer, event);
  apply(buffer, &decision)?;
  Ok(decision)
}
