//! The buffer view the engine reads from and writes to.
//!
//! The host editor owns the text. It lends it to the engine for the duration
//! of one keystroke through the [`TextBuffer`] trait: full text access, the
//! cursor, an optional selection, and two primitive edits (insert text,
//! delete one char). All positions are char offsets.
//!
//! [`RopeBuffer`] is the reference implementation backed by a [`Rope`]. Hosts
//! with their own storage implement [`TextBuffer`] directly.
//!
//! # Markup
//!
//! [`RopeBuffer::from_markup`] and [`RopeBuffer::to_markup`] describe a buffer
//! state in one string, which keeps tests readable:
//!
//! ```text
//! "ab|cd"     cursor at 2
//! "a#[bc]#d"  selection 1..3, cursor at 3
//! ```

use ropey::{
  Rope,
  RopeSlice,
};
use thiserror::Error;

const CURSOR_MARK: char = '|';
const SELECTION_OPEN: &str = "#[";
const SELECTION_CLOSE: &str = "]#";

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufferError {
  #[error("position {pos} is out of bounds for buffer of length {len}")]
  OutOfBounds { pos: usize, len: usize },
  #[error("selection {start}..{end} is out of bounds for buffer of length {len}")]
  SelectionOutOfBounds { start: usize, end: usize, len: usize },
  #[error("invalid buffer markup: {0}")]
  InvalidMarkup(&'static str),
}

/// A half open `[start, end)` selection range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub start: usize,
  pub end:   usize,
}

impl Range {
  /// Builds a range from two positions in any order.
  pub fn new(a: usize, b: usize) -> Self {
    Self {
      start: a.min(b),
      end:   a.max(b),
    }
  }

  pub fn point(pos: usize) -> Self {
    Self::new(pos, pos)
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

/// Read/write access to a host buffer for one event-handling call.
pub trait TextBuffer {
  /// Full text content.
  fn text(&self) -> RopeSlice<'_>;

  fn cursor(&self) -> usize;

  fn set_cursor(&mut self, pos: usize) -> Result<()>;

  fn selection(&self) -> Option<Range>;

  fn set_selection(&mut self, selection: Option<Range>) -> Result<()>;

  fn insert(&mut self, pos: usize, text: &str) -> Result<()>;

  fn delete_char(&mut self, pos: usize) -> Result<()>;

  fn len_chars(&self) -> usize {
    self.text().len_chars()
  }

  /// Char at `pos`, or `None` past either end of the buffer.
  fn char_at(&self, pos: usize) -> Option<char> {
    self.text().get_char(pos)
  }

  /// Char immediately right of the cursor.
  fn next_char(&self) -> Option<char> {
    self.char_at(self.cursor())
  }

  /// Char immediately left of the cursor.
  fn prev_char(&self) -> Option<char> {
    self
      .cursor()
      .checked_sub(1)
      .and_then(|pos| self.char_at(pos))
  }

  /// The selection, if it covers at least one char.
  fn non_empty_selection(&self) -> Option<Range> {
    self.selection().filter(|range| !range.is_empty())
  }
}

/// Rope backed buffer with a single cursor and an optional selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RopeBuffer {
  text:      Rope,
  cursor:    usize,
  selection: Option<Range>,
}

impl RopeBuffer {
  /// A buffer holding `text` with the cursor at the start.
  pub fn new(text: impl Into<Rope>) -> Self {
    Self {
      text:      text.into(),
      cursor:    0,
      selection: None,
    }
  }

  pub fn with_cursor(mut self, pos: usize) -> Result<Self> {
    self.set_cursor(pos)?;
    Ok(self)
  }

  pub fn with_selection(mut self, selection: Range) -> Result<Self> {
    self.set_selection(Some(selection))?;
    Ok(self)
  }

  /// Parses a buffer description, see the module docs.
  pub fn from_markup(markup: &str) -> Result<Self> {
    let mut text = String::with_capacity(markup.len());
    let mut len = 0;
    let mut cursor = None;
    let mut sel_start = None;
    let mut sel_end = None;

    let mut rest = markup;
    while let Some(ch) = rest.chars().next() {
      if rest.starts_with(SELECTION_OPEN) {
        if sel_start.replace(len).is_some() {
          return Err(BufferError::InvalidMarkup("more than one selection"));
        }
        rest = &rest[SELECTION_OPEN.len()..];
        continue;
      }
      if sel_start.is_some() && sel_end.is_none() && rest.starts_with(SELECTION_CLOSE) {
        sel_end = Some(len);
        rest = &rest[SELECTION_CLOSE.len()..];
        continue;
      }
      if ch == CURSOR_MARK {
        if cursor.replace(len).is_some() {
          return Err(BufferError::InvalidMarkup("more than one cursor"));
        }
      } else {
        text.push(ch);
        len += 1;
      }
      rest = &rest[ch.len_utf8()..];
    }

    let selection = match (sel_start, sel_end) {
      (Some(start), Some(end)) => Some(Range::new(start, end)),
      (None, None) => None,
      _ => return Err(BufferError::InvalidMarkup("unterminated selection")),
    };
    let cursor = cursor
      .or(selection.map(|range| range.end))
      .unwrap_or(len);

    Ok(Self {
      text: Rope::from(text),
      cursor,
      selection,
    })
  }

  /// Renders the buffer in the markup accepted by [`RopeBuffer::from_markup`].
  pub fn to_markup(&self) -> String {
    let selection = self.non_empty_selection();
    let show_cursor = selection.is_none_or(|range| range.end != self.cursor);
    let mut out = String::with_capacity(self.text.len_bytes() + 4);

    for (pos, ch) in self.text.chars().enumerate() {
      push_marks(&mut out, pos, self.cursor, show_cursor, selection);
      out.push(ch);
    }
    push_marks(
      &mut out,
      self.text.len_chars(),
      self.cursor,
      show_cursor,
      selection,
    );

    out
  }

  fn check_pos(&self, pos: usize) -> Result<()> {
    let len = self.text.len_chars();
    if pos > len {
      return Err(BufferError::OutOfBounds { pos, len });
    }
    Ok(())
  }
}

fn push_marks(
  out: &mut String,
  pos: usize,
  cursor: usize,
  show_cursor: bool,
  selection: Option<Range>,
) {
  if let Some(range) = selection {
    if range.end == pos {
      out.push_str(SELECTION_CLOSE);
    }
  }
  if show_cursor && cursor == pos {
    out.push(CURSOR_MARK);
  }
  if let Some(range) = selection {
    if range.start == pos {
      out.push_str(SELECTION_OPEN);
    }
  }
}

impl TextBuffer for RopeBuffer {
  fn text(&self) -> RopeSlice<'_> {
    self.text.slice(..)
  }

  fn cursor(&self) -> usize {
    self.cursor
  }

  fn set_cursor(&mut self, pos: usize) -> Result<()> {
    self.check_pos(pos)?;
    self.cursor = pos;
    Ok(())
  }

  fn selection(&self) -> Option<Range> {
    self.selection
  }

  fn set_selection(&mut self, selection: Option<Range>) -> Result<()> {
    if let Some(range) = selection {
      let len = self.text.len_chars();
      if range.end > len {
        return Err(BufferError::SelectionOutOfBounds {
          start: range.start,
          end: range.end,
          len,
        });
      }
    }
    self.selection = selection;
    Ok(())
  }

  /// Inserts `text` at `pos`. Positions at or after `pos` shift right.
  fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
    self.check_pos(pos)?;
    let inserted = text.chars().count();
    self.text.insert(pos, text);

    let shift = |p: usize| if p >= pos { p + inserted } else { p };
    self.cursor = shift(self.cursor);
    self.selection = self
      .selection
      .map(|range| Range::new(shift(range.start), shift(range.end)));
    Ok(())
  }

  /// Removes the char at `pos`. Positions after `pos` shift left.
  fn delete_char(&mut self, pos: usize) -> Result<()> {
    let len = self.text.len_chars();
    if pos >= len {
      return Err(BufferError::OutOfBounds { pos, len });
    }
    self.text.remove(pos..pos + 1);

    let shift = |p: usize| if p > pos { p - 1 } else { p };
    self.cursor = shift(self.cursor);
    self.selection = self
      .selection
      .map(|range| Range::new(shift(range.start), shift(range.end)));
    Ok(())
  }
}
