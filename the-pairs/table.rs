//! The delimiter table.
//!
//! A [`DelimiterTable`] is an ordered list of [`Pair`] records together with
//! two lookup maps, one keyed by opener and one keyed by closer. Openers are
//! unique among openers and closers are unique among closers, so every lookup
//! resolves to at most one pair.
//!
//! Some characters (`"`, `'` and `` ` ``) are their own closer. They appear in
//! both maps; callers decide which role applies from the surrounding text.
//!
//! The engine always uses the fixed [`DelimiterTable::global`] table:
//!
//! ```ignore
//! use the_pairs::table::DelimiterTable;
//!
//! let table = DelimiterTable::global();
//! assert_eq!(table.pair_for_opener('(').map(|pair| pair.close), Some(')'));
//! assert_eq!(table.pair_for_closer('»').map(|pair| pair.open), Some('«'));
//! ```

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use thiserror::Error;

/// The fixed delimiter set, in lookup order.
pub const DEFAULT_PAIRS: &[(char, char)] = &[
  ('[', ']'),
  ('(', ')'),
  ('{', '}'),
  ('"', '"'),
  ('\'', '\''),
  ('“', '”'),
  ('‘', '’'),
  ('«', '»'),
  ('‹', '›'),
  ('`', '`'),
  ('<', '>'),
];

static GLOBAL: Lazy<DelimiterTable> = Lazy::new(|| {
  DelimiterTable::new(DEFAULT_PAIRS.iter().copied())
    .expect("built-in delimiter table must not contain duplicates")
});

pub type Result<T> = std::result::Result<T, TableError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
  #[error("opener {ch:?} is already mapped to pair {index}")]
  DuplicateOpener { ch: char, index: usize },
  #[error("closer {ch:?} is already mapped to pair {index}")]
  DuplicateCloser { ch: char, index: usize },
}

/// A single opener/closer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
  pub open:  char,
  pub close: char,
}

impl Pair {
  pub const fn new(open: char, close: char) -> Self {
    Self { open, close }
  }

  /// true if open == close
  pub const fn same(&self) -> bool {
    self.open == self.close
  }
}

impl From<(char, char)> for Pair {
  fn from((open, close): (char, char)) -> Self {
    Self::new(open, close)
  }
}

#[derive(Debug, Clone)]
pub struct DelimiterTable {
  pairs:    Vec<Pair>,
  by_open:  HashMap<char, usize>,
  by_close: HashMap<char, usize>,
}

impl DelimiterTable {
  /// Build a table from the given pairs, rejecting duplicated openers or
  /// closers.
  pub fn new<V, A>(pairs: V) -> Result<Self>
  where
    V: IntoIterator<Item = A>,
    A: Into<Pair>,
  {
    let iter = pairs.into_iter();
    let (lower, upper) = iter.size_hint();
    let capacity = upper.unwrap_or(lower);

    let mut table = Self {
      pairs:    Vec::with_capacity(capacity),
      by_open:  HashMap::with_capacity(capacity),
      by_close: HashMap::with_capacity(capacity),
    };

    for pair in iter {
      let pair = pair.into();
      let index = table.pairs.len();

      if let Some(&existing) = table.by_open.get(&pair.open) {
        return Err(TableError::DuplicateOpener {
          ch:    pair.open,
          index: existing,
        });
      }
      if let Some(&existing) = table.by_close.get(&pair.close) {
        return Err(TableError::DuplicateCloser {
          ch:    pair.close,
          index: existing,
        });
      }

      table.by_open.insert(pair.open, index);
      table.by_close.insert(pair.close, index);
      table.pairs.push(pair);
    }

    Ok(table)
  }

  /// The process-wide table built from [`DEFAULT_PAIRS`].
  pub fn global() -> &'static Self {
    &GLOBAL
  }

  pub fn pairs(&self) -> &[Pair] {
    &self.pairs
  }

  pub fn len(&self) -> usize {
    self.pairs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  pub fn pair_for_opener(&self, ch: char) -> Option<Pair> {
    self.by_open.get(&ch).map(|&index| self.pairs[index])
  }

  pub fn pair_for_closer(&self, ch: char) -> Option<Pair> {
    self.by_close.get(&ch).map(|&index| self.pairs[index])
  }

  pub fn is_opener(&self, ch: char) -> bool {
    self.by_open.contains_key(&ch)
  }

  pub fn is_closer(&self, ch: char) -> bool {
    self.by_close.contains_key(&ch)
  }

  /// true if `open` and `close` are the two halves of the same record.
  ///
  /// Either side may be absent (buffer boundary), which never matches.
  pub fn is_pair(&self, open: Option<char>, close: Option<char>) -> bool {
    match (open, close) {
      (Some(open), Some(close)) => self
        .pair_for_closer(close)
        .is_some_and(|pair| pair.open == open),
      _ => false,
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn global_table_is_a_bijection() {
    let table = DelimiterTable::global();
    assert_eq!(table.len(), DEFAULT_PAIRS.len());

    for (index, &(open, close)) in DEFAULT_PAIRS.iter().enumerate() {
      assert_eq!(table.pairs()[index], Pair::new(open, close));
      assert_eq!(table.pair_for_opener(open), Some(Pair::new(open, close)));
      assert_eq!(table.pair_for_closer(close), Some(Pair::new(open, close)));
    }
  }

  #[test]
  fn self_pairing_characters_have_both_roles() {
    let table = DelimiterTable::global();
    for ch in ['"', '\'', '`'] {
      assert!(table.is_opener(ch));
      assert!(table.is_closer(ch));
      assert!(table.pair_for_opener(ch).unwrap().same());
    }

    assert!(table.is_opener('('));
    assert!(!table.is_closer('('));
    assert!(table.is_closer('”'));
    assert!(!table.is_opener('”'));
  }

  #[test]
  fn is_pair_requires_matching_record() {
    let table = DelimiterTable::global();
    assert!(table.is_pair(Some('('), Some(')')));
    assert!(table.is_pair(Some('“'), Some('”')));
    assert!(table.is_pair(Some('"'), Some('"')));
    assert!(!table.is_pair(Some('('), Some(']')));
    assert!(!table.is_pair(Some(')'), Some('(')));
    assert!(!table.is_pair(None, Some(')')));
    assert!(!table.is_pair(Some('('), None));
    assert!(!table.is_pair(None, None));
  }

  #[test]
  fn duplicates_are_rejected() {
    let err = DelimiterTable::new([('(', ')'), ('(', ']')]).unwrap_err();
    assert_eq!(err, TableError::DuplicateOpener { ch: '(', index: 0 });

    let err = DelimiterTable::new([('(', ')'), ('[', ')')]).unwrap_err();
    assert_eq!(err, TableError::DuplicateCloser { ch: ')', index: 0 });

    // A self pair only claims its character once per role.
    assert!(DelimiterTable::new([('"', '"'), ('(', ')')]).is_ok());
  }

  #[test]
  fn unknown_characters_resolve_to_nothing() {
    let table = DelimiterTable::global();
    assert_eq!(table.pair_for_opener('a'), None);
    assert_eq!(table.pair_for_closer('a'), None);

    let empty = DelimiterTable::new(std::iter::empty::<Pair>()).unwrap();
    assert!(empty.is_empty());
    assert!(!empty.is_pair(Some('('), Some(')')));
  }
}
