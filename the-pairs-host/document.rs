use std::{
  fmt,
  num::NonZeroUsize,
};

/// Handle the host hands out for each open document; the plugin only
/// compares handles to know which buffer it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(NonZeroUsize);

impl DocumentId {
  pub const fn new(id: NonZeroUsize) -> Self {
    Self(id)
  }
}

impl fmt::Display for DocumentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn displays_as_hash_number() {
    let id = DocumentId::new(NonZeroUsize::new(42).unwrap());
    assert_eq!(id.to_string(), "#42");
    assert_ne!(id, DocumentId::new(NonZeroUsize::new(7).unwrap()));
  }
}
