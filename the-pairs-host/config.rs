//! User settings for auto pairing.
//!
//! Settings live in the `[auto-pairs]` table of the editor's TOML config:
//!
//! ```toml
//! [auto-pairs]
//! enabled = true
//! wrap-selection = false
//! ```
//!
//! Other tables in the same file are ignored. The delimiter set itself is
//! fixed and cannot be configured.

use std::path::Path;

use eyre::{
  Context,
  Result,
};
use serde::{
  Deserialize,
  Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PairsConfig {
  /// Master switch. When off every keystroke goes to the host untouched.
  pub enabled:        bool,
  /// Enclose the selection when an opener is typed over it.
  pub wrap_selection: bool,
}

impl Default for PairsConfig {
  fn default() -> Self {
    Self {
      enabled:        true,
      wrap_selection: true,
    }
  }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  #[serde(default, rename = "auto-pairs")]
  auto_pairs: PairsConfig,
}

impl PairsConfig {
  /// Reads the `[auto-pairs]` table out of a full config document.
  pub fn from_toml_str(source: &str) -> Result<Self> {
    let file: ConfigFile =
      toml::from_str(source).context("failed to parse auto-pairs settings")?;
    Ok(file.auto_pairs)
  }

  /// Loads settings from `path`, falling back to the defaults when the file
  /// does not exist.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let source = match std::fs::read_to_string(path) {
      Ok(source) => source,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        log::debug!("no config at {}, using default auto-pairs settings", path.display());
        return Ok(Self::default());
      },
      Err(err) => {
        return Err(err).with_context(|| format!("failed to read {}", path.display()));
      },
    };

    Self::from_toml_str(&source).with_context(|| format!("invalid config in {}", path.display()))
  }
}
