use std::fs;

use the_pairs_host::PairsConfig;

#[test]
fn load_reads_settings_from_disk() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("config.toml");
  fs::write(
    &path,
    "theme = \"onedark\"\n\n[auto-pairs]\nenabled = false\nwrap-selection = false\n",
  )
  .unwrap();

  let config = PairsConfig::load(&path).unwrap();
  assert_eq!(config, PairsConfig {
    enabled:        false,
    wrap_selection: false,
  });
}

#[test]
fn load_missing_file_uses_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let config = PairsConfig::load(dir.path().join("missing.toml")).unwrap();
  assert_eq!(config, PairsConfig::default());
}

#[test]
fn load_reports_the_broken_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("config.toml");
  fs::write(&path, "[auto-pairs]\nenabled = maybe\n").unwrap();

  let err = PairsConfig::load(&path).unwrap_err();
  assert!(format!("{err:#}").contains("config.toml"));
}
