pub const DEFAULT_USER_AGENT: &str = concat!("linkstress/", env!("CARGO_PKG_VERSION"));

/// Config filenames picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["linkstress.toml", "linkstress.json"];
