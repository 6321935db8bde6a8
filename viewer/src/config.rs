use crate::error::ViewerError;
use log::LevelFilter;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

pub const LOGGER_CONFIG: &str = "config/logger.yaml";
pub const VIEWER_CONFIG: &str = "config/viewer.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Log to stderr, stdout is kept for the overlay.
    pub console: bool,
    pub level_filter: LevelFilter,
    pub log_file: Option<PathBuf>,
    pub module_levels: Vec<(String, LevelFilter)>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            level_filter: LevelFilter::Info,
            log_file: None,
            module_levels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// How long the terminal banner stays up before teardown.
    pub game_over_hold_millis: u64,
    pub render: bool,
    /// Tick intervals are divided by this factor.
    pub time_scale: f64,
    pub mute: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            game_over_hold_millis: 2000,
            render: true,
            time_scale: 1.0,
            mute: false,
        }
    }
}

impl ViewerConfig {
    pub fn validate(self) -> Result<Self, ViewerError> {
        if !(self.time_scale.is_finite() && self.time_scale > 0.0) {
            return Err(ViewerError::InvalidConfig("time_scale must be positive"));
        }
        Ok(self)
    }

    pub fn game_over_hold(&self) -> Duration {
        Duration::from_millis(self.game_over_hold_millis)
    }
}

/// Reads a YAML file. A path given by the user must exist, the default path falls back to the
/// default value when absent.
pub fn load<T: DeserializeOwned + Default>(
    path: Option<PathBuf>,
    default_path: &str,
) -> Result<T, ViewerError> {
    let is_user_specified = path.is_some();
    let path = path.unwrap_or_else(|| PathBuf::from(default_path));
    if path.exists() {
        from_file(&path)
    } else if is_user_specified {
        Err(ViewerError::MissingConfig(path))
    } else {
        Ok(T::default())
    }
}

pub fn from_file<T: DeserializeOwned>(path: &Path) -> Result<T, ViewerError> {
    let file = File::open(path).map_err(|source| ViewerError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ViewerError::ConfigFormat {
        path: path.to_path_buf(),
        source,
    })
}

pub fn logger_setup(config: LoggerConfig) -> Result<(), ViewerError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter);
    for (module, level) in config.module_levels {
        dispatch = dispatch.level_for(module, level);
    }
    if config.console {
        dispatch = dispatch.chain(std::io::stderr());
    }
    if let Some(log_file) = config.log_file {
        dispatch = dispatch.chain(fern::log_file(log_file).map_err(ViewerError::LogFile)?);
    }
    dispatch.apply()?;
    Ok(())
}

#[test]
fn test_viewer_config_defaults_for_missing_fields() {
    let config: ViewerConfig = serde_yaml::from_str("render: false").expect("yaml");
    assert_eq!(
        config,
        ViewerConfig {
            render: false,
            ..ViewerConfig::default()
        }
    );
}

#[test]
fn test_viewer_config_rejects_bad_time_scale() {
    let config = ViewerConfig {
        time_scale: 0.0,
        ..ViewerConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_logger_config_from_yaml() {
    let config: LoggerConfig = serde_yaml::from_str(
        "level_filter: Debug\nmodule_levels:\n  - [gridsnake_core, Warn]\n",
    )
    .expect("yaml");
    assert_eq!(config.level_filter, LevelFilter::Debug);
    assert_eq!(
        config.module_levels,
        vec![("gridsnake_core".to_owned(), LevelFilter::Warn)]
    );
    assert!(config.console);
}

#[test]
fn test_load_missing_default_path() {
    let config: ViewerConfig =
        load(None, "config/does-not-exist.yaml").expect("default configuration");
    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn test_load_missing_user_path() {
    let result: Result<ViewerConfig, _> =
        load(Some(PathBuf::from("config/does-not-exist.yaml")), VIEWER_CONFIG);
    assert!(matches!(result, Err(ViewerError::MissingConfig(_))));
}
