use crate::errors::ConsoleError;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use once_cell::sync::OnceCell;
use std::path::Path;

static INIT: OnceCell<()> = OnceCell::new();

/// Initializes the logging system.
///
/// Reads `log4rs.yaml` from the working directory when present; otherwise
/// falls back to a stderr appender at `info`. Safe to call more than once.
pub fn init() -> Result<(), ConsoleError> {
    if Path::new("log4rs.yaml").exists() {
        init_from_file("log4rs.yaml")
    } else {
        init_with_level(LevelFilter::Info)
    }
}

/// # Errors
/// Returns an error if the configuration file cannot be loaded.
pub fn init_from_file(path: impl AsRef<Path>) -> Result<(), ConsoleError> {
    let mut result = Ok(());
    INIT.get_or_init(|| {
        if let Err(e) = log4rs::init_file(path.as_ref(), log4rs::config::Deserializers::default()) {
            result = Err(ConsoleError::Config(format!("log config: {e}")));
        }
    });
    result
}

/// # Errors
/// Returns an error if the programmatic configuration is rejected.
pub fn init_with_level(level: LevelFilter) -> Result<(), ConsoleError> {
    let mut result = Ok(());
    INIT.get_or_init(|| {
        let stderr = ConsoleAppender::builder()
            .target(log4rs::append::console::Target::Stderr)
            .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}")))
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(level));
        match config {
            Ok(config) => {
                if let Err(e) = log4rs::init_config(config) {
                    result = Err(ConsoleError::Config(format!("log init: {e}")));
                }
            }
            Err(e) => result = Err(ConsoleError::Config(format!("log config: {e}"))),
        }
    });
    result
}
