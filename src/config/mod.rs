pub mod constants;
pub(crate) mod defaults;
pub mod models;
pub mod utils;

pub use models::*;
pub use utils::{init_logger, load_configuration, lookup_config_path};

use eyre::Result;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_SHA: &str = match option_env!("GIT_SHA") {
    Some(v) => v,
    None => "unknown",
};

/// `User-Agent` header sent with every request to the remote collection.
pub fn user_agent() -> String {
    format!("{}/{}", APP_NAME, VERSION)
}

/// Printed by `--version`.
pub fn version() -> String {
    format!("{} version: {} {}", APP_NAME, VERSION, GIT_SHA)
}

#[cfg(not(test))]
static CONFIG: std::sync::OnceLock<Configuration> = std::sync::OnceLock::new();

// Tests run in parallel threads, each gets its own configuration
#[cfg(test)]
thread_local! {
    static TEST_CONFIG: std::cell::Cell<&'static Configuration> =
        std::cell::Cell::new(Box::leak(Box::default()));
}

impl Configuration {
    /// The process-wide configuration. Defaults until [`Configuration::init`]
    /// ran.
    pub fn instance() -> &'static Configuration {
        #[cfg(not(test))]
        return CONFIG.get_or_init(Configuration::default);

        #[cfg(test)]
        return TEST_CONFIG.with(|config| config.get());
    }

    /// Installs the loaded configuration. Only the first call wins outside
    /// tests.
    pub fn init(config: Configuration) -> Result<()> {
        #[cfg(not(test))]
        CONFIG
            .set(config)
            .map_err(|_| eyre::eyre!("configuration already initialized"))?;

        #[cfg(test)]
        TEST_CONFIG.with(|test_config| test_config.set(Box::leak(Box::new(config))));

        Ok(())
    }
}

/// Prints startup progress to stderr when `general.verbose` is set. Stdout
/// belongs to the terminal UI and the log goes to a file.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::config::Configuration::instance().general.verbose {
            eprintln!($($arg)*);
        }
    };
}

pub use verbose;
