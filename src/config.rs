use std::{env::var, path::PathBuf, str::FromStr};
use tracing::Level;

/// Environment variable naming the word file directly.
pub const WORDS_VARIABLE: &str = "CLAC_WORDS";

/// Environment variable holding the most verbose level of diagnostics to show.
pub const LOG_VARIABLE: &str = "CLAC_LOG";

/// Settings for a calculator run, all of which come from the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Where the user's word definitions live, if anywhere.
    pub words_path: Option<PathBuf>,

    /// The most verbose level of diagnostics written to stderr.
    pub log_level: Level,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Config {
        Config::from_lookup(|name| var(name).ok())
    }

    /// Build the configuration from any source of variables.
    ///
    /// The word file is `$CLAC_WORDS` when that is set, otherwise `clac/words` under
    /// `$XDG_CONFIG_HOME` or under `$HOME/.config`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Config {
        // Empty variables are treated the same as unset ones.
        let lookup = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let words_path = if let Some(path) = lookup(WORDS_VARIABLE) {
            Some(PathBuf::from(path))
        } else if let Some(config_home) = lookup("XDG_CONFIG_HOME") {
            Some(PathBuf::from(config_home).join("clac").join("words"))
        } else {
            lookup("HOME").map(|home| PathBuf::from(home).join(".config").join("clac").join("words"))
        };

        let log_level = lookup(LOG_VARIABLE)
            .and_then(|level| Level::from_str(&level).ok())
            .unwrap_or(Level::WARN);

        Config {
            words_path,
            log_level,
        }
    }

    /// The word file as a string, ready to hand to the interpreter.
    pub fn words_file(&self) -> Option<String> {
        self.words_path
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(variables: &[(&str, &str)]) -> Config {
        let variables: HashMap<String, String> = variables
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Config::from_lookup(|name| variables.get(name).cloned())
    }

    #[test]
    fn explicit_words_file_wins() {
        let config = config_with(&[
            ("CLAC_WORDS", "/tmp/my-words"),
            ("XDG_CONFIG_HOME", "/xdg"),
            ("HOME", "/home/user"),
        ]);

        assert_eq!(config.words_path, Some(PathBuf::from("/tmp/my-words")));
    }

    #[test]
    fn falls_back_to_config_directories() {
        let config = config_with(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/user")]);
        assert_eq!(config.words_path, Some(PathBuf::from("/xdg/clac/words")));

        let config = config_with(&[("CLAC_WORDS", ""), ("HOME", "/home/user")]);
        assert_eq!(
            config.words_path,
            Some(PathBuf::from("/home/user/.config/clac/words"))
        );

        assert_eq!(config_with(&[]).words_path, None);
    }

    #[test]
    fn log_level_defaults_to_warnings() {
        assert_eq!(config_with(&[]).log_level, Level::WARN);
        assert_eq!(config_with(&[("CLAC_LOG", "debug")]).log_level, Level::DEBUG);
        assert_eq!(config_with(&[("CLAC_LOG", "chatty")]).log_level, Level::WARN);
    }
}
