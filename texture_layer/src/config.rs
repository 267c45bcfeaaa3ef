/// Per-device runtime configuration
///
/// Capability state lives in [`crate::capabilities::Capabilities`]; this only
/// carries knobs that are not reported by the native backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tag appended to log sources of this device (e.g. "texlayer::gl[main]")
    pub label: String,

    /// Query the native error state after every native write
    pub check_native_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label: String::new(),
            check_native_errors: true,
        }
    }
}

impl Config {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_native_error_checks(mut self, enabled: bool) -> Self {
        self.check_native_errors = enabled;
        self
    }

    /// Log source for a backend, tagged with the device label when set
    pub fn log_source(&self, backend: &str) -> String {
        if self.label.is_empty() {
            backend.to_string()
        } else {
            format!("{}[{}]", backend, self.label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checks_native_errors() {
        let config = Config::default();
        assert!(config.check_native_errors);
        assert!(config.label.is_empty());
    }

    #[test]
    fn test_log_source_with_label() {
        let config = Config::default().with_label("main");
        assert_eq!(config.log_source("texlayer::gl"), "texlayer::gl[main]");
        assert_eq!(Config::default().log_source("texlayer::gl"), "texlayer::gl");
    }

    #[test]
    fn test_disable_native_error_checks() {
        let config = Config::default().with_native_error_checks(false);
        assert!(!config.check_native_errors);
    }
}
