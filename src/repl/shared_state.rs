use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{DisplayConfig, OutputFormat};

/// Shared state between REPL and executor.
///
/// Only the pager flag changes during a session (`\pager`); clones share it.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Project the session is bound to
    project_id: String,

    /// Whether output goes through the pager
    pager_enabled: Arc<RwLock<bool>>,

    /// Output format from the display config
    output_format: OutputFormat,

    /// Color output from the display config
    color_enabled: bool,
}

impl SharedState {
    /// Create a new shared state.
    ///
    /// * `project_id` - Project shown in the prompt
    pub fn new(project_id: String) -> Self {
        Self::with_config(project_id, &DisplayConfig::default())
    }

    /// Create a new shared state with display configuration.
    ///
    /// * `project_id` - Project shown in the prompt
    /// * `display_config` - Display configuration settings
    pub fn with_config(project_id: String, display_config: &DisplayConfig) -> Self {
        Self {
            project_id,
            pager_enabled: Arc::new(RwLock::new(display_config.pager)),
            output_format: display_config.format,
            color_enabled: display_config.color_output,
        }
    }

    /// Get the project id.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Check whether the pager is on.
    pub fn is_pager_enabled(&self) -> bool {
        *self.pager_enabled.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Turn the pager on or off.
    pub fn set_pager_enabled(&self, enabled: bool) {
        *self.pager_enabled.write().unwrap_or_else(PoisonError::into_inner) = enabled;
    }

    /// Get the output format.
    pub fn get_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Get the color setting.
    pub fn get_color_enabled(&self) -> bool {
        self.color_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_display_config() {
        let display = DisplayConfig {
            pager: true,
            format: OutputFormat::Json,
            color_output: false,
            ..DisplayConfig::default()
        };
        let state = SharedState::with_config("demo".to_string(), &display);

        assert_eq!(state.project_id(), "demo");
        assert!(state.is_pager_enabled());
        assert_eq!(state.get_format(), OutputFormat::Json);
        assert!(!state.get_color_enabled());
    }

    #[test]
    fn test_clones_share_pager_flag() {
        let state = SharedState::new("demo".to_string());
        let other = state.clone();

        other.set_pager_enabled(true);
        assert!(state.is_pager_enabled());

        state.set_pager_enabled(false);
        assert!(!other.is_pager_enabled());
    }
}
