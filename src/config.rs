use crate::surface::LockScope;
use log::warn;
use std::time::Duration;

/// ~60 Hz pacing shared by the ripple threads and the refresh thread.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Start-time settings. Nothing here changes while the window is open.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// Ripple on every mouse move, not only on left click.
    pub drag_enabled: bool,
    pub frame_interval: Duration,
    pub lock_scope: LockScope,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            title: "ripple".to_string(),
            width: 640,
            height: 480,
            drag_enabled: cfg!(feature = "drag"),
            frame_interval: FRAME_INTERVAL,
            lock_scope: LockScope::Pixel,
        }
    }
}

impl Config {
    /// Defaults plus `RIPPLE_DRAG` / `RIPPLE_LOCK_SCOPE` overrides.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var("RIPPLE_DRAG").ok().as_deref(),
            std::env::var("RIPPLE_LOCK_SCOPE").ok().as_deref(),
        )
    }

    fn with_overrides(mut self, drag: Option<&str>, lock_scope: Option<&str>) -> Self {
        if let Some(v) = drag {
            match parse_flag(v) {
                Some(on) => self.drag_enabled = on,
                None => warn!("ignoring RIPPLE_DRAG={v:?}, expected on/off"),
            }
        }
        if let Some(v) = lock_scope {
            match parse_lock_scope(v) {
                Some(scope) => self.lock_scope = scope,
                None => warn!("ignoring RIPPLE_LOCK_SCOPE={v:?}, expected pixel or frame"),
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn parse_lock_scope(value: &str) -> Option<LockScope> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pixel" => Some(LockScope::Pixel),
        "frame" => Some(LockScope::Frame),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.lock_scope, LockScope::Pixel);
        assert_eq!(config.drag_enabled, cfg!(feature = "drag"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(Some("off"), Some("Frame"));
        assert!(!config.drag_enabled);
        assert_eq!(config.lock_scope, LockScope::Frame);

        let config = Config::default().with_overrides(Some("yes"), Some("bogus"));
        assert!(config.drag_enabled);
        assert_eq!(config.lock_scope, LockScope::Pixel);
    }
}
