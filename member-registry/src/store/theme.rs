//! Theme preference, stored beside the roster as a plain string

use shared::Theme;
use std::sync::Arc;

use super::backend::KeyValueBackend;
use super::error::StorageResult;

pub const THEME_KEY: &str = "pstcsl_theme";

#[derive(Clone)]
pub struct ThemeStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl ThemeStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Stored theme, falling back to light on absence or any read problem
    pub fn load(&self) -> Theme {
        match self.backend.get(THEME_KEY) {
            Ok(Some(raw)) => std::str::from_utf8(&raw)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| {
                    tracing::warn!("Unrecognised stored theme, using light");
                    Theme::default()
                }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read theme preference");
                Theme::default()
            }
        }
    }

    pub fn store(&self, theme: Theme) -> StorageResult<()> {
        self.backend.put(THEME_KEY, theme.as_str().as_bytes())
    }

    /// Flip and persist; returns the new theme
    pub fn toggle(&self) -> StorageResult<Theme> {
        let next = self.load().toggle();
        self.store(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RedbBackend;

    #[test]
    fn test_defaults_to_light_and_toggles() {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(RedbBackend::open_in_memory(None).unwrap());
        let themes = ThemeStore::new(backend.clone());

        assert_eq!(themes.load(), Theme::Light);
        assert_eq!(themes.toggle().unwrap(), Theme::Dark);
        assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some(&b"dark"[..]));
        assert_eq!(themes.toggle().unwrap(), Theme::Light);
    }

    #[test]
    fn test_garbage_theme_falls_back_to_light() {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(RedbBackend::open_in_memory(None).unwrap());
        backend.put(THEME_KEY, b"sepia").unwrap();
        assert_eq!(ThemeStore::new(backend).load(), Theme::Light);
    }
}
