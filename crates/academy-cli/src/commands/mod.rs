//! Subcommand implementations and the loading they share.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use academy_core::config::{load_config_from, AcademyConfig};
use academy_core::session::CourseSession;
use academy_core::store::ContentStore;

pub mod catalog;
pub mod grade;
pub mod init;
pub mod outline;
pub mod quiz;
pub mod theme;
pub mod validate;

/// Global options shared by every subcommand.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
}

impl Context {
    pub fn config(&self) -> Result<AcademyConfig> {
        let mut config = load_config_from(self.config_path.as_deref())?;
        if let Some(dir) = &self.content_dir {
            config.content_dir = dir.clone();
        }
        Ok(config)
    }

    /// Config plus the content store it points at.
    ///
    /// A missing content directory leaves only the built-in catalog.
    pub fn load(&self) -> Result<(AcademyConfig, ContentStore)> {
        let config = self.config()?;
        let store = if config.content_dir.is_dir() {
            ContentStore::load_dir(&config.content_dir)?
        } else {
            tracing::warn!(
                "content directory {} not found, using empty content",
                config.content_dir.display()
            );
            ContentStore::new()
        };
        Ok((config, store))
    }

    /// Open a navigator session on `course_id`.
    pub fn session(&self, course_id: &str) -> Result<(AcademyConfig, CourseSession)> {
        let (config, store) = self.load()?;
        let course = store
            .course(course_id)
            .with_context(|| format!("unknown course: {course_id}"))?;
        Ok((config, CourseSession::new(Arc::new(store), course)))
    }
}

/// Convert a 1-based chapter number to an index.
pub fn chapter_index(chapter: usize) -> Result<usize> {
    anyhow::ensure!(chapter >= 1, "chapter numbers start at 1");
    Ok(chapter - 1)
}
