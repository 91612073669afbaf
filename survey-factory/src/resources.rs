//! Lookup of images and HTML pages named by a survey document.

use std::path::PathBuf;

/// Resolves resource names found in a survey document.
///
/// The factory stores whatever the finder returns; `None` drops the reference.
pub trait ResourceFinder {
    fn image(&self, name: &str) -> Option<String>;

    fn html(&self, name: &str) -> Option<String>;
}

/// Keeps every name as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResources;

impl ResourceFinder for PassthroughResources {
    fn image(&self, name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn html(&self, name: &str) -> Option<String> {
        Some(name.to_string())
    }
}

/// Resolves names against files in a directory.
///
/// Images are looked up as `<name>.png` unless the name has an extension;
/// HTML pages as `<name>.html`. Missing files resolve to `None`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn find(&self, name: &str, extension: &str) -> Option<String> {
        let mut path = self.root.join(name);
        if path.extension().is_none() {
            path.set_extension(extension);
        }
        if path.is_file() {
            Some(path.display().to_string())
        } else {
            tracing::debug!(name = %name, root = %self.root.display(), "resource not found");
            None
        }
    }
}

impl ResourceFinder for DirectoryResources {
    fn image(&self, name: &str) -> Option<String> {
        self.find(name, "png")
    }

    fn html(&self, name: &str) -> Option<String> {
        self.find(name, "html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_keeps_names() {
        assert_eq!(PassthroughResources.image("logo").as_deref(), Some("logo"));
        assert_eq!(PassthroughResources.html("consent").as_deref(), Some("consent"));
    }

    #[test]
    fn directory_misses_resolve_to_none() {
        let resources = DirectoryResources::new(std::env::temp_dir().join("no-such-survey-dir"));
        assert!(resources.image("logo").is_none());
        assert!(resources.html("consent").is_none());
    }

    #[test]
    fn directory_finds_existing_files() {
        let dir = std::env::temp_dir().join(format!("survey-resources-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("consent.html"), "<p>hi</p>").unwrap();

        let found = DirectoryResources::new(&dir).html("consent").unwrap();
        assert!(found.ends_with("consent.html"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
