//! On-disk manifest fixtures.

use std::path::{Path, PathBuf};

/// A project directory with a `Project.toml`, built up target by target.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    name: String,
    targets: Vec<String>,
    extra: String,
}

impl ProjectFixture {
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            targets: Vec::new(),
            extra: String::new(),
        }
    }

    /// Add a target. `dependencies` are inline TOML tables such as
    /// `{ target = "Lib", path = "../Lib" }`.
    pub fn target(mut self, name: &str, product: &str, dependencies: &[&str]) -> Self {
        self.targets.push(format!(
            "[[targets]]\nname = \"{}\"\nproduct = \"{}\"\ndependencies = [{}]\n",
            name,
            product,
            dependencies.join(", ")
        ));
        self
    }

    /// Append raw TOML after the targets.
    pub fn with_toml(mut self, toml: impl Into<String>) -> Self {
        self.extra.push_str(&toml.into());
        self
    }

    /// Render the manifest.
    pub fn manifest(&self) -> String {
        let mut out = format!("[project]\nname = \"{}\"\n", self.name);
        for target in &self.targets {
            out.push('\n');
            out.push_str(target);
        }
        out.push_str(&self.extra);
        out
    }

    /// Write `<base>/<name>/Project.toml` and return the project directory.
    pub fn write_to(&self, base: &Path) -> std::io::Result<PathBuf> {
        let dir = base.join(&self.name);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("Project.toml"), self.manifest())?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestModelLoader;

    #[test]
    fn test_fixture_parses() {
        let manifest = ProjectFixture::new("App")
            .target("App", "app", &[r#"{ target = "Core" }"#])
            .target("Core", "framework", &[])
            .manifest();

        let project = ManifestModelLoader::parse_project(&manifest, Path::new("/p/App")).unwrap();
        assert_eq!(project.targets().len(), 2);
        assert_eq!(project.target("App").unwrap().dependencies.len(), 1);
    }
}
