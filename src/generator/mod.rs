//! Generator module - writes route data as static JSON files

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::helpers::is_file_name_safe;
use crate::index::PostIndex;
use crate::routes::{self, About, Route};

/// Writes every route of an index under the public directory
///
/// Files are named after the decoded route, so `/tags/c%2B%2B` lands in
/// `tags/c++.json` where a static host looks for it.
pub struct Generator {
    config: SiteConfig,
    public_dir: PathBuf,
}

impl Generator {
    /// Create a new generator
    pub fn new(config: &SiteConfig, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: config.clone(),
            public_dir: public_dir.into(),
        }
    }

    /// Generate all route files, returning how many were written
    pub fn generate(&self, index: &PostIndex, about: Option<&About>) -> Result<usize> {
        let routes = routes::static_routes(index, &self.config);
        // Check every name before writing anything
        let files = routes
            .iter()
            .map(|route| self.output_path(route))
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(&self.public_dir)?;

        for (route, file) in routes.iter().zip(&files) {
            let value = route
                .resolve(index, &self.config)
                .with_context(|| format!("Failed to build route {}", route.path()))?;
            self.write_json(file, &value)?;
        }

        let mut written = routes.len();

        if let Some(about) = about {
            self.write_json(&self.public_dir.join("about.json"), about)?;
            written += 1;
        }

        // Route list for the presentation layer's static export
        let paths: Vec<String> = routes.iter().map(Route::path).collect();
        self.write_json(&self.public_dir.join("routes.json"), &paths)?;
        written += 1;

        Ok(written)
    }

    /// Output file for a route: `Route::TagPosts("c++")` -> `tags/c++.json`
    fn output_path(&self, route: &Route) -> Result<PathBuf> {
        let (collection, param) = route.segments();
        let Some(param) = param else {
            return Ok(self.public_dir.join(format!("{}.json", collection)));
        };
        if !is_file_name_safe(param) {
            anyhow::bail!(
                "Cannot write route {}: {:?} is not usable as a file name",
                route.path(),
                param
            );
        }
        Ok(self
            .public_dir
            .join(collection)
            .join(format!("{}.json", param)))
    }

    fn write_json<T: Serialize + ?Sized>(&self, file: &Path, value: &T) -> Result<()> {
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(value)?;
        fs::write(file, json).with_context(|| format!("Failed to write {:?}", file))?;
        tracing::debug!("Generated: {}", relative(&self.public_dir, file));
        Ok(())
    }
}

fn relative(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tests::{post, sample_index};

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_writes_every_route() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        let generator = Generator::new(&SiteConfig::default(), &public);

        let about = About {
            title: "About".to_string(),
            text: "<p>hi</p>".to_string(),
        };
        let written = generator.generate(&sample_index(), Some(&about)).unwrap();
        // posts, posts/1, 4 reads, tags, 3 tag pages, about, routes
        assert_eq!(written, 12);

        let all = read_json(&public.join("posts.json"));
        assert_eq!(all.as_array().unwrap().len(), 4);

        let page = read_json(&public.join("posts/1.json"));
        assert_eq!(page["numPages"], 1);

        let read = read_json(&public.join("read/c.json"));
        assert_eq!(read["post"]["title"], "Title c");

        let tags = read_json(&public.join("tags.json"));
        assert_eq!(tags, serde_json::json!(["life", "rust", "web"]));

        let web = read_json(&public.join("tags/web.json"));
        assert_eq!(web.as_array().unwrap().len(), 2);

        assert_eq!(read_json(&public.join("about.json"))["title"], "About");
        let routes = read_json(&public.join("routes.json"));
        assert_eq!(routes[0], "/posts");
    }

    #[test]
    fn test_files_use_decoded_names() {
        let dir = tempfile::tempdir().unwrap();
        let index = PostIndex::new(vec![post("héllo", 1, &["c++", "a b"])]);
        let generator = Generator::new(&SiteConfig::default(), dir.path());

        generator.generate(&index, None).unwrap();
        assert!(dir.path().join("read/héllo.json").is_file());
        assert!(dir.path().join("tags/c++.json").is_file());
        assert!(dir.path().join("tags/a b.json").is_file());
        assert!(!dir.path().join("about.json").exists());

        let routes = read_json(&dir.path().join("routes.json"));
        assert!(routes
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("/tags/c%2B%2B")));
    }

    #[test]
    fn test_unsafe_names_rejected_before_writing() {
        for index in [
            PostIndex::new(vec![post("a/b", 1, &[])]),
            PostIndex::new(vec![post("..", 1, &[])]),
            PostIndex::new(vec![post("", 1, &[])]),
            PostIndex::new(vec![post("ok", 1, &[""])]),
        ] {
            let dir = tempfile::tempdir().unwrap();
            let public = dir.path().join("public");
            let generator = Generator::new(&SiteConfig::default(), &public);

            assert!(generator.generate(&index, None).is_err());
            assert!(!public.exists());
        }
    }
}
