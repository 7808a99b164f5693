//! Shared test utilities for the folio test suite.
//!
//! Provides a fixture content directory and lookup helpers that panic with
//! the available slugs on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let posts = FsSource::new(tmp.path()).all_posts().unwrap();
//!
//! let post = find_post(&posts, "hello-rust");
//! assert_eq!(post.tags, vec!["Rust", "Web"]);
//! ```

use crate::types::{BlogPost, Project};
use std::path::Path;
use tempfile::TempDir;

/// Copy `fixtures/content` into a fresh temp directory.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(posts: &'a [BlogPost], slug: &str) -> &'a BlogPost {
    posts.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        panic!("post '{slug}' not found. Available: {:?}", post_slugs(posts))
    })
}

/// Find a project by slug. Panics if not found.
pub fn find_project<'a>(projects: &'a [Project], slug: &str) -> &'a Project {
    projects.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = projects.iter().map(|p| p.slug.as_str()).collect();
        panic!("project '{slug}' not found. Available: {slugs:?}")
    })
}

/// All post slugs in listing order.
pub fn post_slugs(posts: &[BlogPost]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}
