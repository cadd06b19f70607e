//! App-shell manifest and cache version

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Prefix shared by every bucket this app creates
pub const BUCKET_PREFIX: &str = "box-breathing-cache-";

/// Assets needed to render the app offline
pub const DEFAULT_SHELL: [&str; 6] = [
    "/",
    "/index.html",
    "/app.js",
    "/manifest.json",
    "/icon-192x192.png",
    "/icon-512x512.png",
];

/// Page served to offline navigations
pub const DEFAULT_FALLBACK: &str = "/index.html";

/// Manifest validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ManifestError {
    /// Version tag is empty
    EmptyVersion,
    /// No shell assets listed
    EmptyShell,
    /// Shell URL not rooted at `/`
    RelativeUrl,
    /// Fallback page is not part of the shell
    FallbackNotInShell,
}

impl core::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ManifestError::EmptyVersion => f.write_str("cache version is empty"),
            ManifestError::EmptyShell => f.write_str("app shell is empty"),
            ManifestError::RelativeUrl => f.write_str("shell URL must start with '/'"),
            ManifestError::FallbackNotInShell => f.write_str("fallback page is not in the app shell"),
        }
    }
}

/// Deployment version tag
///
/// Every deployment that changes the shell should bump this; activation then
/// drops the buckets of all earlier versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheVersion(String);

impl CacheVersion {
    pub fn new(tag: &str) -> Result<Self, ManifestError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ManifestError::EmptyVersion);
        }
        Ok(Self(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bucket holding this version's entries
    pub fn bucket_name(&self) -> String {
        format!("{}{}", BUCKET_PREFIX, self.0)
    }
}

/// The app shell: URLs pre-cached on install plus the offline fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    shell: Vec<String>,
    fallback: String,
}

impl Manifest {
    pub fn new<I, U>(shell: I, fallback: &str) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = U>,
        U: AsRef<str>,
    {
        let mut urls: Vec<String> = Vec::new();
        for url in shell {
            let url = url.as_ref();
            if !url.starts_with('/') {
                return Err(ManifestError::RelativeUrl);
            }
            if !urls.iter().any(|u| u == url) {
                urls.push(url.to_string());
            }
        }

        if urls.is_empty() {
            return Err(ManifestError::EmptyShell);
        }
        if !urls.iter().any(|u| u == fallback) {
            return Err(ManifestError::FallbackNotInShell);
        }

        Ok(Self {
            shell: urls,
            fallback: fallback.to_string(),
        })
    }

    pub fn shell(&self) -> &[String] {
        &self.shell
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn contains(&self, url: &str) -> bool {
        self.shell.iter().any(|u| u == url)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.iter().map(|u| u.to_string()).collect(),
            fallback: DEFAULT_FALLBACK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name() {
        let version = CacheVersion::new("v1").unwrap();
        assert_eq!(version.bucket_name(), "box-breathing-cache-v1");
        assert_eq!(CacheVersion::new("  "), Err(ManifestError::EmptyVersion));
    }

    #[test]
    fn test_default_shell() {
        let manifest = Manifest::default();
        assert_eq!(manifest.shell().len(), 6);
        assert!(manifest.contains("/"));
        assert!(manifest.contains("/icon-512x512.png"));
        assert_eq!(manifest.fallback(), "/index.html");
    }

    #[test]
    fn test_manifest_validation() {
        assert_eq!(
            Manifest::new(["/index.html", "app.js"], "/index.html"),
            Err(ManifestError::RelativeUrl)
        );
        assert_eq!(
            Manifest::new(Vec::<String>::new(), "/index.html"),
            Err(ManifestError::EmptyShell)
        );
        assert_eq!(
            Manifest::new(["/", "/app.js"], "/index.html"),
            Err(ManifestError::FallbackNotInShell)
        );
    }

    #[test]
    fn test_duplicates_collapsed() {
        let manifest = Manifest::new(["/index.html", "/app.js", "/index.html"], "/index.html").unwrap();
        assert_eq!(manifest.shell(), ["/index.html", "/app.js"]);
    }
}
