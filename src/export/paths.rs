//! Output file naming

use std::path::{Path, PathBuf};

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
///
/// Each character maps to exactly one `_`, so the result is idempotent and
/// has as many characters as the input.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Compose `{dir}/{asset_id}_{version}.{classifier}.zip` from sanitized parts.
///
/// Distinct inputs may map to the same path; later downloads overwrite
/// earlier ones.
pub fn compose_output_path(dir: &Path, asset_id: &str, version: &str, classifier: &str) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}.zip",
        sanitize(asset_id),
        sanitize(version),
        sanitize(classifier)
    ))
}

/// Like [`compose_output_path`], creating `dir` first if it is missing.
pub async fn output_path(
    dir: &Path,
    asset_id: &str,
    version: &str,
    classifier: &str,
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    Ok(compose_output_path(dir, asset_id, version, classifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_safe(value: &str) -> bool {
        value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize("orders-api_v2"), "orders-api_v2");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize("1.0.2"), "1_0_2");
        assert_eq!(sanitize("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize("a b\tc"), "a_b_c");
        assert_eq!(sanitize("café"), "caf_");
        assert_eq!(sanitize("日本"), "__");
    }

    #[test]
    fn test_sanitize_is_idempotent_and_total() {
        let samples = [
            "orders-api",
            "1.0.0-SNAPSHOT",
            "fat/raml",
            "名前 with spaces & symbols!",
            "emoji 🚀 rocket",
            "\u{0}\u{7f}control",
            "",
        ];

        for sample in samples {
            let once = sanitize(sample);
            assert!(is_safe(&once), "{:?} -> {:?}", sample, once);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
            assert_eq!(once.chars().count(), sample.chars().count());
        }
    }

    #[test]
    fn test_compose_output_path_is_deterministic() {
        let dir = Path::new("output");
        let first = compose_output_path(dir, "orders-api", "1.0.2", "raml");
        let second = compose_output_path(dir, "orders-api", "1.0.2", "raml");

        assert_eq!(first, second);
        assert_eq!(first, Path::new("output").join("orders-api_1_0_2.raml.zip"));
    }

    #[test]
    fn test_compose_output_path_collisions() {
        let dir = Path::new("output");
        assert_eq!(
            compose_output_path(dir, "a.b", "1", "oas"),
            compose_output_path(dir, "a/b", "1", "oas")
        );
    }

    #[tokio::test]
    async fn test_output_path_creates_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("output");
        assert!(!dir.exists());

        let path = output_path(&dir, "orders", "1.0.0", "oas").await.unwrap();

        assert!(dir.is_dir());
        assert_eq!(path, dir.join("orders_1_0_0.oas.zip"));
        assert!(!path.exists());

        // Existing directory is fine
        output_path(&dir, "orders", "1.0.0", "oas").await.unwrap();
    }
}
