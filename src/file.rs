use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

/// Extensions the pipeline will pick up. Matching is by extension only;
/// the decoder decides later whether the content is actually readable.
pub const SUPPORTED_EXTENSIONS: [&str; 8] = [
    "jpg", "jpeg", "png", "gif", "bmp", "heic", "tif", "tiff",
];

/// Webflow rejects asset names longer than this, not counting the extension.
pub const MAX_SANITIZED_LEN: usize = 94;

fn sanitize_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap())
}

pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Derive the output `.webp` file name for an input path. With `sanitize`
/// set, the stem is rewritten to the character set Webflow accepts for
/// asset names and truncated to its length limit.
pub fn webp_file_name(input: &Path, sanitize: bool) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = if sanitize {
        let mut sanitized = sanitize_pattern().replace_all(&stem, "_").into_owned();
        // all ASCII after substitution, so byte truncation is safe
        sanitized.truncate(MAX_SANITIZED_LEN);
        sanitized
    } else {
        stem
    };
    format!("{base}.webp")
}

/// Supported image files directly inside `dir`, non-recursive, in a stable
/// listing order.
pub fn collect_directory_images(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_supported_extensions_case_insensitive() {
        for name in [
            "a.jpg", "a.JPG", "a.jpeg", "a.png", "a.PNG", "a.gif", "a.bmp", "a.heic", "a.tif",
            "a.TIFF",
        ] {
            assert!(is_supported_extension(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn rejects_unsupported_extensions() {
        for name in ["doc.pdf", "archive.zip", "clip.webp", "noext", "image.svg"] {
            assert!(!is_supported_extension(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn plain_name_keeps_original_stem() {
        assert_eq!(
            webp_file_name(Path::new("/tmp/Photo Name!.JPG"), false),
            "Photo Name!.webp"
        );
    }

    #[test]
    fn sanitized_name_replaces_disallowed_chars() {
        assert_eq!(
            webp_file_name(Path::new("/tmp/Photo Name!.JPG"), true),
            "Photo_Name_.webp"
        );
    }

    #[test]
    fn sanitizing_is_idempotent_on_clean_names() {
        assert_eq!(
            webp_file_name(Path::new("clean_name-42.png"), true),
            "clean_name-42.webp"
        );
    }

    #[test]
    fn sanitized_name_is_truncated() {
        let long = "x".repeat(200);
        let name = webp_file_name(Path::new(&format!("{long}.png")), true);
        assert_eq!(name.len(), MAX_SANITIZED_LEN + ".webp".len());
        assert!(name.ends_with(".webp"));
    }
}
