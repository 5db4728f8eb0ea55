//! Output path construction for downloaded course media.
//!
//! Filenames are `{chapterNumber}-{title}` with an extension per artifact.
//! Titles are sanitized the same way everywhere, which keeps per-lecture
//! output files unique without any cross-task coordination.

use std::path::{Path, PathBuf};

/// Characters that cannot appear in a path component on common filesystems.
const FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '<', '>', '|'];

pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '-' } else { c })
        .collect()
}

pub fn video_path(dir: &Path, chapter_number: u32, title: &str) -> PathBuf {
    dir.join(format!("{}-{}.mp4", chapter_number, sanitize_title(title)))
}

pub fn subtitle_path(
    dir: &Path,
    chapter_number: u32,
    title: &str,
    language: &str,
    extension: &str,
) -> PathBuf {
    dir.join(format!(
        "{}-{}.{}.{}",
        chapter_number,
        sanitize_title(title),
        language,
        extension
    ))
}
