//! Progress events emitted by the download pipeline.
//!
//! The pipeline pushes these over an mpsc channel; the consumer renders
//! them (the CLI draws progress bars). Reporting is an observability side
//! effect: a closed or lagging receiver never fails a download.

use std::path::PathBuf;

/// Download ids are unique within one run and tie `Chunk`/`DownloadDone`
/// events back to their `DownloadStarted`.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Course title resolved; output directory is about to be created.
    CourseResolved { title: String },
    /// A lecture task started; `label` is `{chapterNumber}-{title}`.
    LectureStarted { label: String },
    /// A file download started. `total_bytes` comes from `content-length`
    /// and is 0 when the server does not send one.
    DownloadStarted {
        id: usize,
        file: String,
        total_bytes: u64,
    },
    /// Bytes written to disk since the previous event for this download.
    Chunk { id: usize, bytes: u64 },
    DownloadDone { id: usize },
    /// A `.vtt` was converted and replaced by this `.srt`.
    SubtitleConverted { path: PathBuf },
    /// The lecture task ended early; siblings keep running.
    LectureFailed { label: String, reason: String },
    LectureDone { label: String },
}
