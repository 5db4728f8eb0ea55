//! Course download pipeline.
//!
//! Walks the course's chapter/item tree and processes every lecture with a
//! bounded number of concurrent tasks. Each task owns its output files, so
//! tasks never coordinate beyond the concurrency limit.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::{StreamExt, stream};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::api::ApiClient;
use crate::config::Settings;
use crate::download::fetch_to_file;
use crate::error::{HahowError, Result};
use crate::paths::{sanitize_title, subtitle_path, video_path};
use crate::progress::ProgressEvent;
use crate::subtitle::vtt_to_srt;

/// Lecture tasks running at the same time.
pub const DEFAULT_CONCURRENCY: usize = 3;

#[derive(Debug)]
pub struct CourseDownloader {
    client: ApiClient,
    course_id: String,
    concurrency: usize,
    next_download_id: AtomicUsize,
}

impl CourseDownloader {
    /// Validate the settings and build the API client. Fails before any
    /// network activity when the URL or the token is unusable.
    pub fn new(settings: &Settings) -> Result<Self> {
        let course_url = settings.course_url()?;
        let authorization = settings.authorization()?;
        let course_id = ApiClient::extract_course_id(course_url)?;
        let client = ApiClient::new(authorization)?;
        Ok(Self {
            client,
            course_id,
            concurrency: DEFAULT_CONCURRENCY,
            next_download_id: AtomicUsize::new(0),
        })
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Download every lecture of the course into a directory named after
    /// the course title. A failed lecture is logged and skipped; it never
    /// cancels its siblings, and the run itself only fails on course-level
    /// problems (title or item-tree fetch).
    pub async fn run(&self, events: mpsc::Sender<ProgressEvent>) -> Result<()> {
        let course = self.client.fetch_course(&self.course_id).await?;
        let course_dir = PathBuf::from(sanitize_title(&course.title));
        tokio::fs::create_dir_all(&course_dir).await?;
        let _ = events
            .send(ProgressEvent::CourseResolved {
                title: course.title.clone(),
            })
            .await;

        let chapters = self.client.fetch_course_items(&self.course_id).await?;
        let lectures: Vec<(u32, String)> = chapters
            .into_iter()
            .flat_map(|chapter| chapter.items)
            .filter(|item| item.is_lecture())
            .filter_map(|item| item.content.map(|content| (item.chapter_number, content.id)))
            .collect();
        info!(
            course = %course.title,
            lectures = lectures.len(),
            "course resolved"
        );

        let course_dir = &course_dir;
        let events_ref = &events;
        stream::iter(lectures)
            .for_each_concurrent(self.concurrency, |(chapter_number, lecture_id)| async move {
                if let Err(err) = self
                    .process_lecture(chapter_number, &lecture_id, course_dir, events_ref)
                    .await
                {
                    error!(lecture = %lecture_id, chapter = chapter_number, "lecture failed: {err}");
                    let _ = events_ref
                        .send(ProgressEvent::LectureFailed {
                            label: format!("chapter {chapter_number} lecture {lecture_id}"),
                            reason: err.to_string(),
                        })
                        .await;
                }
            })
            .await;

        Ok(())
    }

    /// One lecture: metadata, then the best video, then every subtitle.
    /// The first error ends the task; whatever was already written stays.
    async fn process_lecture(
        &self,
        chapter_number: u32,
        lecture_id: &str,
        course_dir: &Path,
        events: &mpsc::Sender<ProgressEvent>,
    ) -> Result<()> {
        let lecture = self.client.fetch_lecture(lecture_id).await?;
        let label = format!("{}-{}", chapter_number, sanitize_title(&lecture.title));
        let _ = events
            .send(ProgressEvent::LectureStarted {
                label: label.clone(),
            })
            .await;

        // Lectures without any rendition (text-only content) are fine;
        // their subtitles, if any, are still fetched.
        if let Some(video) = lecture.best_video() {
            let dest = video_path(course_dir, chapter_number, &lecture.title);
            self.download(&video.link, &dest, events).await?;
        }

        for subtitle in &lecture.video.subtitles {
            let vtt = subtitle_path(
                course_dir,
                chapter_number,
                &lecture.title,
                &subtitle.language,
                "vtt",
            );
            self.download(&subtitle.link, &vtt, events).await?;
            let srt = convert_subtitle(&vtt).await?;
            let _ = events
                .send(ProgressEvent::SubtitleConverted { path: srt })
                .await;
        }

        let _ = events.send(ProgressEvent::LectureDone { label }).await;
        Ok(())
    }

    async fn download(
        &self,
        url: &str,
        dest: &Path,
        events: &mpsc::Sender<ProgressEvent>,
    ) -> Result<()> {
        let id = self.next_download_id.fetch_add(1, Ordering::Relaxed);
        fetch_to_file(self.client.http(), url, dest, id, events).await
    }
}

/// Rewrite a downloaded `.vtt` as `.srt` next to it. The original is
/// removed only after the converted file is fully written.
async fn convert_subtitle(vtt: &Path) -> Result<PathBuf> {
    let srt = vtt.with_extension("srt");
    let source = tokio::fs::read_to_string(vtt)
        .await
        .map_err(|err| conversion_error(vtt, err))?;
    let converted = vtt_to_srt(&source);
    tokio::fs::write(&srt, converted)
        .await
        .map_err(|err| conversion_error(vtt, err))?;
    tokio::fs::remove_file(vtt)
        .await
        .map_err(|err| conversion_error(vtt, err))?;
    Ok(srt)
}

fn conversion_error(vtt: &Path, err: std::io::Error) -> HahowError {
    HahowError::Conversion {
        path: vtt.to_path_buf(),
        reason: err.to_string(),
    }
}
