//! Data model for the hahow.in course API.

use serde::Deserialize;

/// `GET /courses/{id}` response. Only the title is needed; it names the
/// output directory.
#[derive(Debug, Deserialize)]
pub struct Course {
    pub title: String,
}

/// One entry of the `GET /courses/{id}/modules/items` response.
#[derive(Debug, Deserialize)]
pub struct Chapter {
    #[serde(default)]
    pub items: Vec<CourseItem>,
}

/// A chapter item. Items of type `LECTURE` carry downloadable media; other
/// types (quizzes, articles) are skipped.
#[derive(Debug, Deserialize)]
pub struct CourseItem {
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(rename = "chapterNumber", default)]
    pub chapter_number: u32,
    #[serde(default)]
    pub content: Option<ItemContent>,
}

#[derive(Debug, Deserialize)]
pub struct ItemContent {
    #[serde(rename = "_id", default)]
    pub id: String,
}

impl CourseItem {
    pub fn is_lecture(&self) -> bool {
        self.item_type == "LECTURE"
    }
}

/// `GET /lectures/{id}` response.
#[derive(Debug, Deserialize)]
pub struct Lecture {
    pub title: String,
    #[serde(default)]
    pub video: LectureVideo,
}

#[derive(Debug, Default, Deserialize)]
pub struct LectureVideo {
    #[serde(default)]
    pub videos: Vec<VideoRendition>,
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
}

/// One of possibly several encodes of the same lecture video.
#[derive(Debug, Deserialize)]
pub struct VideoRendition {
    pub link: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub struct SubtitleTrack {
    pub link: String,
    pub language: String,
}

impl Lecture {
    /// The largest rendition is assumed to be the highest quality one.
    /// `None` when the lecture has no video at all.
    pub fn best_video(&self) -> Option<&VideoRendition> {
        self.video.videos.iter().max_by_key(|video| video.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_video_picks_largest_rendition() {
        let lecture: Lecture = serde_json::from_str(
            r#"{
                "title": "Intro",
                "video": {
                    "videos": [
                        { "link": "http://cdn/a.mp4", "size": 100 },
                        { "link": "http://cdn/b.mp4", "size": 500 },
                        { "link": "http://cdn/c.mp4", "size": 300 }
                    ],
                    "subtitles": []
                }
            }"#,
        )
        .unwrap();
        assert_eq!(lecture.best_video().unwrap().size, 500);
        assert_eq!(lecture.best_video().unwrap().link, "http://cdn/b.mp4");
    }

    #[test]
    fn best_video_is_none_without_renditions() {
        let lecture: Lecture =
            serde_json::from_str(r#"{ "title": "Text only", "video": { "videos": [] } }"#).unwrap();
        assert!(lecture.best_video().is_none());
    }

    #[test]
    fn lecture_without_video_object_parses() {
        let lecture: Lecture = serde_json::from_str(r#"{ "title": "Announcement" }"#).unwrap();
        assert!(lecture.best_video().is_none());
        assert!(lecture.video.subtitles.is_empty());
    }

    #[test]
    fn course_items_parse_mixed_types() {
        let chapters: Vec<Chapter> = serde_json::from_str(
            r#"[
                {
                    "items": [
                        { "type": "LECTURE", "chapterNumber": 1, "content": { "_id": "aaa" } },
                        { "type": "QUIZ", "chapterNumber": 1, "content": { "title": "Quiz 1" } },
                        { "type": "ARTICLE", "chapterNumber": 2 }
                    ]
                }
            ]"#,
        )
        .unwrap();
        let items: Vec<&CourseItem> = chapters.iter().flat_map(|c| c.items.iter()).collect();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_lecture());
        assert_eq!(items[0].content.as_ref().unwrap().id, "aaa");
        assert!(!items[1].is_lecture());
        assert!(!items[2].is_lecture());
    }
}
