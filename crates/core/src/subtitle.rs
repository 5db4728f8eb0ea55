//! WebVTT to SubRip conversion.
//!
//! hahow serves captions as WebVTT; players bundled with downloaded courses
//! usually want SubRip. The two formats differ only in the header line, the
//! millisecond separator and SubRip's cue numbering, so the conversion is a
//! text rewrite: cue text, positioning and blank lines pass through as-is.

use regex::{Captures, Regex};

// Header marker, optionally followed directly by the first timestamp. The
// match is permissive: a bare `WEBVTT` header is stripped even when no
// timestamp follows it.
const HEADER_PATTERN: &str = r"WEBVTT\s+(\d{2}:)?";

// `[HH:]MM:SS.mmm --> [HH:]MM:SS.mmm` with the hour part optional.
const CUE_PATTERN: &str =
    r"((?:\d{2}:)?\d{2}:\d{2})\.(\d{3})\s+-->\s+((?:\d{2}:)?\d{2}:\d{2})\.(\d{3})";

/// Convert a WebVTT document to SubRip.
///
/// Total: malformed input simply fails to match and passes through
/// unchanged. Matched cues are numbered 1..N in document order, hour-less
/// timestamps gain a `00:` prefix and the `.` before the milliseconds
/// becomes a `,`. SubRip output never re-matches, so converting twice is
/// the same as converting once.
pub fn vtt_to_srt(source: &str) -> String {
    let header = Regex::new(HEADER_PATTERN).unwrap();
    let cue = Regex::new(CUE_PATTERN).unwrap();

    let stripped = header.replace_all(source, "$1");

    let mut number = 0;
    cue.replace_all(&stripped, |caps: &Captures| {
        number += 1;
        format!(
            "{}\n{} --> {}",
            number,
            srt_timestamp(&caps[1], &caps[2]),
            srt_timestamp(&caps[3], &caps[4])
        )
    })
    .into_owned()
}

fn srt_timestamp(time: &str, millis: &str) -> String {
    // MM:SS has a single colon; SubRip always carries the hour.
    if time.matches(':').count() == 1 {
        format!("00:{time},{millis}")
    } else {
        format!("{time},{millis}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_hour_and_comma_to_hourless_cue() {
        let out = vtt_to_srt("00:12.500 --> 00:15.000\nhello there\n");
        assert_eq!(out, "1\n00:00:12,500 --> 00:00:15,000\nhello there\n");
    }

    #[test]
    fn preserves_existing_hour_component() {
        let out = vtt_to_srt("01:00:12.500 --> 01:00:15.000\nhello\n");
        assert_eq!(out, "1\n01:00:12,500 --> 01:00:15,000\nhello\n");
    }

    #[test]
    fn numbers_cues_in_document_order() {
        let source = "WEBVTT\n\n\
            00:01.000 --> 00:02.000\nfirst\n\n\
            00:03.000 --> 00:04.000\nsecond\n\n\
            01:02:03.000 --> 01:02:04.000\nthird\n";
        let expected = "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n\
            2\n00:00:03,000 --> 00:00:04,000\nsecond\n\n\
            3\n01:02:03,000 --> 01:02:04,000\nthird\n";
        assert_eq!(vtt_to_srt(source), expected);
    }

    #[test]
    fn retains_timestamp_that_follows_the_header() {
        let out = vtt_to_srt("WEBVTT\n\n00:01.000 --> 00:02.000\ntext\n");
        assert_eq!(out, "1\n00:00:01,000 --> 00:00:02,000\ntext\n");
    }

    #[test]
    fn strips_bare_header_without_a_timestamp() {
        // Permissive variant: the marker goes away even when nothing
        // timestamp-like follows it.
        let out = vtt_to_srt("WEBVTT\n\nNOTE confidence metadata\n");
        assert_eq!(out, "NOTE confidence metadata\n");
    }

    #[test]
    fn passes_through_documents_without_cues() {
        let source = "no timestamps here\njust prose\n";
        assert_eq!(vtt_to_srt(source), source);
    }

    #[test]
    fn converting_twice_equals_converting_once() {
        let once = vtt_to_srt("WEBVTT\n\n00:01.000 --> 00:02.000\nhello\n");
        assert_eq!(vtt_to_srt(&once), once);
    }

    #[test]
    fn cue_text_between_blocks_is_untouched() {
        let source = "00:01.000 --> 00:02.000\nline with --> arrow and 12.345 inside\n";
        let out = vtt_to_srt(source);
        assert!(out.ends_with("line with --> arrow and 12.345 inside\n"));
    }
}
