//! Placeholder media URL synthesis
//!
//! No media is produced: URLs are string-formatted against a static host so
//! clients can exercise the full response shape. A real pipeline would
//! replace this module wholesale.

use uuid::Uuid;

use crate::models::{DreamGeneration, FormatType};

const MEDIA_BASE_URL: &str = "https://example.com";

/// Placeholder video URL for a generation
pub fn video_url(id: Uuid) -> String {
    format!("{}/video/{}.mp4", MEDIA_BASE_URL, id)
}

/// Placeholder audio track URL for a video generation
pub fn audio_url(id: Uuid) -> String {
    format!("{}/audio/{}.mp3", MEDIA_BASE_URL, id)
}

/// Placeholder podcast episode URL
pub fn podcast_url(id: Uuid) -> String {
    format!("{}/podcast/{}.mp3", MEDIA_BASE_URL, id)
}

/// Attach placeholder media URLs to a generation record.
///
/// Video format gets a video URL and, when requested, a separate audio
/// track; podcast format gets a single audio URL.
pub fn attach_placeholder_media(dream: &mut DreamGeneration) {
    match dream.format_type {
        FormatType::Video => {
            dream.video_url = Some(video_url(dream.id));
            if dream.include_audio {
                dream.audio_url = Some(audio_url(dream.id));
            }
        }
        FormatType::Podcast => {
            dream.audio_url = Some(podcast_url(dream.id));
        }
    }
}
