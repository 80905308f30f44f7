//! Dream generation records
//!
//! A generation moves through the states
//! `processing` → `story_generated` → `completed` (or `failed`); the record
//! is first persisted once the narrative exists and updated again after the
//! placeholder media URLs are attached.

use chrono::{DateTime, Utc};
use dreamtell_common::{uuid_utils, Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Requested output format for a dream generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatType {
    /// Narrated video with optional separate audio track
    #[default]
    Video,
    /// Audio-only podcast episode
    Podcast,
}

impl FormatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::Video => "video",
            FormatType::Podcast => "podcast",
        }
    }

    /// Parse the database representation
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "video" => Ok(FormatType::Video),
            "podcast" => Ok(FormatType::Podcast),
            other => Err(Error::Internal(format!("Unknown format type: {}", other))),
        }
    }
}

/// Lifecycle state of a dream generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Accepted, story not yet generated
    Processing,
    /// Narrative generated, media URLs not yet attached
    StoryGenerated,
    /// Media URLs attached
    Completed,
    /// Generation failed
    Failed,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Processing => "processing",
            GenerationStatus::StoryGenerated => "story_generated",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
        }
    }

    /// Parse the database representation
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "processing" => Ok(GenerationStatus::Processing),
            "story_generated" => Ok(GenerationStatus::StoryGenerated),
            "completed" => Ok(GenerationStatus::Completed),
            "failed" => Ok(GenerationStatus::Failed),
            other => Err(Error::Internal(format!("Unknown generation status: {}", other))),
        }
    }
}

/// POST /api/generate-dream request body
#[derive(Debug, Clone, Deserialize)]
pub struct DreamRequest {
    /// Free-text dream description
    pub dream_text: String,
    /// Output format, defaults to video
    #[serde(default)]
    pub format_type: FormatType,
    /// Whether to attach a separate audio track (video format only)
    #[serde(default = "default_include_audio")]
    pub include_audio: bool,
    /// Client session; a fresh UUID is assigned when absent
    #[serde(default)]
    pub session_id: Option<String>,
}

fn default_include_audio() -> bool {
    true
}

/// A stored dream generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamGeneration {
    /// Unique generation identifier
    pub id: Uuid,
    /// Original dream description as submitted
    pub dream_text: String,
    /// LLM-generated narrative
    pub generated_story: String,
    /// Requested output format
    pub format_type: FormatType,
    /// Whether a separate audio track was requested
    pub include_audio: bool,
    /// Lifecycle state
    pub status: GenerationStatus,
    /// Placeholder video URL (video format only)
    pub video_url: Option<String>,
    /// Placeholder audio URL
    pub audio_url: Option<String>,
    /// Owning session
    pub session_id: String,
    /// When the generation was created
    pub timestamp: DateTime<Utc>,
}

impl DreamGeneration {
    /// Create a record for a freshly generated story, before media URLs
    /// are attached.
    pub fn new(
        dream_text: String,
        generated_story: String,
        format_type: FormatType,
        include_audio: bool,
        session_id: String,
    ) -> Self {
        Self {
            id: uuid_utils::generate(),
            dream_text,
            generated_story,
            format_type,
            include_audio,
            status: GenerationStatus::StoryGenerated,
            video_url: None,
            audio_url: None,
            session_id,
            timestamp: dreamtell_common::time::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_type_wire_names() {
        assert_eq!(serde_json::to_string(&FormatType::Video).unwrap(), "\"video\"");
        assert_eq!(serde_json::to_string(&FormatType::Podcast).unwrap(), "\"podcast\"");
        assert_eq!(
            serde_json::from_str::<FormatType>("\"podcast\"").unwrap(),
            FormatType::Podcast
        );
    }

    #[test]
    fn format_type_db_round_trip() {
        for format in [FormatType::Video, FormatType::Podcast] {
            assert_eq!(FormatType::parse(format.as_str()).unwrap(), format);
        }
        assert!(FormatType::parse("vhs").is_err());
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&GenerationStatus::StoryGenerated).unwrap(),
            "\"story_generated\""
        );
        assert_eq!(
            serde_json::from_str::<GenerationStatus>("\"completed\"").unwrap(),
            GenerationStatus::Completed
        );
    }

    #[test]
    fn status_db_round_trip() {
        for status in [
            GenerationStatus::Processing,
            GenerationStatus::StoryGenerated,
            GenerationStatus::Completed,
            GenerationStatus::Failed,
        ] {
            assert_eq!(GenerationStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(GenerationStatus::parse("done").is_err());
    }

    #[test]
    fn request_defaults() {
        let request: DreamRequest =
            serde_json::from_str(r#"{"dream_text": "I was flying"}"#).unwrap();
        assert_eq!(request.format_type, FormatType::Video);
        assert!(request.include_audio);
        assert!(request.session_id.is_none());
    }

    #[test]
    fn new_record_starts_as_story_generated() {
        let dream = DreamGeneration::new(
            "I was flying".to_string(),
            "A story about flight.".to_string(),
            FormatType::Video,
            true,
            "session-1".to_string(),
        );
        assert_eq!(dream.status, GenerationStatus::StoryGenerated);
        assert!(dream.video_url.is_none());
        assert!(dream.audio_url.is_none());
    }
}
