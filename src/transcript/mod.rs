//! Transcript retrieval with ordered language fallback
//!
//! Language candidates are tried in sequence; the first fetch that yields a
//! transcript wins. Exhausting the list is a typed
//! [`Error::NoTranscriptAvailable`], never a bare null.

use async_trait::async_trait;

use crate::error::{Error, Result};

/// A transcript fetched in one of the candidate languages
#[derive(Debug, Clone)]
pub struct FetchedTranscript {
    /// Language the transcript was found in
    pub language: String,
    /// Raw transcript text
    pub text: String,
}

/// External collaborator that looks up a transcript for a video in one
/// language. Returning `Ok(None)` means "not available in this language";
/// an `Err` is a transport failure and is propagated.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Option<String>>;
}

/// Try each language candidate in order; first success wins.
pub async fn fetch_first_available(
    fetcher: &dyn TranscriptFetcher,
    video_id: &str,
    languages: &[String],
) -> Result<FetchedTranscript> {
    for language in languages {
        if let Some(text) = fetcher.fetch(video_id, language).await? {
            tracing::debug!("Transcript for '{}' found in '{}'", video_id, language);
            return Ok(FetchedTranscript {
                language: language.clone(),
                text,
            });
        }
    }

    Err(Error::NoTranscriptAvailable {
        video_id: video_id.to_string(),
        languages: languages.to_vec(),
    })
}
