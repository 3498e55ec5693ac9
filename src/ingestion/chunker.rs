//! Chunking of normalized text into bounded, sentence-respecting spans

use regex::Regex;

use crate::config::{ChunkPolicy, ChunkingConfig};
use crate::types::Chunk;

/// Splits normalized text into an ordered sequence of chunks.
///
/// The sentence policy greedily accumulates sentences and closes a chunk
/// when adding the next sentence would push the buffer to `max_chars` or
/// beyond. A single sentence longer than `max_chars` is emitted whole as an
/// oversized chunk; content is never dropped. The fixed-window policy slices
/// pure character windows with no sentence awareness and no overlap, which
/// loses sentence fidelity at boundaries but never loses characters.
pub struct Chunker {
    max_chars: usize,
    policy: ChunkPolicy,
    sentence_end: Regex,
}

impl Chunker {
    /// Create a chunker from configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            max_chars: config.max_chars.max(1),
            policy: config.policy,
            // Sentence terminator followed by whitespace. The text handed to
            // the chunker is whitespace-normalized, so the gap is a single
            // space in practice.
            sentence_end: Regex::new(r"[.!?]\s+").expect("sentence boundary regex"),
        }
    }

    /// Chunk `text` into ordered chunks owned by `document_id`.
    ///
    /// Empty input produces an empty sequence; the pipeline treats that as
    /// an ingest failure, never as a valid zero-chunk corpus.
    pub fn chunk(&self, document_id: &str, text: &str) -> Vec<Chunk> {
        let pieces = match self.policy {
            ChunkPolicy::Sentence => self.chunk_sentences(text),
            ChunkPolicy::FixedWindow => self.chunk_fixed(text),
        };

        pieces
            .into_iter()
            .enumerate()
            .map(|(i, piece)| Chunk::new(document_id.to_string(), i as u32, piece))
            .collect()
    }

    /// Greedy sentence accumulation bounded by `max_chars`
    fn chunk_sentences(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();

        for sentence in self.split_sentences(text) {
            let projected = if buffer.is_empty() {
                sentence.len()
            } else {
                buffer.len() + 1 + sentence.len()
            };

            if !buffer.is_empty() && projected >= self.max_chars {
                chunks.push(std::mem::take(&mut buffer));
            }

            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(sentence);
        }

        if !buffer.trim().is_empty() {
            chunks.push(buffer);
        }

        chunks
    }

    /// Split on sentence terminators followed by whitespace; the terminator
    /// stays with its sentence, the gap is dropped.
    fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        let mut start = 0;

        for m in self.sentence_end.find_iter(text) {
            // Terminators are single-byte ASCII, so start + 1 is a boundary.
            let end = m.start() + 1;
            sentences.push(&text[start..end]);
            start = m.end();
        }

        if start < text.len() {
            sentences.push(&text[start..]);
        }

        sentences
    }

    /// Character-window slicing with no overlap
    fn chunk_fixed(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.max_chars)
            .map(|window| window.iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(max_chars: usize, policy: ChunkPolicy) -> Chunker {
        Chunker::new(&ChunkingConfig { max_chars, policy })
    }

    #[test]
    fn test_sentences_grouped_under_budget() {
        let text = "One sentence here. Another sentence there. A third one now.";
        let chunks = chunker(45, ChunkPolicy::Sentence).chunk("doc", text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "One sentence here. Another sentence there.");
        assert_eq!(chunks[1].text, "A third one now.");
        assert!(chunks.iter().all(|c| c.text.len() <= 45));
    }

    #[test]
    fn test_sequence_indices_are_ordered() {
        let text = "A. B. C. D. E.";
        let chunks = chunker(4, ChunkPolicy::Sentence).chunk("doc", text);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i as u32);
            assert_eq!(chunk.document_id, "doc");
        }
    }

    #[test]
    fn test_oversized_sentence_emitted_whole() {
        let long = "x".repeat(80) + ".";
        let text = format!("Short one. {} Tail end.", long);
        let chunks = chunker(40, ChunkPolicy::Sentence).chunk("doc", &text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].text, long);
        assert!(chunks[1].text.len() > 40);
    }

    #[test]
    fn test_concatenation_is_lossless() {
        let text = "First sentence of the material. Second sentence follows! \
                    Third asks a question? Fourth wraps it up.";
        let chunks = chunker(50, ChunkPolicy::Sentence).chunk("doc", text);
        assert!(chunks.len() > 1);

        let rejoined = chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        assert!(chunker(100, ChunkPolicy::Sentence).chunk("doc", "").is_empty());
        assert!(chunker(100, ChunkPolicy::Sentence).chunk("doc", "   ").is_empty());
        assert!(chunker(100, ChunkPolicy::FixedWindow).chunk("doc", "").is_empty());
    }

    #[test]
    fn test_fixed_window_slices_without_overlap() {
        let text = "abcdefghij";
        let chunks = chunker(4, ChunkPolicy::FixedWindow).chunk("doc", text);

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
        // Fixed windows concatenate back exactly, with no separator.
        assert_eq!(texts.concat(), text);
    }

    #[test]
    fn test_fixed_window_respects_multibyte_chars() {
        let text = "añbñcñdñ";
        let chunks = chunker(3, ChunkPolicy::FixedWindow).chunk("doc", text);
        assert_eq!(chunks.iter().map(|c| c.text.clone()).collect::<Vec<_>>().concat(), text);
    }
}
