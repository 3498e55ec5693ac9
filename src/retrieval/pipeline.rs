//! Ingest and query orchestration over the flat index

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::{ChunkingConfig, RetrievalConfig};
use crate::embeddings::Embedder;
use crate::error::{Error, Result};
use crate::ingestion::{hash_content, normalize_whitespace, Chunker, DocumentExtractor};
use crate::types::{Chunk, Document, FileType, RetrievedChunk};

use super::index::FlatIndex;

/// Owns the vector index and the current-corpus reference.
///
/// Re-ingest replaces: a new snapshot is built from scratch (extraction,
/// chunking and embedding all happen outside any lock) and swapped in under
/// a short write lock. Searches clone the current `Arc` under a read lock
/// and run against that immutable snapshot, so an in-flight query finishes
/// against the pre-rebuild corpus rather than observing a half-built index.
pub struct RetrievalPipeline {
    embedder: Arc<dyn Embedder>,
    chunker: Chunker,
    retrieval: RetrievalConfig,
    index: RwLock<Arc<FlatIndex>>,
    current: RwLock<Option<Document>>,
}

impl RetrievalPipeline {
    /// Create a pipeline with an empty index sized by the embedder's fixed
    /// dimension.
    pub fn new(
        chunking: &ChunkingConfig,
        retrieval: RetrievalConfig,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        let index = FlatIndex::empty(embedder.dimension(), retrieval.distance_metric);
        Self {
            embedder,
            chunker: Chunker::new(chunking),
            retrieval,
            index: RwLock::new(Arc::new(index)),
            current: RwLock::new(None),
        }
    }

    /// Ingest a document file, replacing the active corpus.
    ///
    /// Returns the installed document record and its chunk count. Fails
    /// fast on [`Error::UnsupportedFormat`] / [`Error::Extraction`], and
    /// with [`Error::EmptyCorpus`] when extraction yields no chunkable
    /// text; in every failure case the prior index state is preserved.
    pub fn ingest_file(&self, filename: &str, data: &[u8]) -> Result<(Document, usize)> {
        let extracted = DocumentExtractor::extract(filename, data)?;

        let mut document = Document::new(
            filename.to_string(),
            extracted.file_type,
            extracted.content_hash,
        );
        document.page_count = extracted.page_count;

        let count = self.install_corpus(&mut document, &extracted.text)?;
        Ok((document, count))
    }

    /// Ingest already-extracted text (e.g. a fetched transcript) under a
    /// caller-chosen document id.
    pub fn ingest_text(&self, document_id: &str, text: &str) -> Result<(Document, usize)> {
        let normalized = normalize_whitespace(text);
        let mut document = Document::new(
            document_id.to_string(),
            FileType::Transcript,
            hash_content(&normalized),
        );

        let count = self.install_corpus(&mut document, &normalized)?;
        Ok((document, count))
    }

    /// Chunk, embed, build a fresh snapshot and publish it
    fn install_corpus(&self, document: &mut Document, text: &str) -> Result<usize> {
        let chunks = self.chunker.chunk(&document.id, text);
        if chunks.is_empty() {
            return Err(Error::EmptyCorpus {
                filename: document.id.clone(),
            });
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts)?;

        let snapshot = FlatIndex::build(
            self.embedder.dimension(),
            self.retrieval.distance_metric,
            vectors,
            chunks,
        )?;

        let count = snapshot.len();
        document.total_chunks = count as u32;

        // Single mutation point: swap the snapshot and the corpus reference
        // together so neither can be observed half-updated.
        {
            let mut index = self.index.write();
            let mut current = self.current.write();
            *index = Arc::new(snapshot);
            *current = Some(document.clone());
        }

        tracing::info!(
            "Installed corpus '{}': {} chunks, {} dimensions",
            document.id,
            count,
            self.embedder.dimension()
        );

        Ok(count)
    }

    /// Retrieve the top-k chunks for a query, closest first
    pub fn retrieve(&self, query: &str, k: Option<usize>) -> Result<Vec<RetrievedChunk>> {
        let k = k.unwrap_or(self.retrieval.top_k);
        let query_vector = self.embedder.embed_one(query)?;

        let snapshot = self.snapshot();
        let hits = snapshot.search(&query_vector, k)?;

        let results = hits
            .into_iter()
            .map(|hit| {
                let chunk = snapshot
                    .chunk(hit.slot)
                    .cloned()
                    .ok_or(Error::IndexConsistency {
                        vectors: snapshot.len(),
                        chunks: hit.slot,
                    })?;
                Ok(RetrievedChunk {
                    chunk,
                    distance: hit.distance,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(results)
    }

    /// Assemble the context string handed to the external answer-synthesis
    /// collaborator: retrieved chunk texts in ranked order, joined by
    /// newlines.
    pub fn answer_context(&self, query: &str, k: Option<usize>) -> Result<String> {
        let results = self.retrieve(query, k)?;
        Ok(build_context(&results))
    }

    /// Current vector count
    pub fn size(&self) -> usize {
        self.snapshot().len()
    }

    /// The currently active corpus document, if any ingest has succeeded
    pub fn current_document(&self) -> Option<Document> {
        self.current.read().clone()
    }

    fn snapshot(&self) -> Arc<FlatIndex> {
        Arc::clone(&self.index.read())
    }
}

/// Join retrieved chunk texts in ranked order, closest first
pub fn build_context(results: &[RetrievedChunk]) -> String {
    results
        .iter()
        .map(|r| r.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkPolicy;

    /// Deterministic embedder for tests: character histogram over a small
    /// alphabet, L2-normalized.
    struct HashEmbedder {
        dimension: usize,
    }

    impl Embedder for HashEmbedder {
        fn dimension(&self) -> usize {
            self.dimension
        }

        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            if texts.is_empty() {
                return Err(Error::embedding("Cannot embed an empty batch"));
            }
            Ok(texts
                .iter()
                .map(|text| {
                    let mut v = vec![0.0f32; self.dimension];
                    for byte in text.bytes() {
                        v[byte as usize % self.dimension] += 1.0;
                    }
                    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
                    if norm > 0.0 {
                        for x in &mut v {
                            *x /= norm;
                        }
                    }
                    v
                })
                .collect())
        }
    }

    fn pipeline(max_chars: usize) -> RetrievalPipeline {
        RetrievalPipeline::new(
            &ChunkingConfig {
                max_chars,
                policy: ChunkPolicy::Sentence,
            },
            RetrievalConfig::default(),
            Arc::new(HashEmbedder { dimension: 16 }),
        )
    }

    #[test]
    fn test_query_before_ingest_is_empty_index() {
        let p = pipeline(100);
        assert!(matches!(
            p.answer_context("anything", None),
            Err(Error::EmptyIndex)
        ));
    }

    #[test]
    fn test_empty_text_rejected_and_prior_state_kept() {
        let p = pipeline(100);
        p.ingest_text("first", "Some real material. It has sentences.")
            .unwrap();
        let size_before = p.size();

        let result = p.ingest_text("second", "   ");
        assert!(matches!(result, Err(Error::EmptyCorpus { .. })));
        assert_eq!(p.size(), size_before);
        assert_eq!(p.current_document().unwrap().id, "first");
    }

    #[test]
    fn test_context_joins_ranked_chunks_with_newlines() {
        let results = vec![
            RetrievedChunk {
                chunk: Chunk::new("d".into(), 0, "closest".into()),
                distance: 0.1,
            },
            RetrievedChunk {
                chunk: Chunk::new("d".into(), 1, "further".into()),
                distance: 0.4,
            },
        ];
        assert_eq!(build_context(&results), "closest\nfurther");
    }
}
