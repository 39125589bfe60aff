//! Parser reuse across documents.
//!
//! Building a [`Pipeline`](crate::pipeline::Pipeline) walks both registries
//! and allocates the trigger tables, so callers parsing many documents keep
//! one pipeline and hand out parsers from a [`ParserPool`] instead of
//! rebuilding per document.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};

use log::trace;

use crate::ast::Document;
use crate::parser::BlockProcessor;
use crate::pipeline::Pipeline;
use crate::text::split_lines;

/// A reusable parser bound to one pipeline.
pub struct MarkdownParser {
    pipeline: Arc<Pipeline>,
}

impl MarkdownParser {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        MarkdownParser { pipeline }
    }

    /// Parse a whole buffer into a document tree.
    pub fn parse(&mut self, text: &str) -> Document {
        let source: Arc<str> = Arc::from(text);
        let lines = split_lines(&source);
        trace!("parsing {} bytes over {} lines", source.len(), lines.len());
        let mut processor = BlockProcessor::new(&self.pipeline, source);
        for line in &lines {
            processor.process_line(line);
        }
        processor.finish()
    }
}

/// A thread-safe pool of parsers sharing one pipeline.
///
/// [`acquire`](ParserPool::acquire) pops an idle parser or creates one; the
/// returned guard puts it back when dropped. The pool never shrinks.
pub struct ParserPool {
    pipeline: Arc<Pipeline>,
    idle: Mutex<Vec<MarkdownParser>>,
}

impl ParserPool {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        ParserPool {
            pipeline,
            idle: Mutex::new(Vec::new()),
        }
    }

    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }

    pub fn acquire(&self) -> PooledParser<'_> {
        let parser = self
            .idle
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| MarkdownParser::new(self.pipeline.clone()));
        PooledParser {
            pool: self,
            parser: Some(parser),
        }
    }

    fn release(&self, parser: MarkdownParser) {
        self.idle
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(parser);
    }
}

/// Guard handing a parser back to its pool on drop.
pub struct PooledParser<'a> {
    pool: &'a ParserPool,
    parser: Option<MarkdownParser>,
}

impl Deref for PooledParser<'_> {
    type Target = MarkdownParser;

    fn deref(&self) -> &MarkdownParser {
        self.parser.as_ref().expect("parser already released")
    }
}

impl DerefMut for PooledParser<'_> {
    fn deref_mut(&mut self) -> &mut MarkdownParser {
        self.parser.as_mut().expect("parser already released")
    }
}

impl Drop for PooledParser<'_> {
    fn drop(&mut self) {
        if let Some(parser) = self.parser.take() {
            self.pool.release(parser);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineBuilder;

    #[test]
    fn acquired_parsers_return_to_the_pool() {
        let pool = ParserPool::new(Arc::new(PipelineBuilder::new().build()));
        {
            let mut parser = pool.acquire();
            let doc = parser.parse("hello\n");
            assert_eq!(doc.children.len(), 1);
        }
        assert_eq!(pool.idle.lock().unwrap().len(), 1);
        let _a = pool.acquire();
        let _b = pool.acquire();
        assert_eq!(pool.idle.lock().unwrap().len(), 0);
    }

    #[test]
    fn parser_is_reusable_across_documents() {
        let mut parser = MarkdownParser::new(Arc::new(PipelineBuilder::new().build()));
        let first = parser.parse("# one\n");
        let second = parser.parse("# two\n");
        assert_eq!(first.children.len(), 1);
        assert_eq!(second.children.len(), 1);
    }
}
