use crate::ast;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

pub(crate) const DEFAULT_QUERY_CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(1024).unwrap();

/// Bounded memo of parsed executable documents, keyed by query text.
///
/// Only successful parses are cached; the least recently used document is
/// evicted once the cache is full.
#[derive(Debug)]
pub(crate) struct QueryCache {
    documents: Mutex<LruCache<String, Arc<ast::query::Document>>>,
}
impl QueryCache {
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            documents: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub(crate) fn get_or_parse(
        &self,
        query: &str,
    ) -> Result<Arc<ast::query::Document>, ast::query::ParseError> {
        if let Some(document) = self.lock().get(query) {
            log::trace!("Query cache hit");
            return Ok(document.clone());
        }

        log::trace!("Query cache miss");
        let document = Arc::new(ast::query::parse(query)?);
        self.lock().put(query.to_string(), document.clone());
        Ok(document)
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, Arc<ast::query::Document>>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_successful_parses_only() {
        let cache = QueryCache::new(DEFAULT_QUERY_CACHE_CAPACITY);

        let first = cache.get_or_parse("{ hello }").expect("parse error");
        let second = cache.get_or_parse("{ hello }").expect("parse error");
        assert!(Arc::ptr_eq(&first, &second));

        assert!(cache.get_or_parse("{ hello").is_err());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn evicts_least_recently_used_document() {
        let cache = QueryCache::new(NonZeroUsize::new(2).unwrap());

        let a = cache.get_or_parse("{ a }").expect("parse error");
        cache.get_or_parse("{ b }").expect("parse error");
        // Touch `a` so that `b` is the least recently used entry.
        cache.get_or_parse("{ a }").expect("parse error");
        cache.get_or_parse("{ c }").expect("parse error");

        assert_eq!(cache.len(), 2);
        let a_again = cache.get_or_parse("{ a }").expect("parse error");
        assert!(Arc::ptr_eq(&a, &a_again));
    }
}
