//! Find-or-create table for cell format records

use ahash::AHashMap;
use tracing::debug;
use xlsbook_core::{StyleId, StyleRecord};

use crate::fingerprint::StyleFingerprint;
use crate::Result;

/// Interns cell formats of one document by fingerprint
///
/// The cache owns two unregistered records: the seed, a snapshot of the
/// document's default cell format taken when the cache is built, and the
/// scratch, the working copy a caller stages attributes into. Neither is
/// ever handed to a cell. Finished attribute sets are copied into fresh
/// document records, which stay immutable from then on.
#[derive(Debug)]
pub struct StyleCache {
    seed: StyleRecord,
    scratch: StyleRecord,
    interned: AHashMap<StyleFingerprint, StyleId>,
}

impl StyleCache {
    /// Create a cache whose scratch style resets to `seed`
    pub fn new(seed: StyleRecord) -> Self {
        Self {
            scratch: seed.clone(),
            seed,
            interned: AHashMap::with_capacity(64),
        }
    }

    /// The scratch style, reset to the seed
    pub fn scratch_style(&mut self) -> &mut StyleRecord {
        self.scratch.copy_from(&self.seed);
        &mut self.scratch
    }

    /// The scratch style as last staged
    pub fn staged(&self) -> &StyleRecord {
        &self.scratch
    }

    /// The record the scratch style resets to
    pub fn seed(&self) -> &StyleRecord {
        &self.seed
    }

    /// Id registered for `fingerprint`, or the id `build` creates for it
    ///
    /// `build` receives the staged scratch style and must allocate a new
    /// document record from it. It runs only on a miss; an error from it is
    /// returned unchanged and leaves the cache untouched.
    pub fn intern_or_create<F>(
        &mut self,
        fingerprint: StyleFingerprint,
        build: F,
    ) -> Result<StyleId>
    where
        F: FnOnce(&StyleRecord) -> Result<StyleId>,
    {
        if let Some(&id) = self.interned.get(&fingerprint) {
            return Ok(id);
        }

        let id = build(&self.scratch)?;
        debug!(style = %id, cached = self.interned.len() + 1, "interned cell format");
        self.interned.insert(fingerprint, id);
        Ok(id)
    }

    /// Id registered for a fingerprint
    pub fn get(&self, fingerprint: &StyleFingerprint) -> Option<StyleId> {
        self.interned.get(fingerprint).copied()
    }

    /// Number of interned formats
    pub fn len(&self) -> usize {
        self.interned.len()
    }

    /// Whether nothing has been interned yet
    pub fn is_empty(&self) -> bool {
        self.interned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xlsbook_core::{Document, Fill, HorizontalAlignment};

    fn cache_for(doc: &Document) -> StyleCache {
        StyleCache::new(doc.default_style().cloned().unwrap_or_default())
    }

    #[test]
    fn test_scratch_resets_to_seed() {
        let doc = Document::new();
        let mut cache = cache_for(&doc);

        cache.scratch_style().horizontal = HorizontalAlignment::Right;
        assert_eq!(cache.staged().horizontal, HorizontalAlignment::Right);
        // Staging never touches the seed
        assert_eq!(cache.seed(), doc.default_style().unwrap());

        let scratch = cache.scratch_style();
        assert_eq!(scratch.horizontal, HorizontalAlignment::General);
        assert_eq!(&*scratch, doc.default_style().unwrap());
    }

    #[test]
    fn test_intern_reuses_id() {
        let mut doc = Document::new();
        let mut cache = cache_for(&doc);
        let styles_before = doc.style_count();

        let mut ids = Vec::new();
        for _ in 0..3 {
            cache.scratch_style().fill = Fill::solid(12);
            let fp = StyleFingerprint::of(cache.staged());
            let id = cache
                .intern_or_create(fp, |staged| Ok(doc.create_style_from(staged)?))
                .unwrap();
            ids.push(id);
        }

        assert_eq!(ids, vec![StyleId(21); 3]);
        assert_eq!(doc.style_count(), styles_before + 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(doc.style(StyleId(21)).unwrap().fill, Fill::solid(12));
    }

    #[test]
    fn test_build_skipped_on_hit() {
        let mut cache = StyleCache::new(StyleRecord::new());
        let fp = StyleFingerprint::of(cache.scratch_style());

        cache.intern_or_create(fp, |_| Ok(StyleId(30))).unwrap();
        let again = cache
            .intern_or_create(fp, |_| panic!("build must not run on a hit"))
            .unwrap();
        assert_eq!(again, StyleId(30));
        assert_eq!(cache.get(&fp), Some(StyleId(30)));
    }

    #[test]
    fn test_failed_build_not_registered() {
        let mut cache = StyleCache::new(StyleRecord::new());
        let fp = StyleFingerprint::of(cache.scratch_style());

        let err = cache.intern_or_create(fp, |_| {
            Err(xlsbook_core::Error::StyleLimitExceeded { limit: 21 }.into())
        });
        assert!(err.unwrap_err().is_capacity_error());
        assert!(cache.is_empty());
        assert_eq!(cache.get(&fp), None);
    }
}
