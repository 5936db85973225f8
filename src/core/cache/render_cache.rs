use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::core::data::bitmap::Bitmap;

/// Latest completed bitmap per fractal name.
///
/// Entries are swapped whole, so a reader holds either the previous or the
/// new `Arc<Bitmap>`, never a partly written one.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: Mutex<HashMap<String, Arc<Bitmap>>>,
}

impl RenderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, fractal: &str) -> Option<Arc<Bitmap>> {
        self.lock().get(fractal).cloned()
    }

    /// Replaces any entry for the bitmap's fractal.
    pub fn put(&self, bitmap: Arc<Bitmap>) {
        self.lock().insert(bitmap.fractal().to_owned(), bitmap);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Bitmap>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::dimensions::Dimensions;
    use crate::core::data::pixel_buffer::PixelBuffer;

    fn bitmap(fractal: &str, version: u64) -> Arc<Bitmap> {
        let buffer = PixelBuffer::new(Dimensions::new(2, 2).unwrap());
        Arc::new(Bitmap::new(fractal, version, buffer))
    }

    #[test]
    fn test_get_returns_last_put() {
        let cache = RenderCache::new();
        let stored = bitmap("mandelbrot", 1);

        cache.put(Arc::clone(&stored));

        let fetched = cache.get("mandelbrot").unwrap();
        assert!(Arc::ptr_eq(&fetched, &stored));
    }

    #[test]
    fn test_put_replaces_existing_entry() {
        let cache = RenderCache::new();
        cache.put(bitmap("mandelbrot", 1));
        let newer = bitmap("mandelbrot", 2);

        cache.put(Arc::clone(&newer));

        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&cache.get("mandelbrot").unwrap(), &newer));
    }

    #[test]
    fn test_entries_are_keyed_by_fractal() {
        let cache = RenderCache::new();
        cache.put(bitmap("mandelbrot", 1));
        cache.put(bitmap("julia", 2));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("julia").unwrap().version(), 2);
        assert!(cache.get("shader").is_none());
    }

    #[test]
    fn test_readers_keep_their_bitmap_after_replacement() {
        let cache = RenderCache::new();
        cache.put(bitmap("mandelbrot", 1));
        let held = cache.get("mandelbrot").unwrap();

        cache.put(bitmap("mandelbrot", 2));

        assert_eq!(held.version(), 1);
        assert_eq!(cache.get("mandelbrot").unwrap().version(), 2);
    }
}
