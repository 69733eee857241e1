use crate::viewer::render_host::PageRenderRequest;
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key: a page is only reusable at the exact pixel size it was rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub page: u16,
    pub width: u32,
    pub height: u32,
}

impl From<&PageRenderRequest> for PageKey {
    fn from(request: &PageRenderRequest) -> Self {
        Self {
            page: request.page,
            width: request.width,
            height: request.height,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    pub cached_pages: usize,
    pub memory_mb: f32,
    pub total_rendered_pages: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

#[derive(Debug, Clone)]
struct CachedPage {
    data: Arc<RgbaImage>,
    access_count: u64,
}

#[derive(Debug)]
pub struct PageCache {
    capacity: usize,
    pages: HashMap<PageKey, CachedPage>,
    stats: CacheStats,
}

impl PageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            pages: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn get_page(&mut self, key: &PageKey) -> Option<Arc<RgbaImage>> {
        if let Some(entry) = self.pages.get_mut(key) {
            entry.access_count += 1;
            self.stats.cache_hits += 1;
            return Some(entry.data.clone());
        }

        self.stats.cache_misses += 1;
        None
    }

    pub fn contains(&self, key: &PageKey) -> bool {
        self.pages.contains_key(key)
    }

    pub fn put_page(&mut self, key: PageKey, image: Arc<RgbaImage>) {
        if !self.pages.contains_key(&key) && self.pages.len() >= self.capacity {
            self.evict_least_used();
        }

        self.pages.insert(
            key,
            CachedPage {
                data: image,
                access_count: 1,
            },
        );
        self.stats.total_rendered_pages += 1;
        self.update_stats();
    }

    fn evict_least_used(&mut self) {
        let victim = self
            .pages
            .iter()
            .min_by_key(|(_, entry)| entry.access_count)
            .map(|(&key, _)| key);

        if let Some(key) = victim {
            self.pages.remove(&key);
            log::debug!("Evicted page {} ({}x{})", key.page, key.width, key.height);
        }
    }

    fn update_stats(&mut self) {
        let total_bytes: usize = self.pages.values().map(|entry| entry.data.len()).sum();
        self.stats.cached_pages = self.pages.len();
        self.stats.memory_mb = (total_bytes as f32) / (1024.0 * 1024.0);
    }

    pub fn clear(&mut self) {
        self.pages.clear();
        self.update_stats();
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get_stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_CACHE_CAPACITY)
    }
}
