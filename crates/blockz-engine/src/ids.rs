use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fallback block ids for blocks without an explicit section id.
pub trait IdGenerator {
    fn next_id(&self, slug: &str) -> String;
}

/// Monotonic counter producing `"{slug}-{n}"` ids.
///
/// The count is shared by every slug: three blocks rendered in a row get
/// `-1`, `-2` and `-3` whatever their slugs are.
#[derive(Debug, Default)]
pub struct BlockCounter {
    count: AtomicU64,
}

impl BlockCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Number of ids handed out since creation or the last reset.
    pub fn current(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

impl IdGenerator for BlockCounter {
    fn next_id(&self, slug: &str) -> String {
        let n = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{slug}-{n}")
    }
}

static GLOBAL_COUNTER: BlockCounter = BlockCounter::new();

/// The process-wide counter renderers use unless given their own.
pub fn global_counter() -> &'static BlockCounter {
    &GLOBAL_COUNTER
}

pub fn reset_global_counter() {
    GLOBAL_COUNTER.reset();
}
