//! Item Id Generator
//!
//! Ids combine the creation timestamp with a process-wide counter, so two
//! items added within the same millisecond still get distinct ids.

use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh id such as `member-1718030400123-7`
pub fn next_id(prefix: &str) -> String {
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = chrono::Utc::now().timestamp_millis();
    format!("{}-{}-{}", prefix, millis, seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rapid_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| next_id("faq")).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_prefix_kept() {
        assert!(next_id("plan").starts_with("plan-"));
    }
}
