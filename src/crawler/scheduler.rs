//! Frontier management for the crawl
//!
//! This module handles:
//! - Ordering queued pages breadth-first by link depth
//! - Deduplicating pages that were already queued
//! - Enforcing the page and depth limits of the run

use crate::config::CrawlConfig;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use url::Url;

/// A URL queued for fetching
#[derive(Debug, Clone)]
pub struct QueuedUrl {
    /// The URL to fetch
    pub url: Url,

    /// Link distance from the scope page
    pub depth: u32,

    /// Insertion sequence, keeps discovery order within a depth
    sequence: u64,
}

// Lower depths are popped first from the BinaryHeap, then older entries
impl Ord for QueuedUrl {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .depth
            .cmp(&self.depth)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueuedUrl {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedUrl {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && self.sequence == other.sequence
    }
}

impl Eq for QueuedUrl {}

/// Frontier of pages still to be crawled
///
/// Every URL is accepted at most once per run. Once `max_pages` pages have
/// been handed out, the frontier reports itself exhausted.
#[derive(Debug)]
pub struct Frontier {
    config: CrawlConfig,
    queue: BinaryHeap<QueuedUrl>,
    seen: HashSet<String>,
    next_sequence: u64,
    dispatched: usize,
}

impl Frontier {
    pub fn new(config: CrawlConfig) -> Self {
        Self {
            config,
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            next_sequence: 0,
            dispatched: 0,
        }
    }

    /// Queues a URL, returning false if it was already seen or too deep
    pub fn push(&mut self, url: Url, depth: u32) -> bool {
        if depth > self.config.max_depth {
            tracing::trace!("Not queueing {} at depth {}", url, depth);
            return false;
        }

        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }

        self.queue.push(QueuedUrl {
            url,
            depth,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        true
    }

    /// Marks a URL as seen without queueing it (e.g. the final URL of a redirect)
    pub fn mark_seen(&mut self, url: &Url) {
        self.seen.insert(url.as_str().to_string());
    }

    /// Returns the next URL to crawl, or None when done or the page limit is hit
    pub fn next_url(&mut self) -> Option<QueuedUrl> {
        if self.dispatched >= self.config.max_pages {
            return None;
        }

        let next = self.queue.pop()?;
        self.dispatched += 1;
        Some(next)
    }

    /// Number of URLs waiting in the queue
    pub fn frontier_size(&self) -> usize {
        self.queue.len()
    }

    /// Number of URLs handed out so far
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Returns true if the page limit stopped the crawl with URLs still queued
    pub fn limit_reached(&self) -> bool {
        self.dispatched >= self.config.max_pages && !self.queue.is_empty()
    }
}
