//! Explicit route memoization keyed by a structural hash of the options.
//!
//! Nothing is invalidated implicitly: callers that change geometry either
//! build new options (which hash differently) or call `invalidate`/`clear`.
//! The cache holds a bounded number of entries and evicts the least
//! recently used one when full.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

use super::astar::{route, RouteResult};
use super::config::RouteOptions;
use super::error::RouteError;
use super::types::{Point, Rect};

/// Structural hash of route options; floats hash by bit pattern
pub fn options_key(options: &RouteOptions) -> u64 {
    let mut h = DefaultHasher::new();
    hash_point(&mut h, options.start);
    hash_point(&mut h, options.end);
    options.grid_size.to_bits().hash(&mut h);
    options.obstacles.len().hash(&mut h);
    for obstacle in &options.obstacles {
        hash_rect(&mut h, obstacle);
    }
    options.obstacle_margin.map(f64::to_bits).hash(&mut h);
    match &options.bounds {
        Some(bounds) => {
            1u8.hash(&mut h);
            hash_rect(&mut h, bounds);
        }
        None => 0u8.hash(&mut h),
    }
    options.bend_penalty.to_bits().hash(&mut h);
    options.start_dir.hash(&mut h);
    options.end_dir.hash(&mut h);
    options.max_expansions.hash(&mut h);
    h.finish()
}

fn hash_point(h: &mut DefaultHasher, p: Point) {
    p.x.to_bits().hash(h);
    p.y.to_bits().hash(h);
}

fn hash_rect(h: &mut DefaultHasher, r: &Rect) {
    r.x.to_bits().hash(h);
    r.y.to_bits().hash(h);
    r.width.to_bits().hash(h);
    r.height.to_bits().hash(h);
}

/// Entries kept by `RouteCache::new`
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Memoizes routing results per distinct set of options
#[derive(Debug)]
pub struct RouteCache {
    entries: HashMap<u64, (RouteOptions, RouteResult)>,
    order: VecDeque<u64>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` routes (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached result for `options`, routing on a miss.
    ///
    /// Errors are not cached.
    pub fn get_or_route(&mut self, options: &RouteOptions) -> Result<RouteResult, RouteError> {
        let key = options_key(options);
        let cached = match self.entries.get(&key) {
            // Guard against hash collisions
            Some((stored, result)) if stored == options => Some(result.clone()),
            _ => None,
        };
        if let Some(result) = cached {
            self.hits += 1;
            self.touch(key);
            return Ok(result);
        }

        self.misses += 1;
        let result = route(options)?;
        self.insert(key, options.clone(), result.clone());
        Ok(result)
    }

    fn insert(&mut self, key: u64, options: RouteOptions, result: RouteResult) {
        if self.entries.insert(key, (options, result)).is_some() {
            self.touch(key);
            return;
        }
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key);
    }

    fn touch(&mut self, key: u64) {
        if let Some(pos) = self.order.iter().position(|&k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key);
    }

    /// Drop the entry for `options`; returns whether one existed
    pub fn invalidate(&mut self, options: &RouteOptions) -> bool {
        let key = options_key(options);
        match self.entries.get(&key) {
            Some((stored, _)) if stored == options => {
                self.entries.remove(&key);
                self.order.retain(|&k| k != key);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
