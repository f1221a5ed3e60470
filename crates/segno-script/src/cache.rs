//! Content-addressed cache of compiled scripts.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use log::{debug, trace};
use rhai::{Engine, AST};

use crate::errors::Result;

/// Default number of compiled scripts kept alive.
pub const DEFAULT_CAPACITY: usize = 64;

/// Compute the content hash of a script source.
///
/// Two identical sources share one cache slot no matter which process
/// they live in; a one-character edit is a different script.
pub fn content_hash(source: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

/// A compiled script: the shared AST plus the content hash it is
/// cached under.
#[derive(Clone)]
pub struct Compiled {
    pub hash: u64,
    pub ast: Arc<AST>,
}

/// Cache of compiled script ASTs, keyed by source content hash.
///
/// Undo/redo of a script edit flips between two sources repeatedly;
/// both stay compiled, so flipping costs a hash and a lookup. The cache
/// is bounded: when full, the oldest compilation is dropped. Sources
/// that fail to compile are never cached, so a fixed source recompiles
/// cleanly.
pub struct ScriptCache {
    engine: Engine,
    compiled: HashMap<u64, Arc<AST>>,
    order: VecDeque<u64>,
    capacity: usize,
}

impl ScriptCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            engine: build_engine(),
            compiled: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// The engine scripts are compiled (and would be evaluated) with.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this exact source is already compiled.
    pub fn contains(&self, source: &str) -> bool {
        self.compiled.contains_key(&content_hash(source))
    }

    /// Fetch the compiled form of `source`, compiling on a miss.
    pub fn get_or_compile(&mut self, source: &str) -> Result<Compiled> {
        let key = content_hash(source);
        if let Some(ast) = self.compiled.get(&key) {
            trace!("script cache hit for {:016x}", key);
            return Ok(Compiled {
                hash: key,
                ast: Arc::clone(ast),
            });
        }
        let ast = Arc::new(self.engine.compile(source)?);
        debug!("compiled script {:016x} ({} bytes)", key, source.len());
        self.compiled.insert(key, Arc::clone(&ast));
        self.order.push_back(key);
        while self.compiled.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.compiled.remove(&oldest);
                trace!("evicted script {:016x}", oldest);
            }
        }
        Ok(Compiled { hash: key, ast })
    }

    /// Drop every compiled script.
    pub fn clear(&mut self) {
        self.compiled.clear();
        self.order.clear();
    }
}

impl Default for ScriptCache {
    fn default() -> Self {
        Self::new()
    }
}

fn build_engine() -> Engine {
    let mut engine = Engine::new();
    engine.set_max_expr_depths(4096, 4096);
    engine.set_max_call_levels(4096);
    // Route script output through the log system.
    engine.on_print(|text| {
        log::info!("[script] {}", text);
    });
    engine
}
