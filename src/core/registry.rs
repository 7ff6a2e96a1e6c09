//! Name → logger cache with hierarchical level resolution
//!
//! Locking contract: the name map sits behind one `RwLock` that is only
//! write-locked to insert a new logger. Thresholds live in atomics on each
//! node, so `set_level` and the per-record level check never take the map's
//! write lock. Resolved effective levels are cached on the node and
//! invalidated wholesale by bumping a registry-wide generation counter.

use super::{log_level::LogLevel, logger::Logger, router::LogRouter};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

/// Stored in [`LoggerNode::level`] when the logger inherits its threshold
const UNSET: u8 = 0;

/// Registry name of the root logger
pub const ROOT: &str = "";

/// Shared state behind every [`Logger`] handle with the same name
#[derive(Debug)]
pub(crate) struct LoggerNode {
    name: String,
    level: AtomicU8,
    /// `generation << 8 | effective level`
    cached: AtomicU64,
}

impl LoggerNode {
    fn new(name: &str, level: Option<LogLevel>) -> Self {
        Self {
            name: name.to_string(),
            level: AtomicU8::new(level.map_or(UNSET, LogLevel::as_u8)),
            cached: AtomicU64::new(0),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Explicitly assigned threshold, if any
    pub(crate) fn level(&self) -> Option<LogLevel> {
        LogLevel::try_from(self.level.load(Ordering::Acquire)).ok()
    }
}

/// Owns every logger of a [`LogSystem`](crate::LogSystem). Loggers are never
/// removed.
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<LoggerNode>>>,
    default_levels: HashMap<String, LogLevel>,
    generation: AtomicU64,
    router: Arc<LogRouter>,
}

impl LoggerRegistry {
    pub fn new(router: Arc<LogRouter>, root_level: LogLevel) -> Self {
        let mut loggers = HashMap::new();
        loggers.insert(
            ROOT.to_string(),
            Arc::new(LoggerNode::new(ROOT, Some(root_level))),
        );
        Self {
            loggers: RwLock::new(loggers),
            default_levels: HashMap::new(),
            generation: AtomicU64::new(1),
            router,
        }
    }

    /// Levels assigned to loggers created by a lookup that names no level
    #[must_use]
    pub fn with_default_levels(mut self, levels: HashMap<String, LogLevel>) -> Self {
        self.default_levels = levels;
        self
    }

    /// Return the logger called `name`, creating it on first lookup.
    ///
    /// `level` (or the name-based default) only applies when the logger is
    /// created; an existing logger is returned unchanged. Every call with
    /// the same name yields a handle to the same logger.
    pub fn get(self: &Arc<Self>, name: &str, level: Option<LogLevel>) -> Logger {
        Logger::new(self.node(name, level), Arc::clone(self))
    }

    /// Set the threshold of `name` (creating the logger if needed). All
    /// existing handles see the change immediately.
    pub fn set_level(&self, name: &str, level: LogLevel) {
        let node = self.node(name, None);
        self.set_node_level(&node, level);
    }

    /// Force each named logger to `level`
    pub fn suppress_noisy<I, S>(&self, names: I, level: LogLevel)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.set_level(name.as_ref(), level);
        }
    }

    /// Threshold that applies to records from `name`
    pub fn effective_level(&self, name: &str) -> LogLevel {
        let node = self.loggers.read().get(name).cloned();
        match node {
            Some(node) => self.resolve(&node),
            None => self.walk(name, None),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    /// Number of loggers, including the root
    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn router(&self) -> &Arc<LogRouter> {
        &self.router
    }

    fn node(&self, name: &str, level: Option<LogLevel>) -> Arc<LoggerNode> {
        if let Some(node) = self.loggers.read().get(name) {
            return Arc::clone(node);
        }

        let mut created_with_level = false;
        let node = {
            let mut loggers = self.loggers.write();
            Arc::clone(loggers.entry(name.to_string()).or_insert_with(|| {
                let level = level.or_else(|| self.default_levels.get(name).copied());
                created_with_level = level.is_some();
                Arc::new(LoggerNode::new(name, level))
            }))
        };

        // A new explicit level can change what descendants inherit
        if created_with_level {
            self.generation.fetch_add(1, Ordering::AcqRel);
        }
        node
    }

    pub(crate) fn set_node_level(&self, node: &LoggerNode, level: LogLevel) {
        node.level.store(level.as_u8(), Ordering::Release);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Effective level of `node`, from its cache when still current
    pub(crate) fn resolve(&self, node: &LoggerNode) -> LogLevel {
        let generation = self.generation.load(Ordering::Acquire);
        let cached = node.cached.load(Ordering::Acquire);
        if cached >> 8 == generation {
            if let Ok(level) = LogLevel::try_from((cached & 0xff) as u8) {
                return level;
            }
        }

        let level = self.walk(node.name(), node.level());
        node.cached
            .store((generation << 8) | u64::from(level.as_u8()), Ordering::Release);
        level
    }

    /// Own level, else the nearest ancestor's (`a.b.c` → `a.b` → `a`), else root
    fn walk(&self, name: &str, own: Option<LogLevel>) -> LogLevel {
        if let Some(level) = own {
            return level;
        }

        let loggers = self.loggers.read();
        let mut current = name;
        while let Some(idx) = current.rfind('.') {
            current = &current[..idx];
            if let Some(level) = loggers.get(current).and_then(|n| n.level()) {
                return level;
            }
        }

        loggers
            .get(ROOT)
            .and_then(|root| root.level())
            .unwrap_or_default()
    }
}
