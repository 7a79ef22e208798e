//! Per-caller admission engine.
//!
//! State is keyed by caller so unrelated callers never contend on one lock:
//! each attempt window lives behind its own `Mutex` inside a `DashMap`
//! entry. A caller that keeps exceeding its window is escalated to the
//! block set; blocks have no automatic expiry and are lifted only by
//! restart or an explicit `unblock`.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::{DashMap, DashSet};

use crate::config::schema::LimitsSection;
use crate::ratelimit::classify::CLASS_DEFAULT;

/// Admission verdict for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Attempt recorded; proceed.
    Admitted,
    /// Window exceeded; retry after the window drains.
    Denied { retry_after_secs: u64 },
    /// Caller is blocked; no retry hint is computed.
    Blocked,
}

#[derive(Debug, Clone, Copy)]
struct ClassParams {
    max_attempts: u32,
    window: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowKey {
    caller_id: String,
    class: String,
}

/// Admission control per caller and per action class.
/// Construct once at startup, then share via `Arc`.
pub struct RateLimiter {
    classes: HashMap<String, ClassParams>,
    block_threshold: u32,

    windows: DashMap<WindowKey, Mutex<VecDeque<Instant>>>,
    violations: DashMap<String, u32>,
    blocked: DashSet<String>,
}

impl RateLimiter {
    pub fn new(limits: &LimitsSection) -> Self {
        let classes = limits
            .classes
            .iter()
            .map(|c| {
                (
                    c.class.clone(),
                    ClassParams {
                        max_attempts: c.max_attempts.max(1),
                        window: Duration::from_secs(c.window_seconds),
                    },
                )
            })
            .collect();

        Self {
            classes,
            block_threshold: limits.block_threshold.max(1),
            windows: DashMap::new(),
            violations: DashMap::new(),
            blocked: DashSet::new(),
        }
    }

    /// Admission check for one attempt, stamped with the current time.
    pub fn check(&self, caller_id: &str, class: &str) -> Verdict {
        self.check_at(caller_id, class, Instant::now())
    }

    /// Deterministic variant of [`check`](Self::check) used by tests and
    /// simulations: the attempt timestamp is supplied by the caller.
    pub fn check_at(&self, caller_id: &str, class: &str, now: Instant) -> Verdict {
        if self.blocked.contains(caller_id) {
            return Verdict::Blocked;
        }

        let params = self.params(class);
        let over = {
            let entry = self
                .windows
                .entry(WindowKey {
                    caller_id: caller_id.to_string(),
                    class: class.to_string(),
                })
                .or_default();

            // Poisoned mutex means a logic bug; treat as "deny" instead of panic.
            let Ok(mut window) = entry.lock() else {
                return Verdict::Denied {
                    retry_after_secs: params.window.as_secs(),
                };
            };

            prune_window(&mut window, params.window, now);

            if window.len() as u32 >= params.max_attempts {
                true
            } else {
                window.push_back(now);
                false
            }
        };

        if !over {
            return Verdict::Admitted;
        }

        let violations = {
            let mut count = self.violations.entry(caller_id.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        if violations >= self.block_threshold {
            self.blocked.insert(caller_id.to_string());
            tracing::warn!(%caller_id, violations, "caller blocked after repeated rate violations");
            Verdict::Blocked
        } else {
            tracing::debug!(%caller_id, %class, violations, "rate window exceeded");
            Verdict::Denied {
                retry_after_secs: params.window.as_secs(),
            }
        }
    }

    /// Prune the window for `(caller_id, class)` relative to `now` and return
    /// the retained attempt count. Pruning is idempotent.
    pub fn prune_at(&self, caller_id: &str, class: &str, now: Instant) -> usize {
        let key = WindowKey {
            caller_id: caller_id.to_string(),
            class: class.to_string(),
        };
        let Some(entry) = self.windows.get(&key) else {
            return 0;
        };
        let Ok(mut window) = entry.lock() else {
            return 0;
        };
        prune_window(&mut window, self.params(class).window, now);
        window.len()
    }

    /// Lift a caller's block and clear its violation counter.
    /// Returns whether a block existed.
    pub fn unblock(&self, caller_id: &str) -> bool {
        self.violations.remove(caller_id);
        self.blocked.remove(caller_id).is_some()
    }

    pub fn is_blocked(&self, caller_id: &str) -> bool {
        self.blocked.contains(caller_id)
    }

    /// Number of currently blocked callers (for gauges).
    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Class names the limiter has parameters for.
    pub fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }

    // Unknown classes fall back to the default parameters: a misclassified
    // action still gets a defined outcome.
    fn params(&self, class: &str) -> ClassParams {
        if let Some(p) = self.classes.get(class) {
            return *p;
        }
        self.classes
            .get(CLASS_DEFAULT)
            .copied()
            .unwrap_or(ClassParams {
                max_attempts: 5,
                window: Duration::from_secs(60),
            })
    }
}

fn prune_window(window: &mut VecDeque<Instant>, span: Duration, now: Instant) {
    while window
        .front()
        .is_some_and(|t| now.saturating_duration_since(*t) >= span)
    {
        window.pop_front();
    }
}
