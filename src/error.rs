//! Physics Error Types
//!
//! Errors surface only at scene setup: bad configuration, a full body store,
//! or an index that does not name a body. A running simulation never fails;
//! manifold overflow during a step truncates and is reported through
//! [`StepStats`](crate::world::StepStats) instead.

use thiserror::Error;

/// Unified error type for world setup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PhysicsError {
    /// Body index is out of range.
    #[error("body index {index} out of range (count={count})")]
    InvalidBodyIndex {
        /// The invalid index that was provided
        index: usize,
        /// Current number of bodies in the world
        count: usize,
    },
    /// A capacity limit was exceeded (bodies or manifolds).
    #[error("{resource} capacity exceeded (limit={limit})")]
    CapacityExceeded {
        /// What resource was exhausted
        resource: &'static str,
        /// The limit that was exceeded
        limit: usize,
    },
    /// Invalid configuration parameter.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the invalid configuration
        reason: &'static str,
    },
    /// A platform-only operation named an object-role body.
    #[error("body {index} is not a platform")]
    NotAPlatform {
        /// The offending body
        index: usize,
    },
}
