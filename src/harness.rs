//! Benchmark entry points: one sequence against one fresh backend, with the
//! backend's [`SyncPolicy`] applied.
//!
//! For [`SyncPolicy::ExternalLock`] the backend is moved into a
//! `parking_lot::Mutex` for the invocation and the guard is held across
//! populate, the phase-specific work and (for Copy) the duplication. The guard
//! is a scope object, so it is released on return and while unwinding from a
//! panicking backend. The other policies run the sequence directly.

use parking_lot::Mutex;

use crate::backend::{MapBackend, SyncPolicy};
use crate::context::WorkloadContext;
use crate::random::RandomSource;
use crate::tracing_helpers::trace_log;
use crate::workload::{self, Operation};

/// Result of one sequence invocation.
#[derive(Debug)]
pub enum Outcome<B> {
    /// Mutating sequences hand back the backend in its final state.
    Mutated(B),
    /// Copy hands back the source and its duplicate.
    Copied {
        /// The populated source map.
        source: B,
        /// The duplicate produced by the sequence.
        duplicate: B,
    },
}

impl<B: MapBackend> Outcome<B> {
    /// The backend the sequence ran against.
    pub fn into_backend(self) -> B {
        match self {
            Self::Mutated(map) | Self::Copied { source: map, .. } => map,
        }
    }

    /// The duplicate, if this was a Copy run.
    pub fn into_duplicate(self) -> Option<B> {
        match self {
            Self::Mutated(_) => None,
            Self::Copied { duplicate, .. } => Some(duplicate),
        }
    }
}

/// Run `f` against `map` under `policy`.
///
/// `ExternalLock` holds one mutex guard for the whole of `f`.
#[inline]
pub fn with_policy<B, T, F>(policy: SyncPolicy, map: B, f: F) -> (B, T)
where
    F: FnOnce(&mut B) -> T,
{
    if policy.requires_harness_lock() {
        trace_log!(policy = policy.name(), "acquiring harness lock");
        let lock = Mutex::new(map);
        let out = {
            let mut guard = lock.lock();
            f(&mut *guard)
        };
        (lock.into_inner(), out)
    } else {
        let mut map = map;
        let out = f(&mut map);
        (map, out)
    }
}

/// Get sequence against a fresh `B`.
pub fn run_get<B: MapBackend, R: RandomSource>(ctx: &mut WorkloadContext<R>) -> B {
    let (fixtures, rng) = ctx.split();
    let (map, ()) = with_policy(B::SYNC, B::new(), |map| workload::get(map, fixtures, rng));
    map
}

/// PutUpdate sequence against a fresh `B`.
pub fn run_put_update<B: MapBackend, R: RandomSource>(ctx: &WorkloadContext<R>) -> B {
    let fixtures = ctx.fixtures();
    let (map, ()) = with_policy(B::SYNC, B::new(), |map| workload::put_update(map, fixtures));
    map
}

/// PutRemove sequence against a fresh `B`.
pub fn run_put_remove<B: MapBackend, R: RandomSource>(ctx: &WorkloadContext<R>) -> B {
    let fixtures = ctx.fixtures();
    let (map, ()) = with_policy(B::SYNC, B::new(), |map| workload::put_remove(map, fixtures));
    map
}

/// Copy sequence against a fresh `B`; returns the duplicate.
pub fn run_copy<B: MapBackend, R: RandomSource>(ctx: &WorkloadContext<R>) -> B {
    let fixtures = ctx.fixtures();
    let (_, duplicate) = with_policy(B::SYNC, B::new(), |map| workload::copy(map, fixtures));
    duplicate
}

/// Run `op` against a fresh `B`.
pub fn run<B: MapBackend, R: RandomSource>(op: Operation, ctx: &mut WorkloadContext<R>) -> Outcome<B> {
    match op {
        Operation::Get => Outcome::Mutated(run_get::<B, R>(ctx)),
        Operation::PutUpdate => Outcome::Mutated(run_put_update::<B, R>(ctx)),
        Operation::PutRemove => Outcome::Mutated(run_put_remove::<B, R>(ctx)),
        Operation::Copy => {
            let fixtures = ctx.fixtures();
            let (source, duplicate) =
                with_policy(B::SYNC, B::new(), |map| workload::copy(map, fixtures));
            Outcome::Copied { source, duplicate }
        }
    }
}
