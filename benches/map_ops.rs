//! Sequence benchmarks: every operation against every backend.
//!
//! Each bench function is one trial: fixtures are generated once (untimed),
//! then divan times repeated harness invocations, each against a fresh backend.
//! Populate is part of every measured invocation.
//!
//! Run with: `cargo bench --bench map_ops`
//! Large profile: `MAPBENCH_PROFILE=large cargo bench --bench map_ops`
//! With mimalloc: `cargo bench --bench map_ops --features mimalloc`
//!
//! The backend lists match `mapbench::driver::run_all`.

#![expect(clippy::expect_used, reason = "fail fast on a bad profile")]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use divan::Bencher;
use divan::counter::ItemsCount;
use mapbench::backend::{
    ArrayMap, DashMapBackend, HashbrownMap, PapayaBackend, SkipMapBackend, StdBTreeMap, StdHashMap,
    Synchronized, TreeIndexBackend, Unlocked,
};
use mapbench::{MapBackend, Operation, Profile, WorkloadContext, harness};

fn main() {
    divan::main();
}

// =============================================================================
// Setup Helpers
// =============================================================================

fn profile() -> Profile {
    Profile::from_env().expect("invalid MAPBENCH_PROFILE / MAPBENCH_FIXTURE_SIZE")
}

fn trial(op: Operation) -> (WorkloadContext, ItemsCount) {
    let ctx = WorkloadContext::setup(profile());
    let calls = ItemsCount::new(op.call_count(ctx.len()));
    (ctx, calls)
}

// =============================================================================
// 01: GET - populate, then N/2 hit + N/2 miss lookups
// =============================================================================

#[divan::bench_group(name = "01_get")]
mod get {
    use super::*;

    #[divan::bench(types = [
        StdHashMap,
        Unlocked<StdHashMap>,
        Synchronized<StdHashMap>,
        StdBTreeMap,
        HashbrownMap,
        Synchronized<HashbrownMap>,
        ArrayMap,
        DashMapBackend,
        PapayaBackend,
        SkipMapBackend,
        TreeIndexBackend,
    ])]
    fn run<B: MapBackend>(bencher: Bencher) {
        let (mut ctx, calls) = trial(Operation::Get);
        bencher
            .counter(calls)
            .bench_local(|| harness::run_get::<B, _>(&mut ctx));
        ctx.teardown();
    }
}

// =============================================================================
// 02: PUT UPDATE - populate, then overwrite every key
// =============================================================================

#[divan::bench_group(name = "02_put_update")]
mod put_update {
    use super::*;

    #[divan::bench(types = [
        StdHashMap,
        Unlocked<StdHashMap>,
        Synchronized<StdHashMap>,
        StdBTreeMap,
        HashbrownMap,
        Synchronized<HashbrownMap>,
        ArrayMap,
        DashMapBackend,
        PapayaBackend,
        SkipMapBackend,
        TreeIndexBackend,
    ])]
    fn run<B: MapBackend>(bencher: Bencher) {
        let (ctx, calls) = trial(Operation::PutUpdate);
        bencher
            .counter(calls)
            .bench_local(|| harness::run_put_update::<B, _>(&ctx));
        ctx.teardown();
    }
}

// =============================================================================
// 03: PUT REMOVE - populate, then remove every key
// =============================================================================

#[divan::bench_group(name = "03_put_remove")]
mod put_remove {
    use super::*;

    #[divan::bench(types = [
        StdHashMap,
        Unlocked<StdHashMap>,
        Synchronized<StdHashMap>,
        StdBTreeMap,
        HashbrownMap,
        Synchronized<HashbrownMap>,
        ArrayMap,
        DashMapBackend,
        PapayaBackend,
        SkipMapBackend,
        TreeIndexBackend,
    ])]
    fn run<B: MapBackend>(bencher: Bencher) {
        let (ctx, calls) = trial(Operation::PutRemove);
        bencher
            .counter(calls)
            .bench_local(|| harness::run_put_remove::<B, _>(&ctx));
        ctx.teardown();
    }
}

// =============================================================================
// 04: COPY - populate, then duplicate
// =============================================================================

#[divan::bench_group(name = "04_copy")]
mod copy {
    use super::*;

    #[divan::bench(types = [
        StdHashMap,
        Unlocked<StdHashMap>,
        Synchronized<StdHashMap>,
        StdBTreeMap,
        HashbrownMap,
        Synchronized<HashbrownMap>,
        ArrayMap,
        DashMapBackend,
        PapayaBackend,
        SkipMapBackend,
        TreeIndexBackend,
    ])]
    fn run<B: MapBackend>(bencher: Bencher) {
        let (ctx, calls) = trial(Operation::Copy);
        bencher
            .counter(calls)
            .bench_local(|| harness::run_copy::<B, _>(&ctx));
        ctx.teardown();
    }
}
