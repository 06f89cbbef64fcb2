// Integration tests for util/cores: the memoized host core count.
//
// Tests verify behavioural parity with UTIL_countCores() from
// lz4-1.10.0/programs/util.c:
//   - Returns at least 1 (matches C default fallback of 1)
//   - Returns a reasonable upper-bound value
//   - Is deterministic across multiple calls (the C static cache)
//   - Concurrent first calls agree

use lz4_cores::util::cores::{count_cores, count_cores_uncached, host_counter, CoreCounter, HOST_STRATEGY};
use rayon::prelude::*;

// ─────────────────────────────────────────────────────────────────────────────
// Basic contract
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn count_cores_returns_at_least_one() {
    assert!(count_cores() >= 1, "count_cores() must be >= 1");
}

#[test]
fn count_cores_returns_reasonable_upper_bound() {
    // No real machine has more than 65536 logical cores.
    let cores = count_cores();
    assert!(
        cores <= 65536,
        "count_cores() returned suspiciously large value: {cores}"
    );
}

#[test]
fn count_cores_is_deterministic() {
    let first = count_cores();
    let second = count_cores();
    assert_eq!(
        first, second,
        "count_cores() must return the same value on repeated calls"
    );
}

#[test]
fn uncached_query_matches_memoized_value() {
    assert_eq!(count_cores_uncached(), count_cores());
}

#[test]
fn host_counter_never_returns_zero() {
    assert_ne!(host_counter().count_cores(), 0);
}

#[test]
fn host_strategy_is_named() {
    assert!(!HOST_STRATEGY.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Concurrency
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn concurrent_calls_agree() {
    let counts: Vec<usize> = (0..256).into_par_iter().map(|_| count_cores()).collect();
    let first = counts[0];
    assert!(counts.iter().all(|&c| c == first), "all threads must observe one value");
}

// ─────────────────────────────────────────────────────────────────────────────
// Cross-check against num_cpus
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(any(target_os = "linux", target_os = "android"))]
#[test]
fn online_count_covers_affinity_mask() {
    // num_cpus::get() honours sched affinity and cgroup quotas, both of which
    // can only narrow the online processor set reported by sysconf.
    assert!(num_cpus::get() <= count_cores());
}
