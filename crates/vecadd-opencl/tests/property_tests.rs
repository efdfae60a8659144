//! Property-based tests for the pipeline's pure invariants:
//!
//! - **Grid sizing** always yields the smallest sufficient multiple of
//!   the local size.
//! - **Trimmed statistics** always discard exactly 20% from each end and
//!   stay inside the sample range.
//! - **Device selection** honors the GPU-first, last-CPU-fallback policy.
//! - **Verification** accepts every honestly computed sum.

use std::time::Duration;

use proptest::prelude::*;
use vecadd_opencl::data::generate_inputs;
use vecadd_opencl::verify::{host_reference, verify_exact};
use vecadd_opencl::{pick_device, DeviceKind, DevicePreference, LaunchGrid, TrimmedStats};

fn arb_kind() -> impl Strategy<Value = DeviceKind> {
    prop::sample::select(vec![DeviceKind::Gpu, DeviceKind::Cpu, DeviceKind::Other])
}

// ── grid sizing ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn global_is_the_smallest_sufficient_multiple(
        n in 0_usize..=10_000_000,
        local in prop::sample::select(vec![1_usize, 16, 64, 128, 256, 1024]),
    ) {
        let grid = LaunchGrid::for_elements(n, local);
        prop_assert!(grid.global >= n);
        prop_assert_eq!(grid.global % local, 0);
        prop_assert!(grid.global < n + local, "global {} not minimal for n {}", grid.global, n);
    }

    #[test]
    fn work_groups_cover_the_global_size(
        n in 1_usize..=10_000_000,
    ) {
        let grid = LaunchGrid::for_elements(n, 128);
        prop_assert_eq!(grid.work_groups() * grid.local, grid.global);
    }
}

// ── trimmed statistics ──────────────────────────────────────────

proptest! {
    #[test]
    fn trim_discards_a_fifth_from_each_end(
        micros in prop::collection::vec(1_u64..=1_000_000, 0..=64),
    ) {
        let laps: Vec<Duration> = micros.iter().map(|&us| Duration::from_micros(us)).collect();
        let stats = TrimmedStats::from_laps(&laps);
        let total = laps.len();
        prop_assert_eq!(stats.total, total);
        prop_assert_eq!(stats.retained, total - 2 * (total / 5));
    }

    #[test]
    fn mean_stays_inside_the_sample_range(
        micros in prop::collection::vec(1_u64..=1_000_000, 1..=64),
    ) {
        let laps: Vec<Duration> = micros.iter().map(|&us| Duration::from_micros(us)).collect();
        let stats = TrimmedStats::from_laps(&laps);

        let min = laps.iter().min().unwrap().as_secs_f64();
        let max = laps.iter().max().unwrap().as_secs_f64();
        prop_assert!(stats.mean_s >= min - 1e-12);
        prop_assert!(stats.mean_s <= max + 1e-12);
        prop_assert!(stats.stddev_s >= 0.0);
    }
}

// ── selection policy ────────────────────────────────────────────

proptest! {
    #[test]
    fn auto_returns_a_gpu_whenever_one_exists(
        kinds in prop::collection::vec(arb_kind(), 0..=16),
    ) {
        let has_gpu = kinds.contains(&DeviceKind::Gpu);
        let has_cpu = kinds.contains(&DeviceKind::Cpu);

        match pick_device(&kinds, DevicePreference::Auto) {
            Some(index) => {
                if has_gpu {
                    prop_assert_eq!(kinds[index], DeviceKind::Gpu);
                } else {
                    prop_assert!(has_cpu);
                    prop_assert_eq!(kinds[index], DeviceKind::Cpu);
                }
            }
            None => prop_assert!(!has_gpu && !has_cpu),
        }
    }

    #[test]
    fn fallback_picks_the_last_cpu(
        kinds in prop::collection::vec(
            prop::sample::select(vec![DeviceKind::Cpu, DeviceKind::Other]),
            1..=16,
        ),
    ) {
        if let Some(index) = pick_device(&kinds, DevicePreference::Auto) {
            prop_assert_eq!(kinds[index], DeviceKind::Cpu);
            prop_assert!(
                kinds[index + 1..].iter().all(|k| *k != DeviceKind::Cpu),
                "a later CPU should have been preferred"
            );
        }
    }
}

// ── verification ────────────────────────────────────────────────

proptest! {
    #[test]
    fn honest_sums_always_verify(seed in 0_u64..=u64::MAX, n in 0_usize..=2048) {
        let (a, b) = generate_inputs(n, seed);
        let result = host_reference(&a, &b);
        prop_assert!(verify_exact(&result, &a, &b).is_ok());
    }
}
