//! Launch grid sizing for the 1-D elementwise dispatch.

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Round `value` up to the next multiple of `multiple`.
#[inline]
fn round_up(value: usize, multiple: usize) -> usize {
    if multiple == 0 {
        return value;
    }
    let remainder = value % multiple;
    if remainder == 0 { value } else { value + multiple - remainder }
}

// ---------------------------------------------------------------------------
// Launch grid
// ---------------------------------------------------------------------------

/// Global/local work sizes for a 1-D dispatch.
///
/// The global size is the element count padded up to the next multiple of
/// the local work-group size; the kernel guards the trailing work-items.
/// Zero elements produce a zero-sized grid, which the dispatcher treats as
/// "nothing to launch".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchGrid {
    pub global: usize,
    pub local: usize,
}

impl LaunchGrid {
    pub fn for_elements(elements: usize, local: usize) -> Self {
        Self {
            global: round_up(elements, local),
            local,
        }
    }

    /// Number of work-groups in the dispatch.
    pub fn work_groups(&self) -> usize {
        if self.local == 0 {
            return 0;
        }
        self.global / self.local
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up_exact_multiple() {
        assert_eq!(round_up(128, 128), 128);
        assert_eq!(round_up(256, 128), 256);
    }

    #[test]
    fn round_up_non_multiple() {
        assert_eq!(round_up(1, 128), 128);
        assert_eq!(round_up(129, 128), 256);
        assert_eq!(round_up(1000, 128), 1024);
    }

    #[test]
    fn round_up_zero_value() {
        assert_eq!(round_up(0, 128), 0);
    }

    #[test]
    fn round_up_zero_multiple() {
        assert_eq!(round_up(42, 0), 42);
    }

    #[test]
    fn grid_is_smallest_sufficient_multiple() {
        for n in [1usize, 127, 128, 129, 1000, 4096, 1 << 20] {
            let grid = LaunchGrid::for_elements(n, 128);
            assert!(grid.global >= n);
            assert_eq!(grid.global % 128, 0);
            assert!(grid.global < n + 128, "global {} not minimal for n {}", grid.global, n);
        }
    }

    #[test]
    fn shipped_element_count_is_an_exact_multiple() {
        let grid = LaunchGrid::for_elements(100_000_000, 128);
        assert_eq!(grid.global, 100_000_000);
        assert_eq!(grid.work_groups(), 781_250);
    }

    #[test]
    fn zero_elements_make_an_empty_grid() {
        let grid = LaunchGrid::for_elements(0, 128);
        assert_eq!(grid.global, 0);
        assert_eq!(grid.work_groups(), 0);
    }

    #[test]
    fn degenerate_local_size_does_not_divide_by_zero() {
        let grid = LaunchGrid::for_elements(10, 0);
        assert_eq!(grid.work_groups(), 0);
    }
}
