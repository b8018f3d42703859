#![no_main]

use arbitrary::Arbitrary;
use dims_core::{Breakpoint, ThresholdTable};
use dims_runtime::{BreakpointContext, DimensionTracker, ResizeOutcome, TrackerConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    allow_mask: Option<u8>,
    watch_window_size: bool,
    resizes: Vec<(u16, u16)>,
}

fuzz_target!(|input: Input| {
    let breakpoints = input.allow_mask.map(|mask| {
        Breakpoint::STANDARD
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, bp)| bp.clone())
            .collect::<Vec<_>>()
    });
    let config = TrackerConfig {
        breakpoints,
        watch_window_size: input.watch_window_size,
    };
    let table = ThresholdTable::default();
    let tracker = DimensionTracker::headless(BreakpointContext::default(), config.clone());

    let mut commits = 0u64;
    for &(w, h) in input.resizes.iter().take(256) {
        let (w, h) = (u32::from(w), u32::from(h));
        let before = tracker.dimensions();
        let candidate = table.resolve(w).clone();

        match tracker.on_resize(w, h) {
            ResizeOutcome::Committed(dims) => {
                commits += 1;
                assert_eq!(dims, tracker.dimensions());
                assert_eq!(dims.size, candidate);
                assert!(config.allows(&candidate));
            }
            ResizeOutcome::Unchanged => assert_eq!(tracker.dimensions(), before),
            ResizeOutcome::Filtered { candidate: c } => {
                assert_eq!(c, candidate);
                assert!(!config.allows(&c));
                assert_eq!(tracker.dimensions(), before);
            }
        }

        if !input.watch_window_size {
            assert_eq!((tracker.width(), tracker.height()), (0, 0));
        }
    }
    assert_eq!(tracker.version(), commits);
});
