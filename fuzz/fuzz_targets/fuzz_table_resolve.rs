#![no_main]

use arbitrary::Arbitrary;
use dims_core::{Breakpoint, ThresholdTable, resolve_index};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    labels: Vec<u8>,
    widths: Vec<u32>,
    queries: Vec<u32>,
}

fuzz_target!(|input: Input| {
    // Small label alphabet so duplicates show up often.
    let sizes: Vec<Breakpoint> = input
        .labels
        .iter()
        .take(16)
        .map(|b| Breakpoint::new(format!("t{}", b % 12)))
        .collect();
    let widths: Vec<u32> = input.widths.iter().take(16).copied().collect();

    // The free resolver accepts anything, including unsorted input.
    for &width in input.queries.iter().take(64) {
        let idx = resolve_index(width, &widths);
        assert!(widths.is_empty() || idx < widths.len());
    }

    let Ok(table) = ThresholdTable::new(sizes, widths) else {
        return;
    };

    assert!(!table.is_empty());
    assert!(table.widths().windows(2).all(|w| w[0] <= w[1]));

    for &width in input.queries.iter().take(64) {
        let tier = table.resolve(width);
        let rank = table.rank_of(tier);
        assert!(rank >= 0, "resolved tier must be in the table");

        let min = table.min_width_of(tier).unwrap_or(0);
        if width >= table.widths()[0] {
            assert!(min <= width, "tier threshold {min} above width {width}");
        } else {
            assert_eq!(tier, table.smallest());
        }

        let cmp = table.comparator(tier);
        assert!(cmp.is_equal_to(tier));
        assert!(!cmp.is_larger_than(tier));
        assert!(!cmp.is_smaller_than(tier));
    }
});
