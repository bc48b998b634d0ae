// crates/large-code-gen/tests/proptest_fixture.rs
// ============================================================================
// Module: Fixture Property-Based Tests
// Description: Property tests for closed-form equivalence and count parsing.
// Purpose: Detect disagreement between aggregator and reference across inputs.
// ============================================================================

//! Property-based tests for fixture evaluation and count parsing invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use large_code_gen::FixtureGenError;
use large_code_gen::FixtureGenerator;
use large_code_gen::FunctionCount;
use large_code_gen::MAX_EXACT_REFERENCE_COUNT;
use large_code_gen::apply_function;
use proptest::prelude::*;

fn generator(count: u32) -> FixtureGenerator {
    FixtureGenerator::new(FunctionCount::new(count).expect("non-zero count"))
}

proptest! {
    #[test]
    fn aggregator_matches_reference_for_small_counts(count in 1u32 ..= 2_048, x in any::<u32>()) {
        let generator = generator(count);
        prop_assert_eq!(generator.use_all(x), generator.expected_output(x));
    }

    #[test]
    fn reference_matches_closed_form_below_bound(
        count in 1u32 ..= MAX_EXACT_REFERENCE_COUNT,
        x in any::<u32>()
    ) {
        let exact = u64::from(count) * (u64::from(count) + 1) / 2 + u64::from(x);
        let wrapped = u32::try_from(exact % (1u64 << 32)).expect("reduced modulo 2^32");
        prop_assert_eq!(generator(count).expected_output(x), wrapped);
    }

    #[test]
    fn aggregator_threads_sum_through_each_function(count in 1u32 ..= 512, x in any::<u32>()) {
        let mut sum = x;
        for index in 1 ..= count {
            sum = apply_function(index, sum);
        }
        prop_assert_eq!(generator(count).use_all(x), sum);
    }

    #[test]
    fn negative_counts_are_rejected(value in i64::MIN .. 0) {
        let raw = value.to_string();
        let result = FunctionCount::parse(&raw);
        prop_assert!(
            matches!(result, Err(FixtureGenError::InvalidCount { value: _ })),
            "expected InvalidCount for {}",
            raw
        );
    }

    #[test]
    fn rendering_is_deterministic(count in 1u32 ..= 300) {
        let generator = generator(count);
        prop_assert_eq!(generator.render(), generator.render());
    }
}
