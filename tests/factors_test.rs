// Integration tests for the factor finder walkthrough

use proptest::prelude::*;
use stepviz::steps::factors::{self, FactorStage, FactorStep};
use stepviz::steps::{GenerateError, MAX_NUMBER};

fn count(steps: &[FactorStep], stage: FactorStage) -> usize {
    steps.iter().filter(|s| s.stage == stage).count()
}

fn final_factors(steps: &[FactorStep]) -> &[u32] {
    &steps.last().expect("walkthrough is never empty").factors
}

#[test]
fn test_perfect_square_36() {
    let steps = factors::generate(36, true).expect("36 is valid");
    assert_eq!(final_factors(&steps), &[1, 2, 3, 4, 6, 9, 12, 18, 36]);

    let root_hits: Vec<&FactorStep> = steps
        .iter()
        .filter(|s| s.stage == FactorStage::Found && s.new_factor == Some(6))
        .collect();
    assert_eq!(root_hits.len(), 1);
    assert_eq!(root_hits[0].new_pair, Some(6));
    assert_eq!(
        root_hits[0].factors.iter().filter(|&&f| f == 6).count(),
        1,
        "6 must be inserted once"
    );
}

#[test]
fn test_one_in_both_modes() {
    for optimized in [true, false] {
        let steps = factors::generate(1, optimized).expect("1 is valid");
        assert_eq!(final_factors(&steps), &[1]);
        assert_eq!(count(&steps, FactorStage::Checking), 1);
        assert_eq!(count(&steps, FactorStage::Found), 1);
    }
}

#[test]
fn test_24_optimized_vs_naive() {
    let optimized = factors::generate(24, true).expect("24 is valid");
    let naive = factors::generate(24, false).expect("24 is valid");

    assert_eq!(final_factors(&optimized), &[1, 2, 3, 4, 6, 8, 12, 24]);
    assert_eq!(final_factors(&optimized), final_factors(&naive));

    assert_eq!(count(&optimized, FactorStage::Checking), 4);
    assert!(count(&optimized, FactorStage::Checking) <= 5);
    assert_eq!(count(&naive, FactorStage::Checking), 24);
}

#[test]
fn test_invalid_numbers_produce_no_steps() {
    for number in [0, -3, i64::from(MAX_NUMBER) + 1] {
        match factors::generate(number, true) {
            Err(GenerateError::InvalidInput { .. }) => {}
            other => panic!("expected InvalidInput for {}, got {:?}", number, other),
        }
    }
}

#[test]
fn test_mode_toggle_leaks_no_state() {
    let fresh = factors::generate(60, true).expect("60 is valid");
    let _ = factors::generate(60, false).expect("60 is valid");
    let again = factors::generate(60, true).expect("60 is valid");
    assert_eq!(fresh, again);
}

#[test]
fn test_run_framing() {
    let steps = factors::generate(45, true).expect("45 is valid");
    assert_eq!(steps[0].stage, FactorStage::Init);
    assert_eq!(steps[1].stage, FactorStage::Optimize);
    assert_eq!(steps.last().map(|s| s.stage), Some(FactorStage::Result));
    assert_eq!(count(&steps, FactorStage::Init), 1);
    assert_eq!(count(&steps, FactorStage::Optimize), 1);
    assert_eq!(count(&steps, FactorStage::Result), 1);

    let naive = factors::generate(45, false).expect("45 is valid");
    assert_eq!(count(&naive, FactorStage::Optimize), 0);
}

#[test]
fn test_largest_perfect_square_is_scanned_to_root() {
    let steps = factors::generate(10_000, true).expect("10000 is valid");
    assert_eq!(count(&steps, FactorStage::Checking), 100);
    let last_check = steps
        .iter()
        .filter(|s| s.stage == FactorStage::Checking)
        .last()
        .and_then(|s| s.current_divisor);
    assert_eq!(last_check, Some(100));
    assert_eq!(final_factors(&steps), factors::factors_of(10_000).as_slice());
}

fn is_strictly_sorted(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deterministic(number in 1i64..=10_000, optimized in any::<bool>()) {
        let a = factors::generate(number, optimized).unwrap();
        let b = factors::generate(number, optimized).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_final_factors_match_trial_division(
        number in 1u32..=10_000,
        optimized in any::<bool>()
    ) {
        let steps = factors::generate(i64::from(number), optimized).unwrap();
        let expected: Vec<u32> = (1..=number).filter(|d| number % d == 0).collect();
        prop_assert_eq!(final_factors(&steps), expected.as_slice());
    }

    #[test]
    fn prop_factors_sorted_and_growing(number in 1i64..=2_000, optimized in any::<bool>()) {
        let steps = factors::generate(number, optimized).unwrap();
        let mut previous_len = 0;
        for step in &steps {
            prop_assert!(is_strictly_sorted(&step.factors));
            prop_assert!(step.factors.len() >= previous_len);
            previous_len = step.factors.len();
            prop_assert_eq!(step.optimized, optimized);
            prop_assert_eq!(i64::from(step.number), number);
        }
    }

    #[test]
    fn prop_checking_count_matches_bound(number in 1u32..=10_000, optimized in any::<bool>()) {
        let steps = factors::generate(i64::from(number), optimized).unwrap();
        let expected = if optimized {
            factors::integer_sqrt(number) as usize
        } else {
            number as usize
        };
        prop_assert_eq!(count(&steps, FactorStage::Checking), expected);
        prop_assert_eq!(count(&steps, FactorStage::Dividing), expected);
        prop_assert_eq!(
            count(&steps, FactorStage::Found) + count(&steps, FactorStage::NotFound),
            expected
        );
    }

    #[test]
    fn prop_each_divisor_is_checked_divided_then_decided(
        number in 1i64..=500,
        optimized in any::<bool>()
    ) {
        let steps = factors::generate(number, optimized).unwrap();
        let start = if optimized { 2 } else { 1 };
        let body = &steps[start..steps.len() - 1];
        prop_assert_eq!(body.len() % 3, 0);
        for (i, triple) in body.chunks(3).enumerate() {
            let d = Some(i as u32 + 1);
            prop_assert_eq!(triple[0].stage, FactorStage::Checking);
            prop_assert_eq!(triple[1].stage, FactorStage::Dividing);
            prop_assert!(matches!(triple[2].stage, FactorStage::Found | FactorStage::NotFound));
            for step in triple {
                prop_assert_eq!(step.current_divisor, d);
            }
            prop_assert_eq!(
                triple[2].stage == FactorStage::Found,
                triple[1].is_divisible == Some(true)
            );
        }
    }

    #[test]
    fn prop_non_positive_is_invalid(number in i64::MIN..=0, optimized in any::<bool>()) {
        prop_assert!(factors::generate(number, optimized).is_err());
    }
}
