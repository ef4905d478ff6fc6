//! Property-based tests using proptest.
//!
//! These tests verify invariants of the selection and decomposition
//! algorithms over generated data.

use elegir::data::Dataset;
use elegir::metrics::{adjusted_r_squared, aic, bic};
use elegir::model_selection::KFold;
use elegir::prelude::*;
use elegir::subset_selection::BestSubsetSelector;
use proptest::prelude::*;

// Strategy for generating small matrices
fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix<f32>> {
    proptest::collection::vec(-100.0f32..100.0, rows * cols).prop_map(move |data| {
        Matrix::from_vec(rows, cols, data).expect("Test data should be valid")
    })
}

// Strategy for generating vectors
fn vector_strategy(len: usize) -> impl Strategy<Value = Vector<f32>> {
    proptest::collection::vec(-100.0f32..100.0, len).prop_map(Vector::from_vec)
}

/// Builds a 3-predictor dataset whose response mixes the columns with the
/// given weights plus noise-free structure.
fn dataset_from(columns: [Vec<f32>; 3], w: [f32; 3]) -> Dataset {
    let y: Vec<f32> = (0..columns[0].len())
        .map(|i| w[0] * columns[0][i] + w[1] * columns[1][i] + w[2] * columns[2][i])
        .collect();
    let [c1, c2, c3] = columns;
    Dataset::new(
        vec![
            ("x1".to_string(), Vector::from_vec(c1)),
            ("x2".to_string(), Vector::from_vec(c2)),
            ("x3".to_string(), Vector::from_vec(c3)),
            ("y".to_string(), Vector::from_vec(y)),
        ],
        "y",
    )
    .expect("valid dataset")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Vector properties

    #[test]
    fn vector_dot_is_commutative(a in vector_strategy(10), b in vector_strategy(10)) {
        let dot_ab = a.dot(&b);
        let dot_ba = b.dot(&a);
        prop_assert!((dot_ab - dot_ba).abs() < 1e-2);
    }

    #[test]
    fn vector_norm_is_non_negative(v in vector_strategy(10)) {
        prop_assert!(v.norm() >= 0.0);
    }

    #[test]
    fn vector_sum_of_refs_adds(a in vector_strategy(10), b in vector_strategy(10)) {
        let sum = (&a + &b).sum();
        prop_assert!((sum - (a.sum() + b.sum())).abs() < 1e-2);
    }

    // Closed-form round trips

    #[test]
    fn adjusted_r2_round_trip(r2 in -1.0f32..1.0, n in 10usize..200, k in 1usize..6) {
        let adj = adjusted_r_squared(r2, n, k);
        let expected = 1.0 - (1.0 - r2) * (n as f32 - 1.0) / (n as f32 - k as f32 - 1.0);
        prop_assert!((adj - expected).abs() < 1e-4);
    }

    #[test]
    fn aic_bic_round_trip(rss in 0.1f32..1000.0, n in 10usize..200, k in 1usize..6) {
        let d = (k + 1) as f32;
        let n_f = n as f32;
        let expected_aic = n_f * (rss / n_f).ln() + 2.0 * d;
        let expected_bic = n_f * (rss / n_f).ln() + n_f.ln() * d;
        prop_assert!((aic(rss, n, k) - expected_aic).abs() < 1e-3);
        prop_assert!((bic(rss, n, k) - expected_bic).abs() < 1e-3);
    }

    #[test]
    fn bic_penalizes_at_least_as_hard_as_aic(rss in 0.1f32..1000.0, n in 8usize..200, k in 1usize..6) {
        // For n >= 8, ln(n) > 2, so BIC >= AIC at equal RSS
        prop_assert!(bic(rss, n, k) >= aic(rss, n, k) - 1e-3);
    }

    // KFold invariants

    #[test]
    fn kfold_partitions_exactly(n_samples in 10usize..60, n_splits in 2usize..6, seed in 0u64..1000) {
        let splits = KFold::new(n_splits).with_random_state(seed).split(n_samples);
        prop_assert_eq!(splits.len(), n_splits);

        let mut seen: Vec<usize> = splits.iter().flat_map(|(_, test)| test).copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..n_samples).collect::<Vec<_>>());

        for (train, test) in &splits {
            prop_assert_eq!(train.len() + test.len(), n_samples);
            for idx in test {
                prop_assert!(!train.contains(idx));
            }
        }
    }

    #[test]
    fn kfold_same_seed_same_folds(n_samples in 10usize..60, seed in 0u64..1000) {
        let a = KFold::new(5).with_random_state(seed).split(n_samples);
        let b = KFold::new(5).with_random_state(seed).split(n_samples);
        prop_assert_eq!(a, b);
    }

    // PCA invariants

    #[test]
    fn pca_sign_convention_holds(x in matrix_strategy(12, 4)) {
        use elegir::decomposition::PCA;
        use elegir::traits::Transformer;

        let mut pca = PCA::new(4);
        if pca.fit(&x).is_ok() {
            let components = pca.components().expect("fitted");
            for c in 0..4 {
                let row = components.row(c);
                let mut pivot = 0;
                for j in 0..row.len() {
                    if row[j].abs() > row[pivot].abs() {
                        pivot = j;
                    }
                }
                prop_assert!(row[pivot] >= 0.0);
            }
        }
    }

    // Selector invariants

    #[test]
    fn best_subset_rss_monotone(
        c1 in proptest::collection::vec(-10.0f32..10.0, 16),
        c2 in proptest::collection::vec(-10.0f32..10.0, 16),
        c3 in proptest::collection::vec(-10.0f32..10.0, 16),
        w1 in -3.0f32..3.0,
        w2 in -3.0f32..3.0,
    ) {
        let ds = dataset_from([c1, c2, c3], [w1, w2, 0.5]);

        // Random columns can be collinear; skip those draws
        if let Ok(table) = BestSubsetSelector::new(3).select(&ds) {
            for pair in table.windows(2) {
                // Larger subsets cannot fit worse in-sample (tolerance for
                // f32 normal-equation noise)
                prop_assert!(pair[1].rss <= pair[0].rss + pair[0].rss.abs() * 0.01 + 1.0);
            }
        }
    }

    #[test]
    fn best_subset_scores_recompute_from_rss(
        c1 in proptest::collection::vec(-10.0f32..10.0, 16),
        c2 in proptest::collection::vec(-10.0f32..10.0, 16),
        c3 in proptest::collection::vec(-10.0f32..10.0, 16),
    ) {
        let ds = dataset_from([c1, c2, c3], [1.0, -2.0, 0.0]);
        let n = ds.n_rows();

        if let Ok(table) = BestSubsetSelector::new(2).select(&ds) {
            for model in &table {
                prop_assert!((model.aic - aic(model.rss, n, model.size)).abs() < 1e-3);
                prop_assert!((model.bic - bic(model.rss, n, model.size)).abs() < 1e-3);
                prop_assert!(
                    (model.adjusted_r_squared
                        - adjusted_r_squared(model.r_squared, n, model.size))
                    .abs()
                        < 1e-4
                );
            }
        }
    }
}
