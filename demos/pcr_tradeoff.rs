//! Principal-Component Regression Example
//!
//! Evaluates PCR for every component count on a train/test split of a
//! synthetic dataset, prints the accuracy trade-off table, and folds the
//! full-rank model back onto the original features.

use elegir::data::Dataset;
use elegir::interpret::reconstruct;
use elegir::model_selection::train_test_split;
use elegir::pcr::PcrPipeline;
use elegir::primitives::Vector;

/// Deterministic pseudo-random values in [-scale, scale].
fn column(len: usize, seed: u64, scale: f32) -> Vec<f32> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as f32 / u32::MAX as f32 * 2.0 - 1.0) * scale
        })
        .collect()
}

fn build_dataset() -> Dataset {
    let n = 97;
    let names = ["x1", "x2", "x3", "x4", "x5", "x6"];

    let mut columns: Vec<(String, Vector<f32>)> = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            (
                (*name).to_string(),
                Vector::from_vec(column(n, 40 + j as u64, 2.5)),
            )
        })
        .collect();

    let x1 = columns[0].1.clone();
    let x2 = columns[1].1.clone();
    let noise = column(n, 4242, 0.2);
    let y: Vec<f32> = (0..n).map(|i| 1.5 * x1[i] - 0.8 * x2[i] + noise[i]).collect();
    columns.push(("y".to_string(), Vector::from_vec(y)));

    Dataset::new(columns, "y").expect("valid dataset")
}

fn main() {
    println!("Principal-Component Regression Trade-off");
    println!("========================================\n");

    let dataset = build_dataset();
    let feature_names = dataset.feature_names();
    let x = dataset
        .feature_matrix(&feature_names)
        .expect("feature matrix");
    let y = dataset.response().clone();

    let (train_x, test_x, train_y, test_y) =
        train_test_split(&x, &y, 0.2, Some(42)).expect("split");

    println!(
        "Split: {} training rows, {} test rows, {} features",
        train_x.shape().0,
        test_x.shape().0,
        train_x.shape().1
    );
    println!("Cross-validation: 5 folds on the training split\n");

    let pipeline = PcrPipeline::new(train_x.shape().1, 5).with_random_state(42);
    let table = pipeline
        .evaluate(&train_x, &train_y, &test_x, &test_y)
        .expect("PCR evaluation failed");

    println!(
        "{:>2}  {:>8}  {:>8}  {:>8}  {:>8}",
        "k", "R²", "R² (cv)", "MSE", "MSE (cv)"
    );
    for row in &table {
        println!(
            "{:>2}  {:>8.4}  {:>8.4}  {:>8.4}  {:>8.4}",
            row.n_components, row.r_squared, row.cv_r_squared, row.mse, row.cv_mse
        );
    }

    // Fold the full-rank model back onto the original features
    let full = table.last().expect("non-empty table");
    let coefs = reconstruct(full, &feature_names)
        .expect("reconstruction failed")
        .normalized();

    println!("\nEffective feature weights (full-rank model, normalized):");
    for (name, weight) in coefs.weights() {
        println!("  {name:>4}: {weight:>7.3}");
    }
}
