//! Best-Subset Selection Example
//!
//! Runs the exhaustive best-subset search over a synthetic 97-row,
//! 8-predictor clinical-style dataset and prints the best model per size
//! with its comparison scores.

use elegir::data::Dataset;
use elegir::primitives::Vector;
use elegir::subset_selection::{BestSubsetSelector, SelectionCriterion};

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
    let names = [
        "lcavol", "lweight", "age", "lbph", "svi", "lcp", "gleason", "pgg45",
    ];

    let mut columns: Vec<(String, Vector<f32>)> = names
        .iter()
        .enumerate()
        .map(|(j, name)| {
            (
                (*name).to_string(),
                Vector::from_vec(column(n, 90 + j as u64, 3.0)),
            )
        })
        .collect();

    // Response driven mostly by lcavol and lweight, plus mild noise
    let lcavol = columns[0].1.clone();
    let lweight = columns[1].1.clone();
    let svi = columns[4].1.clone();
    let noise = column(n, 7777, 0.3);
    let y: Vec<f32> = (0..n)
        .map(|i| 0.7 * lcavol[i] + 0.5 * lweight[i] + 0.3 * svi[i] + noise[i])
        .collect();
    columns.push(("lpsa".to_string(), Vector::from_vec(y)));

    Dataset::new(columns, "lpsa").expect("valid dataset")
}

fn main() {
    println!("Best-Subset Regression Selection");
    println!("================================\n");

    let dataset = build_dataset();
    println!(
        "Dataset: {} observations, {} predictors, response '{}'",
        dataset.n_rows(),
        dataset.n_features(),
        dataset.response_name()
    );
    println!(
        "Exhaustive search: 2^{} - 1 = {} candidate subsets\n",
        dataset.n_features(),
        (1u32 << dataset.n_features()) - 1
    );

    let selector = BestSubsetSelector::new(dataset.n_features())
        .with_criterion(SelectionCriterion::Rss);
    let table = selector.select(&dataset).expect("Selection failed");

    println!(
        "{:>2}  {:>10}  {:>8}  {:>8}  {:>10}  {:>10}  predictors",
        "k", "RSS", "R²", "adj R²", "AIC", "BIC"
    );
    for model in &table {
        println!(
            "{:>2}  {:>10.4}  {:>8.4}  {:>8.4}  {:>10.2}  {:>10.2}  {}",
            model.size,
            model.rss,
            model.r_squared,
            model.adjusted_r_squared,
            model.aic,
            model.bic,
            model.predictors.join(", ")
        );
    }

    let best_bic = table
        .iter()
        .min_by(|a, b| a.bic.partial_cmp(&b.bic).expect("finite BIC"))
        .expect("non-empty table");
    println!(
        "\nLowest BIC at k = {}: {}",
        best_bic.size,
        best_bic.predictors.join(", ")
    );
}
