//! Reload handler

use axum::{extract::State, Json};

use crate::classifier::{TrainedClassifier, FEATURE_COUNT};
use crate::dataset::DatasetRow;
use crate::models::{DatasetSummary, Record};
use crate::{AppResult, AppState};

/// Refresh the record store from the dataset source and retrain the
/// classifier.
///
/// Stage-then-publish: the forest is trained before the store is touched,
/// and the store rewrite commits before the classifier swap, so any failure
/// leaves the previous store/classifier pair intact.
pub async fn reload(State(state): State<AppState>) -> AppResult<Json<DatasetSummary>> {
    let rows = state.dataset.fetch().await?;
    tracing::info!("Fetched {} complete rows from dataset source", rows.len());

    let (features, labels) = feature_matrix(&rows);
    let classifier = TrainedClassifier::train(&features, &labels)?;

    Record::replace_all(&state.pool, &rows).await?;
    state.classifier.replace(classifier);

    let summary = Record::summary(&state.pool).await?;
    tracing::info!(
        "Reloaded {} records and retrained classifier",
        summary.total_listings
    );

    Ok(Json(summary))
}

/// Split cleaned rows into the 8-column feature matrix (fixed column order)
/// and the outcome label vector.
fn feature_matrix(rows: &[DatasetRow]) -> (Vec<[f32; FEATURE_COUNT]>, Vec<usize>) {
    let mut features = Vec::with_capacity(rows.len());
    let mut labels = Vec::with_capacity(rows.len());

    for row in rows {
        features.push([
            row.pregnancies as f32,
            row.glucose as f32,
            row.blood_pressure as f32,
            row.skin_thickness as f32,
            row.insulin as f32,
            row.body_mass_index as f32,
            row.pedigree_function as f32,
            row.age as f32,
        ]);
        labels.push(row.outcome as usize);
    }

    (features, labels)
}
