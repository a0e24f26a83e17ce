//! Record model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, SqlitePool};

use crate::dataset::DatasetRow;

/// One persisted observation. The table is rewritten wholesale on every
/// reload; ids are 0-based and follow source row order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Record {
    pub id: i64,
    pub pregnancies: i64,
    pub glucose: i64,
    pub blood_pressure: i64,
    pub skin_thickness: i64,
    pub insulin: i64,
    pub body_mass_index: f64,
    pub pedigree_function: f64,
    pub age: i64,
    pub outcome: i64,
}

/// Aggregate statistics over the current table contents. Field names match
/// the reload response contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_listings: i64,
    pub average_pregnancies: f64,
    pub average_glucose: f64,
    pub average_blood_pressure: f64,
    pub average_skin_thickness: f64,
    pub average_insulin: f64,
    pub average_bmi: f64,
    pub average_diabetes_pedigree_function: f64,
    pub average_age: f64,
    pub average_outcome: f64,
}

impl Record {
    /// Clear the table and insert one record per cleaned row, assigning
    /// sequential 0-based ids. Runs in a single transaction so concurrent
    /// readers see either the old table or the new one.
    pub async fn replace_all(pool: &SqlitePool, rows: &[DatasetRow]) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM records").execute(&mut *tx).await?;

        for (id, row) in rows.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO records
                    (id, pregnancies, glucose, blood_pressure, skin_thickness,
                     insulin, body_mass_index, pedigree_function, age, outcome)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(id as i64)
            .bind(row.pregnancies)
            .bind(row.glucose)
            .bind(row.blood_pressure)
            .bind(row.skin_thickness)
            .bind(row.insulin)
            .bind(row.body_mass_index)
            .bind(row.pedigree_function)
            .bind(row.age)
            .bind(row.outcome)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    pub async fn all(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Record>("SELECT * FROM records ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM records")
            .fetch_one(pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Count and per-column arithmetic means over the whole table.
    pub async fn summary(pool: &SqlitePool) -> Result<DatasetSummary, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) as total,
                AVG(pregnancies) as avg_pregnancies,
                AVG(glucose) as avg_glucose,
                AVG(blood_pressure) as avg_blood_pressure,
                AVG(skin_thickness) as avg_skin_thickness,
                AVG(insulin) as avg_insulin,
                AVG(body_mass_index) as avg_body_mass_index,
                AVG(pedigree_function) as avg_pedigree_function,
                AVG(age) as avg_age,
                AVG(outcome) as avg_outcome
            FROM records
            "#,
        )
        .fetch_one(pool)
        .await?;

        let avg = |name: &str| row.get::<Option<f64>, _>(name).unwrap_or(0.0);

        Ok(DatasetSummary {
            total_listings: row.get("total"),
            average_pregnancies: avg("avg_pregnancies"),
            average_glucose: avg("avg_glucose"),
            average_blood_pressure: avg("avg_blood_pressure"),
            average_skin_thickness: avg("avg_skin_thickness"),
            average_insulin: avg("avg_insulin"),
            average_bmi: avg("avg_body_mass_index"),
            average_diabetes_pedigree_function: avg("avg_pedigree_function"),
            average_age: avg("avg_age"),
            average_outcome: avg("avg_outcome"),
        })
    }
}
