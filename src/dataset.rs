//! Dataset source - fetches and parses the diabetes CSV

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] csv::Error),

    #[error("dataset contains no complete rows")]
    Empty,
}

/// One cleaned dataset row. Every field is present; rows with missing
/// values never make it past parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
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

/// Raw CSV row as fetched. Optional fields so rows with empty cells can be
/// dropped rather than failing the whole table.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Pregnancies")]
    pregnancies: Option<i64>,
    #[serde(rename = "Glucose")]
    glucose: Option<i64>,
    #[serde(rename = "BloodPressure")]
    blood_pressure: Option<i64>,
    #[serde(rename = "SkinThickness")]
    skin_thickness: Option<i64>,
    #[serde(rename = "Insulin")]
    insulin: Option<i64>,
    #[serde(rename = "BMI")]
    body_mass_index: Option<f64>,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pedigree_function: Option<f64>,
    #[serde(rename = "Age")]
    age: Option<i64>,
    #[serde(rename = "Outcome")]
    outcome: Option<i64>,
}

impl RawRow {
    /// Returns the completed row, or `None` if any required field is missing.
    fn complete(self) -> Option<DatasetRow> {
        Some(DatasetRow {
            pregnancies: self.pregnancies?,
            glucose: self.glucose?,
            blood_pressure: self.blood_pressure?,
            skin_thickness: self.skin_thickness?,
            insulin: self.insulin?,
            body_mass_index: self.body_mass_index?,
            pedigree_function: self.pedigree_function?,
            age: self.age?,
            outcome: self.outcome?,
        })
    }
}

/// HTTP client for the external dataset source
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: reqwest::Client,
    url: String,
}

impl DatasetClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Fetch the dataset and return its cleaned rows, in source order.
    pub async fn fetch(&self) -> Result<Vec<DatasetRow>, DatasetError> {
        let body = self
            .http
            .get(&self.url)
            .timeout(Duration::from_secs(30))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_csv(&body)
    }
}

/// Parse the CSV document, dropping rows with missing required fields.
/// A present but unparseable value fails the whole table.
fn parse_csv(body: &str) -> Result<Vec<DatasetRow>, DatasetError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut rows = Vec::new();

    for result in reader.deserialize::<RawRow>() {
        if let Some(row) = result?.complete() {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return Err(DatasetError::Empty);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome";

    #[test]
    fn parses_complete_rows_in_order() {
        let csv = format!("{HEADER}\n6,148,72,35,0,33.6,0.627,50,1\n1,85,66,29,0,26.6,0.351,31,0\n");
        let rows = parse_csv(&csv).expect("parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pregnancies, 6);
        assert_eq!(rows[0].outcome, 1);
        assert_eq!(rows[1].glucose, 85);
        assert!((rows[1].body_mass_index - 26.6).abs() < 1e-9);
    }

    #[test]
    fn drops_rows_with_missing_values() {
        let csv = format!("{HEADER}\n6,148,72,35,0,33.6,0.627,50,1\n1,,66,29,0,26.6,0.351,31,0\n8,183,64,0,0,23.3,0.672,32,1\n");
        let rows = parse_csv(&csv).expect("parse");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].glucose, 148);
        assert_eq!(rows[1].glucose, 183);
    }

    #[test]
    fn unparseable_value_fails_the_table() {
        let csv = format!("{HEADER}\n6,abc,72,35,0,33.6,0.627,50,1\n");
        let err = parse_csv(&csv).expect_err("garbage glucose");
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn all_rows_incomplete_is_empty() {
        let csv = format!("{HEADER}\n,148,72,35,0,33.6,0.627,50,1\n");
        let err = parse_csv(&csv).expect_err("no complete rows");
        assert!(matches!(err, DatasetError::Empty));
    }

    #[tokio::test]
    async fn fetch_propagates_server_errors() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = DatasetClient::new(format!("{}/diabetes.csv", server.uri()));
        let err = client.fetch().await.expect_err("unavailable source");
        assert!(matches!(err, DatasetError::Fetch(_)));
    }
}
