//! JSON model of an InfluxDB `/query` response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Top-level body returned by `/query`.
///
/// ```json
/// {"results":[{"statement_id":0,"series":[{"name":"cpu","columns":["time","value"],"values":[[0,1.5]]}]}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// One entry per statement in the request.
    #[serde(default)]
    pub results: Vec<StatementResult>,

    /// Request-level error (e.g. a parse failure of the whole query).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementResult {
    /// Position of the statement in the request.
    #[serde(default)]
    pub statement_id: u32,

    /// Series produced by the statement.
    #[serde(default)]
    pub series: Vec<Series>,

    /// Statement-level error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A named table of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Measurement name.
    #[serde(default)]
    pub name: String,

    /// Tag set shared by every row (present with `GROUP BY`).
    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    /// Column names, usually starting with `time`.
    #[serde(default)]
    pub columns: Vec<String>,

    /// Rows, each aligned with `columns`.
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl Series {
    /// Returns the index of `column`.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Iterates over the values of one column.
    pub fn column<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a serde_json::Value> + 'a {
        let index = self.column_index(column);
        self.values
            .iter()
            .filter_map(move |row| index.and_then(|i| row.get(i)))
    }
}

impl QueryResponse {
    /// Decodes a raw `/query` body.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Flattens every statement's series, failing on the first error the
    /// server reported.
    pub fn into_series(self) -> Result<Vec<Series>, Error> {
        if let Some(error) = self.error {
            return Err(Error::transport(format!("query failed: {}", error)));
        }

        let mut series = Vec::new();
        for result in self.results {
            if let Some(error) = result.error {
                return Err(Error::transport(format!(
                    "statement {} failed: {}",
                    result.statement_id, error
                )));
            }
            series.extend(result.series);
        }
        Ok(series)
    }
}
