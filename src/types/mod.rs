//! Data types returned by the client.

mod series;

pub use series::{QueryResponse, Series, StatementResult};
