use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

/// One row of a per-day creation histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct Statistic {
    pub day: NaiveDate,
    pub count: i64,
}
