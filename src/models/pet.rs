//! Pet registry record.

use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub species: String,
    pub breed: String,
    pub sex: String,
    pub colour_and_identifying_marks: String,
    /// Stored but never exposed through the API.
    pub photo: Option<String>,
}
