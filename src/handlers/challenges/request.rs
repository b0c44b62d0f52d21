//! Challenge request DTOs

use serde::Deserialize;
use validator::Validate;

/// Submit flag request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFlagRequest {
    #[validate(length(max = 512))]
    pub flag: String,

    /// When the user started the attempt, epoch milliseconds
    pub start_time: Option<i64>,
}
