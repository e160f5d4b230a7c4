//! Request handlers.

mod health;
mod report;
mod search;

use crate::error_handling::ApiError;

pub use health::health_handler;
pub use report::{generate_report_handler, get_report_handler};
pub use search::{
    search_email_handler, search_image_handler, search_name_handler, search_phone_handler,
    search_wifi_handler,
};

/// Fallback for unknown routes.
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
