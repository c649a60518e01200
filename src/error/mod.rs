mod app_error;
mod database_converter;

pub use app_error::{AppError, AppResult, INTERNAL_ERROR_MESSAGE};
pub use database_converter::DatabaseErrorConverter;
