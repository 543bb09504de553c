use crate::presentation::http::errors::AppError;
use axum::extract::FromRequest;

/// `Json` extractor whose rejections render through [`AppError`], so malformed
/// bodies come back as 400 with the usual `{"error": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
