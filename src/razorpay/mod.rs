//! Razorpay payments API client

mod client;
mod http;

pub use client::{ApiError, ApiRequest, ApiResult, Method, RazorpayApi};
pub use http::{basic_authorization, flatten_query, HttpClient, DEFAULT_BASE_URL};
