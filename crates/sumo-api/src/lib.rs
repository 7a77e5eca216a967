mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod adapter;
pub use adapter::EventRouterAdapter;

#[cfg(feature = "http")]
mod cloudevent;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::EventApi;

#[cfg(feature = "http")]
pub use axum;
