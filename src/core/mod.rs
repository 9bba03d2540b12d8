pub mod budget;
pub mod http;

pub use crate::utils::error::Result;
pub use budget::BudgetApi;
pub use http::HttpClient;
