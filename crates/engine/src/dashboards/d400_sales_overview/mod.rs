pub mod service;

pub use service::build_sales_overview;
