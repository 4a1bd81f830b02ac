pub mod service;

pub use service::RerankServiceProvider;
