pub mod store;
pub mod validate;

pub use store::{EndpointConfigStore, EndpointValidation};
pub use validate::validate_base_url;
