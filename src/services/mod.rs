pub mod classifier;
pub mod mock_data;
pub mod orchestrator;
pub mod places_client;
pub mod quota;
pub mod site_inspector;

pub use classifier::*;
pub use mock_data::*;
pub use orchestrator::*;
pub use places_client::*;
pub use site_inspector::*;
