pub mod engine;
pub mod error;
pub mod loader;
pub mod overrides;
pub mod traits;

pub use engine::EngineConfig;
pub use overrides::SessionOverrides;
pub use traits::{ConfigValue, PropertySource};
