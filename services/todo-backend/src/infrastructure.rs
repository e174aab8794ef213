// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod object_accessor;
pub mod object_store;
pub mod s3_object_store;
pub mod service_config;

// Re-exports
pub use config::{S3Config, S3ConfigError};
pub use logging::init_logging;
pub use object_accessor::{AccessorError, ObjectAccessor};
pub use object_store::{ObjectStore, StoreError};
pub use s3_object_store::S3ObjectStore;
pub use service_config::{cors_allow_origin_from_env, ServiceConfig, ServiceConfigError};
