// Configuration persistence and environment loading for minio-artifacts

pub mod env;
pub mod error;
pub mod loader;
pub mod store;

pub use env::{ENV_PREFIX, EnvLoader, load_dotenv};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use store::{ConfigStore, FileConfigStore, MemoryConfigStore};
