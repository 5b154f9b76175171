pub mod memory;
pub mod postgres;
pub mod redis;
pub mod repositories;

pub use memory::InMemoryStore;
pub use postgres::{create_pool, run_migrations, PgStore};
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use self::redis::CacheWriterHandle;
pub use repositories::{CommentRepository, WatchedEpisodeRepository};
