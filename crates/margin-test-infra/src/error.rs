use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestInfraError {
    /// Docker is missing, the image failed to pull or the container never got ready.
    #[error("redis container failed: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    #[error("could not reach the redis container: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type Result<T, E = TestInfraError> = std::result::Result<T, E>;
