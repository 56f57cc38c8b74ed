#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no mounts found for device `{0}`")]
    DeviceNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
