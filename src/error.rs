use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid radius: {0} (must be finite and non-negative)")]
    InvalidRadius(f64),

    #[error("invalid mass: {0} (must be finite and non-negative)")]
    InvalidMass(f64),

    #[error("invalid gravitational parameter: {0} (must be finite and non-negative)")]
    InvalidGm(f64),

    #[error("entity not found in scene")]
    UnknownEntity,

    #[error("scene node not found")]
    UnknownNode,

    #[error("entity is not a follow camera")]
    NotACamera,

    #[error("no active camera")]
    NoActiveCamera,

    #[error("attaching would create a cycle in the scene graph")]
    HierarchyCycle,

    #[error("bad config value for {key}: {value:?}")]
    Config { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
