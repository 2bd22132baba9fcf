mod error;
pub mod model;

pub use error::*;

/// label set by the OpenFaaS Cloud pipeline on every function it deploys for a git owner
pub const OWNER_LABEL: &str = "com.openfaas.cloud.git-owner";

///deserialize an explicit json `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    let opt: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
