//! Kubernetes object metadata lookup interface.
//!
//! The crate does not talk to the API server itself. The resolver depends on
//! an injected [`KubeMetadataReader`], typically backed by a cached or
//! watch-based client in the embedding collector. Manifests cross this
//! boundary as JSON strings and are decoded into the minimal
//! [`ObjectManifest`] subset; everything but `.metadata.name` and
//! `.metadata.namespace` is ignored.

mod error;

pub use error::{Error, Result};

use serde::Deserialize;

/// Capability to fetch Kubernetes object manifests by UID.
///
/// Lookups are independent of each other; the resolver treats every failed
/// lookup as affecting only the entity it was issued for. Cancellation is
/// the usual future cancellation: dropping the returned future abandons the
/// lookup.
pub trait KubeMetadataReader {
    /// Fetches the JSON manifest of the pod with the given UID.
    fn pod_by_uid(&self, uid: &str) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Fetches the JSON manifest of the PersistentVolumeClaim with the given
    /// UID.
    fn persistent_volume_claim_by_uid(
        &self,
        uid: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// The subset of a Kubernetes object manifest consumed by this crate.
#[derive(Debug, Default, Deserialize)]
pub struct ObjectManifest {
    #[serde(default)]
    pub metadata: ObjectMeta,
}

/// `.metadata` fields of interest.
///
/// Absent fields decode to empty strings; the resolver's degrade rules are
/// written against that convention (an empty name reads as "unresolvable").
#[derive(Debug, Default, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

/// Decodes a JSON object manifest into the [`ObjectManifest`] subset.
///
/// # Errors
///
/// Returns [`Error::Decode`] if `json` is not a valid JSON object of the
/// expected shape.
pub fn parse_manifest(json: &str) -> Result<ObjectManifest> {
    Ok(serde_json::from_str(json)?)
}
