//! Pod, container, and volume attribution for a single block device.
//!
//! Scans the mount paths of one device for kubelet volume-subpath mounts,
//! groups them per pod and container, and resolves the pod UIDs and PVC UIDs
//! found there into names through a [`KubeMetadataReader`]. Metadata lookup
//! failures degrade the result instead of failing it: a failed pod lookup
//! drops only that pod, a failed PVC lookup drops only that volume, and
//! everything else resolves normally.

mod error;
mod path;

pub use error::{Error, Result};

use std::collections::{HashMap, HashSet};

use crate::kube::{self, KubeMetadataReader};
use crate::mounts::MountTable;
use path::parse_volume_subpath;

/// Prefix distinguishing PVC-backed volume identifiers from EmptyDir ones.
const PVC_PREFIX: &str = "pvc-";

/// One pod resolved from a device's mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodInfo {
    /// Pod namespace; empty if unset in the manifest.
    pub namespace: String,
    /// Pod name. Always non-empty: pods whose name does not resolve are
    /// dropped from the result.
    pub name: String,
    /// Per-container volume attribution, keyed by container name.
    pub containers: HashMap<String, ContainerInfo>,
}

/// The volumes one container mounts from the device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Resolved PersistentVolumeClaim names.
    pub pvc_names: HashSet<String>,
    /// EmptyDir volume identifiers. These are named locally by the kubelet
    /// and need no metadata lookup.
    pub empty_dir_names: HashSet<String>,
}

/// Resolves which pods, containers, and volumes are attached to `device`.
///
/// `device` may be given bare (`vda1`) or `/dev/`-prefixed (`/dev/vda1`).
/// Mount paths that are not kubelet pod volume mounts are silently ignored.
/// Failed metadata lookups (and manifests resolving to an empty pod name)
/// are logged and skipped without affecting other entries. Pods and
/// containers come back in no particular order.
///
/// # Errors
///
/// Returns [`Error::DeviceNotFound`] if the table is empty or `device` has
/// no mounts in it. An empty `Ok` result is distinct from this error: it
/// means the device is mounted, but none of its mounts belong to a pod
/// volume.
pub async fn resolve_pod_volumes_for_device<R>(
    table: &MountTable,
    device: &str,
    reader: &R,
) -> Result<Vec<PodInfo>>
where
    R: KubeMetadataReader,
{
    let mounts = table
        .device_mounts(device)
        .ok_or_else(|| Error::DeviceNotFound(device.to_owned()))?;

    // pod UID -> container name -> volume identifiers. Set semantics: the
    // same volume mounted at several subpath indices counts once.
    let mut volumes_by_pod: HashMap<&str, HashMap<&str, HashSet<&str>>> = HashMap::new();
    for mount_path in &mounts.mount_paths {
        let Some(mount) = parse_volume_subpath(mount_path) else {
            continue;
        };
        volumes_by_pod
            .entry(mount.pod_uid)
            .or_default()
            .entry(mount.container)
            .or_default()
            .insert(mount.volume);
    }

    let mut pods = Vec::with_capacity(volumes_by_pod.len());
    for (&pod_uid, containers) in &volumes_by_pod {
        // An empty UID comes from an unparsable path and can never name a
        // pod.
        if pod_uid.is_empty() {
            continue;
        }
        if let Some(info) = resolve_pod(reader, pod_uid, containers).await {
            pods.push(info);
        }
    }

    Ok(pods)
}

/// Resolves one pod UID and its accumulated volumes into a [`PodInfo`].
///
/// Returns `None` if the pod manifest cannot be fetched, decoded, or has an
/// empty name; the condition is logged and the pod is omitted.
async fn resolve_pod<R>(
    reader: &R,
    pod_uid: &str,
    containers: &HashMap<&str, HashSet<&str>>,
) -> Option<PodInfo>
where
    R: KubeMetadataReader,
{
    let meta = match reader
        .pod_by_uid(pod_uid)
        .await
        .and_then(|json| kube::parse_manifest(&json))
    {
        Ok(manifest) => manifest.metadata,
        Err(err) => {
            log::warn!("skipping pod with uid `{pod_uid}`: {err}");
            return None;
        }
    };
    if meta.name.is_empty() {
        log::warn!("skipping pod with uid `{pod_uid}`: manifest has an empty `.metadata.name`");
        return None;
    }

    let mut info = PodInfo {
        namespace: meta.namespace,
        name: meta.name,
        containers: HashMap::with_capacity(containers.len()),
    };
    for (&container, volumes) in containers {
        let mut container_info = ContainerInfo::default();
        for &volume in volumes {
            match volume.strip_prefix(PVC_PREFIX) {
                Some(pvc_uid) => {
                    if let Some(name) = resolve_pvc_name(reader, pvc_uid).await {
                        container_info.pvc_names.insert(name);
                    }
                }
                None => {
                    container_info.empty_dir_names.insert(volume.to_owned());
                }
            }
        }
        info.containers.insert(container.to_owned(), container_info);
    }

    Some(info)
}

/// Resolves a PVC UID into the claim's name.
///
/// Returns `None` if the lookup fails, the manifest does not decode, or the
/// resolved name is empty; the condition is logged and only this volume is
/// omitted.
async fn resolve_pvc_name<R>(reader: &R, pvc_uid: &str) -> Option<String>
where
    R: KubeMetadataReader,
{
    let meta = match reader
        .persistent_volume_claim_by_uid(pvc_uid)
        .await
        .and_then(|json| kube::parse_manifest(&json))
    {
        Ok(manifest) => manifest.metadata,
        Err(err) => {
            log::warn!("skipping volume of pvc with uid `{pvc_uid}`: {err}");
            return None;
        }
    };
    if meta.name.is_empty() {
        log::warn!(
            "skipping volume of pvc with uid `{pvc_uid}`: manifest has an empty `.metadata.name`"
        );
        return None;
    }

    Some(meta.name)
}
