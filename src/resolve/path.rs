//! Classification of kubelet volume-subpath mount paths.
//!
//! The kubelet bind-mounts each container `subPath` volume under a fixed
//! per-pod directory:
//!
//! ```text
//! /var/lib/kubelet/pods/<pod-uid>/volume-subpaths/<volume>/<container>/<n>
//! ```
//!
//! A PVC-backed volume carries a `pvc-<uid>` identifier, for example
//! `/var/lib/kubelet/pods/82e31898-…/volume-subpaths/pvc-3431657b-…/gateserver/2`;
//! any other identifier names an EmptyDir volume local to the pod. The
//! segment positions below match the kubelet layout observed in the wild and
//! are deliberately not forward-compatible with layout changes.

/// Marker segment identifying a per-pod volume mount.
const VOLUME_SUBPATHS_MARKER: &str = "volume-subpaths";

/// Structural prefix (path segments 1-4) anchoring a kubelet-managed path.
const KUBELET_PODS_PREFIX: [&str; 4] = ["var", "lib", "kubelet", "pods"];

/// Minimum segment count needed to address pod UID, volume, and container.
const MIN_SEGMENTS: usize = 9;

/// One classified volume-subpath mount, borrowing from the mount path.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct VolumeMount<'a> {
    pub pod_uid: &'a str,
    pub volume: &'a str,
    pub container: &'a str,
}

/// Classifies a mount path as a kubelet volume-subpath mount.
///
/// Returns `None` for any path not shaped like one. Most mount table entries
/// legitimately are not pod volume mounts, so a `None` is an expected
/// outcome rather than an error.
pub(super) fn parse_volume_subpath(path: &str) -> Option<VolumeMount<'_>> {
    if !path.contains(VOLUME_SUBPATHS_MARKER) {
        return None;
    }

    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < MIN_SEGMENTS || segments[1..5] != KUBELET_PODS_PREFIX {
        return None;
    }

    Some(VolumeMount {
        pod_uid: segments[5],
        volume: segments[7],
        container: segments[8],
    })
}
