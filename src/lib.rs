//! Maps host block devices to the Kubernetes pods, containers, and volumes
//! currently mounted from them.
//!
//! This crate is the attribution core of a per-device I/O telemetry
//! collector: given a device such as `vda1`, it answers which workloads are
//! using that device right now. It does so in two steps, consumed in
//! sequence by the embedding collector:
//!
//! 1. [`mounts::read_mount_table`] parses the kernel mount table
//!    (`/proc/mounts`) into a [`mounts::MountTable`], an index from device
//!    name to the ordered list of paths where that device is mounted.
//! 2. [`resolve::resolve_pod_volumes_for_device`] scans the mount paths of
//!    one device for kubelet volume-subpath mounts and resolves the pod and
//!    PersistentVolumeClaim UIDs found there into names through an injected
//!    [`kube::KubeMetadataReader`].
//!
//! The crate never talks to the Kubernetes API server itself and keeps no
//! state between calls; every invocation recomputes from the current mount
//! table snapshot. Scheduling, metric export, and the concrete API client
//! are the embedding collector's concern.
pub mod kube;
pub mod mounts;
pub mod resolve;
