//! Admission request inputs
//!
//! An admission request carries the object being admitted, its prior version, and
//! metadata describing the request itself. [`AdmissionAttributes`] holds the metadata as
//! it arrives, [`VersionedAttributes`] pairs it with the object versions, and
//! [`AdmissionRequest`] is the record exposed to expressions as the `request` variable.

mod attributes;
mod request;

pub use attributes::{AdmissionAttributes, GroupVersionKind, GroupVersionResource, Operation, UserInfo, VersionedAttributes};
pub use request::AdmissionRequest;
