use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// The kind of change an admission request asks for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Operation {
    #[default]
    Create,
    Update,
    Delete,
    Connect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct GroupVersionResource {
    pub group: String,
    pub version: String,
    pub resource: String,
}

/// The identity of the caller making the request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Vec<String>>,
}

/// Everything known about an admission request apart from the objects themselves
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AdmissionAttributes {
    pub name: String,
    pub namespace: String,
    pub operation: Operation,
    pub kind: GroupVersionKind,
    pub resource: GroupVersionResource,
    pub subresource: String,
    pub user_info: Option<UserInfo>,
    pub dry_run: bool,
    pub operation_options: Option<serde_json::Value>,
}

/// The versions of the object under admission that expressions get to see
///
/// Either object may be absent: there is no old object on create, and no new object on delete.
#[derive(Debug, Clone, Default)]
pub struct VersionedAttributes<O> {
    pub attributes: AdmissionAttributes,
    pub object: Option<O>,
    pub old_object: Option<O>,
}

impl<O> VersionedAttributes<O> {
    #[must_use]
    pub const fn new(attributes: AdmissionAttributes, object: Option<O>, old_object: Option<O>) -> Self {
        Self {
            attributes,
            object,
            old_object,
        }
    }
}
