use super::{AdmissionAttributes, GroupVersionKind, GroupVersionResource, Operation, UserInfo};
use serde::{Deserialize, Serialize};

/// Request metadata bound to the `request` variable
///
/// The object and old object are deliberately left out; expressions reach them through
/// `object` and `oldObject` instead.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRequest {
    pub kind: GroupVersionKind,
    pub resource: GroupVersionResource,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_resource: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_kind: Option<GroupVersionKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_resource: Option<GroupVersionResource>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request_sub_resource: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    pub operation: Operation,
    pub user_info: UserInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl AdmissionRequest {
    /// Build the request metadata for a set of admission attributes
    ///
    /// The requested kind and resource are the matched ones; no version conversion is applied.
    #[must_use]
    pub fn from_attributes(attributes: &AdmissionAttributes) -> Self {
        let user_info = attributes.user_info.clone().unwrap_or_default();

        Self {
            kind: attributes.kind.clone(),
            resource: attributes.resource.clone(),
            sub_resource: attributes.subresource.clone(),
            request_kind: Some(attributes.kind.clone()),
            request_resource: Some(attributes.resource.clone()),
            request_sub_resource: attributes.subresource.clone(),
            name: attributes.name.clone(),
            namespace: attributes.namespace.clone(),
            operation: attributes.operation,
            user_info,
            dry_run: Some(attributes.dry_run),
            options: attributes.operation_options.clone(),
        }
    }
}

impl From<&AdmissionAttributes> for AdmissionRequest {
    fn from(attributes: &AdmissionAttributes) -> Self {
        Self::from_attributes(attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn attributes() -> AdmissionAttributes {
        AdmissionAttributes {
            name: "web".to_string(),
            namespace: "prod".to_string(),
            operation: Operation::Update,
            kind: GroupVersionKind {
                group: "apps".to_string(),
                version: "v1".to_string(),
                kind: "Deployment".to_string(),
            },
            resource: GroupVersionResource {
                group: "apps".to_string(),
                version: "v1".to_string(),
                resource: "deployments".to_string(),
            },
            subresource: "scale".to_string(),
            user_info: Some(UserInfo {
                username: "alice".to_string(),
                uid: "1234".to_string(),
                groups: vec!["system:authenticated".to_string()],
                extra: BTreeMap::from([("scopes".to_string(), vec!["a".to_string(), "b".to_string()])]),
            }),
            dry_run: true,
            operation_options: Some(json!({"fieldManager": "kubectl"})),
        }
    }

    #[test]
    fn test_from_attributes() {
        let attributes = attributes();
        let request = AdmissionRequest::from_attributes(&attributes);

        assert_eq!(request.kind, attributes.kind);
        assert_eq!(request.request_kind.as_ref(), Some(&attributes.kind));
        assert_eq!(request.resource, attributes.resource);
        assert_eq!(request.request_resource.as_ref(), Some(&attributes.resource));
        assert_eq!(request.sub_resource, "scale");
        assert_eq!(request.request_sub_resource, "scale");
        assert_eq!(request.operation, Operation::Update);
        assert_eq!(request.user_info, attributes.user_info.clone().unwrap());
        assert_eq!(request.dry_run, Some(true));
        assert_eq!(request.options, Some(json!({"fieldManager": "kubectl"})));
    }

    #[test]
    fn test_missing_user_info_is_empty() {
        let attributes = AdmissionAttributes {
            user_info: None,
            ..attributes()
        };

        let request = AdmissionRequest::from(&attributes);
        assert_eq!(request.user_info, UserInfo::default());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(AdmissionRequest::from_attributes(&attributes())).unwrap();

        assert_eq!(json["kind"], json!({"group": "apps", "version": "v1", "kind": "Deployment"}));
        assert_eq!(json["requestResource"]["resource"], "deployments");
        assert_eq!(json["subResource"], "scale");
        assert_eq!(json["operation"], "UPDATE");
        assert_eq!(json["userInfo"]["username"], "alice");
        assert_eq!(json["userInfo"]["extra"]["scopes"], json!(["a", "b"]));
        assert_eq!(json["dryRun"], true);
        assert!(json.get("object").is_none());
        assert!(json.get("oldObject").is_none());
    }

    #[test]
    fn test_default_attributes_omit_empty_fields() {
        let json = serde_json::to_value(AdmissionRequest::from_attributes(&AdmissionAttributes::default())).unwrap();

        assert!(json.get("name").is_none());
        assert!(json.get("namespace").is_none());
        assert!(json.get("subResource").is_none());
        assert_eq!(json["operation"], "CREATE");
        assert_eq!(json["dryRun"], false);
    }
}
