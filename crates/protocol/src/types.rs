use serde::{Deserialize, Serialize};

/// A request to share a built slug.
///
/// `local_slug_path` is the artifact produced by the build pipeline;
/// `slug_path` is where the shared copy should end up (a local path, or
/// the remote location when FTP info is present).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlugShareRequest {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub tenant_name: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub service_alias: String,
    #[serde(default)]
    pub slug_path: String,
    #[serde(default)]
    pub local_slug_path: String,
    #[serde(default)]
    pub share_id: String,
    pub share_info: ShareInfo,
}

/// Metadata describing who shares what, and where to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareInfo {
    #[serde(default)]
    pub service_key: String,
    #[serde(default)]
    pub app_version: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub share_user: String,
    #[serde(default)]
    pub share_scope: String,
    #[serde(default)]
    pub slug_info: SlugInfo,
}

/// Remote destination details. Empty host or port means local sharing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlugInfo {
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub ftp_host: String,
    #[serde(default)]
    pub ftp_port: String,
    #[serde(default)]
    pub ftp_user: String,
    #[serde(default)]
    pub ftp_password: String,
}

impl SlugInfo {
    /// Returns `true` when both FTP host and port are set.
    pub fn has_ftp_endpoint(&self) -> bool {
        !self.ftp_host.is_empty() && !self.ftp_port.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_request() {
        let json = r#"{
            "namespace": "ns",
            "tenant_name": "tenant",
            "service_id": "sid",
            "service_alias": "alias",
            "slug_path": "/share/app.tgz",
            "local_slug_path": "/data/slug/app.tgz",
            "share_id": "share-1",
            "share_info": {
                "service_key": "key",
                "app_version": "1.0",
                "event_id": "evt-1",
                "share_user": "admin",
                "share_scope": "team",
                "slug_info": {
                    "namespace": "market",
                    "ftp_host": "ftp.example.com",
                    "ftp_port": "21",
                    "ftp_user": "u",
                    "ftp_password": "p"
                }
            }
        }"#;
        let req: SlugShareRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.share_id, "share-1");
        assert_eq!(req.local_slug_path, "/data/slug/app.tgz");
        assert_eq!(req.share_info.event_id, "evt-1");
        assert_eq!(req.share_info.slug_info.ftp_port, "21");
        assert!(req.share_info.slug_info.has_ftp_endpoint());
    }

    #[test]
    fn slug_info_is_optional() {
        let json = r#"{"share_id":"s","share_info":{"event_id":"e"}}"#;
        let req: SlugShareRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.share_info.slug_info, SlugInfo::default());
        assert!(!req.share_info.slug_info.has_ftp_endpoint());
    }

    #[test]
    fn share_info_is_required() {
        let json = r#"{"share_id":"s"}"#;
        assert!(serde_json::from_str::<SlugShareRequest>(json).is_err());
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let json = r#"{"share_id":42,"share_info":{}}"#;
        assert!(serde_json::from_str::<SlugShareRequest>(json).is_err());
    }

    #[test]
    fn ftp_endpoint_requires_host_and_port() {
        let mut info = SlugInfo {
            ftp_host: "ftp.example.com".into(),
            ..Default::default()
        };
        assert!(!info.has_ftp_endpoint());

        info.ftp_host.clear();
        info.ftp_port = "21".into();
        assert!(!info.has_ftp_endpoint());

        info.ftp_host = "ftp.example.com".into();
        assert!(info.has_ftp_endpoint());
    }
}
