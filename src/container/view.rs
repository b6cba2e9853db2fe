//! Public views of containers and compose projects.
//!
//! Views are rebuilt from the daemon on every request and serialized
//! straight to the HTTP response.

use crate::container::RawContainer;
use serde::Serialize;

/// A container as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerView {
    /// Full container ID
    pub id: String,
    /// Primary name without the runtime's leading `/`
    pub name: String,
    /// Lifecycle state as reported by the daemon
    pub status: String,
    /// One URL per published port, in daemon order
    pub ports: Vec<String>,
}

impl ContainerView {
    /// Project a raw container, building port URLs on top of `base_url`.
    pub fn project(raw: &RawContainer, base_url: &str) -> Self {
        let ports = raw
            .ports
            .iter()
            .filter_map(|mapping| mapping.public_port.filter(|port| *port != 0))
            .map(|port| format!("{}:{}", base_url, port))
            .collect();

        Self {
            id: raw.id.clone(),
            name: strip_leading_char(&raw.names.join(" ")),
            status: raw.state.clone(),
            ports,
        }
    }
}

// Runtime names look like `/web`; an empty name list yields an empty name.
fn strip_leading_char(joined: &str) -> String {
    let mut chars = joined.chars();
    chars.next();
    chars.as_str().to_string()
}

/// A compose project and the containers that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    /// Compose project name
    pub name: String,
    /// Compose file(s), taken from the first container seen
    pub config_file: String,
    /// Project working directory, taken from the first container seen
    pub config_dir: String,
    /// Member containers in daemon order
    #[serde(rename = "containers")]
    pub members: Vec<ContainerView>,
}

/// The grouped dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    /// Containers outside any compose project, sorted by name
    #[serde(rename = "containers")]
    pub standalone: Vec<ContainerView>,
    /// Compose projects in the order they were first seen
    #[serde(rename = "services")]
    pub groups: Vec<GroupView>,
}

impl AggregateResult {
    /// Total number of containers across standalone and grouped views.
    pub fn container_count(&self) -> usize {
        self.standalone.len()
            + self
                .groups
                .iter()
                .map(|group| group.members.len())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::PortMapping;

    fn raw(names: &[&str], ports: &[Option<u16>]) -> RawContainer {
        RawContainer {
            id: "4f1c2a9e".to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
            state: "running".to_string(),
            ports: ports
                .iter()
                .map(|public_port| PortMapping {
                    private_port: 80,
                    public_port: *public_port,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_strips_leading_slash() {
        let view = ContainerView::project(&raw(&["/web"], &[]), "http://h");
        assert_eq!(view.name, "web");
        assert_eq!(view.id, "4f1c2a9e");
        assert_eq!(view.status, "running");
    }

    #[test]
    fn test_multiple_names_joined_with_space() {
        let view = ContainerView::project(&raw(&["/web", "/frontend"], &[]), "http://h");
        assert_eq!(view.name, "web /frontend");
    }

    #[test]
    fn test_empty_name_list_yields_empty_name() {
        let view = ContainerView::project(&raw(&[], &[]), "http://h");
        assert_eq!(view.name, "");
    }

    #[test]
    fn test_ports_skip_unpublished_and_keep_order() {
        let view = ContainerView::project(
            &raw(&["/web"], &[Some(0), Some(8080), None, Some(0), Some(443)]),
            "http://h",
        );
        assert_eq!(view.ports, vec!["http://h:8080", "http://h:443"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let group = GroupView {
            name: "shop".to_string(),
            config_file: "/srv/shop/docker-compose.yml".to_string(),
            config_dir: "/srv/shop".to_string(),
            members: vec![ContainerView::project(&raw(&["/shop-db-1"], &[]), "http://h")],
        };
        let result = AggregateResult {
            standalone: Vec::new(),
            groups: vec![group],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["containers"], serde_json::json!([]));
        assert_eq!(json["services"][0]["name"], "shop");
        assert_eq!(json["services"][0]["configDir"], "/srv/shop");
        assert_eq!(json["services"][0]["containers"][0]["name"], "shop-db-1");
        assert_eq!(json["services"][0]["containers"][0]["ports"], serde_json::json!([]));
    }
}
