//! Grouping of the daemon's container list by compose project.

use crate::container::{
    AggregateResult, ContainerView, DaemonClient, GroupView, ListRequest, RawContainer, Result,
    labels,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Read path of the dashboard: lists containers and groups them.
#[derive(Clone)]
pub struct Aggregator {
    daemon: Arc<dyn DaemonClient>,
}

impl Aggregator {
    /// Create an aggregator on top of a shared daemon client.
    pub fn new(daemon: Arc<dyn DaemonClient>) -> Self {
        Self { daemon }
    }

    /// List every container (running or stopped) and group it.
    ///
    /// # Errors
    ///
    /// Returns the daemon error if the list call fails; no partial result is
    /// produced.
    pub async fn list(&self, base_url: &str) -> Result<AggregateResult> {
        let raws = self.daemon.list_containers(ListRequest::all()).await?;
        debug!("Daemon reported {} containers", raws.len());

        let result = aggregate(&raws, base_url);
        debug!(
            "Aggregated into {} standalone containers and {} compose projects",
            result.standalone.len(),
            result.groups.len()
        );
        Ok(result)
    }
}

/// Partition raw containers into standalone containers and compose groups.
///
/// Standalone containers are sorted by name. Groups are emitted in the order
/// their project was first seen, and their config file and directory come
/// from that first container.
pub fn aggregate(raws: &[RawContainer], base_url: &str) -> AggregateResult {
    let mut standalone = Vec::new();
    let mut groups: Vec<GroupView> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for raw in raws {
        let view = ContainerView::project(raw, base_url);

        let Some(project) = labels::project_name(raw) else {
            standalone.push(view);
            continue;
        };

        match group_index.get(project) {
            Some(&index) => groups[index].members.push(view),
            None => {
                group_index.insert(project, groups.len());
                groups.push(GroupView {
                    name: project.to_string(),
                    config_file: labels::config_file(raw).unwrap_or_default().to_string(),
                    config_dir: labels::config_dir(raw).unwrap_or_default().to_string(),
                    members: vec![view],
                });
            }
        }
    }

    standalone.sort_by(|a, b| a.name.cmp(&b.name));

    AggregateResult { standalone, groups }
}
