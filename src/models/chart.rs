//! Chart models: catalog entries, chart metadata and install requests

use super::Keyed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One hit of a catalog search (`helm search repo`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartListItem {
    pub name: String,
    pub version: String,
    #[serde(rename = "appVersion", alias = "app_version", default)]
    pub app_version: String,
    #[serde(default)]
    pub description: String,
}

impl Keyed for ChartListItem {
    type Key = String;

    fn key(&self) -> String {
        self.name.clone()
    }
}

/// Everything the detail view shows for a single chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDetails {
    pub info: ChartInfo,
    /// README as markdown
    pub readme: String,
    /// Default values as YAML text
    pub values: String,
}

/// `Chart.yaml` metadata; most fields are optional in the wild
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInfo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "type",
        alias = "chartType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub chart_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ChartDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintainers: Vec<ChartMaintainer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDependency {
    pub name: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMaintainer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Request to install `chart_name` as release `name` into `namespace`
///
/// Built on the client at submit time and sent once; never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallChartRequest {
    pub name: String,
    pub chart_name: String,
    pub namespace: String,
    /// Values YAML; `None` installs with the chart defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<String>,
}
