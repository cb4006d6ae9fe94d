//! Release model

use super::Keyed;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// An installed instance of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub name: String,
    pub namespace: String,
    pub revision: String,
    #[serde(with = "helm_date_format")]
    pub updated: DateTime<FixedOffset>,
    pub status: String,
    pub chart: String,
    #[serde(rename = "appVersion", alias = "app_version", default)]
    pub app_version: String,
}

/// Releases are identified by their name within a namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseKey {
    pub name: String,
    pub namespace: String,
}

impl ReleaseKey {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl Keyed for Release {
    type Key = ReleaseKey;

    fn key(&self) -> ReleaseKey {
        ReleaseKey::new(&self.name, &self.namespace)
    }
}

/// Timestamps as printed by `helm list -o json`
///
/// Helm uses Go's default layout (`2006-01-02 15:04:05.999999999 -0700 MST`).
/// The trailing zone abbreviation carries no information beyond the numeric
/// offset, so it is dropped before parsing. RFC 3339 is accepted as well and
/// is what gets written back out.
pub(crate) mod helm_date_format {
    use chrono::{DateTime, FixedOffset};
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT_FROM_HELM: &str = "%Y-%m-%d %H:%M:%S%.f %z";

    pub fn serialize<S>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub fn parse(s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        if let Ok(date) = DateTime::parse_from_rfc3339(s) {
            return Ok(date);
        }
        // date, time, offset; anything after that is the zone name
        let without_zone: Vec<&str> = s.split_whitespace().take(3).collect();
        DateTime::parse_from_str(&without_zone.join(" "), FORMAT_FROM_HELM)
    }
}
