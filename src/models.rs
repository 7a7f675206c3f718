use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::charts::ChartConfig;

/// Label to count mapping as embedded by the server. Keeps the source key order,
/// which drives the x axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatAggregate {
    entries: Vec<(String, u64)>,
}

impl StatAggregate {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, count)| *count).collect()
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(label, count)| (label.as_str(), *count))
    }

    fn insert(&mut self, label: String, count: u64) {
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some(entry) => entry.1 = count,
            None => self.entries.push((label, count)),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for StatAggregate {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut aggregate = StatAggregate::default();
        for (label, count) in iter {
            aggregate.insert(label.into(), count);
        }
        aggregate
    }
}

impl Serialize for StatAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatAggregate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AggregateVisitor;

        impl<'de> Visitor<'de> for AggregateVisitor {
            type Value = StatAggregate;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of label to non-negative count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut aggregate = StatAggregate::default();
                while let Some((label, count)) = access.next_entry::<String, u64>()? {
                    aggregate.insert(label, count);
                }
                Ok(aggregate)
            }
        }

        deserializer.deserialize_map(AggregateVisitor)
    }
}

/// `window._adminStats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings_by_day: Option<StatAggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings_by_category: Option<StatAggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings_over_time: Option<StatAggregate>,
}

/// `window._trainerStats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookings_per_class: Option<StatAggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_attendance: Option<StatAggregate>,
}

/// `window._statsData`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_breakdown: Option<StatAggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_trend: Option<StatAggregate>,
}

/// The global objects a rendered page may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedData {
    #[serde(rename = "_adminStats", default, skip_serializing_if = "Option::is_none")]
    pub admin_stats: Option<AdminStats>,
    #[serde(rename = "_trainerStats", default, skip_serializing_if = "Option::is_none")]
    pub trainer_stats: Option<TrainerStats>,
    #[serde(rename = "_statsData", default, skip_serializing_if = "Option::is_none")]
    pub stats_data: Option<GeneralStats>,
}

impl EmbeddedData {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMount {
    pub mount_id: String,
    pub config: ChartConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentResponse {
    pub key: String,
    pub html: String,
}
