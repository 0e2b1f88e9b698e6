use serde::{
    de,
    Deserialize,
    Deserializer,
    Serialize,
};
use std::fmt;

/// Raw `collStats` command reply, reduced to the fields the report uses.
///
/// Servers encode these numbers as int32, int64 or double depending on version
/// and magnitude, so every numeric field is decoded leniently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollStatsRecord {
    pub ns: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub size: u64,
    #[serde(rename = "avgObjSize", default, deserialize_with = "lenient_option_u64")]
    pub avg_obj_size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_option_u64")]
    pub nindexes: Option<u64>,
    #[serde(rename = "totalIndexSize", default, deserialize_with = "lenient_option_u64")]
    pub total_index_size: Option<u64>,
}

/// Size and index statistics of a single collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStat {
    pub database: String,
    /// Full `database.collection` name
    pub namespace: String,
    pub document_count: u64,
    pub size_bytes: u64,
    pub avg_object_size_bytes: u64,
    pub index_count: u64,
    pub total_index_size_bytes: u64,
}

impl CollectionStat {
    pub fn from_record(database: impl Into<String>, record: CollStatsRecord) -> Self {
        Self {
            database: database.into(),
            namespace: record.ns,
            document_count: record.count,
            size_bytes: record.size,
            avg_object_size_bytes: record.avg_obj_size.unwrap_or(0),
            index_count: record.nindexes.unwrap_or(0),
            total_index_size_bytes: record.total_index_size.unwrap_or(0),
        }
    }
}

struct LenientU64;

impl<'de> de::Visitor<'de> for LenientU64 {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative integer or double")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
        if value.is_finite() && value >= 0.0 {
            Ok(value.round() as u64)
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(LenientU64)
}

fn lenient_option_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "lenient_u64")] u64);

    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(value)| value))
}
