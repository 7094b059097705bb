use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Literal;

pub const KAFKA_TOPIC_NAME_PROPERTY: &str = "KAFKA_TOPIC";
pub const PARTITIONS_PROPERTY: &str = "PARTITIONS";
pub const REPLICAS_PROPERTY: &str = "REPLICAS";
pub const VALUE_FORMAT_PROPERTY: &str = "VALUE_FORMAT";
pub const KEY_PROPERTY: &str = "KEY";

/// The `WITH (...)` clause of a statement.
///
/// Keys are case-insensitive and stored upper case. The clause renders the
/// topic keys first (`REPLICAS`, `PARTITIONS`, `KAFKA_TOPIC`) followed by every
/// other key in lexical order, so equal clauses always print identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "BTreeMap<String, Literal>")
)]
pub struct Properties(BTreeMap<String, Literal>);

fn canonical_rank(key: &str) -> u8 {
    match key {
        REPLICAS_PROPERTY => 0,
        PARTITIONS_PROPERTY => 1,
        KAFKA_TOPIC_NAME_PROPERTY => 2,
        _ => 3,
    }
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.0.get(&key.to_uppercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Literal>) -> Option<Literal> {
        self.0.insert(key.to_uppercase(), value.into())
    }

    /// Copy of this clause with `key` set to `value`.
    pub fn with(&self, key: &str, value: impl Into<Literal>) -> Self {
        let mut copy = self.clone();
        copy.insert(key, value);
        copy
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in canonical print order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_by(|(a, _), (b, _)| canonical_rank(a).cmp(&canonical_rank(b)).then(a.cmp(b)));
        entries.into_iter()
    }
}

impl From<BTreeMap<String, Literal>> for Properties {
    fn from(map: BTreeMap<String, Literal>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: AsRef<str>, V: Into<Literal>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k.as_ref(), v);
        }
        props
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut delim = "";
        for (key, value) in self.iter() {
            write!(f, "{delim}{key} = {value}")?;
            delim = ", ";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let props = Properties::new().with("kafka_topic", "orders");
        assert_eq!(props.get(KAFKA_TOPIC_NAME_PROPERTY), Some(&Literal::string("orders")));
        assert!(props.contains("Kafka_Topic"));
    }

    #[test]
    fn topic_keys_print_first() {
        let props: Properties = [
            ("value_format", Literal::string("JSON")),
            ("kafka_topic", Literal::string("t")),
            ("partitions", Literal::Integer(2)),
            ("replicas", Literal::Integer(3)),
            ("key", Literal::string("ID")),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            props.to_string(),
            "REPLICAS = 3, PARTITIONS = 2, KAFKA_TOPIC = 't', KEY = 'ID', VALUE_FORMAT = 'JSON'"
        );
    }

    #[test]
    fn with_leaves_original_untouched() {
        let original = Properties::new().with(PARTITIONS_PROPERTY, 1i64);
        let updated = original.with(PARTITIONS_PROPERTY, 4i64);
        assert_eq!(original.get(PARTITIONS_PROPERTY), Some(&Literal::Integer(1)));
        assert_eq!(updated.get(PARTITIONS_PROPERTY), Some(&Literal::Integer(4)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn clause_with_mixed_scalars_loads_from_yaml() {
        let props: Properties =
            serde_yaml::from_str("kafka_topic: orders\npartitions: 3\nratio: 0.5\n").unwrap();
        assert_eq!(props.get("RATIO"), Some(&Literal::Decimal("0.5".into())));
        assert_eq!(
            props.to_string(),
            "PARTITIONS = 3, KAFKA_TOPIC = 'orders', RATIO = 0.5"
        );
    }
}
