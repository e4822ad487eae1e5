//! Optional persisted form of `PrimitiveHashMap` (feature `serde`).

use crate::config::{validate_load_factor, DEFAULT_INITIAL_CAPACITY, MAXIMUM_CAPACITY};
use crate::key::PrimitiveKey;
use crate::primitive_hash_map::PrimitiveHashMap;

use serde::de::{Deserialize, Deserializer, Error};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Shape of the persisted form on the way back in.
#[derive(serde::Deserialize)]
#[serde(rename = "PrimitiveHashMap")]
struct Persisted<K, V> {
    #[allow(dead_code)]
    capacity: usize,
    load_factor: f32,
    len: usize,
    entries: Vec<(K, V)>,
}

struct Entries<'a, K, V>(&'a PrimitiveHashMap<K, V>);

impl<K, V> Serialize for Entries<'_, K, V>
where
    K: PrimitiveKey + Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<K, V> Serialize for PrimitiveHashMap<K, V>
where
    K: PrimitiveKey + Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PrimitiveHashMap", 4)?;
        state.serialize_field("capacity", &self.capacity())?;
        state.serialize_field("load_factor", &self.load_factor())?;
        state.serialize_field("len", &self.len())?;
        state.serialize_field("entries", &Entries(self))?;
        state.end()
    }
}

impl<'de, K, V> Deserialize<'de> for PrimitiveHashMap<K, V>
where
    K: PrimitiveKey + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let persisted = Persisted::<K, V>::deserialize(deserializer)?;
        validate_load_factor(persisted.load_factor).map_err(D::Error::custom)?;
        if persisted.len != persisted.entries.len() {
            return Err(D::Error::custom(format!(
                "declared len {} but found {} entries",
                persisted.len,
                persisted.entries.len()
            )));
        }

        // The stored capacity and len are informational; size for the
        // entries actually present.
        let fc = persisted.entries.len() as f64 / persisted.load_factor as f64 + 1.0;
        let capacity = if fc < DEFAULT_INITIAL_CAPACITY as f64 {
            DEFAULT_INITIAL_CAPACITY
        } else if fc >= MAXIMUM_CAPACITY as f64 {
            MAXIMUM_CAPACITY
        } else {
            fc as usize
        };
        let mut map = PrimitiveHashMap::with_capacity_and_load_factor(capacity, persisted.load_factor)
            .map_err(D::Error::custom)?;
        for (key, value) in persisted.entries {
            map.insert(key, value);
        }
        if map.len() != persisted.len {
            return Err(D::Error::custom(format!(
                "declared len {} but found {} distinct entries",
                persisted.len,
                map.len()
            )));
        }
        Ok(map)
    }
}
