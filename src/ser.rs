use crate::{ChainMap, Entry};
use serde::ser::{Serialize, SerializeMap, SerializeTuple, Serializer};

/// Serializes as a map, one entry per stored key, in iteration order.
impl<K: Serialize, V: Serialize, S> Serialize for ChainMap<K, V, S> {
    fn serialize<T: Serializer>(&self, serializer: T) -> Result<T::Ok, T::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Serializes as a `(key, value)` tuple.
impl<K: Serialize, V: Serialize> Serialize for Entry<K, V> {
    fn serialize<T: Serializer>(&self, serializer: T) -> Result<T::Ok, T::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.key())?;
        tuple.serialize_element(self.value())?;
        tuple.end()
    }
}
