use num::Num;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::ZeroSpVec;

/// Serialized as a map from stringified index to value, ascending by index.
/// e.g. `{"0": 1.2, "7": 0.4}`
/// Only stored (nonzero) elements appear; the logical length is not written.
impl<N> Serialize for ZeroSpVec<N>
where
    N: Num + Copy + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.nnz()))?;
        for (ind, val) in self.raw_iter() {
            map.serialize_entry(&ind.to_string(), &val)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_string_keyed_map_in_index_order() {
        let vec = ZeroSpVec::from_unsorted(12, vec![10, 2], vec![0.25f64, 1.5]);
        let json = serde_json::to_string(&vec).unwrap();
        assert_eq!(json, r#"{"2":1.5,"10":0.25}"#);
    }

    #[test]
    fn empty_vector_serializes_as_empty_map() {
        let vec: ZeroSpVec<f64> = ZeroSpVec::new(5);
        assert_eq!(serde_json::to_string(&vec).unwrap(), "{}");
    }
}
