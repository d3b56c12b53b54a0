pub mod unit;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, and outputs its value.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Calculate the length of a map (the number of tiles it contains) based on
/// its radius. Radius 0 means 1 tile, 1 is 7 tiles, 2 is 19, etc.
pub fn map_len(radius: u16) -> usize {
    // We'll always have 3r^2+3r+1 tiles (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r tiles for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

// Serialize a HexIndexMap as a list instead of a map. Hexes shouldn't be used
// as serialized map keys, since JSON and other formats don't support complex
// keys.
pub mod serde_hex_map_to_vec {
    use crate::{hex::HexIndexMap, HasHexPosition};
    use serde::{
        ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer,
    };

    /// Serialize a hex map as a list
    pub fn serialize<T, S>(
        map: &HexIndexMap<T>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(map.len()))?;
        for element in map.values() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }

    /// Deserialize a list of values into a map. The deserialized type must
    /// implement [HasHexPosition] so that we can derive a key for each
    /// element. List order becomes map order. Duplicate positions collapse,
    /// later elements winning, so callers should check the length.
    pub fn deserialize<'de, T, D>(
        deserializer: D,
    ) -> Result<HexIndexMap<T>, D::Error>
    where
        T: Deserialize<'de> + HasHexPosition,
        D: Deserializer<'de>,
    {
        let vec: Vec<T> = Vec::deserialize(deserializer)?;
        Ok(vec
            .into_iter()
            .map(|element| (element.position(), element))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_len() {
        assert_eq!(map_len(0), 1);
        assert_eq!(map_len(1), 7);
        assert_eq!(map_len(2), 19);
        assert_eq!(map_len(3), 37);
        assert_eq!(map_len(5), 91);
    }
}
