//! Key/value tables of tagged params.

use std::collections::BTreeMap;

use hearth_core::{ByteReader, ByteWriter, Param};

use crate::envelope::{AssetKind, TypedAsset};
use crate::error::{AssetError, AssetResult};

/// Named params, e.g. tuning values shared across levels.
///
/// Layout: `u32` entry count, then `(key string, Param)` pairs in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataAsset {
    /// Entries by key
    pub entries: BTreeMap<String, Param>,
}

impl DataAsset {
    /// Looks up an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries.get(key)
    }

    /// Looks up an entry, reporting a missing key as `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `key` is absent.
    pub fn require(&self, key: &str) -> AssetResult<&Param> {
        self.entries
            .get(key)
            .ok_or_else(|| AssetError::NotFound(format!("data entry {key:?}")))
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl TypedAsset for DataAsset {
    const KIND: AssetKind = AssetKind::Data;
    const VERSION: u8 = 1;

    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
        let count = reader.read::<u32>()?;
        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let key = reader.read_string()?;
            let value = Param::read(reader)?;
            if entries.insert(key, value).is_some() {
                return Err(AssetError::InvalidBody("duplicate data key".into()));
            }
        }
        Ok(Self { entries })
    }

    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
        let count = u32::try_from(self.entries.len()).map_err(|_| {
            AssetError::InvalidArgument(format!("{} entries exceed u32", self.entries.len()))
        })?;
        writer.write(count)?;
        for (key, value) in &self.entries {
            writer.write_string(key)?;
            value.write(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerConfig;
    use crate::error::ErrorKind;
    use hearth_core::Color;

    #[test]
    fn test_roundtrip() {
        let mut data = DataAsset::default();
        data.insert("gravity", 9.8f32);
        data.insert("lives", 3i32);
        data.insert("title", "Deep");
        data.insert("fog", Color::rgb(0.1, 0.1, 0.2));
        data.insert("none", Param::None);

        let bytes = data.to_container_bytes(&ContainerConfig::default()).unwrap();
        let loaded = DataAsset::from_container_bytes(&bytes).unwrap();
        assert_eq!(loaded, data);
        assert_eq!(loaded.require("lives").unwrap().get(0i32), 3);
        assert_eq!(loaded.require("speed").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_duplicate_key_is_invalid_body() {
        let mut writer = ByteWriter::new();
        writer.write(1u8).unwrap();
        writer.write(DataAsset::VERSION).unwrap();
        writer.write(2u32).unwrap();
        for _ in 0..2 {
            writer.write_string("dup").unwrap();
            Param::Int(1).write(&mut writer).unwrap();
        }
        let bytes = crate::container::compress(
            writer.as_slice(),
            AssetKind::Data.tag(),
            &ContainerConfig::default(),
        )
        .unwrap();
        assert_eq!(
            DataAsset::from_container_bytes(&bytes).unwrap_err().kind(),
            ErrorKind::InvalidBody
        );
    }
}
