use ::serde::{
    ser::{SerializeMap, SerializeStruct},
    Serialize, Serializer,
};

use crate::resolve::{ResolvedEntry, ResolvedFile};

impl Serialize for ResolvedEntry<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("key", &self.key.text())?;
        map.serialize_entry("hash", &self.hash)?;
        map.serialize_entry("value", &String::from_utf8_lossy(self.value))?;
        map.end()
    }
}

struct Entries<'a>(&'a ResolvedFile<'a>);

impl Serialize for Entries<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.0.entries())
    }
}

impl Serialize for ResolvedFile<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let file = self.file();

        let mut state = serializer.serialize_struct("RstFile", 4)?;
        state.serialize_field("version", &u8::from(file.version()))?;
        state.serialize_field("hash_bits", &file.hash_bits().bits())?;
        state.serialize_field(
            "font_config",
            &file.font_config().map(String::from_utf8_lossy),
        )?;
        state.serialize_field("entries", &Entries(self))?;
        state.end()
    }
}
