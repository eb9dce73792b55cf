//! Placed actor instances and the signal wires between them.

use std::collections::BTreeMap;

use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{CursorError, CursorResult};
use crate::param::Param;

/// A directed wire from one of this actor's outputs to another actor's input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IOConnection {
    /// Name of the receiving actor
    pub target_name: String,
    /// Output signal fired by the owning actor
    pub source_output: String,
    /// Input signal on the target
    pub target_input: String,
    /// Literal payload delivered with the signal (`Param::None` for none)
    pub param: Param,
}

impl IOConnection {
    /// Decodes a connection.
    ///
    /// # Errors
    ///
    /// Propagates any cursor error.
    pub fn read(reader: &mut ByteReader<'_>) -> CursorResult<Self> {
        Ok(Self {
            target_name: reader.read_string()?,
            source_output: reader.read_string()?,
            target_input: reader.read_string()?,
            param: Param::read(reader)?,
        })
    }

    /// Encodes a connection.
    ///
    /// # Errors
    ///
    /// Propagates any cursor error.
    pub fn write(&self, writer: &mut ByteWriter) -> CursorResult<()> {
        writer.write_string(&self.target_name)?;
        writer.write_string(&self.source_output)?;
        writer.write_string(&self.target_input)?;
        self.param.write(writer)
    }
}

/// A concrete actor placed in a level.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Actor {
    /// Class name this actor was created from
    pub type_name: String,
    /// Unique name within the level
    pub name: String,
    /// Concrete parameter values by name
    pub params: BTreeMap<String, Param>,
    /// Outgoing signal wires
    pub connections: Vec<IOConnection>,
}

impl Actor {
    /// Creates an actor with no params or connections.
    #[must_use]
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Looks up a parameter value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }

    /// Sets a parameter value, returning the previous one.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<Param>) -> Option<Param> {
        self.params.insert(name.into(), value.into())
    }

    /// Decodes an actor.
    ///
    /// # Errors
    ///
    /// Propagates any cursor error; a param name listed twice is
    /// `DuplicateKey`.
    pub fn read(reader: &mut ByteReader<'_>) -> CursorResult<Self> {
        let type_name = reader.read_string()?;
        let name = reader.read_string()?;

        let param_count = reader.read_usize()?;
        let mut params = BTreeMap::new();
        for _ in 0..param_count {
            let key = reader.read_string()?;
            let value = Param::read(reader)?;
            if params.contains_key(&key) {
                return Err(CursorError::DuplicateKey(key));
            }
            params.insert(key, value);
        }

        let connection_count = reader.read_usize()?;
        let mut connections = Vec::with_capacity(connection_count.min(reader.remaining()));
        for _ in 0..connection_count {
            connections.push(IOConnection::read(reader)?);
        }

        Ok(Self {
            type_name,
            name,
            params,
            connections,
        })
    }

    /// Encodes an actor in the order [`Actor::read`] expects.
    ///
    /// # Errors
    ///
    /// Propagates any cursor error.
    pub fn write(&self, writer: &mut ByteWriter) -> CursorResult<()> {
        writer.write_string(&self.type_name)?;
        writer.write_string(&self.name)?;

        writer.write_usize(self.params.len())?;
        for (key, value) in &self.params {
            writer.write_string(key)?;
            value.write(writer)?;
        }

        writer.write_usize(self.connections.len())?;
        for connection in &self.connections {
            connection.write(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;

    #[test]
    fn test_actor_roundtrip() {
        let mut actor = Actor::new("door", "front_door");
        actor.set_param("speed", 2.5f32);
        actor.set_param("locked", true);
        actor.set_param("tint", Color::rgb(1.0, 0.5, 0.0));
        actor.connections.push(IOConnection {
            target_name: "alarm".into(),
            source_output: "on_open".into(),
            target_input: "trigger".into(),
            param: Param::Int(3),
        });

        let mut writer = ByteWriter::new();
        actor.write(&mut writer).unwrap();
        let bytes = writer.into_inner();

        let mut reader = ByteReader::new(&bytes);
        let decoded = Actor::read(&mut reader).unwrap();
        assert_eq!(decoded, actor);
        assert!(reader.is_at_end());
    }

    #[test]
    fn test_set_param_replaces() {
        let mut actor = Actor::new("light", "lamp");
        assert_eq!(actor.set_param("radius", 4i32), None);
        assert_eq!(actor.set_param("radius", 6i32), Some(Param::Int(4)));
        assert_eq!(actor.param("radius"), Some(&Param::Int(6)));
    }

    #[test]
    fn test_duplicate_param_key_fails() {
        let mut writer = ByteWriter::new();
        writer.write_string("door").unwrap();
        writer.write_string("front_door").unwrap();
        writer.write_usize(2).unwrap();
        for speed in [1.0f32, 2.0] {
            writer.write_string("speed").unwrap();
            Param::Float(speed).write(&mut writer).unwrap();
        }
        writer.write_usize(0).unwrap();
        let bytes = writer.into_inner();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(
            Actor::read(&mut reader),
            Err(CursorError::DuplicateKey("speed".into()))
        );
    }

    #[test]
    fn test_truncated_actor_fails() {
        let mut writer = ByteWriter::new();
        Actor::new("a", "b").write(&mut writer).unwrap();
        let bytes = writer.into_inner();
        let mut reader = ByteReader::new(&bytes[..bytes.len() - 1]);
        assert!(Actor::read(&mut reader).is_err());
    }
}
