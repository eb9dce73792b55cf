//! Level documents: sector geometry plus placed actors.

use hearth_core::{Actor, ByteReader, ByteWriter, Color, Sector};

use super::read_count;
use crate::envelope::{AssetKind, TypedAsset};
use crate::error::AssetResult;

/// One playable level.
///
/// Layout: name string, ambient color, sector count + sectors, actor count
/// + actors.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelAsset {
    /// Display name
    pub name: String,
    /// Ambient light color
    pub ambient: Color,
    /// Room geometry
    pub sectors: Vec<Sector>,
    /// Placed actors
    pub actors: Vec<Actor>,
}

impl Default for LevelAsset {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::BLACK,
            sectors: Vec::new(),
            actors: Vec::new(),
        }
    }
}

impl LevelAsset {
    /// Finds an actor by instance name.
    #[must_use]
    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.name == name)
    }
}

impl TypedAsset for LevelAsset {
    const KIND: AssetKind = AssetKind::Level;
    const VERSION: u8 = 1;

    fn read_fields(reader: &mut ByteReader<'_>) -> AssetResult<Self> {
        let name = reader.read_string()?;
        let ambient = reader.read()?;

        // smallest sector: empty point and wall lists, heights, two empty strings, color
        let sector_count = read_count(reader, 8 + 8 + 4 + 4 + 8 + 8 + 16)?;
        let mut sectors = Vec::with_capacity(sector_count);
        for _ in 0..sector_count {
            sectors.push(Sector::read(reader)?);
        }

        // smallest actor: two empty strings and two zero counts
        let actor_count = read_count(reader, 8 * 4)?;
        let mut actors = Vec::with_capacity(actor_count);
        for _ in 0..actor_count {
            actors.push(Actor::read(reader)?);
        }

        Ok(Self {
            name,
            ambient,
            sectors,
            actors,
        })
    }

    fn write_fields(&self, writer: &mut ByteWriter) -> AssetResult<()> {
        writer.write_string(&self.name)?;
        writer.write(self.ambient)?;

        writer.write_usize(self.sectors.len())?;
        for sector in &self.sectors {
            sector.write(writer)?;
        }

        writer.write_usize(self.actors.len())?;
        for actor in &self.actors {
            actor.write(writer)?;
        }
        Ok(())
    }
}
