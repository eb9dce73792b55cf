//! # Planar Sector Validator
//!
//! A sector is one room of level geometry: a closed ring of 2D points (the
//! last point connects back to the first) with floor and ceiling data.
//!
//! Validity is a pure predicate recomputed on demand, never cached:
//!
//! - at least 3 points
//! - no two adjacent points equal (including last -> first)
//! - no two non-adjacent edges intersect
//!
//! The edge test is the usual four-orientation check plus the colinear
//! on-segment cases, run over every non-adjacent edge pair (O(n²), sectors
//! are small).

use crate::cursor::{ByteReader, ByteWriter};
use crate::error::CursorResult;
use crate::math::{Color, Vec2};

/// Turn direction of an ordered point triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// The three points lie on one line
    Colinear,
    /// Right turn (y up)
    Clockwise,
    /// Left turn (y up)
    CounterClockwise,
}

/// Orientation of the triple `(p, q, r)`.
#[must_use]
pub fn orientation(p: Vec2, q: Vec2, r: Vec2) -> Orientation {
    let value = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if value > 0.0 {
        Orientation::Clockwise
    } else if value < 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Colinear
    }
}

/// True if `q` lies within the bounding box of segment `p`-`r`.
///
/// Only meaningful when the three points are colinear.
fn on_segment(p: Vec2, q: Vec2, r: Vec2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// True if segment `p1`-`q1` intersects segment `p2`-`q2` (touching counts).
#[must_use]
pub fn segments_intersect(p1: Vec2, q1: Vec2, p2: Vec2, q2: Vec2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Colinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Colinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Colinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Colinear && on_segment(p2, q1, q2))
}

/// One room of level geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    /// Ring of corner points
    pub points: Vec<Vec2>,
    /// Material of the wall starting at each point
    pub wall_materials: Vec<String>,
    /// Floor height
    pub floor_height: f32,
    /// Ceiling height
    pub ceiling_height: f32,
    /// Floor material name
    pub floor_material: String,
    /// Ceiling material name
    pub ceiling_material: String,
    /// Ambient light color
    pub light_color: Color,
}

impl Default for Sector {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            wall_materials: Vec::new(),
            floor_height: 0.0,
            ceiling_height: 3.0,
            floor_material: String::new(),
            ceiling_material: String::new(),
            light_color: Color::WHITE,
        }
    }
}

impl Sector {
    /// Creates a sector from its corner points, other fields defaulted.
    #[must_use]
    pub fn from_points(points: Vec<Vec2>) -> Self {
        Self {
            wall_materials: vec![String::new(); points.len()],
            points,
            ..Self::default()
        }
    }

    /// Iterates over the edges `(points[i], points[i + 1 mod n])`.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns true if the ring is a simple polygon.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        if self.edges().any(|(a, b)| a == b) {
            return false;
        }

        let edges: Vec<(Vec2, Vec2)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 2)..n {
                // first and last edge share a point
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (p1, q1) = edges[i];
                let (p2, q2) = edges[j];
                if segments_intersect(p1, q1, p2, q2) {
                    return false;
                }
            }
        }

        true
    }

    /// Ray-casting parity test.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Shoelace area, positive for counter-clockwise rings (y up).
    #[must_use]
    pub fn signed_area(&self) -> f32 {
        self.edges().map(|(a, b)| a.cross(b)).sum::<f32>() * 0.5
    }

    /// Returns true if the ring winds clockwise (y up).
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Decodes a sector.
    ///
    /// # Errors
    ///
    /// Propagates any cursor error.
    pub fn read(reader: &mut ByteReader<'_>) -> CursorResult<Self> {
        let points = reader.read_sequence::<Vec2>()?;
        let wall_count = reader.read_usize()?;
        let mut wall_materials = Vec::with_capacity(wall_count.min(reader.remaining()));
        for _ in 0..wall_count {
            wall_materials.push(reader.read_string()?);
        }

        Ok(Self {
            points,
            wall_materials,
            floor_height: reader.read()?,
            ceiling_height: reader.read()?,
            floor_material: reader.read_string()?,
            ceiling_material: reader.read_string()?,
            light_color: reader.read()?,
        })
    }

    /// Encodes a sector in the order [`Sector::read`] expects.
    ///
    /// # Errors
    ///
    /// Propagates any cursor error.
    pub fn write(&self, writer: &mut ByteWriter) -> CursorResult<()> {
        writer.write_sequence(&self.points)?;
        writer.write_usize(self.wall_materials.len())?;
        for material in &self.wall_materials {
            writer.write_string(material)?;
        }
        writer.write(self.floor_height)?;
        writer.write(self.ceiling_height)?;
        writer.write_string(&self.floor_material)?;
        writer.write_string(&self.ceiling_material)?;
        writer.write(self.light_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ring(coords: &[(f32, f32)]) -> Sector {
        Sector::from_points(coords.iter().map(|&(x, y)| Vec2::new(x, y)).collect())
    }

    #[test]
    fn test_triangle_is_valid() {
        let triangle = ring(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        assert!(triangle.is_valid());
        assert!((triangle.signed_area() - 6.0).abs() < 1e-6);
        assert!(!triangle.is_clockwise());
    }

    #[test]
    fn test_figure_eight_is_invalid() {
        let bowtie = ring(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
        assert!(!bowtie.is_valid());
    }

    #[test]
    fn test_degenerate_rings() {
        assert!(!ring(&[]).is_valid());
        assert!(!ring(&[(0.0, 0.0), (1.0, 0.0)]).is_valid());
        // repeated adjacent point
        assert!(!ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).is_valid());
        // last point equals first
        assert!(!ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]).is_valid());
    }

    #[test]
    fn test_colinear_overlap_is_invalid() {
        // edge 2 folds back over edge 0
        let folded = ring(&[(0.0, 0.0), (4.0, 0.0), (4.0, 1.0), (2.0, 0.0)]);
        assert!(!folded.is_valid());
    }

    #[test]
    fn test_contains_point() {
        let square = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(square.contains_point(Vec2::new(5.0, 5.0)));
        assert!(!square.contains_point(Vec2::new(50.0, 5.0)));
        assert!(!square.contains_point(Vec2::new(-1.0, -1.0)));
    }

    #[test]
    fn test_concave_contains_point() {
        // L shape
        let l_shape = ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (0.0, 4.0),
        ]);
        assert!(l_shape.is_valid());
        assert!(l_shape.contains_point(Vec2::new(0.5, 3.0)));
        assert!(!l_shape.contains_point(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn test_segments_intersect() {
        let p = Vec2::new;
        assert!(segments_intersect(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)));
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)));
        // touching at an endpoint
        assert!(segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)));
        // colinear, disjoint
        assert!(!segments_intersect(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0)));
    }

    #[test]
    fn test_clockwise() {
        let cw = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(cw.is_clockwise());
        assert_eq!(orientation(Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)), Orientation::Clockwise);
    }

    #[test]
    fn test_sector_roundtrip() {
        let mut sector = ring(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        sector.wall_materials = vec!["brick".into(), "stone".into(), String::new()];
        sector.floor_material = "tile".into();
        sector.light_color = Color::rgb(0.2, 0.3, 0.4);

        let mut writer = ByteWriter::new();
        sector.write(&mut writer).unwrap();
        let bytes = writer.into_inner();
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(Sector::read(&mut reader).unwrap(), sector);
        assert!(reader.is_at_end());
    }

    proptest! {
        #[test]
        fn regular_polygons_are_valid(sides in 3usize..16, radius in 1.0f32..100.0) {
            let points = (0..sides)
                .map(|i| {
                    let angle = std::f32::consts::TAU * i as f32 / sides as f32;
                    Vec2::new(radius * angle.cos(), radius * angle.sin())
                })
                .collect();
            let sector = Sector::from_points(points);

            prop_assert!(sector.is_valid());
            prop_assert!(sector.contains_point(Vec2::ZERO));
            prop_assert!(!sector.contains_point(Vec2::new(radius * 2.0, 0.0)));
            prop_assert!(sector.signed_area() > 0.0);
        }
    }
}
