//! Polygon and mesh containers for building a navigation mesh. The triangulation itself is done by
//! an external [Triangulator]; this module only prepares the rings it consumes and collects the
//! triangles it produces into an indexed [Mesh].
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::{info, warn};

use crate::error::PolygonError;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32) -> Self {
        Vertex { x, y }
    }
    /// Bit pattern used for deduplication; `-0.0` and `0.0` share a key.
    fn key(self) -> (u32, u32) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

/// Winding of a ring, with `y` pointing up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Cw = -1,
    None = 0,
    Ccw = 1,
}

/// A view of one ring of a [Polygon].
#[derive(Clone, Copy, Debug)]
pub struct PolygonPart<'a> {
    vertices: &'a [Vertex],
}

impl<'a> PolygonPart<'a> {
    pub fn vertices(&self) -> &'a [Vertex] {
        self.vertices
    }
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    /// Twice the signed area (shoelace formula), positive for counter-clockwise rings.
    pub fn signed_area2(&self) -> f32 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum()
    }
    pub fn orientation(&self) -> Orientation {
        let area = self.signed_area2();
        if area > 0.0 {
            Orientation::Ccw
        } else if area < 0.0 {
            Orientation::Cw
        } else {
            Orientation::None
        }
    }
}

/// A border ring followed by any number of island (hole) rings, stored back to back.
/// Part `0` is always the border.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    vertices: Vec<Vertex>,
    offsets: Vec<usize>,
    writing_island: bool,
}

impl Polygon {
    pub fn new(border: Vec<Vertex>) -> Self {
        Polygon {
            vertices: border,
            offsets: vec![0],
            writing_island: false,
        }
    }
    /// Appends a complete island ring.
    pub fn insert_island(&mut self, island: &[Vertex]) -> Result<(), PolygonError> {
        if self.writing_island {
            warn!("Tried to insert an island while another one is being written");
            return Err(PolygonError::IslandInProgress);
        }
        self.offsets.push(self.vertices.len());
        self.vertices.extend_from_slice(island);
        Ok(())
    }
    /// Begins an island written vertex by vertex with [push_island_vertex](Self::push_island_vertex).
    pub fn start_island(&mut self, reservation: usize) -> Result<(), PolygonError> {
        if self.writing_island {
            warn!("Tried to start an island before finishing the previous one");
            return Err(PolygonError::IslandInProgress);
        }
        self.vertices.reserve(reservation);
        self.offsets.push(self.vertices.len());
        self.writing_island = true;
        Ok(())
    }
    pub fn push_island_vertex(&mut self, vertex: Vertex) -> Result<(), PolygonError> {
        if !self.writing_island {
            warn!("Tried to push an island vertex without starting an island");
            return Err(PolygonError::NoIslandStarted);
        }
        self.vertices.push(vertex);
        Ok(())
    }
    pub fn finish_island(&mut self) -> Result<(), PolygonError> {
        if !self.writing_island {
            warn!("Tried to finish an island that was never started");
            return Err(PolygonError::NoIslandStarted);
        }
        self.writing_island = false;
        Ok(())
    }
    pub fn is_writing_island(&self) -> bool {
        self.writing_island
    }
    /// Number of rings, border included.
    pub fn part_count(&self) -> usize {
        self.offsets.len()
    }
    fn part_range(&self, part: usize) -> Result<core::ops::Range<usize>, PolygonError> {
        let start = *self.offsets.get(part).ok_or(PolygonError::PartOutOfRange {
            part,
            count: self.offsets.len(),
        })?;
        let end = self
            .offsets
            .get(part + 1)
            .copied()
            .unwrap_or(self.vertices.len());
        Ok(start..end)
    }
    pub fn part(&self, part: usize) -> Result<PolygonPart<'_>, PolygonError> {
        let range = self.part_range(part)?;
        Ok(PolygonPart {
            vertices: &self.vertices[range],
        })
    }
    pub fn parts(&self) -> impl Iterator<Item = PolygonPart<'_>> + '_ {
        (0..self.part_count()).filter_map(move |i| self.part(i).ok())
    }
    /// Reverses the winding of a ring.
    pub fn invert(&mut self, part: usize) -> Result<(), PolygonError> {
        let range = self.part_range(part)?;
        self.vertices[range].reverse();
        Ok(())
    }
    /// Rewinds a ring to `orientation`. Degenerate rings and [Orientation::None] are left as is.
    pub fn set_orientation(
        &mut self,
        part: usize,
        orientation: Orientation,
    ) -> Result<(), PolygonError> {
        let current = self.part(part)?.orientation();
        if orientation != Orientation::None
            && current != Orientation::None
            && current != orientation
        {
            self.invert(part)?;
        }
        Ok(())
    }
}

/// One ring handed to a [Triangulator].
#[derive(Clone, Copy, Debug)]
pub struct Ring<'a> {
    pub vertices: &'a [Vertex],
    pub hole: bool,
}

/// Planar triangulation of a border with holes. The first ring is the border, wound
/// counter-clockwise; every following ring is a hole, wound clockwise.
pub trait Triangulator {
    fn triangulate(&self, rings: &[Ring<'_>]) -> Vec<[Vertex; 3]>;
}

/// Indexed triangle mesh. Vertices are deduplicated on insertion.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: FxIndexMap<(u32, u32), Vertex>,
    indices: Vec<usize>,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }
    pub fn find_vertex(&self, vertex: Vertex) -> Option<usize> {
        self.vertices.get_index_of(&vertex.key())
    }
    /// Index of `vertex`, inserting it if it is not yet part of the mesh.
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.insert_full(vertex.key(), vertex).0
    }
    /// Appends a triangle of existing vertex indices and returns the triangle number.
    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> usize {
        debug_assert!(a < self.vertex_count() && b < self.vertex_count() && c < self.vertex_count());
        self.indices.extend_from_slice(&[a, b, c]);
        self.triangle_count() - 1
    }
    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        self.vertices.get_index(index).map(|(_, v)| *v)
    }
    pub fn triangle(&self, triangle: usize) -> Option<[usize; 3]> {
        let i = triangle * 3;
        self.indices
            .get(i..i + 3)
            .map(|t| [t[0], t[1], t[2]])
    }
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Winds the border counter-clockwise and the islands clockwise, triangulates with `triangulator`
/// and collects the triangles into a [Mesh].
pub fn generate_mesh_from_polygon<T: Triangulator>(
    polygon: &mut Polygon,
    triangulator: &T,
) -> Result<Mesh, PolygonError> {
    if polygon.is_writing_island() {
        warn!("Cannot triangulate a polygon while an island is being written");
        return Err(PolygonError::IslandInProgress);
    }
    polygon.set_orientation(0, Orientation::Ccw)?;
    for part in 1..polygon.part_count() {
        polygon.set_orientation(part, Orientation::Cw)?;
    }
    let rings: Vec<Ring<'_>> = polygon
        .parts()
        .enumerate()
        .map(|(i, part)| Ring {
            vertices: part.vertices(),
            hole: i > 0,
        })
        .collect();
    let triangles = triangulator.triangulate(&rings);

    let mut mesh = Mesh::new();
    for [a, b, c] in triangles {
        let (a, b, c) = (mesh.add_vertex(a), mesh.add_vertex(b), mesh.add_vertex(c));
        mesh.add_triangle(a, b, c);
    }
    info!(
        "Triangulated polygon with {} part(s) into {} triangles over {} vertices",
        polygon.part_count(),
        mesh.triangle_count(),
        mesh.vertex_count()
    );
    Ok(mesh)
}
