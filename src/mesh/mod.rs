//! Mesh generation for ContinentMap
//!
//! Generates engine-agnostic 2D mesh data from the map's cells.

mod colors;

pub use colors::{BandedColorMapper, ColorMapper, GradientColorMapper, TerrainColor};

use glam::DVec2;

use crate::map::ContinentMap;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any renderer:
/// - wgpu / OpenGL: use directly as vertex and index buffers
/// - SVG or canvas: walk the triangles or the coastline segments
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions in map units
    pub positions: Vec<[f32; 2]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Coastline segments as pairs of points
    pub coastline: Vec<[[f32; 2]; 2]>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Generate mesh from a map with color mapping
///
/// Each cell is triangulated as a triangle fan from its site to its
/// boundary vertices. All vertices in a cell share the color of the site's
/// elevation. Cells with fewer than three vertices are skipped.
pub fn generate_mesh<C>(map: &ContinentMap, color_mapper: &C) -> MeshData
where
    C: ColorMapper + ?Sized,
{
    let mut mesh = MeshData::default();

    for (index, site) in map.sites().iter().enumerate() {
        let polygon = map.polygon(index);
        if polygon.len() < 3 {
            continue;
        }

        let color = color_mapper.map_color(site.elevation);
        triangulate_cell(site.position, polygon, color, &mut mesh);
    }

    mesh.coastline = map
        .coastline()
        .iter()
        .map(|edge| [to_f32(edge.endpoints[0]), to_f32(edge.endpoints[1])])
        .collect();

    mesh
}

/// Triangulate a single cell as a triangle fan
fn triangulate_cell(center: DVec2, vertices: &[DVec2], color: TerrainColor, mesh: &mut MeshData) {
    let base_idx = mesh.positions.len() as u32;

    mesh.positions.push(to_f32(center));
    mesh.colors.push(color);

    for &vertex in vertices {
        mesh.positions.push(to_f32(vertex));
        mesh.colors.push(color);
    }

    let num_vertices = vertices.len();
    for i in 0..num_vertices {
        let next_i = (i + 1) % num_vertices;
        mesh.indices.push(base_idx);
        mesh.indices.push(base_idx + 1 + i as u32);
        mesh.indices.push(base_idx + 1 + next_i as u32);
    }
}

#[inline]
fn to_f32(point: DVec2) -> [f32; 2] {
    [point.x as f32, point.y as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfigBuilder;

    fn small_map() -> ContinentMap {
        let config = MapConfigBuilder::new()
            .seed(42)
            .crusts(60)
            .unwrap()
            .continent_count(3)
            .unwrap()
            .build()
            .unwrap();
        ContinentMap::generate(config).unwrap()
    }

    #[test]
    fn test_generate_mesh() {
        let map = small_map();
        let mesh = generate_mesh(&map, &BandedColorMapper);

        assert!(!mesh.is_empty());
        assert!(mesh.triangle_count() > 0);
        assert_eq!(mesh.positions.len(), mesh.colors.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        assert_eq!(mesh.coastline.len(), map.coastline().len());
    }

    #[test]
    fn test_triangle_count_matches_polygons() {
        let map = small_map();
        let mesh = generate_mesh(&map, &GradientColorMapper::default());

        let expected: usize = map
            .polygons()
            .filter(|(polygon, _)| polygon.len() >= 3)
            .map(|(polygon, _)| polygon.len())
            .sum();
        assert_eq!(mesh.triangle_count(), expected);
    }

    #[test]
    fn test_mesh_colors_follow_elevation() {
        let map = small_map();
        let land: TerrainColor = [0.0, 1.0, 0.0, 1.0];
        let sea: TerrainColor = [0.0, 0.0, 1.0, 1.0];
        let mapper = move |elevation: f64| if elevation >= 0.0 { land } else { sea };
        let mesh = generate_mesh(&map, &mapper);

        let land_vertices = mesh.colors.iter().filter(|&&c| c == land).count();
        assert!(land_vertices > 0);
        assert!(land_vertices < mesh.vertex_count());
    }

    #[test]
    fn test_mesh_consistency() {
        let map = small_map();

        let mesh1 = generate_mesh(&map, &BandedColorMapper);
        let mesh2 = generate_mesh(&map, &BandedColorMapper);

        assert_eq!(mesh1.positions, mesh2.positions);
        assert_eq!(mesh1.indices, mesh2.indices);
    }
}
