//! Geometry Primitives
//!
//! Vertex structures and the static meshes of the scene: the sky cube, the
//! per-face-shaded unit cube, the ground quad, and the spinning test cube.
//! All faces are pre-triangulated with CCW winding for back-face culling.

use bytemuck::{Pod, Zeroable};

// ============================================================================
// Vertex Definitions
// ============================================================================

/// A vertex with position and per-vertex color.
///
/// Used by the sky cube and the spinning cube, whose corners each carry
/// their own color and let interpolation paint the faces.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    /// Vertex color (RGB, linear color space).
    pub color: [f32; 3],
}

impl ColorVertex {
    /// Returns the vertex buffer layout descriptor for pipeline creation.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// A vertex with position and a per-face brightness factor.
///
/// Used by the solid cubes: the fragment shader multiplies the object's base
/// color by `shade`, giving each face a fixed brightness instead of lighting.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ShadedVertex {
    pub position: [f32; 3],
    /// Brightness multiplier for the face this vertex belongs to.
    pub shade: f32,
}

impl ShadedVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShadedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// A vertex with position and texture coordinates, for the ground plane.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GroundVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl GroundVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GroundVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

// ============================================================================
// Sky Cube
// ============================================================================

/// Sky cube corners with pastel colors, one unit across, centered on the
/// camera. Interpolation across the faces produces the sky gradient.
pub const SKY_VERTICES: &[ColorVertex] = &[
    ColorVertex { position: [-0.5, -0.5, -0.5], color: [1.0, 0.7, 0.7] },
    ColorVertex { position: [ 0.5, -0.5, -0.5], color: [0.7, 1.0, 0.7] },
    ColorVertex { position: [ 0.5,  0.5, -0.5], color: [0.7, 0.7, 1.0] },
    ColorVertex { position: [-0.5,  0.5, -0.5], color: [1.0, 1.0, 0.7] },
    ColorVertex { position: [-0.5, -0.5,  0.5], color: [1.0, 0.7, 0.7] },
    ColorVertex { position: [ 0.5, -0.5,  0.5], color: [0.7, 1.0, 0.7] },
    ColorVertex { position: [ 0.5,  0.5,  0.5], color: [0.7, 0.7, 1.0] },
    ColorVertex { position: [-0.5,  0.5,  0.5], color: [1.0, 1.0, 0.7] },
];

/// Sky cube faces, wound CCW as seen from the cube's center.
/// The camera sits inside, so the inward faces are the front faces.
pub const SKY_INDICES: &[u16] = &[
    0, 1, 2,  2, 3, 0, // rear
    1, 5, 6,  6, 2, 1, // right
    5, 4, 7,  7, 6, 5, // front
    4, 0, 3,  3, 7, 4, // left
    7, 3, 2,  2, 6, 7, // top
    4, 5, 1,  1, 0, 4, // bottom
];

// ============================================================================
// Shaded Cube
// ============================================================================

/// Unit cube with a per-face brightness factor, 4 vertices per face so each
/// face keeps a hard edge. Front and rear are full brightness, the sides are
/// halved, the top is dimmed a little and the bottom the most.
pub const SHADED_CUBE_VERTICES: &[ShadedVertex] = &[
    // front (+Z)
    ShadedVertex { position: [-0.5, -0.5,  0.5], shade: 1.0 },
    ShadedVertex { position: [ 0.5, -0.5,  0.5], shade: 1.0 },
    ShadedVertex { position: [ 0.5,  0.5,  0.5], shade: 1.0 },
    ShadedVertex { position: [-0.5,  0.5,  0.5], shade: 1.0 },
    // right (+X)
    ShadedVertex { position: [ 0.5, -0.5,  0.5], shade: 0.5 },
    ShadedVertex { position: [ 0.5, -0.5, -0.5], shade: 0.5 },
    ShadedVertex { position: [ 0.5,  0.5, -0.5], shade: 0.5 },
    ShadedVertex { position: [ 0.5,  0.5,  0.5], shade: 0.5 },
    // rear (-Z)
    ShadedVertex { position: [ 0.5, -0.5, -0.5], shade: 1.0 },
    ShadedVertex { position: [-0.5, -0.5, -0.5], shade: 1.0 },
    ShadedVertex { position: [-0.5,  0.5, -0.5], shade: 1.0 },
    ShadedVertex { position: [ 0.5,  0.5, -0.5], shade: 1.0 },
    // left (-X)
    ShadedVertex { position: [-0.5, -0.5, -0.5], shade: 0.5 },
    ShadedVertex { position: [-0.5, -0.5,  0.5], shade: 0.5 },
    ShadedVertex { position: [-0.5,  0.5,  0.5], shade: 0.5 },
    ShadedVertex { position: [-0.5,  0.5, -0.5], shade: 0.5 },
    // top (+Y)
    ShadedVertex { position: [-0.5,  0.5,  0.5], shade: 1.0 / 1.5 },
    ShadedVertex { position: [ 0.5,  0.5,  0.5], shade: 1.0 / 1.5 },
    ShadedVertex { position: [ 0.5,  0.5, -0.5], shade: 1.0 / 1.5 },
    ShadedVertex { position: [-0.5,  0.5, -0.5], shade: 1.0 / 1.5 },
    // bottom (-Y)
    ShadedVertex { position: [ 0.5, -0.5, -0.5], shade: 1.0 / 3.0 },
    ShadedVertex { position: [ 0.5, -0.5,  0.5], shade: 1.0 / 3.0 },
    ShadedVertex { position: [-0.5, -0.5,  0.5], shade: 1.0 / 3.0 },
    ShadedVertex { position: [-0.5, -0.5, -0.5], shade: 1.0 / 3.0 },
];

/// Shaded cube faces as triangles, CCW when viewed from outside.
pub const SHADED_CUBE_INDICES: &[u16] = &[
    0,  1,  2,   2,  3,  0, // front
    4,  5,  6,   6,  7,  4, // right
    8,  9, 10,  10, 11,  8, // rear
    12, 13, 14,  14, 15, 12, // left
    16, 17, 18,  18, 19, 16, // top
    20, 21, 22,  22, 23, 20, // bottom
];

// ============================================================================
// Ground Plane
// ============================================================================

/// 100x100 ground quad in the XZ plane. Texture coordinates run to 50 on
/// both axes, so the grass texture tiles 50 times across the plane with a
/// repeat-wrapping sampler.
pub const GROUND_VERTICES: &[GroundVertex] = &[
    GroundVertex { position: [-50.0, 0.0,  50.0], uv: [ 0.0,  0.0] },
    GroundVertex { position: [ 50.0, 0.0,  50.0], uv: [ 0.0, 50.0] },
    GroundVertex { position: [ 50.0, 0.0, -50.0], uv: [50.0, 50.0] },
    GroundVertex { position: [-50.0, 0.0, -50.0], uv: [50.0,  0.0] },
];

/// Ground quad as two triangles, CCW when viewed from above.
pub const GROUND_INDICES: &[u16] = &[0, 1, 2, 2, 3, 0];

// ============================================================================
// Spinning Cube
// ============================================================================

/// Spinning test cube: the same eight corners as the sky cube, with primary
/// colors on the corners.
pub const SPINNER_VERTICES: &[ColorVertex] = &[
    ColorVertex { position: [-0.5, -0.5, -0.5], color: [1.0, 0.0, 0.0] },
    ColorVertex { position: [ 0.5, -0.5, -0.5], color: [0.0, 1.0, 0.0] },
    ColorVertex { position: [ 0.5,  0.5, -0.5], color: [0.0, 0.0, 1.0] },
    ColorVertex { position: [-0.5,  0.5, -0.5], color: [1.0, 1.0, 0.0] },
    ColorVertex { position: [-0.5, -0.5,  0.5], color: [1.0, 0.0, 0.0] },
    ColorVertex { position: [ 0.5, -0.5,  0.5], color: [0.0, 1.0, 0.0] },
    ColorVertex { position: [ 0.5,  0.5,  0.5], color: [0.0, 0.0, 1.0] },
    ColorVertex { position: [-0.5,  0.5,  0.5], color: [1.0, 1.0, 0.0] },
];

/// Spinner faces, wound CCW as seen from outside the cube.
pub const SPINNER_INDICES: &[u16] = &[
    0, 3, 2,  2, 1, 0, // rear
    1, 2, 6,  6, 5, 1, // right
    5, 6, 7,  7, 4, 5, // front
    4, 7, 3,  3, 0, 4, // left
    7, 6, 2,  2, 3, 7, // top
    4, 0, 1,  1, 5, 4, // bottom
];

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn triangle_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vec3 {
        let a = Vec3::from(a);
        let b = Vec3::from(b);
        let c = Vec3::from(c);
        (b - a).cross(c - b)
    }

    fn triangle_centroid(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vec3 {
        (Vec3::from(a) + Vec3::from(b) + Vec3::from(c)) / 3.0
    }

    #[test]
    fn index_buffers_stay_in_bounds() {
        for &i in SKY_INDICES {
            assert!((i as usize) < SKY_VERTICES.len());
        }
        for &i in SHADED_CUBE_INDICES {
            assert!((i as usize) < SHADED_CUBE_VERTICES.len());
        }
        for &i in SPINNER_INDICES {
            assert!((i as usize) < SPINNER_VERTICES.len());
        }
        for &i in GROUND_INDICES {
            assert!((i as usize) < GROUND_VERTICES.len());
        }
    }

    #[test]
    fn cubes_have_twelve_triangles_each() {
        assert_eq!(SKY_INDICES.len(), 36);
        assert_eq!(SHADED_CUBE_INDICES.len(), 36);
        assert_eq!(SPINNER_INDICES.len(), 36);
        assert_eq!(SHADED_CUBE_VERTICES.len(), 24);
        assert_eq!(GROUND_INDICES.len(), 6);
    }

    #[test]
    fn sky_faces_point_inward() {
        // The camera sits at the cube's center; every face normal must
        // point back toward it for the faces to survive back-face culling.
        for tri in SKY_INDICES.chunks(3) {
            let a = SKY_VERTICES[tri[0] as usize].position;
            let b = SKY_VERTICES[tri[1] as usize].position;
            let c = SKY_VERTICES[tri[2] as usize].position;
            let normal = triangle_normal(a, b, c);
            let centroid = triangle_centroid(a, b, c);
            assert!(normal.dot(-centroid) > 0.0);
        }
    }

    #[test]
    fn spinner_faces_point_outward() {
        for tri in SPINNER_INDICES.chunks(3) {
            let a = SPINNER_VERTICES[tri[0] as usize].position;
            let b = SPINNER_VERTICES[tri[1] as usize].position;
            let c = SPINNER_VERTICES[tri[2] as usize].position;
            let normal = triangle_normal(a, b, c);
            let centroid = triangle_centroid(a, b, c);
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn shaded_cube_faces_point_outward() {
        for tri in SHADED_CUBE_INDICES.chunks(3) {
            let a = SHADED_CUBE_VERTICES[tri[0] as usize].position;
            let b = SHADED_CUBE_VERTICES[tri[1] as usize].position;
            let c = SHADED_CUBE_VERTICES[tri[2] as usize].position;
            let normal = triangle_normal(a, b, c);
            let centroid = triangle_centroid(a, b, c);
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn shaded_cube_brightness_matches_the_face_pattern() {
        let shades: Vec<f32> = SHADED_CUBE_VERTICES.iter().map(|v| v.shade).collect();
        assert!(shades[0..4].iter().all(|&s| s == 1.0)); // front
        assert!(shades[4..8].iter().all(|&s| s == 0.5)); // right
        assert!(shades[8..12].iter().all(|&s| s == 1.0)); // rear
        assert!(shades[12..16].iter().all(|&s| s == 0.5)); // left
        assert!(shades[16..20].iter().all(|&s| (s - 2.0 / 3.0).abs() < 1e-6)); // top
        assert!(shades[20..24].iter().all(|&s| (s - 1.0 / 3.0).abs() < 1e-6)); // bottom
    }

    #[test]
    fn ground_uvs_tile_fifty_times() {
        let max_u = GROUND_VERTICES.iter().map(|v| v.uv[0]).fold(0.0, f32::max);
        let max_v = GROUND_VERTICES.iter().map(|v| v.uv[1]).fold(0.0, f32::max);
        assert_eq!(max_u, 50.0);
        assert_eq!(max_v, 50.0);
    }

    #[test]
    fn ground_faces_up() {
        for tri in GROUND_INDICES.chunks(3) {
            let a = GROUND_VERTICES[tri[0] as usize].position;
            let b = GROUND_VERTICES[tri[1] as usize].position;
            let c = GROUND_VERTICES[tri[2] as usize].position;
            assert!(triangle_normal(a, b, c).y > 0.0);
        }
    }
}
