// Index addressing
/// Deepest path any geometry can need: a MultiPolygon vertex is `[polygon, ring, coordinate]`.
pub const MAX_INDEX_DEPTH: usize = 3;

// Textual index format
pub const INDEX_SEPARATOR: char = '.';
pub const GEOMETRY_INDEX_WORD: &str = "geometry";
pub const EDGE_INDEX_WORD: &str = "edge";
pub const VERTEX_INDEX_WORD: &str = "vertex";
