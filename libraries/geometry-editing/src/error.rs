use crate::geometry::GeometryType;
use crate::index::GeometryIndexType;

use thiserror::Error;

/// The single failure type shared by every operation and every index lookup in this crate.
///
/// A failed call never returns a partially edited geometry, so the caller can report the error and drop the attempted edit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryOperationError {
	#[error("The geometry index has an empty path")]
	EmptyPath,

	#[error("A path of depth {depth} is deeper than any geometry can be nested")]
	PathTooDeep { depth: usize },

	#[error("A {geometry_type} does not accept a {index_type} index at this depth")]
	UnsupportedIndexType { index_type: GeometryIndexType, geometry_type: GeometryType },

	#[error("The index continues {remaining} level(s) below a {geometry_type}, which has no child geometries")]
	DepthMismatch { geometry_type: GeometryType, remaining: usize },

	#[error("Index {index} is out of bounds for a sequence of length {len}")]
	IndexOutOfBounds { index: usize, len: usize },

	#[error("Expected a {expected} but found a {found}")]
	IncompatibleGeometry { expected: GeometryType, found: GeometryType },

	#[error("A {geometry_type} holds coordinates, not child geometries")]
	NotAComposite { geometry_type: GeometryType },

	#[error("A {geometry_type} holds child geometries, not coordinates")]
	NotALeaf { geometry_type: GeometryType },

	#[error("A point can hold only a single coordinate")]
	PointOccupied,

	#[error("A point holds {len} coordinates instead of at most one")]
	MalformedPoint { len: usize },

	#[error("A linear ring of {len} coordinate(s) is not closed")]
	UnclosedRing { len: usize },
}

/// Failure to read a [`GeometryIndex`](crate::GeometryIndex) from its textual form.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseGeometryIndexError {
	#[error("An empty string is not a geometry index")]
	Empty,

	#[error("Unknown index element `{0}`")]
	UnknownElement(String),

	#[error("Invalid index value in `{0}`")]
	InvalidValue(String),

	#[error("`{0}` may only appear as the last element of an index")]
	MisplacedElement(GeometryIndexType),
}
