mod delete_geometry;
mod delete_vertex;
mod insert_geometry;
mod insert_vertex;
mod move_vertex;

pub use delete_geometry::DeleteGeometryOperation;
pub use delete_vertex::DeleteVertexOperation;
pub use insert_geometry::InsertGeometryOperation;
pub use insert_vertex::InsertVertexOperation;
pub use move_vertex::MoveVertexOperation;

use crate::error::GeometryOperationError;
use crate::geometry::{Coordinate, Geometry, GeometryType, is_closed};
use crate::index::{GeometryIndex, GeometryIndexType};
use crate::index_service::{check_depth, expect_index_type, leaf_coordinates};

/// A single, exactly reversible edit applied to a geometry at a [`GeometryIndex`].
///
/// Operations are single-use: build one per edit, execute it once, and keep it only as long as its inverse may be needed.
pub trait GeometryIndexOperation {
	/// Applies the edit and returns the edited geometry. The input geometry is left untouched.
	///
	/// A failed execution changes nothing, not even the operation itself.
	fn execute(&mut self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError>;

	/// The operation that undoes the last successful [`execute`](Self::execute) when run on its result at [`geometry_index`](Self::geometry_index).
	fn inverse_operation(&self) -> Option<Operation>;

	/// Where the last successful execution actually took effect.
	///
	/// This can differ from the index that was passed in: an edge index is reported as the vertex it created,
	/// and edits at a ring's closing coordinate are reported at the ring's first coordinate.
	fn geometry_index(&self) -> Option<&GeometryIndex>;
}

/// Any of the edit operations, so that inverses can be stored and replayed without boxing.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
	InsertVertex(InsertVertexOperation),
	DeleteVertex(DeleteVertexOperation),
	MoveVertex(MoveVertexOperation),
	InsertGeometry(InsertGeometryOperation),
	DeleteGeometry(DeleteGeometryOperation),
}

impl GeometryIndexOperation for Operation {
	fn execute(&mut self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError> {
		match self {
			Operation::InsertVertex(operation) => operation.execute(geometry, index),
			Operation::DeleteVertex(operation) => operation.execute(geometry, index),
			Operation::MoveVertex(operation) => operation.execute(geometry, index),
			Operation::InsertGeometry(operation) => operation.execute(geometry, index),
			Operation::DeleteGeometry(operation) => operation.execute(geometry, index),
		}
	}

	fn inverse_operation(&self) -> Option<Operation> {
		match self {
			Operation::InsertVertex(operation) => operation.inverse_operation(),
			Operation::DeleteVertex(operation) => operation.inverse_operation(),
			Operation::MoveVertex(operation) => operation.inverse_operation(),
			Operation::InsertGeometry(operation) => operation.inverse_operation(),
			Operation::DeleteGeometry(operation) => operation.inverse_operation(),
		}
	}

	fn geometry_index(&self) -> Option<&GeometryIndex> {
		match self {
			Operation::InsertVertex(operation) => operation.geometry_index(),
			Operation::DeleteVertex(operation) => operation.geometry_index(),
			Operation::MoveVertex(operation) => operation.geometry_index(),
			Operation::InsertGeometry(operation) => operation.geometry_index(),
			Operation::DeleteGeometry(operation) => operation.geometry_index(),
		}
	}
}

macro_rules! derive_from {
	($type:ty, $kind:ident) => {
		impl From<$type> for Operation {
			fn from(operation: $type) -> Self {
				Operation::$kind(operation)
			}
		}
	};
}

derive_from!(InsertVertexOperation, InsertVertex);
derive_from!(DeleteVertexOperation, DeleteVertex);
derive_from!(MoveVertexOperation, MoveVertex);
derive_from!(InsertGeometryOperation, InsertGeometry);
derive_from!(DeleteGeometryOperation, DeleteGeometry);

/// The checks every operation runs before descending into the geometry.
fn check_index(geometry: &Geometry, index: &GeometryIndex, accepted: &[GeometryIndexType]) -> Result<(), GeometryOperationError> {
	check_depth(index.path())?;
	expect_index_type(geometry, index, accepted)
}

/// The coordinates of the leaf a vertex or edge index ends in, refusing leaves that already break their structural invariants.
fn checked_coordinates(leaf: &Geometry, index_type: GeometryIndexType) -> Result<&[Coordinate], GeometryOperationError> {
	let coordinates = leaf_coordinates(leaf, index_type)?;
	match leaf.geometry_type() {
		GeometryType::Point if coordinates.len() > 1 => Err(GeometryOperationError::MalformedPoint { len: coordinates.len() }),
		GeometryType::LinearRing if !is_closed(coordinates) => Err(GeometryOperationError::UnclosedRing { len: coordinates.len() }),
		_ => Ok(coordinates),
	}
}

/// Whether `position` is the first or the closing coordinate of a ring, which are the same point.
fn is_ring_end(coordinates: &[Coordinate], position: usize) -> bool {
	position == 0 || Some(position) == coordinates.len().checked_sub(1)
}
