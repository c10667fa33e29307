use super::{GeometryIndexOperation, InsertVertexOperation, Operation, check_index, checked_coordinates, is_ring_end};
use crate::error::GeometryOperationError;
use crate::geometry::{Coordinate, Geometry, GeometryType};
use crate::index::{GeometryIndex, GeometryIndexType};
use crate::index_service::modify;

/// Removes the coordinate at a vertex index.
///
/// Deleting a ring's first or closing coordinate removes that point from the ring and closes it again on the next
/// coordinate, so `[a, b, c, a]` becomes `[b, c, b]`. Such deletions are reported at vertex 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteVertexOperation {
	deleted: Option<(GeometryIndex, Coordinate)>,
}

impl DeleteVertexOperation {
	pub fn new() -> Self {
		Self::default()
	}

	/// The coordinate removed by the last successful execution.
	pub fn deleted_coordinate(&self) -> Option<Coordinate> {
		self.deleted.as_ref().map(|&(_, coordinate)| coordinate)
	}

	fn apply(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<(Geometry, GeometryIndex, Coordinate), GeometryOperationError> {
		check_index(geometry, index, &[GeometryIndexType::Vertex])?;

		let mut deleted = None;
		let edited = modify(geometry, index.path(), |leaf, value| {
			let coordinates = checked_coordinates(leaf, index.index_type())?;
			if value >= coordinates.len() {
				return Err(GeometryOperationError::IndexOutOfBounds { index: value, len: coordinates.len() });
			}

			let (coordinates, position, coordinate) = remove_coordinate(leaf.geometry_type(), coordinates, value)?;
			deleted = Some((position, coordinate));
			leaf.with_coordinates(coordinates)
		})?;

		let (position, coordinate) = deleted.ok_or(GeometryOperationError::EmptyPath)?;
		Ok((edited, index.with_value(GeometryIndexType::Vertex, position), coordinate))
	}
}

impl GeometryIndexOperation for DeleteVertexOperation {
	fn execute(&mut self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError> {
		let (edited, position, coordinate) = self.apply(geometry, index).inspect_err(|error| log::debug!("Could not delete the vertex at {index}: {error}"))?;
		log::trace!("Deleted vertex {coordinate} at {position}");

		self.deleted = Some((position, coordinate));
		Ok(edited)
	}

	fn inverse_operation(&self) -> Option<Operation> {
		self.deleted_coordinate().map(|coordinate| InsertVertexOperation::new(coordinate).into())
	}

	fn geometry_index(&self) -> Option<&GeometryIndex> {
		self.deleted.as_ref().map(|(index, _)| index)
	}
}

/// Returns the new coordinate sequence, the position the removal is reported at, and the removed coordinate.
fn remove_coordinate(geometry_type: GeometryType, coordinates: &[Coordinate], position: usize) -> Result<(Vec<Coordinate>, usize, Coordinate), GeometryOperationError> {
	match geometry_type {
		GeometryType::Point | GeometryType::LineString => {
			let mut remaining = coordinates.to_vec();
			let coordinate = remaining.remove(position);
			Ok((remaining, position, coordinate))
		}
		GeometryType::LinearRing if is_ring_end(coordinates, position) => {
			// Both ends go, then the new first coordinate closes the ring
			let mut remaining = coordinates[1..coordinates.len() - 1].to_vec();
			if let Some(&first) = remaining.first() {
				remaining.push(first);
			}
			Ok((remaining, 0, coordinates[0]))
		}
		GeometryType::LinearRing => {
			let mut remaining = coordinates.to_vec();
			let coordinate = remaining.remove(position);
			Ok((remaining, position, coordinate))
		}
		GeometryType::Polygon | GeometryType::MultiPoint | GeometryType::MultiLineString | GeometryType::MultiPolygon => Err(GeometryOperationError::NotALeaf { geometry_type }),
	}
}
