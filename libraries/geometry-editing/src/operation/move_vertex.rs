use super::{GeometryIndexOperation, Operation, check_index, checked_coordinates, is_ring_end};
use crate::error::GeometryOperationError;
use crate::geometry::{Coordinate, Geometry, GeometryType};
use crate::index::{GeometryIndex, GeometryIndexType};
use crate::index_service::modify;

/// Replaces the coordinate at a vertex index. Moving a ring's first or closing coordinate moves both.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveVertexOperation {
	coordinate: Coordinate,
	previous: Option<(GeometryIndex, Coordinate)>,
}

impl MoveVertexOperation {
	pub fn new(coordinate: Coordinate) -> Self {
		Self { coordinate, previous: None }
	}

	pub fn coordinate(&self) -> Coordinate {
		self.coordinate
	}

	/// Where the vertex was before the last successful execution.
	pub fn previous_coordinate(&self) -> Option<Coordinate> {
		self.previous.as_ref().map(|&(_, coordinate)| coordinate)
	}

	fn apply(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<(Geometry, Coordinate), GeometryOperationError> {
		check_index(geometry, index, &[GeometryIndexType::Vertex])?;

		let mut previous = None;
		let edited = modify(geometry, index.path(), |leaf, value| {
			let coordinates = checked_coordinates(leaf, index.index_type())?;
			let Some(&current) = coordinates.get(value) else {
				return Err(GeometryOperationError::IndexOutOfBounds { index: value, len: coordinates.len() });
			};

			let mut moved = coordinates.to_vec();
			match leaf.geometry_type() {
				GeometryType::LinearRing if is_ring_end(coordinates, value) => {
					moved[0] = self.coordinate;
					moved[coordinates.len() - 1] = self.coordinate;
				}
				GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing => moved[value] = self.coordinate,
				geometry_type @ (GeometryType::Polygon | GeometryType::MultiPoint | GeometryType::MultiLineString | GeometryType::MultiPolygon) => {
					return Err(GeometryOperationError::NotALeaf { geometry_type });
				}
			}

			previous = Some(current);
			leaf.with_coordinates(moved)
		})?;

		let previous = previous.ok_or(GeometryOperationError::EmptyPath)?;
		Ok((edited, previous))
	}
}

impl GeometryIndexOperation for MoveVertexOperation {
	fn execute(&mut self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError> {
		let (edited, previous) = self.apply(geometry, index).inspect_err(|error| log::debug!("Could not move the vertex at {index}: {error}"))?;
		log::trace!("Moved vertex at {index} from {previous} to {}", self.coordinate);

		self.previous = Some((index.clone(), previous));
		Ok(edited)
	}

	fn inverse_operation(&self) -> Option<Operation> {
		self.previous_coordinate().map(|coordinate| MoveVertexOperation::new(coordinate).into())
	}

	fn geometry_index(&self) -> Option<&GeometryIndex> {
		self.previous.as_ref().map(|(index, _)| index)
	}
}
