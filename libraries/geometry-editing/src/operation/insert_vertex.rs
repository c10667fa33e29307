use super::{DeleteVertexOperation, GeometryIndexOperation, Operation, check_index, checked_coordinates};
use crate::error::GeometryOperationError;
use crate::geometry::{Coordinate, Geometry, GeometryType};
use crate::index::{GeometryIndex, GeometryIndexType};
use crate::index_service::modify;

/// Inserts a coordinate at a vertex index, or right after the start of the segment named by an edge index.
///
/// Edge `i` is equivalent to vertex `i + 1`. A vertex index may also point one past the last coordinate to append.
/// Rings stay closed: a coordinate inserted at position 0 also becomes the new closing coordinate, and a coordinate
/// appended past the closing coordinate is placed just before it. The first coordinate of an empty ring is written
/// twice so the ring is closed from the start.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertVertexOperation {
	coordinate: Coordinate,
	index: Option<GeometryIndex>,
}

impl InsertVertexOperation {
	pub fn new(coordinate: Coordinate) -> Self {
		Self { coordinate, index: None }
	}

	pub fn coordinate(&self) -> Coordinate {
		self.coordinate
	}

	fn apply(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<(Geometry, GeometryIndex), GeometryOperationError> {
		check_index(geometry, index, &[GeometryIndexType::Vertex, GeometryIndexType::Edge])?;

		let mut placed = None;
		let edited = modify(geometry, index.path(), |leaf, value| {
			let coordinates = checked_coordinates(leaf, index.index_type())?;
			let position = match index.index_type() {
				GeometryIndexType::Edge if value < coordinates.len().saturating_sub(1) => value + 1,
				GeometryIndexType::Edge => {
					return Err(GeometryOperationError::IndexOutOfBounds {
						index: value,
						len: coordinates.len().saturating_sub(1),
					});
				}
				_ if value <= coordinates.len() => value,
				_ => return Err(GeometryOperationError::IndexOutOfBounds { index: value, len: coordinates.len() }),
			};

			let (coordinates, position) = insert_coordinate(leaf.geometry_type(), coordinates, position, self.coordinate)?;
			placed = Some(position);
			leaf.with_coordinates(coordinates)
		})?;

		let position = placed.ok_or(GeometryOperationError::EmptyPath)?;
		Ok((edited, index.with_value(GeometryIndexType::Vertex, position)))
	}
}

impl GeometryIndexOperation for InsertVertexOperation {
	fn execute(&mut self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError> {
		let (edited, placed) = self.apply(geometry, index).inspect_err(|error| log::debug!("Could not insert a vertex at {index}: {error}"))?;
		log::trace!("Inserted vertex {} at {placed}", self.coordinate);

		self.index = Some(placed);
		Ok(edited)
	}

	fn inverse_operation(&self) -> Option<Operation> {
		self.index.as_ref().map(|_| DeleteVertexOperation::new().into())
	}

	fn geometry_index(&self) -> Option<&GeometryIndex> {
		self.index.as_ref()
	}
}

/// Returns the new coordinate sequence and the position the coordinate ended up at.
fn insert_coordinate(geometry_type: GeometryType, coordinates: &[Coordinate], position: usize, coordinate: Coordinate) -> Result<(Vec<Coordinate>, usize), GeometryOperationError> {
	let mut inserted = coordinates.to_vec();
	match geometry_type {
		GeometryType::Point if !coordinates.is_empty() => return Err(GeometryOperationError::PointOccupied),
		GeometryType::Point | GeometryType::LineString => inserted.insert(position, coordinate),
		GeometryType::LinearRing if coordinates.is_empty() => inserted = vec![coordinate, coordinate],
		GeometryType::LinearRing if position == 0 => {
			inserted.insert(0, coordinate);
			if let Some(closing) = inserted.last_mut() {
				*closing = coordinate;
			}
		}
		GeometryType::LinearRing => {
			let position = position.min(coordinates.len() - 1);
			inserted.insert(position, coordinate);
			return Ok((inserted, position));
		}
		GeometryType::Polygon | GeometryType::MultiPoint | GeometryType::MultiLineString | GeometryType::MultiPolygon => {
			return Err(GeometryOperationError::NotALeaf { geometry_type });
		}
	}
	Ok((inserted, position))
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::DVec2;

	fn vertex(path: &[usize]) -> GeometryIndex {
		GeometryIndex::new(GeometryIndexType::Vertex, path.to_vec())
	}

	fn edge(path: &[usize]) -> GeometryIndex {
		GeometryIndex::new(GeometryIndexType::Edge, path.to_vec())
	}

	fn ring() -> Geometry {
		Geometry::linear_ring(vec![DVec2::new(1., 1.), DVec2::new(2., 2.), DVec2::new(3., 3.), DVec2::new(1., 1.)])
	}

	#[test]
	fn insert_into_line_string() {
		let line = Geometry::line_string(vec![DVec2::new(0., 0.), DVec2::new(2., 0.)]);
		let mut operation = InsertVertexOperation::new(DVec2::new(1., 0.));

		let edited = operation.execute(&line, &vertex(&[1])).unwrap();
		assert_eq!(edited.coordinates().unwrap(), &[DVec2::new(0., 0.), DVec2::new(1., 0.), DVec2::new(2., 0.)]);
		assert_eq!(operation.geometry_index(), Some(&vertex(&[1])));
	}

	#[test]
	fn edge_index_inserts_after_its_start() {
		let line = Geometry::line_string(vec![DVec2::new(0., 0.), DVec2::new(2., 0.), DVec2::new(4., 0.)]);
		let mut operation = InsertVertexOperation::new(DVec2::new(3., 0.));

		let edited = operation.execute(&line, &edge(&[1])).unwrap();
		assert_eq!(edited.coordinates().unwrap()[2], DVec2::new(3., 0.));
		assert_eq!(operation.geometry_index(), Some(&vertex(&[2])));
	}

	#[test]
	fn append_to_line_string() {
		let line = Geometry::line_string(vec![DVec2::new(0., 0.)]);
		let edited = InsertVertexOperation::new(DVec2::ONE).execute(&line, &vertex(&[1])).unwrap();
		assert_eq!(edited.coordinates().unwrap(), &[DVec2::ZERO, DVec2::ONE]);
	}

	#[test]
	fn insert_at_ring_start_moves_the_closing_coordinate() {
		let edited = InsertVertexOperation::new(DVec2::new(9., 9.)).execute(&ring(), &vertex(&[0])).unwrap();
		assert_eq!(
			edited.coordinates().unwrap(),
			&[DVec2::new(9., 9.), DVec2::new(1., 1.), DVec2::new(2., 2.), DVec2::new(3., 3.), DVec2::new(9., 9.)]
		);
	}

	#[test]
	fn append_to_ring_lands_before_the_closing_coordinate() {
		let mut operation = InsertVertexOperation::new(DVec2::new(9., 9.));

		let edited = operation.execute(&ring(), &vertex(&[4])).unwrap();
		assert_eq!(
			edited.coordinates().unwrap(),
			&[DVec2::new(1., 1.), DVec2::new(2., 2.), DVec2::new(3., 3.), DVec2::new(9., 9.), DVec2::new(1., 1.)]
		);
		assert_eq!(operation.geometry_index(), Some(&vertex(&[3])));
	}

	#[test]
	fn first_ring_coordinate_is_closed() {
		let edited = InsertVertexOperation::new(DVec2::ONE).execute(&Geometry::empty(GeometryType::LinearRing), &vertex(&[0])).unwrap();
		assert_eq!(edited.coordinates().unwrap(), &[DVec2::ONE, DVec2::ONE]);
	}

	#[test]
	fn point_holds_a_single_coordinate() {
		let mut operation = InsertVertexOperation::new(DVec2::ONE);

		let point = operation.execute(&Geometry::empty(GeometryType::Point), &vertex(&[0])).unwrap();
		assert_eq!(point, Geometry::point(DVec2::ONE));
		assert_eq!(InsertVertexOperation::new(DVec2::ZERO).execute(&point, &vertex(&[0])), Err(GeometryOperationError::PointOccupied));
	}

	#[test]
	fn rejects_out_of_range_indices() {
		let line = Geometry::line_string(vec![DVec2::ZERO, DVec2::ONE]);

		assert_eq!(
			InsertVertexOperation::new(DVec2::ONE).execute(&line, &vertex(&[3])),
			Err(GeometryOperationError::IndexOutOfBounds { index: 3, len: 2 })
		);
		assert_eq!(
			InsertVertexOperation::new(DVec2::ONE).execute(&line, &edge(&[1])),
			Err(GeometryOperationError::IndexOutOfBounds { index: 1, len: 1 })
		);
		assert_eq!(
			InsertVertexOperation::new(DVec2::ONE).execute(&Geometry::empty(GeometryType::LineString), &edge(&[0])),
			Err(GeometryOperationError::IndexOutOfBounds { index: 0, len: 0 })
		);
	}

	#[test]
	fn largest_indices_are_out_of_range() {
		let line = Geometry::line_string(vec![DVec2::ZERO, DVec2::ONE]);
		let ring = ring();

		assert_eq!(
			InsertVertexOperation::new(DVec2::X).execute(&line, &edge(&[usize::MAX])),
			Err(GeometryOperationError::IndexOutOfBounds { index: usize::MAX, len: 1 })
		);
		assert_eq!(
			InsertVertexOperation::new(DVec2::X).execute(&line, &vertex(&[usize::MAX])),
			Err(GeometryOperationError::IndexOutOfBounds { index: usize::MAX, len: 2 })
		);
		assert_eq!(
			InsertVertexOperation::new(DVec2::X).execute(&ring, &edge(&[usize::MAX])),
			Err(GeometryOperationError::IndexOutOfBounds { index: usize::MAX, len: 3 })
		);
	}

	#[test]
	fn rejects_geometry_indices() {
		let mut operation = InsertVertexOperation::new(DVec2::ONE);

		assert_eq!(
			operation.execute(&ring(), &GeometryIndex::new(GeometryIndexType::Geometry, vec![0])),
			Err(GeometryOperationError::UnsupportedIndexType {
				index_type: GeometryIndexType::Geometry,
				geometry_type: GeometryType::LinearRing,
			})
		);
		assert_eq!(operation.geometry_index(), None);
		assert_eq!(operation.inverse_operation(), None);
	}

	#[test]
	fn rejects_vertex_indices_on_polygon_level() {
		let polygon = Geometry::Polygon(vec![ring()]);
		assert_eq!(
			InsertVertexOperation::new(DVec2::ONE).execute(&polygon, &vertex(&[0])),
			Err(GeometryOperationError::UnsupportedIndexType {
				index_type: GeometryIndexType::Vertex,
				geometry_type: GeometryType::Polygon,
			})
		);
	}

	#[test]
	fn rejects_unclosed_rings() {
		let unclosed = Geometry::LinearRing(vec![DVec2::ZERO, DVec2::ONE, DVec2::X]);
		assert_eq!(InsertVertexOperation::new(DVec2::Y).execute(&unclosed, &vertex(&[1])), Err(GeometryOperationError::UnclosedRing { len: 3 }));
	}
}
