use crate::consts::MAX_INDEX_DEPTH;
use crate::error::GeometryOperationError;
use crate::geometry::{Coordinate, Geometry, GeometryType};
use crate::index::{GeometryIndex, GeometryIndexType};

/// Builds geometry indices and answers questions about what they address inside a concrete geometry.
///
/// The service holds no state, every query is a pure function of its arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeometryIndexService;

impl GeometryIndexService {
	/// Creates an index without looking at any geometry. Validation happens when the index is used.
	pub fn create(&self, index_type: GeometryIndexType, path: &[usize]) -> GeometryIndex {
		GeometryIndex::new(index_type, path.to_vec())
	}

	/// Extends a geometry index further down the tree, giving the result a new index type.
	///
	/// Returns `None` if `index` is a vertex or edge index, which have nothing below them.
	pub fn add_children(&self, index: &GeometryIndex, index_type: GeometryIndexType, values: &[usize]) -> Option<GeometryIndex> {
		if index.index_type() != GeometryIndexType::Geometry {
			return None;
		}
		let path = index.path().iter().chain(values).copied().collect();
		Some(GeometryIndex::new(index_type, path))
	}

	/// The geometry index one level up, or `None` for indices at the top level.
	pub fn parent(&self, index: &GeometryIndex) -> Option<GeometryIndex> {
		let parent_path = index.parent_path();
		(!parent_path.is_empty()).then(|| GeometryIndex::new(GeometryIndexType::Geometry, parent_path.to_vec()))
	}

	pub fn value(&self, index: &GeometryIndex) -> Option<usize> {
		index.value()
	}

	pub fn index_type(&self, index: &GeometryIndex) -> GeometryIndexType {
		index.index_type()
	}

	pub fn is_vertex(&self, index: &GeometryIndex) -> bool {
		index.index_type() == GeometryIndexType::Vertex
	}

	pub fn is_edge(&self, index: &GeometryIndex) -> bool {
		index.index_type() == GeometryIndexType::Edge
	}

	pub fn is_geometry(&self, index: &GeometryIndex) -> bool {
		index.index_type() == GeometryIndexType::Geometry
	}

	/// Whether `child` lies strictly below the geometry addressed by `parent`.
	pub fn is_child_of(&self, parent: &GeometryIndex, child: &GeometryIndex) -> bool {
		parent.index_type() == GeometryIndexType::Geometry && child.path().len() > parent.path().len() && child.path().starts_with(parent.path())
	}

	/// Borrows the sub-geometry a geometry index points to.
	pub fn geometry<'a>(&self, geometry: &'a Geometry, index: &GeometryIndex) -> Result<&'a Geometry, GeometryOperationError> {
		let (parent, value) = locate(geometry, index)?;
		let children = composite_children(parent, index.index_type())?;
		children.get(value).ok_or(GeometryOperationError::IndexOutOfBounds { index: value, len: children.len() })
	}

	/// The coordinate a vertex index points to.
	pub fn vertex(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<Coordinate, GeometryOperationError> {
		expect_index_type(geometry, index, &[GeometryIndexType::Vertex])?;
		let (coordinates, value) = leaf_position(geometry, index)?;
		coordinates.get(value).copied().ok_or(GeometryOperationError::IndexOutOfBounds { index: value, len: coordinates.len() })
	}

	/// The start and end coordinates of the segment an edge index points to.
	pub fn edge(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<[Coordinate; 2], GeometryOperationError> {
		expect_index_type(geometry, index, &[GeometryIndexType::Edge])?;
		let (coordinates, value) = leaf_position(geometry, index)?;
		match value.checked_add(2).and_then(|end| coordinates.get(value..end)) {
			Some(&[start, end]) => Ok([start, end]),
			_ => Err(GeometryOperationError::IndexOutOfBounds { index: value, len: coordinates.len().saturating_sub(1) }),
		}
	}

	/// The type of the addressed geometry, or for vertex and edge indices the type of the geometry holding them.
	pub fn geometry_type(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<GeometryType, GeometryOperationError> {
		match index.index_type() {
			GeometryIndexType::Geometry => self.geometry(geometry, index).map(Geometry::geometry_type),
			GeometryIndexType::Vertex | GeometryIndexType::Edge => {
				let (parent, _) = locate(geometry, index)?;
				leaf_coordinates(parent, index.index_type())?;
				Ok(parent.geometry_type())
			}
		}
	}

	/// The whole coordinate sequence a vertex or edge index lives in.
	pub fn sibling_vertices<'a>(&self, geometry: &'a Geometry, index: &GeometryIndex) -> Result<&'a [Coordinate], GeometryOperationError> {
		let (parent, _) = locate(geometry, index)?;
		leaf_coordinates(parent, index.index_type())
	}

	/// The edges that touch a vertex, the preceding edge first.
	///
	/// A ring's first and last coordinates are the same point, so both of them touch the ring's first and last edges.
	pub fn adjacent_edges(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<Vec<GeometryIndex>, GeometryOperationError> {
		self.vertex(geometry, index)?;
		let (parent, value) = locate(geometry, index)?;
		let len = parent.coordinates().map_or(0, <[Coordinate]>::len);
		let last_edge = len.saturating_sub(2);

		let (previous, next) = match parent.geometry_type() {
			GeometryType::LinearRing if len >= 2 && (value == 0 || value == len - 1) => (Some(last_edge), Some(0)),
			_ => (value.checked_sub(1), (value + 1 < len).then_some(value)),
		};

		let mut edges = Vec::with_capacity(2);
		for edge in [previous, next].into_iter().flatten() {
			let edge = index.with_value(GeometryIndexType::Edge, edge);
			if !edges.contains(&edge) {
				edges.push(edge);
			}
		}
		Ok(edges)
	}

	/// The vertices at both ends of an edge.
	pub fn adjacent_vertices(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<[GeometryIndex; 2], GeometryOperationError> {
		self.edge(geometry, index)?;
		let value = index.value().ok_or(GeometryOperationError::EmptyPath)?;
		Ok([index.with_value(GeometryIndexType::Vertex, value), index.with_value(GeometryIndexType::Vertex, value + 1)])
	}

	/// The vertex index after this one in the same coordinate sequence. The geometry is not consulted, so the result may not exist.
	pub fn next_vertex(&self, index: &GeometryIndex) -> Option<GeometryIndex> {
		let value = index.value()?.checked_add(1)?;
		(index.index_type() == GeometryIndexType::Vertex).then(|| index.with_value(GeometryIndexType::Vertex, value))
	}

	/// The vertex index before this one in the same coordinate sequence, `None` for the first coordinate.
	pub fn previous_vertex(&self, index: &GeometryIndex) -> Option<GeometryIndex> {
		let value = index.value()?.checked_sub(1)?;
		(index.index_type() == GeometryIndexType::Vertex).then(|| index.with_value(GeometryIndexType::Vertex, value))
	}

	/// Checks that the index names an existing vertex, edge or geometry inside `geometry`.
	pub fn validate(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<(), GeometryOperationError> {
		match index.index_type() {
			GeometryIndexType::Geometry => self.geometry(geometry, index).map(|_| ()),
			GeometryIndexType::Edge => self.edge(geometry, index).map(|_| ()),
			GeometryIndexType::Vertex => self.vertex(geometry, index).map(|_| ()),
		}
	}
}

/// Rejects paths that cannot address anything before any geometry is inspected.
pub(crate) fn check_depth(path: &[usize]) -> Result<(), GeometryOperationError> {
	match path.len() {
		0 => Err(GeometryOperationError::EmptyPath),
		depth if depth > MAX_INDEX_DEPTH => Err(GeometryOperationError::PathTooDeep { depth }),
		_ => Ok(()),
	}
}

/// Follows every path element but the last, returning the geometry that holds the last element and the last element itself.
pub(crate) fn locate<'a>(geometry: &'a Geometry, index: &GeometryIndex) -> Result<(&'a Geometry, usize), GeometryOperationError> {
	check_depth(index.path())?;

	let mut current = geometry;
	let mut remaining = index.path();
	while let [child_index, rest @ ..] = remaining {
		if rest.is_empty() {
			return Ok((current, *child_index));
		}
		current = child(current, *child_index, rest.len())?;
		remaining = rest;
	}
	Err(GeometryOperationError::EmptyPath)
}

/// Rebuilds `geometry` with the node that holds the last path element replaced by the result of `edit`.
///
/// Every composite on the way down is copied with one child swapped, the input is never modified. `edit` receives the
/// holding node and the last path element and decides for itself whether the index type fits that node.
pub(crate) fn modify<F>(geometry: &Geometry, path: &[usize], edit: F) -> Result<Geometry, GeometryOperationError>
where
	F: FnOnce(&Geometry, usize) -> Result<Geometry, GeometryOperationError>,
{
	match path {
		[] => Err(GeometryOperationError::EmptyPath),
		[value] => edit(geometry, *value),
		[child_index, rest @ ..] => {
			let edited = modify(child(geometry, *child_index, rest.len())?, rest, edit)?;

			let mut geometries = geometry.geometries().map(<[Geometry]>::to_vec).unwrap_or_default();
			geometries[*child_index] = edited;
			geometry.with_geometries(geometries)
		}
	}
}

fn child(geometry: &Geometry, child_index: usize, remaining: usize) -> Result<&Geometry, GeometryOperationError> {
	let children = geometry.geometries().ok_or(GeometryOperationError::DepthMismatch {
		geometry_type: geometry.geometry_type(),
		remaining,
	})?;
	children.get(child_index).ok_or(GeometryOperationError::IndexOutOfBounds {
		index: child_index,
		len: children.len(),
	})
}

/// The coordinates of the geometry a vertex or edge index ends in.
pub(crate) fn leaf_coordinates(geometry: &Geometry, index_type: GeometryIndexType) -> Result<&[Coordinate], GeometryOperationError> {
	match (index_type, geometry.coordinates()) {
		(GeometryIndexType::Vertex | GeometryIndexType::Edge, Some(coordinates)) => Ok(coordinates),
		_ => Err(GeometryOperationError::UnsupportedIndexType {
			index_type,
			geometry_type: geometry.geometry_type(),
		}),
	}
}

/// The children of the composite a geometry index ends in.
pub(crate) fn composite_children(geometry: &Geometry, index_type: GeometryIndexType) -> Result<&[Geometry], GeometryOperationError> {
	match (index_type, geometry.geometries()) {
		(GeometryIndexType::Geometry, Some(geometries)) => Ok(geometries),
		_ => Err(GeometryOperationError::UnsupportedIndexType {
			index_type,
			geometry_type: geometry.geometry_type(),
		}),
	}
}

/// Rejects an index whose type is not among `accepted`, naming the geometry the index ends in when it can be found.
pub(crate) fn expect_index_type(geometry: &Geometry, index: &GeometryIndex, accepted: &[GeometryIndexType]) -> Result<(), GeometryOperationError> {
	if accepted.contains(&index.index_type()) {
		return Ok(());
	}
	let geometry_type = locate(geometry, index).map_or(geometry.geometry_type(), |(parent, _)| parent.geometry_type());
	Err(GeometryOperationError::UnsupportedIndexType {
		index_type: index.index_type(),
		geometry_type,
	})
}

fn leaf_position<'a>(geometry: &'a Geometry, index: &GeometryIndex) -> Result<(&'a [Coordinate], usize), GeometryOperationError> {
	let (parent, value) = locate(geometry, index)?;
	Ok((leaf_coordinates(parent, index.index_type())?, value))
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::DVec2;

	const SERVICE: GeometryIndexService = GeometryIndexService;

	fn polygon() -> Geometry {
		Geometry::polygon(
			vec![DVec2::new(0., 0.), DVec2::new(10., 0.), DVec2::new(10., 10.), DVec2::new(0., 10.), DVec2::new(0., 0.)],
			vec![vec![DVec2::new(4., 4.), DVec2::new(6., 4.), DVec2::new(6., 6.), DVec2::new(4., 6.), DVec2::new(4., 4.)]],
		)
	}

	fn multi_polygon() -> Geometry {
		Geometry::multi_polygon(vec![polygon(), Geometry::polygon(vec![DVec2::new(20., 20.), DVec2::new(30., 20.), DVec2::new(30., 30.), DVec2::new(20., 20.)], vec![])]).unwrap()
	}

	#[test]
	fn create_does_not_validate() {
		let index = SERVICE.create(GeometryIndexType::Vertex, &[7, 7, 7, 7]);
		assert_eq!(index.path(), &[7, 7, 7, 7]);
		assert_eq!(SERVICE.validate(&polygon(), &index), Err(GeometryOperationError::PathTooDeep { depth: 4 }));
	}

	#[test]
	fn navigating_indices() {
		let ring = SERVICE.create(GeometryIndexType::Geometry, &[1]);
		let vertex = SERVICE.add_children(&ring, GeometryIndexType::Vertex, &[3]).unwrap();

		assert_eq!(vertex, SERVICE.create(GeometryIndexType::Vertex, &[1, 3]));
		assert_eq!(SERVICE.parent(&vertex), Some(ring.clone()));
		assert_eq!(SERVICE.parent(&ring), None);
		assert_eq!(SERVICE.add_children(&vertex, GeometryIndexType::Vertex, &[0]), None);
		assert!(SERVICE.is_child_of(&ring, &vertex));
		assert!(!SERVICE.is_child_of(&vertex, &ring));
		assert!(!SERVICE.is_child_of(&ring, &ring));
		assert_eq!(SERVICE.value(&vertex), Some(3));
		assert!(SERVICE.is_vertex(&vertex) && SERVICE.is_geometry(&ring) && !SERVICE.is_edge(&ring));
	}

	#[test]
	fn next_and_previous_vertex() {
		let vertex = SERVICE.create(GeometryIndexType::Vertex, &[0, 1]);
		assert_eq!(SERVICE.next_vertex(&vertex), Some(SERVICE.create(GeometryIndexType::Vertex, &[0, 2])));
		assert_eq!(SERVICE.previous_vertex(&vertex), Some(SERVICE.create(GeometryIndexType::Vertex, &[0, 0])));
		assert_eq!(SERVICE.previous_vertex(&SERVICE.create(GeometryIndexType::Vertex, &[0, 0])), None);
		assert_eq!(SERVICE.next_vertex(&SERVICE.create(GeometryIndexType::Edge, &[0, 0])), None);
	}

	#[test]
	fn lookups_in_a_multi_polygon() {
		let geometry = multi_polygon();

		let hole = SERVICE.geometry(&geometry, &SERVICE.create(GeometryIndexType::Geometry, &[0, 1])).unwrap();
		assert_eq!(hole.geometry_type(), GeometryType::LinearRing);

		assert_eq!(SERVICE.vertex(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[1, 0, 1])), Ok(DVec2::new(30., 20.)));
		assert_eq!(SERVICE.edge(&geometry, &SERVICE.create(GeometryIndexType::Edge, &[0, 1, 0])), Ok([DVec2::new(4., 4.), DVec2::new(6., 4.)]));
		assert_eq!(SERVICE.geometry_type(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[0, 0, 2])), Ok(GeometryType::LinearRing));
		assert_eq!(SERVICE.geometry_type(&geometry, &SERVICE.create(GeometryIndexType::Geometry, &[1])), Ok(GeometryType::Polygon));
		assert_eq!(SERVICE.sibling_vertices(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[1, 0, 0])).map(<[Coordinate]>::len), Ok(4));
	}

	#[test]
	fn largest_indices_are_out_of_range() {
		let line = Geometry::line_string(vec![DVec2::ZERO, DVec2::ONE]);
		let edge: GeometryIndex = format!("edge{}", usize::MAX).parse().unwrap();
		let vertex = SERVICE.create(GeometryIndexType::Vertex, &[usize::MAX]);
		let out_of_range = |len| GeometryOperationError::IndexOutOfBounds { index: usize::MAX, len };

		assert_eq!(SERVICE.edge(&line, &edge), Err(out_of_range(1)));
		assert_eq!(SERVICE.validate(&line, &edge), Err(out_of_range(1)));
		assert_eq!(SERVICE.adjacent_vertices(&line, &edge), Err(out_of_range(1)));
		assert_eq!(SERVICE.vertex(&line, &vertex), Err(out_of_range(2)));
		assert_eq!(SERVICE.adjacent_edges(&line, &vertex), Err(out_of_range(2)));
		assert_eq!(SERVICE.next_vertex(&vertex), None);
	}

	#[test]
	fn lookup_failures() {
		let geometry = polygon();

		assert_eq!(
			SERVICE.vertex(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[2, 0])),
			Err(GeometryOperationError::IndexOutOfBounds { index: 2, len: 2 })
		);
		assert_eq!(
			SERVICE.vertex(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[0])),
			Err(GeometryOperationError::UnsupportedIndexType {
				index_type: GeometryIndexType::Vertex,
				geometry_type: GeometryType::Polygon,
			})
		);
		assert_eq!(
			SERVICE.vertex(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[0, 0, 0])),
			Err(GeometryOperationError::DepthMismatch {
				geometry_type: GeometryType::LinearRing,
				remaining: 1,
			})
		);
		assert_eq!(
			SERVICE.edge(&geometry, &SERVICE.create(GeometryIndexType::Edge, &[0, 4])),
			Err(GeometryOperationError::IndexOutOfBounds { index: 4, len: 4 })
		);
		assert_eq!(
			SERVICE.geometry(&geometry, &SERVICE.create(GeometryIndexType::Geometry, &[0, 0])),
			Err(GeometryOperationError::UnsupportedIndexType {
				index_type: GeometryIndexType::Geometry,
				geometry_type: GeometryType::LinearRing,
			})
		);
		assert_eq!(SERVICE.validate(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[])), Err(GeometryOperationError::EmptyPath));
	}

	#[test]
	fn adjacency_wraps_around_rings() {
		let geometry = polygon();
		let edge = |value| SERVICE.create(GeometryIndexType::Edge, &[0, value]);

		assert_eq!(SERVICE.adjacent_edges(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[0, 0])), Ok(vec![edge(3), edge(0)]));
		assert_eq!(SERVICE.adjacent_edges(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[0, 4])), Ok(vec![edge(3), edge(0)]));
		assert_eq!(SERVICE.adjacent_edges(&geometry, &SERVICE.create(GeometryIndexType::Vertex, &[0, 2])), Ok(vec![edge(1), edge(2)]));
		assert_eq!(
			SERVICE.adjacent_vertices(&geometry, &edge(3)),
			Ok([SERVICE.create(GeometryIndexType::Vertex, &[0, 3]), SERVICE.create(GeometryIndexType::Vertex, &[0, 4])])
		);
	}

	#[test]
	fn adjacency_on_open_line_strings() {
		let line = Geometry::line_string(vec![DVec2::ZERO, DVec2::X, DVec2::ONE]);
		let edge = |value| SERVICE.create(GeometryIndexType::Edge, &[value]);

		assert_eq!(SERVICE.adjacent_edges(&line, &SERVICE.create(GeometryIndexType::Vertex, &[0])), Ok(vec![edge(0)]));
		assert_eq!(SERVICE.adjacent_edges(&line, &SERVICE.create(GeometryIndexType::Vertex, &[2])), Ok(vec![edge(1)]));
		assert_eq!(SERVICE.adjacent_edges(&Geometry::point(DVec2::ONE), &SERVICE.create(GeometryIndexType::Vertex, &[0])), Ok(vec![]));
	}

	#[test]
	fn modify_copies_the_path_down() {
		let geometry = multi_polygon();
		let edited = modify(&geometry, &[1, 0, 0], |ring, _| ring.with_coordinates(vec![])).unwrap();

		assert_eq!(edited.geometries().unwrap()[0], geometry.geometries().unwrap()[0]);
		assert!(edited.geometries().unwrap()[1].exterior_ring().unwrap().is_empty());
		assert!(!geometry.geometries().unwrap()[1].exterior_ring().unwrap().is_empty());
	}
}
