use crate::error::GeometryOperationError;

use glam::DVec2;
use std::fmt;

/// A single (x, y) position, the atomic unit every leaf geometry holds a sequence of.
pub type Coordinate = DVec2;

/// The type tag of a [`Geometry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryType {
	Point,
	LineString,
	LinearRing,
	Polygon,
	MultiPoint,
	MultiLineString,
	MultiPolygon,
}

impl GeometryType {
	/// Whether geometries of this type own child geometries rather than coordinates.
	pub fn is_composite(self) -> bool {
		self.child_type().is_some()
	}

	/// The only type of child a composite of this type accepts, or `None` for leaf types.
	pub fn child_type(self) -> Option<GeometryType> {
		match self {
			GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing => None,
			GeometryType::Polygon => Some(GeometryType::LinearRing),
			GeometryType::MultiPoint => Some(GeometryType::Point),
			GeometryType::MultiLineString => Some(GeometryType::LineString),
			GeometryType::MultiPolygon => Some(GeometryType::Polygon),
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			GeometryType::Point => "Point",
			GeometryType::LineString => "LineString",
			GeometryType::LinearRing => "LinearRing",
			GeometryType::Polygon => "Polygon",
			GeometryType::MultiPoint => "MultiPoint",
			GeometryType::MultiLineString => "MultiLineString",
			GeometryType::MultiPolygon => "MultiPolygon",
		}
	}
}

impl fmt::Display for GeometryType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A hierarchical vector geometry.
///
/// Leaf variants own a coordinate sequence and composite variants own a sequence of child geometries.
/// An empty sequence stands for an empty geometry. A polygon's child at position 0 is its exterior ring (the shell)
/// and every further child is an interior ring (a hole).
///
/// Geometries are treated as values: the edit operations build new geometries instead of mutating their input.
/// The variants are public so that malformed geometries can still be represented, the operations guard against them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
	Point(Vec<Coordinate>),
	LineString(Vec<Coordinate>),
	LinearRing(Vec<Coordinate>),
	Polygon(Vec<Geometry>),
	MultiPoint(Vec<Geometry>),
	MultiLineString(Vec<Geometry>),
	MultiPolygon(Vec<Geometry>),
}

impl Geometry {
	/// Creates a geometry of the given type without any coordinates or children.
	pub fn empty(geometry_type: GeometryType) -> Self {
		match geometry_type {
			GeometryType::Point => Geometry::Point(Vec::new()),
			GeometryType::LineString => Geometry::LineString(Vec::new()),
			GeometryType::LinearRing => Geometry::LinearRing(Vec::new()),
			GeometryType::Polygon => Geometry::Polygon(Vec::new()),
			GeometryType::MultiPoint => Geometry::MultiPoint(Vec::new()),
			GeometryType::MultiLineString => Geometry::MultiLineString(Vec::new()),
			GeometryType::MultiPolygon => Geometry::MultiPolygon(Vec::new()),
		}
	}

	pub fn point(coordinate: Coordinate) -> Self {
		Geometry::Point(vec![coordinate])
	}

	pub fn line_string(coordinates: Vec<Coordinate>) -> Self {
		Geometry::LineString(coordinates)
	}

	/// Creates a ring from an already closed coordinate sequence (first coordinate repeated at the end).
	pub fn linear_ring(coordinates: Vec<Coordinate>) -> Self {
		Geometry::LinearRing(coordinates)
	}

	/// Creates a polygon from the closed coordinate sequences of its shell and holes.
	pub fn polygon(shell: Vec<Coordinate>, holes: Vec<Vec<Coordinate>>) -> Self {
		let rings = std::iter::once(shell).chain(holes).map(Geometry::LinearRing).collect();
		Geometry::Polygon(rings)
	}

	pub fn multi_point(coordinates: Vec<Coordinate>) -> Self {
		Geometry::MultiPoint(coordinates.into_iter().map(Geometry::point).collect())
	}

	pub fn multi_line_string(lines: Vec<Vec<Coordinate>>) -> Self {
		Geometry::MultiLineString(lines.into_iter().map(Geometry::LineString).collect())
	}

	/// Creates a multi-polygon, failing if any of the given geometries is not a polygon.
	pub fn multi_polygon(polygons: Vec<Geometry>) -> Result<Self, GeometryOperationError> {
		Self::from_geometries(GeometryType::MultiPolygon, polygons)
	}

	/// Builds a leaf geometry from a coordinate sequence, checking the structural invariants of its type.
	///
	/// A point holds at most one coordinate. A non-empty ring must be closed, meaning it has at least two coordinates
	/// and its first and last coordinates are equal. Fewer than four coordinates are accepted, since rings pass
	/// through such shapes while they are being edited.
	pub fn from_coordinates(geometry_type: GeometryType, coordinates: Vec<Coordinate>) -> Result<Self, GeometryOperationError> {
		match geometry_type {
			GeometryType::Point if coordinates.len() > 1 => Err(GeometryOperationError::MalformedPoint { len: coordinates.len() }),
			GeometryType::LinearRing if !is_closed(&coordinates) => Err(GeometryOperationError::UnclosedRing { len: coordinates.len() }),
			_ if geometry_type.is_composite() => Err(GeometryOperationError::NotALeaf { geometry_type }),
			_ => Self::empty(geometry_type).with_coordinates(coordinates),
		}
	}

	/// Builds a composite geometry, checking that every child has the type the composite requires.
	pub fn from_geometries(geometry_type: GeometryType, geometries: Vec<Geometry>) -> Result<Self, GeometryOperationError> {
		let Some(expected) = geometry_type.child_type() else {
			return Err(GeometryOperationError::NotAComposite { geometry_type });
		};
		if let Some(child) = geometries.iter().find(|child| child.geometry_type() != expected) {
			return Err(GeometryOperationError::IncompatibleGeometry {
				expected,
				found: child.geometry_type(),
			});
		}
		Self::empty(geometry_type).with_geometries(geometries)
	}

	pub fn geometry_type(&self) -> GeometryType {
		match self {
			Geometry::Point(_) => GeometryType::Point,
			Geometry::LineString(_) => GeometryType::LineString,
			Geometry::LinearRing(_) => GeometryType::LinearRing,
			Geometry::Polygon(_) => GeometryType::Polygon,
			Geometry::MultiPoint(_) => GeometryType::MultiPoint,
			Geometry::MultiLineString(_) => GeometryType::MultiLineString,
			Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
		}
	}

	/// The coordinate sequence of a leaf geometry, or `None` for composites.
	pub fn coordinates(&self) -> Option<&[Coordinate]> {
		match self {
			Geometry::Point(coordinates) | Geometry::LineString(coordinates) | Geometry::LinearRing(coordinates) => Some(coordinates),
			Geometry::Polygon(_) | Geometry::MultiPoint(_) | Geometry::MultiLineString(_) | Geometry::MultiPolygon(_) => None,
		}
	}

	/// The child geometries of a composite geometry, or `None` for leaves.
	pub fn geometries(&self) -> Option<&[Geometry]> {
		match self {
			Geometry::Point(_) | Geometry::LineString(_) | Geometry::LinearRing(_) => None,
			Geometry::Polygon(geometries) | Geometry::MultiPoint(geometries) | Geometry::MultiLineString(geometries) | Geometry::MultiPolygon(geometries) => Some(geometries),
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Geometry::Point(coordinates) | Geometry::LineString(coordinates) | Geometry::LinearRing(coordinates) => coordinates.is_empty(),
			Geometry::Polygon(geometries) | Geometry::MultiPoint(geometries) | Geometry::MultiLineString(geometries) | Geometry::MultiPolygon(geometries) => geometries.iter().all(Geometry::is_empty),
		}
	}

	/// The total number of coordinates in this geometry and all of its descendants.
	pub fn num_points(&self) -> usize {
		match (self.coordinates(), self.geometries()) {
			(Some(coordinates), _) => coordinates.len(),
			(_, Some(geometries)) => geometries.iter().map(Geometry::num_points).sum(),
			(None, None) => 0,
		}
	}

	/// The number of direct children, which is zero for leaves.
	pub fn num_geometries(&self) -> usize {
		self.geometries().map_or(0, <[Geometry]>::len)
	}

	/// The shell of a polygon.
	pub fn exterior_ring(&self) -> Option<&Geometry> {
		match self {
			Geometry::Polygon(rings) => rings.first(),
			_ => None,
		}
	}

	/// The `n`th hole of a polygon, counting from zero.
	pub fn interior_ring(&self, n: usize) -> Option<&Geometry> {
		match self {
			Geometry::Polygon(rings) => n.checked_add(1).and_then(|n| rings.get(n)),
			_ => None,
		}
	}

	pub fn num_interior_rings(&self) -> usize {
		match self {
			Geometry::Polygon(rings) => rings.len().saturating_sub(1),
			_ => 0,
		}
	}

	/// A copy of this leaf with its coordinates replaced.
	pub(crate) fn with_coordinates(&self, coordinates: Vec<Coordinate>) -> Result<Geometry, GeometryOperationError> {
		match self {
			Geometry::Point(_) => Ok(Geometry::Point(coordinates)),
			Geometry::LineString(_) => Ok(Geometry::LineString(coordinates)),
			Geometry::LinearRing(_) => Ok(Geometry::LinearRing(coordinates)),
			Geometry::Polygon(_) | Geometry::MultiPoint(_) | Geometry::MultiLineString(_) | Geometry::MultiPolygon(_) => Err(GeometryOperationError::NotALeaf { geometry_type: self.geometry_type() }),
		}
	}

	/// A copy of this composite with its children replaced.
	pub(crate) fn with_geometries(&self, geometries: Vec<Geometry>) -> Result<Geometry, GeometryOperationError> {
		match self {
			Geometry::Point(_) | Geometry::LineString(_) | Geometry::LinearRing(_) => Err(GeometryOperationError::NotAComposite { geometry_type: self.geometry_type() }),
			Geometry::Polygon(_) => Ok(Geometry::Polygon(geometries)),
			Geometry::MultiPoint(_) => Ok(Geometry::MultiPoint(geometries)),
			Geometry::MultiLineString(_) => Ok(Geometry::MultiLineString(geometries)),
			Geometry::MultiPolygon(_) => Ok(Geometry::MultiPolygon(geometries)),
		}
	}
}

/// Whether a ring's coordinate sequence is empty or closed.
pub(crate) fn is_closed(coordinates: &[Coordinate]) -> bool {
	match coordinates {
		[] => true,
		[_] => false,
		[first, .., last] => first == last,
	}
}
