use super::{DeleteGeometryOperation, GeometryIndexOperation, Operation, check_index};
use crate::error::GeometryOperationError;
use crate::geometry::Geometry;
use crate::index::{GeometryIndex, GeometryIndexType};
use crate::index_service::{composite_children, modify};

/// Inserts a child geometry into a composite at a geometry index.
///
/// The child must have the type its new parent requires: rings go into polygons, points into multi-points, line
/// strings into multi-line-strings and polygons into multi-polygons. Deeper indices reach nested composites, so
/// `[2, 1]` on a multi-polygon inserts a ring at position 1 of the third polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertGeometryOperation {
	geometry: Geometry,
	index: Option<GeometryIndex>,
}

impl InsertGeometryOperation {
	pub fn new(geometry: Geometry) -> Self {
		Self { geometry, index: None }
	}

	/// The child geometry this operation inserts.
	pub fn geometry(&self) -> &Geometry {
		&self.geometry
	}

	fn apply(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError> {
		check_index(geometry, index, &[GeometryIndexType::Geometry])?;

		modify(geometry, index.path(), |parent, value| {
			let children = composite_children(parent, index.index_type())?;

			let parent_type = parent.geometry_type();
			let expected = parent_type.child_type().ok_or(GeometryOperationError::NotAComposite { geometry_type: parent_type })?;
			if self.geometry.geometry_type() != expected {
				return Err(GeometryOperationError::IncompatibleGeometry {
					expected,
					found: self.geometry.geometry_type(),
				});
			}
			if value > children.len() {
				return Err(GeometryOperationError::IndexOutOfBounds { index: value, len: children.len() });
			}

			let mut inserted = children.to_vec();
			inserted.insert(value, self.geometry.clone());
			parent.with_geometries(inserted)
		})
	}
}

impl GeometryIndexOperation for InsertGeometryOperation {
	fn execute(&mut self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError> {
		let edited = self.apply(geometry, index).inspect_err(|error| log::debug!("Could not insert a geometry at {index}: {error}"))?;
		log::trace!("Inserted a {} at {index}", self.geometry.geometry_type());

		self.index = Some(index.clone());
		Ok(edited)
	}

	fn inverse_operation(&self) -> Option<Operation> {
		self.index.as_ref().map(|_| DeleteGeometryOperation::new().into())
	}

	fn geometry_index(&self) -> Option<&GeometryIndex> {
		self.index.as_ref()
	}
}
