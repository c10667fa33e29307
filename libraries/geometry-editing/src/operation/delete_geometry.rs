use super::{GeometryIndexOperation, InsertGeometryOperation, Operation, check_index};
use crate::error::GeometryOperationError;
use crate::geometry::Geometry;
use crate::index::{GeometryIndex, GeometryIndexType};
use crate::index_service::{composite_children, modify};

/// Removes the child geometry at a geometry index, keeping the remaining children in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteGeometryOperation {
	deleted: Option<(GeometryIndex, Geometry)>,
}

impl DeleteGeometryOperation {
	pub fn new() -> Self {
		Self::default()
	}

	/// The child removed by the last successful execution.
	pub fn deleted_geometry(&self) -> Option<&Geometry> {
		self.deleted.as_ref().map(|(_, geometry)| geometry)
	}

	fn apply(&self, geometry: &Geometry, index: &GeometryIndex) -> Result<(Geometry, Geometry), GeometryOperationError> {
		check_index(geometry, index, &[GeometryIndexType::Geometry])?;

		let mut deleted = None;
		let edited = modify(geometry, index.path(), |parent, value| {
			let children = composite_children(parent, index.index_type())?;
			if value >= children.len() {
				return Err(GeometryOperationError::IndexOutOfBounds { index: value, len: children.len() });
			}

			let mut remaining = children.to_vec();
			deleted = Some(remaining.remove(value));
			parent.with_geometries(remaining)
		})?;

		let deleted = deleted.ok_or(GeometryOperationError::EmptyPath)?;
		Ok((edited, deleted))
	}
}

impl GeometryIndexOperation for DeleteGeometryOperation {
	fn execute(&mut self, geometry: &Geometry, index: &GeometryIndex) -> Result<Geometry, GeometryOperationError> {
		let (edited, deleted) = self.apply(geometry, index).inspect_err(|error| log::debug!("Could not delete the geometry at {index}: {error}"))?;
		log::trace!("Deleted a {} at {index}", deleted.geometry_type());

		self.deleted = Some((index.clone(), deleted));
		Ok(edited)
	}

	fn inverse_operation(&self) -> Option<Operation> {
		self.deleted_geometry().map(|geometry| InsertGeometryOperation::new(geometry.clone()).into())
	}

	fn geometry_index(&self) -> Option<&GeometryIndex> {
		self.deleted.as_ref().map(|(index, _)| index)
	}
}
