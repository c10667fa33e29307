//! Indexed addressing and exactly reversible edits for nested vector geometries.
//!
//! A [`GeometryIndex`] names a vertex, an edge or a sub-geometry anywhere inside a [`Geometry`] tree.
//! Each [`Operation`] applies one primitive edit at such an index and returns a new geometry, leaving
//! its input untouched. After a successful execution the operation can hand out its inverse, which
//! undoes the edit when executed on the result at [`GeometryIndexOperation::geometry_index`].
//!
//! ```
//! use geometry_editing::*;
//! use glam::DVec2;
//!
//! let service = GeometryIndexService;
//! let ring = Geometry::linear_ring(vec![DVec2::new(1., 1.), DVec2::new(2., 2.), DVec2::new(3., 3.), DVec2::new(1., 1.)]);
//!
//! let mut operation = DeleteVertexOperation::new();
//! let edited = operation.execute(&ring, &service.create(GeometryIndexType::Vertex, &[0])).unwrap();
//! assert_eq!(edited.coordinates().unwrap(), &[DVec2::new(2., 2.), DVec2::new(3., 3.), DVec2::new(2., 2.)]);
//!
//! let mut inverse = operation.inverse_operation().unwrap();
//! let restored = inverse.execute(&edited, operation.geometry_index().unwrap()).unwrap();
//! assert_eq!(restored, ring);
//! ```

pub mod consts;
pub mod error;
pub mod geometry;
pub mod index;
pub mod index_service;
pub mod operation;

pub use error::{GeometryOperationError, ParseGeometryIndexError};
pub use geometry::{Coordinate, Geometry, GeometryType};
pub use index::{GeometryIndex, GeometryIndexType};
pub use index_service::GeometryIndexService;
pub use operation::{DeleteGeometryOperation, DeleteVertexOperation, GeometryIndexOperation, InsertGeometryOperation, InsertVertexOperation, MoveVertexOperation, Operation};
