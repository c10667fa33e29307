use criterion::{Criterion, criterion_group, criterion_main};
use geometry_editing::*;
use glam::DVec2;
use std::hint::black_box;

const SERVICE: GeometryIndexService = GeometryIndexService;

/// A multi-polygon of `polygons` circles with `vertices` coordinates each, every circle holding one hole.
fn multi_polygon(polygons: usize, vertices: usize) -> Geometry {
	let ring = |center: DVec2, radius: f64| {
		let mut coordinates: Vec<_> = (0..vertices).map(|i| center + DVec2::from_angle(i as f64 / vertices as f64 * std::f64::consts::TAU) * radius).collect();
		coordinates.push(coordinates[0]);
		coordinates
	};
	let polygons = (0..polygons).map(|i| {
		let center = DVec2::new(i as f64 * 100., 0.);
		Geometry::polygon(ring(center, 40.), vec![ring(center, 10.)])
	});
	Geometry::multi_polygon(polygons.collect()).unwrap()
}

fn vertex_operations(c: &mut Criterion) {
	let geometry = multi_polygon(64, 256);
	let last_vertex = SERVICE.create(GeometryIndexType::Vertex, &[63, 0, 256]);
	let middle_edge = SERVICE.create(GeometryIndexType::Edge, &[32, 1, 128]);

	c.bench_function("move closing vertex", |b| {
		b.iter(|| MoveVertexOperation::new(DVec2::ONE).execute(black_box(&geometry), black_box(&last_vertex)).unwrap())
	});
	c.bench_function("insert vertex on edge", |b| {
		b.iter(|| InsertVertexOperation::new(DVec2::ONE).execute(black_box(&geometry), black_box(&middle_edge)).unwrap())
	});
	c.bench_function("delete and undo closing vertex", |b| {
		b.iter(|| {
			let mut operation = DeleteVertexOperation::new();
			let edited = operation.execute(black_box(&geometry), black_box(&last_vertex)).unwrap();
			operation.inverse_operation().unwrap().execute(&edited, operation.geometry_index().unwrap()).unwrap()
		})
	});
}

fn geometry_operations(c: &mut Criterion) {
	let geometry = multi_polygon(64, 256);
	let first_polygon = SERVICE.create(GeometryIndexType::Geometry, &[0]);

	c.bench_function("delete and undo polygon", |b| {
		b.iter(|| {
			let mut operation = DeleteGeometryOperation::new();
			let edited = operation.execute(black_box(&geometry), black_box(&first_polygon)).unwrap();
			operation.inverse_operation().unwrap().execute(&edited, operation.geometry_index().unwrap()).unwrap()
		})
	});
}

criterion_group!(benches, vertex_operations, geometry_operations);
criterion_main!(benches);
