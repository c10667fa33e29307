use crate::consts::{EDGE_INDEX_WORD, GEOMETRY_INDEX_WORD, INDEX_SEPARATOR, VERTEX_INDEX_WORD};
use crate::error::ParseGeometryIndexError;

use std::fmt;
use std::str::FromStr;

/// What the last element of a [`GeometryIndex`] path names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryIndexType {
	/// A child geometry of a composite.
	Geometry,
	/// The segment between coordinate `i` and `i + 1` of a leaf.
	Edge,
	/// A coordinate of a leaf.
	Vertex,
}

impl GeometryIndexType {
	pub fn word(self) -> &'static str {
		match self {
			GeometryIndexType::Geometry => GEOMETRY_INDEX_WORD,
			GeometryIndexType::Edge => EDGE_INDEX_WORD,
			GeometryIndexType::Vertex => VERTEX_INDEX_WORD,
		}
	}
}

impl fmt::Display for GeometryIndexType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.word())
	}
}

impl FromStr for GeometryIndexType {
	type Err = ParseGeometryIndexError;

	fn from_str(word: &str) -> Result<Self, Self::Err> {
		match word {
			GEOMETRY_INDEX_WORD => Ok(GeometryIndexType::Geometry),
			EDGE_INDEX_WORD => Ok(GeometryIndexType::Edge),
			VERTEX_INDEX_WORD => Ok(GeometryIndexType::Vertex),
			_ => Err(ParseGeometryIndexError::UnknownElement(word.to_string())),
		}
	}
}

/// The address of a vertex, an edge or a sub-geometry inside a [`Geometry`](crate::Geometry).
///
/// The path is read outer-to-inner, one element per nesting level. Every element but the last selects a child
/// geometry, and the last one is interpreted according to the index type. A vertex in the shell of the third polygon
/// of a multi-polygon is `[2, 0, coordinate]`.
///
/// Indices are never checked against a geometry when they are built, because the same index can be valid for one
/// geometry and invalid for another. The operations validate them when they execute.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryIndex {
	index_type: GeometryIndexType,
	path: Vec<usize>,
}

impl GeometryIndex {
	pub fn new(index_type: GeometryIndexType, path: Vec<usize>) -> Self {
		Self { index_type, path }
	}

	pub fn index_type(&self) -> GeometryIndexType {
		self.index_type
	}

	pub fn path(&self) -> &[usize] {
		&self.path
	}

	/// The last element of the path, naming the vertex, edge or geometry within its parent.
	pub fn value(&self) -> Option<usize> {
		self.path.last().copied()
	}

	/// The path elements selecting the geometry the last element lives in.
	pub fn parent_path(&self) -> &[usize] {
		self.path.split_last().map(|(_, parent)| parent).unwrap_or_default()
	}

	/// The same location with a different last element.
	pub(crate) fn with_value(&self, index_type: GeometryIndexType, value: usize) -> Self {
		let mut path = self.parent_path().to_vec();
		path.push(value);
		Self { index_type, path }
	}
}

impl fmt::Display for GeometryIndex {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Some((last, parents)) = self.path.split_last() else {
			return Ok(());
		};
		for value in parents {
			write!(f, "{GEOMETRY_INDEX_WORD}{value}{INDEX_SEPARATOR}")?;
		}
		write!(f, "{}{last}", self.index_type)
	}
}

impl FromStr for GeometryIndex {
	type Err = ParseGeometryIndexError;

	/// Reads the textual form written by [`Display`](fmt::Display), such as `geometry1.geometry0.vertex3`.
	fn from_str(text: &str) -> Result<Self, Self::Err> {
		if text.is_empty() {
			return Err(ParseGeometryIndexError::Empty);
		}

		let elements = text.split(INDEX_SEPARATOR).map(parse_element).collect::<Result<Vec<_>, _>>()?;
		let Some(((index_type, _), parents)) = elements.split_last() else {
			return Err(ParseGeometryIndexError::Empty);
		};
		if let Some((misplaced, _)) = parents.iter().find(|(element_type, _)| *element_type != GeometryIndexType::Geometry) {
			return Err(ParseGeometryIndexError::MisplacedElement(*misplaced));
		}

		let path = elements.iter().map(|&(_, value)| value).collect();
		Ok(Self::new(*index_type, path))
	}
}

fn parse_element(element: &str) -> Result<(GeometryIndexType, usize), ParseGeometryIndexError> {
	let split = element.find(|character: char| !character.is_ascii_alphabetic()).unwrap_or(element.len());
	let (word, digits) = element.split_at(split);

	let index_type = word.parse()?;
	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return Err(ParseGeometryIndexError::InvalidValue(element.to_string()));
	}
	let value = digits.parse().map_err(|_| ParseGeometryIndexError::InvalidValue(element.to_string()))?;

	Ok((index_type, value))
}
