use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::{Array1, Array2, ArrayD, Axis};
use serde::{Deserialize, Serialize};

use super::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Identity of one generated form instance; recorded on the layers it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(u64);

impl FormId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Producible-data categories: results of these kinds become viewer layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Image,
    Labels,
    Points,
    Surface,
}

impl fmt::Display for DataKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Labels => "labels",
            Self::Points => "points",
            Self::Surface => "surface",
        };
        formatter.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub vertices: Array2<f64>,
    pub faces: Array2<usize>,
    pub values: Option<Array1<f64>>,
}

impl SurfaceMesh {
    pub fn new(
        vertices: Array2<f64>,
        faces: Array2<usize>,
        values: Option<Array1<f64>>,
    ) -> Result<Self> {
        if faces.ncols() != 3 {
            return Err(ModelError::FaceArity(faces.ncols()));
        }
        let vertex_count = vertices.nrows();
        for (face, row) in faces.axis_iter(Axis(0)).enumerate() {
            if let Some(vertex) = row.iter().copied().find(|index| *index >= vertex_count) {
                return Err(ModelError::FaceVertexOutOfRange {
                    face,
                    vertex,
                    vertex_count,
                });
            }
        }
        if let Some(values) = &values {
            if values.len() != vertex_count {
                return Err(ModelError::VertexValueMismatch {
                    vertex_count,
                    value_count: values.len(),
                });
            }
        }
        Ok(Self {
            vertices,
            faces,
            values,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Image(ArrayD<f32>),
    Labels(ArrayD<u32>),
    /// One row per point, one column per spatial axis.
    Points(Array2<f64>),
    Surface(SurfaceMesh),
}

impl LayerData {
    pub fn kind(&self) -> DataKind {
        match self {
            Self::Image(_) => DataKind::Image,
            Self::Labels(_) => DataKind::Labels,
            Self::Points(_) => DataKind::Points,
            Self::Surface(_) => DataKind::Surface,
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            Self::Image(data) => data.ndim(),
            Self::Labels(data) => data.ndim(),
            Self::Points(data) => data.ncols(),
            Self::Surface(mesh) => mesh.vertices.ncols(),
        }
    }

    /// Unscaled size of the data along each axis, measured from the origin.
    pub fn extent(&self) -> Vec<f64> {
        match self {
            Self::Image(data) => data.shape().iter().map(|size| *size as f64).collect(),
            Self::Labels(data) => data.shape().iter().map(|size| *size as f64).collect(),
            Self::Points(data) => coordinate_extent(data),
            Self::Surface(mesh) => coordinate_extent(&mesh.vertices),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Image(data) => format!("image {:?}", data.shape()),
            Self::Labels(data) => format!("labels {:?}", data.shape()),
            Self::Points(data) => format!("points n={} ndim={}", data.nrows(), data.ncols()),
            Self::Surface(mesh) => format!(
                "surface vertices={} faces={}",
                mesh.vertices.nrows(),
                mesh.faces.nrows()
            ),
        }
    }
}

fn coordinate_extent(coordinates: &Array2<f64>) -> Vec<f64> {
    coordinates
        .axis_iter(Axis(1))
        .map(|column| {
            column
                .iter()
                .copied()
                .filter(|value| value.is_finite())
                .fold(0.0_f64, f64::max)
        })
        .collect()
}

/// Everything about a new layer except its data and id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerProps {
    pub name: String,
    pub scale: Option<Vec<f64>>,
    pub point_size: Option<f64>,
    pub origin: Option<FormId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub data: LayerData,
    pub scale: Vec<f64>,
    pub point_size: Option<f64>,
    pub origin: Option<FormId>,
}

impl Layer {
    pub fn new(id: LayerId, data: LayerData, props: LayerProps) -> Self {
        let scale = props
            .scale
            .filter(|scale| scale.len() == data.ndim())
            .unwrap_or_else(|| vec![1.0; data.ndim()]);
        Self {
            id,
            name: props.name,
            data,
            scale,
            point_size: props.point_size,
            origin: props.origin,
        }
    }

    pub fn kind(&self) -> DataKind {
        self.data.kind()
    }

    /// Data extent multiplied by the layer scale.
    pub fn world_extent(&self) -> Vec<f64> {
        self.data
            .extent()
            .into_iter()
            .zip(self.scale.iter().copied().chain(std::iter::repeat(1.0)))
            .map(|(extent, scale)| extent * scale.abs())
            .collect()
    }
}
