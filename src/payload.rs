//! Payload Module
//!
//! The closed set of value kinds that flow through the prediction service,
//! both as model inputs and as cached outputs.

use serde::{Deserialize, Serialize};

// == Tensor Data ==
/// Flat element buffer of a tensor, tagged with its element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "values", rename_all = "lowercase")]
pub enum TensorData {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
}

impl TensorData {
    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            TensorData::F32(v) => v.len(),
            TensorData::F64(v) => v.len(),
            TensorData::I32(v) => v.len(),
            TensorData::I64(v) => v.len(),
            TensorData::U8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of a single element in bytes.
    pub fn element_width(&self) -> usize {
        match self {
            TensorData::F32(_) => std::mem::size_of::<f32>(),
            TensorData::F64(_) => std::mem::size_of::<f64>(),
            TensorData::I32(_) => std::mem::size_of::<i32>(),
            TensorData::I64(_) => std::mem::size_of::<i64>(),
            TensorData::U8(_) => std::mem::size_of::<u8>(),
        }
    }
}

// == Payload ==
/// A model input or output.
///
/// `Json` is the catch-all for anything that is neither a numeric array nor
/// a raw byte buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Tensor { shape: Vec<usize>, data: TensorData },
    Bytes { data: Vec<u8> },
    Json { value: serde_json::Value },
}

impl Payload {
    /// One-dimensional `f32` tensor.
    pub fn vector(values: Vec<f32>) -> Self {
        Payload::Tensor {
            shape: vec![values.len()],
            data: TensorData::F32(values),
        }
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Payload::Bytes { data: data.into() }
    }

    pub fn json(value: serde_json::Value) -> Self {
        Payload::Json { value }
    }

    /// Checks that a tensor's shape accounts for exactly its elements.
    ///
    /// An empty shape is a scalar and holds one element. Other kinds always
    /// pass.
    pub fn check_shape(&self) -> Result<(), String> {
        let Payload::Tensor { shape, data } = self else {
            return Ok(());
        };
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, dim| acc.checked_mul(*dim))
            .ok_or_else(|| format!("Tensor shape {:?} overflows", shape))?;
        if expected != data.len() {
            return Err(format!(
                "Tensor shape {:?} needs {} elements, got {}",
                shape,
                expected,
                data.len()
            ));
        }
        Ok(())
    }

    /// Short name of the variant, used in logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Tensor { .. } => "tensor",
            Payload::Bytes { .. } => "bytes",
            Payload::Json { .. } => "json",
        }
    }
}
