//! Output element types and the typed destination buffer.
//!
//! Kernels produce `f64`. Values are narrowed to the caller's element type
//! with a truncating cast: no rounding and no clamping. Integer targets go
//! through `i64` first, so a value truncates toward zero and then wraps
//! (300.7 stored as `u8` becomes 44, -1.5 becomes 255). NaN stores as 0.
//! Callers that need rounding or saturation convert the values themselves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GridError, Result};

/// Storage type of the output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    Byte,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
}

impl OutputType {
    pub const ALL: [OutputType; 7] = [
        OutputType::Byte,
        OutputType::UInt16,
        OutputType::Int16,
        OutputType::UInt32,
        OutputType::Int32,
        OutputType::Float32,
        OutputType::Float64,
    ];

    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            OutputType::Byte => 1,
            OutputType::UInt16 | OutputType::Int16 => 2,
            OutputType::UInt32 | OutputType::Int32 | OutputType::Float32 => 4,
            OutputType::Float64 => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputType::Byte => "byte",
            OutputType::UInt16 => "uint16",
            OutputType::Int16 => "int16",
            OutputType::UInt32 => "uint32",
            OutputType::Int32 => "int32",
            OutputType::Float32 => "float32",
            OutputType::Float64 => "float64",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputType {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        OutputType::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| {
                GridError::invalid(
                    "output_type",
                    format!(
                        "Unknown output type: {}. Must be one of: byte, uint16, int16, uint32, int32, float32, float64",
                        s
                    ),
                )
            })
    }
}

/// An element type the grid can be written as.
pub trait OutputElement: Copy + Send + Sync + 'static {
    const TYPE: OutputType;

    /// Narrow a kernel result to this type.
    fn from_f64(value: f64) -> Self;
}

macro_rules! integer_element {
    ($ty:ty, $variant:ident) => {
        impl OutputElement for $ty {
            const TYPE: OutputType = OutputType::$variant;

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as i64 as $ty
            }
        }
    };
}

integer_element!(u8, Byte);
integer_element!(u16, UInt16);
integer_element!(i16, Int16);
integer_element!(u32, UInt32);
integer_element!(i32, Int32);

impl OutputElement for f32 {
    const TYPE: OutputType = OutputType::Float32;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl OutputElement for f64 {
    const TYPE: OutputType = OutputType::Float64;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

/// Caller-owned destination for the computed grid, in row-major order.
#[derive(Debug)]
pub enum OutputBuffer<'a> {
    Byte(&'a mut [u8]),
    UInt16(&'a mut [u16]),
    Int16(&'a mut [i16]),
    UInt32(&'a mut [u32]),
    Int32(&'a mut [i32]),
    Float32(&'a mut [f32]),
    Float64(&'a mut [f64]),
}

macro_rules! buffer_from_slice {
    ($ty:ty, $variant:ident) => {
        impl<'a> From<&'a mut [$ty]> for OutputBuffer<'a> {
            fn from(slice: &'a mut [$ty]) -> Self {
                OutputBuffer::$variant(slice)
            }
        }

        impl<'a> From<&'a mut Vec<$ty>> for OutputBuffer<'a> {
            fn from(vec: &'a mut Vec<$ty>) -> Self {
                OutputBuffer::$variant(vec.as_mut_slice())
            }
        }
    };
}

buffer_from_slice!(u8, Byte);
buffer_from_slice!(u16, UInt16);
buffer_from_slice!(i16, Int16);
buffer_from_slice!(u32, UInt32);
buffer_from_slice!(i32, Int32);
buffer_from_slice!(f32, Float32);
buffer_from_slice!(f64, Float64);

fn store<T: OutputElement>(dst: &mut [T], values: &[f64]) {
    for (d, &v) in dst.iter_mut().zip(values) {
        *d = T::from_f64(v);
    }
}

impl OutputBuffer<'_> {
    pub fn output_type(&self) -> OutputType {
        match self {
            OutputBuffer::Byte(_) => OutputType::Byte,
            OutputBuffer::UInt16(_) => OutputType::UInt16,
            OutputBuffer::Int16(_) => OutputType::Int16,
            OutputBuffer::UInt32(_) => OutputType::UInt32,
            OutputBuffer::Int32(_) => OutputType::Int32,
            OutputBuffer::Float32(_) => OutputType::Float32,
            OutputBuffer::Float64(_) => OutputType::Float64,
        }
    }

    /// Number of elements the buffer can hold.
    pub fn len(&self) -> usize {
        match self {
            OutputBuffer::Byte(b) => b.len(),
            OutputBuffer::UInt16(b) => b.len(),
            OutputBuffer::Int16(b) => b.len(),
            OutputBuffer::UInt32(b) => b.len(),
            OutputBuffer::Int32(b) => b.len(),
            OutputBuffer::Float32(b) => b.len(),
            OutputBuffer::Float64(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write `values` starting at element `offset`.
    pub(crate) fn store_row(&mut self, offset: usize, values: &[f64]) {
        let end = offset + values.len();
        match self {
            OutputBuffer::Byte(b) => store(&mut b[offset..end], values),
            OutputBuffer::UInt16(b) => store(&mut b[offset..end], values),
            OutputBuffer::Int16(b) => store(&mut b[offset..end], values),
            OutputBuffer::UInt32(b) => store(&mut b[offset..end], values),
            OutputBuffer::Int32(b) => store(&mut b[offset..end], values),
            OutputBuffer::Float32(b) => store(&mut b[offset..end], values),
            OutputBuffer::Float64(b) => store(&mut b[offset..end], values),
        }
    }
}

/// Owned grid values of one element type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GridValues {
    Byte(Vec<u8>),
    UInt16(Vec<u16>),
    Int16(Vec<i16>),
    UInt32(Vec<u32>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl GridValues {
    /// Zero-filled storage for `len` elements of `output_type`.
    pub fn allocate(output_type: OutputType, len: usize) -> Self {
        match output_type {
            OutputType::Byte => GridValues::Byte(vec![0; len]),
            OutputType::UInt16 => GridValues::UInt16(vec![0; len]),
            OutputType::Int16 => GridValues::Int16(vec![0; len]),
            OutputType::UInt32 => GridValues::UInt32(vec![0; len]),
            OutputType::Int32 => GridValues::Int32(vec![0; len]),
            OutputType::Float32 => GridValues::Float32(vec![0.0; len]),
            OutputType::Float64 => GridValues::Float64(vec![0.0; len]),
        }
    }

    pub fn as_buffer(&mut self) -> OutputBuffer<'_> {
        match self {
            GridValues::Byte(v) => OutputBuffer::Byte(v),
            GridValues::UInt16(v) => OutputBuffer::UInt16(v),
            GridValues::Int16(v) => OutputBuffer::Int16(v),
            GridValues::UInt32(v) => OutputBuffer::UInt32(v),
            GridValues::Int32(v) => OutputBuffer::Int32(v),
            GridValues::Float32(v) => OutputBuffer::Float32(v),
            GridValues::Float64(v) => OutputBuffer::Float64(v),
        }
    }

    pub fn output_type(&self) -> OutputType {
        match self {
            GridValues::Byte(_) => OutputType::Byte,
            GridValues::UInt16(_) => OutputType::UInt16,
            GridValues::Int16(_) => OutputType::Int16,
            GridValues::UInt32(_) => OutputType::UInt32,
            GridValues::Int32(_) => OutputType::Int32,
            GridValues::Float32(_) => OutputType::Float32,
            GridValues::Float64(_) => OutputType::Float64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Truncation and wrap-around are intentional: the stored value is exactly
    // what a plain numeric cast produces.
    #[test]
    fn test_truncating_cast_without_clamping() {
        assert_eq!(u8::from_f64(3.99), 3);
        assert_eq!(u8::from_f64(300.7), 44);
        assert_eq!(u8::from_f64(-1.5), 255);
        assert_eq!(i16::from_f64(-3.99), -3);
        assert_eq!(i16::from_f64(70000.9), 4464);
        assert_eq!(u16::from_f64(65536.0), 0);
        assert_eq!(i32::from_f64(-2.5), -2);
        assert_eq!(u32::from_f64(-1.0), u32::MAX);
        assert_eq!(u8::from_f64(f64::NAN), 0);
        assert_eq!(f32::from_f64(0.1), 0.1f32);
        assert_eq!(f64::from_f64(-9999.0), -9999.0);
    }

    #[test]
    fn test_output_type_parsing() {
        assert_eq!("Float32".parse::<OutputType>().unwrap(), OutputType::Float32);
        assert_eq!("byte".parse::<OutputType>().unwrap(), OutputType::Byte);
        assert_eq!("UINT16".parse::<OutputType>().unwrap(), OutputType::UInt16);
        assert!("complex64".parse::<OutputType>().is_err());
        for t in OutputType::ALL {
            assert_eq!(t.name().parse::<OutputType>().unwrap(), t);
        }
        assert_eq!(OutputType::Int16.size_bytes(), 2);
        assert_eq!(OutputType::Float64.size_bytes(), 8);
    }

    #[test]
    fn test_store_row() {
        let mut values = GridValues::allocate(OutputType::Int16, 4);
        {
            let mut buffer = values.as_buffer();
            assert_eq!(buffer.len(), 4);
            assert_eq!(buffer.output_type(), OutputType::Int16);
            buffer.store_row(2, &[7.9, -7.9]);
        }
        assert_eq!(values, GridValues::Int16(vec![0, 0, 7, -7]));
        assert_eq!(
            serde_json::to_string(&values).unwrap(),
            "[0,0,7,-7]"
        );
    }
}
