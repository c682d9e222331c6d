/// MATLAB Level 5 MAT-file writer
///
/// Writes uncompressed double-precision numeric arrays, which is enough for
/// MATLAB, Octave, scipy and the `matfile` crate to load the result.
/// Format reference: "MAT-File Format", MathWorks, sections 1-2 and 1-7.
use crate::error::{EegSegError, Result};
use chrono::Local;
use ndarray::{ArrayBase, Data, Dimension};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const HEADER_TEXT_LEN: usize = 116;
const MAT_VERSION: u16 = 0x0100;

const MI_INT8: u32 = 1;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;

const MX_DOUBLE_CLASS: u32 = 6;

/// Longest variable name MATLAB accepts.
pub const MAX_NAME_LEN: usize = 63;

/// One named double array, with its samples already in column-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatArray {
    pub name: String,
    pub dims: Vec<usize>,
    pub data: Vec<f64>,
}

impl MatArray {
    /// Build from an ndarray of any dimensionality, reordering to column-major.
    ///
    /// 1-D input becomes a 1×N row vector and 0-D input a 1×1 scalar, since
    /// MAT files always carry at least two dimensions.
    pub fn from_ndarray<S, D>(name: &str, array: &ArrayBase<S, D>) -> Self
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        if array.ndim() == 0 {
            if let Some(&value) = array.iter().next() {
                return Self::scalar(name, value);
            }
        }
        let dims = match array.ndim() {
            1 => vec![1, array.len()],
            _ => array.shape().to_vec(),
        };
        // Reversing the axes makes logical iteration run the first axis fastest.
        let data = array.t().iter().copied().collect();
        Self {
            name: name.to_string(),
            dims,
            data,
        }
    }

    pub fn scalar(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            dims: vec![1, 1],
            data: vec![value],
        }
    }

    fn validate(&self) -> Result<()> {
        if !is_valid_variable_name(&self.name) {
            return Err(EegSegError::InvalidParameter(format!(
                "'{}' is not a valid MATLAB variable name",
                self.name
            )));
        }
        let expected: usize = self.dims.iter().product();
        if expected != self.data.len() {
            return Err(EegSegError::InvalidData(format!(
                "array '{}' has {} values but dims {:?} need {}",
                self.name,
                self.data.len(),
                self.dims,
                expected
            )));
        }
        if self.dims.iter().any(|&d| d > i32::MAX as usize) {
            return Err(EegSegError::InvalidData(format!(
                "array '{}' has a dimension too large for a MAT file",
                self.name
            )));
        }
        Ok(())
    }
}

pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= MAX_NAME_LEN && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Map an arbitrary label (usually a file stem) onto a legal MATLAB name.
pub fn sanitize_variable_name(label: &str) -> String {
    let mut name: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        name.insert(0, 'x');
    }
    name.truncate(MAX_NAME_LEN);
    name
}

pub struct MatWriter;

impl MatWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_file(&self, path: &Path, arrays: &[MatArray]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer, arrays)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write<W: Write>(&self, writer: &mut W, arrays: &[MatArray]) -> Result<()> {
        for array in arrays {
            array.validate()?;
        }
        Self::write_header(writer)?;
        for array in arrays {
            Self::write_array(writer, array)?;
        }
        Ok(())
    }

    fn write_header<W: Write>(writer: &mut W) -> Result<()> {
        let text = format!(
            "MATLAB 5.0 MAT-file, Platform: {}, Created on: {}",
            std::env::consts::OS,
            Local::now().format("%a %b %e %H:%M:%S %Y")
        );
        let mut buffer = vec![b' '; HEADER_TEXT_LEN];
        let bytes = text.as_bytes();
        let copy_len = bytes.len().min(HEADER_TEXT_LEN);
        buffer[..copy_len].copy_from_slice(&bytes[..copy_len]);
        writer.write_all(&buffer)?;

        // Subsystem data offset: unused.
        writer.write_all(&[0u8; 8])?;
        writer.write_all(&MAT_VERSION.to_le_bytes())?;
        // Endian indicator reads "IM" when written little-endian.
        writer.write_all(b"IM")?;
        Ok(())
    }

    fn write_array<W: Write>(writer: &mut W, array: &MatArray) -> Result<()> {
        let name = array.name.as_bytes();
        let dims_bytes = array.dims.len() * 4;
        let data_bytes = array.data.len() * 8;

        let payload = (8 + 8)
            + (8 + padded(dims_bytes))
            + (8 + padded(name.len()))
            + (8 + data_bytes);
        let payload = u32::try_from(payload).map_err(|_| {
            EegSegError::InvalidData(format!(
                "array '{}' exceeds the 4 GiB limit of an uncompressed MAT element",
                array.name
            ))
        })?;

        Self::write_tag(writer, MI_MATRIX, payload)?;

        Self::write_tag(writer, MI_UINT32, 8)?;
        writer.write_all(&MX_DOUBLE_CLASS.to_le_bytes())?;
        writer.write_all(&0u32.to_le_bytes())?;

        Self::write_tag(writer, MI_INT32, dims_bytes as u32)?;
        for &dim in &array.dims {
            writer.write_all(&(dim as i32).to_le_bytes())?;
        }
        Self::write_padding(writer, dims_bytes)?;

        Self::write_tag(writer, MI_INT8, name.len() as u32)?;
        writer.write_all(name)?;
        Self::write_padding(writer, name.len())?;

        Self::write_tag(writer, MI_DOUBLE, data_bytes as u32)?;
        for value in &array.data {
            writer.write_all(&value.to_le_bytes())?;
        }
        Ok(())
    }

    fn write_tag<W: Write>(writer: &mut W, data_type: u32, num_bytes: u32) -> Result<()> {
        writer.write_all(&data_type.to_le_bytes())?;
        writer.write_all(&num_bytes.to_le_bytes())?;
        Ok(())
    }

    fn write_padding<W: Write>(writer: &mut W, len: usize) -> Result<()> {
        let pad = padded(len) - len;
        if pad > 0 {
            writer.write_all(&[0u8; 8][..pad])?;
        }
        Ok(())
    }
}

impl Default for MatWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Round up to the 8-byte boundary every data element must end on.
fn padded(len: usize) -> usize {
    len.div_ceil(8) * 8
}
