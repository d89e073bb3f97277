//! Nested-bracket text rendering for arrays.
//!
//! ```text
//! [[[1.230, 4.560],
//!   [7.890, 2.340]],
//!  [[5.670, 8.900],
//!   [9.010, 3.210]]]
//! ```
//!
//! Each nesting level indents continuation lines by one more space so that a
//! sub-block's opening bracket sits one column right of its parent's.

use std::fmt::{self, Display, Formatter, Write};

use crate::array::NdArray;

/// Decimal digits printed per element unless the formatter asks for another precision.
pub const DISPLAY_PRECISION: usize = 3;

fn write_block<T: Display>(
    f: &mut Formatter<'_>,
    array: &NdArray<T>,
    axis: usize,
    offset: usize,
    precision: usize,
) -> fmt::Result {
    let extent = array.dims()[axis];
    let stride = array.strides()[axis];
    f.write_char('[')?;
    if axis + 1 == array.ndim() {
        for i in 0..extent {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:.*}", precision, array.data()[offset + i * stride])?;
        }
    } else {
        for i in 0..extent {
            if i > 0 {
                write!(f, ",\n{:width$}", "", width = axis + 1)?;
            }
            write_block(f, array, axis + 1, offset + i * stride, precision)?;
        }
    }
    f.write_char(']')
}

impl<T: Display> Display for NdArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[]");
        }
        let precision = f.precision().unwrap_or(DISPLAY_PRECISION);
        if self.ndim() == 0 {
            return write!(f, "{:.*}", precision, self.data()[0]);
        }
        write_block(f, self, 0, 0, precision)
    }
}
