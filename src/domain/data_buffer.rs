// Data buffers attached to cards
use super::error::PageError;
use super::sample::DataPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Holds at most `size` rows
    Fixed,
    /// Holds the newest `size` rows
    Cyclic,
    /// Unbounded
    Map,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataBuffer {
    pub fields: Vec<String>,
    pub kind: BufferKind,
    pub size: usize,
    pub rows: Vec<DataPoint>,
}

impl DataBuffer {
    /// Declare a buffer from space-separated field names and a signed size.
    ///
    /// A positive size gives a fixed buffer, a negative size a cyclic one and
    /// zero an unbounded map buffer.
    pub fn declare(fields: &str, size: i64) -> Result<Self, PageError> {
        let fields: Vec<String> = fields.split_whitespace().map(str::to_string).collect();
        if fields.is_empty() {
            return Err(PageError::EmptyFields);
        }

        let kind = match size {
            n if n > 0 => BufferKind::Fixed,
            n if n < 0 => BufferKind::Cyclic,
            _ => BufferKind::Map,
        };

        Ok(Self {
            fields,
            kind,
            size: size.unsigned_abs() as usize,
            rows: Vec::new(),
        })
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    /// Replace every row in the buffer
    pub fn replace(&mut self, rows: Vec<DataPoint>) -> Result<(), PageError> {
        self.check_row_shape()?;

        let rows = match self.kind {
            BufferKind::Fixed if rows.len() > self.size => {
                return Err(PageError::BufferOverflow {
                    size: self.size,
                    rows: rows.len(),
                });
            }
            BufferKind::Cyclic if rows.len() > self.size => {
                let skip = rows.len() - self.size;
                rows.into_iter().skip(skip).collect()
            }
            _ => rows,
        };

        if !is_monotonic(&rows) {
            tracing::warn!(
                "Data buffer [{}] received timestamps out of order",
                self.fields.join(" ")
            );
        }

        self.rows = rows;
        Ok(())
    }

    /// Append one row, dropping the oldest when a bounded buffer is full
    pub fn push(&mut self, row: DataPoint) -> Result<(), PageError> {
        self.check_row_shape()?;

        if let Some(last) = self.rows.last() {
            if row.timestamp < last.timestamp {
                tracing::warn!("Appending row older than the newest buffered row");
            }
        }

        if self.kind != BufferKind::Map && self.size > 0 && self.rows.len() >= self.size {
            self.rows.remove(0);
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_row_shape(&self) -> Result<(), PageError> {
        if self.fields.len() != 2 {
            return Err(PageError::FieldCount(self.fields.len()));
        }
        Ok(())
    }
}

fn is_monotonic(rows: &[DataPoint]) -> bool {
    rows.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}
