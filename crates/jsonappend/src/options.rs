/// Buffer sizing for [`JsonWriter`](crate::JsonWriter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Bytes buffered before the sink is written to (default: 4096)
    pub capacity: usize,
    /// Initial capacity of the scratch buffer values are encoded into
    /// (default: 256). It grows as needed and is never shrunk.
    pub scratch_capacity: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            capacity: 4096,
            scratch_capacity: 256,
        }
    }
}
