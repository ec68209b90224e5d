//! Rendering records as text for diagnostic dumps

/// Renders one raw record as human-readable text
///
/// The stack never interprets record bytes itself; whoever knows the real
/// type behind the bytes supplies a formatter. The returned `String` is owned
/// by the caller's allocator and only borrowed by the stack while building a
/// dump.
///
/// Closures of the shape `Fn(&[u8]) -> String` are formatters too:
///
/// ```
/// use nebula_stack::RecordFormatter;
///
/// let hex = |record: &[u8]| format!("{:02x}", record[0]);
/// assert_eq!(hex.render(&[0xab]), "ab");
/// ```
pub trait RecordFormatter {
    /// Render a record of exactly `record_size` bytes
    fn render(&self, record: &[u8]) -> String;
}

impl<F> RecordFormatter for F
where
    F: Fn(&[u8]) -> String,
{
    fn render(&self, record: &[u8]) -> String {
        self(record)
    }
}

/// Formatter printing each byte as two lowercase hex digits
#[derive(Debug, Clone, Copy, Default)]
pub struct HexFormatter;

impl RecordFormatter for HexFormatter {
    fn render(&self, record: &[u8]) -> String {
        let mut out = String::with_capacity(record.len() * 2);
        for byte in record {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }
}

/// Incrementally builds the `"<count> [ tok tok ]"` listing
pub(crate) struct DumpWriter {
    out: String,
}

impl DumpWriter {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            out: format!("{count} ["),
        }
    }

    pub(crate) fn token(&mut self, token: &str) {
        self.out.push(' ');
        self.out.push_str(token);
    }

    pub(crate) fn finish(mut self) -> String {
        self.out.push_str(" ]");
        self.out
    }
}
