//! Test utilities for the lineitem importer
//!
//! Shared fixtures plus a reader that records how often the importer
//! touches its source.

use std::cell::Cell;
use std::io::{BufRead, Cursor, Read};
use std::rc::Rc;

use crate::config::ImporterConfig;
use crate::importer::LineItemImporter;


/// Record used throughout the decode tests
pub const SAMPLE_LINE: &str = "1|2|3|1|10|150.50|0.05|0.08|N|O|1996-01-02|1996-01-03|1996-01-04|DELIVER IN PERSON|TRUCK|no comment";

/// A second record for the same order
pub const SECOND_LINE: &str = "1|67310|7311|2|36|45983.16|0.09|0.06|N|O|1996-04-12|1996-02-28|1996-04-20|TAKE BACK RETURN|MAIL|ly final dependencies: slyly bold";

/// A record belonging to the next order
pub const NEXT_ORDER_LINE: &str = "2|106170|1191|1|38|44694.46|0.00|0.05|N|O|1997-01-28|1997-01-14|1997-02-02|TAKE BACK RETURN|RAIL|ven requests. deposits breach a";

/// Build an importer over in-memory text
pub fn importer_for(text: &str) -> LineItemImporter<Cursor<Vec<u8>>> {
    LineItemImporter::from_reader(
        "memory",
        Cursor::new(text.as_bytes().to_vec()),
        ImporterConfig::default(),
    )
}

/// Join lines into file content with a trailing newline
pub fn lines(records: &[&str]) -> String {
    let mut content = records.join("\n");
    content.push('\n');
    content
}

/// Counters shared between a `CountingReader` and the test
#[derive(Debug, Clone, Default)]
pub struct ReadProbe {
    fills: Rc<Cell<usize>>,
    consumed: Rc<Cell<usize>>,
}

impl ReadProbe {
    /// Number of times the importer asked the source for data
    pub fn fills(&self) -> usize {
        self.fills.get()
    }

    /// Bytes the importer has taken from the source
    pub fn consumed(&self) -> usize {
        self.consumed.get()
    }
}

/// In-memory source that counts buffer fills and consumed bytes
pub struct CountingReader {
    inner: Cursor<Vec<u8>>,
    probe: ReadProbe,
}

impl CountingReader {
    pub fn new(text: &str) -> (Self, ReadProbe) {
        let probe = ReadProbe::default();
        let reader = Self {
            inner: Cursor::new(text.as_bytes().to_vec()),
            probe: probe.clone(),
        };
        (reader, probe)
    }
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.probe.fills.set(self.probe.fills.get() + 1);
        self.probe.consumed.set(self.probe.consumed.get() + n);
        Ok(n)
    }
}

impl BufRead for CountingReader {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        self.probe.fills.set(self.probe.fills.get() + 1);
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.probe.consumed.set(self.probe.consumed.get() + amt);
        self.inner.consume(amt);
    }
}
