use std::io::Write;

use brownian_portfolio::{OutputRecord, OutputSink};

/// Writes one tab-separated line per completed interval to any `Write`
/// destination:
/// `[timestamp]\t[index][\taverage_value]\tportfolio_value[\tmargin_fraction][\tticker[=allocation]]*`
pub struct LineWriter<W: Write> {
    writer: W,
}

impl<W: Write> LineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputSink for LineWriter<W> {
    fn emit(&mut self, record: &OutputRecord) -> std::io::Result<()> {
        write!(
            self.writer,
            "{}\t{}\t{}\t{}",
            record.timestamp, record.index, record.average_value, record.portfolio_value
        )?;
        if let Some(margin_fraction) = record.margin_fraction {
            write!(self.writer, "\t{margin_fraction}")?;
        }
        for holding in &record.holdings {
            match holding.allocation {
                Some(allocation) => write!(self.writer, "\t{}={}", holding.ticker, allocation)?,
                None => write!(self.writer, "\t{}", holding.ticker)?,
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brownian_portfolio::dispatcher::Holding;

    #[test]
    fn formats_fields_in_order() {
        let mut buf = Vec::new();
        {
            let mut sink = LineWriter::new(&mut buf);
            let record = OutputRecord {
                timestamp: "t0".to_string(),
                index: 1000.0,
                average_value: 105.0,
                portfolio_value: 1000.0,
                margin_fraction: Some(0.5),
                holdings: vec![
                    Holding {
                        ticker: "ABC".to_string(),
                        allocation: Some(0.6),
                    },
                    Holding {
                        ticker: "XYZ".to_string(),
                        allocation: None,
                    },
                ],
            };
            sink.emit(&record).unwrap();
        }
        let line = String::from_utf8(buf).unwrap();
        assert_eq!(line, "t0\t1000\t105\t1000\t0.5\tABC=0.6\tXYZ\n");
    }

    #[test]
    fn omits_margin_fraction_when_absent() {
        let mut buf = Vec::new();
        {
            let mut sink = LineWriter::new(&mut buf);
            let record = OutputRecord {
                timestamp: "t0".to_string(),
                index: 1000.0,
                average_value: 100.0,
                portfolio_value: 1000.0,
                margin_fraction: None,
                holdings: vec![],
            };
            sink.emit(&record).unwrap();
        }
        let line = String::from_utf8(buf).unwrap();
        assert_eq!(line, "t0\t1000\t100\t1000\n");
    }
}
