use crate::application::response::OrderBulkCreateResponse;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct SummaryRecord<'a> {
    index: usize,
    status: &'a str,
    id: Option<&'a str>,
    number: Option<&'a str>,
    total_gross: Option<String>,
    currency: Option<&'a str>,
    errors: String,
}

/// Writes one CSV summary row per bulk create result.
pub struct ResultWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Rows keep the order of the submitted orders; `errors` joins every
    /// problem reported for the row with `; `.
    pub fn write_response(&mut self, response: &OrderBulkCreateResponse) -> Result<()> {
        for (index, result) in response.results.iter().enumerate() {
            let order = result.order.as_ref();
            let errors = result
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");

            self.writer.serialize(SummaryRecord {
                index,
                status: if order.is_some() { "created" } else { "rejected" },
                id: order.map(|o| o.id.as_str()),
                number: order.and_then(|o| o.number.as_deref()),
                total_gross: order.map(|o| o.total.gross.amount.to_string()),
                currency: order.map(|o| o.total.gross.currency.as_str()),
                errors,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
