use crate::domain::cart::LineItem;
use crate::domain::money::Money;
use crate::domain::pricing::CartTotals;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct SummaryRow {
    item: String,
    description: String,
    quantity: Option<u32>,
    amount: String,
    display: String,
}

impl SummaryRow {
    fn total(item: &str, amount: Money, display: String) -> Self {
        Self {
            item: item.to_string(),
            description: String::new(),
            quantity: None,
            amount: format!("{:.2}", amount.rounded().value()),
            display,
        }
    }
}

/// Writes the cart lines followed by the totals as CSV.
pub struct CartWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CartWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_summary(&mut self, lines: &[LineItem], totals: &CartTotals) -> Result<()> {
        for line in lines {
            let description = match &line.variation {
                Some(variation) => format!("{} ({variation})", line.name),
                None => line.name.clone(),
            };
            let amount = line.line_total();
            self.writer.serialize(SummaryRow {
                item: format!("line:{}", line.id),
                description,
                quantity: Some(line.quantity),
                amount: format!("{:.2}", amount.rounded().value()),
                display: amount.to_brl(),
            })?;
        }

        self.writer.serialize(SummaryRow::total(
            "subtotal",
            totals.subtotal,
            totals.subtotal.to_brl(),
        ))?;
        self.writer.serialize(SummaryRow::total(
            "shipping",
            totals.shipping,
            totals.shipping.to_shipping_label(),
        ))?;
        self.writer.serialize(SummaryRow::total(
            "discount",
            totals.discount,
            totals.discount.to_brl(),
        ))?;
        self.writer
            .serialize(SummaryRow::total("total", totals.total, totals.total.to_brl()))?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::compute_totals;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_summary() {
        let lines = vec![LineItem {
            id: 4,
            product_id: 1,
            name: "Camiseta Básica".to_string(),
            unit_price: Money::new(dec!(49.9)),
            quantity: 2,
            variation_id: Some(2),
            variation: Some("Tamanho - M".to_string()),
        }];
        let totals = compute_totals(&lines, None);

        let mut buffer = Vec::new();
        CartWriter::new(&mut buffer)
            .write_summary(&lines, &totals)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("item,description,quantity,amount,display\n"));
        assert!(output.contains("line:4,Camiseta Básica (Tamanho - M),2,99.80,\"R$ 99,80\""));
        assert!(output.contains("subtotal,,,99.80,\"R$ 99,80\""));
        assert!(output.contains("shipping,,,15.00,\"R$ 15,00\""));
        assert!(output.contains("total,,,114.80,\"R$ 114,80\""));
    }

    #[test]
    fn test_free_shipping_label() {
        let totals = compute_totals(
            &[LineItem {
                id: 1,
                product_id: 3,
                name: "Tênis".to_string(),
                unit_price: Money::new(dec!(200)),
                quantity: 1,
                variation_id: None,
                variation: None,
            }],
            None,
        );
        let mut buffer = Vec::new();
        CartWriter::new(&mut buffer)
            .write_summary(&[], &totals)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("shipping,,,0.00,Grátis"));
    }
}
