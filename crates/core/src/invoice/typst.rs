//! Typst invoice
//!
//! Renders an [`Invoice`] as Typst source. Every piece of order data is emitted as a
//! Typst string literal, so names and addresses never need markup escaping.

use std::fmt::Write;

use super::{Invoice, InvoiceAddress};

/// Render the invoice as a Typst document sized for A4.
#[must_use]
pub fn render(invoice: &Invoice) -> String {
    let mut output = String::new();

    output.push_str("#set page(paper: \"a4\", margin: 2cm)\n");
    output.push_str("#set text(size: 10pt)\n\n");

    _ = writeln!(output, "= Invoice #text({})\n", literal(&invoice.number));
    _ = writeln!(output, "Date: #text({})\\", literal(&invoice.issued_on()));
    _ = writeln!(
        output,
        "Payment: #text({}) (#text({}))\n",
        literal(invoice.payment_method.as_str()),
        literal(invoice.payment_status.as_str())
    );

    output.push_str("#grid(\n  columns: (1fr, 1fr),\n  gutter: 1em,\n");
    render_address(&mut output, "Bill to", &invoice.billing);
    render_address(&mut output, "Ship to", &invoice.shipping);
    output.push_str(")\n\n");

    output.push_str("#table(\n  columns: (auto, 1fr, auto, auto, auto),\n");
    output.push_str("  align: (left, left, right, right, right),\n");
    output.push_str("  table.header[*\\#*][*Item*][*Qty*][*Unit price*][*Amount*],\n");

    for (idx, line) in invoice.lines.iter().enumerate() {
        _ = writeln!(
            output,
            "  {}, {}, {}, {}, {},",
            literal(&(idx + 1).to_string()),
            literal(&line.description),
            literal(&line.quantity.to_string()),
            literal(&invoice.format_amount(line.unit_price)),
            literal(&invoice.format_amount(line.amount())),
        );
    }

    _ = writeln!(
        output,
        "  [], [*Total*], [], [], strong({}),",
        literal(&invoice.format_amount(invoice.total()))
    );
    output.push_str(")\n");

    output
}

fn render_address(output: &mut String, heading: &str, address: &InvoiceAddress) {
    let lines = address.lines();

    if lines.is_empty() {
        _ = writeln!(output, "  [*{heading}*],");

        return;
    }

    let lines = lines
        .iter()
        .map(|line| literal(line))
        .collect::<Vec<_>>()
        .join(", ");

    _ = writeln!(
        output,
        "  [*{heading}*\\ #({lines},).join(linebreak())],"
    );
}

/// Quote `value` as a Typst string literal.
fn literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);

    out.push('"');

    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }

    out.push('"');

    out
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::invoice::tests::invoice;

    #[test]
    fn literal_escapes_quotes_and_backslashes() {
        assert_eq!(literal(r#"5" \ #1"#), r#""5\" \\ #1""#);
        assert_eq!(literal("a\nb"), r#""a\nb""#);
    }

    #[test]
    fn render_produces_a4_document_with_lines() -> TestResult {
        let output = render(&invoice()?);

        assert!(output.starts_with("#set page(paper: \"a4\""));
        assert!(output.contains("= Invoice #text(\"0190a0b1-0000-7000-8000-000000000001\")"));
        assert!(output.contains("\"Trail Shoes\""));
        assert!(output.contains("\"12 MG Road\""));
        assert!(output.contains("[*Total*]"));

        Ok(())
    }

    #[test]
    fn user_text_cannot_inject_markup() -> TestResult {
        let mut invoice = invoice()?;

        if let Some(line) = invoice.lines.first_mut() {
            line.description = "Shoes\"), #panic(\"x".to_string();
        }

        let output = render(&invoice);

        assert!(output.contains(r#""Shoes\"), #panic(\"x""#));

        Ok(())
    }
}
