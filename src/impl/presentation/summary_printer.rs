use iso_currency::Currency;
use textwrap::Options;

use crate::entities::{Ledger, TaxpayerInfo};

use super::utils::format_amount;

const NAME_WIDTH: usize = 52;
const AMOUNT_WIDTH: usize = 20;

/// Plain-text rendering of the form, grouped by section.
pub(crate) struct SummaryPrinter {
    currency: Currency,
}

impl SummaryPrinter {
    pub(crate) fn new() -> Self {
        Self {
            currency: Currency::COP,
        }
    }

    pub(crate) fn print_summary(&self, ledger: &Ledger, taxpayer_info: &TaxpayerInfo) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", ledger.schema().form()));
        self.print_taxpayer(&mut output, taxpayer_info);
        output.push_str("(*) calculado automáticamente\n");

        for section in ledger.schema().sections() {
            output.push_str(&format!("\n--- {} ---\n\n", section));
            for bucket in ledger.buckets().iter().filter(|b| b.section() == section) {
                let marker = if bucket.is_calculated() { '*' } else { ' ' };
                let name = textwrap::wrap(bucket.name(), NAME_WIDTH);
                let amount = format_amount(bucket.value(), self.currency);
                let mut name_lines = name.iter();
                output.push_str(&format!(
                    "{:>4}{} {:<name_width$} {:>amount_width$}\n",
                    bucket.id().as_str(),
                    marker,
                    name_lines.next().map(|l| l.to_string()).unwrap_or_default(),
                    amount,
                    name_width = NAME_WIDTH,
                    amount_width = AMOUNT_WIDTH,
                ));
                for line in name_lines {
                    output.push_str(&format!("      {}\n", line));
                }
                for source in bucket.sources() {
                    let entry = format!(
                        "- {}: {}",
                        source.doc_name,
                        format_amount(source.value, self.currency)
                    );
                    output.push_str(&textwrap::fill(
                        &entry,
                        Options::new(NAME_WIDTH + AMOUNT_WIDTH)
                            .initial_indent("        ")
                            .subsequent_indent("          "),
                    ));
                    output.push('\n');
                }
            }
        }

        output
    }

    fn print_taxpayer(&self, output: &mut String, info: &TaxpayerInfo) {
        let name = if info.name.is_empty() {
            "(sin nombre)"
        } else {
            info.name.as_str()
        };
        output.push_str(&format!("Contribuyente: {}", name));
        if !info.id_number.is_empty() {
            output.push_str(&format!(" ({} {})", info.id_type, info.id_number));
        }
        output.push('\n');
        output.push_str(&format!(
            "Ciudad: {} | Año gravable: {}\n",
            info.city, info.tax_year
        ));
    }
}
