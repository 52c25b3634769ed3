//! HTML table parsing
//!
//! Reads the first `<tbody>` of a page. Only direct `<tr>` children with at
//! least three direct `<td>` cells become records; header rows built from
//! `<th>` cells fall out naturally.

use super::{BankRecord, round2};
use crate::error::{EtlError, EtlResult};
use scraper::{ElementRef, Html, Selector};

const MIN_CELLS: usize = 3;

/// Parse bank records out of a page's first table body
///
/// # Errors
/// - [`EtlError::Parse`] if the markup is blank
/// - [`EtlError::Structural`] if there is no `<tbody>` or a cell lacks text
/// - [`EtlError::Value`] if a market cap is not a number
pub fn parse_bank_table(markup: &str) -> EtlResult<Vec<BankRecord>> {
    if markup.trim().is_empty() {
        return Err(EtlError::Parse("document is empty".to_string()));
    }

    let document = Html::parse_document(markup);
    let tbody_selector =
        Selector::parse("tbody").map_err(|e| EtlError::Parse(format!("{:?}", e)))?;

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or_else(|| EtlError::Structural("no table body found".to_string()))?;

    let mut raw_rows = Vec::new();
    for (index, row) in child_elements(tbody, "tr").enumerate() {
        let cells: Vec<ElementRef> = child_elements(row, "td").collect();
        if cells.len() < MIN_CELLS {
            log::trace!("Skipping row {} with {} cell(s)", index + 1, cells.len());
            continue;
        }

        let rank = first_text(cells[0], index, "rank")?;
        let name = cells[1].text().collect::<String>().trim().to_string();
        let market_cap = first_text(cells[2], index, "market cap")?;
        raw_rows.push((index, rank, name, market_cap));
    }

    // Coerce the market cap column once every row has been read
    raw_rows
        .into_iter()
        .map(|(index, rank, name, market_cap)| {
            let value = market_cap.parse::<f64>().map_err(|_| EtlError::Value {
                context: format!("market cap of row {}", index + 1),
                value: market_cap.clone(),
            })?;
            Ok(BankRecord::new(rank, name, round2(value)))
        })
        .collect()
}

/// Direct element children with the given tag name, in document order
fn child_elements<'a>(
    parent: ElementRef<'a>,
    tag: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}

/// Trimmed content of the first direct text node, ignoring nested elements
fn first_text(cell: ElementRef, row: usize, column: &str) -> EtlResult<String> {
    cell.children()
        .find_map(|node| node.value().as_text().map(|text| text.trim().to_string()))
        .ok_or_else(|| {
            EtlError::Structural(format!("row {}: {} cell has no text", row + 1, column))
        })
}
