use ego_tree::NodeId;
use engine_logging::engine_debug;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use tablescrape_core::{CellValue, TabularDataset};

/// Upper bound for `colspan`/`rowspan`, so a hostile page cannot blow up the grid.
const MAX_SPAN: usize = 1_000;

pub trait TableParser: Send + Sync {
    /// Every table found in `html`, in document order. Empty when there are none.
    fn parse(&self, html: &str) -> Vec<TabularDataset>;
}

/// Extracts `<table>` elements into datasets:
/// - header labels come from `<thead>`, else from leading rows made only of `<th>`
/// - stacked header rows are joined per column with a space
/// - `colspan`/`rowspan` cells are repeated into every slot they cover
/// - nested tables are returned as tables of their own
/// - numeric-looking cells become numbers, blank cells become empty
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlTableParser;

impl TableParser for HtmlTableParser {
    fn parse(&self, html: &str) -> Vec<TabularDataset> {
        let document = Html::parse_document(html);
        let (Ok(table_sel), Ok(row_sel)) = (Selector::parse("table"), Selector::parse("tr")) else {
            return Vec::new();
        };

        document
            .select(&table_sel)
            .enumerate()
            .filter_map(|(position, table)| {
                let parsed = build_table(table, &row_sel);
                if parsed.is_none() {
                    engine_debug!("skipping table #{} without cells", position + 1);
                }
                parsed
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Head,
    Body,
    Foot,
}

#[derive(Debug, Clone, PartialEq)]
struct RawCell {
    text: String,
    header: bool,
}

impl RawCell {
    fn empty() -> Self {
        Self {
            text: String::new(),
            header: false,
        }
    }
}

struct SpannedCell {
    cell: RawCell,
    colspan: usize,
    rowspan: usize,
}

struct GridRow {
    section: Section,
    cells: Vec<RawCell>,
}

fn build_table(table: ElementRef<'_>, row_sel: &Selector) -> Option<TabularDataset> {
    let rows = table
        .select(row_sel)
        .filter(|row| nearest_table(*row) == Some(node_id(table)))
        .map(|row| (row_section(row), row_cells(row)))
        .collect::<Vec<_>>();

    let grid = expand_spans(rows);
    let (header_rows, body_rows) = split_header(grid);

    let width = header_rows
        .iter()
        .chain(body_rows.iter())
        .map(|row| row.cells.len())
        .max()
        .unwrap_or(0);
    if width == 0 {
        return None;
    }

    let columns = (0..width)
        .map(|col| column_label(&header_rows, col))
        .collect();
    let rows = body_rows
        .into_iter()
        .map(|row| {
            let mut values: Vec<CellValue> =
                row.cells.into_iter().map(|cell| cell_value(cell.text)).collect();
            values.resize(width, CellValue::Empty);
            values
        })
        .collect();

    TabularDataset::new(columns, rows).ok()
}

fn nearest_table(element: ElementRef<'_>) -> Option<NodeId> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "table")
        .map(node_id)
}

fn node_id(element: ElementRef<'_>) -> NodeId {
    (*element).id()
}

fn row_section(row: ElementRef<'_>) -> Section {
    match row.parent().and_then(ElementRef::wrap) {
        Some(parent) if parent.value().name() == "thead" => Section::Head,
        Some(parent) if parent.value().name() == "tfoot" => Section::Foot,
        _ => Section::Body,
    }
}

fn row_cells(row: ElementRef<'_>) -> Vec<SpannedCell> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| SpannedCell {
            cell: RawCell {
                text: cell_text(cell),
                header: cell.value().name() == "th",
            },
            colspan: parse_span(cell.value().attr("colspan")),
            rowspan: parse_span(cell.value().attr("rowspan")),
        })
        .collect()
}

fn parse_span(attr: Option<&str>) -> usize {
    attr.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
        .min(MAX_SPAN)
}

/// Visible text with `<br>` as a space and whitespace runs collapsed.
fn cell_text(cell: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Text(text) => raw.push_str(text),
            Node::Element(element) if element.name() == "br" => raw.push(' '),
            _ => {}
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lays cells out on a grid, repeating spanned cells into every slot they cover.
fn expand_spans(rows: Vec<(Section, Vec<SpannedCell>)>) -> Vec<GridRow> {
    let mut carried: Vec<Option<(usize, RawCell)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for (section, cells) in rows {
        let mut out = Vec::new();
        let mut cells = cells.into_iter();
        let mut col = 0;
        loop {
            if let Some(cell) = take_carried(&mut carried, col) {
                out.push(cell);
                col += 1;
                continue;
            }
            match cells.next() {
                Some(spanned) => {
                    for _ in 0..spanned.colspan {
                        if spanned.rowspan > 1 {
                            if carried.len() <= col {
                                carried.resize(col + 1, None);
                            }
                            carried[col] = Some((spanned.rowspan - 1, spanned.cell.clone()));
                        }
                        out.push(spanned.cell.clone());
                        col += 1;
                    }
                }
                None if carried.iter().skip(col).any(Option::is_some) => {
                    out.push(RawCell::empty());
                    col += 1;
                }
                None => break,
            }
        }
        if !out.is_empty() {
            grid.push(GridRow {
                section,
                cells: out,
            });
        }
    }
    grid
}

fn take_carried(carried: &mut [Option<(usize, RawCell)>], col: usize) -> Option<RawCell> {
    let slot = carried.get_mut(col)?;
    let (remaining, cell) = slot.take()?;
    if remaining > 1 {
        *slot = Some((remaining - 1, cell.clone()));
    }
    Some(cell)
}

/// Separates header rows from data rows; footer rows move to the end of the data.
fn split_header(grid: Vec<GridRow>) -> (Vec<GridRow>, Vec<GridRow>) {
    let has_thead = grid.iter().any(|row| row.section == Section::Head);
    let leading_th_rows = grid
        .iter()
        .take_while(|row| row.cells.iter().all(|cell| cell.header))
        .count();

    let mut header = Vec::new();
    let mut body = Vec::new();
    let mut foot = Vec::new();
    for (position, row) in grid.into_iter().enumerate() {
        let is_header = if has_thead {
            row.section == Section::Head
        } else {
            position < leading_th_rows
        };
        if is_header {
            header.push(row);
        } else if row.section == Section::Foot {
            foot.push(row);
        } else {
            body.push(row);
        }
    }
    body.extend(foot);
    (header, body)
}

fn column_label(header_rows: &[GridRow], col: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for text in header_rows
        .iter()
        .filter_map(|row| row.cells.get(col))
        .map(|cell| cell.text.as_str())
        .filter(|text| !text.is_empty())
    {
        // A header cell spanning several header rows is named once.
        if parts.last() != Some(&text) {
            parts.push(text);
        }
    }
    if parts.is_empty() {
        col.to_string()
    } else {
        parts.join(" ")
    }
}

fn cell_value(text: String) -> CellValue {
    if text.is_empty() {
        return CellValue::Empty;
    }
    match parse_number(&text) {
        Some(number) => CellValue::Number(number),
        None => CellValue::Text(text),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let first = unsigned.chars().next()?;
    if !(first.is_ascii_digit() || first == '.') {
        return None;
    }
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | 'e' | 'E' | '-' | '+'))
    {
        return None;
    }
    let cleaned = if unsigned.contains(',') {
        if !has_thousands_grouping(unsigned) {
            return None;
        }
        text.replace(',', "")
    } else {
        text.to_string()
    };
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn has_thousands_grouping(unsigned: &str) -> bool {
    let integer = unsigned.split('.').next().unwrap_or(unsigned);
    let mut groups = integer.split(',');
    let lead = groups.next().unwrap_or("");
    (1..=3).contains(&lead.len()) && groups.all(|group| group.len() == 3)
}
