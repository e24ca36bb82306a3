//! Places the parts of a [Report] on A4 pages.
//!
//! Coordinates are millimetres from the top left corner of the page and the
//! `y` of a text element is its baseline. A cursor moves down the page as
//! each part is placed, so parts never overlap. Table rows that would cross
//! the bottom margin start a new page with the column header repeated.

use crate::report::model::{Align, Column, Report, Section, Table};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_TOP: f32 = 15.0;
const MARGIN_BOTTOM: f32 = 20.0;
/// The lowest point any element may reach.
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN_BOTTOM;

const TITLE_FONT_SIZE: f32 = 18.0;
const SECTION_FONT_SIZE: f32 = 14.0;
const NOTICE_FONT_SIZE: f32 = 10.0;
const TABLE_FONT_SIZE: f32 = 8.0;
const GRAND_TOTAL_FONT_SIZE: f32 = 12.0;

const HEADER_HEIGHT: f32 = 8.0;
const ROW_HEIGHT: f32 = 7.0;
const CELL_PADDING: f32 = 2.0;

const MM_PER_POINT: f32 = 0.3528;
/// The average advance of a Helvetica glyph as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.55;

pub type Colour = (u8, u8, u8);

const BLACK: Colour = (0, 0, 0);
const WHITE: Colour = (255, 255, 255);
const HEADER_FILL: Colour = (22, 160, 133);
const STRIPE_FILL: Colour = (245, 245, 245);
const FOOTER_FILL: Colour = (220, 220, 220);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Something drawn on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        colour: Colour,
    },
    /// A filled rectangle, `y` is the top edge.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Colour,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

/// Lay out `report` on as many pages as it needs.
pub fn layout(report: &Report) -> Vec<Page> {
    let mut cursor = Cursor::new();

    cursor.text(
        &report.title,
        MARGIN_LEFT,
        TITLE_FONT_SIZE,
        FontWeight::Regular,
    );
    cursor.y += 12.0;

    for section in &report.sections {
        match section {
            Section::Empty { message } => {
                cursor.ensure_room(ROW_HEIGHT);
                cursor.text(message, MARGIN_LEFT, NOTICE_FONT_SIZE, FontWeight::Regular);
                cursor.y += 10.0;
            }
            Section::Table { title, table } => {
                // Keep the section title with the header and the first row.
                cursor.ensure_room(8.0 + HEADER_HEIGHT + ROW_HEIGHT);
                cursor.text(title, MARGIN_LEFT, SECTION_FONT_SIZE, FontWeight::Bold);
                cursor.y += 8.0;
                cursor.table(table);
                cursor.y += 10.0;
            }
        }
    }

    if let Some(grand_total) = &report.grand_total {
        cursor.ensure_room(ROW_HEIGHT);
        cursor.text(
            grand_total,
            MARGIN_LEFT,
            GRAND_TOTAL_FONT_SIZE,
            FontWeight::Bold,
        );
    }

    cursor.pages
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: MARGIN_TOP,
        }
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = MARGIN_TOP;
    }

    /// Start a new page unless `height` fits above the bottom margin.
    /// Returns whether a new page was started.
    fn ensure_room(&mut self, height: f32) -> bool {
        if self.y + height > CONTENT_BOTTOM {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Text with its baseline at the cursor.
    fn text(&mut self, text: &str, x: f32, size: f32, weight: FontWeight) {
        self.push(Element::Text {
            text: text.to_owned(),
            x,
            y: self.y,
            size,
            weight,
            colour: BLACK,
        });
    }

    fn table(&mut self, table: &Table) {
        self.header(table.columns);

        for (index, row) in table.rows.iter().enumerate() {
            if self.ensure_room(ROW_HEIGHT) {
                self.header(table.columns);
            }

            let fill = (index % 2 == 1).then_some(STRIPE_FILL);
            self.row(table.columns, row, fill, FontWeight::Regular, None);
        }

        if self.ensure_room(ROW_HEIGHT) {
            self.header(table.columns);
        }
        self.row(
            table.columns,
            &table.footer,
            Some(FOOTER_FILL),
            FontWeight::Bold,
            Some(Align::Right),
        );
    }

    fn header(&mut self, columns: &[Column]) {
        let cells: Vec<String> = columns.iter().map(|column| column.title.to_owned()).collect();

        self.push(Element::Rect {
            x: MARGIN_LEFT,
            y: self.y,
            width: table_width(columns),
            height: HEADER_HEIGHT,
            fill: HEADER_FILL,
        });
        self.cells(columns, &cells, HEADER_HEIGHT, FontWeight::Bold, WHITE, None);
        self.y += HEADER_HEIGHT;
    }

    fn row(
        &mut self,
        columns: &[Column],
        cells: &[String],
        fill: Option<Colour>,
        weight: FontWeight,
        align: Option<Align>,
    ) {
        if let Some(fill) = fill {
            self.push(Element::Rect {
                x: MARGIN_LEFT,
                y: self.y,
                width: table_width(columns),
                height: ROW_HEIGHT,
                fill,
            });
        }

        self.cells(columns, cells, ROW_HEIGHT, weight, BLACK, align);
        self.y += ROW_HEIGHT;
    }

    /// One line of cells, vertically centred in a band of `height` below the cursor.
    /// `align` overrides the alignment of every column.
    fn cells(
        &mut self,
        columns: &[Column],
        cells: &[String],
        height: f32,
        weight: FontWeight,
        colour: Colour,
        align: Option<Align>,
    ) {
        let cap_height = TABLE_FONT_SIZE * MM_PER_POINT * 0.7;
        let baseline = self.y + (height + cap_height) / 2.0;
        let mut column_x = MARGIN_LEFT;

        for (column, cell) in columns.iter().zip(cells) {
            if !cell.is_empty() {
                let available = column.width - 2.0 * CELL_PADDING;
                let text = fit(cell, available, TABLE_FONT_SIZE);
                let x = match align.unwrap_or(column.align) {
                    Align::Left => column_x + CELL_PADDING,
                    Align::Right => {
                        column_x + column.width
                            - CELL_PADDING
                            - text_width(&text, TABLE_FONT_SIZE)
                    }
                };

                self.push(Element::Text {
                    text,
                    x,
                    y: baseline,
                    size: TABLE_FONT_SIZE,
                    weight,
                    colour,
                });
            }

            column_x += column.width;
        }
    }
}

fn table_width(columns: &[Column]) -> f32 {
    columns.iter().map(|column| column.width).sum()
}

/// The approximate width of `text` in millimetres.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVERAGE_GLYPH_WIDTH * MM_PER_POINT
}

/// Shorten `text` with a trailing "..." so that it fits in `width` millimetres.
fn fit(text: &str, width: f32, size: f32) -> String {
    if text_width(text, size) <= width {
        return text.to_owned();
    }

    let max_chars = (width / (size * AVERAGE_GLYPH_WIDTH * MM_PER_POINT)) as usize;
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();

    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use crate::report::model::{
        Column, PRINTER_COLUMNS, Report, Section, TONER_COLUMNS, Table,
    };

    use super::{CONTENT_BOTTOM, Element, FontWeight, HEADER_FILL, PAGE_WIDTH, fit, layout, text_width};

    fn toner_table(row_count: usize) -> Table {
        Table {
            columns: &TONER_COLUMNS,
            rows: (0..row_count)
                .map(|i| {
                    vec![
                        "10/03/2025".to_owned(),
                        format!("Cliente {i}"),
                        "R$ 80,00".to_owned(),
                        "10,0%".to_owned(),
                        "R$ 8,00".to_owned(),
                    ]
                })
                .collect(),
            footer: vec![
                String::new(),
                String::new(),
                String::new(),
                "Total Seção:".to_owned(),
                "R$ 8,00".to_owned(),
            ],
        }
    }

    fn report(sections: Vec<Section>) -> Report {
        Report {
            title: "Relatório de Comissões - Março de 2025".to_owned(),
            sections,
            grand_total: Some("Comissão Total (Geral): R$ 8,00".to_owned()),
        }
    }

    fn texts(elements: &[Element]) -> Vec<&str> {
        elements
            .iter()
            .filter_map(|element| match element {
                Element::Text { text, .. } => Some(text.as_str()),
                Element::Rect { .. } => None,
            })
            .collect()
    }

    fn header_count(elements: &[Element]) -> usize {
        elements
            .iter()
            .filter(|element| matches!(element, Element::Rect { fill, .. } if *fill == HEADER_FILL))
            .count()
    }

    #[test]
    fn small_report_fits_on_one_page() {
        let pages = layout(&report(vec![Section::Table {
            title: "Serviços de Recarga de Toner",
            table: toner_table(3),
        }]));

        assert_eq!(pages.len(), 1);
        let texts = texts(&pages[0].elements);
        assert_eq!(texts[0], "Relatório de Comissões - Março de 2025");
        assert_eq!(texts[1], "Serviços de Recarga de Toner");
        assert!(texts.contains(&"Total Seção:"));
        assert_eq!(texts.last(), Some(&"Comissão Total (Geral): R$ 8,00"));
    }

    #[test]
    fn long_table_repeats_header_on_new_page() {
        let pages = layout(&report(vec![Section::Table {
            title: "Serviços de Recarga de Toner",
            table: toner_table(60),
        }]));

        assert_eq!(pages.len(), 2);
        assert_eq!(header_count(&pages[0].elements), 1);
        assert_eq!(header_count(&pages[1].elements), 1);
        assert_eq!(texts(&pages[1].elements)[0], "Data");
        assert!(texts(&pages[1].elements).contains(&"Cliente 59"));
    }

    #[test]
    fn nothing_crosses_the_bottom_margin() {
        let pages = layout(&report(vec![
            Section::Table {
                title: "Serviços de Recarga de Toner",
                table: toner_table(45),
            },
            Section::Table {
                title: "Serviços de Recarga de Toner",
                table: toner_table(45),
            },
        ]));

        for page in &pages {
            for element in &page.elements {
                let bottom = match element {
                    Element::Text { y, .. } => *y,
                    Element::Rect { y, height, .. } => y + height,
                };
                assert!(bottom <= CONTENT_BOTTOM, "{element:?} crosses the margin");
            }
        }
    }

    #[test]
    fn sections_are_placed_below_each_other() {
        let pages = layout(&report(vec![
            Section::Empty {
                message: "Nenhum impressora para este período.",
            },
            Section::Table {
                title: "Serviços de Recarga de Toner",
                table: toner_table(2),
            },
        ]));

        let mut last_y = 0.0;
        for element in &pages[0].elements {
            if let Element::Text {
                y,
                weight: FontWeight::Bold,
                size,
                ..
            } = element
                && *size > 8.0
            {
                assert!(*y > last_y, "section heading at {y} is not below {last_y}");
                last_y = *y;
            }
        }
    }

    #[test]
    fn right_aligned_cells_end_at_column_edge() {
        let pages = layout(&report(vec![Section::Table {
            title: "Serviços de Impressora",
            table: Table {
                columns: &PRINTER_COLUMNS,
                rows: vec![vec![
                    "15/03/2025".to_owned(),
                    "João".to_owned(),
                    "HP M404dn".to_owned(),
                    "Venda".to_owned(),
                    "R$ 500,00".to_owned(),
                    "10,0%".to_owned(),
                    "R$ 50,00".to_owned(),
                ]],
                footer: vec![String::new(); 7],
            },
        }]));

        let table_right = 14.0 + PRINTER_COLUMNS.iter().map(|c: &Column| c.width).sum::<f32>();
        let commission = pages[0]
            .elements
            .iter()
            .find_map(|element| match element {
                Element::Text { text, x, size, .. } if text == "R$ 50,00" => {
                    Some(x + text_width(text, *size))
                }
                _ => None,
            })
            .expect("commission cell missing");

        assert!((commission - (table_right - 2.0)).abs() < 0.01);
        assert!(table_right <= PAGE_WIDTH);
    }

    #[test]
    fn long_text_is_shortened() {
        let text = fit("Companhia Brasileira de Impressoras e Suprimentos", 30.0, 8.0);

        assert!(text.ends_with("..."));
        assert!(text_width(&text, 8.0) <= 30.0);
        assert_eq!(fit("Ana", 30.0, 8.0), "Ana");
    }
}
