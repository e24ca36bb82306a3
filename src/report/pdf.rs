//! Draws laid out report pages with printpdf.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
    path::{PaintMode, WindingOrder},
};

use crate::{
    Error,
    report::{
        Report,
        layout::{Colour, Element, FontWeight, PAGE_HEIGHT, PAGE_WIDTH, layout},
    },
};

/// Render `report` as a PDF document.
///
/// # Errors
/// Returns [Error::ReportRenderError] if printpdf fails to build the document.
pub fn render_pdf(report: &Report) -> Result<Vec<u8>, Error> {
    let pages = layout(report);

    let (doc, first_page, first_layer) = PdfDocument::new(
        report.title.clone(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|error| Error::ReportRenderError(error.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|error| Error::ReportRenderError(error.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}", index + 1),
            );
            doc.get_page(page_index).get_layer(layer_index)
        };

        for element in &page.elements {
            draw(&layer, element, &regular, &bold);
        }
    }

    tracing::debug!("rendered report \"{}\" on {} page(s)", report.title, pages.len());

    doc.save_to_bytes()
        .map_err(|error| Error::ReportRenderError(error.to_string()))
}

fn draw(
    layer: &PdfLayerReference,
    element: &Element,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    match element {
        Element::Text {
            text,
            x,
            y,
            size,
            weight,
            colour,
        } => {
            let font = match weight {
                FontWeight::Regular => regular,
                FontWeight::Bold => bold,
            };

            layer.set_fill_color(rgb(*colour));
            layer.use_text(text.clone(), *size, Mm(*x), Mm(PAGE_HEIGHT - y), font);
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            let top = PAGE_HEIGHT - y;
            let bottom = top - height;
            let points = vec![
                (Point::new(Mm(*x), Mm(bottom)), false),
                (Point::new(Mm(x + width), Mm(bottom)), false),
                (Point::new(Mm(x + width), Mm(top)), false),
                (Point::new(Mm(*x), Mm(top)), false),
            ];

            layer.set_fill_color(rgb(*fill));
            layer.add_polygon(Polygon {
                rings: vec![points],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }
    }
}

fn rgb((red, green, blue): Colour) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(red) / 255.0,
        f32::from(green) / 255.0,
        f32::from(blue) / 255.0,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        period::Period,
        report::Report,
        sale::{NewSale, Product, ProductFilter, SaleId},
    };

    use super::render_pdf;

    #[test]
    fn renders_a_pdf_document() {
        let sales: Vec<_> = (0..50)
            .map(|i| {
                NewSale::new(
                    date!(2025 - 03 - 10),
                    &format!("Cliente {i}"),
                    Product::TonerRefill,
                    80.0,
                    10.0,
                )
                .unwrap()
                .with_id(SaleId::new(i.to_string()))
            })
            .collect();
        let period = Period {
            year: 2025,
            month: Month::March,
            filter: ProductFilter::All,
        };
        let report = Report::build(&sales, &period).unwrap();

        let bytes = render_pdf(&report).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }
}
