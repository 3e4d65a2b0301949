//! WordprocessingML fragment builders.
//!
//! Small string-level helpers shared by the table emitter. Everything here
//! escapes its text content; callers pass raw field values straight through.

/// Escape text for XML content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Text alignment inside a paragraph.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
}

/// A run of text with font and size (half-points).
fn run(text: &str, font: &str, half_points: u32, bold: bool) -> String {
    let bold_tag = if bold { "<w:b/>" } else { "" };
    format!(
        "<w:r><w:rPr><w:rFonts w:ascii=\"{font}\" w:eastAsia=\"{font}\"/>{bold_tag}\
         <w:sz w:val=\"{half_points}\"/><w:szCs w:val=\"{half_points}\"/></w:rPr>\
         <w:t xml:space=\"preserve\">{}</w:t></w:r>",
        escape(text)
    )
}

/// A single-run paragraph.
pub(crate) fn paragraph(text: &str, font: &str, half_points: u32, bold: bool, align: Align) -> String {
    let jc = match align {
        Align::Left => "left",
        Align::Center => "center",
    };
    format!(
        "<w:p><w:pPr><w:jc w:val=\"{jc}\"/></w:pPr>{}</w:p>",
        run(text, font, half_points, bold)
    )
}

/// An empty spacer paragraph between tables.
pub(crate) fn spacer_paragraph() -> String {
    "<w:p/>".to_string()
}

/// A table cell.
///
/// `width_pct` is a percentage of the table width; WordprocessingML stores
/// it in fiftieths of a percent. `grid_span > 1` merges the cell across
/// that many grid columns.
pub(crate) fn cell(
    text: &str,
    width_pct: u32,
    grid_span: u32,
    font: &str,
    half_points: u32,
    bold: bool,
    align: Align,
) -> String {
    let span_tag = if grid_span > 1 {
        format!("<w:gridSpan w:val=\"{grid_span}\"/>")
    } else {
        String::new()
    };
    format!(
        "<w:tc><w:tcPr><w:tcW w:w=\"{}\" w:type=\"pct\"/>{span_tag}</w:tcPr>{}</w:tc>",
        width_pct * 50,
        paragraph(text, font, half_points, bold, align)
    )
}

/// A table row from pre-built cells.
pub(crate) fn row(cells: &[String]) -> String {
    format!("<w:tr>{}</w:tr>", cells.concat())
}

/// A full-width table with single borders on every edge, inside and out.
pub(crate) fn table(rows: &[String]) -> String {
    const BORDER: &str = "<w:top w:val=\"single\" w:sz=\"4\" w:color=\"000000\"/>\
        <w:left w:val=\"single\" w:sz=\"4\" w:color=\"000000\"/>\
        <w:bottom w:val=\"single\" w:sz=\"4\" w:color=\"000000\"/>\
        <w:right w:val=\"single\" w:sz=\"4\" w:color=\"000000\"/>\
        <w:insideH w:val=\"single\" w:sz=\"4\" w:color=\"000000\"/>\
        <w:insideV w:val=\"single\" w:sz=\"4\" w:color=\"000000\"/>";
    format!(
        "<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/>\
         <w:tblBorders>{BORDER}</w:tblBorders></w:tblPr>{}</w:tbl>",
        rows.concat()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("A&B <C>"), "A&amp;B &lt;C&gt;");
        assert_eq!(escape("\"引号\"'"), "&quot;引号&quot;&apos;");
    }

    #[test]
    fn cell_emits_grid_span_only_when_merged() {
        let plain = cell("x", 25, 1, "SimSun", 24, false, Align::Left);
        assert!(!plain.contains("gridSpan"));

        let merged = cell("x", 75, 3, "SimSun", 24, false, Align::Left);
        assert!(merged.contains("<w:gridSpan w:val=\"3\"/>"));
        assert!(merged.contains("w:w=\"3750\""));
    }

    #[test]
    fn paragraph_centers_and_bolds() {
        let p = paragraph("旁 站 记 录", "SimHei", 32, true, Align::Center);
        assert!(p.contains("w:val=\"center\""));
        assert!(p.contains("<w:b/>"));
        assert!(p.contains("SimHei"));
    }
}
