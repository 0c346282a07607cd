/// Spreadsheet (CSV) export and browser downloads
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Types that can be written as one spreadsheet row
pub trait ExcelExportable {
    /// Column headers
    fn headers() -> Vec<&'static str>;

    /// Cell values, same order as `headers()`
    fn to_csv_row(&self) -> Vec<String>;
}

/// Build the CSV text: UTF-8 BOM, `;` separator, one line per item
pub fn build_csv<T: ExcelExportable>(data: &[T]) -> String {
    let mut csv_content = String::new();

    // BOM so Excel opens the file as UTF-8 (accents, ñ)
    csv_content.push('\u{FEFF}');

    csv_content.push_str(&T::headers().join(";"));
    csv_content.push('\n');

    for item in data {
        let escaped_row: Vec<String> = item
            .to_csv_row()
            .iter()
            .map(|cell| escape_csv_cell(cell))
            .collect();
        csv_content.push_str(&escaped_row.join(";"));
        csv_content.push('\n');
    }

    csv_content
}

/// Export `data` to a CSV file and start the download
pub fn export_to_excel<T: ExcelExportable>(data: &[T], filename: &str) -> Result<(), String> {
    if data.is_empty() {
        return Err("No hay datos para exportar".to_string());
    }
    let csv_content = build_csv(data);
    download_text(&csv_content, "text/csv;charset=utf-8;", filename)?;
    log::info!("exported {} rows to {}", data.len(), filename);
    Ok(())
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

/// Offer `content` as a file download
pub fn download_text(content: &str, mime: &str, filename: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    let blob = Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))?;
    download_blob(&blob, filename)
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

/// Keep only characters that are safe in a file name
pub fn file_name_part(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "sin_nombre".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl ExcelExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Orden", "Cliente"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_build_csv_layout() {
        let csv = build_csv(&[Row("0000001", "Juan Pérez")]);
        assert_eq!(csv, "\u{FEFF}Orden;Cliente\n0000001;Juan Pérez\n");
    }

    #[test]
    fn test_cells_with_separators_are_quoted() {
        let csv = build_csv(&[Row("0000002", "Martillo; \"grande\"")]);
        assert!(csv.ends_with("0000002;\"Martillo; \"\"grande\"\"\"\n"));
    }

    #[test]
    fn test_file_name_part() {
        assert_eq!(file_name_part("Juan Pérez"), "Juan_Pérez");
        assert_eq!(file_name_part("  "), "sin_nombre");
        assert_eq!(file_name_part("A/B"), "A_B");
    }
}
