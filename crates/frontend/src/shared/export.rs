/// Выгрузка файлов из браузера: CSV/текст через Blob, серверные файлы по ссылке, печать
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const CSV_MIME: &str = "text/csv;charset=utf-8;";

/// Сохраняет текст в файл и инициирует скачивание
///
/// CSV gets a UTF-8 BOM so spreadsheet tools detect the encoding.
pub fn download_text(content: &str, filename: &str, mime: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("没有可导出的数据".to_string());
    }

    let mut body = String::with_capacity(content.len() + 3);
    if mime.starts_with("text/csv") {
        body.push('\u{FEFF}');
    }
    body.push_str(content);

    let blob = create_blob(&body, mime)?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let result = click_link(&url, Some(filename));

    // Освобождаем URL
    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;
    result
}

/// Скачивание файла, который формирует сервер (`/api/export/csv`, `/api/reports/export`)
pub fn download_url(url: &str, filename: Option<&str>) -> Result<(), String> {
    click_link(url, filename)
}

/// Opens `html` in a new window and calls the print dialog.
pub fn open_print_window(html: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let print_window = window
        .open_with_url_and_target("", "_blank")
        .map_err(|e| format!("Failed to open window: {:?}", e))?
        .ok_or("Popup blocked")?;
    let document = print_window.document().ok_or("No document object")?;
    let root = document
        .document_element()
        .ok_or("No document element")?;
    root.set_inner_html(html);
    print_window
        .print()
        .map_err(|e| format!("Failed to print: {:?}", e))?;
    Ok(())
}

fn create_blob(content: &str, mime: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type(mime);

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Временная ссылка: добавить в DOM, кликнуть, удалить
fn click_link(href: &str, filename: Option<&str>) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(href);
    if let Some(name) = filename {
        anchor.set_download(name);
    }
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

    Ok(())
}
