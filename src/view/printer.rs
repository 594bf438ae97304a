use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, Table};

use crate::capture::model::{CapturedRequest, StatusClass};

const EMPTY_STORE_MESSAGE: &str = "Requests will appear here. Reload the page to capture traffic.";
const NO_MATCH_MESSAGE: &str = "No requests match the filter.";

/// 渲染请求列表
///
/// `rows` 是过滤后的 (索引, 请求)，`total` 是会话中的总数，用于区分
/// "还没有请求" 和 "没有匹配的请求"。
pub fn render_requests(rows: &[(usize, &CapturedRequest)], total: usize, color: bool) -> String {
    if rows.is_empty() {
        return if total == 0 {
            EMPTY_STORE_MESSAGE.to_string()
        } else {
            NO_MATCH_MESSAGE.to_string()
        };
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["#", "Time", "Method", "URL", "Status", "GQL"]);
    if !color {
        table.force_no_tty();
    }

    for (index, request) in rows {
        let status_color = match request.status_class() {
            StatusClass::Success => Color::Green,
            StatusClass::Redirect => Color::Yellow,
            StatusClass::Error => Color::Red,
        };

        let mut status = Cell::new(request.status);
        let mut url = Cell::new(request.path_and_query());
        if color {
            status = status.fg(status_color);
            url = url.add_attribute(Attribute::Dim);
        }

        table.add_row(vec![
            Cell::new(index),
            Cell::new(request.display_time()),
            Cell::new(&request.method),
            url,
            status,
            Cell::new(if request.is_graphql { "✓" } else { "" }),
        ]);
    }

    table.to_string()
}

pub fn print_requests(rows: &[(usize, &CapturedRequest)], total: usize, color: bool) {
    println!("{}", render_requests(rows, total, color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::exchange::{Exchange, ResponseContent};

    fn record(url: &str, status: u16, is_graphql: bool) -> CapturedRequest {
        CapturedRequest::from_exchange(
            Exchange::new("POST", url).with_status(status, ""),
            ResponseContent::default(),
            is_graphql,
        )
    }

    #[test]
    fn test_empty_messages() {
        assert_eq!(render_requests(&[], 0, false), EMPTY_STORE_MESSAGE);
        assert_eq!(render_requests(&[], 3, false), NO_MATCH_MESSAGE);
    }

    #[test]
    fn test_table_rows() {
        let a = record("https://example.com/graphql?op=Me", 200, true);
        let b = record("https://example.com/api/users", 404, false);
        let rows = vec![(0, &a), (7, &b)];

        let output = render_requests(&rows, 10, false);
        assert!(output.contains("/graphql?op=Me"));
        assert!(output.contains("/api/users"));
        assert!(output.contains("404"));
        assert!(output.contains("✓"));
        assert!(output.contains(" 7 "));
    }
}
