use inquire::Select;

use crate::capture::model::CapturedRequest;
use crate::{ReqcopyError, Result};

/// 交互式选择一条请求，返回其在会话中的索引
///
/// 没有可选请求时返回 None。
pub fn select_interactive(rows: &[(usize, &CapturedRequest)]) -> Result<Option<usize>> {
    if rows.is_empty() {
        return Ok(None);
    }

    #[derive(Clone)]
    struct RowWrapper {
        index: usize,
        display: String,
    }

    impl std::fmt::Display for RowWrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.display)
        }
    }

    let options: Vec<RowWrapper> = rows
        .iter()
        .map(|(index, request)| RowWrapper {
            index: *index,
            display: format_row_for_display(*index, request),
        })
        .collect();

    let selected = Select::new("Select a request to copy:", options)
        .with_page_size(15)
        .with_help_message("↑↓ to move, Enter to copy, type to filter")
        .prompt()
        .map_err(|e| ReqcopyError::Other(format!("Interaction canceled or failed: {}", e)))?;

    Ok(Some(selected.index))
}

fn format_row_for_display(index: usize, request: &CapturedRequest) -> String {
    let time = request.display_time();
    let method = &request.method;
    let path = request.path_and_query();
    let status = request.status;
    let marker = if request.is_graphql { " [GraphQL]" } else { "" };
    format!("#{index} [{status}] {method} {path}{marker} ({time})")
}
