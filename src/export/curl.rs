use crate::capture::model::CapturedRequest;
use crate::export::payload::pretty_or_raw;

/// 续行：` \` + 换行 + 两个空格
const CONTINUATION: &str = " \\\n  ";

/// 生成可直接在 shell 中执行的 curl 命令，后面附上响应
pub fn format_curl(request: &CapturedRequest) -> String {
    let mut curl = format!("curl {}", shell_quote(&request.url));

    if request.method != "GET" {
        curl.push_str(CONTINUATION);
        curl.push_str(&format!("-X {}", request.method));
    }

    for header in &request.headers {
        if should_skip_header(&header.name) {
            continue;
        }
        curl.push_str(CONTINUATION);
        curl.push_str(&format!(
            "-H {}",
            shell_quote(&format!("{}: {}", header.name, header.value))
        ));
    }

    if let Some(text) = request.post_data.as_ref().and_then(|p| p.raw_text()) {
        curl.push_str(CONTINUATION);
        curl.push_str(&format!("--data-raw {}", shell_quote(text)));
    }

    format!(
        "{}\n\n# Response ({} {}):\n{}",
        curl,
        request.status,
        request.status_text,
        pretty_or_raw(&request.response_body)
    )
}

/// 由 curl 自动生成的 header 不需要写进命令
fn should_skip_header(name: &str) -> bool {
    let name_lower = name.to_lowercase();
    matches!(
        name_lower.as_str(),
        "host" | "connection" | "content-length"
    )
}

/// 单引号包裹，内部的 `'` 写成 `'\''`
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
