/// 每级缩进的空格数
const INDENT: &str = "  ";

/// 按花括号深度重新缩进 GraphQL 文本
///
/// 逐行处理：以 `}` 开头的行先减一级（不小于 0），以 `{` 结尾且不是
/// `#` 注释的行输出后加一级。空行保留为空行，结果去掉末尾空白。
///
/// 这不是语法解析，字符串或注释里的花括号会干扰缩进。
pub fn format_query(text: &str) -> String {
    let mut level: usize = 0;
    let mut lines = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();

        if trimmed.starts_with('}') {
            level = level.saturating_sub(1);
        }

        if trimmed.is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{}{}", INDENT.repeat(level), trimmed));
        }

        if trimmed.ends_with('{') && !trimmed.starts_with('#') {
            level += 1;
        }
    }

    lines.join("\n").trim_end().to_string()
}
