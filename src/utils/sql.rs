/// 转义 LIKE 模式中的通配符，配合 `ESCAPE '\'` 使用
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 生成 `%keyword%` 形式的包含匹配模式
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like_pattern(input.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_like_pattern("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }

    #[test]
    fn test_contains_pattern_trims() {
        assert_eq!(contains_pattern("  DIT "), "%DIT%");
    }
}
