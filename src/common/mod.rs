//! 公共工具模块

pub mod middleware;

/// 安全地截断 UTF-8 字符串，确保不会在多字节字符中间截断
///
/// 返回不超过 `max_bytes` 字节的最长有效 UTF-8 子串
#[cfg_attr(not(feature = "sensitive-logs"), allow(dead_code))]
pub fn truncate_str_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// 截断字符串并添加省略号后缀，用于日志中输出用户输入
#[cfg_attr(not(feature = "sensitive-logs"), allow(dead_code))]
pub fn truncate_with_ellipsis(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }

    let truncate_at = max_bytes.saturating_sub(3);
    format!("{}...", truncate_str_safe(s, truncate_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate_str_safe("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // "é" 占 2 字节，"你" 占 3 字节
        assert_eq!(truncate_str_safe("héllo", 2), "h");
        assert_eq!(truncate_str_safe("你好世界", 7), "你好");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("I love this movie", 10), "I love ...");
        assert_eq!(truncate_with_ellipsis("你好世界", 8), "你...");
    }
}
