// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use asset_admin::i18n::t;
/// let msg = t("import.missing_key");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use asset_admin::i18n::t_with_args;
/// let msg = t_with_args("import.duplicate_key", &[("item", "A1")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key).to_string(), args)
}

/// 以指定语言翻译（不修改全局语言）
pub fn t_in_locale(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn fill_args(mut result: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    // 全局 locale 在并行测试间共享，这里只使用显式语言的接口

    #[test]
    fn test_english_messages() {
        let msg = t_in_locale("en", "import.duplicate_key", &[("item", "A1")]);
        assert_eq!(msg, "Asset with Item Number \"A1\" already exists");
        assert!(t_in_locale("en", "import.missing_key", &[]).contains("required"));
    }

    #[test]
    fn test_chinese_messages() {
        let msg = t_in_locale("zh-CN", "import.duplicate_key", &[("item", "A1")]);
        assert!(msg.contains("A1"));
        assert!(msg.contains("已存在"));
    }
}
