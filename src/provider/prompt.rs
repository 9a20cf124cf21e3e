//! Prompt construction for commit message generation.

use std::borrow::Cow;

use crate::text::Language;

/// Maximum diff length in characters sent to the provider.
pub const MAX_DIFF_CHARS: usize = 12_000;

/// Appended to a diff that was cut at [`MAX_DIFF_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n...(truncated)";

/// Label that precedes the diff in the user message.
pub const DIFF_LABEL: &str = "Diff content:\n";

const SYSTEM_PROMPT_EN: &str = "You are a professional developer tool. Based on the following git diff content, \
generate a concise and standardized git commit message. \
Format requirements: The first line should be a short summary (within 50 characters). \
If necessary, leave a blank line followed by a detailed description. \
The response should contain ONLY the commit message itself, without any explanation or other text. \
Please answer in English.";

const SYSTEM_PROMPT_ZH: &str = "你是一个专业的开发者工具。请根据以下的 git diff 内容，\
生成一个简洁、规范的 git commit message。\
格式要求：第一行是简短的摘要（50字符以内），\
如果需要，空一行后可以跟详细的描述。\
回答中只包含 commit message 本身，不要包含任何解释或其他文字。\
请使用中文回答。";

/// Cut a diff to [`MAX_DIFF_CHARS`] characters and append [`TRUNCATION_MARKER`].
///
/// Counts chars rather than bytes so multi-byte text is never split.
/// Diffs at or under the limit are returned unchanged.
pub fn truncate_diff(diff: &str) -> Cow<'_, str> {
    match diff.char_indices().nth(MAX_DIFF_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &diff[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(diff),
    }
}

/// System instruction in the requested response language.
pub fn system_prompt(language: Language) -> &'static str {
    match language {
        Language::English => SYSTEM_PROMPT_EN,
        Language::Chinese => SYSTEM_PROMPT_ZH,
    }
}

/// User message carrying the (possibly truncated) diff.
pub fn user_message(diff: &str) -> String {
    format!("{}{}", DIFF_LABEL, truncate_diff(diff))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_diff_unchanged() {
        let diff = "diff --git a/foo.txt b/foo.txt\n+hello";
        assert!(matches!(truncate_diff(diff), Cow::Borrowed(_)));
        assert_eq!(truncate_diff(diff), diff);
    }

    #[test]
    fn test_diff_at_limit_unchanged() {
        let diff = "a".repeat(MAX_DIFF_CHARS);
        assert_eq!(truncate_diff(&diff), diff.as_str());
    }

    #[test]
    fn test_long_diff_truncated_to_limit_plus_marker() {
        let diff = "a".repeat(MAX_DIFF_CHARS + 1);
        let truncated = truncate_diff(&diff);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        let body = truncated.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(body.chars().count(), MAX_DIFF_CHARS);
        assert_eq!(
            truncated.chars().count(),
            MAX_DIFF_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn test_truncation_is_idempotent() {
        let diff = "x".repeat(MAX_DIFF_CHARS * 2);
        let once = truncate_diff(&diff).into_owned();
        let twice = truncate_diff(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_truncation_respects_multibyte_chars() {
        let diff = "变".repeat(MAX_DIFF_CHARS + 10);
        let truncated = truncate_diff(&diff);
        let body = truncated.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(body.chars().count(), MAX_DIFF_CHARS);
        assert!(body.chars().all(|c| c == '变'));
    }

    #[test]
    fn test_system_prompt_by_language() {
        assert!(system_prompt(Language::English).contains("Please answer in English."));
        assert!(system_prompt(Language::Chinese).contains("请使用中文回答。"));
    }

    #[test]
    fn test_user_message_has_label() {
        assert_eq!(user_message("add foo.txt"), "Diff content:\nadd foo.txt");
    }
}
