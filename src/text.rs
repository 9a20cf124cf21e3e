//! User-facing strings in English and Chinese.

use std::fmt;

/// Response and UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    English,
    #[default]
    Chinese,
}

impl Language {
    /// Any code starting with `en` (case-insensitive) is English; everything
    /// else, including an empty code, is Chinese.
    pub fn from_code(code: &str) -> Self {
        if code.trim().to_ascii_lowercase().starts_with("en") {
            Language::English
        } else {
            Language::Chinese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Options,
    CommitSuccess,
    CommitFailed,
    EnterNewMessage,
    Canceled,
    InvalidOption,
    SuggestedMessage,
    Generating,
    ConfigError,
    ProviderError,
    GenerationFailed,
    StagingEmpty,
    NotARepository,
}

impl Text {
    pub fn get(self, lang: Language) -> &'static str {
        match lang {
            Language::English => self.english(),
            Language::Chinese => self.chinese(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Text::Options => "Options: [y]Submit / [e]Edit / [r]Regenerate / [q]Cancel: ",
            Text::CommitSuccess => "Commit successful!",
            Text::CommitFailed => "Commit failed: ",
            Text::EnterNewMessage => "Enter new Commit Message: ",
            Text::Canceled => "Operation canceled.",
            Text::InvalidOption => "Invalid option, please try again.",
            Text::SuggestedMessage => "Suggested Commit Message:",
            Text::Generating => "Generating commit message...",
            Text::ConfigError => "Configuration load error: ",
            Text::ProviderError => "Unable to determine provider: ",
            Text::GenerationFailed => "Generation failed: ",
            Text::StagingEmpty => "Staging area is empty.",
            Text::NotARepository => "Not a git repository.",
        }
    }

    fn chinese(self) -> &'static str {
        match self {
            Text::Options => "选项: [y]提交 / [e]编辑 / [r]重新生成 / [q]取消: ",
            Text::CommitSuccess => "提交成功！",
            Text::CommitFailed => "提交失败: ",
            Text::EnterNewMessage => "请输入新的 Commit Message: ",
            Text::Canceled => "操作已取消。",
            Text::InvalidOption => "无效的选项，请重试。",
            Text::SuggestedMessage => "建议的 Commit Message:",
            Text::Generating => "正在生成提交信息...",
            Text::ConfigError => "配置加载错误: ",
            Text::ProviderError => "无法确定使用的 Provider: ",
            Text::GenerationFailed => "生成失败: ",
            Text::StagingEmpty => "暂存区为空。",
            Text::NotARepository => "不是 git 仓库。",
        }
    }
}

/// "Using Provider: <name> (Model: <model>)" line shown at startup.
pub fn using_provider(lang: Language, name: &str, model: &str) -> String {
    match lang {
        Language::English => format!("Using Provider: {} (Model: {})", name, model),
        Language::Chinese => format!("使用 Provider: {} (Model: {})", name, model),
    }
}
