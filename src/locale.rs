//! User interface language.
//!
//! The viewer ships English and Chinese strings. [`Locale::detect`] picks the
//! language from, in order: an explicit command-line tag, the stored
//! preference, the `LANG` environment value, and finally English.

use serde::{Deserialize, Serialize};

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

/// Keys for every translatable UI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Title,
    Eyebrow,
    OpenCatalog,
    CloseAll,
    ThemeToggle,
    FollowSystem,
    Language,
    OpenInNewTab,
    ClosePanel,
    CannotEmbed,
    ReadOn,
    PanelsOpen,
    Items,
    Updated,
    EmbedScriptReady,
    EmbedScriptPending,
    SocialPost,
    ViewPost,
    Verified,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    /// Parses tags like `zh`, `zh-CN` or `en_US.UTF-8`.
    pub fn parse(tag: &str) -> Option<Locale> {
        let primary = tag
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    /// First recognised source wins; unknown tags fall through.
    pub fn detect(cli: Option<&str>, stored: Option<&str>, env_lang: Option<&str>) -> Locale {
        [cli, stored, env_lang]
            .into_iter()
            .flatten()
            .find_map(Locale::parse)
            .unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Name of the language in itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Zh => "中文",
        }
    }

    pub fn text(self, key: Text) -> &'static str {
        match self {
            Locale::En => english(key),
            Locale::Zh => chinese(key),
        }
    }

    /// "Loading WWD..." style message.
    pub fn loading(self, outlet: &str) -> String {
        match self {
            Locale::En => format!("Loading {outlet}..."),
            Locale::Zh => format!("正在加载 {outlet}..."),
        }
    }

    /// "Open WWD in new tab" style button label.
    pub fn open_outlet(self, outlet: &str) -> String {
        match self {
            Locale::En => format!("Open {outlet} in new tab"),
            Locale::Zh => format!("在新标签页打开 {outlet}"),
        }
    }

    /// Accessible label of a panel.
    pub fn panel_label(self, headline: &str) -> String {
        match self {
            Locale::En => format!("Article: {headline}"),
            Locale::Zh => format!("文章：{headline}"),
        }
    }
}

fn english(key: Text) -> &'static str {
    match key {
        Text::Title => "Kevin Germanier × Ivy J Studio",
        Text::Eyebrow => "PARIS HAUTE COUTURE WEEK 2026",
        Text::OpenCatalog => "📁 Open coverage file",
        Text::CloseAll => "✖ Close all",
        Text::ThemeToggle => "Toggle theme",
        Text::FollowSystem => "Follow system",
        Text::Language => "Language:",
        Text::OpenInNewTab => "Open in new tab",
        Text::ClosePanel => "Close panel",
        Text::CannotEmbed => "This site cannot be embedded.",
        Text::ReadOn => "Read on",
        Text::PanelsOpen => "panels open",
        Text::Items => "items",
        Text::Updated => "updated",
        Text::EmbedScriptReady => "Embed script ready",
        Text::EmbedScriptPending => "Embed script loading",
        Text::SocialPost => "Social post",
        Text::ViewPost => "View post",
        Text::Verified => "Verified",
    }
}

fn chinese(key: Text) -> &'static str {
    match key {
        Text::Title => "Kevin Germanier × Ivy J Studio",
        Text::Eyebrow => "2026 巴黎高级定制时装周",
        Text::OpenCatalog => "📁 打开报道文件",
        Text::CloseAll => "✖ 全部关闭",
        Text::ThemeToggle => "切换主题",
        Text::FollowSystem => "跟随系统",
        Text::Language => "语言：",
        Text::OpenInNewTab => "在新标签页打开",
        Text::ClosePanel => "关闭面板",
        Text::CannotEmbed => "该网站不允许嵌入显示。",
        Text::ReadOn => "阅读原文：",
        Text::PanelsOpen => "个面板已打开",
        Text::Items => "篇报道",
        Text::Updated => "更新于",
        Text::EmbedScriptReady => "嵌入脚本已就绪",
        Text::EmbedScriptPending => "嵌入脚本加载中",
        Text::SocialPost => "社交媒体帖子",
        Text::ViewPost => "查看帖子",
        Text::Verified => "已核实",
    }
}
