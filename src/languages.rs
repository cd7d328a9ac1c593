use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::providers::ProviderKind;

/// Language tables and code mapping for the supported providers.
///
/// DeepL uses opaque uppercase codes with regional target variants;
/// the LLM providers take plain English language names in their prompts,
/// so their "codes" are the display names themselves.
///
/// DeepL distinguishes source codes from target codes: a regional target
/// variant (EN-GB, EN-US, PT-PT) must be collapsed to its base code when
/// the same display language is used as a *source*. Every DeepL call has
/// to go through `deepl_source_code` / `deepl_target_code` to honor that
/// asymmetry.
static DEEPL_LANGUAGES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("Turkish", "TR"),
        ("German", "DE"),
        ("French", "FR"),
        ("Spanish", "ES"),
        ("Italian", "IT"),
        ("Portuguese", "PT-PT"),
        ("Dutch", "NL"),
        ("Polish", "PL"),
        ("Russian", "RU"),
        ("Japanese", "JA"),
        ("Chinese (simplified)", "ZH"),
        ("English", "EN-GB"),
        ("English-GB", "EN-GB"),
        ("English-US", "EN-US"),
    ])
});

static LLM_LANGUAGES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("Turkish", "Turkish"),
        ("German", "German"),
        ("French", "French"),
        ("Spanish", "Spanish"),
        ("Italian", "Italian"),
        ("Portuguese", "Portuguese"),
        ("Dutch", "Dutch"),
        ("Polish", "Polish"),
        ("Russian", "Russian"),
        ("Japanese", "Japanese"),
        ("Chinese", "Chinese"),
        ("English", "English"),
    ])
});

/// Get the language table for a provider as (display name, code) pairs.
pub fn supported_languages(provider: ProviderKind) -> &'static BTreeMap<&'static str, &'static str> {
    match provider {
        ProviderKind::DeepL => &DEEPL_LANGUAGES,
        ProviderKind::OpenAI | ProviderKind::DeepSeek => &LLM_LANGUAGES,
    }
}

/// Look up the provider code for a display language.
///
/// Unknown display names fall back to the name itself, matching the
/// tolerant lookup the prompt builders rely on.
pub fn language_code(provider: ProviderKind, display_name: &str) -> String {
    supported_languages(provider)
        .get(display_name)
        .map_or_else(|| display_name.to_string(), |code| (*code).to_string())
}

/// DeepL code for a display language used as the *source* of a call.
///
/// Regional target variants collapse to their base code here: DeepL
/// rejects EN-GB/EN-US/PT-PT as `source_lang`.
pub fn deepl_source_code(display_name: &str) -> String {
    let code = language_code(ProviderKind::DeepL, display_name);
    match code.as_str() {
        "EN-GB" | "EN-US" => "EN".to_string(),
        "PT-PT" => "PT".to_string(),
        _ => code,
    }
}

/// DeepL code for a display language used as the *target* of a call.
///
/// Target codes keep their regional variant (EN-GB, EN-US, PT-PT).
pub fn deepl_target_code(display_name: &str) -> String {
    language_code(ProviderKind::DeepL, display_name)
}

/// Check whether a provider supports a display language.
pub fn is_supported(provider: ProviderKind, display_name: &str) -> bool {
    supported_languages(provider).contains_key(display_name)
}
