use log::warn;

use crate::errors::GatewayError;
use crate::languages::{deepl_source_code, deepl_target_code};
use crate::providers::{ProviderKind, TranslateApi};

/// Placeholder when the forward translation comes back empty.
pub const TRANSLATION_EMPTY: &str = "[Translation failed or empty]";

/// Placeholder when the back translation is skipped because step 1 was empty.
pub const REPHRASE_SKIPPED: &str = "[Rephrasing skipped]";

/// Placeholder when the back translation comes back empty.
pub const REPHRASE_EMPTY: &str = "[Rephrasing resulted in empty text]";

/// Result of the combined translate-and-rephrase technique.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoHopOutcome {
    /// The forward translation, or a placeholder when empty
    pub translated: String,
    /// The back translation standing in for a paraphrase, or a placeholder
    pub rephrased: String,
}

/// Translate forward and back to synthesize a paraphrase.
///
/// Step 1 translates `text` from the source to the target display
/// language. An empty result is a degraded success, not an error: both
/// fields become placeholders and no second call is made. Step 2
/// translates the step-1 output back to the source language.
///
/// Step 2 must use the *target* display language's **source** code and
/// the *original source* display language's **target** code: DeepL
/// rejects regional variants like EN-GB as `source_lang`, and sending the
/// wrong class silently yields wrong-variant output. A step-2 failure
/// degrades only the rephrased field; the step-1 translation survives.
pub async fn two_hop_translate_rephrase(
    api: &dyn TranslateApi,
    text: &str,
    source_language: &str,
    target_language: &str,
) -> Result<TwoHopOutcome, GatewayError> {
    let step1_source = deepl_source_code(source_language);
    let step1_target = deepl_target_code(target_language);

    let translated = api
        .translate(text, Some(&step1_source), &step1_target, ProviderKind::DeepL)
        .await?;

    if translated.trim().is_empty() {
        return Ok(TwoHopOutcome {
            translated: TRANSLATION_EMPTY.to_string(),
            rephrased: REPHRASE_SKIPPED.to_string(),
        });
    }

    let step2_source = deepl_source_code(target_language);
    let step2_target = deepl_target_code(source_language);

    let rephrased = match api
        .translate(&translated, Some(&step2_source), &step2_target, ProviderKind::DeepL)
        .await
    {
        Ok(back) if back.trim().is_empty() => REPHRASE_EMPTY.to_string(),
        Ok(back) => back,
        Err(e) => {
            warn!("Back translation for rephrase failed: {}", e);
            format!("[Rephrasing failed: {}]", e.kind())
        }
    };

    Ok(TwoHopOutcome { translated, rephrased })
}
