/*!
 * Tests for dual-section response parsing
 */

use yatr::parser::{
    REPHRASE_NOT_FOUND, TRANSLATION_NOT_FOUND, parse_dual_sections, rephrase_label,
    translation_label,
};

#[test]
fn test_parseDualSections_withBothSections_shouldSplitCorrectly() {
    let raw = "Turkish Translation: Günaydın\nEnglish Rephrased: Good morning to you";
    let sections = parse_dual_sections(raw, "Turkish Translation:", "English Rephrased:");

    assert_eq!(sections.translated, "Günaydın");
    assert_eq!(sections.rephrased, "Good morning to you");
    assert!(sections.has_translation());
    assert!(sections.has_rephrase());
}

#[test]
fn test_parseDualSections_withMultilineSections_shouldJoinContinuationLines() {
    let raw = "Turkish Translation: İlk satır\nikinci satır\nEnglish Rephrased: First line\nsecond line";
    let sections = parse_dual_sections(raw, "Turkish Translation:", "English Rephrased:");

    assert_eq!(sections.translated, "İlk satır\nikinci satır");
    assert_eq!(sections.rephrased, "First line\nsecond line");
}

#[test]
fn test_parseDualSections_withPreamble_shouldDiscardTextBeforeFirstLabel() {
    let raw = "Sure, here is the result:\n\nTurkish Translation: Merhaba\nEnglish Rephrased: Hi";
    let sections = parse_dual_sections(raw, "Turkish Translation:", "English Rephrased:");

    assert_eq!(sections.translated, "Merhaba");
    assert_eq!(sections.rephrased, "Hi");
}

#[test]
fn test_parseDualSections_withBlankLines_shouldDropThem() {
    let raw = "Turkish Translation: Merhaba\n\n\nEnglish Rephrased: Hi\n\n";
    let sections = parse_dual_sections(raw, "Turkish Translation:", "English Rephrased:");

    assert_eq!(sections.translated, "Merhaba");
    assert_eq!(sections.rephrased, "Hi");
}

#[test]
fn test_parseDualSections_withMissingRephraseLabel_shouldUseSentinel() {
    let raw = "Turkish Translation: Merhaba";
    let sections = parse_dual_sections(raw, "Turkish Translation:", "English Rephrased:");

    assert_eq!(sections.translated, "Merhaba");
    assert_eq!(sections.rephrased, REPHRASE_NOT_FOUND);
    assert!(sections.has_translation());
    assert!(!sections.has_rephrase());
}

#[test]
fn test_parseDualSections_withNoLabels_shouldUseBothSentinels() {
    let raw = "The model ignored the requested format entirely.";
    let sections = parse_dual_sections(raw, "Turkish Translation:", "English Rephrased:");

    assert_eq!(sections.translated, TRANSLATION_NOT_FOUND);
    assert_eq!(sections.rephrased, REPHRASE_NOT_FOUND);
    assert!(!sections.has_translation());
    assert!(!sections.has_rephrase());
}

#[test]
fn test_parseDualSections_withRephraseBeforeTranslation_shouldNotOpenRephraseSection() {
    // The rephrase label only counts once the translation section is open
    let raw = "English Rephrased: too early\nTurkish Translation: Merhaba";
    let sections = parse_dual_sections(raw, "Turkish Translation:", "English Rephrased:");

    assert_eq!(sections.translated, "Merhaba");
    assert_eq!(sections.rephrased, REPHRASE_NOT_FOUND);
}

#[test]
fn test_translationLabel_withLanguageName_shouldFormatKeyword() {
    assert_eq!(translation_label("Turkish"), "Turkish Translation:");
}

#[test]
fn test_rephraseLabel_withLanguageName_shouldFormatKeyword() {
    assert_eq!(rephrase_label("English"), "English Rephrased:");
}
