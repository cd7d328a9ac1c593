// @module: Dual-section parsing of freeform LLM responses

/// Sentinel stored when the translation label is never found.
pub const TRANSLATION_NOT_FOUND: &str = "[Translation not found in response]";

/// Sentinel stored when the rephrase label is never found.
pub const REPHRASE_NOT_FOUND: &str = "[Rephrasing not found in response]";

/// Result of parsing a dual-section LLM response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSections {
    /// Text of the translation section, or `TRANSLATION_NOT_FOUND`
    pub translated: String,
    /// Text of the rephrase section, or `REPHRASE_NOT_FOUND`
    pub rephrased: String,
}

impl ParsedSections {
    /// Whether the translation section was actually found.
    pub fn has_translation(&self) -> bool {
        self.translated != TRANSLATION_NOT_FOUND
    }

    /// Whether the rephrase section was actually found.
    pub fn has_rephrase(&self) -> bool {
        self.rephrased != REPHRASE_NOT_FOUND
    }
}

/// Parse an LLM response that is expected to carry two labeled sections.
///
/// The scan is line by line. The first line starting with
/// `translation_label` opens the translation section and the remainder of
/// that line is captured; the first *subsequent* line starting with
/// `rephrase_label` closes it and opens the rephrase section (the rephrase
/// label is not recognized before the translation label). Every other
/// non-blank line is appended verbatim to whichever section is open; lines
/// before the first label are discarded, blank lines are dropped, and each
/// section is trimmed.
///
/// A section whose label never appears resolves to its not-found sentinel
/// rather than an empty string, so parse failures stay observable. This is
/// inherently fragile prefix matching on LLM output; callers must check
/// the sentinels before treating a field as content.
pub fn parse_dual_sections(
    raw: &str,
    translation_label: &str,
    rephrase_label: &str,
) -> ParsedSections {
    #[derive(PartialEq)]
    enum Section {
        None,
        Translation,
        Rephrase,
    }

    let mut found_translation = false;
    let mut found_rephrase = false;
    let mut current = Section::None;
    let mut translation_parts: Vec<&str> = Vec::new();
    let mut rephrase_parts: Vec<&str> = Vec::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if !found_translation && line.starts_with(translation_label) {
            found_translation = true;
            current = Section::Translation;
            translation_parts.push(line[translation_label.len()..].trim());
        } else if found_translation && !found_rephrase && line.starts_with(rephrase_label) {
            found_rephrase = true;
            current = Section::Rephrase;
            rephrase_parts.push(line[rephrase_label.len()..].trim());
        } else {
            match current {
                Section::Translation => translation_parts.push(line),
                Section::Rephrase => rephrase_parts.push(line),
                Section::None => {} // before the first label
            }
        }
    }

    let translated = if found_translation {
        translation_parts.join("\n").trim().to_string()
    } else {
        TRANSLATION_NOT_FOUND.to_string()
    };

    let rephrased = if found_rephrase {
        rephrase_parts.join("\n").trim().to_string()
    } else {
        REPHRASE_NOT_FOUND.to_string()
    };

    ParsedSections { translated, rephrased }
}

/// Build the translation section label for a target language.
pub fn translation_label(target_language: &str) -> String {
    format!("{} Translation:", target_language)
}

/// Build the rephrase section label for a source language.
pub fn rephrase_label(source_language: &str) -> String {
    format!("{} Rephrased:", source_language)
}
