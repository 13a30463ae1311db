//! Question block parsing.
//!
//! Turns one segmented block plus its specialty into a [`Question`]. Only a
//! header that fails to match is a hard "not a question" signal; every
//! later extraction degrades to an empty or absent value, because the
//! corpus mixes several authoring dialects and a partially-filled question
//! is worth more than a dropped one.

use crate::parser::patterns;
use crate::types::{Question, DEFAULT_PROMPT};

/// Parse one block. Returns `None` only when the first line does not match
/// the `### <number>. <title>` header shape.
pub(crate) fn parse_block(block: &str, specialty: &str) -> Option<Question> {
    // The header line is the only hard requirement.
    let (header, body) = block.split_once('\n').unwrap_or((block, ""));
    let caps = patterns::HEADER_RE.captures(header.trim_end())?;
    let number = caps[1].to_string();
    let title = caps[2].trim().to_string();

    // Blank-line-delimited parts, capped at five so options and
    // explanations are never fragmented by incidental blank lines.
    let parts = patterns::split_parts(body);

    let mut scenario = parts.first().cloned().unwrap_or_default();
    let mut prompt = DEFAULT_PROMPT.to_string();
    let mut tail_start = 1;

    let investigations = patterns::find_investigations(&parts).map(|(index, content)| {
        if index + 1 < parts.len() {
            prompt = parts[index + 1].clone();
            tail_start = index + 2;
        } else {
            // No part after investigations: the prompt may be folded into
            // the scenario as its last blank-line unit.
            let units = patterns::split_units(&scenario);
            if units.len() > 1 {
                prompt = units[units.len() - 1].clone();
                scenario = units[..units.len() - 1].join("\n\n");
            }
        }
        content
    });

    if investigations.is_none() && parts.len() >= 2 {
        prompt = parts[1].clone();
        tail_start = 2;
    }

    // Everything from the resume point is one search space for options,
    // answer key and explanation.
    let tail = if tail_start < parts.len() {
        parts[tail_start..].join("\n\n")
    } else {
        String::new()
    };

    let mut options = patterns::extract_options(&tail);
    let answer = patterns::extract_answer(&tail);
    let explanation = patterns::extract_explanation(&tail);
    let images = patterns::extract_images(block);

    // Some documents never separate options from the prompt with a
    // paragraph break at all.
    if options.is_empty() {
        if let Some((revised, recovered)) = patterns::split_prompt_options(&prompt) {
            prompt = revised;
            options = recovered;
        }
    }

    Some(Question {
        number,
        title,
        scenario,
        investigations,
        prompt,
        options,
        answer,
        explanation,
        specialty: specialty.to_string(),
        images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageRef, QuestionOption};
    use pretty_assertions::assert_eq;

    const STEMI_BLOCK: &str = "### 3. Chest pain\n\
A 54-year-old man presents with central crushing chest pain.\n\
\n\
**Investigations:** ECG shows ST elevation.\n\
\n\
What is the most likely diagnosis?\n\
\n\
A) STEMI\n\
B) Stable angina\n\
C) Pulmonary embolism\n\
\n\
**Answer:** A\n\
**Explanation:** ST elevation with crushing chest pain indicates STEMI.\n";

    #[test]
    fn full_block_round_trip() {
        let q = parse_block(STEMI_BLOCK, "Cardiology").unwrap();
        assert_eq!(q.number, "3");
        assert_eq!(q.title, "Chest pain");
        assert_eq!(
            q.scenario,
            "A 54-year-old man presents with central crushing chest pain."
        );
        assert_eq!(q.investigations.as_deref(), Some("ECG shows ST elevation."));
        assert_eq!(q.prompt, "What is the most likely diagnosis?");
        assert_eq!(
            q.options,
            vec![
                QuestionOption::new('A', "STEMI"),
                QuestionOption::new('B', "Stable angina"),
                QuestionOption::new('C', "Pulmonary embolism"),
            ]
        );
        assert_eq!(q.answer, Some('A'));
        assert!(q
            .explanation
            .contains("ST elevation with crushing chest pain indicates STEMI."));
        assert_eq!(q.specialty, "Cardiology");
        assert!(q.is_scorable());
    }

    #[test]
    fn investigations_marker_variants_extract_identically() {
        let with_colon_inside = parse_block(STEMI_BLOCK, "Cardiology").unwrap();
        let with_colon_outside = parse_block(
            &STEMI_BLOCK.replace("**Investigations:**", "**Investigations**:"),
            "Cardiology",
        )
        .unwrap();
        let singular = parse_block(
            &STEMI_BLOCK.replace("**Investigations:**", "**investigation:**"),
            "Cardiology",
        )
        .unwrap();

        assert_eq!(
            with_colon_inside.investigations,
            with_colon_outside.investigations
        );
        assert_eq!(with_colon_inside.investigations, singular.investigations);
    }

    #[test]
    fn non_header_block_is_not_a_question() {
        assert!(parse_block("## Cardiology\nsome text", "X").is_none());
        assert!(parse_block("just prose\nmore prose", "X").is_none());
        assert!(parse_block("### untitled without number\nbody", "X").is_none());
    }

    #[test]
    fn header_only_block_degrades_to_empty_fields() {
        let q = parse_block("### 7. Stub question", "Uncategorized").unwrap();
        assert_eq!(q.number, "7");
        assert_eq!(q.title, "Stub question");
        assert_eq!(q.scenario, "");
        assert_eq!(q.prompt, DEFAULT_PROMPT);
        assert!(q.options.is_empty());
        assert_eq!(q.answer, None);
        assert_eq!(q.explanation, "");
        assert!(!q.is_scorable());
    }

    #[test]
    fn single_part_keeps_default_prompt() {
        let block = "### 1. Fatigue\nA 30-year-old woman reports tiredness.\n";
        let q = parse_block(block, "Uncategorized").unwrap();
        assert_eq!(q.scenario, "A 30-year-old woman reports tiredness.");
        assert_eq!(q.prompt, DEFAULT_PROMPT);
        assert!(q.options.is_empty());
        assert_eq!(q.answer, None);
    }

    #[test]
    fn two_parts_make_scenario_and_prompt() {
        let block = "### 2. Cough\nScenario text.\n\nWhich is the best next step?\n";
        let q = parse_block(block, "Respiratory").unwrap();
        assert_eq!(q.scenario, "Scenario text.");
        assert_eq!(q.prompt, "Which is the best next step?");
    }

    #[test]
    fn options_folded_into_prompt_are_recovered() {
        let block = "### 5. Rash\nScenario text.\n\nWhat is the diagnosis?\nA) Eczema\nB) Psoriasis\n";
        let q = parse_block(block, "Dermatology").unwrap();
        assert_eq!(q.prompt, "What is the diagnosis?");
        assert_eq!(
            q.options,
            vec![
                QuestionOption::new('A', "Eczema"),
                QuestionOption::new('B', "Psoriasis"),
            ]
        );
    }

    #[test]
    fn missing_answer_key_is_unscorable_not_an_error() {
        let block = "### 6. Headache\nScenario.\n\nPrompt?\n\nA) One\nB) Two\n";
        let q = parse_block(block, "Neurology").unwrap();
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.answer, None);
        assert!(!q.is_scorable());
    }

    #[test]
    fn answer_without_matching_option_is_unscorable() {
        let block = "### 8. Dizziness\nScenario.\n\nPrompt?\n\nA) One\nB) Two\n\n**Answer:** E\n";
        let q = parse_block(block, "ENT").unwrap();
        assert_eq!(q.answer, Some('E'));
        assert!(!q.is_scorable());
    }

    #[test]
    fn duplicate_option_letters_are_retained() {
        let block = "### 9. Fever\nScenario.\n\nPrompt?\n\nA) One\nA) Two\nB) Three\n";
        let q = parse_block(block, "Uncategorized").unwrap();
        assert_eq!(q.options.len(), 3);
        assert_eq!(q.duplicate_letters(), vec!['A']);
    }

    #[test]
    fn images_extracted_from_whole_block_in_order() {
        let block = "### 10. ECG reading\nScenario with ![Chest X-ray](xr2.jpg) inline.\n\n\
Prompt?\n\nA) One\nB) Two\n\n[IMAGE: ecg1.png]\n**Answer:** B\n";
        let q = parse_block(block, "Cardiology").unwrap();
        assert_eq!(
            q.images,
            vec![
                ImageRef {
                    alt_text: "View Image".to_string(),
                    source: "ecg1.png".to_string(),
                },
                ImageRef {
                    alt_text: "Chest X-ray".to_string(),
                    source: "xr2.jpg".to_string(),
                },
            ]
        );
    }

    #[test]
    fn number_preserved_as_authored() {
        let q = parse_block("### 007. Bond\nScenario.\n", "X").unwrap();
        assert_eq!(q.number, "007");
    }

    #[test]
    fn late_blank_lines_do_not_fragment_the_tail() {
        // Blank lines inside the explanation fall past the fourth boundary
        // and must stay inside the combined tail.
        let block = "### 11. Jaundice\nScenario.\n\nPrompt?\n\nA) One\nB) Two\n\n\
**Answer:** B\n\n**Explanation:** First paragraph.\n\nSecond paragraph.\n";
        let q = parse_block(block, "Hepatology").unwrap();
        assert_eq!(q.answer, Some('B'));
        assert!(q.explanation.contains("First paragraph."));
        assert!(q.explanation.contains("Second paragraph."));
    }
}
