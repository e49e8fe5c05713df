//! Field parser: ordered pattern rules over recognized text, candidate
//! selection, and the trailing address block. Parsing never fails; a kind no
//! rule matched is recorded as absent.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use kyc_types::{DocumentType, ExtractedField, FieldKind, RecognizedText, VerificationConfig};

use crate::extractors;
use crate::patterns;

/// One scored candidate for a field kind.
#[derive(Debug, Clone)]
struct Candidate {
    raw: String,
    confidence: f32,
    specificity: f32,
    line_idx: usize,
    tag: Option<DocumentType>,
}

impl Candidate {
    fn score(&self) -> f32 {
        self.specificity * self.confidence
    }
}

/// Parser output: exactly one entry per field kind, in declaration order,
/// plus the document type tagged by the ID number pattern.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub document_type: DocumentType,
    pub fields: BTreeMap<FieldKind, ExtractedField>,
}

pub fn parse(text: &RecognizedText, config: &VerificationConfig) -> Extraction {
    parse_with_today(text, config, Utc::now().date_naive())
}

/// `today` is injected so the date-range filter is testable.
pub(crate) fn parse_with_today(
    text: &RecognizedText,
    config: &VerificationConfig,
    today: NaiveDate,
) -> Extraction {
    let mut candidates: BTreeMap<FieldKind, Vec<Candidate>> = BTreeMap::new();
    let push = |candidates: &mut BTreeMap<FieldKind, Vec<Candidate>>,
                kind: FieldKind,
                candidate: Candidate| {
        candidates.entry(kind).or_default().push(candidate);
    };

    for (idx, line) in text.lines.iter().enumerate() {
        let content = line.text.trim();
        if content.is_empty() {
            continue;
        }

        if let Some(caps) = patterns::NAME_LABEL.captures(content) {
            push(
                &mut candidates,
                FieldKind::Name,
                Candidate {
                    raw: caps[1].to_string(),
                    confidence: line.confidence,
                    specificity: patterns::NAME_LABEL_SPECIFICITY,
                    line_idx: idx,
                    tag: None,
                },
            );
        }

        for token in patterns::DATE_TOKEN.find_iter(content) {
            let Some(date) = extractors::parse_date_token(token.as_str()) else {
                continue;
            };
            if !extractors::within_plausible_range(date, today) {
                continue;
            }
            push(
                &mut candidates,
                FieldKind::DateOfBirth,
                Candidate {
                    raw: token.as_str().to_string(),
                    confidence: line.confidence,
                    specificity: patterns::DATE_SPECIFICITY,
                    line_idx: idx,
                    tag: None,
                },
            );
        }

        for caps in patterns::GENDER_WORD.captures_iter(content) {
            push(
                &mut candidates,
                FieldKind::Gender,
                Candidate {
                    raw: caps[1].to_string(),
                    confidence: line.confidence,
                    specificity: patterns::GENDER_WORD_SPECIFICITY,
                    line_idx: idx,
                    tag: None,
                },
            );
        }
        for caps in patterns::GENDER_LETTER.captures_iter(content) {
            push(
                &mut candidates,
                FieldKind::Gender,
                Candidate {
                    raw: caps[1].to_string(),
                    confidence: line.confidence,
                    specificity: patterns::GENDER_LETTER_SPECIFICITY,
                    line_idx: idx,
                    tag: None,
                },
            );
        }

        for token in patterns::AADHAAR_NUMBER
            .find_iter(content)
            .chain(patterns::PAN_NUMBER.find_iter(content))
        {
            let Some(id) = extractors::classify_id(token.as_str()) else {
                continue;
            };
            push(
                &mut candidates,
                FieldKind::IdNumber,
                Candidate {
                    raw: token.as_str().to_string(),
                    confidence: line.confidence,
                    specificity: patterns::ID_NUMBER_SPECIFICITY,
                    line_idx: idx,
                    tag: Some(id.document_type()),
                },
            );
        }
    }

    if let Some(candidate) = name_fallback(text) {
        push(&mut candidates, FieldKind::Name, candidate);
    }

    let mut fields = BTreeMap::new();
    let mut last_matched: Option<usize> = None;
    let mut document_type = DocumentType::Unknown;

    for kind in [
        FieldKind::Name,
        FieldKind::DateOfBirth,
        FieldKind::Gender,
        FieldKind::IdNumber,
    ] {
        match select(candidates.get(&kind).map(Vec::as_slice).unwrap_or(&[])) {
            Some(candidate) => {
                last_matched = Some(last_matched.map_or(candidate.line_idx, |i| i.max(candidate.line_idx)));
                if kind == FieldKind::IdNumber {
                    document_type = candidate.tag.unwrap_or(DocumentType::Unknown);
                }
                fields.insert(
                    kind,
                    ExtractedField::new(kind, candidate.raw.clone(), candidate.confidence),
                );
            }
            None => {
                fields.insert(kind, ExtractedField::absent(kind));
            }
        }
    }

    let address = address_block(text, last_matched, config.max_address_lines)
        .unwrap_or_else(|| ExtractedField::absent(FieldKind::Address));
    fields.insert(FieldKind::Address, address);

    Extraction {
        document_type,
        fields,
    }
}

/// Fallback name rule: the longest line of 2-4 alphabetic words in the top
/// third of the text.
fn name_fallback(text: &RecognizedText) -> Option<Candidate> {
    let top_third = (text.lines.len() + 2) / 3;
    let mut best: Option<(usize, &str, f32)> = None;

    for (idx, line) in text.lines.iter().take(top_third).enumerate() {
        let content = line.text.trim();
        if patterns::NAME_LABEL.is_match(content) {
            continue;
        }
        if !patterns::ALPHABETIC_LINE.is_match(content) {
            continue;
        }
        let longer = best.map_or(true, |(_, text, _)| content.chars().count() > text.chars().count());
        if longer {
            best = Some((idx, content, line.confidence));
        }
    }

    best.map(|(idx, content, confidence)| Candidate {
        raw: content.to_string(),
        confidence,
        specificity: patterns::NAME_HEURISTIC_SPECIFICITY,
        line_idx: idx,
        tag: None,
    })
}

/// Highest `specificity × confidence` wins; ties go to the earliest document
/// position.
fn select(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<&Candidate> = None;
    for candidate in candidates {
        let replace = match best {
            None => true,
            Some(current) => {
                candidate.score() > current.score()
                    || (candidate.score() == current.score()
                        && candidate.line_idx < current.line_idx)
            }
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}

/// The longest contiguous block of non-empty lines after the last matched
/// field, capped at `max_lines`.
fn address_block(
    text: &RecognizedText,
    last_matched: Option<usize>,
    max_lines: usize,
) -> Option<ExtractedField> {
    let start = last_matched.map_or(0, |i| i + 1);

    let mut blocks: Vec<Vec<(usize, &str, f32)>> = Vec::new();
    let mut current: Vec<(usize, &str, f32)> = Vec::new();
    for (idx, line) in text.lines.iter().enumerate().skip(start) {
        let content = line.text.trim();
        if content.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((idx, content, line.confidence));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    let block = blocks
        .into_iter()
        .max_by_key(|block| block.iter().map(|(_, text, _)| text.chars().count()).sum::<usize>())?;
    let lines: Vec<_> = block.into_iter().take(max_lines.max(1)).collect();

    let mut parts: Vec<String> = Vec::with_capacity(lines.len());
    for (i, (_, content, _)) in lines.iter().enumerate() {
        let content = if i == 0 {
            patterns::ADDRESS_LABEL.replace(content, "").into_owned()
        } else {
            (*content).to_string()
        };
        if !content.is_empty() {
            parts.push(content);
        }
    }
    if parts.is_empty() {
        return None;
    }

    let confidence =
        lines.iter().map(|(_, _, c)| *c).sum::<f32>() / lines.len() as f32;
    Some(ExtractedField::new(
        FieldKind::Address,
        parts.join(", "),
        confidence,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kyc_types::TextLine;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn parse_text(text: &str) -> Extraction {
        parse_with_today(
            &RecognizedText::from_plain_text(text),
            &VerificationConfig::default(),
            today(),
        )
    }

    #[test]
    fn labeled_fields_are_extracted() {
        let extraction = parse_text(
            "Name: Asha Verma\n\
             DOB: 01/01/1990\n\
             Gender: Female\n\
             2345 6789 0124\n\
             Address: House No. 12, MG Road, Pune 411001",
        );

        assert_eq!(extraction.fields[&FieldKind::Name].raw_value, "Asha Verma");
        assert_eq!(
            extraction.fields[&FieldKind::DateOfBirth].raw_value,
            "01/01/1990"
        );
        assert_eq!(extraction.fields[&FieldKind::Gender].raw_value, "Female");
        assert_eq!(
            extraction.fields[&FieldKind::IdNumber].raw_value,
            "2345 6789 0124"
        );
        assert_eq!(extraction.document_type, DocumentType::Aadhaar);
        assert_eq!(
            extraction.fields[&FieldKind::Address].raw_value,
            "House No. 12, MG Road, Pune 411001"
        );
    }

    #[test]
    fn every_kind_gets_exactly_one_entry() {
        let extraction = parse_text("nothing useful here 123");
        assert_eq!(extraction.fields.len(), FieldKind::ALL.len());
        assert!(extraction.fields[&FieldKind::Name].is_absent());
        assert!(extraction.fields[&FieldKind::IdNumber].is_absent());
        assert_eq!(extraction.document_type, DocumentType::Unknown);
    }

    #[test]
    fn name_falls_back_to_longest_alphabetic_line_in_top_third() {
        let extraction = parse_text(
            "Rajesh Kumar Singh\n\
             some text\n\
             15/08/1990\n\
             MALE\n\
             2345 6789 0124\n\
             more trailing text here",
        );
        assert_eq!(
            extraction.fields[&FieldKind::Name].raw_value,
            "Rajesh Kumar Singh"
        );
    }

    #[test]
    fn labeled_name_beats_fallback() {
        let extraction = parse_text(
            "Government of India\n\
             Name: Asha Verma\n\
             DOB: 01/01/1990\n\
             2345 6789 0124",
        );
        assert_eq!(extraction.fields[&FieldKind::Name].raw_value, "Asha Verma");
    }

    #[test]
    fn out_of_range_dates_are_not_candidates() {
        let extraction = parse_text("DOB: 01/01/2999\nBorn 12/06/1899");
        assert!(extraction.fields[&FieldKind::DateOfBirth].is_absent());
    }

    #[test]
    fn first_plausible_date_wins_ties() {
        let extraction = parse_text("Issued 05/03/2020\nDOB: 15/08/1990");
        // Equal specificity and confidence: earliest document position wins.
        assert_eq!(
            extraction.fields[&FieldKind::DateOfBirth].raw_value,
            "05/03/2020"
        );
    }

    #[test]
    fn pan_number_tags_document_type() {
        let extraction = parse_text("Name: Asha Verma\nABCDE1234F");
        assert_eq!(extraction.document_type, DocumentType::Pan);
        assert_eq!(
            extraction.fields[&FieldKind::IdNumber].raw_value,
            "ABCDE1234F"
        );
    }

    #[test]
    fn gender_word_outranks_single_letter() {
        let extraction = parse_text("M G Road\nGender: Female");
        assert_eq!(extraction.fields[&FieldKind::Gender].raw_value, "Female");
    }

    #[test]
    fn address_is_capped_at_configured_lines() {
        let mut config = VerificationConfig::default();
        config.max_address_lines = 2;
        let extraction = parse_with_today(
            &RecognizedText::from_plain_text(
                "2345 6789 0124\n\
                 House No. 12\n\
                 Block A Sector 15\n\
                 Bhubaneswar Odisha 751001",
            ),
            &config,
            today(),
        );
        assert_eq!(
            extraction.fields[&FieldKind::Address].raw_value,
            "House No. 12, Block A Sector 15"
        );
    }

    #[test]
    fn address_confidence_averages_line_confidence() {
        let text = RecognizedText::new(vec![
            TextLine::new("2345 6789 0124", 1.0),
            TextLine::new("House No. 12, MG Road", 0.8),
            TextLine::new("Pune 411001", 0.4),
        ]);
        let extraction =
            parse_with_today(&text, &VerificationConfig::default(), today());
        let confidence = extraction.fields[&FieldKind::Address].source_confidence;
        assert!((confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn selection_prefers_higher_confidence_source() {
        let text = RecognizedText::new(vec![
            TextLine::new("Name: Asha Varma", 0.4),
            TextLine::new("Name: Asha Verma", 0.9),
        ]);
        let extraction =
            parse_with_today(&text, &VerificationConfig::default(), today());
        assert_eq!(extraction.fields[&FieldKind::Name].raw_value, "Asha Verma");
    }
}
