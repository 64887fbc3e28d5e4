use std::collections::HashSet;

use super::knowledge::KnowledgeBase;
use super::normalize::NormalizedQuery;
use super::types::DetectedSymptom;

/// Match diseases and symptoms against the normalized query text.
///
/// Diseases are ordered by the position of their earliest usable alias
/// match. When two matches start at the same position, the longer alias
/// shadows the shorter one there, so a registry entry reachable only
/// through `covid` cannot pre-empt one matched as `covid-19`; the
/// shadowed disease still counts through any later occurrence of its
/// alias.
pub fn extract(
    query: &NormalizedQuery,
    kb: &KnowledgeBase,
) -> (Vec<String>, Vec<DetectedSymptom>) {
    (detect_diseases(&query.text, kb), detect_symptoms(&query.text, kb))
}

struct AliasMatch<'a> {
    disease_id: &'a str,
    pos: usize,
    len: usize,
}

fn detect_diseases(text: &str, kb: &KnowledgeBase) -> Vec<String> {
    let mut occurrences: Vec<AliasMatch> = Vec::new();
    for disease in kb.diseases() {
        for alias in &disease.aliases {
            for (pos, matched) in text.match_indices(alias.as_str()) {
                occurrences.push(AliasMatch {
                    disease_id: &disease.id,
                    pos,
                    len: matched.len(),
                });
            }
        }
    }

    // Shadowing is per position: an occurrence loses to a longer alias
    // starting at the same position, and the disease falls back to its
    // next occurrence elsewhere in the text.
    let mut usable: Vec<&AliasMatch> = occurrences
        .iter()
        .filter(|m| {
            !occurrences
                .iter()
                .any(|other| other.pos == m.pos && other.len > m.len)
        })
        .collect();
    usable.sort_by(|a, b| a.pos.cmp(&b.pos).then(b.len.cmp(&a.len)));

    let mut seen = HashSet::new();
    let mut diseases = Vec::new();
    for m in usable {
        if seen.insert(m.disease_id) {
            diseases.push(m.disease_id.to_string());
        }
    }
    diseases
}

fn detect_symptoms(text: &str, kb: &KnowledgeBase) -> Vec<DetectedSymptom> {
    struct KeywordMatch<'a> {
        keyword: &'a str,
        category_id: &'a str,
        pos: usize,
    }

    let mut matches: Vec<KeywordMatch> = Vec::new();
    for cat in kb.categories() {
        for keyword in &cat.keywords {
            if let Some(pos) = text.find(keyword.as_str()) {
                matches.push(KeywordMatch {
                    keyword,
                    category_id: &cat.id,
                    pos,
                });
            }
        }
    }

    // First-occurrence order; longer keyword first on ties so "fiebre alta"
    // precedes "fiebre". A keyword may land in several categories.
    matches.sort_by(|a, b| {
        a.pos
            .cmp(&b.pos)
            .then(b.keyword.len().cmp(&a.keyword.len()))
    });

    let mut seen = HashSet::new();
    let mut symptoms = Vec::new();
    for m in &matches {
        if seen.insert((m.keyword, m.category_id)) {
            symptoms.push(DetectedSymptom {
                keyword: m.keyword.to_string(),
                category_id: m.category_id.to_string(),
            });
        }
    }
    symptoms
}
