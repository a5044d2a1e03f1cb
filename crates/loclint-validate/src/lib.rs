//! Consistency checks between a master language and one candidate.
//!
//! [`check_language`] runs five checks in a fixed order and appends every
//! finding to the candidate's error list. The master is never touched. The
//! checker never fails: malformed input becomes a finding, not an error.

use loclint_core::{ErrorKind, LanguageRecord, LocalizationError, TextRow};

/// Identical-to-master ratio above which a candidate is flagged as mostly
/// untranslated.
const IDENTICAL_RATIO_LIMIT: f64 = 0.25;

/// Compare `candidate` against `master` and append findings to the
/// candidate's error list.
///
/// Checks, in order:
/// 1. key-set symmetry (`KeysMissing` / `KeysAdded`);
/// 2. key order (`KeysNotInOrder`, at most one, only when check 1 was clean);
/// 3. placeholder consistency (`FormatArgsOpen` / `FormatArgMissing` /
///    `FormatArgsAdded`);
/// 4. identical-to-master ratio (`EmptyTerm` at line 0);
/// 5. blank values (`EmptyTerm` per row).
pub fn check_language(master: &LanguageRecord, candidate: &mut LanguageRecord) {
    let mut findings = check_key_sets(master, candidate);
    if findings.is_empty() {
        // An order check is meaningless once the key sets already differ:
        // it would fail for every language with a missing or added key.
        findings.extend(check_key_order(master, candidate));
    }
    findings.extend(check_placeholders(master, candidate));
    findings.extend(check_untranslated_ratio(master, candidate));
    findings.extend(check_blank_values(candidate));

    for finding in findings {
        candidate.push_error(finding);
    }
}

/// Check 1: both languages must carry exactly the same keys.
///
/// Missing keys are reported at the master row's line (the candidate has no
/// line to point at), added keys at the candidate row's line.
fn check_key_sets(master: &LanguageRecord, candidate: &LanguageRecord) -> Vec<LocalizationError> {
    let mut findings = Vec::new();
    for row in master.rows() {
        if !candidate.contains_key(row.key()) {
            findings.push(LocalizationError::new(
                ErrorKind::KeysMissing,
                format!("Key missing: {}", row.key()),
                row.row_number(),
            ));
        }
    }
    for row in candidate.rows() {
        if !master.contains_key(row.key()) {
            findings.push(LocalizationError::new(
                ErrorKind::KeysAdded,
                format!("Key added: {}", row.key()),
                row.row_number(),
            ));
        }
    }
    findings
}

/// Check 2: keys must appear at the same positions as in the master.
///
/// Only called when the key sets are equal. Reports the first divergence
/// and stops; one reordered block would otherwise flood the report.
fn check_key_order(master: &LanguageRecord, candidate: &LanguageRecord) -> Vec<LocalizationError> {
    for master_row in master.rows() {
        let Some(row) = candidate.row(master_row.key()) else {
            continue;
        };
        if master_row.row_number() != row.row_number() {
            return vec![LocalizationError::new(
                ErrorKind::KeysNotInOrder,
                format!(
                    "Keys not in the same order: `{}` is at row {} in the master but row {} here",
                    master_row.key(),
                    master_row.row_number(),
                    row.row_number()
                ),
                row.row_number(),
            )];
        }
    }
    Vec::new()
}

/// Check 3: every key shared with the master must carry the same placeholder
/// tokens.
///
/// A malformed candidate row short-circuits the set comparison for that key.
/// Token comparison is by set: duplicated tokens on one side do not multiply
/// findings.
fn check_placeholders(
    master: &LanguageRecord,
    candidate: &LanguageRecord,
) -> Vec<LocalizationError> {
    let mut findings = Vec::new();
    for master_row in master.rows() {
        let Some(row) = candidate.row(master_row.key()) else {
            continue;
        };

        if row.has_open_placeholder() {
            findings.push(LocalizationError::new(
                ErrorKind::FormatArgsOpen,
                format!("Translation has a malformed placeholder: {}", row.key()),
                row.row_number(),
            ));
        } else if !master_row.placeholders().is_empty() {
            let master_tokens = master_row.placeholder_set();
            let row_tokens = row.placeholder_set();
            for token in master_tokens.difference(&row_tokens) {
                findings.push(LocalizationError::new(
                    ErrorKind::FormatArgMissing,
                    format!("Placeholder missing: {} ({})", token, row.key()),
                    row.row_number(),
                ));
            }
            for token in row_tokens.difference(&master_tokens) {
                findings.push(LocalizationError::new(
                    ErrorKind::FormatArgsAdded,
                    format!("Translation has an extra placeholder: {} ({})", token, row.key()),
                    row.row_number(),
                ));
            }
        } else if !row.placeholders().is_empty() {
            // A translation must not introduce placeholders the master
            // does not have; one finding covers the whole row.
            findings.push(LocalizationError::new(
                ErrorKind::FormatArgsAdded,
                format!("Translation has extra placeholders: {}", row.key()),
                row.row_number(),
            ));
        }
    }
    findings
}

/// Check 4: most of the candidate should differ from the master text.
///
/// Counts shared keys whose value matches the master case-insensitively.
/// Zero shared keys means there is nothing to measure, so the check is
/// skipped rather than dividing by zero.
fn check_untranslated_ratio(
    master: &LanguageRecord,
    candidate: &LanguageRecord,
) -> Vec<LocalizationError> {
    let mut shared = 0usize;
    let mut identical = 0usize;
    for master_row in master.rows() {
        let Some(row) = candidate.row(master_row.key()) else {
            continue;
        };
        shared += 1;
        if row.value().to_lowercase() == master_row.value().to_lowercase() {
            identical += 1;
        }
    }

    if shared == 0 {
        return Vec::new();
    }

    let ratio = identical as f64 / shared as f64;
    if ratio > IDENTICAL_RATIO_LIMIT {
        return vec![LocalizationError::new(
            ErrorKind::EmptyTerm,
            format!(
                "{:.0}% of terms are identical to their untranslated term",
                ratio * 100.0
            ),
            0,
        )];
    }
    Vec::new()
}

/// Check 5: no row may be left blank. Scans every candidate row, shared with
/// the master or not.
fn check_blank_values(candidate: &LanguageRecord) -> Vec<LocalizationError> {
    candidate
        .rows()
        .filter(|row| row.value().is_empty())
        .map(blank_value_error)
        .collect()
}

fn blank_value_error(row: &TextRow) -> LocalizationError {
    LocalizationError::new(
        ErrorKind::EmptyTerm,
        format!("Key {} is not translated", row.key()),
        row.row_number(),
    )
}
