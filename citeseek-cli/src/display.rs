//! Terminal rendering of search outcomes and offense details.

use std::borrow::Cow;
use std::io::{self, Write};

use citeseek_core::{StatuteEntry, StatuteLibrary};
use citeseek_types::{OffenseRecord, SearchOutcome};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Keywords shown in the details view before eliding the rest.
pub const MAX_DETAIL_KEYWORDS: usize = 35;

const LEVEL_MISSING: &str = "Not specified in dataset";
const STATUTE_MISSING: &str = "Not available for this citation in current dataset.";

/// Whole-word OCR repairs for dataset titles. Replacements are lower case;
/// a capitalized match gets a capitalized replacement.
static OCR_FIXES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\ble\b", "left"),
        (r"(?i)\blel\b", "left"),
        (r"(?i)\baer\b", "after"),
        (r"(?i)\bo\.?cer\b", "officer"),
        (r"(?i)\bficous\b", "fictitious"),
        (r"(?i)\bdefecve\b", "defective"),
        (r"(?i)\bmulple\b", "multiple"),
        (r"(?i)\blighng\b", "lighting"),
        (r"(?i)\bregistraon\b", "registration"),
        (r"(?i)\bcer(?:i|\W*)cate\b", "certificate"),
        (r"(?i)\bignion\b", "ignition"),
        (r"(?i)\binstrucon\b", "instruction"),
        (r"(?i)\bacvate\b", "activate"),
        (r"(?i)\bexcepons\b", "exceptions"),
        (r"(?i)\brecreaonal\b", "recreational"),
        (r"(?i)\barcles\b", "articles"),
    ]
    .into_iter()
    .map(|(pattern, fix)| (Regex::new(pattern).unwrap(), fix))
    .collect()
});

/// Statute section number such as `545.060`.
static STATUTE_SECTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{3}\.\d+").unwrap());

fn match_case(found: &str, fix: &str) -> String {
    match (found.chars().next(), fix.chars().next()) {
        (Some(first), Some(head)) if first.is_uppercase() => {
            let mut out = String::with_capacity(fix.len());
            out.extend(head.to_uppercase());
            out.push_str(&fix[head.len_utf8()..]);
            out
        }
        _ => fix.to_string(),
    }
}

/// Repairs known OCR damage in a display title.
pub fn clean_display_text(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);
    for (re, fix) in OCR_FIXES.iter() {
        if re.is_match(&out) {
            let fixed = re
                .replace_all(&out, |caps: &Captures<'_>| match_case(&caps[0], fix))
                .into_owned();
            out = Cow::Owned(fixed);
        }
    }
    out
}

/// `CODE § citation`, followed by ` • level` when a level is known.
pub fn cite_line(record: &OffenseRecord) -> String {
    match record.level_code.as_deref().filter(|l| !l.is_empty()) {
        Some(level) => format!("{} • {level}", record.cite()),
        None => record.cite(),
    }
}

/// Offense level, or a placeholder when the dataset has none.
pub fn level_text(record: &OffenseRecord) -> &str {
    record
        .level_code
        .as_deref()
        .filter(|l| !l.is_empty())
        .unwrap_or(LEVEL_MISSING)
}

/// First [`MAX_DETAIL_KEYWORDS`] keywords, with an ellipsis when more exist.
pub fn keyword_preview(keywords: &str) -> String {
    let mut words = keywords.split_whitespace();
    let shown: Vec<&str> = words.by_ref().take(MAX_DETAIL_KEYWORDS).collect();
    let mut out = shown.join(" ");
    if words.next().is_some() {
        out.push_str(" …");
    }
    out
}

/// Statute section such as `545.060`, taken from `citation_base` and
/// falling back to `citation`.
pub fn statute_section(record: &OffenseRecord) -> Option<&str> {
    let source = record
        .citation_base
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(record.citation());
    STATUTE_SECTION.find(source).map(|m| m.as_str())
}

/// Default statute URL for a section of the Transportation Code.
pub fn default_statute_url(section: &str) -> String {
    let chapter = section.split('.').next().unwrap_or(section);
    format!("https://statutes.capitol.texas.gov/Docs/TN/htm/TN.{chapter}.htm#{section}")
}

fn write_entry<W: Write>(out: &mut W, rank: usize, record: &OffenseRecord) -> io::Result<()> {
    writeln!(out, "  {rank:>2}. {}", clean_display_text(&record.title))?;
    writeln!(out, "      {}", cite_line(record))
}

fn write_list<W: Write>(out: &mut W, heading: &str, records: &[&OffenseRecord]) -> io::Result<()> {
    writeln!(out, "{heading} ({})", records.len())?;
    if records.is_empty() {
        writeln!(out, "  No matches.")?;
    }
    for (i, record) in records.iter().enumerate() {
        write_entry(out, i + 1, record)?;
    }
    Ok(())
}

/// Plain-text rendering of a search outcome.
pub fn write_outcome<W: Write>(out: &mut W, outcome: &SearchOutcome<'_>) -> io::Result<()> {
    if let Some(status) = outcome.status {
        return writeln!(out, "{status}");
    }

    if outcome.primary.is_empty() {
        writeln!(out, "No exact match.")?;
        return write_list(out, "Top matches", &outcome.top);
    }

    writeln!(out, "Primary match")?;
    for record in &outcome.primary {
        writeln!(out, "  {}", clean_display_text(&record.title))?;
        writeln!(out, "  {}", cite_line(record))?;
    }
    writeln!(out)?;
    write_list(out, "Related", &outcome.related)
}

/// JSON rendering of a search outcome.
pub fn write_outcome_json<W: Write>(out: &mut W, outcome: &SearchOutcome<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcome)?;
    writeln!(out)
}

fn write_statute<W: Write>(
    out: &mut W,
    section: &str,
    entry: Option<&StatuteEntry>,
) -> io::Result<()> {
    writeln!(out, "Statute:       {section}")?;
    if let Some(text) = entry.and_then(|e| e.text.as_deref()) {
        for line in text.lines() {
            writeln!(out, "  {line}")?;
        }
        return Ok(());
    }
    match entry.and_then(|e| e.url.as_deref()) {
        Some(url) => writeln!(out, "  {url}"),
        None => writeln!(out, "  {}", default_statute_url(section)),
    }
}

/// Details view for one offense.
pub fn write_details<W: Write>(
    out: &mut W,
    record: &OffenseRecord,
    statutes: &StatuteLibrary,
) -> io::Result<()> {
    writeln!(out, "{}", clean_display_text(&record.title))?;
    writeln!(out, "Citation:      {}", record.cite())?;
    writeln!(out, "Offense level: {}", level_text(record))?;
    writeln!(out, "Keywords:      {}", keyword_preview(record.keywords()))?;
    match statute_section(record) {
        Some(section) => write_statute(out, section, statutes.get(section)),
        None => writeln!(out, "Statute:       {STATUTE_MISSING}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn record() -> OffenseRecord {
        let mut r = OffenseRecord::new(7, "Fail to Yield Turning Le")
            .with_keywords("yield left turn")
            .with_citation("545.152");
        r.level_code = Some("C".into());
        r
    }

    #[test]
    fn ocr_fixes_keep_capitalization() {
        assert_eq!(clean_display_text("Turn Le Aer Signal"), "Turn Left After Signal");
        assert_eq!(clean_display_text("expired registraon"), "expired registration");
        assert_eq!(clean_display_text("Registraon Cer.cate"), "Registration Certificate");
        assert_eq!(clean_display_text("Fleeing Police O.cer"), "Fleeing Police Officer");
    }

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(OCR_FIXES.len(), 16);
        assert!(STATUTE_SECTION.is_match("545.060"));
    }

    #[test]
    fn ocr_fixes_leave_clean_text_borrowed() {
        let clean = clean_display_text("Speeding in School Zone");
        assert!(matches!(clean, Cow::Borrowed(_)));
        assert_eq!(clean_display_text("Lean certificate grocer"), "Lean certificate grocer");
    }

    #[test]
    fn cite_line_with_and_without_level() {
        let mut r = record();
        assert_eq!(cite_line(&r), "TTC § 545.152 • C");
        r.level_code = None;
        assert_eq!(cite_line(&r), "TTC § 545.152");
        assert_eq!(level_text(&r), "Not specified in dataset");
    }

    #[test]
    fn keyword_preview_elides_after_limit() {
        let many: Vec<String> = (0..40).map(|i| format!("k{i}")).collect();
        let preview = keyword_preview(&many.join(" "));
        assert!(preview.starts_with("k0 k1"));
        assert!(preview.ends_with("k34 …"));
        assert_eq!(keyword_preview("a  b\tc"), "a b c");
    }

    #[test]
    fn statute_section_prefers_citation_base() {
        let mut r = record();
        assert_eq!(statute_section(&r), Some("545.152"));
        r.citation_base = Some("545.060(a)".into());
        assert_eq!(statute_section(&r), Some("545.060"));
        r.citation_base = Some(String::new());
        r.citation = Some("Sec. 601.191".into());
        assert_eq!(statute_section(&r), Some("601.191"));
        r.citation = Some("local ordinance".into());
        assert_eq!(statute_section(&r), None);
    }

    #[test]
    fn default_url_uses_chapter() {
        assert_eq!(
            default_statute_url("545.060"),
            "https://statutes.capitol.texas.gov/Docs/TN/htm/TN.545.htm#545.060"
        );
    }

    #[test]
    fn outcome_with_primary() {
        let primary = record();
        let other = OffenseRecord::new(8, "Fail to Signal Turn").with_citation("545.104");
        let outcome = SearchOutcome {
            primary: vec![&primary],
            related: vec![&other],
            top: Vec::new(),
            status: None,
        };
        let text = render(|buf| write_outcome(buf, &outcome));
        assert!(text.starts_with("Primary match\n  Fail to Yield Turning Left\n"));
        assert!(text.contains("Related (1)\n   1. Fail to Signal Turn\n      TTC § 545.104\n"));
    }

    #[test]
    fn outcome_without_primary_lists_top() {
        let outcome = SearchOutcome::default();
        let text = render(|buf| write_outcome(buf, &outcome));
        assert_eq!(text, "No exact match.\nTop matches (0)\n  No matches.\n");
    }

    #[test]
    fn prompt_outcome_prints_status() {
        let text = render(|buf| write_outcome(buf, &SearchOutcome::prompt()));
        assert_eq!(text.trim_end(), SearchOutcome::prompt().status.unwrap());
    }

    #[test]
    fn json_outcome_is_valid() {
        let primary = record();
        let outcome = SearchOutcome {
            primary: vec![&primary],
            ..SearchOutcome::default()
        };
        let text = render(|buf| write_outcome_json(buf, &outcome));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["primary"][0]["id"], 7);
    }

    #[test]
    fn details_falls_back_to_default_url() {
        let text = render(|buf| write_details(buf, &record(), &StatuteLibrary::default()));
        assert!(text.contains("Offense level: C\n"));
        assert!(text.contains("Keywords:      yield left turn\n"));
        assert!(text.contains("TN.545.htm#545.152"));
    }

    #[test]
    fn details_without_section() {
        let r = OffenseRecord::new(1, "City Ordinance");
        let text = render(|buf| write_details(buf, &r, &StatuteLibrary::default()));
        assert!(text.contains("Offense level: Not specified in dataset"));
        assert!(text.ends_with("Not available for this citation in current dataset.\n"));
    }
}
