#![allow(non_snake_case)]

use super::*;
use crate::entry::EntryMetadata;

const SAMPLE: &str = "\
# Stash plugin index
# Generated by stashpack; manual edits to entries may be overwritten.

- id: performersitesync
  name: Performer Site Sync
  metadata:
    description: Sync favourites
  version: 0.9.0
  date: 2025-01-02 03:04:05
  path: PerformerSiteSync-0.9.0.zip
  sha256: aaaa
  requires: []
# pinned for the 0.27 server
- id: taggraph
  name: Tag Graph
  metadata:
    description: Visualise tag hierarchies
  version: '2.1.0'
  date: 2024-11-30 10:00:00
  path: TagGraph-2.1.0.zip
  sha256: bbbb
  requires:
    - performersitesync
";

fn entry(id: &str, version: &str) -> IndexEntry {
    IndexEntry {
        id: id.into(),
        name: id.to_uppercase(),
        metadata: EntryMetadata {
            description: format!("{id} plugin"),
        },
        version: version.into(),
        date: "2026-10-14 09:00:00".into(),
        path: format!("{id}-{version}.zip"),
        sha256: "cd".repeat(32),
        requires: vec![],
    }
}

// Parsing

#[test]
fn IndexDocument___parse___splits_header_and_entries() {
    let doc = IndexDocument::parse(SAMPLE).unwrap();

    assert_eq!(doc.header().count(), 3);
    assert_eq!(doc.header().next(), Some("# Stash plugin index"));
    assert_eq!(doc.ids().collect::<Vec<_>>(), vec!["performersitesync", "taggraph"]);
}

#[test]
fn IndexDocument___parse___reads_versions() {
    let doc = IndexDocument::parse(SAMPLE).unwrap();

    assert_eq!(doc.version_of("performersitesync").as_deref(), Some("0.9.0"));
    assert_eq!(doc.version_of("taggraph").as_deref(), Some("2.1.0"));
    assert_eq!(doc.version_of("missing"), None);
}

#[test]
fn IndexDocument___parse_empty_flow_sequence___has_no_entries() {
    let doc = IndexDocument::parse("# header\n[]\n").unwrap();

    assert!(doc.is_empty());
    assert_eq!(doc.header().collect::<Vec<_>>(), vec!["# header"]);
}

#[test]
fn IndexDocument___parse_empty_text___is_empty() {
    let doc = IndexDocument::parse("").unwrap();

    assert!(doc.is_empty());
    assert!(doc.header().next().is_none());
}

#[test]
fn IndexDocument___parse_entry_without_id___returns_parse_error() {
    let text = "# h\n- name: Orphan\n  version: 1.0.0\n";

    let err = IndexDocument::parse(text).unwrap_err();

    assert!(matches!(err, IndexError::Parse { line: 2, .. }));
}

#[test]
fn IndexDocument___parse_invalid_yaml___returns_parse_error() {
    let text = "- id: a\n  name: [unterminated\n";

    assert!(matches!(
        IndexDocument::parse(text),
        Err(IndexError::Parse { line: 1, .. })
    ));
}

#[test]
fn DocumentEntry___to_entry___parses_verbatim_block() {
    let doc = IndexDocument::parse(SAMPLE).unwrap();

    let tag_graph = doc.get("taggraph").unwrap().to_entry().unwrap();

    assert_eq!(tag_graph.name, "Tag Graph");
    assert_eq!(tag_graph.requires, vec!["performersitesync".to_string()]);
}

// Rendering

#[test]
fn IndexDocument___render_unchanged___reproduces_input() {
    let doc = IndexDocument::parse(SAMPLE).unwrap();

    assert_eq!(doc.render().unwrap(), SAMPLE);
}

#[test]
fn IndexDocument___render_empty___writes_empty_sequence() {
    let doc = IndexDocument::parse("# nothing published yet").unwrap();

    assert_eq!(doc.render().unwrap(), "# nothing published yet\n[]\n");
}

#[test]
fn IndexDocument___render___output_parses_back() {
    let mut doc = IndexDocument::parse(SAMPLE).unwrap();
    doc.upsert(entry("newplugin", "1.0.0"));

    let rendered = doc.render().unwrap();
    let reparsed = IndexDocument::parse(&rendered).unwrap();

    assert_eq!(
        reparsed.ids().collect::<Vec<_>>(),
        vec!["performersitesync", "taggraph", "newplugin"]
    );
    assert!(reparsed.header().eq(doc.header()));
}

// Upsert

#[test]
fn IndexDocument___upsert_existing___replaces_in_place() {
    let mut doc = IndexDocument::parse(SAMPLE).unwrap();

    let outcome = doc.upsert(entry("performersitesync", "1.0.0"));

    assert_eq!(outcome, Upsert::Replaced);
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.entries()[0].id(), "performersitesync");
    assert!(!doc.entries()[0].is_verbatim());
    assert!(doc.entries()[1].is_verbatim());
    assert_eq!(doc.version_of("performersitesync").as_deref(), Some("1.0.0"));
}

#[test]
fn IndexDocument___upsert_existing___drops_every_old_field() {
    let mut doc = IndexDocument::parse(SAMPLE).unwrap();

    doc.upsert(entry("taggraph", "2.2.0"));
    let replaced = doc.get("taggraph").unwrap().to_entry().unwrap();

    assert!(replaced.requires.is_empty());
    assert_eq!(replaced.name, "TAGGRAPH");
}

#[test]
fn IndexDocument___upsert_new___appends_at_end() {
    let mut doc = IndexDocument::parse(SAMPLE).unwrap();

    let outcome = doc.upsert(entry("zeta", "1.0.0"));

    assert_eq!(outcome, Upsert::Appended);
    assert_eq!(doc.ids().last(), Some("zeta"));
    assert_eq!(doc.len(), 3);
}

#[test]
fn IndexDocument___upsert_with_duplicates___keeps_first_position_only() {
    let text = "- id: a\n  version: 1.0.0\n- id: b\n  version: 1.0.0\n- id: a\n  version: 0.1.0\n";
    let mut doc = IndexDocument::parse(text).unwrap();

    doc.upsert(entry("a", "2.0.0"));

    assert_eq!(doc.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(doc.version_of("a").as_deref(), Some("2.0.0"));
}

#[test]
fn IndexDocument___upsert___untouched_text_survives_render() {
    let mut doc = IndexDocument::parse(SAMPLE).unwrap();

    doc.upsert(entry("performersitesync", "1.0.0"));
    let rendered = doc.render().unwrap();

    let tag_graph_block = &SAMPLE[SAMPLE.find("- id: taggraph").unwrap()..];
    assert!(rendered.ends_with(tag_graph_block));
    assert!(rendered.starts_with("# Stash plugin index\n"));
    assert!(!rendered.contains("sha256: aaaa"));
}

#[test]
fn IndexDocument___upsert_previous_entry___keeps_comment_above_next() {
    let text = "# header\n- id: a\n  version: 1.0.0\n# --- b: keep me ---\n\n- id: b\n  version: 2.0.0\n";
    let mut doc = IndexDocument::parse(text).unwrap();

    doc.upsert(entry("a", "1.0.1"));
    let rendered = doc.render().unwrap();

    assert!(rendered.ends_with("# --- b: keep me ---\n\n- id: b\n  version: 2.0.0\n"));
    assert_eq!(
        IndexDocument::parse(&rendered).unwrap().ids().collect::<Vec<_>>(),
        vec!["a", "b"]
    );
}

#[test]
fn IndexDocument___upsert_replaced_entry___keeps_its_own_comment() {
    let mut doc = IndexDocument::parse(SAMPLE).unwrap();

    doc.upsert(entry("taggraph", "2.2.0"));
    let rendered = doc.render().unwrap();

    assert!(rendered.contains("  requires: []\n# pinned for the 0.27 server\n- id: taggraph\n"));
}

#[test]
fn IndexDocument___indented_comment_and_blank_line___stay_inside_entry() {
    let text = "- id: a\n  metadata:\n\n  # inline note\n    description: d\n  version: 1.0.0\n";

    let doc = IndexDocument::parse(text).unwrap();

    assert_eq!(doc.version_of("a").as_deref(), Some("1.0.0"));
    assert_eq!(doc.render().unwrap(), text);
}

#[test]
fn IndexDocument___trailing_comment___rendered_after_entries() {
    let text = "- id: a\n  version: 1.0.0\n# end of index\n";
    let mut doc = IndexDocument::parse(text).unwrap();

    doc.upsert(entry("b", "1.0.0"));
    let rendered = doc.render().unwrap();

    assert!(rendered.starts_with("- id: a\n  version: 1.0.0\n- id: b\n"));
    assert!(rendered.ends_with("# end of index\n"));
}

// Line endings

const CRLF_SAMPLE: &str = "# header\r\n\r\n- id: a\r\n  version: 1.0.0\r\n# about b\r\n- id: b\r\n  version: 2.0.0\r\n";

#[test]
fn IndexDocument___render_unchanged_crlf___reproduces_input() {
    let doc = IndexDocument::parse(CRLF_SAMPLE).unwrap();

    assert_eq!(doc.render().unwrap(), CRLF_SAMPLE);
    assert_eq!(doc.header().next(), Some("# header"));
    assert_eq!(doc.version_of("b").as_deref(), Some("2.0.0"));
}

#[test]
fn IndexDocument___upsert_in_crlf_document___keeps_untouched_bytes() {
    let mut doc = IndexDocument::parse(CRLF_SAMPLE).unwrap();

    doc.upsert(entry("a", "1.0.1"));
    doc.upsert(entry("c", "1.0.0"));
    let rendered = doc.render().unwrap();

    assert!(rendered.starts_with("# header\r\n\r\n- id: a\r\n"));
    assert!(rendered.contains("# about b\r\n- id: b\r\n  version: 2.0.0\r\n- id: c\r\n"));
    assert!(!rendered.replace("\r\n", "").contains('\n'));
}

#[test]
fn IndexDocument___missing_final_newline___appended_entry_starts_on_new_line() {
    let mut doc = IndexDocument::parse("- id: a\n  version: 1.0.0").unwrap();

    doc.upsert(entry("b", "1.0.0"));
    let rendered = doc.render().unwrap();

    assert!(rendered.starts_with("- id: a\n  version: 1.0.0\n- id: b\n"));
}
