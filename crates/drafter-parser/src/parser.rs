//! Single-pass line parser for the spec format.
//!
//! The parser walks the source line by line, carrying an explicit state
//! value: the current section and, inside the Clusters section, the index
//! of the most recently declared cluster (a cluster's `parent:` attribute
//! is declared on the line following its bullet, not inline).
//!
//! Tolerance policy: blank lines are skipped silently; prose or malformed
//! bullets inside a recognized section are skipped with a warning; an
//! input with no recognized section header at all is a fatal error.

use drafter_core::{graph::ExpectedCounts, identifier::Id};
use log::debug;

use crate::{
    ast::{DraftCluster, DraftEdge, DraftGraph, DraftNode},
    error::{Diagnostic, ErrorCode, ParseError},
    scan::{self, CountAxis, Header, SectionKind},
    span::{Span, Spanned},
};

/// Result of a successful parse: the draft graph, any declared expected
/// counts, and the non-fatal warnings collected along the way.
#[derive(Debug)]
pub struct Parse {
    pub draft: DraftGraph,
    pub expected: Option<ExpectedCounts>,
    pub warnings: Vec<Diagnostic>,
}

/// Where in the document the line cursor currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before any `##` header; title and description prose live here.
    Preamble,
    Description,
    Components,
    Connections,
    Clusters,
    Expected,
    /// Inside an unrecognized `##` section; contents are ignored.
    Unknown,
}

/// Parse source text into a draft graph.
///
/// # Errors
///
/// Returns [`ParseError`] when the input contains no recognized section
/// header at all. Everything else inside the document is recoverable.
pub fn parse_draft(source: &str) -> Result<Parse, ParseError> {
    let mut draft = DraftGraph::default();
    let mut expected = ExpectedCounts::default();
    let mut saw_expected_section = false;
    let mut warnings = Vec::new();

    let mut section = Section::Preamble;
    let mut last_cluster: Option<usize> = None;
    let mut saw_title = false;
    let mut recognized_sections = 0usize;
    let mut preamble_prose: Vec<&str> = Vec::new();
    let mut description_prose: Vec<&str> = Vec::new();

    let mut offset = 0usize;
    for raw in source.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        let line_span = Span::new(offset..offset + line.len());
        offset += raw.len();

        if line.trim().is_empty() {
            continue;
        }

        // Headers switch sections regardless of current state.
        if let Some(header) = scan::header(line) {
            match header {
                Header::Title(title) => {
                    if section == Section::Preamble && !saw_title {
                        draft.name = title.to_owned();
                        saw_title = true;
                    }
                    // Later H1 lines are ignored.
                    continue;
                }
                Header::Section(kind) => {
                    recognized_sections += 1;
                    last_cluster = None;
                    section = match kind {
                        SectionKind::Description => Section::Description,
                        SectionKind::Components => Section::Components,
                        SectionKind::Connections => Section::Connections,
                        SectionKind::Clusters => Section::Clusters,
                        SectionKind::Expected => {
                            saw_expected_section = true;
                            Section::Expected
                        }
                    };
                    continue;
                }
                Header::Sub => continue,
                Header::Unknown(name) => {
                    warnings.push(
                        Diagnostic::warning(format!("unrecognized section `{name}`"))
                            .with_code(ErrorCode::E103)
                            .with_label(line_span, "contents of this section are ignored"),
                    );
                    section = Section::Unknown;
                    continue;
                }
            }
        }

        match section {
            Section::Preamble => preamble_prose.push(line.trim()),
            Section::Description => description_prose.push(line.trim()),
            Section::Unknown => {}
            Section::Components => match scan::component_bullet(line) {
                Some(fields) => draft.nodes.push(DraftNode {
                    id: spanned_id(line_span, line, fields.id),
                    label: fields.label.to_owned(),
                    type_tag: fields.type_tag.to_owned(),
                    description: fields.description.map(str::to_owned),
                }),
                None => warnings.push(skipped_line(line_span, "Components")),
            },
            Section::Connections => match scan::connection_bullet(line) {
                Some(fields) => draft.edges.push(DraftEdge {
                    source: spanned_id(line_span, line, fields.source),
                    target: spanned_id(line_span, line, fields.target),
                    label: fields.label.map(str::to_owned),
                }),
                None => warnings.push(skipped_line(line_span, "Connections")),
            },
            Section::Clusters => {
                if let Some(parent) = scan::parent_attr(line) {
                    match last_cluster {
                        Some(index) => {
                            draft.clusters[index].parent =
                                Some(spanned_id(line_span, line, parent));
                        }
                        None => warnings.push(
                            Diagnostic::warning(
                                "`parent:` attribute appears before any cluster bullet",
                            )
                            .with_code(ErrorCode::E101)
                            .with_label(line_span, "nothing to attach this parent to"),
                        ),
                    }
                } else if let Some(fields) = scan::cluster_bullet(line) {
                    draft.clusters.push(DraftCluster {
                        id: spanned_id(line_span, line, fields.id),
                        label: fields.label.to_owned(),
                        node_ids: fields
                            .members
                            .iter()
                            .map(|member| spanned_id(line_span, line, member))
                            .collect(),
                        parent: None,
                    });
                    last_cluster = Some(draft.clusters.len() - 1);
                } else {
                    warnings.push(skipped_line(line_span, "Clusters"));
                }
            }
            Section::Expected => match scan::expected_total(line) {
                Some((count, Some(axis))) => {
                    let slot = match axis {
                        CountAxis::Nodes => &mut expected.nodes,
                        CountAxis::Edges => &mut expected.edges,
                        CountAxis::Clusters => &mut expected.clusters,
                    };
                    *slot = Some(count);
                }
                Some((_, None)) => warnings.push(
                    Diagnostic::warning("expected-count bullet names no recognized axis")
                        .with_code(ErrorCode::E102)
                        .with_label(line_span, "expected `nodes`, `connections`, or `clusters`"),
                ),
                None => warnings.push(skipped_line(line_span, "Expected Results")),
            },
        }
    }

    if recognized_sections == 0 {
        return Err(Diagnostic::error("no recognized section structure found")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(0..source.len().min(1)), "not a spec document")
            .with_help(
                "a spec needs at least one of `## Components`, `## Connections`, \
                 `## Clusters`, `## Description`, or `## Expected Results`",
            )
            .into());
    }

    let prose = if description_prose.is_empty() {
        preamble_prose
    } else {
        description_prose
    };
    let description = prose.join("\n").trim().to_owned();
    draft.description = (!description.is_empty()).then_some(description);

    debug!(
        nodes = draft.nodes.len(),
        edges = draft.edges.len(),
        clusters = draft.clusters.len(),
        warnings = warnings.len();
        "Draft graph parsed"
    );

    Ok(Parse {
        draft,
        expected: saw_expected_section.then_some(expected),
        warnings,
    })
}

/// Attach the span of `field` within `line` to an interned id.
///
/// Falls back to the whole line span when the field slice does not come
/// from this line (never the case for scanners in this crate).
fn spanned_id(line_span: Span, line: &str, field: &str) -> Spanned<Id> {
    let line_start = line.as_ptr() as usize;
    let field_start = field.as_ptr() as usize;
    let span = if field_start >= line_start && field_start + field.len() <= line_start + line.len()
    {
        let offset = line_span.start() + (field_start - line_start);
        Span::new(offset..offset + field.len())
    } else {
        line_span
    };
    Spanned::new(Id::new(field), span)
}

fn skipped_line(span: Span, section: &str) -> Diagnostic {
    Diagnostic::warning(format!(
        "line does not match any bullet shape of the {section} section"
    ))
    .with_code(ErrorCode::E100)
    .with_label(span, "skipped")
}
