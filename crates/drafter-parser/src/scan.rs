//! Line scanners for the spec format.
//!
//! Each function here recognizes one line shape with [`winnow`] parsers
//! and returns `None` when the line does not match, leaving tolerance
//! policy (skip with warning, fatal, ignore) to the state machine in
//! [`parser`](crate::parser). All returned string slices borrow from the
//! input line, so callers can recover byte offsets for spans.

use winnow::{
    Parser,
    ascii::{Caseless, digit1, space0, space1},
    combinator::{opt, preceded},
    token::{rest, take_till, take_while},
};

type ScanResult<O> = winnow::Result<O>;

/// A recognized `#`-style heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Header<'s> {
    /// `# <title>` - the diagram name.
    Title(&'s str),
    /// `## <known section>`.
    Section(SectionKind),
    /// `### <anything>` - grouping sub-header, skipped silently.
    Sub,
    /// `## <unknown name>`.
    Unknown(&'s str),
}

/// The known `##` sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SectionKind {
    Description,
    Components,
    Connections,
    Clusters,
    Expected,
}

/// Fields of a component bullet: `- **id**: label | type | description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComponentFields<'s> {
    pub id: &'s str,
    pub label: &'s str,
    pub type_tag: &'s str,
    pub description: Option<&'s str>,
}

/// Fields of a connection bullet: `- source -> target | label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectionFields<'s> {
    pub source: &'s str,
    pub target: &'s str,
    pub label: Option<&'s str>,
}

/// Fields of a cluster bullet: `- **id**: label | node_id, node_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClusterFields<'s> {
    pub id: &'s str,
    pub label: &'s str,
    pub members: Vec<&'s str>,
}

/// Axis named by an expected-results bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CountAxis {
    Nodes,
    Edges,
    Clusters,
}

/// Leading bullet marker: `- ` with optional indentation.
fn bullet(input: &mut &str) -> ScanResult<()> {
    (space0, '-', space1).void().parse_next(input)
}

/// A bare identifier token (word characters only).
fn ident<'s>(input: &mut &'s str) -> ScanResult<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// A bold-marked identifier: `**id**`.
fn bold_id<'s>(input: &mut &'s str) -> ScanResult<&'s str> {
    ("**", take_till(1.., '*'), "**")
        .map(|(_, id, _): (&str, &'s str, &str)| id)
        .parse_next(input)
}

/// The `#` run and remainder of a heading line.
fn heading<'s>(input: &mut &'s str) -> ScanResult<(&'s str, &'s str)> {
    (space0, take_while(1.., '#'), space1, rest)
        .map(|(_, hashes, _, name): (_, &'s str, _, &'s str)| (hashes, name))
        .parse_next(input)
}

/// Classify a heading line, or return `None` if the line is not a heading.
pub(crate) fn header(line: &str) -> Option<Header<'_>> {
    let mut input = line;
    let (hashes, name) = heading(&mut input).ok()?;

    let name = name.trim();
    match hashes.len() {
        1 => Some(Header::Title(name)),
        2 => {
            let kind = if name.eq_ignore_ascii_case("description") {
                SectionKind::Description
            } else if name.eq_ignore_ascii_case("components") {
                SectionKind::Components
            } else if name.eq_ignore_ascii_case("connections") {
                SectionKind::Connections
            } else if name.eq_ignore_ascii_case("clusters") {
                SectionKind::Clusters
            } else if name.eq_ignore_ascii_case("expected results") {
                SectionKind::Expected
            } else {
                return Some(Header::Unknown(name));
            };
            Some(Header::Section(kind))
        }
        _ => Some(Header::Sub),
    }
}

/// Parse a component bullet, or `None` if the line has another shape.
pub(crate) fn component_bullet(line: &str) -> Option<ComponentFields<'_>> {
    let mut input = line;
    let (_, id, _, _, _, label, _, type_tag, description): (
        _,
        &str,
        _,
        _,
        _,
        &str,
        _,
        &str,
        Option<&str>,
    ) = (
        bullet,
        bold_id,
        space0,
        ':',
        space0,
        take_till(1.., '|'),
        '|',
        take_till(1.., '|'),
        opt(preceded('|', rest)),
    )
        .parse_next(&mut input)
        .ok()?;

    let fields = ComponentFields {
        id: id.trim(),
        label: label.trim(),
        type_tag: type_tag.trim(),
        description: description.map(str::trim).filter(|d| !d.is_empty()),
    };
    (!fields.id.is_empty() && !fields.label.is_empty() && !fields.type_tag.is_empty())
        .then_some(fields)
}

/// Parse a connection bullet, or `None` if the line has another shape.
pub(crate) fn connection_bullet(line: &str) -> Option<ConnectionFields<'_>> {
    let mut input = line;
    let (_, source, _, _, _, target, label): (_, &str, _, _, _, &str, Option<&str>) = (
        bullet,
        ident,
        space0,
        "->",
        space0,
        ident,
        opt(preceded((space0, '|'), rest)),
    )
        .parse_next(&mut input)
        .ok()?;

    Some(ConnectionFields {
        source,
        target,
        label: label.map(str::trim).filter(|l| !l.is_empty()),
    })
}

/// Parse a cluster bullet, or `None` if the line has another shape.
///
/// The member list after the pipe may be empty (pure grouping container).
pub(crate) fn cluster_bullet(line: &str) -> Option<ClusterFields<'_>> {
    let mut input = line;
    let (_, id, _, _, _, label, members): (_, &str, _, _, _, &str, Option<&str>) = (
        bullet,
        bold_id,
        space0,
        ':',
        space0,
        take_till(1.., '|'),
        opt(preceded('|', rest)),
    )
        .parse_next(&mut input)
        .ok()?;

    let id = id.trim();
    let label = label.trim();
    if id.is_empty() || label.is_empty() {
        return None;
    }
    Some(ClusterFields {
        id,
        label,
        members: members
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect(),
    })
}

/// Parse a `- parent: <cluster_id>` attribute line.
pub(crate) fn parent_attr(line: &str) -> Option<&str> {
    let mut input = line;
    let (_, _, _, _, _, parent): (_, _, _, _, _, &str) =
        (bullet, "parent", space0, ':', space0, ident)
            .parse_next(&mut input)
            .ok()?;
    Some(parent)
}

/// Parse an expected-results bullet: `- Total: <N> <axis>`.
///
/// Returns the count and the axis, or `Some((n, None))` when the bullet is
/// a total but names no recognized axis (the caller warns).
pub(crate) fn expected_total(line: &str) -> Option<(usize, Option<CountAxis>)> {
    let mut input = line;
    let (_, _, _, _, _, digits, axis): (_, _, _, _, _, &str, &str) = (
        bullet,
        Caseless("total"),
        space0,
        ':',
        space0,
        digit1,
        rest,
    )
        .parse_next(&mut input)
        .ok()?;

    let count: usize = digits.parse().ok()?;
    let axis_word = axis
        .trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let axis = if axis_word.starts_with("node") || axis_word.starts_with("component") {
        Some(CountAxis::Nodes)
    } else if axis_word.starts_with("connection") || axis_word.starts_with("edge") {
        Some(CountAxis::Edges)
    } else if axis_word.starts_with("cluster") {
        Some(CountAxis::Clusters)
    } else {
        None
    };
    Some((count, axis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_title() {
        assert_eq!(header("# My Diagram"), Some(Header::Title("My Diagram")));
    }

    #[test]
    fn test_header_sections_case_insensitive() {
        assert_eq!(
            header("## Components"),
            Some(Header::Section(SectionKind::Components))
        );
        assert_eq!(
            header("##  connections "),
            Some(Header::Section(SectionKind::Connections))
        );
        assert_eq!(
            header("## EXPECTED RESULTS"),
            Some(Header::Section(SectionKind::Expected))
        );
    }

    #[test]
    fn test_header_tolerates_leading_indent() {
        assert_eq!(header("  # Indented"), Some(Header::Title("Indented")));
        assert_eq!(
            header("  ## Clusters"),
            Some(Header::Section(SectionKind::Clusters))
        );
    }

    #[test]
    fn test_header_sub_and_unknown() {
        assert_eq!(header("### Frontend Tier"), Some(Header::Sub));
        assert_eq!(header("## Appendix"), Some(Header::Unknown("Appendix")));
        assert_eq!(header("not a header"), None);
        assert_eq!(header("#no-space"), None);
    }

    #[test]
    fn test_component_bullet_full() {
        let fields =
            component_bullet("- **web**: Web Server | nginx | public entry point").unwrap();
        assert_eq!(fields.id, "web");
        assert_eq!(fields.label, "Web Server");
        assert_eq!(fields.type_tag, "nginx");
        assert_eq!(fields.description, Some("public entry point"));
    }

    #[test]
    fn test_component_bullet_without_description() {
        let fields = component_bullet("- **db**: Database | postgresql").unwrap();
        assert_eq!(fields.id, "db");
        assert_eq!(fields.description, None);
    }

    #[test]
    fn test_component_bullet_missing_type_is_rejected() {
        assert_eq!(component_bullet("- **db**: Database"), None);
    }

    #[test]
    fn test_component_bullet_requires_bold_id() {
        assert_eq!(component_bullet("- db: Database | postgresql"), None);
    }

    #[test]
    fn test_connection_bullet() {
        let fields = connection_bullet("- web -> db | queries").unwrap();
        assert_eq!(fields.source, "web");
        assert_eq!(fields.target, "db");
        assert_eq!(fields.label, Some("queries"));

        let unlabeled = connection_bullet("- web -> cache").unwrap();
        assert_eq!(unlabeled.label, None);
    }

    #[test]
    fn test_connection_bullet_self_loop() {
        let fields = connection_bullet("- worker -> worker | retry").unwrap();
        assert_eq!(fields.source, fields.target);
    }

    #[test]
    fn test_connection_bullet_rejects_missing_arrow() {
        assert_eq!(connection_bullet("- web db"), None);
    }

    #[test]
    fn test_cluster_bullet_with_members() {
        let fields = cluster_bullet("- **backend**: Backend Tier | api, worker, db").unwrap();
        assert_eq!(fields.id, "backend");
        assert_eq!(fields.label, "Backend Tier");
        assert_eq!(fields.members, vec!["api", "worker", "db"]);
    }

    #[test]
    fn test_cluster_bullet_empty_members() {
        let fields = cluster_bullet("- **infra**: Infrastructure |").unwrap();
        assert!(fields.members.is_empty());

        let bare = cluster_bullet("- **infra**: Infrastructure").unwrap();
        assert!(bare.members.is_empty());
    }

    #[test]
    fn test_parent_attr() {
        assert_eq!(parent_attr("- parent: vpc"), Some("vpc"));
        assert_eq!(parent_attr("- parent vpc"), None);
        assert_eq!(parent_attr("- **p**: x | y"), None);
    }

    #[test]
    fn test_expected_total() {
        assert_eq!(
            expected_total("- Total: 22 nodes"),
            Some((22, Some(CountAxis::Nodes)))
        );
        assert_eq!(
            expected_total("- Total: 13 connections"),
            Some((13, Some(CountAxis::Edges)))
        );
        assert_eq!(
            expected_total("- total: 13 clusters"),
            Some((13, Some(CountAxis::Clusters)))
        );
        assert_eq!(expected_total("- Total: 5 widgets"), Some((5, None)));
        assert_eq!(expected_total("- Count: 5 nodes"), None);
    }
}
