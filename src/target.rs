//! Parsing of suppression target strings.
//!
//! This module handles the ad hoc reference grammar of the `Target`
//! named argument: dotted namespace/type paths, `+`-joined nested
//! types, backtick generic arity, and `.#`-separated member
//! references with an optional parameter-type list.
//!
//! Identifier comparison is exact text and case-sensitive. Malformed
//! input never raises; every parse function returns `Option`, `None`
//! meaning the target matches nothing.

/// One segment of a dotted/`+`-joined declaration path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub name: String,
    /// Backtick arity, e.g. `` Ele`2 ``. `None` when not written,
    /// which for type segments means arity exactly zero.
    pub arity: Option<u32>,
    /// Whether this segment was joined to the previous one with `+`
    /// (a nested type) instead of `.`.
    pub nested: bool,
}

/// A member reference: owning-type path, `.#`, name, optional arity,
/// optional parameter-type list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTarget {
    pub owner: Vec<PathSegment>,
    pub name: String,
    pub arity: Option<u32>,
    /// `Some(vec![])` is the explicit empty list `()`, which matches
    /// only a zero-parameter overload. `None` means no parentheses
    /// were written at all.
    pub params: Option<Vec<String>>,
}

/// A structurally valid target string. Whether a `Path` names a
/// namespace or a type is decided by the scope it is paired with, via
/// the [`ParsedTarget::as_namespace_path`] / [`ParsedTarget::as_type_path`]
/// views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTarget {
    Path(Vec<PathSegment>),
    Member(MemberTarget),
}

/// A path re-read as a namespace prefix plus a nested-type chain:
/// the last dot-joined segment heads the chain, every `+`-joined
/// segment extends it. Absent arity is arity zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePath<'a> {
    pub namespace: Vec<&'a str>,
    pub chain: Vec<(&'a str, u32)>,
}

/// A member reference normalized for resolution, from either the
/// `.#` form or the `#`-less dotted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView<'a> {
    pub owner: TypePath<'a>,
    pub name: &'a str,
    pub arity: Option<u32>,
    pub params: Option<&'a [String]>,
}

pub fn parse_target(text: &str) -> Option<ParsedTarget> {
    match text.find(".#") {
        Some(position) => {
            let owner = parse_path(&text[..position])?;
            let (name, arity, params) = parse_member(&text[position + 2..])?;
            Some(ParsedTarget::Member(MemberTarget { owner, name, arity, params }))
        }
        None => {
            // A stray `#` outside the `.#` separator is malformed.
            if text.contains('#') {
                return None;
            }
            parse_path(text).map(ParsedTarget::Path)
        }
    }
}

impl ParsedTarget {
    /// The path as a namespace reference: every segment dot-joined,
    /// no arity anywhere.
    pub fn as_namespace_path(&self) -> Option<Vec<&str>> {
        let ParsedTarget::Path(segments) = self else {
            return None;
        };
        if segments.iter().any(|s| s.nested || s.arity.is_some()) {
            return None;
        }
        Some(segments.iter().map(|s| s.name.as_str()).collect())
    }

    /// The path as a type reference.
    pub fn as_type_path(&self) -> Option<TypePath<'_>> {
        let ParsedTarget::Path(segments) = self else {
            return None;
        };
        type_path(segments)
    }

    /// The target as a member reference. A plain dotted path is
    /// re-read as owner path + final member-name segment, matching
    /// the `#`-less member targets the original attribute grammar
    /// also accepted.
    pub fn as_member(&self) -> Option<MemberView<'_>> {
        match self {
            ParsedTarget::Member(member) => Some(MemberView {
                owner: type_path(&member.owner)?,
                name: &member.name,
                arity: member.arity,
                params: member.params.as_deref(),
            }),
            ParsedTarget::Path(segments) => {
                let (last, owner) = segments.split_last()?;
                // The member name must be dot-joined and have an
                // owner in front of it.
                if owner.is_empty() || last.nested {
                    return None;
                }
                Some(MemberView {
                    owner: type_path(owner)?,
                    name: &last.name,
                    arity: last.arity,
                    params: None,
                })
            }
        }
    }
}

fn type_path(segments: &[PathSegment]) -> Option<TypePath<'_>> {
    // The chain head is the last dot-joined segment; everything
    // before it is the namespace part and cannot carry arity.
    let head = segments.iter().rposition(|s| !s.nested)?;
    let (namespace, chain) = segments.split_at(head);
    if namespace.iter().any(|s| s.arity.is_some()) {
        return None;
    }
    Some(TypePath {
        namespace: namespace.iter().map(|s| s.name.as_str()).collect(),
        chain: chain
            .iter()
            .map(|s| (s.name.as_str(), s.arity.unwrap_or(0)))
            .collect(),
    })
}

fn parse_path(text: &str) -> Option<Vec<PathSegment>> {
    let mut segments = Vec::new();
    let mut rest = text;
    let mut nested = false;
    loop {
        let (raw, next) = match rest.find(['.', '+']) {
            Some(i) => (&rest[..i], Some((rest.as_bytes()[i], &rest[i + 1..]))),
            None => (rest, None),
        };
        let (name, arity) = split_arity(raw)?;
        segments.push(PathSegment { name: name.to_owned(), arity, nested });
        match next {
            None => break,
            Some((b'+', remainder)) => {
                nested = true;
                rest = remainder;
            }
            Some((_, remainder)) => {
                // A namespace cannot live under a type: once a `+`
                // appears, `.` is no longer a valid separator.
                if nested {
                    return None;
                }
                rest = remainder;
            }
        }
    }
    Some(segments)
}

/// Split `` name`digits `` into (name, arity). No backtick means no
/// arity. A backtick not followed by one or more ASCII digits is
/// malformed.
fn split_arity(raw: &str) -> Option<(&str, Option<u32>)> {
    match raw.find('`') {
        None => valid_name(raw).then_some((raw, None)),
        Some(i) => {
            let (name, digits) = (&raw[..i], &raw[i + 1..]);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let arity = digits.parse().ok()?;
            valid_name(name).then_some((name, Some(arity)))
        }
    }
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['#', '(', ')'])
}

fn parse_member(text: &str) -> Option<(String, Option<u32>, Option<Vec<String>>)> {
    let (head, params) = match text.find('(') {
        Some(i) => {
            // The parameter list must close the string.
            let inner = text[i + 1..].strip_suffix(')')?;
            (&text[..i], Some(parse_params(inner)?))
        }
        None => {
            if text.contains(')') {
                return None;
            }
            (text, None)
        }
    };
    let (name, arity) = split_arity(head)?;
    Some((name.to_owned(), arity, params))
}

fn parse_params(inner: &str) -> Option<Vec<String>> {
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut params = Vec::new();
    for part in inner.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return None;
        }
        params.push(part.to_owned());
    }
    Some(params)
}
