//! Generic search over the section forest.
//!
//! Traversal is pre-order and iterative (explicit stack), so document depth is
//! bounded only by memory. A matching section is still descended into: a
//! relevant heading ("Skin") can sit anywhere below another relevant heading
//! ("Toxicity").

use crate::models::Section;

/// Visit every section of the forest exactly once, in pre-order.
pub fn walk<'a, F>(roots: &'a [Section], mut visit: F)
where
    F: FnMut(&'a Section),
{
    let mut stack: Vec<&'a Section> = roots.iter().rev().collect();
    while let Some(section) = stack.pop() {
        visit(section);
        stack.extend(section.children.iter().rev());
    }
}

/// All sections satisfying `predicate`, in pre-order.
pub fn find_sections<'a, P>(roots: &'a [Section], predicate: P) -> Vec<&'a Section>
where
    P: Fn(&Section) -> bool,
{
    let mut found = Vec::new();
    walk(roots, |section| {
        if predicate(section) {
            found.push(section);
        }
    });
    found
}

/// First section (pre-order) satisfying `predicate`.
pub fn find_first<'a, P>(roots: &'a [Section], predicate: P) -> Option<&'a Section>
where
    P: Fn(&Section) -> bool,
{
    let mut stack: Vec<&'a Section> = roots.iter().rev().collect();
    while let Some(section) = stack.pop() {
        if predicate(section) {
            return Some(section);
        }
        stack.extend(section.children.iter().rev());
    }
    None
}

/// Predicate: lower-cased heading contains any of `keywords`.
/// Keywords are expected in lower case.
pub fn heading_contains_any<'k>(keywords: &'k [&'k str]) -> impl Fn(&Section) -> bool + 'k {
    move |section| {
        let heading = section.heading.to_lowercase();
        keywords.iter().any(|k| heading.contains(k))
    }
}

/// Total number of sections in the forest.
pub fn count_sections(roots: &[Section]) -> usize {
    let mut n = 0;
    walk(roots, |_| n += 1);
    n
}
