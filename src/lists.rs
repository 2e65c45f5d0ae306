use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ListNode;

static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)([*+-]|\d+\.)\s+(.*)$").unwrap());

fn map_lines(text: &str, transform: impl Fn(&str) -> String) -> String {
    text.split('\n')
        .map(|line| transform(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites every list marker (`*`, `+`, `-`, `N.`) to `-`, leaving the
/// leading whitespace run and the item content untouched.
pub fn normalize_list_prefixes(text: &str) -> String {
    map_lines(text, |line| match LIST_ITEM_RE.captures(line) {
        Some(captures) => format!(
            "{}- {}",
            captures.get(1).map_or("", |m| m.as_str()),
            captures.get(3).map_or("", |m| m.as_str())
        ),
        None => line.to_string(),
    })
}

/// Drops all list indentation: every item becomes a top-level `- ` bullet.
/// Non-list lines, blank lines included, pass through verbatim. Purely
/// textual; depth information is discarded, not re-encoded.
pub fn flatten_lists(text: &str) -> String {
    map_lines(text, |line| match LIST_ITEM_RE.captures(line) {
        Some(captures) => format!("- {}", captures.get(3).map_or("", |m| m.as_str())),
        None => line.to_string(),
    })
}

/// Parses indented list lines into a forest. Depth is inferred by comparing
/// each item's indentation width against the open ancestors, not by a fixed
/// divisor. Non-list lines are skipped entirely.
pub fn parse_nested_list(text: &str) -> Vec<ListNode> {
    let mut roots: Vec<ListNode> = Vec::new();
    let mut stack: Vec<(usize, ListNode)> = Vec::new();

    for line in text.lines() {
        let Some(captures) = LIST_ITEM_RE.captures(line) else {
            continue;
        };
        let indent = captures.get(1).map_or(0, |m| m.as_str().len());
        let content = captures.get(3).map_or("", |m| m.as_str()).to_string();

        while stack.last().is_some_and(|(top, _)| *top >= indent) {
            let Some((_, node)) = stack.pop() else { break };
            attach(&mut stack, &mut roots, node);
        }

        let level = stack.len() as u32;
        stack.push((
            indent,
            ListNode {
                content,
                level,
                children: Vec::new(),
            },
        ));
    }

    while let Some((_, node)) = stack.pop() {
        attach(&mut stack, &mut roots, node);
    }

    roots
}

fn attach(stack: &mut [(usize, ListNode)], roots: &mut Vec<ListNode>, node: ListNode) {
    match stack.last_mut() {
        Some((_, parent)) => parent.children.push(node),
        None => roots.push(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rewrites_heterogeneous_markers() {
        let input = "* one\n+ two\n3. three\n- four";
        assert_eq!(normalize_list_prefixes(input), "- one\n- two\n- three\n- four");
    }

    #[test]
    fn normalize_preserves_indentation_and_content() {
        let input = "  * nested item\nplain text";
        assert_eq!(normalize_list_prefixes(input), "  - nested item\nplain text");
    }

    #[test]
    fn flatten_removes_all_indentation() {
        let input = "- top\n  - child\n    1. grandchild\nprose\n\n* other";
        assert_eq!(
            flatten_lists(input),
            "- top\n- child\n- grandchild\nprose\n\n- other"
        );
    }

    #[test]
    fn flatten_is_idempotent() {
        let input = "- a\n  - b\n    - c\n\ntext\n  * d";
        let once = flatten_lists(input);
        assert_eq!(flatten_lists(&once), once);
    }

    #[test]
    fn flatten_preserves_trailing_newline() {
        assert_eq!(flatten_lists("  - a\n"), "- a\n");
    }

    #[test]
    fn parse_builds_multi_level_forest() {
        let input = "- a\n  - b\n    - c\n  - d\n- e";
        let forest = parse_nested_list(input);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].content, "a");
        assert_eq!(forest[0].level, 0);
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].content, "b");
        assert_eq!(forest[0].children[0].level, 1);
        assert_eq!(forest[0].children[0].children[0].content, "c");
        assert_eq!(forest[0].children[0].children[0].level, 2);
        assert_eq!(forest[0].children[1].content, "d");
        assert_eq!(forest[1].content, "e");
    }

    #[test]
    fn parse_handles_flat_list() {
        let forest = parse_nested_list("- a\n- b\n- c");
        assert_eq!(forest.len(), 3);
        assert!(forest.iter().all(|node| node.level == 0 && node.children.is_empty()));
    }

    #[test]
    fn parse_skips_non_list_lines() {
        let forest = parse_nested_list("intro\n- a\nmore prose\n  - b");
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children.len(), 1);
    }

    #[test]
    fn parse_returns_to_shallower_depth() {
        let input = "- a\n    - b\n  - c\n- d";
        let forest = parse_nested_list(input);
        assert_eq!(forest.len(), 2);
        // b (indent 4) closes when c (indent 2) arrives; both hang off a.
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].content, "b");
        assert_eq!(forest[0].children[1].content, "c");
        assert_eq!(forest[1].content, "d");
    }
}
