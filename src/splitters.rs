use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{BlockInstruction, FlashcardBlock, FlashcardBlockKind, TaskMarker};

const CARD_TAG: &str = "#card";

// A new card starts at a blank line followed by `Q:`; a `Q:` directly under
// an answer line is still part of that answer.
static QA_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n(Q:)").unwrap());
static QA_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Q:[ \t]*(.*?)\n[ \t]*A:[ \t]*(.*)$").unwrap());

static TASK_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\S)(- (?:TODO|DOING|DONE|LATER|NOW|WAITING|CANCELLED)\b)").unwrap()
});
static TASK_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^- (.*)$").unwrap());
static MARKER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:TODO|DOING|DONE|LATER|NOW|WAITING|CANCELLED)\b").unwrap());

static SUMMARY_BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S)(- )").unwrap());

/// Splits flashcard text into an ordered block sequence. Only the head answer
/// of each card carries the `#card` tag; continuation lines never do, since
/// the tag marks the whole card for review scheduling. Text with no
/// recognizable Q/A pattern degrades to a single block wrapping the input.
pub fn split_flashcards(text: &str) -> Vec<FlashcardBlock> {
    let mut segments: Vec<&str> = Vec::new();
    let mut start = 0;
    for captures in QA_BOUNDARY_RE.captures_iter(text) {
        let Some(question_start) = captures.get(1) else {
            continue;
        };
        segments.push(&text[start..question_start.start()]);
        start = question_start.start();
    }
    segments.push(&text[start..]);

    let mut blocks = Vec::new();
    for segment in segments {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }
        match QA_PAIR_RE.captures(segment) {
            Some(captures) => {
                let question = captures.get(1).map_or("", |m| m.as_str()).trim();
                let body = captures.get(2).map_or("", |m| m.as_str());
                blocks.push(FlashcardBlock {
                    kind: FlashcardBlockKind::Question,
                    content: format!("Q: {question}"),
                    has_card: false,
                });
                push_answer_blocks(&mut blocks, body);
            }
            None if trimmed.starts_with("Q:") => {
                // Orphan question: keep it as top-level text rather than
                // dropping content.
                blocks.push(FlashcardBlock {
                    kind: FlashcardBlockKind::Question,
                    content: trimmed.to_string(),
                    has_card: trimmed.contains(CARD_TAG),
                });
            }
            None => {}
        }
    }

    if blocks.is_empty() {
        return vec![FlashcardBlock {
            kind: FlashcardBlockKind::Question,
            content: text.to_string(),
            has_card: text.contains(CARD_TAG),
        }];
    }
    blocks
}

fn push_answer_blocks(blocks: &mut Vec<FlashcardBlock>, body: &str) {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((&head, rest)) = lines.split_first() else {
        return;
    };

    let tagged = body.contains(CARD_TAG);
    let content = if tagged {
        format!("A: {head}")
    } else {
        format!("A: {head} {CARD_TAG}")
    };
    blocks.push(FlashcardBlock {
        kind: FlashcardBlockKind::Answer,
        content,
        has_card: true,
    });

    for line in rest {
        let stripped = line.trim_end_matches(CARD_TAG).trim_end();
        blocks.push(FlashcardBlock {
            kind: FlashcardBlockKind::Answer,
            content: stripped.to_string(),
            has_card: false,
        });
    }
}

/// Turns a flashcard block sequence into block-insertion instructions:
/// questions at top level, the head answer as a child of its question, and
/// continuation lines as children of the head answer.
pub fn plan_flashcard_blocks(blocks: &[FlashcardBlock]) -> Vec<BlockInstruction> {
    let mut plan = Vec::with_capacity(blocks.len());
    let mut last_question: Option<u32> = None;
    let mut head_answer: Option<u32> = None;

    for block in blocks {
        let index = plan.len() as u32;
        match block.kind {
            FlashcardBlockKind::Question => {
                last_question = Some(index);
                head_answer = None;
                plan.push(BlockInstruction {
                    parent: None,
                    content: block.content.clone(),
                    as_child: false,
                });
            }
            FlashcardBlockKind::Answer => {
                let parent = if block.has_card {
                    head_answer = Some(index);
                    last_question
                } else {
                    head_answer.or(last_question)
                };
                plan.push(BlockInstruction {
                    parent,
                    content: block.content.clone(),
                    as_child: parent.is_some(),
                });
            }
        }
    }

    plan
}

/// Re-applies the source task's marker to each subtask line and repairs list
/// items the model concatenated onto one physical line. Prose lines are
/// discarded; an empty result means the text held no recognizable subtasks
/// and the caller should surface that as a soft warning.
pub fn format_task_list(text: &str, marker: TaskMarker) -> String {
    let repaired = TASK_BOUNDARY_RE.replace_all(text, "${1}\n${2}");

    let mut lines = Vec::new();
    for line in repaired.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(captures) = TASK_ITEM_RE.captures(trimmed) {
            let rest = captures.get(1).map_or("", |m| m.as_str());
            if MARKER_PREFIX_RE.is_match(rest) {
                lines.push(format!("- {rest}"));
            } else {
                lines.push(format!("- {} {rest}", marker.as_str()));
            }
        } else if MARKER_PREFIX_RE.is_match(trimmed) {
            lines.push(format!("- {trimmed}"));
        }
    }

    lines.join("\n")
}

/// Repairs `- a- b` concatenation on bullet lines. No marker logic; applied
/// to summary output after the generic pipeline.
pub fn format_summary_list(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.starts_with("- ") {
                SUMMARY_BOUNDARY_RE.replace_all(line, "${1}\n${2}").into_owned()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
