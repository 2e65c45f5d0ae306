use std::panic::{self, AssertUnwindSafe};

use crate::fences::{collapse_blank_lines, extract_code_fences};
use crate::lists::{flatten_lists, normalize_list_prefixes};
use crate::tags::normalize_tags;
use crate::types::{CommandKind, PipelineDiagnostic, SanitizeOptions, SanitizedOutput};

type Step = (&'static str, fn(&str) -> String);

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn step_table(options: &SanitizeOptions) -> Vec<Step> {
    let mut steps: Vec<Step> = vec![("Normalized line endings", normalize_line_endings)];
    if !options.preserve_code_blocks {
        steps.push(("Removed code blocks", extract_code_fences));
    }
    steps.push(("Normalized list markers", normalize_list_prefixes));
    steps.push(("Flattened nested lists", flatten_lists));
    steps.push(("Normalized hashtags", normalize_tags));
    steps.push(("Collapsed excess blank lines", collapse_blank_lines));
    steps
}

fn run_steps(text: &str, steps: &[Step]) -> (String, Vec<String>) {
    let mut current = text.to_string();
    let mut modifications = Vec::new();
    for (label, step) in steps {
        let next = step(&current);
        if next != current {
            modifications.push((*label).to_string());
        }
        current = next;
    }
    (current, modifications)
}

// Fail-open wrapper: a latent bug in any step must never block the user's
// content, so a panic yields the original text instead of propagating.
fn run_guarded(text: &str, steps: &[Step]) -> Option<(String, Vec<String>)> {
    panic::catch_unwind(AssertUnwindSafe(|| run_steps(text, steps))).ok()
}

/// Runs the fixed sanitization sequence over raw LLM output. Flashcard
/// content is returned untouched: its Q/A boundaries have their own rules and
/// generic flattening would corrupt them.
pub fn sanitize(text: &str, options: &SanitizeOptions) -> SanitizedOutput {
    if !options.enable_formatting || options.command == CommandKind::Flashcard {
        return SanitizedOutput {
            text: text.to_string(),
            modifications: Vec::new(),
            diagnostic: None,
        };
    }

    let steps = step_table(options);
    let (output, modifications) = match run_guarded(text, &steps) {
        Some(result) => result,
        None => (text.to_string(), Vec::new()),
    };

    let diagnostic = if options.log_modifications && !modifications.is_empty() {
        Some(PipelineDiagnostic {
            command: options.command.as_str().to_string(),
            modifications: modifications.clone(),
            input_len: text.len() as u32,
            output_len: output.len() as u32,
        })
    } else {
        None
    };

    SanitizedOutput {
        text: output,
        modifications,
        diagnostic,
    }
}
