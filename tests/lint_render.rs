//! Lint: key hints (`[X]`) must be clickable.
//!
//! Every `[1]`, `[A]`, `[0]` hint drawn by a `render.rs` has to come with a
//! click target, otherwise it works from the keyboard but not on a phone.
//! Plain `cl.push(...)` draws a line without a target; hints go through
//! `push_clickable()` or one of the render helpers that wrap it.
//!
//! This test scans all `render.rs` files under `src/games/` and flags
//! `.push(` lines whose text contains a bracket key.

use std::fs;
use std::path::Path;

/// Helpers that register a click target for what they draw.
const CLICKABLE_PUSHES: &[&str] = &[
    "push_clickable(",
    "push_choice(",
    "push_choice_dim(",
    "push_suspect(",
    "push_button(",
    "push_close_hint(",
];

/// `[I]`, `[x]`, `[1]`, `[-]` and similar one-character keys.
fn contains_bracket_key(s: &str) -> bool {
    s.as_bytes().windows(3).any(|w| {
        w[0] == b'[' && w[2] == b']' && (w[1].is_ascii_alphanumeric() || b"-=!~|".contains(&w[1]))
    })
}

fn find_bracket_key_in_push(source: &str) -> Vec<(usize, String)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.starts_with("//") || !contains_bracket_key(line) {
                return None;
            }
            let clickable = CLICKABLE_PUSHES.iter().any(|p| line.contains(p));
            (line.contains(".push(") && !clickable).then(|| (i + 1, trimmed.to_string()))
        })
        .collect()
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().is_some_and(|n| n == "render.rs") {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            let display_path = path.display().to_string();
            for (line_num, line) in find_bracket_key_in_push(&source) {
                violations.push((display_path.clone(), line_num, line));
            }
        }
    }
}

#[test]
fn no_bracket_keys_in_non_clickable_push() {
    let games_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games");
    let mut all_violations = Vec::new();
    visit_render_files(&games_dir, &mut all_violations);

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found key hints [X] in non-clickable cl.push() calls.\n\
             Use push_clickable() or a helper such as push_choice().\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn render_files_are_found() {
    let render = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/games/detective/render.rs");
    assert!(render.exists());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_hint_in_plain_push() {
        let source = r#"cl.push(Line::from(" [X] Acusar  [R] Recomeçar"));"#;
        assert_eq!(find_bracket_key_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from(" [X] Acusar"), SUBMIT_ACCUSATION);"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn allows_helpers() {
        assert!(find_bracket_key_in_push(r#"push_choice(&mut cl, 0, "[1] Entrar");"#).is_empty());
        assert!(find_bracket_key_in_push(r#"push_button(&mut cl, 'X', "[X] Acusar", c, 80);"#)
            .is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" [0] Fechar"));"#;
        assert!(find_bracket_key_in_push(source).is_empty());
    }

    #[test]
    fn reports_line_numbers() {
        let source = "let a = 1;\ncl.push(Line::from(\" [a] Esposa\"));\n";
        assert_eq!(find_bracket_key_in_push(source)[0].0, 2);
    }

    #[test]
    fn bracket_key_detection() {
        assert!(contains_bracket_key("[X]"));
        assert!(contains_bracket_key("[a]"));
        assert!(contains_bracket_key("[1]"));
        assert!(contains_bracket_key("[-]"));
        assert!(!contains_bracket_key("[]"));
        assert!(!contains_bracket_key("[{}]"));
        assert!(!contains_bracket_key("[ab]"));
        assert!(!contains_bracket_key("ab"));
    }
}
