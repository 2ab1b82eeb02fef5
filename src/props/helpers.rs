use once_cell::sync::Lazy;
use regex::Regex;

/// `Name = ...`, `Name[2] = ...`, with the permissive legacy name class so
/// both dialects' lines match.
static DEF_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_ /-]*?)\s*(?:\[\d+\])?\s*=\s*(.*)$").unwrap()
});

/// Locate the source line a dotted key path sits on, for error messages.
/// Tracks brace scopes so nested keys resolve to their own line; UModel
/// writes both `Name = {` and the brace-on-next-line style.
pub(super) fn find_source_line(key: &str, raw_content: &str) -> (usize, String) {
    let key_parts: Vec<&str> = key.split('.').collect();
    let mut scope_stack: Vec<String> = Vec::new();
    let mut pending_scope: Option<String> = None;

    for (idx, line) in raw_content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        if trimmed == "{" {
            scope_stack.push(pending_scope.take().unwrap_or_default());
            continue;
        }

        if trimmed.starts_with('}') {
            scope_stack.pop();
            pending_scope = None;
            continue;
        }

        let Some(caps) = DEF_LINE_RE.captures(trimmed) else {
            continue;
        };
        let name = caps[1].trim_end().to_string();
        let rhs = caps[2].trim().to_string();

        let full_path = {
            let mut path: Vec<&str> = scope_stack
                .iter()
                .map(|s| s.as_str())
                .filter(|s| !s.is_empty())
                .collect();
            path.push(&name);
            path.join(".")
        };

        if full_path == key {
            return (idx + 1, trimmed.to_string());
        }

        let simple_key = key_parts.last().unwrap_or(&key);
        if name == *simple_key {
            return (idx + 1, trimmed.to_string());
        }

        if rhs == "{" || (rhs.starts_with('{') && !rhs.contains('}')) {
            scope_stack.push(name);
        } else if rhs.is_empty() {
            pending_scope = Some(name);
        }
    }

    (0, "<key not found>".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_top_level_key() {
        let raw = "StaticMesh = StaticMesh'/Game/SM_Rock.SM_Rock'\nTwoSided = true\n";
        let (line, snippet) = find_source_line("TwoSided", raw);
        assert_eq!(line, 2);
        assert!(snippet.starts_with("TwoSided"));
    }

    #[test]
    fn test_find_nested_key_with_inline_brace() {
        let raw = "Position = {\n  X = 1.5,\n  Y = -2\n}\n";
        let (line, _) = find_source_line("Position.Y", raw);
        assert_eq!(line, 3);
    }

    #[test]
    fn test_find_nested_key_with_brace_on_next_line() {
        let raw = "BasePropertyOverrides =\n{\n  BlendMode = BLEND_Masked (1)\n}\n";
        let (line, snippet) = find_source_line("BasePropertyOverrides.BlendMode", raw);
        assert_eq!(line, 3);
        assert!(snippet.contains("BLEND_Masked"));
    }

    #[test]
    fn test_missing_key() {
        let raw = "A = 1\n";
        let (line, snippet) = find_source_line("Nope", raw);
        assert_eq!(line, 0);
        assert_eq!(snippet, "<key not found>");
    }
}
