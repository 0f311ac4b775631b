//! Keybinding normalization.

/// Canonical form of a key combination.
///
/// Lower-cases, removes all whitespace and collapses modifier aliases
/// (`control` → `ctrl`, `option` → `alt`, `command`/`meta` → `cmd`).
/// Applying it twice gives the same result as applying it once.
pub fn normalize_keybinding(binding: &str) -> String {
    let compact: String = binding
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    compact
        .split('+')
        .map(|part| match part {
            "control" => "ctrl",
            "option" => "alt",
            "command" | "meta" => "cmd",
            other => other,
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_aliases_and_whitespace() {
        assert_eq!(normalize_keybinding("Control+Shift+ K"), "ctrl+shift+k");
        assert_eq!(normalize_keybinding("Option+F5"), "alt+f5");
        assert_eq!(normalize_keybinding("command+p"), "cmd+p");
        assert_eq!(normalize_keybinding("Meta + P"), "cmd+p");
    }

    #[test]
    fn is_idempotent() {
        for input in [
            "Control+Shift+ K",
            "ctrl+k ctrl+c",
            "  META+option+Control+x ",
            "ctrl++",
            "",
            "F12",
        ] {
            let once = normalize_keybinding(input);
            assert_eq!(normalize_keybinding(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn only_whole_tokens_are_aliased() {
        assert_eq!(normalize_keybinding("ctrl+optionx"), "ctrl+optionx");
        assert_eq!(normalize_keybinding("metaverse"), "metaverse");
    }

    #[test]
    fn plus_key_survives() {
        assert_eq!(normalize_keybinding("Ctrl++"), "ctrl++");
    }
}
