use hatch::desktop::{self, ParseContext};

fn ctx(lang: &str, desktop: &str) -> ParseContext {
    ParseContext {
        lang: lang.to_string(),
        current_desktop: desktop.to_string(),
    }
}

#[test]
fn tolerates_whitespace_around_keys_and_values() {
    let text = "[Desktop Entry]
\tCategories = Debugger; Development; Git; IDE; Programming; TextEditor;
\tComment = Editor for building and debugging modern web and cloud applications
\tExec = bash -c \"code-insiders ~/Workspaces/Linux/Flutter.code-workspace\"
\tIcon = vscode-flutter
\tName = VSCode Insiders with Flutter
\tName[pt] = VSCode Insiders com Flutter
\tTerminal = false
\tNoDisplay = false
\tType = Application";

    let entry = desktop::parse("code.desktop", text, &ctx("pt", ""));

    assert_eq!(entry.name, "VSCode Insiders with Flutter");
    assert_eq!(entry.localized_name, "VSCode Insiders com Flutter");
    assert_eq!(entry.icon, "vscode-flutter");
    assert!(!entry.terminal);
    assert!(!entry.hidden);
}

#[test]
fn parsing_is_pure() {
    let text = "[Desktop Entry]\nName=Files\nComment=Browse files\nExec=nautilus %U\nCategories=Utility;\n";
    let ctx = ctx("en_US", "GNOME");
    let first = desktop::parse("files.desktop", text, &ctx);
    let second = desktop::parse("files.desktop", text, &ctx);
    assert_eq!(first, second);
}

#[test]
fn localized_fields_fall_back_to_plain_ones() {
    let text = "[Desktop Entry]\nName=Terminal\nComment=A shell\n";
    let entry = desktop::parse("term.desktop", text, &ctx("pl_PL", ""));
    assert_eq!(entry.localized_name, "Terminal");
    assert_eq!(entry.localized_comment, "A shell");
}

#[test]
fn localization_uses_primary_subtag() {
    let text = "[Desktop Entry]\nName=Calculator\nName[pl]=Kalkulator\nComment=Count things\nComment[pl]=Liczenie\n";
    let entry = desktop::parse("calc.desktop", text, &ctx("pl_PL", ""));
    assert_eq!(entry.localized_name, "Kalkulator");
    assert_eq!(entry.localized_comment, "Liczenie");
}

#[test]
fn exec_is_unquoted_and_truncated_at_placeholder() {
    let text = "[Desktop Entry]\nName=Editor\nExec=bash -c 'editor' %U\n";
    let entry = desktop::parse("editor.desktop", text, &ctx("en", ""));
    assert_eq!(entry.exec, "bash -c editor");
}

#[test]
fn only_show_in_depends_on_current_desktop() {
    let text = "[Desktop Entry]\nName=Tweaks\nOnlyShowIn=GNOME;\n";
    let on_kde = desktop::parse("tweaks.desktop", text, &ctx("en", "KDE"));
    assert!(on_kde.hidden);
    let on_gnome = desktop::parse("tweaks.desktop", text, &ctx("en", "GNOME"));
    assert!(!on_gnome.hidden);
}

#[test]
fn not_show_in_hides_on_listed_desktop() {
    let text = "[Desktop Entry]\nName=Panel\nNotShowIn=KDE;LXQt;\n";
    let on_kde = desktop::parse("panel.desktop", text, &ctx("en", "KDE"));
    assert!(on_kde.hidden);
    let on_sway = desktop::parse("panel.desktop", text, &ctx("en", "sway"));
    assert!(!on_sway.hidden);
}

#[test]
fn no_display_wins_over_later_visibility_keys() {
    let text = "[Desktop Entry]\nName=Ghost\nNoDisplay=true\nOnlyShowIn=KDE;\n";
    let entry = desktop::parse("ghost.desktop", text, &ctx("en", "KDE"));
    assert!(entry.hidden);
}

#[test]
fn hidden_key_suppresses_entry() {
    let text = "[Desktop Entry]\nName=Old\nHidden=true\n";
    let entry = desktop::parse("old.desktop", text, &ctx("en", ""));
    assert!(entry.hidden);
}

#[test]
fn malformed_boolean_is_ignored() {
    let text = "[Desktop Entry]\nName=App\nTerminal=maybe\nNoDisplay=yes\n";
    let entry = desktop::parse("app.desktop", text, &ctx("en", ""));
    assert!(!entry.terminal);
    assert!(!entry.hidden);
}

#[test]
fn only_the_desktop_entry_section_is_read() {
    let text = "Name=Too Early
[Desktop Entry]
Name=Real Name
[Desktop Action new-window]
Name=New Window
Exec=app --new-window
";
    let entry = desktop::parse("app.desktop", text, &ctx("en", ""));
    assert_eq!(entry.name, "Real Name");
    assert_eq!(entry.exec, "");
}

#[test]
fn lines_without_separator_are_skipped() {
    let text = "[Desktop Entry]\nName=App\nthis line is junk\nIcon=app-icon\n";
    let entry = desktop::parse("app.desktop", text, &ctx("en", ""));
    assert_eq!(entry.name, "App");
    assert_eq!(entry.icon, "app-icon");
}
