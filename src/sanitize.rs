//! Prohibited-character and reserved-word replacement for names headed to
//! targets with their own character rules (Windows paths, Teams channels,
//! Redmine subjects).
//!
//! One function over a rules table; each target ships as a `SanitizeRules`
//! constant.

/// How trailing characters are rewritten after the map passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingRule {
    /// Leave the tail alone.
    None,
    /// A trailing `.` becomes a full-width `．`.
    Dots,
    /// A trailing `.` becomes `．`, a trailing space becomes `＿`.
    DotsAndSpaces,
}

#[derive(Debug, Clone, Copy)]
pub struct SanitizeRules {
    /// Prohibited substrings and their replacements, applied everywhere.
    pub prohibited: &'static [(&'static str, &'static str)],
    /// Reserved words, replaced only on a whole-string case-insensitive
    /// match; first match wins.
    pub reserved: &'static [(&'static str, &'static str)],
    pub trailing: TrailingRule,
    /// Maximum length in characters.
    pub max_length: usize,
    /// Replace CSV separators regardless of options (Redmine exports).
    pub always_csv: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SanitizeOptions {
    /// Replace `,` with a full-width `，` for CSV embedding.
    pub csv: bool,
    /// Cut the result to the rules' maximum length.
    pub truncate: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            csv: false,
            truncate: true,
        }
    }
}

/// Windows filesystem names.
pub const PATH_RULES: SanitizeRules = SanitizeRules {
    prohibited: &[
        ("\\", "＼"),
        ("/", "／"),
        (":", "："),
        ("*", "＊"),
        ("?", "？"),
        ("\"", "＂"),
        ("<", "＜"),
        (">", "＞"),
        ("|", "｜"),
    ],
    reserved: &[
        ("CON", "_con_"),
        ("PRN", "_prn_"),
        ("AUX", "_aux_"),
        ("NUL", "_nul_"),
        ("COM1", "_com1_"),
        ("COM2", "_com2_"),
        ("COM3", "_com3_"),
        ("COM4", "_com4_"),
        ("COM5", "_com5_"),
        ("COM6", "_com6_"),
        ("COM7", "_com7_"),
        ("COM8", "_com8_"),
        ("COM9", "_com9_"),
        ("LPT1", "_lpt1_"),
        ("LPT2", "_lpt2_"),
        ("LPT3", "_lpt3_"),
        ("LPT4", "_lpt4_"),
        ("LPT5", "_lpt5_"),
        ("LPT6", "_lpt6_"),
        ("LPT7", "_lpt7_"),
        ("LPT8", "_lpt8_"),
        ("LPT9", "_lpt9_"),
    ],
    trailing: TrailingRule::DotsAndSpaces,
    max_length: 255,
    always_csv: false,
};

/// Teams channel names.
pub const TEAMS_RULES: SanitizeRules = SanitizeRules {
    prohibited: &[
        ("~", "～"),
        ("#", "＃"),
        ("%", "％"),
        ("&", "＆"),
        ("*", "＊"),
        (":", "："),
        ("<", "＜"),
        (">", "＞"),
        ("?", "？"),
        ("/", "／"),
        ("\\", "￥"),
        ("{", "｛"),
        ("}", "｝"),
        ("|", "｜"),
        ("\"", "＂"),
    ],
    reserved: &[
        ("General", "_general_"),
        ("Files", "_files_"),
        ("forms", "_forms_"),
        ("Documents", "_documents_"),
        ("一般", "_general_"),
    ],
    trailing: TrailingRule::Dots,
    max_length: 255,
    always_csv: false,
};

/// Redmine ticket subjects, always prepared for CSV embedding.
pub const REDMINE_RULES: SanitizeRules = SanitizeRules {
    prohibited: &[("#", "＃")],
    reserved: &[],
    trailing: TrailingRule::None,
    max_length: 255,
    always_csv: true,
};

/// Apply a rules table to a string: prohibited substrings, reserved
/// words, trailing characters, CSV separators, then truncation.
pub fn sanitize(text: &str, rules: &SanitizeRules, options: SanitizeOptions) -> String {
    let mut out = text.to_string();

    for (prohibited, safe) in rules.prohibited {
        out = out.replace(prohibited, safe);
    }

    for (reserved, safe) in rules.reserved {
        if out.eq_ignore_ascii_case(reserved) {
            out = (*safe).to_string();
            break;
        }
    }

    out = replace_trailing(out, rules.trailing);

    if options.csv || rules.always_csv {
        out = out.replace(',', "，");
    }

    if options.truncate && out.chars().count() > rules.max_length {
        out = out.chars().take(rules.max_length).collect();
    }

    out
}

fn replace_trailing(mut text: String, rule: TrailingRule) -> String {
    loop {
        match rule {
            TrailingRule::None => break,
            TrailingRule::Dots => {
                if text.ends_with('.') {
                    text.pop();
                    text.push('．');
                } else {
                    break;
                }
            }
            TrailingRule::DotsAndSpaces => {
                if text.ends_with(' ') {
                    text.pop();
                    text.push('＿');
                } else if text.ends_with('.') {
                    text.pop();
                    text.push('．');
                } else {
                    break;
                }
            }
        }
    }
    text
}
