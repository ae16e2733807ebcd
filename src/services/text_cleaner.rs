use once_cell::sync::Lazy;
use regex::Regex;

static NON_PRINTABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\x20-\x7E]").expect("NON_PRINTABLE is a valid regex pattern")
});

/// Drop every character outside printable ASCII (0x20..=0x7E).
pub fn clean(text: &str) -> String {
    NON_PRINTABLE.replace_all(text, "").into_owned()
}
