// Built-in note phrases. Each activity line carries one of them.

pub const DEFAULT_NOTES: &[&str] = &[
    "refactor notes",
    "small doc tweak",
    "daily log entry",
    "update dependencies list",
    "tiny formatting fix",
    "add sample output",
    "note about tests",
];

pub fn default_notes() -> Vec<String> {
    DEFAULT_NOTES.iter().map(|note| (*note).to_string()).collect()
}
