//! Index id derivation

/// Derive the index id for a plugin name.
///
/// ASCII letters are lowercased and every other non-alphanumeric character
/// becomes `-`. Runs are not collapsed, so distinct names stay distinct.
pub fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
